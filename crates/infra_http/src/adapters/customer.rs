//! Customer adapter

use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{CustomerId, DomainPort, PortError};
use domain_customer::{Customer, CustomerPort, ValidCustomerForm};

use crate::client::ApiClient;
use crate::resources::{CustomerRequest, CustomerResource};

/// `CustomerPort` over `/customers`
#[derive(Debug, Clone)]
pub struct HttpCustomerAdapter {
    client: ApiClient,
}

impl HttpCustomerAdapter {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl DomainPort for HttpCustomerAdapter {}

#[async_trait]
impl CustomerPort for HttpCustomerAdapter {
    #[instrument(skip(self, form))]
    async fn create_customer(&self, form: ValidCustomerForm) -> Result<Customer, PortError> {
        debug!("Creating customer");
        let resource: CustomerResource = self
            .client
            .post("/customers", &CustomerRequest::from(&form))
            .await?;
        Ok(resource.into())
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn get_customer(&self, id: CustomerId) -> Result<Customer, PortError> {
        let resource: CustomerResource = self
            .client
            .get(&format!("/customers/{}", id.as_uuid()))
            .await
            .map_err(|e| e.for_entity("Customer", id))?;
        Ok(resource.into())
    }

    #[instrument(skip(self))]
    async fn list_customers(&self) -> Result<Vec<Customer>, PortError> {
        let resources: Vec<CustomerResource> = self.client.get("/customers").await?;
        debug!(count = resources.len(), "Fetched customers");
        Ok(resources.into_iter().map(Customer::from).collect())
    }

    #[instrument(skip(self, form), fields(customer_id = %id))]
    async fn update_customer(
        &self,
        id: CustomerId,
        form: ValidCustomerForm,
    ) -> Result<Customer, PortError> {
        let resource: CustomerResource = self
            .client
            .put(&format!("/customers/{}", id.as_uuid()), &CustomerRequest::from(&form))
            .await
            .map_err(|e| e.for_entity("Customer", id))?;
        Ok(resource.into())
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn delete_customer(&self, id: CustomerId) -> Result<(), PortError> {
        self.client
            .delete(&format!("/customers/{}", id.as_uuid()))
            .await
            .map_err(|e| e.for_entity("Customer", id))
    }
}
