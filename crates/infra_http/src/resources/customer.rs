//! Customer resource

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::CustomerId;
use domain_customer::{Customer, ValidCustomerForm};

/// Body of `POST /customers` and `PUT /customers/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct CustomerRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a ValidCustomerForm> for CustomerRequest<'a> {
    fn from(form: &'a ValidCustomerForm) -> Self {
        Self {
            name: &form.name,
            email: &form.email,
        }
    }
}

/// Customer as returned by the API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResource {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl From<CustomerResource> for Customer {
    fn from(resource: CustomerResource) -> Self {
        Customer {
            id: CustomerId::from_uuid(resource.id),
            name: resource.name,
            email: resource.email,
            created_at: resource.created_at,
            updated_at: resource.updated_at,
        }
    }
}
