//! Customer Domain Ports
//!
//! The `CustomerPort` trait defines every operation the client performs on
//! the customer resource. Adapters:
//!
//! - **HTTP Adapter**: Calls the remote API (infra_http)
//! - **Mock Adapter**: In-memory store for tests
//!
//! Only validated input ([`ValidCustomerForm`]) can be sent through the
//! port, so a malformed form never produces a request.

use async_trait::async_trait;

use core_kernel::{CustomerId, DomainPort, PortError};

use crate::customer::{Customer, ValidCustomerForm};

/// The port trait for customer resource operations
#[async_trait]
pub trait CustomerPort: DomainPort {
    /// Creates a customer; a duplicate email yields `PortError::Conflict`
    async fn create_customer(&self, form: ValidCustomerForm) -> Result<Customer, PortError>;

    /// Retrieves a customer by ID
    async fn get_customer(&self, id: CustomerId) -> Result<Customer, PortError>;

    /// Lists all customers
    async fn list_customers(&self) -> Result<Vec<Customer>, PortError>;

    /// Replaces the name and email of a customer
    async fn update_customer(
        &self,
        id: CustomerId,
        form: ValidCustomerForm,
    ) -> Result<Customer, PortError>;

    /// Deletes a customer
    async fn delete_customer(&self, id: CustomerId) -> Result<(), PortError>;
}

/// Mock implementation of CustomerPort for testing
///
/// Stores customers in memory and enforces email uniqueness the way the
/// backend does.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use crate::error::CustomerError;

    /// In-memory mock implementation of CustomerPort
    #[derive(Debug, Default, Clone)]
    pub struct MockCustomerPort {
        customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
    }

    impl MockCustomerPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with customers for testing
        pub async fn with_customers(customers: Vec<Customer>) -> Self {
            let port = Self::new();
            for customer in customers {
                port.customers.write().await.insert(customer.id, customer);
            }
            port
        }

        pub async fn count(&self) -> usize {
            self.customers.read().await.len()
        }

        fn email_taken(
            customers: &HashMap<CustomerId, Customer>,
            email: &str,
            except: Option<CustomerId>,
        ) -> bool {
            customers
                .values()
                .any(|c| Some(c.id) != except && c.email.eq_ignore_ascii_case(email))
        }
    }

    impl DomainPort for MockCustomerPort {}

    #[async_trait]
    impl CustomerPort for MockCustomerPort {
        async fn create_customer(&self, form: ValidCustomerForm) -> Result<Customer, PortError> {
            let mut customers = self.customers.write().await;
            if Self::email_taken(&customers, &form.email, None) {
                return Err(CustomerError::DuplicateEmail(form.email).into());
            }

            let now = Utc::now().naive_utc();
            let customer = Customer {
                id: CustomerId::new_v7(),
                name: form.name,
                email: form.email,
                created_at: Some(now),
                updated_at: Some(now),
            };
            customers.insert(customer.id, customer.clone());
            Ok(customer)
        }

        async fn get_customer(&self, id: CustomerId) -> Result<Customer, PortError> {
            self.customers
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| CustomerError::not_found(id).into())
        }

        async fn list_customers(&self) -> Result<Vec<Customer>, PortError> {
            let mut customers: Vec<Customer> =
                self.customers.read().await.values().cloned().collect();
            customers.sort_by_key(|c| c.id);
            Ok(customers)
        }

        async fn update_customer(
            &self,
            id: CustomerId,
            form: ValidCustomerForm,
        ) -> Result<Customer, PortError> {
            let mut customers = self.customers.write().await;
            if !customers.contains_key(&id) {
                return Err(CustomerError::not_found(id).into());
            }
            if Self::email_taken(&customers, &form.email, Some(id)) {
                return Err(CustomerError::DuplicateEmail(form.email).into());
            }

            let customer = customers
                .get_mut(&id)
                .ok_or_else(|| PortError::from(CustomerError::not_found(id)))?;
            customer.name = form.name;
            customer.email = form.email;
            customer.updated_at = Some(Utc::now().naive_utc());
            Ok(customer.clone())
        }

        async fn delete_customer(&self, id: CustomerId) -> Result<(), PortError> {
            self.customers
                .write()
                .await
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| CustomerError::not_found(id).into())
        }
    }
}
