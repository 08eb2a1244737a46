//! Customer actions

use tracing::{info, instrument};

use core_kernel::CustomerId;
use domain_customer::{Customer, CustomerForm};

use crate::error::ActionError;
use crate::AppState;

#[instrument(skip(state))]
pub async fn list_customers(state: &AppState) -> Result<Vec<Customer>, ActionError> {
    state.guard().ensure_active().await?;
    let mut customers = state.customers.list_customers().await?;
    customers.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(customers)
}

#[instrument(skip(state), fields(customer_id = %id))]
pub async fn get_customer(state: &AppState, id: CustomerId) -> Result<Customer, ActionError> {
    state.guard().ensure_active().await?;
    Ok(state.customers.get_customer(id).await?)
}

/// Validates the form and creates the customer
///
/// Invalid input never reaches the backend. A duplicate email comes back
/// as a conflict on the `email` field.
#[instrument(skip(state, form))]
pub async fn create_customer(state: &AppState, form: &CustomerForm) -> Result<Customer, ActionError> {
    let valid = form.validate()?;
    state.guard().ensure_active().await?;
    let customer = state.customers.create_customer(valid).await?;
    info!(customer_id = %customer.id, "Customer created");
    Ok(customer)
}

#[instrument(skip(state, form), fields(customer_id = %id))]
pub async fn update_customer(
    state: &AppState,
    id: CustomerId,
    form: &CustomerForm,
) -> Result<Customer, ActionError> {
    let valid = form.validate()?;
    state.guard().ensure_active().await?;
    Ok(state.customers.update_customer(id, valid).await?)
}

#[instrument(skip(state), fields(customer_id = %id))]
pub async fn delete_customer(state: &AppState, id: CustomerId) -> Result<(), ActionError> {
    state.guard().ensure_active().await?;
    state.customers.delete_customer(id).await?;
    info!("Customer deleted");
    Ok(())
}
