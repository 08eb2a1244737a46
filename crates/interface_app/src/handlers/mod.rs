//! Action handlers
//!
//! One async function per user action. Mutating actions follow the same
//! sequence: input validation, session check, legality check against the
//! last displayed state, request, refetch. Invalid input is reported even
//! when the session has expired, and never reaches the backend.

pub mod auth;
pub mod customers;
pub mod invoices;
pub mod payments;
