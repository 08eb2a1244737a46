//! Ports and Adapters Infrastructure
//!
//! Every resource the client touches (customers, invoices, payments,
//! authentication) is reached through a port trait defined in its domain
//! crate. The HTTP adapters in `infra_http` implement them against the
//! remote API; in-memory adapters behind the `mock` feature implement them
//! for tests.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │          interface_app action handlers        │
//! └──────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌──────────────────────────────────────────────┐
//! │  CustomerPort · InvoicePort · PaymentPort ·   │
//! │  AuthPort   (Result<T, PortError>)            │
//! └──────────────────────────────────────────────┘
//!            ▲                        ▲
//!   ┌────────┴────────┐      ┌────────┴────────┐
//!   │  HTTP adapters  │      │  Mock adapters  │
//!   └─────────────────┘      └─────────────────┘
//! ```
//!
//! All port methods return [`PortError`], whose [`ErrorKind`] is the error
//! taxonomy the views branch on.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

use crate::error::{FieldError, ValidationErrors};

/// The kinds of failure a caller must be able to tell apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Field-level problem; re-prompt the user for that field
    Validation,
    /// Operation attempted outside its legal state
    PreconditionFailed,
    /// Uniqueness violation
    Conflict,
    /// Referenced entity no longer exists
    NotFound,
    /// Missing, expired or rejected credential
    Auth,
    /// No response reached the caller
    Transport,
    /// A response arrived but could not be used (5xx, undecodable body)
    Unexpected,
}

/// Error type for port operations
///
/// Provides a unified error type that all port implementations must use,
/// ensuring consistent error handling across the HTTP and mock adapters.
#[derive(Debug, Error)]
pub enum PortError {
    /// One or more fields were rejected
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field_errors: ValidationErrors,
    },

    /// The entity is not in a state that allows the operation
    #[error("Precondition failed: {message}")]
    PreconditionFailed {
        message: String,
    },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        field: Option<String>,
    },

    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// Authentication or authorization failed
    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
    },

    /// The request never got a response
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered with a server-side failure
    #[error("Server error ({status}): {message}")]
    Server {
        status: u16,
        message: String,
    },

    /// A response body could not be turned into a domain value
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Validation error for a single field
    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        PortError::Validation {
            field_errors: ValidationErrors::single(field, message.clone()),
            message,
        }
    }

    /// Creates a Validation error from collected field errors
    pub fn validation(field_errors: ValidationErrors) -> Self {
        let message = field_errors
            .first_message()
            .unwrap_or("Validation failed")
            .to_string();
        PortError::Validation {
            message,
            field_errors,
        }
    }

    /// Creates a PreconditionFailed error
    pub fn precondition(message: impl Into<String>) -> Self {
        PortError::PreconditionFailed {
            message: message.into(),
        }
    }

    /// Creates a Conflict error attached to a field
    pub fn conflict(message: impl Into<String>, field: Option<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
            field,
        }
    }

    /// Creates an Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        PortError::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        PortError::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Returns the taxonomy kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            PortError::Validation { .. } => ErrorKind::Validation,
            PortError::PreconditionFailed { .. } => ErrorKind::PreconditionFailed,
            PortError::Conflict { .. } => ErrorKind::Conflict,
            PortError::NotFound { .. } => ErrorKind::NotFound,
            PortError::Unauthorized { .. } => ErrorKind::Auth,
            PortError::Transport { .. } => ErrorKind::Transport,
            PortError::Server { .. } | PortError::Transformation { .. } => ErrorKind::Unexpected,
        }
    }

    /// The message as reported by whoever rejected the request
    pub fn message(&self) -> String {
        match self {
            PortError::Validation { message, .. }
            | PortError::PreconditionFailed { message }
            | PortError::Conflict { message, .. }
            | PortError::Unauthorized { message }
            | PortError::Transport { message, .. }
            | PortError::Server { message, .. }
            | PortError::Transformation { message } => message.clone(),
            PortError::NotFound { entity_type, .. } => format!("{} not found", entity_type),
        }
    }

    /// Field errors to show inline, if any
    pub fn field_errors(&self) -> ValidationErrors {
        match self {
            PortError::Validation { field_errors, .. } => field_errors.clone(),
            PortError::Conflict {
                message,
                field: Some(field),
            } => vec![FieldError::new(field.clone(), message.clone())].into(),
            _ => ValidationErrors::new(),
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }

    /// Returns true if the credential must be discarded
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, PortError::Unauthorized { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker so they can be shared across tasks.
pub trait DomainPort: Send + Sync + 'static {}

/// Outcome of one item in a batch fetch
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// The item's data arrived
    Available(T),
    /// The item could not be fetched; the rest of the batch is unaffected
    Unavailable { reason: String },
}

impl<T> Fetched<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Fetched::Available(_))
    }

    pub fn as_available(&self) -> Option<&T> {
        match self {
            Fetched::Available(value) => Some(value),
            Fetched::Unavailable { .. } => None,
        }
    }
}

impl<T> From<Result<T, PortError>> for Fetched<T> {
    fn from(result: Result<T, PortError>) -> Self {
        match result {
            Ok(value) => Fetched::Available(value),
            Err(e) => Fetched::Unavailable {
                reason: e.message(),
            },
        }
    }
}

/// A batch result mapping each requested key to its own outcome
#[derive(Debug, Clone)]
pub struct PartialResults<K, T> {
    entries: HashMap<K, Fetched<T>>,
}

impl<K: Eq + Hash, T> PartialResults<K, T> {
    pub fn get(&self, key: &K) -> Option<&Fetched<T>> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys whose fetch failed
    pub fn unavailable(&self) -> Vec<&K> {
        self.entries
            .iter()
            .filter(|(_, v)| !v.is_available())
            .map(|(k, _)| k)
            .collect()
    }

    /// Key/data pairs for the items that arrived
    pub fn available(&self) -> impl Iterator<Item = (&K, &T)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_available().map(|data| (k, data)))
    }
}

impl<K: Eq + Hash, T> FromIterator<(K, Fetched<T>)> for PartialResults<K, T> {
    fn from_iter<I: IntoIterator<Item = (K, Fetched<T>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
