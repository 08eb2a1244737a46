//! HTTP error types
//!
//! This module defines the errors that can occur while talking to the
//! invoicing API and maps them onto the port error taxonomy.
//!
//! | Response                         | Port error           |
//! |----------------------------------|----------------------|
//! | no response (connect, timeout)   | `Transport`          |
//! | 400 with field errors, 422       | `Validation`         |
//! | 400 without field errors         | `PreconditionFailed` |
//! | 401, 403                         | `Unauthorized`       |
//! | 404                              | `NotFound`           |
//! | 409                              | `Conflict`           |
//! | 5xx and anything else            | `Server`             |
//! | undecodable body                 | `Transformation`     |

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

use core_kernel::{FieldError, PortError, ValidationErrors};

pub const UNREACHABLE_MESSAGE: &str =
    "Unable to reach the server. Check your connection and try again.";
pub const TIMEOUT_MESSAGE: &str = "The server did not respond in time. Please try again.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Error body returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    /// Absent or `null` unless the request failed field validation
    #[serde(default)]
    pub validation_errors: Option<Vec<FieldError>>,
}

impl ApiErrorBody {
    /// Parses a response body, falling back to the raw text as the message
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| {
            let trimmed = raw.trim();
            ApiErrorBody {
                message: (!trimmed.is_empty()).then(|| trimmed.to_string()),
                ..Default::default()
            }
        })
    }

    fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn field_list(&self) -> &[FieldError] {
        self.validation_errors.as_deref().unwrap_or_default()
    }

    fn field_errors(&self) -> ValidationErrors {
        self.field_list().to_vec().into()
    }
}

/// Errors that can occur during HTTP operations
#[derive(Debug, Error)]
pub enum HttpError {
    /// The client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// No response was received
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status
    #[error("HTTP {status}: {}", .body.message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        body: ApiErrorBody,
    },

    /// The response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl HttpError {
    /// Wraps a reqwest error raised before a response arrived
    pub fn transport(source: reqwest::Error) -> Self {
        let message = if source.is_timeout() {
            TIMEOUT_MESSAGE
        } else {
            UNREACHABLE_MESSAGE
        };
        HttpError::Transport {
            message: message.to_string(),
            source,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the credential was rejected
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Converts to a port error, naming the entity for 404 responses
    pub fn for_entity(self, entity_type: &str, id: impl fmt::Display) -> PortError {
        match self {
            HttpError::Status { status: 404, .. } => PortError::not_found(entity_type, id),
            other => other.into(),
        }
    }
}

impl From<HttpError> for PortError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::ClientBuild(message) => PortError::Transport {
                message,
                source: None,
            },
            HttpError::Transport { message, source } => PortError::Transport {
                message,
                source: Some(Box::new(source)),
            },
            HttpError::Decode(message) => PortError::Transformation { message },
            HttpError::Status { status, body } => from_status(status, body),
        }
    }
}

fn from_status(status: u16, body: ApiErrorBody) -> PortError {
    match status {
        400 if !body.field_list().is_empty() => PortError::Validation {
            message: body.message_or("Validation failed"),
            field_errors: body.field_errors(),
        },
        400 => PortError::precondition(body.message_or("The request was rejected")),
        422 => PortError::Validation {
            message: body.message_or("Validation failed"),
            field_errors: body.field_errors(),
        },
        401 | 403 => PortError::unauthorized(body.message_or(SESSION_EXPIRED_MESSAGE)),
        404 => PortError::NotFound {
            entity_type: "Resource".to_string(),
            id: body.path.clone().unwrap_or_default(),
        },
        409 => match body.field_list().first() {
            Some(first) => PortError::conflict(first.message.clone(), Some(first.field.clone())),
            None => PortError::conflict(body.message_or("Conflict"), None),
        },
        _ => PortError::Server {
            status,
            message: body.message_or("The server encountered an error"),
        },
    }
}
