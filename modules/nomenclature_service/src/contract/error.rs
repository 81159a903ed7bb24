//! Contract error types for the nomenclature service
//!
//! These errors are transport-agnostic and shared by the service, the REST
//! layer and both API clients.

use super::model::EntityKind;

/// Nomenclature domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NomenclatureError {
    /// Missing or malformed required field; the message is shown verbatim
    #[error("{message}")]
    Validation { message: String },

    /// Update/delete target does not exist
    #[error("{collection} record not found: {id}")]
    NotFound { collection: &'static str, id: String },

    /// Network or serialization failure between client and server
    #[error("transport error: {message}")]
    Transport { message: String },

    /// Storage failure or corrupted document
    #[error("internal error")]
    Internal,
}

impl NomenclatureError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            collection: kind.collection(),
            id: id.to_string(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Message suitable for showing next to a form
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::NotFound { .. } => "The record no longer exists".to_string(),
            Self::Transport { .. } => "Request failed, please try again".to_string(),
            Self::Internal => "Unexpected server error".to_string(),
        }
    }
}
