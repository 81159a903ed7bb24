//! HTTP error mapping to RFC-9457 Problem Details
//!
//! Every problem body also carries a top-level `message`, which is what the
//! web client displays.

use crate::contract::NomenclatureError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize, ToSchema)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// Message shown to the user
    pub message: String,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// A URI reference that identifies the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            message: message.into(),
            detail: None,
            instance: None,
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add instance URI
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: NomenclatureError) -> Problem {
    match error {
        NomenclatureError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error", message)
        }

        NomenclatureError::NotFound { collection, id } => Problem::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            "Record not found",
        )
        .with_detail(format!("{collection} record '{id}' was not found"))
        .with_instance(format!("/{collection}/{id}")),

        NomenclatureError::Transport { message } => {
            Problem::new(StatusCode::BAD_GATEWAY, "Bad Gateway", "Upstream request failed")
                .with_detail(message)
        }

        NomenclatureError::Internal => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "Server error",
        )
        .with_detail("An unexpected error occurred"),
    }
}

/// Map a rejected JSON body (syntax, content type, shape) to a 400 problem
pub fn map_json_rejection(rejection: JsonRejection) -> Problem {
    tracing::debug!(error = %rejection.body_text(), "rejected request body");
    Problem::new(StatusCode::BAD_REQUEST, "Malformed Request", "Invalid request body")
        .with_detail(rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::EntityKind;

    #[test]
    fn validation_maps_to_400_with_verbatim_message() {
        let problem = map_domain_error(NomenclatureError::validation("NameBG is required"));
        assert_eq!(problem.status, 400);
        assert_eq!(problem.message, "NameBG is required");
    }

    #[test]
    fn not_found_maps_to_404() {
        let problem = map_domain_error(NomenclatureError::not_found(EntityKind::Standard, "abc"));
        assert_eq!(problem.status, 404);
        assert_eq!(problem.instance.as_deref(), Some("/standards/abc"));
    }

    #[test]
    fn internal_hides_details() {
        let problem = map_domain_error(NomenclatureError::Internal);
        assert_eq!(problem.status, 500);
        assert_eq!(problem.message, "Server error");

        let body = serde_json::to_value(&problem).unwrap();
        assert_eq!(body["type"], "https://httpstatuses.io/500");
        assert_eq!(body["message"], "Server error");
    }
}
