//! HTTP route handlers
//!
//! - agent_routes: the startup pipeline endpoint

pub mod agent_routes;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::pipeline::{PartialFailure, PartialOutput};

/// Message returned for any body without a usable `goal`
pub const INVALID_GOAL_ERROR: &str = "Missing or invalid 'goal' in body";

/// Error body: the message plus whatever partial fields exist
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(flatten)]
    pub partial: PartialOutput,
}

/// Error type for route handlers
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    partial: PartialOutput,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            partial: PartialOutput::default(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            partial: PartialOutput::default(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<PartialFailure> for ApiError {
    fn from(failure: PartialFailure) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: failure.error,
            partial: failure.partial,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            partial: self.partial,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Step;

    #[test]
    fn test_error_body_flattens_partial_fields() {
        let body = ErrorBody {
            error: "boom".to_string(),
            partial: PartialOutput {
                analysis: Some("gaps".to_string()),
                brand_name: Some("Leashly".to_string()),
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "boom", "analysis": "gaps", "brandName": "Leashly"})
        );
    }

    #[test]
    fn test_partial_failure_maps_to_500() {
        let failure =
            PartialFailure::new(Step::SearchB, "503 upstream down", PartialOutput::default());
        let err = ApiError::from(failure);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_bad_request_status() {
        assert_eq!(ApiError::bad_request(INVALID_GOAL_ERROR).status(), StatusCode::BAD_REQUEST);
    }
}
