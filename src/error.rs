use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::engine::AvailabilityError;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Availability(#[from] AvailabilityError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "invalid_input", msg.clone()),
            AppError::Availability(err) => {
                let status = match err {
                    AvailabilityError::NotFound { .. } => StatusCode::NOT_FOUND,
                    AvailabilityError::RegionNotSupported { .. }
                    | AvailabilityError::BudgetTooLow { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                };
                (status, err.kind(), err.to_string())
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg.clone()),
        };

        let body = Json(json!({
            "error": message,
            "kind": kind,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_errors_map_to_client_statuses() {
        let not_found: AppError = AvailabilityError::NotFound {
            title: "tenet".to_string(),
        }
        .into();
        let response = not_found.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let region: AppError = AvailabilityError::RegionNotSupported {
            title: "Inception".to_string(),
            country: "FR".to_string(),
        }
        .into();
        let response = region.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
