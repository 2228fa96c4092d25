use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::fmt;
use storage::dto::common::ApiMessage;
use storage::services::synchronizer::SyncError;
use validator::ValidationErrors;

use crate::middleware::auth::AuthError;

/// Web layer errors
///
/// Everything that reaches a match-data handler is answered with HTTP 200 and
/// a `{message, type: "bad", err}` body; scouting tablets read the outcome from
/// the body, not the status line. Only authentication failures, which are
/// rejected before any handler runs, use a 401.
#[derive(Debug)]
pub enum WebError {
    Sync(SyncError),
    BadRequest(String),
    Unauthorized(AuthError),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(e) => write!(f, "Synchronization error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized(e) => write!(f, "Unauthorized: {}", e),
        }
    }
}

fn field_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut details: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                format!(
                    "{}: {}",
                    field,
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                )
            })
        })
        .collect();
    details.sort();
    details
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status_code, body) = match &self {
            Self::Sync(SyncError::Unauthorized) => (
                StatusCode::OK,
                ApiMessage::bad("Invalid competition for this user", "unauthorized"),
            ),
            Self::Sync(SyncError::StorageFailure { stage, .. }) => (
                StatusCode::OK,
                ApiMessage::bad(stage.message(), "storage_failure"),
            ),
            Self::Sync(SyncError::Conflict { .. }) => (
                StatusCode::OK,
                ApiMessage::bad(
                    "Match data for this team and match was submitted concurrently",
                    "conflict",
                ),
            ),
            Self::Sync(SyncError::ValidationFailure(errors)) => (
                StatusCode::OK,
                ApiMessage::bad(
                    "Invalid match data",
                    Value::from(field_errors(errors)),
                ),
            ),
            Self::BadRequest(msg) => (StatusCode::OK, ApiMessage::bad(msg.clone(), "bad_request")),
            Self::Unauthorized(_) => (
                StatusCode::UNAUTHORIZED,
                ApiMessage::bad("Unauthorized", "unauthorized"),
            ),
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<SyncError> for WebError {
    fn from(error: SyncError) -> Self {
        Self::Sync(error)
    }
}

impl From<AuthError> for WebError {
    fn from(error: AuthError) -> Self {
        Self::Unauthorized(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::json;
    use storage::dto::match_data::MatchSubmission;
    use storage::error::StorageError;
    use storage::services::synchronizer::SyncStage;
    use validator::Validate;

    async fn render(error: WebError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_unauthorized_competition_is_reported_in_body() {
        let (status, body) = render(SyncError::Unauthorized.into()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "message": "Invalid competition for this user",
                "type": "bad",
                "err": "unauthorized"
            })
        );
    }

    #[tokio::test]
    async fn test_storage_failure_shows_stage_label_only() {
        let error = SyncError::StorageFailure {
            stage: SyncStage::Update,
            source: StorageError::NotFound,
        };
        let (status, body) = render(error.into()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Failed to attempt updating existing match data");
        assert_eq!(body["err"], "storage_failure");
        assert!(!body.to_string().contains("Not found"));
    }

    #[tokio::test]
    async fn test_validation_lists_fields() {
        let errors = MatchSubmission::new(0, "12", "R1").validate().unwrap_err();
        let (status, body) = render(SyncError::ValidationFailure(errors).into()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Invalid match data");
        assert_eq!(body["err"][0], "team_number: Team number must be positive");
    }

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let (status, body) = render(AuthError::MissingToken.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["type"], "bad");
    }
}
