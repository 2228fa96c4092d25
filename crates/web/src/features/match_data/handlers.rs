use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    dto::{common::ApiMessage, match_data::MatchSubmission},
    models::MatchRecord,
};

use crate::AppState;
use crate::error::{WebError, WebResult};
use crate::middleware::auth::AuthUser;

use super::services;

fn competition_id(path: Result<Path<i32>, PathRejection>) -> WebResult<i32> {
    path.map(|Path(id)| id)
        .map_err(|e| WebError::BadRequest(format!("Invalid competition id: {}", e.body_text())))
}

#[utoipa::path(
    get,
    path = "/api/data/{competition_id}",
    params(
        ("competition_id" = i32, Path, description = "Competition ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Match data of the competition in submission order, or a failure message", body = Vec<MatchRecord>),
        (status = 401, description = "Missing or invalid token", body = ApiMessage)
    ),
    tag = "match-data"
)]
pub async fn list_match_data(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
) -> WebResult<Response> {
    let competition_id = competition_id(path)?;

    let records =
        services::list_match_data(state.store.as_ref(), competition_id, &user.username).await?;

    Ok(Json(records).into_response())
}

#[utoipa::path(
    post,
    path = "/api/data/{competition_id}",
    params(
        ("competition_id" = i32, Path, description = "Competition ID")
    ),
    request_body = MatchSubmission,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Match data inserted or updated", body = ApiMessage),
        (status = 200, description = "Submission rejected; see message", body = ApiMessage),
        (status = 401, description = "Missing or invalid token", body = ApiMessage)
    ),
    tag = "match-data"
)]
pub async fn submit_match_data(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<MatchSubmission>, JsonRejection>,
) -> WebResult<Response> {
    let competition_id = competition_id(path)?;
    let Json(submission) = payload
        .map_err(|e| WebError::BadRequest(format!("Invalid match data: {}", e.body_text())))?;

    let outcome = services::submit_match_data(
        state.store.as_ref(),
        competition_id,
        &user.username,
        &submission,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ApiMessage::good(outcome.message()))).into_response())
}
