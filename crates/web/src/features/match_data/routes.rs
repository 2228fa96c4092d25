use axum::{Router, middleware, routing::get};

use super::handlers::{list_match_data, submit_match_data};
use crate::AppState;
use crate::middleware::auth::{TokenVerifier, require_auth};

pub fn routes(verifier: TokenVerifier) -> Router<AppState> {
    Router::new()
        .route(
            "/:competition_id",
            get(list_match_data).post(submit_match_data),
        )
        .route_layer(middleware::from_fn_with_state(verifier, require_auth))
}
