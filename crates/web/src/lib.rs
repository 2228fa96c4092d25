use axum::Router;
use std::{path::Path, sync::Arc, time::Duration};
use storage::MatchDataStore;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod features;
pub mod middleware;


use features::match_data;
use middleware::auth::TokenVerifier;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MatchDataStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn MatchDataStore>) -> Self {
        Self { store }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        features::match_data::handlers::list_match_data,
        features::match_data::handlers::submit_match_data,
    ),
    components(
        schemas(
            storage::models::MatchRecord,
            storage::dto::match_data::MatchSubmission,
            storage::dto::common::ApiMessage,
            storage::dto::common::MessageType,
        )
    ),
    tags(
        (name = "match-data", description = "Scouted match data of a competition"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

/// Assemble the HTTP application.
///
/// When `static_dir` is given, unmatched paths are served from it and fall
/// back to its `index.html` so client-side routes resolve.
pub fn build_router(state: AppState, verifier: TokenVerifier, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let api = Router::new().nest("/data", match_data::routes::routes(verifier));

    let mut router = Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(dir) = static_dir {
        let index = ServeFile::new(dir.join("index.html"));
        router = router.fallback_service(ServeDir::new(dir).fallback(index));
    }

    router.layer(cors).with_state(state)
}
