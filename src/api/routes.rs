//! API route definitions

use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::envelope::EnvelopeDoc;
use super::handlers::{self, CreateShowRequest, HealthResponse, UpdateShowRequest};
use crate::store::ShowStore;
use crate::types::Show;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Showtrack API",
        version = "0.1.0",
        description = "Track the shows you are watching. Every response is wrapped in a {code, success, message, result} envelope."
    ),
    tags(
        (name = "shows", description = "Show management"),
        (name = "misc", description = "Greeting, mirror and health checks")
    ),
    paths(
        handlers::hello_world,
        handlers::mirror,
        handlers::health,
        handlers::list_shows,
        handlers::get_show,
        handlers::create_show,
        handlers::update_show,
        handlers::delete_show,
    ),
    components(schemas(
        Show,
        EnvelopeDoc,
        HealthResponse,
        CreateShowRequest,
        UpdateShowRequest,
    ))
)]
pub struct ApiDoc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub shows: Arc<ShowStore>,
}

impl AppState {
    pub fn new(shows: ShowStore) -> Self {
        Self {
            shows: Arc::new(shows),
        }
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let openapi = ApiDoc::openapi();

    Router::new()
        .route("/", get(handlers::hello_world))
        .route("/mirror/{name}", get(handlers::mirror))

        // Shows CRUD
        .route("/shows", get(handlers::list_shows).post(handlers::create_show))
        .route(
            "/shows/{id}",
            get(handlers::get_show)
                .put(handlers::update_show)
                .delete(handlers::delete_show),
        )

        // Health
        .route("/health", get(handlers::health))

        // OpenAPI spec and Swagger UI
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", openapi))

        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
