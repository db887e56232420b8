use axum::{routing::get, Router};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::cors::CorsLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::AgentsApiDoc;
use crate::state::{AgentsState, UsersState};

pub mod agents;
pub mod users;

/// Per-request span + request/response/failure events at INFO/ERROR.
fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
        .on_failure(DefaultOnFailure::new().level(Level::ERROR))
}

/// Agents service: CRUD surface plus interactive docs at `/docs`.
pub fn build_agents_router(state: AgentsState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/healthz", get(agents::healthz))
        .route("/agents", get(agents::list).post(agents::create))
        .route(
            "/agents/:id",
            get(agents::get).put(agents::update).delete(agents::delete),
        )
        .with_state(state);

    api.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", AgentsApiDoc::openapi()))
        .layer(cors)
        .layer(trace_layer())
}

/// Users service: the original exposes create and list only.
pub fn build_users_router(state: UsersState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/healthz", get(users::healthz))
        .route("/users", get(users::list).post(users::create))
        .with_state(state)
        .layer(cors)
        .layer(trace_layer())
}
