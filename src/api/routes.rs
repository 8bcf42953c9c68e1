//! HTTP route configuration.

use axum::Router;
use axum::routing::get;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{self, DiscoveryDocument, DiscoveryEndpoints, HealthResponse};
use super::sse;
use super::state::AppState;
use crate::mcp::create_mcp_service;
use crate::trello::CardRepository;

/// Build routes with generic repository type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the CardRepository trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($R:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$R>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trello MCP Connector",
        description = "MCP connector exposing Trello boards, lists and cards",
        license(name = "GPL-2.0")
    ),
    paths(handlers::system::health, handlers::system::discovery),
    components(schemas(HealthResponse, DiscoveryDocument, DiscoveryEndpoints)),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "mcp", description = "MCP discovery")
    )
)]
pub struct ApiDoc;

/// Create the router with OpenAPI documentation
pub fn create_router<R: CardRepository + 'static>(state: AppState<R>) -> Router {
    let api = ApiDoc::openapi();

    // System routes (non-generic)
    let system_routes = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/.well-known/mcp", get(handlers::discovery));

    // Handshake stream (generic over CardRepository)
    let sse_routes = routes!(R => {
        get "/sse" => sse::sse_handler,
    });

    // MCP Streamable HTTP transport; sessions end with the server
    let mcp_service = create_mcp_service(state.mcp().clone(), state.shutdown().clone());

    system_routes
        .merge(sse_routes)
        .nest_service(handlers::MCP_PATH, mcp_service)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
