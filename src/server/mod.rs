//! REST API for card identification.
//!
//! Routes:
//! - `POST /api/card/identify` - Identify one card number
//! - `POST /api/card/identify/batch` - Identify several card numbers
//! - `GET  /api/card/health` - Health check
//! - `/swagger-ui` - Interactive API documentation
//!
//! Every `/api` route is rate limited per client IP. All responses carry
//! the security headers in [`SECURITY_HEADERS`], permissive CORS and a
//! request trace span. A panicking handler yields a 500 [`ErrorResponse`]
//! instead of dropping the connection.

pub mod api;
pub mod config;
pub mod rate_limit;

use std::any::Any;
use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use api::{ApiDoc, ErrorResponse};
pub use config::{ConfigError, ServerConfig};
pub use rate_limit::FixedWindowLimiter;

/// Headers set on every response.
pub const SECURITY_HEADERS: [(HeaderName, &str); 5] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::X_XSS_PROTECTION, "1; mode=block"),
    (header::REFERRER_POLICY, "no-referrer"),
    (
        header::CONTENT_SECURITY_POLICY,
        "default-src 'self'; style-src 'self' 'unsafe-inline'; script-src 'self' 'unsafe-inline'",
    ),
];

/// Shared state for the request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    limiter: Arc<FixedWindowLimiter>,
    max_batch_size: usize,
}

impl AppState {
    /// Builds the state described by `config`.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            limiter: Arc::new(FixedWindowLimiter::new(
                config.rate_limit,
                config.rate_window,
            )),
            max_batch_size: config.max_batch_size,
        }
    }
}

/// Builds the complete application router.
///
/// Serve it with `into_make_service_with_connect_info::<SocketAddr>()` so
/// the rate limiter can tell clients apart.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/card/identify", post(api::identify_card))
        .route("/api/card/identify/batch", post(api::identify_batch))
        .route("/api/card/health", get(api::health))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::enforce,
        ))
        .with_state(state);

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api);

    with_middleware(app)
}

/// Wraps `app` in the response-level layers shared by every route.
fn with_middleware(app: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(AnyOrigin);

    let mut app = app.layer(CatchPanicLayer::custom(handle_panic));
    for (name, value) in SECURITY_HEADERS {
        app = app.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ));
    }

    app.layer(cors).layer(TraceLayer::new_for_http())
}

fn handle_panic(_payload: Box<dyn Any + Send + 'static>) -> Response {
    // The panic payload is not logged; it may hold request data
    tracing::error!("request handler panicked");
    ErrorResponse::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "an internal error occurred while processing the request",
    )
    .into_response()
}
