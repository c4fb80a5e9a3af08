// Axum web server layer

use axum::{error_handling::HandleErrorLayer, http::StatusCode, routing, BoxError, Router};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

pub mod handlers;
pub mod responses;

use crate::core::events::{FlowEvent, MetricsContext, RequestInfo};
use crate::settings::{AuthClient, Broker, Metrics};
use crate::state::notifier::ChannelNotifier;
use crate::state::user_store::InMemoryUserStore;
use crate::views::ViewRenderer;

/// Analytics forwarder: one call per emitted event, fire-and-forget.
/// Failures are the sink's responsibility; callers never retry.
pub trait AmplitudeForwarder: Send + Sync {
    fn process(&self, event: &FlowEvent, request: &RequestInfo, context: &MetricsContext);
}

/// Flow-event logger for the metrics pipeline. Same fire-and-forget
/// contract as the amplitude forwarder; the two sinks share no transaction.
pub trait FlowEventLogger: Send + Sync {
    fn log_flow_event(&self, event: &FlowEvent, context: &MetricsContext, request: &RequestInfo);
}

/// Configuration struct
// Re-export Config from config module
pub use crate::config::Config;

/// Application state containing all shared dependencies
///
/// All components are wrapped in Arc for shared ownership across async
/// tasks. Components must be Send + Sync for thread safety.
#[derive(Clone)]
pub struct AppState {
    pub amplitude: Arc<dyn AmplitudeForwarder>,
    pub flow_logger: Arc<dyn FlowEventLogger>,
    pub renderer: Arc<dyn ViewRenderer>,
    pub auth_client: Arc<dyn AuthClient>,
    pub user_store: Arc<InMemoryUserStore>,
    pub broker: Arc<dyn Broker>,
    pub metrics: Arc<dyn Metrics>,
    pub notifier: Arc<ChannelNotifier>,
    pub config: Arc<Config>,
}

/// Create the Axum router with all routes and middleware
///
/// Middleware stack (outermost to innermost):
/// - Request timeout (tower::timeout) with HandleErrorLayer conversion
/// - Body size limit (tower-http::limit)
pub fn create_router(app_state: &AppState) -> Router<AppState> {
    let router = Router::new()
        .route(
            handlers::UPDATE_FIREFOX_PATH,
            routing::get(handlers::update_firefox_handler),
        )
        .route(
            handlers::DELETE_ACCOUNT_PATH,
            routing::post(handlers::delete_account_handler),
        )
        .route("/health", routing::get(handlers::health_handler));

    let body_limit = app_state.config.body_size_limit_bytes;
    let timeout_secs = app_state.config.request_timeout_secs;

    let router = router.layer(RequestBodyLimitLayer::new(body_limit));

    // HandleErrorLayer must come BEFORE timeout to catch the timeout error
    let middleware_stack = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|e: BoxError| async move {
            let status = if e.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string())
        }))
        .timeout(Duration::from_secs(timeout_secs))
        .into_inner();

    router.layer(middleware_stack)
}
