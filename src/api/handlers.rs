// Request handlers for server routes

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Html,
    Json,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::api::responses::{ApiError, DeleteAccountResponse, HealthResponse};
use crate::api::AppState;
use crate::core::errors::ServerError;
use crate::core::events::{event_type, generate_device_id, FlowEvent, MetricsContext, RequestInfo};
use crate::core::flow;
use crate::settings::delete_account::{DeleteAccountController, SettingsContext};
use crate::settings::{Navigator, Notifier, UserStore};

pub const UPDATE_FIREFOX_METHOD: &str = "get";
pub const UPDATE_FIREFOX_PATH: &str = "/update_firefox";

pub const DELETE_ACCOUNT_METHOD: &str = "post";
pub const DELETE_ACCOUNT_PATH: &str = "/settings/delete_account";

const UPDATE_FIREFOX_VIEW: &str = "update_firefox";

/// GET /update_firefox
///
/// Renders the update-firefox page unconditionally. As a side effect, the
/// flow begin and screen-view events are forwarded to the amplitude
/// forwarder and the flow-event logger: exactly two calls to each sink, in
/// [begin, view] order, every event stamped with the same flow begin time.
/// Sink outcomes are independent; neither can veto the render.
pub async fn update_firefox_handler(
    State(app_state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let flow_data = flow::create(&app_state.config.flow_id_key, user_agent)?;

    let request = RequestInfo {
        method: UPDATE_FIREFOX_METHOD.to_string(),
        path: UPDATE_FIREFOX_PATH.to_string(),
        user_agent: if user_agent.is_empty() {
            None
        } else {
            Some(user_agent.to_string())
        },
        remote_addr: None,
    };

    let context = MetricsContext::new(flow_data.flow_id.clone(), generate_device_id(), query);

    info!(
        flow_id = %context.flow_id,
        device_id = %context.device_id,
        "Flow started"
    );

    let begin = FlowEvent::at_flow_begin(event_type::FLOW_BEGIN, flow_data.flow_begin_time);
    app_state.amplitude.process(&begin, &request, &context);
    app_state.flow_logger.log_flow_event(&begin, &context, &request);

    let screen = FlowEvent::at_flow_begin(
        event_type::SCREEN_UPDATE_FIREFOX,
        flow_data.flow_begin_time,
    );
    app_state.amplitude.process(&screen, &request, &context);

    let view = FlowEvent::at_flow_begin(
        event_type::FLOW_UPDATE_FIREFOX_VIEW,
        flow_data.flow_begin_time,
    );
    app_state.flow_logger.log_flow_event(&view, &context, &request);

    let html = app_state.renderer.render(UPDATE_FIREFOX_VIEW)?;
    Ok(Html(html))
}

#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    pub uid: String,
    pub email: String,
    pub password: String,
}

/// Navigator that records the redirect the settings flow asks for, so the
/// handler can hand it back to the browser.
#[derive(Default)]
struct RedirectCapture {
    target: Mutex<Option<(String, bool)>>,
}

impl RedirectCapture {
    fn take(&self) -> Option<(String, bool)> {
        self.target.lock().unwrap_or_else(|e| e.into_inner()).take()
    }
}

impl Navigator for RedirectCapture {
    fn navigate(&self, view: &str, success: bool) {
        let mut target = self.target.lock().unwrap_or_else(|e| e.into_inner());
        *target = Some((view.to_string(), success));
    }
}

/// POST /settings/delete_account
///
/// Drives the delete-account settings flow for the signed-in account.
/// A locked account resolves with the inline error text; validation
/// failures are 400s; any other auth failure maps through the errno
/// taxonomy.
pub async fn delete_account_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<DeleteAccountRequest>,
) -> Result<Json<DeleteAccountResponse>, ApiError> {
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let account = app_state.user_store.signed_in_account(&body.uid).ok_or_else(|| {
        warn!(request_id = %request_id, "Delete requested for unknown account");
        ApiError::from_server_error_with_id(
            ServerError::ValidationError("no signed-in account".to_string()),
            request_id.clone(),
        )
    })?;

    let navigator = Arc::new(RedirectCapture::default());

    let user_store: Arc<dyn UserStore> = app_state.user_store.clone();
    let notifier: Arc<dyn Notifier> = app_state.notifier.clone();

    let ctx = SettingsContext {
        auth: app_state.auth_client.clone(),
        user_store,
        broker: app_state.broker.clone(),
        metrics: app_state.metrics.clone(),
        notifier,
        navigator: navigator.clone(),
    };

    let mut controller =
        DeleteAccountController::new(ctx, account, app_state.config.min_password_length);
    controller.set_email(&body.email);
    controller.set_password(&body.password);

    match controller.validate_and_submit().await {
        Ok(Some(validation)) => Err(ApiError::new(StatusCode::BAD_REQUEST, validation.message)),
        Ok(None) => {
            if controller.is_error_visible() {
                // Absorbed failure: account locked, user retries from here
                return Ok(Json(DeleteAccountResponse {
                    success: false,
                    redirect: None,
                    error: controller.error_text().map(|text| text.to_string()),
                }));
            }

            let redirect = navigator.take().map(|(view, _)| view);
            Ok(Json(DeleteAccountResponse {
                success: true,
                redirect,
                error: None,
            }))
        }
        Err(err) => Err(ApiError::from_auth_error_with_id(err, request_id)),
    }
}

/// Health check handler
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
