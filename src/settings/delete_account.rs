//! Account deletion settings flow.
//!
//! Orchestrates the external delete-account operation: validates the
//! password form, calls the auth server, and on success removes local
//! account state, runs the broker's post-delete hook, records a metrics
//! event, notifies other open sessions and redirects to signup. A
//! locked-out failure is absorbed into inline UI state so the user can
//! retry; any other failure propagates to the host's error handling.

use std::sync::Arc;
use tracing::{info, warn};

use super::{AuthClient, Broker, Metrics, Navigator, Notifier, UserStore};
use crate::core::errors::AuthError;
use crate::core::events::event_type;
use crate::core::models::Account;
use crate::state::notifier::NotifierEvent;

/// View navigated to after a successful deletion.
pub const SIGNUP_VIEW: &str = "signup";

/// Field identifier carried by password validation errors.
pub const PASSWORD_FIELD: &str = "password";

/// Lifecycle of one controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Validating,
    Submitting,
    Success,
    Error,
}

/// A failed form-field check, surfaced to the host as a typed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

/// Capabilities injected into settings controllers.
#[derive(Clone)]
pub struct SettingsContext {
    pub auth: Arc<dyn AuthClient>,
    pub user_store: Arc<dyn UserStore>,
    pub broker: Arc<dyn Broker>,
    pub metrics: Arc<dyn Metrics>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

pub struct DeleteAccountController {
    ctx: SettingsContext,
    account: Account,
    email: String,
    password: String,
    state: ControllerState,
    inline_error: Option<String>,
    min_password_length: usize,
}

impl DeleteAccountController {
    pub fn new(ctx: SettingsContext, account: Account, min_password_length: usize) -> Self {
        let email = account.email.clone();
        Self {
            ctx,
            account,
            email,
            password: String::new(),
            state: ControllerState::Idle,
            inline_error: None,
            min_password_length,
        }
    }

    pub fn set_email(&mut self, email: &str) {
        self.email = email.to_string();
    }

    pub fn set_password(&mut self, password: &str) {
        self.password = password.to_string();
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn is_error_visible(&self) -> bool {
        self.inline_error.is_some()
    }

    pub fn error_text(&self) -> Option<&str> {
        self.inline_error.as_deref()
    }

    /// True iff the password field meets the minimum length. Pure predicate,
    /// no side effects.
    pub fn is_valid(&self) -> bool {
        self.password.chars().count() >= self.min_password_length
    }

    /// Typed validation_error notification for an invalid form. Never
    /// submits.
    pub fn show_validation_errors(&self) -> Option<ValidationError> {
        if self.is_valid() {
            return None;
        }

        Some(ValidationError {
            field: PASSWORD_FIELD,
            message: format!("Must be at least {} characters", self.min_password_length),
        })
    }

    /// Host entry point: validate first, submit only if the form passes.
    pub async fn validate_and_submit(&mut self) -> Result<Option<ValidationError>, AuthError> {
        self.state = ControllerState::Validating;

        if let Some(validation) = self.show_validation_errors() {
            self.state = ControllerState::Idle;
            return Ok(Some(validation));
        }

        self.submit().await.map(|_| None)
    }

    /// Contract: email non-empty and password valid; hosts gate on
    /// `is_valid` (or call `validate_and_submit`). Two calls dispatch two
    /// independent delete operations; preventing that is the host's job.
    pub async fn submit(&mut self) -> Result<(), AuthError> {
        self.state = ControllerState::Submitting;

        match self.ctx.auth.delete_account(&self.email, &self.password).await {
            Ok(()) => {
                info!(uid = %self.account.uid, "Account deleted");

                self.ctx.user_store.remove_account(&self.account);
                self.ctx.broker.after_delete_account(&self.account);
                self.ctx.metrics.log_event(event_type::DELETE_ACCOUNT_DELETED);
                self.ctx.notifier.trigger(NotifierEvent::Delete {
                    uid: self.account.uid.clone(),
                });

                self.inline_error = None;
                self.state = ControllerState::Success;
                self.ctx.navigator.navigate(SIGNUP_VIEW, true);
                Ok(())
            }
            Err(err) if err.is_account_locked() => {
                warn!(uid = %self.account.uid, errno = err.errno(), "Delete blocked, account locked");

                // Keep the password so the user can retry once unlocked.
                self.account.set_password(&self.password);
                self.inline_error = Some(err.message().to_string());
                self.ctx.metrics.log_error(&err);
                self.state = ControllerState::Error;
                Ok(())
            }
            Err(err) => {
                self.state = ControllerState::Error;
                Err(err)
            }
        }
    }
}
