// Settings flows and the capability seams they depend on
//
// Every collaborator of a settings flow is a constructor-injected trait so
// substitutable fakes are explicit rather than monkey-patched.

pub mod broker;
pub mod delete_account;

use async_trait::async_trait;

use crate::core::errors::AuthError;
use crate::core::models::Account;
use crate::state::notifier::NotifierEvent;

/// Auth-server operations the settings flows consume.
#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn delete_account(&self, email: &str, password: &str) -> Result<(), AuthError>;
}

/// Local account storage.
pub trait UserStore: Send + Sync {
    fn remove_account(&self, account: &Account);
}

/// Auth-provider-specific behavior after account actions.
pub trait Broker: Send + Sync {
    fn after_delete_account(&self, account: &Account);
}

/// Metrics recording for settings flows.
pub trait Metrics: Send + Sync {
    fn log_event(&self, name: &str);
    fn log_error(&self, err: &AuthError);
}

/// Cross-tab message bus propagating account-state changes to other open
/// sessions.
pub trait Notifier: Send + Sync {
    fn trigger(&self, event: NotifierEvent);
}

/// Host-side navigation.
pub trait Navigator: Send + Sync {
    fn navigate(&self, view: &str, success: bool);
}
