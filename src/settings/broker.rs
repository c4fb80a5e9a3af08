// Default auth broker

use tracing::info;

use super::Broker;
use crate::core::models::Account;

/// Base broker: no provider-specific post-delete behavior beyond logging.
pub struct BaseBroker;

impl BaseBroker {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BaseBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl Broker for BaseBroker {
    fn after_delete_account(&self, account: &Account) {
        info!(uid = %account.uid, "afterDeleteAccount: no broker follow-up");
    }
}
