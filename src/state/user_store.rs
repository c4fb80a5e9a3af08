// In-memory signed-in account registry

use std::collections::HashMap;
use std::sync::Mutex;

use crate::core::models::Account;
use crate::settings::UserStore;

/// Signed-in accounts keyed by uid. Single-owner, mutated only from the
/// request path; a poisoned lock recovers with the inner state.
pub struct InMemoryUserStore {
    accounts: Mutex<HashMap<String, Account>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
        }
    }

    pub fn init_account(&self, account: Account) {
        let mut accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        accounts.insert(account.uid.clone(), account);
    }

    pub fn signed_in_account(&self, uid: &str) -> Option<Account> {
        let accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        accounts.get(uid).cloned()
    }

    pub fn is_empty(&self) -> bool {
        let accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        accounts.is_empty()
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for InMemoryUserStore {
    fn remove_account(&self, account: &Account) {
        let mut accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
        accounts.remove(&account.uid);
    }
}
