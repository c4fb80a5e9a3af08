// Account state shared between the settings flows and their collaborators

use serde::{Deserialize, Serialize};

/// A signed-in account as known to the settings views.
///
/// `password` is transient: it is only populated while a locked-out retry is
/// possible, and it is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub uid: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    pub verified: bool,
    #[serde(skip)]
    pub password: Option<String>,
}

impl Account {
    pub fn new(uid: &str, email: &str) -> Self {
        Self {
            uid: uid.to_string(),
            email: email.to_string(),
            session_token: None,
            verified: false,
            password: None,
        }
    }

    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    pub fn set_password(&mut self, password: &str) {
        self.password = Some(password.to_string());
    }

    pub fn clear_password(&mut self) {
        self.password = None;
    }
}
