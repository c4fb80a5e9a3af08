// Domain error types - auth-server taxonomy plus service-level errors

use thiserror::Error;

/// Error classes returned by the auth server.
///
/// Only `AccountLocked` is recoverable at the settings layer: it is absorbed
/// into inline UI state so the user can retry. Everything else propagates to
/// the host's error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// Wrong password for the account (errno 103)
    IncorrectPassword,
    /// Account locked pending email verification (errno 121)
    AccountLocked,
    /// Auth server unreachable or overloaded (errno 998)
    ServiceUnavailable,
    /// Anything the taxonomy does not recognize (errno 999)
    Unexpected,
}

/// An error from an auth-server operation, carrying its errno classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    kind: AuthErrorKind,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (errno {})", self.message(), self.errno())
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    pub fn new(kind: AuthErrorKind) -> Self {
        Self { kind }
    }

    pub fn account_locked() -> Self {
        Self::new(AuthErrorKind::AccountLocked)
    }

    pub fn unexpected() -> Self {
        Self::new(AuthErrorKind::Unexpected)
    }

    pub fn kind(&self) -> AuthErrorKind {
        self.kind
    }

    /// Wire-level error number, matching the auth server's contract.
    pub fn errno(&self) -> u32 {
        match self.kind {
            AuthErrorKind::IncorrectPassword => 103,
            AuthErrorKind::AccountLocked => 121,
            AuthErrorKind::ServiceUnavailable => 998,
            AuthErrorKind::Unexpected => 999,
        }
    }

    /// Classify an errno from an auth-server response. Unknown numbers fold
    /// into `Unexpected`.
    pub fn from_errno(errno: u32) -> Self {
        let kind = match errno {
            103 => AuthErrorKind::IncorrectPassword,
            121 => AuthErrorKind::AccountLocked,
            998 => AuthErrorKind::ServiceUnavailable,
            _ => AuthErrorKind::Unexpected,
        };
        Self::new(kind)
    }

    pub fn is_account_locked(&self) -> bool {
        self.kind == AuthErrorKind::AccountLocked
    }

    /// Localized message shown inline to the user.
    pub fn message(&self) -> &'static str {
        match self.kind {
            AuthErrorKind::IncorrectPassword => "Incorrect password",
            AuthErrorKind::AccountLocked => {
                "Your account has been locked for security reasons"
            }
            AuthErrorKind::ServiceUnavailable => "System unavailable, try again soon",
            AuthErrorKind::Unexpected => "Unexpected error",
        }
    }
}

/// Main error type for the content server
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration error (HTTP 500)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// View rendering error (HTTP 500)
    #[error("Render error: {0}")]
    RenderError(String),

    /// Request validation error (HTTP 400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// State management error (HTTP 500)
    #[error("State error: {0}")]
    StateError(String),

    /// Flow id derivation error (HTTP 500)
    #[error("Crypto error: {0}")]
    CryptoError(String),

    /// Auth server error, mapped through the errno taxonomy
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// I/O Error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ServerError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::ConfigurationError(_) => 500,
            ServerError::RenderError(_) => 500,
            ServerError::ValidationError(_) => 400,
            ServerError::StateError(_) => 500,
            ServerError::CryptoError(_) => 500,
            ServerError::Auth(err) => match err.kind() {
                AuthErrorKind::IncorrectPassword => 400,
                AuthErrorKind::AccountLocked => 400,
                AuthErrorKind::ServiceUnavailable => 503,
                AuthErrorKind::Unexpected => 500,
            },
            ServerError::IoError(_) => 500,
        }
    }

    /// Get user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ServerError::ConfigurationError(_) => "Internal error".to_string(),
            ServerError::RenderError(_) => "Internal error".to_string(),
            ServerError::ValidationError(reason) => format!("Validation failed: {}", reason),
            ServerError::StateError(_) => "Internal error".to_string(),
            ServerError::CryptoError(_) => "Internal error".to_string(),
            ServerError::Auth(err) => err.message().to_string(),
            ServerError::IoError(_) => "Internal system error".to_string(),
        }
    }
}
