// ⚠️ Error taxonomy for the presentation core
// Every variant is recoverable: the view shows a placeholder or keeps its state.

use thiserror::Error;

/// Inert text shown in place of a value that could not be derived
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// Locale code outside the supported set
    #[error("invalid locale: {0:?} (supported: en, ru)")]
    InvalidLocale(String),

    /// Account number shorter than the 4-character mask window
    #[error("invalid account number: {value:?} has {len} characters, need at least 4")]
    InvalidAccountNumber { value: String, len: usize },

    /// Amount that is NaN, infinite or too large to render faithfully
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Two cards share one visibility key
    #[error("duplicate account key: {0:?}")]
    DuplicateAccountKey(String),

    /// Visibility toggle for an account that was never registered
    #[error("unknown account key: {0:?}")]
    UnknownAccountKey(String),

    /// Props/config file could not be read or parsed
    #[error("config error in {path}: {message}")]
    Config { path: String, message: String },
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;

/// Map a failed derivation to the placeholder, logging the cause
pub fn or_placeholder(result: Result<String>) -> String {
    match result {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(error = %err, "display value replaced by placeholder");
            PLACEHOLDER.to_string()
        }
    }
}
