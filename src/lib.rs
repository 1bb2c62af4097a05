// Bank Dashboard - Presentation Core
// Formatters, balance visibility, locale selection and the view-state reducer.
// The terminal front end in main.rs/ui.rs only consumes what is exported here.

pub mod error;
pub mod locale;
pub mod visibility;
pub mod format;
pub mod i18n;
pub mod state;
pub mod dashboard;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{DashboardError, Result, or_placeholder, PLACEHOLDER};
pub use locale::{Locale, LocaleProps, LocaleSelector};
pub use visibility::{BalanceVisibility, VisibilityProps};
pub use format::{
    Currency, MonetaryAmount, FormatPolicy, FormatContext,
    format_currency, format_signed, format_balance, format_date,
    mask_account_number, get_initials,
    HIDDEN_BALANCE, ACCOUNT_MASK, INITIALS_FALLBACK, MAX_AMOUNT,
};
pub use i18n::{t, Label};
pub use state::{apply, Action, Tab, TabTransition, ViewState, TRANSITION_FRAMES};
pub use dashboard::{
    AccountCard, Transaction, ActionKind, IconId, QuickAction,
    Dashboard, DashboardProps, DashboardView, CardView, TransactionRow, ActionView,
};
pub use config::DashboardConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
