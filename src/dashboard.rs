// 🏦 Dashboard model and derived view
// Static account cards, transactions and quick actions, plus DashboardView:
// the plain-string rendering of the model under a given ViewState.

use crate::error::{or_placeholder, DashboardError, Result, PLACEHOLDER};
use crate::format::{
    format_balance, format_currency, format_date, format_signed, get_initials,
    mask_account_number, FormatContext, FormatPolicy, MonetaryAmount, HIDDEN_BALANCE,
};
use crate::i18n::{t, Label};
use crate::locale::{LocaleProps, LocaleSelector};
use crate::state::{Tab, ViewState};
use crate::visibility::{BalanceVisibility, VisibilityProps};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// MODEL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCard {
    /// Visibility key ("savings", "current", ...)
    pub account_key: String,
    #[serde(default)]
    pub initial_visible: Option<bool>,
    /// Fixed title; when absent the title comes from the label table
    #[serde(default)]
    pub title: Option<String>,
    pub holder: String,
    pub account_number: String,
    pub balance: MonetaryAmount,
}

impl AccountCard {
    pub fn title_label(&self) -> Option<Label> {
        match self.account_key.as_str() {
            "savings" => Some(Label::AccountSavings),
            "current" => Some(Label::AccountCurrent),
            "investment" => Some(Label::AccountInvestment),
            _ => None,
        }
    }

    fn visibility_props(&self) -> VisibilityProps {
        VisibilityProps {
            account_key: self.account_key.clone(),
            initial_visible: self.initial_visible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub date: NaiveDate,
    pub merchant: String,
    pub category: String,
    pub amount: MonetaryAmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Transfer,
    Pay,
    TopUp,
    Statement,
    Exchange,
    Cards,
}

/// Opaque icon identifier; glyphs are looked up by the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconId {
    ArrowRight,
    Receipt,
    Plus,
    Document,
    Swap,
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub kind: ActionKind,
    pub label: Label,
    pub icon: IconId,
}

impl QuickAction {
    pub fn of(kind: ActionKind) -> Self {
        let (label, icon) = match kind {
            ActionKind::Transfer => (Label::ActionTransfer, IconId::ArrowRight),
            ActionKind::Pay => (Label::ActionPay, IconId::Receipt),
            ActionKind::TopUp => (Label::ActionTopUp, IconId::Plus),
            ActionKind::Statement => (Label::ActionStatement, IconId::Document),
            ActionKind::Exchange => (Label::ActionExchange, IconId::Swap),
            ActionKind::Cards => (Label::ActionCards, IconId::Card),
        };
        QuickAction { kind, label, icon }
    }
}

/// Props accepted by `Dashboard::from_props`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardProps {
    pub accounts: Vec<AccountCard>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub actions: Vec<ActionKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub accounts: Vec<AccountCard>,
    pub transactions: Vec<Transaction>,
    pub actions: Vec<QuickAction>,
}

impl Dashboard {
    pub fn from_props(props: DashboardProps) -> Self {
        let actions = if props.actions.is_empty() {
            default_actions()
        } else {
            props.actions.into_iter().map(QuickAction::of).collect()
        };

        Dashboard {
            accounts: props.accounts,
            transactions: props.transactions,
            actions,
        }
    }

    /// Hardcoded demo data
    pub fn demo() -> Self {
        let card = |key: &str, number: &str, balance: f64| AccountCard {
            account_key: key.to_string(),
            initial_visible: None,
            title: None,
            holder: "Mary Jane Watson".to_string(),
            account_number: number.to_string(),
            balance: MonetaryAmount::rub(balance),
        };

        let tx = |(y, m, d): (i32, u32, u32), merchant: &str, category: &str, amount: f64| Transaction {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            merchant: merchant.to_string(),
            category: category.to_string(),
            amount: MonetaryAmount::rub(amount),
        };

        Dashboard {
            accounts: vec![
                card("savings", "40817810099994521", 1250340.75),
                card("current", "40817810500001234", 84210.5),
                card("investment", "40701810900007788", 532000.0),
            ],
            transactions: vec![
                tx((2026, 10, 15), "Perekrestok", "Groceries", -3120.4),
                tx((2026, 10, 14), "Salary", "Income", 185000.0),
                tx((2026, 10, 13), "Yandex Taxi", "Transport", -640.0),
                tx((2026, 10, 12), "Mosenergosbyt", "Utilities", -4870.25),
                tx((2026, 10, 10), "Coffee Like", "Cafes", -289.0),
                tx((2026, 10, 9), "Transfer from Anna P.", "Transfers", 15000.0),
                tx((2026, 10, 7), "Ozon", "Shopping", -12499.99),
                tx((2026, 10, 3), "MTS", "Mobile", -650.0),
            ],
            actions: default_actions(),
        }
    }

    /// Initial view state at mount: one visibility entry per card.
    ///
    /// Card keys must be unique; each card owns its own flag.
    pub fn mount(&self, locale: &LocaleProps, default_visible: bool) -> Result<ViewState> {
        let mut seen = HashSet::new();
        for card in &self.accounts {
            if !seen.insert(card.account_key.as_str()) {
                return Err(DashboardError::DuplicateAccountKey(card.account_key.clone()));
            }
        }

        let props: Vec<VisibilityProps> = self.accounts.iter().map(AccountCard::visibility_props).collect();
        let visibility = BalanceVisibility::from_props(&props, default_visible);
        let selector = LocaleSelector::new(locale)?;

        tracing::info!(
            accounts = visibility.len(),
            locale = %selector.get_locale(),
            "dashboard mounted"
        );

        Ok(ViewState::new(visibility, selector))
    }

    pub fn total_balance(&self) -> Option<MonetaryAmount> {
        let first = self.accounts.first()?;
        if self.accounts.iter().any(|a| a.balance.currency != first.balance.currency) {
            return None;
        }
        Some(MonetaryAmount::new(
            self.accounts.iter().map(|a| a.balance.value).sum(),
            first.balance.currency,
        ))
    }
}

fn default_actions() -> Vec<QuickAction> {
    [
        ActionKind::Transfer,
        ActionKind::Pay,
        ActionKind::TopUp,
        ActionKind::Statement,
        ActionKind::Exchange,
        ActionKind::Cards,
    ]
    .into_iter()
    .map(QuickAction::of)
    .collect()
}

// ============================================================================
// DERIVED VIEW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub key: String,
    pub title: String,
    pub initials: String,
    pub balance: String,
    pub currency: String,
    pub visible: bool,
    pub account_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub merchant: String,
    pub category: String,
    pub amount: String,
    pub incoming: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionView {
    pub kind: ActionKind,
    pub icon: IconId,
    pub label: String,
}

/// Plain-string rendering of the dashboard; no markup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub locale: String,
    pub supported_locales: Vec<String>,
    pub tabs: Vec<String>,
    pub active_tab: usize,
    pub total_balance: String,
    pub all_visible: bool,
    pub cards: Vec<CardView>,
    pub transactions: Vec<TransactionRow>,
    pub actions: Vec<ActionView>,
}

impl DashboardView {
    pub fn derive(dashboard: &Dashboard, state: &ViewState, policy: FormatPolicy) -> Self {
        let locale = state.locale();
        let ctx = FormatContext::new(locale, policy);
        let visibility = &state.visibility;

        let cards = dashboard
            .accounts
            .iter()
            .map(|card| {
                let visible = visibility.is_visible(&card.account_key);
                let title = match (&card.title, card.title_label()) {
                    (Some(title), _) => title.clone(),
                    (None, Some(label)) => t(locale, label).to_string(),
                    (None, None) => card.account_key.clone(),
                };

                CardView {
                    key: card.account_key.clone(),
                    title,
                    initials: get_initials(&card.holder),
                    balance: or_placeholder(format_balance(card.balance, visible, &ctx)),
                    currency: card.balance.currency.code().to_string(),
                    visible,
                    account_number: or_placeholder(mask_account_number(&card.account_number)),
                }
            })
            .collect();

        // Total is shown only when every card is shown
        let total_balance = match dashboard.total_balance() {
            Some(total) if visibility.all_visible() => or_placeholder(format_currency(total, &ctx)),
            Some(_) => HIDDEN_BALANCE.to_string(),
            None => PLACEHOLDER.to_string(),
        };

        let transactions = dashboard
            .transactions
            .iter()
            .map(|tx| TransactionRow {
                date: format_date(tx.date, locale),
                merchant: tx.merchant.clone(),
                category: tx.category.clone(),
                amount: or_placeholder(format_signed(tx.amount, &ctx)),
                incoming: !tx.amount.is_negative(),
            })
            .collect();

        let actions = dashboard
            .actions
            .iter()
            .map(|a| ActionView {
                kind: a.kind,
                icon: a.icon,
                label: t(locale, a.label).to_string(),
            })
            .collect();

        DashboardView {
            locale: locale.code().to_string(),
            supported_locales: state.locale.supported().iter().map(|l| l.code().to_string()).collect(),
            tabs: Tab::ALL.iter().map(|tab| t(locale, tab.label()).to_string()).collect(),
            active_tab: Tab::ALL.iter().position(|tab| *tab == state.tab).unwrap_or(0),
            total_balance,
            all_visible: visibility.all_visible(),
            cards,
            transactions,
            actions,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::state::{apply, Action};

    fn mounted() -> (Dashboard, ViewState) {
        let dashboard = Dashboard::demo();
        let state = dashboard.mount(&LocaleProps::default(), true).unwrap();
        (dashboard, state)
    }

    #[test]
    fn test_mount_registers_every_card() {
        let (dashboard, state) = mounted();
        for card in &dashboard.accounts {
            assert!(state.visibility.contains(&card.account_key));
        }
        assert!(state.visibility.all_visible());
    }

    #[test]
    fn test_view_en() {
        let (dashboard, state) = mounted();
        let view = DashboardView::derive(&dashboard, &state, FormatPolicy::default());

        assert_eq!(view.locale, "en");
        assert_eq!(view.cards[0].title, "Savings");
        assert_eq!(view.cards[0].initials, "MW");
        assert_eq!(view.cards[0].balance, "RUB\u{a0}1,250,340.75");
        assert_eq!(view.cards[0].account_number, "****4521");
        assert_eq!(view.total_balance, "RUB\u{a0}1,866,551.25");
        assert_eq!(view.transactions[0].date, "Oct 15, 2026");
        assert_eq!(view.transactions[1].amount, "+RUB\u{a0}185,000.00");
        assert_eq!(view.actions.len(), 6);
    }

    #[test]
    fn test_view_follows_locale_switch() {
        let (dashboard, state) = mounted();
        let state = apply(&state, Action::SetLocale("ru".to_string())).unwrap();
        let view = DashboardView::derive(&dashboard, &state, FormatPolicy::new(0));

        assert_eq!(view.locale, "ru");
        assert_eq!(view.tabs[0], "Счета");
        assert_eq!(view.cards[2].balance, "532\u{a0}000\u{a0}₽");
        assert_eq!(view.transactions[0].date, "15.10.2026");
    }

    #[test]
    fn test_hidden_card_masks_balance_and_total() {
        let (dashboard, state) = mounted();
        let state = apply(&state, Action::ToggleBalance("current".to_string())).unwrap();
        let view = DashboardView::derive(&dashboard, &state, FormatPolicy::default());

        assert_eq!(view.cards[1].balance, HIDDEN_BALANCE);
        assert!(!view.cards[1].visible);
        assert_eq!(view.total_balance, HIDDEN_BALANCE);
        assert!(!view.all_visible);
    }

    #[test]
    fn test_short_account_number_shows_placeholder() {
        let props: DashboardProps = serde_json::from_str(
            r#"{
                "accounts": [
                    { "accountKey": "savings", "holder": "John", "accountNumber": "12",
                      "balance": { "value": 10.0 } }
                ]
            }"#,
        )
        .unwrap();
        let dashboard = Dashboard::from_props(props);
        let state = dashboard.mount(&LocaleProps::default(), true).unwrap();
        let view = DashboardView::derive(&dashboard, &state, FormatPolicy::default());

        assert_eq!(view.cards[0].account_number, "—");
        assert_eq!(view.cards[0].initials, "J");
        assert_eq!(view.actions.len(), 6);
    }

    #[test]
    fn test_unrepresentable_balances_show_placeholder() {
        let props: DashboardProps = toml::from_str(
            r#"
[[accounts]]
accountKey = "savings"
holder = "John"
accountNumber = "40817810099994521"
balance = { value = nan }

[[accounts]]
accountKey = "current"
holder = "John"
accountNumber = "40817810500001234"
balance = { value = inf }

[[accounts]]
accountKey = "investment"
holder = "John"
accountNumber = "40701810900007788"
balance = { value = 1e40 }

[[transactions]]
date = "2026-10-01"
merchant = "Shop"
category = "Shopping"
amount = { value = -inf }
"#,
        )
        .unwrap();
        let dashboard = Dashboard::from_props(props);
        let state = dashboard.mount(&LocaleProps::default(), true).unwrap();
        let view = DashboardView::derive(&dashboard, &state, FormatPolicy::default());

        for card in &view.cards {
            assert_eq!(card.balance, "—");
        }
        assert_eq!(view.total_balance, "—");
        assert_eq!(view.transactions[0].amount, "—");

        // Hidden cards never reveal that the value was bad
        let hidden = apply(&state, Action::SetAllBalances(false)).unwrap();
        let view = DashboardView::derive(&dashboard, &hidden, FormatPolicy::default());
        assert_eq!(view.cards[0].balance, HIDDEN_BALANCE);
        assert_eq!(view.total_balance, HIDDEN_BALANCE);
    }

    #[test]
    fn test_duplicate_account_keys_rejected() {
        let mut dashboard = Dashboard::demo();
        let mut twin = dashboard.accounts[0].clone();
        twin.initial_visible = Some(false);
        dashboard.accounts.push(twin);

        assert_eq!(
            dashboard.mount(&LocaleProps::default(), true),
            Err(DashboardError::DuplicateAccountKey("savings".to_string()))
        );
    }

    #[test]
    fn test_view_lists_currency_and_locales() {
        let (dashboard, state) = mounted();
        let view = DashboardView::derive(&dashboard, &state, FormatPolicy::default());

        assert_eq!(view.cards[0].currency, "RUB");
        assert_eq!(view.supported_locales, vec!["en", "ru"]);
    }

    #[test]
    fn test_mixed_currency_total_is_placeholder() {
        let mut dashboard = Dashboard::demo();
        dashboard.accounts[0].balance.currency = crate::format::Currency::Usd;
        let state = dashboard.mount(&LocaleProps::default(), true).unwrap();
        let view = DashboardView::derive(&dashboard, &state, FormatPolicy::default());

        assert_eq!(view.total_balance, "—");
    }

    #[test]
    fn test_mount_rejects_unsupported_initial_locale() {
        let props = LocaleProps {
            supported_locales: vec![Locale::En],
            initial_locale: Locale::Ru,
        };
        assert!(Dashboard::demo().mount(&props, true).is_err());
    }

    #[test]
    fn test_view_serializes_to_plain_json() {
        let (dashboard, state) = mounted();
        let view = DashboardView::derive(&dashboard, &state, FormatPolicy::default());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["cards"][0]["account_number"], "****4521");
        assert_eq!(json["actions"][2]["kind"], "top_up");
    }
}
