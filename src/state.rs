// 🔁 View State reducer
// One immutable state object per dashboard view. Every user action goes through
// `apply`, which returns a replacement state and never mutates the old one.

use crate::error::Result;
use crate::i18n::Label;
use crate::locale::{Locale, LocaleSelector};
use crate::visibility::BalanceVisibility;

/// Frames a tab switch animation lasts (one frame per `Tick`)
pub const TRANSITION_FRAMES: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Accounts,
    Transactions,
    Actions,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Accounts, Tab::Transactions, Tab::Actions];

    pub fn next(&self) -> Self {
        match self {
            Tab::Accounts => Tab::Transactions,
            Tab::Transactions => Tab::Actions,
            Tab::Actions => Tab::Accounts,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Tab::Accounts => Tab::Actions,
            Tab::Transactions => Tab::Accounts,
            Tab::Actions => Tab::Transactions,
        }
    }

    pub fn label(&self) -> Label {
        match self {
            Tab::Accounts => Label::TabAccounts,
            Tab::Transactions => Label::TabTransactions,
            Tab::Actions => Label::TabActions,
        }
    }
}

/// In-flight tab switch animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabTransition {
    pub from: Tab,
    pub to: Tab,
    pub frame: u8,
}

impl TabTransition {
    /// 0.0 at the start, 1.0 when finished
    pub fn progress(&self) -> f64 {
        f64::from(self.frame) / f64::from(TRANSITION_FRAMES)
    }

    pub fn is_done(&self) -> bool {
        self.frame >= TRANSITION_FRAMES
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleBalance(String),
    SetAllBalances(bool),
    ToggleAllBalances,
    SetLocale(String),
    ToggleLocale,
    SwitchTab(Tab),
    NextTab,
    PrevTab,
    Tick,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub visibility: BalanceVisibility,
    pub locale: LocaleSelector,
    pub tab: Tab,
    pub transition: Option<TabTransition>,
    /// Bumped on every change that alters derived text
    pub revision: u64,
}

impl ViewState {
    pub fn new(visibility: BalanceVisibility, locale: LocaleSelector) -> Self {
        ViewState {
            visibility,
            locale,
            tab: Tab::Accounts,
            transition: None,
            revision: 0,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale.get_locale()
    }

    fn with_visibility(&self, visibility: BalanceVisibility) -> Self {
        ViewState {
            visibility,
            revision: self.revision + 1,
            ..self.clone()
        }
    }

    fn with_locale(&self, locale: Option<LocaleSelector>) -> Self {
        match locale {
            Some(locale) => ViewState {
                locale,
                revision: self.revision + 1,
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    fn with_tab(&self, tab: Tab) -> Self {
        if tab == self.tab {
            return self.clone();
        }
        ViewState {
            tab,
            transition: Some(TabTransition {
                from: self.tab,
                to: tab,
                frame: 0,
            }),
            revision: self.revision + 1,
            ..self.clone()
        }
    }

    fn ticked(&self) -> Self {
        let transition = self.transition.and_then(|t| {
            let next = TabTransition {
                frame: t.frame.saturating_add(1),
                ..t
            };
            (!next.is_done()).then_some(next)
        });

        ViewState {
            transition,
            ..self.clone()
        }
    }
}

/// Apply one user action and return the replacement state.
///
/// On error the caller keeps the previous state.
pub fn apply(state: &ViewState, action: Action) -> Result<ViewState> {
    let next = match action {
        Action::ToggleBalance(ref key) => state.with_visibility(state.visibility.toggle(key)?),
        Action::SetAllBalances(visible) => state.with_visibility(state.visibility.set_all(visible)),
        Action::ToggleAllBalances => state.with_visibility(state.visibility.toggle_all()),
        Action::SetLocale(ref code) => state.with_locale(state.locale.set_locale(code)?),
        Action::ToggleLocale => state.with_locale(state.locale.toggle()),
        Action::SwitchTab(tab) => state.with_tab(tab),
        Action::NextTab => state.with_tab(state.tab.next()),
        Action::PrevTab => state.with_tab(state.tab.previous()),
        Action::Tick => return Ok(state.ticked()),
    };

    if next.revision != state.revision {
        tracing::debug!(?action, revision = next.revision, "view state changed");
    }

    Ok(next)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;

    fn state() -> ViewState {
        let visibility = BalanceVisibility::new()
            .register("savings", None)
            .register("current", None);
        ViewState::new(visibility, LocaleSelector::default())
    }

    #[test]
    fn test_toggle_balance_replaces_state() {
        let s0 = state();
        let s1 = apply(&s0, Action::ToggleBalance("savings".to_string())).unwrap();

        assert!(s0.visibility.is_visible("savings"));
        assert!(!s1.visibility.is_visible("savings"));
        assert_eq!(s1.revision, 1);
    }

    #[test]
    fn test_unknown_key_keeps_state() {
        let s0 = state();
        let err = apply(&s0, Action::ToggleBalance("crypto".to_string())).unwrap_err();

        assert_eq!(err, DashboardError::UnknownAccountKey("crypto".to_string()));
    }

    #[test]
    fn test_set_all_balances() {
        let hidden = apply(&state(), Action::SetAllBalances(false)).unwrap();
        assert!(!hidden.visibility.is_visible("savings"));
        assert!(!hidden.visibility.is_visible("current"));

        let shown = apply(&hidden, Action::ToggleAllBalances).unwrap();
        assert!(shown.visibility.all_visible());
    }

    #[test]
    fn test_same_locale_does_not_bump_revision() {
        let s0 = state();
        let s1 = apply(&s0, Action::SetLocale("en".to_string())).unwrap();
        assert_eq!(s1, s0);

        let s2 = apply(&s1, Action::SetLocale("ru".to_string())).unwrap();
        assert_eq!(s2.locale(), Locale::Ru);
        assert_eq!(s2.revision, 1);
    }

    #[test]
    fn test_invalid_locale_rejected() {
        let s0 = state();
        assert_eq!(
            apply(&s0, Action::SetLocale("de".to_string())),
            Err(DashboardError::InvalidLocale("de".to_string()))
        );
    }

    #[test]
    fn test_toggle_locale() {
        let s1 = apply(&state(), Action::ToggleLocale).unwrap();
        assert_eq!(s1.locale(), Locale::Ru);
    }

    #[test]
    fn test_tab_switch_starts_transition() {
        let s1 = apply(&state(), Action::NextTab).unwrap();

        assert_eq!(s1.tab, Tab::Transactions);
        assert_eq!(
            s1.transition,
            Some(TabTransition {
                from: Tab::Accounts,
                to: Tab::Transactions,
                frame: 0
            })
        );
    }

    #[test]
    fn test_switch_to_current_tab_is_noop() {
        let s0 = state();
        assert_eq!(apply(&s0, Action::SwitchTab(Tab::Accounts)).unwrap(), s0);
    }

    #[test]
    fn test_ticks_finish_transition() {
        let mut s = apply(&state(), Action::PrevTab).unwrap();
        assert_eq!(s.tab, Tab::Actions);

        for _ in 0..TRANSITION_FRAMES - 1 {
            s = apply(&s, Action::Tick).unwrap();
            assert!(s.transition.is_some());
        }
        s = apply(&s, Action::Tick).unwrap();
        assert!(s.transition.is_none());

        // Ticking with nothing in flight changes nothing
        assert_eq!(apply(&s, Action::Tick).unwrap(), s);
    }

    #[test]
    fn test_transition_progress() {
        let t = TabTransition {
            from: Tab::Accounts,
            to: Tab::Actions,
            frame: TRANSITION_FRAMES / 2,
        };
        assert!((t.progress() - 0.5).abs() < f64::EPSILON);
        assert!(!t.is_done());
    }
}
