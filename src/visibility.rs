// 👁️ Visibility State Manager
// Per-account show/hide flags for balances. The per-account map is the source of truth;
// the global flag is always derived from it.
//
// Values are never mutated in place: every operation returns a new BalanceVisibility.

use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Props for a visibility-consuming card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityProps {
    pub account_key: String,
    #[serde(default)]
    pub initial_visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceVisibility {
    flags: BTreeMap<String, bool>,
    /// What an unregistered key reads as
    default_visible: bool,
}

impl BalanceVisibility {
    /// Empty map; unset keys read as visible
    pub fn new() -> Self {
        Self::with_default(true)
    }

    pub fn with_default(default_visible: bool) -> Self {
        BalanceVisibility {
            flags: BTreeMap::new(),
            default_visible,
        }
    }

    /// Build the map at mount, one entry per rendered card
    pub fn from_props(props: &[VisibilityProps], default_visible: bool) -> Self {
        props.iter().fold(Self::with_default(default_visible), |acc, p| {
            acc.register(&p.account_key, p.initial_visible)
        })
    }

    /// Add an entry for `key`; an existing entry keeps its current value
    pub fn register(&self, key: &str, initial_visible: Option<bool>) -> Self {
        let mut next = self.clone();
        next.flags
            .entry(key.to_string())
            .or_insert(initial_visible.unwrap_or(self.default_visible));
        next
    }

    /// Flip the flag for a known key.
    ///
    /// Unknown keys are rejected with `UnknownAccountKey` instead of being inserted.
    pub fn toggle(&self, key: &str) -> Result<Self> {
        let current = self
            .flags
            .get(key)
            .copied()
            .ok_or_else(|| DashboardError::UnknownAccountKey(key.to_string()))?;

        let mut next = self.clone();
        next.flags.insert(key.to_string(), !current);
        Ok(next)
    }

    /// Set every known key to `visible` in one step
    pub fn set_all(&self, visible: bool) -> Self {
        BalanceVisibility {
            flags: self.flags.keys().map(|k| (k.clone(), visible)).collect(),
            default_visible: self.default_visible,
        }
    }

    /// Show everything unless everything is already shown
    pub fn toggle_all(&self) -> Self {
        self.set_all(!self.all_visible())
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.flags.get(key).copied().unwrap_or(self.default_visible)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.flags.contains_key(key)
    }

    /// Derived global flag: true iff there is at least one card and all are visible
    pub fn all_visible(&self) -> bool {
        !self.flags.is_empty() && self.flags.values().all(|v| *v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.flags.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl Default for BalanceVisibility {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
