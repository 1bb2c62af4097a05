// ⚙️ Configuration / static props
// Optional TOML or JSON file; every field has a default so no file is needed.

use crate::dashboard::{Dashboard, DashboardProps};
use crate::error::{DashboardError, Result};
use crate::format::FormatPolicy;
use crate::locale::LocaleProps;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    pub locale: LocaleProps,
    pub format: FormatPolicy,
    /// Visibility of cards without an explicit `initialVisible`
    pub initial_visible: bool,
    /// Replaces the demo data when present
    pub dashboard: Option<DashboardProps>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            locale: LocaleProps::default(),
            format: FormatPolicy::default(),
            initial_visible: true,
            dashboard: None,
        }
    }
}

impl DashboardConfig {
    /// Load from `path`; `.json` files are parsed as JSON, everything else as TOML
    pub fn load(path: &Path) -> Result<Self> {
        let config_err = |message: String| DashboardError::Config {
            path: path.display().to_string(),
            message,
        };

        let raw = fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let mut config: DashboardConfig = if is_json {
            serde_json::from_str(&raw).map_err(|e| config_err(e.to_string()))?
        } else {
            toml::from_str(&raw).map_err(|e| config_err(e.to_string()))?
        };
        config.format = FormatPolicy::new(config.format.min_fraction_digits);

        tracing::info!(path = %path.display(), "loaded dashboard config");
        Ok(config)
    }

    pub fn build_dashboard(&self) -> Dashboard {
        match &self.dashboard {
            Some(props) => Dashboard::from_props(props.clone()),
            None => Dashboard::demo(),
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
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("bank-dashboard-{}-{}", std::process::id(), name));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.locale.initial_locale, Locale::En);
        assert_eq!(config.format.min_fraction_digits, 2);
        assert!(config.initial_visible);
        assert_eq!(config.build_dashboard().accounts.len(), 3);
    }

    #[test]
    fn test_load_toml() {
        let path = write_temp(
            "config.toml",
            r#"
initialVisible = false

[locale]
supportedLocales = ["en", "ru"]
initialLocale = "ru"

[format]
minFractionDigits = 0
"#,
        );
        let config = DashboardConfig::load(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.locale.initial_locale, Locale::Ru);
        assert_eq!(config.format.min_fraction_digits, 0);
        assert!(!config.initial_visible);
    }

    #[test]
    fn test_load_json_with_dashboard() {
        let path = write_temp(
            "props.json",
            r#"{
                "dashboard": {
                    "accounts": [
                        { "accountKey": "current", "holder": "John", "accountNumber": "40817810500001234",
                          "balance": { "value": 5.5, "currency": "USD" } }
                    ],
                    "transactions": [
                        { "date": "2026-10-01", "merchant": "Shop", "category": "Shopping",
                          "amount": { "value": -5.5, "currency": "USD" } }
                    ],
                    "actions": ["pay"]
                },
                "format": { "minFractionDigits": 9 }
            }"#,
        );
        let config = DashboardConfig::load(&path).unwrap();
        fs::remove_file(&path).ok();

        let dashboard = config.build_dashboard();
        assert_eq!(dashboard.accounts.len(), 1);
        assert_eq!(dashboard.transactions.len(), 1);
        assert_eq!(dashboard.actions.len(), 1);
        assert_eq!(config.format.min_fraction_digits, 2);
    }

    #[test]
    fn test_invalid_locale_in_file() {
        let path = write_temp("bad.toml", "[locale]\nsupportedLocales = [\"en\"]\ninitialLocale = \"de\"\n");
        let err = DashboardConfig::load(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(matches!(err, DashboardError::Config { .. }));
    }

    #[test]
    fn test_demo_props_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/dashboard.toml");
        let config = DashboardConfig::load(&path).unwrap();
        let dashboard = config.build_dashboard();

        assert_eq!(config.locale.initial_locale, Locale::Ru);
        assert_eq!(dashboard.accounts.len(), 2);
        assert_eq!(dashboard.accounts[1].initial_visible, Some(false));
        assert_eq!(dashboard.transactions.len(), 2);
        assert_eq!(dashboard.actions.len(), 4);

        let state = dashboard.mount(&config.locale, config.initial_visible).unwrap();
        assert!(!state.visibility.is_visible("current"));
    }

    #[test]
    fn test_missing_file() {
        let err = DashboardConfig::load(Path::new("/nonexistent/dashboard.toml")).unwrap_err();
        assert!(matches!(err, DashboardError::Config { .. }));
    }
}
