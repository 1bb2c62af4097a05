// 🌐 Locale Selector
// Closed set of locales plus the selector that tracks the active one.
// The active locale is passed explicitly into every formatter; nothing reads it implicitly.

use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// LOCALE
// ============================================================================

/// Deserialized through `FromStr`, so props accept the same tags as `--locale`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Locale {
    /// English (en-US number and date layout)
    En,

    /// Russian (ru-RU number and date layout)
    Ru,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ru];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }

    /// Name of the language in that language, for the toggle button
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Ru => "Русский",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = DashboardError;

    /// Accepts `en`, `RU`, `ru-RU`, `en_US`; only the language subtag matters
    fn from_str(s: &str) -> Result<Self> {
        let language = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match language.as_str() {
            "en" => Ok(Locale::En),
            "ru" => Ok(Locale::Ru),
            _ => Err(DashboardError::InvalidLocale(s.to_string())),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = DashboardError;

    fn try_from(code: String) -> Result<Self> {
        code.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.code().to_string()
    }
}

// ============================================================================
// LOCALE SELECTOR
// ============================================================================

/// Props for the locale-consuming views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleProps {
    pub supported_locales: Vec<Locale>,
    pub initial_locale: Locale,
}

impl Default for LocaleProps {
    fn default() -> Self {
        LocaleProps {
            supported_locales: Locale::ALL.to_vec(),
            initial_locale: Locale::En,
        }
    }
}

/// Active locale plus the set it may switch between
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSelector {
    active: Locale,
    supported: Vec<Locale>,
}

impl LocaleSelector {
    pub fn new(props: &LocaleProps) -> Result<Self> {
        let mut supported: Vec<Locale> = Vec::new();
        for locale in &props.supported_locales {
            if !supported.contains(locale) {
                supported.push(*locale);
            }
        }
        if supported.is_empty() {
            supported = Locale::ALL.to_vec();
        }

        if !supported.contains(&props.initial_locale) {
            return Err(DashboardError::InvalidLocale(
                props.initial_locale.code().to_string(),
            ));
        }

        Ok(LocaleSelector {
            active: props.initial_locale,
            supported,
        })
    }

    pub fn get_locale(&self) -> Locale {
        self.active
    }

    pub fn supported(&self) -> &[Locale] {
        &self.supported
    }

    /// Switch to `code`.
    ///
    /// Returns `Ok(None)` when `code` is already active so callers can skip
    /// re-deriving anything. Codes outside the supported set are rejected and
    /// the selector is left as it was.
    pub fn set_locale(&self, code: &str) -> Result<Option<Self>> {
        let locale: Locale = code.parse()?;
        self.select(locale)
    }

    pub fn select(&self, locale: Locale) -> Result<Option<Self>> {
        if !self.supported.contains(&locale) {
            return Err(DashboardError::InvalidLocale(locale.code().to_string()));
        }
        if locale == self.active {
            return Ok(None);
        }

        Ok(Some(LocaleSelector {
            active: locale,
            supported: self.supported.clone(),
        }))
    }

    /// Next supported locale, wrapping around; `None` if only one is supported
    pub fn toggle(&self) -> Option<Self> {
        let idx = self
            .supported
            .iter()
            .position(|l| *l == self.active)
            .unwrap_or(0);
        let next = self.supported[(idx + 1) % self.supported.len()];

        if next == self.active {
            return None;
        }

        Some(LocaleSelector {
            active: next,
            supported: self.supported.clone(),
        })
    }
}

impl Default for LocaleSelector {
    fn default() -> Self {
        LocaleSelector {
            active: Locale::En,
            supported: Locale::ALL.to_vec(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale_codes() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("RU".parse::<Locale>().unwrap(), Locale::Ru);
        assert_eq!("ru-RU".parse::<Locale>().unwrap(), Locale::Ru);
        assert_eq!("en_US".parse::<Locale>().unwrap(), Locale::En);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for code in ["", "de", "fr-FR", "english", "r"] {
            assert_eq!(
                code.parse::<Locale>(),
                Err(DashboardError::InvalidLocale(code.to_string()))
            );
        }
    }

    #[test]
    fn test_set_locale_switches() {
        let selector = LocaleSelector::default();
        let next = selector.set_locale("ru").unwrap().unwrap();

        assert_eq!(next.get_locale(), Locale::Ru);
        assert_eq!(selector.get_locale(), Locale::En);
    }

    #[test]
    fn test_set_same_locale_is_noop() {
        let selector = LocaleSelector::default();
        assert_eq!(selector.set_locale("en").unwrap(), None);
    }

    #[test]
    fn test_set_invalid_locale_never_adopted() {
        let selector = LocaleSelector::default();
        for code in ["de", "zh", "xx-YY", " "] {
            assert!(selector.set_locale(code).is_err());
        }
        assert_eq!(selector.get_locale(), Locale::En);
    }

    #[test]
    fn test_unsupported_locale_rejected() {
        let selector = LocaleSelector::new(&LocaleProps {
            supported_locales: vec![Locale::Ru],
            initial_locale: Locale::Ru,
        })
        .unwrap();

        assert_eq!(
            selector.set_locale("en"),
            Err(DashboardError::InvalidLocale("en".to_string()))
        );
        assert_eq!(selector.toggle(), None);
    }

    #[test]
    fn test_initial_locale_must_be_supported() {
        let props = LocaleProps {
            supported_locales: vec![Locale::En],
            initial_locale: Locale::Ru,
        };
        assert!(LocaleSelector::new(&props).is_err());
    }

    #[test]
    fn test_toggle_cycles() {
        let selector = LocaleSelector::default();
        let ru = selector.toggle().unwrap();
        let en = ru.toggle().unwrap();

        assert_eq!(ru.get_locale(), Locale::Ru);
        assert_eq!(en.get_locale(), Locale::En);
    }

    #[test]
    fn test_props_deserialize() {
        let json = r#"{ "supportedLocales": ["en", "ru"], "initialLocale": "ru" }"#;
        let props: LocaleProps = serde_json::from_str(json).unwrap();

        assert_eq!(props.initial_locale, Locale::Ru);
        assert_eq!(props.supported_locales, vec![Locale::En, Locale::Ru]);
    }

    #[test]
    fn test_props_accept_region_tags() {
        let json = r#"{ "supportedLocales": ["en-US", "RU"], "initialLocale": "ru-RU" }"#;
        let props: LocaleProps = serde_json::from_str(json).unwrap();

        assert_eq!(props.initial_locale, Locale::Ru);
        assert_eq!(props.supported_locales, vec![Locale::En, Locale::Ru]);

        let json = r#"{ "supportedLocales": [], "initialLocale": "de" }"#;
        assert!(serde_json::from_str::<LocaleProps>(json).is_err());
    }

    #[test]
    fn test_locale_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Locale::Ru).unwrap(), "\"ru\"");
    }
}
