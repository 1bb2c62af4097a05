// 💱 Display Formatter
// Pure functions deriving display strings from raw values.
//
// Currency policy: an amount is always shown in its OWN currency. The locale in the
// FormatContext only decides the layout (grouping, decimal mark, symbol position).
// Fraction digits: at most 2, at least `FormatPolicy::min_fraction_digits`.

use crate::error::{DashboardError, Result};
use crate::locale::Locale;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Shown instead of a hidden balance
pub const HIDDEN_BALANCE: &str = "••••••";

/// Prefix of a masked account number
pub const ACCOUNT_MASK: &str = "****";

/// Trailing characters kept visible by `mask_account_number`
pub const MASK_WINDOW: usize = 4;

/// Fallback for names with no usable characters
pub const INITIALS_FALLBACK: &str = "U";

/// Largest magnitude rendered; cents stay exact in an f64 below 2^53
pub const MAX_AMOUNT: f64 = 1e13;

const MAX_FRACTION_DIGITS: u8 = 2;
const NBSP: char = '\u{a0}';

// ============================================================================
// MONEY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Rub,
    Usd,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Rub => "RUB",
            Currency::Usd => "USD",
        }
    }

    /// Symbol as it appears in the given locale's layout
    fn symbol(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Currency::Rub, Locale::Ru) => "₽",
            (Currency::Rub, Locale::En) => "RUB",
            (Currency::Usd, _) => "$",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonetaryAmount {
    pub value: f64,
    #[serde(default)]
    pub currency: Currency,
}

impl MonetaryAmount {
    pub fn new(value: f64, currency: Currency) -> Self {
        MonetaryAmount { value, currency }
    }

    pub fn rub(value: f64) -> Self {
        Self::new(value, Currency::Rub)
    }

    pub fn is_negative(&self) -> bool {
        self.value < 0.0
    }
}

// ============================================================================
// POLICY / CONTEXT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatPolicy {
    /// 0..=2; trailing zeros are trimmed down to this many digits
    pub min_fraction_digits: u8,
}

impl FormatPolicy {
    pub fn new(min_fraction_digits: u8) -> Self {
        FormatPolicy {
            min_fraction_digits: min_fraction_digits.min(MAX_FRACTION_DIGITS),
        }
    }
}

impl Default for FormatPolicy {
    fn default() -> Self {
        FormatPolicy {
            min_fraction_digits: 2,
        }
    }
}

/// Everything a formatter may depend on, passed explicitly at every call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatContext {
    pub locale: Locale,
    pub policy: FormatPolicy,
}

impl FormatContext {
    pub fn new(locale: Locale, policy: FormatPolicy) -> Self {
        FormatContext { locale, policy }
    }
}

// ============================================================================
// FORMATTERS
// ============================================================================

/// Render `amount` in its own currency using the context's locale layout.
///
/// en: `RUB 1,250,340.75`, `$1,250,340.75`
/// ru: `1 250 340,75 ₽`, `1 250 340,75 $` (no-break spaces)
///
/// NaN, infinities and magnitudes above `MAX_AMOUNT` fail with `InvalidAmount`.
pub fn format_currency(amount: MonetaryAmount, ctx: &FormatContext) -> Result<String> {
    render(amount, ctx).map(|(_, text)| text)
}

/// Like `format_currency` but always carries a sign, for transaction rows.
/// Amounts that round to zero carry none.
pub fn format_signed(amount: MonetaryAmount, ctx: &FormatContext) -> Result<String> {
    let (sign, text) = render(amount, ctx)?;
    Ok(match sign {
        Sign::Positive => format!("+{text}"),
        Sign::Negative | Sign::Zero => text,
    })
}

/// Formatted amount when visible, the fixed mask otherwise
pub fn format_balance(amount: MonetaryAmount, visible: bool, ctx: &FormatContext) -> Result<String> {
    if visible {
        format_currency(amount, ctx)
    } else {
        Ok(HIDDEN_BALANCE.to_string())
    }
}

/// `****` followed by the last 4 characters of `full_number`
pub fn mask_account_number(full_number: &str) -> Result<String> {
    let chars: Vec<char> = full_number.chars().collect();
    if chars.len() < MASK_WINDOW {
        return Err(DashboardError::InvalidAccountNumber {
            value: full_number.to_string(),
            len: chars.len(),
        });
    }

    let tail: String = chars[chars.len() - MASK_WINDOW..].iter().collect();
    Ok(format!("{ACCOUNT_MASK}{tail}"))
}

/// First letter of the first and last words, upper-cased.
///
/// "" → "U", "John" → "J", "Mary Jane Watson" → "MW"
pub fn get_initials(name: &str) -> String {
    let tokens: Vec<&str> = name.split_whitespace().collect();

    let first_upper = |token: &str| -> String {
        token
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    };

    match tokens.as_slice() {
        [] => INITIALS_FALLBACK.to_string(),
        [only] => first_upper(*only),
        [first, .., last] => format!("{}{}", first_upper(*first), first_upper(*last)),
    }
}

/// en: `Oct 16, 2026`, ru: `16.10.2026`
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::En => date.format("%b %-d, %Y").to_string(),
        Locale::Ru => date.format("%d.%m.%Y").to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    Negative,
    Zero,
    Positive,
}

/// Sign of the ROUNDED amount plus the full text (with `-` when negative)
fn render(amount: MonetaryAmount, ctx: &FormatContext) -> Result<(Sign, String)> {
    let (sign, number) = format_number(amount.value, ctx)?;
    let minus = if sign == Sign::Negative { "-" } else { "" };
    let symbol = amount.currency.symbol(ctx.locale);

    let text = match ctx.locale {
        Locale::En => match amount.currency {
            Currency::Usd => format!("{minus}{symbol}{number}"),
            Currency::Rub => format!("{minus}{symbol}{NBSP}{number}"),
        },
        Locale::Ru => format!("{minus}{number}{NBSP}{symbol}"),
    };

    Ok((sign, text))
}

/// Digits with grouping and decimal mark, no sign
fn format_number(value: f64, ctx: &FormatContext) -> Result<(Sign, String)> {
    if !value.is_finite() || value.abs() > MAX_AMOUNT {
        return Err(DashboardError::InvalidAmount(value.to_string()));
    }

    let (group_sep, decimal_sep) = match ctx.locale {
        Locale::En => (',', '.'),
        Locale::Ru => (NBSP, ','),
    };

    let scale = 10u64.pow(MAX_FRACTION_DIGITS as u32);
    let scaled = (value.abs() * scale as f64).round() as u64;
    let int_part = scaled / scale;
    let frac_part = scaled % scale;

    let mut fraction = format!("{:0width$}", frac_part, width = MAX_FRACTION_DIGITS as usize);
    let min = ctx.policy.min_fraction_digits.min(MAX_FRACTION_DIGITS) as usize;
    while fraction.len() > min && fraction.ends_with('0') {
        fraction.pop();
    }

    let digits = int_part.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(c);
    }

    if !fraction.is_empty() {
        grouped.push(decimal_sep);
        grouped.push_str(&fraction);
    }

    let sign = match (scaled, value < 0.0) {
        (0, _) => Sign::Zero,
        (_, true) => Sign::Negative,
        (_, false) => Sign::Positive,
    };

    Ok((sign, grouped))
}

// ============================================================================
// TESTS
// ============================================================================
