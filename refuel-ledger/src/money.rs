//! Monetary parsing and formatting
//!
//! Amounts travel through the system in two textual shapes:
//!
//! - raw entry: digits only, read as minor units (`"15000"` is 150.00)
//! - display form: symbol, grouped integer digits, two fractional digits
//!   (`"R$ 150,00"`)
//!
//! Both resolve to a `Decimal` in major units. Unparseable text resolves to
//! zero in the lenient entry points; [`CurrencyFormat::try_parse_display_currency`]
//! reports it instead.

use crate::config::CurrencyConfig;
use crate::{Error, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Strip every character that is not an ASCII digit
pub fn normalize_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Tickets granted for one refueling: `floor(amount / amount_per_ticket)`
pub fn tickets_for(amount: Decimal, amount_per_ticket: Decimal) -> u64 {
    if amount <= Decimal::ZERO || amount_per_ticket <= Decimal::ZERO {
        return 0;
    }
    amount
        .checked_div(amount_per_ticket)
        .and_then(|q| q.floor().to_u64())
        .unwrap_or(u64::MAX)
}

/// Currency rendering rules for the single configured locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    symbol: String,
    decimal_separator: char,
    grouping_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::from(&CurrencyConfig::default())
    }
}

impl From<&CurrencyConfig> for CurrencyFormat {
    fn from(config: &CurrencyConfig) -> Self {
        Self {
            symbol: config.symbol.clone(),
            decimal_separator: config.decimal_separator,
            grouping_separator: config.grouping_separator,
        }
    }
}

impl CurrencyFormat {
    /// Currency symbol
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Whether `text` is already in display form
    pub fn is_display_form(&self, text: &str) -> bool {
        text.contains(self.symbol.as_str())
    }

    /// Format minor units (cents) as display currency
    pub fn to_display_currency(&self, amount_in_minor_units: i64) -> String {
        self.render(i128::from(amount_in_minor_units))
    }

    /// Format a major-unit amount, rounding half-even to two places
    pub fn format_amount(&self, amount: Decimal) -> String {
        match amount
            .round_dp(2)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|minor| minor.to_i128())
        {
            Some(minor) => self.render(minor),
            None => format!("{} {}", self.symbol, amount),
        }
    }

    /// Parse display currency, coercing malformed text to zero
    pub fn parse_display_currency(&self, text: &str) -> Decimal {
        match self.try_parse_display_currency(text) {
            Ok(amount) => amount,
            Err(e) => {
                tracing::warn!(input = text, error = %e, "Unparseable amount, using zero");
                Decimal::ZERO
            }
        }
    }

    /// Parse display currency, reporting malformed text
    ///
    /// Everything except digits and the decimal separator is discarded, so
    /// the symbol, spaces, grouping separators and signs never matter.
    pub fn try_parse_display_currency(&self, text: &str) -> Result<Decimal> {
        let invalid = || Error::InvalidAmount(text.to_string());

        let kept: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == self.decimal_separator)
            .collect();

        let mut parts = kept.split(self.decimal_separator);
        let integer = parts.next().unwrap_or_default();
        let fraction = parts.next().unwrap_or_default();
        if parts.next().is_some() || (integer.is_empty() && fraction.is_empty()) {
            return Err(invalid());
        }

        let integer = if integer.is_empty() { "0" } else { integer };
        let normalized = if fraction.is_empty() {
            integer.to_string()
        } else {
            format!("{}.{}", integer, fraction)
        };

        Decimal::from_str(&normalized).map_err(|_| invalid())
    }

    /// Amount of a form field, whichever shape it is in
    ///
    /// Display text goes through [`Self::parse_display_currency`]; anything
    /// else is read as minor-unit digits and divided by 100.
    pub fn resolve_amount(&self, field_value: &str) -> Decimal {
        if self.is_display_form(field_value) {
            return self.parse_display_currency(field_value);
        }

        let digits = normalize_digits(field_value);
        if digits.is_empty() {
            return Decimal::ZERO;
        }

        match Decimal::from_str(&digits) {
            Ok(minor) => minor / Decimal::ONE_HUNDRED,
            Err(e) => {
                tracing::warn!(input = field_value, error = %e, "Raw amount out of range, using zero");
                Decimal::ZERO
            }
        }
    }

    /// Raw digits -> display form, as when the amount field loses focus
    ///
    /// Returns `None` for empty input or digit strings too long for `i64`.
    pub fn digits_to_display(&self, digits: &str) -> Option<String> {
        let digits = normalize_digits(digits);
        if digits.is_empty() {
            return None;
        }
        digits
            .parse::<i64>()
            .ok()
            .map(|minor| self.to_display_currency(minor))
    }

    fn render(&self, minor: i128) -> String {
        let sign = if minor < 0 { "-" } else { "" };
        let minor = minor.unsigned_abs();
        let units = group_thousands(&(minor / 100).to_string(), self.grouping_separator);

        format!(
            "{}{} {}{}{:02}",
            sign,
            self.symbol,
            units,
            self.decimal_separator,
            minor % 100
        )
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
