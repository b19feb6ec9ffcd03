//! Conversion between typed text, canonical decimals, and display strings.
//!
//! Display convention: a space groups thousands and a comma separates the
//! fraction (`1 234,56`). Input is accepted with either `,` or `.` as the
//! decimal separator.
//!
//! Typed input is TRUNCATED to [`MAX_FRACTION_DIGITS`]; computed values are
//! ROUNDED only when a fixed display precision is requested.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::debug;

/// Maximum fractional digits kept from input and shown in free display.
pub const MAX_FRACTION_DIGITS: u32 = 8;

/// Separator inserted between groups of three integer digits.
pub const GROUP_SEPARATOR: char = ' ';

/// Separator placed before the fractional digits on display.
pub const DECIMAL_SEPARATOR: char = ',';

/// Parsing and formatting of human-facing numbers.
pub struct NumberText;

/// Digits kept from raw input, split at the first separator.
struct CleanedInput {
    integer: String,
    fraction: Option<String>,
}

impl CleanedInput {
    fn from_raw(raw: &str) -> Self {
        let mut integer = String::new();
        let mut fraction: Option<String> = None;

        for ch in raw.chars() {
            match ch {
                '0'..='9' => match fraction.as_mut() {
                    Some(digits) => digits.push(ch),
                    None => integer.push(ch),
                },
                // Only the first separator counts; later ones are dropped.
                ',' | '.' if fraction.is_none() => fraction = Some(String::new()),
                _ => {}
            }
        }

        if let Some(digits) = fraction.as_mut() {
            digits.truncate(MAX_FRACTION_DIGITS as usize);
        }

        Self { integer, fraction }
    }
}

impl NumberText {
    /// Parses free-form user input into a canonical value.
    ///
    /// Every character other than digits, `,` and `.` is discarded. The first
    /// separator marks the decimal point; subsequent separators are ignored.
    /// The fraction is truncated to 8 digits. Never fails: anything
    /// unparseable (including an integer part too large for a `Decimal`)
    /// yields zero.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use devise_core::currency::NumberText;
    ///
    /// assert_eq!(NumberText::parse("1 234,56"), dec!(1234.56));
    /// assert_eq!(NumberText::parse(""), dec!(0));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Decimal {
        let cleaned = CleanedInput::from_raw(raw);
        let integer = if cleaned.integer.is_empty() {
            "0"
        } else {
            cleaned.integer.as_str()
        };

        let text = match cleaned.fraction.as_deref() {
            Some(fraction) if !fraction.is_empty() => format!("{integer}.{fraction}"),
            _ => integer.to_string(),
        };

        Decimal::from_str(&text).unwrap_or_else(|err| {
            debug!(input = raw, error = %err, "Unrepresentable amount, using zero");
            Decimal::ZERO
        })
    }

    /// Formats a value for display.
    ///
    /// With `None`, the value's own fractional digits are shown, truncated
    /// to 8, and no separator is emitted for whole numbers. With `Some(n)`
    /// (capped at 8) the value is rounded half away from zero to exactly `n`
    /// fractional digits.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use devise_core::currency::NumberText;
    ///
    /// assert_eq!(NumberText::format(dec!(1234.56), Some(2)), "1 234,56");
    /// assert_eq!(NumberText::format(dec!(1234567.5), None), "1 234 567,5");
    /// ```
    #[must_use]
    pub fn format(value: Decimal, fraction_digits: Option<u32>) -> String {
        let fixed = fraction_digits.map(|digits| digits.min(MAX_FRACTION_DIGITS));
        let shown = match fixed {
            Some(digits) => {
                let mut rounded =
                    value.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
                // Near the 28-digit limit rescale keeps fewer digits than asked.
                rounded.rescale(digits);
                rounded
            }
            None => value
                .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::ToZero)
                .normalize(),
        };

        let negative = shown.is_sign_negative() && !shown.is_zero();
        let plain = shown.abs().to_string();
        let (integer, fraction) = match plain.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (plain.as_str(), ""),
        };

        let mut out = String::with_capacity(plain.len() + plain.len() / 3 + 1);
        if negative {
            out.push('-');
        }
        out.push_str(&group_thousands(integer));
        let width = fixed.map_or(fraction.len(), |digits| digits as usize);
        if width > 0 {
            out.push(DECIMAL_SEPARATOR);
            out.push_str(&format!("{fraction:0<width$}"));
        }
        out
    }

    /// Re-formats the text field on every keystroke.
    ///
    /// Cleans like [`NumberText::parse`] but keeps what is being typed: a
    /// trailing separator, trailing fractional zeros, and leading zeros all
    /// survive. An empty field stays empty.
    #[must_use]
    pub fn format_input(raw: &str) -> String {
        let cleaned = CleanedInput::from_raw(raw);
        let mut out = match (cleaned.integer.is_empty(), cleaned.fraction.is_some()) {
            (true, true) => "0".to_string(),
            _ => group_thousands(&cleaned.integer),
        };
        if let Some(fraction) = cleaned.fraction {
            out.push(DECIMAL_SEPARATOR);
            out.push_str(&fraction);
        }
        out
    }

    /// Plain canonical text: period separator, no grouping, no trailing zeros.
    #[must_use]
    pub fn canonical(value: Decimal) -> String {
        value.normalize().to_string()
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// A value together with its canonical and display forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayAmount {
    /// Numeric value used for arithmetic.
    pub value: Decimal,
    /// Canonical text (`1234.56`).
    pub canonical: String,
    /// Grouped display text (`1 234,56`).
    pub formatted: String,
}

impl DisplayAmount {
    /// Builds the amount shown in the input field from raw keystrokes.
    #[must_use]
    pub fn from_input(raw: &str) -> Self {
        let value = NumberText::parse(raw);
        Self {
            value,
            canonical: NumberText::canonical(value),
            formatted: NumberText::format_input(raw),
        }
    }

    /// Builds a display amount for a computed value.
    ///
    /// `value` holds exactly what is shown, so re-parsing `formatted`
    /// gives it back.
    #[must_use]
    pub fn from_value(value: Decimal, fraction_digits: Option<u32>) -> Self {
        let formatted = NumberText::format(value, fraction_digits);
        let value = NumberText::parse(&formatted);
        Self {
            value,
            canonical: NumberText::canonical(value),
            formatted,
        }
    }
}
