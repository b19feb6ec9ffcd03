//! Property-based tests for currency operations.
//!
//! - Round-trip: parse(format(v)) recovers v at display precision
//! - Identity, symmetry and zero for conversion
//! - Base self-rate and refresh atomicity for rate tables

use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use devise_shared::CurrencyCode;

use super::conversion::ConversionCalculator;
use super::number_text::{MAX_FRACTION_DIGITS, NumberText};
use super::preference::{PreferencePair, Role};
use super::rate_table::RateTable;

const CODES: [&str; 6] = ["EUR", "USD", "GBP", "JPY", "CHF", "IDR"];

fn code(s: &str) -> CurrencyCode {
    CurrencyCode::new(s).unwrap()
}

/// Strategy to generate non-negative typed amounts (0 to 1,000,000,000 with 0-8 decimals).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000_000i64, 0u32..=8).prop_map(|(units, scale)| {
        Decimal::new(units, scale)
    })
}

/// Strategy to generate positive exchange rates (0.01 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (100i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate a full table over `CODES` with EUR as base.
fn rate_table() -> impl Strategy<Value = RateTable> {
    prop::collection::vec(positive_rate(), CODES.len() - 1).prop_map(|rates| {
        let raw = std::iter::once(("EUR", Decimal::ONE))
            .chain(CODES[1..].iter().copied().zip(rates));
        RateTable::from_raw(code("EUR"), raw).unwrap()
    })
}

/// Strategy to pick a code present in every generated table.
fn known_code() -> impl Strategy<Value = CurrencyCode> {
    prop::sample::select(CODES.to_vec()).prop_map(code)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Free formatting keeps every digit up to the cap.
    #[test]
    fn prop_round_trip_free_format(
        value in amount(),
        rates in rate_table(),
        from in known_code(),
        to in known_code(),
    ) {
        let converted = ConversionCalculator::convert(value, &from, &to, &rates).unwrap();
        let shown = NumberText::format(converted, None);
        let expected =
            converted.round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::ToZero);
        prop_assert_eq!(NumberText::parse(&shown), expected);
    }

    /// Fixed formatting recovers the rounded value.
    #[test]
    fn prop_round_trip_fixed_format(
        value in amount(),
        rates in rate_table(),
        from in known_code(),
        to in known_code(),
    ) {
        let converted = ConversionCalculator::convert(value, &from, &to, &rates).unwrap();
        let shown = NumberText::format(converted, Some(2));
        let expected =
            converted.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        prop_assert_eq!(NumberText::parse(&shown), expected);
    }

    /// formatted -> canonical -> formatted is idempotent.
    #[test]
    fn prop_format_is_idempotent(value in amount()) {
        let first = NumberText::format(value, None);
        let canonical = NumberText::canonical(NumberText::parse(&first));
        let second = NumberText::format(NumberText::parse(&canonical), None);
        prop_assert_eq!(first, second);
    }

    /// Typed input survives the live re-format unchanged in value.
    #[test]
    fn prop_format_input_preserves_value(raw in "[0-9 ,.a-z]{0,24}") {
        let reformatted = NumberText::format_input(&raw);
        prop_assert_eq!(NumberText::parse(&reformatted), NumberText::parse(&raw));
    }

    /// Parsing never panics and never goes negative.
    #[test]
    fn prop_parse_is_total(raw in "\\PC{0,40}") {
        prop_assert!(NumberText::parse(&raw) >= Decimal::ZERO);
    }

    /// Converting a currency to itself returns the amount exactly.
    #[test]
    fn prop_identity(value in amount(), rates in rate_table(), x in known_code()) {
        let result = ConversionCalculator::convert(value, &x, &x, &rates).unwrap();
        prop_assert_eq!(result, value);
        prop_assert_eq!(result.scale(), value.scale());
    }

    /// unit_rate(A, B) * unit_rate(B, A) is one within decimal precision.
    #[test]
    fn prop_symmetry(rates in rate_table(), a in known_code(), b in known_code()) {
        let forward = ConversionCalculator::unit_rate(&a, &b, &rates).unwrap();
        let backward = ConversionCalculator::unit_rate(&b, &a, &rates).unwrap();
        let drift = (forward * backward - Decimal::ONE).abs();
        prop_assert!(drift < Decimal::new(1, 12), "drift {} for {}/{}", drift, a, b);
    }

    /// Zero converts to zero.
    #[test]
    fn prop_zero_stays_zero(rates in rate_table(), a in known_code(), b in known_code()) {
        let result = ConversionCalculator::convert(NumberText::parse(""), &a, &b, &rates).unwrap();
        prop_assert!(result.is_zero());
    }

    /// The base self-rate is exactly one after any accepted refresh.
    #[test]
    fn prop_base_rate_is_one(rates in rate_table()) {
        prop_assert_eq!(rates.get(&code("EUR")), Some(Decimal::ONE));
    }

    /// A rejected refresh leaves every lookup unchanged.
    #[test]
    fn prop_rejected_refresh_is_atomic(
        rates in rate_table(),
        bad in -1_000i64..=0,
    ) {
        let before = rates.clone();
        let raw = [("EUR", Decimal::ONE), ("USD", Decimal::new(bad, 2))];
        prop_assert!(rates.refresh(raw).is_err());
        for c in CODES {
            prop_assert_eq!(rates.get(&code(c)), before.get(&code(c)));
        }
    }

    /// Selecting a known code only changes the selected role.
    #[test]
    fn prop_select_changes_one_role(
        rates in rate_table(),
        source in known_code(),
        target in known_code(),
        pick in known_code(),
    ) {
        let pair = PreferencePair::new(source.clone(), target.clone());
        let next = pair.select(Role::Target, &pick, &rates).unwrap();
        prop_assert_eq!(next.source(), &source);
        prop_assert_eq!(next.target(), &pick);
        prop_assert_eq!(next.swap().swap(), next);
    }
}
