//! Common types used across the application.

pub mod currency_code;

pub use currency_code::{CurrencyCode, InvalidCurrencyCode};
