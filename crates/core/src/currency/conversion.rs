//! Currency conversion logic.
//!
//! CRITICAL: Conversion goes through the base currency in one hop:
//! - amount / rate(from) gives the amount in base
//! - that times rate(to) gives the result
//! - NO rounding here; display rounding happens in `NumberText::format`

use devise_shared::CurrencyCode;
use rust_decimal::Decimal;

use super::error::FxError;
use super::rate_table::RateTable;

/// Pure conversion between two currencies of one rate table.
pub struct ConversionCalculator;

impl ConversionCalculator {
    /// Converts `amount` of `from` into `to`.
    ///
    /// Both codes must be in `rates`. Converting a currency to itself
    /// returns `amount` unchanged.
    ///
    /// # Errors
    ///
    /// [`FxError::UnknownCurrency`] if either code is absent,
    /// [`FxError::Overflow`] if the result does not fit in a `Decimal`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use devise_core::currency::{ConversionCalculator, RateTable};
    /// use devise_shared::CurrencyCode;
    ///
    /// let eur = CurrencyCode::new("EUR").unwrap();
    /// let usd = CurrencyCode::new("USD").unwrap();
    /// let rates = RateTable::from_raw(eur.clone(), [("EUR", dec!(1)), ("USD", dec!(1.1))]).unwrap();
    ///
    /// let result = ConversionCalculator::convert(dec!(100), &eur, &usd, &rates).unwrap();
    /// assert_eq!(result, dec!(110));
    /// ```
    pub fn convert(
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
        rates: &RateTable,
    ) -> Result<Decimal, FxError> {
        let from_rate = rates.require(from)?;
        let to_rate = rates.require(to)?;

        if from == to {
            return Ok(amount);
        }

        let overflow = || FxError::Overflow {
            from: from.clone(),
            to: to.clone(),
        };
        let in_base = amount.checked_div(from_rate).ok_or_else(overflow)?;
        in_base.checked_mul(to_rate).ok_or_else(overflow)
    }

    /// Value of one unit of `from` expressed in `to`.
    ///
    /// # Errors
    ///
    /// Same as [`ConversionCalculator::convert`].
    pub fn unit_rate(
        from: &CurrencyCode,
        to: &CurrencyCode,
        rates: &RateTable,
    ) -> Result<Decimal, FxError> {
        Self::convert(Decimal::ONE, from, to, rates)
    }
}
