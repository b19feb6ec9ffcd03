//! Static reference data for the currencies offered in pickers.
//!
//! This is lookup data only. Whether a currency can actually be used is
//! decided by the rate table.

use devise_shared::CurrencyCode;
use serde::Serialize;

/// Display data for one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyInfo {
    /// Three-letter code.
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Symbol shown next to amounts.
    pub symbol: &'static str,
    /// Lowercase country code used for the flag image.
    pub country: &'static str,
}

const fn info(
    code: &'static str,
    name: &'static str,
    symbol: &'static str,
    country: &'static str,
) -> CurrencyInfo {
    CurrencyInfo {
        code,
        name,
        symbol,
        country,
    }
}

/// Supported currencies, in picker order.
pub static DEFAULT_CURRENCIES: &[CurrencyInfo] = &[
    info("EUR", "Euro", "€", "eu"),
    info("USD", "Dollar américain", "$", "us"),
    info("GBP", "Livre sterling", "£", "gb"),
    info("JPY", "Yen japonais", "¥", "jp"),
    info("CHF", "Franc suisse", "CHF", "ch"),
    info("CAD", "Dollar canadien", "C$", "ca"),
    info("AUD", "Dollar australien", "A$", "au"),
    info("CNY", "Yuan chinois", "¥", "cn"),
    info("INR", "Roupie indienne", "₹", "in"),
    info("BRL", "Real brésilien", "R$", "br"),
    info("RUB", "Rouble russe", "₽", "ru"),
    info("KRW", "Won sud-coréen", "₩", "kr"),
    info("MXN", "Peso mexicain", "$", "mx"),
    info("ZAR", "Rand sud-africain", "R", "za"),
    info("SEK", "Couronne suédoise", "kr", "se"),
    info("NOK", "Couronne norvégienne", "kr", "no"),
    info("DKK", "Couronne danoise", "kr", "dk"),
    info("PLN", "Zloty polonais", "zł", "pl"),
    info("THB", "Baht thaïlandais", "฿", "th"),
    info("IDR", "Roupie indonésienne", "Rp", "id"),
    info("HUF", "Forint hongrois", "Ft", "hu"),
    info("CZK", "Couronne tchèque", "Kč", "cz"),
    info("ILS", "Shekel israélien", "₪", "il"),
    info("CLP", "Peso chilien", "$", "cl"),
    info("PHP", "Peso philippin", "₱", "ph"),
    info("AED", "Dirham des EAU", "د.إ", "ae"),
    info("COP", "Peso colombien", "$", "co"),
    info("SAR", "Riyal saoudien", "﷼", "sa"),
    info("MYR", "Ringgit malaisien", "RM", "my"),
    info("RON", "Leu roumain", "lei", "ro"),
];

/// Country used for the flag when a currency has no entry.
const FALLBACK_COUNTRY: &str = "eu";

/// Injected, immutable currency reference table.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyCatalog {
    entries: &'static [CurrencyInfo],
}

impl Default for CurrencyCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCIES)
    }
}

impl CurrencyCatalog {
    /// Creates a catalog over `entries`; their order is the picker order.
    #[must_use]
    pub const fn new(entries: &'static [CurrencyInfo]) -> Self {
        Self { entries }
    }

    /// All entries in picker order.
    #[must_use]
    pub fn entries(&self) -> &'static [CurrencyInfo] {
        self.entries
    }

    /// Entry for `code`, if any.
    #[must_use]
    pub fn lookup(&self, code: &CurrencyCode) -> Option<&'static CurrencyInfo> {
        self.entries.iter().find(|info| info.code == code.as_str())
    }

    /// Codes in picker order; entries with malformed codes are skipped.
    #[must_use]
    pub fn codes(&self) -> Vec<CurrencyCode> {
        self.entries
            .iter()
            .filter_map(|info| CurrencyCode::new(info.code).ok())
            .collect()
    }

    /// Display name, or the code itself when unknown.
    #[must_use]
    pub fn name_or_code<'a>(&self, code: &'a CurrencyCode) -> &'a str {
        self.lookup(code).map_or(code.as_str(), |info| info.name)
    }

    /// Symbol, or the code itself when unknown.
    #[must_use]
    pub fn symbol_or_code<'a>(&self, code: &'a CurrencyCode) -> &'a str {
        self.lookup(code).map_or(code.as_str(), |info| info.symbol)
    }

    /// Flag image URL for `code`.
    #[must_use]
    pub fn flag_url(&self, code: &CurrencyCode) -> String {
        let country = self.lookup(code).map_or(FALLBACK_COUNTRY, |info| info.country);
        format!("https://flagcdn.com/72x54/{country}.png")
    }
}
