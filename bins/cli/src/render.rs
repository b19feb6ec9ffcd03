//! Plain-text output.

use devise_core::currency::{CurrencyCatalog, DisplaySnapshot, PreferencePair};
use devise_shared::CurrencyCode;

/// Prints a conversion.
pub fn snapshot(snapshot: &DisplaySnapshot) {
    let typed = if snapshot.source.formatted.is_empty() {
        "0"
    } else {
        snapshot.source.formatted.as_str()
    };
    println!(
        "{typed} {} = {} {}",
        snapshot.source_symbol, snapshot.converted.formatted, snapshot.target_symbol
    );
    if let Some(line) = &snapshot.unit_rate_line {
        println!("{line}");
    }
}

/// Prints the active pair.
pub fn pair(pair: &PreferencePair, catalog: &CurrencyCatalog) {
    println!(
        "{} ({}) -> {} ({})",
        pair.source(),
        catalog.name_or_code(pair.source()),
        pair.target(),
        catalog.name_or_code(pair.target())
    );
}

/// Prints the currencies usable right now.
pub fn available(codes: &[CurrencyCode], catalog: &CurrencyCatalog, active: &PreferencePair) {
    for code in codes {
        let marker = if code == active.source() || code == active.target() {
            '*'
        } else {
            ' '
        };
        println!(
            "{marker} {code}  {:<4} {}",
            catalog.symbol_or_code(code),
            catalog.name_or_code(code)
        );
    }
}
