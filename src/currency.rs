//! Currency codes, display formatting, and exchange-rate conversion.

use std::{collections::BTreeMap, fmt};

use numfmt::{Formatter, Precision};
use serde::{Deserialize, Serialize};

/// The currencies the tracker can display and convert between.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// United States dollar.
    #[default]
    Usd,
    /// Euro.
    Eur,
    /// Rwandan franc.
    Rwf,
}

impl Currency {
    /// Every supported currency, in display order.
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Eur, Currency::Rwf];

    /// The ISO 4217 style code, e.g. "USD".
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Rwf => "RWF",
        }
    }

    /// The symbol shown ahead of formatted amounts.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Rwf => "FRw",
        }
    }

    /// Look up a currency by its code, e.g. "EUR".
    pub fn from_code(code: &str) -> Option<Currency> {
        match code {
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            "RWF" => Some(Currency::Rwf),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The display symbol for a currency code, falling back to "$" for codes the
/// tracker does not know.
pub fn symbol_for(code: &str) -> &'static str {
    Currency::from_code(code).map_or("$", Currency::symbol)
}

/// A point-in-time snapshot of exchange rates against a base currency.
///
/// Rates are expressed as units of the base currency per one unit of the
/// foreign currency; the base itself always converts at 1. Conversions take
/// the table as a value rather than reading shared state, so a conversion is
/// reproducible for as long as the snapshot is held.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: Currency,
    rates: BTreeMap<Currency, f64>,
}

impl RateTable {
    /// Create a table of `rates` against `base`.
    pub fn new(base: Currency, rates: BTreeMap<Currency, f64>) -> Self {
        Self { base, rates }
    }

    /// The currency the rates are expressed against.
    pub fn base(&self) -> Currency {
        self.base
    }

    fn rate(&self, currency: Currency) -> Option<f64> {
        if currency == self.base {
            return Some(1.0);
        }

        match self.rates.get(&currency) {
            Some(&rate) if rate > 0.0 => Some(rate),
            _ => None,
        }
    }

    /// Convert `amount` between two currencies.
    ///
    /// The amount is normalized into the base currency by multiplying by the
    /// source's rate, then divided by the target's rate. Converting a
    /// currency to itself is the identity. A currency missing from the table
    /// (or carrying a non-positive rate) passes the amount through unchanged
    /// rather than guessing.
    pub fn convert(&self, amount: f64, from: Currency, to: Currency) -> f64 {
        if from == to {
            return amount;
        }

        let Some(from_rate) = self.rate(from) else {
            return amount;
        };
        let Some(to_rate) = self.rate(to) else {
            return amount;
        };

        amount * from_rate / to_rate
    }
}

/// Format an amount for display with the currency's symbol, thousands
/// separators, and exactly two decimal places, e.g. `-$1,234.50`.
pub fn format_amount(amount: f64, currency: Currency) -> String {
    let symbol = currency.symbol();

    if amount == 0.0 {
        // numfmt hardcodes zero as "0", so the zero string is fixed here.
        return format!("{symbol}0.00");
    }

    let prefix = if amount < 0.0 {
        format!("-{symbol}")
    } else {
        symbol.to_owned()
    };

    let Ok(formatter) = Formatter::currency(&prefix) else {
        return format!("{prefix}{:.2}", amount.abs());
    };
    let formatter = formatter.precision(Precision::Decimals(2));

    let mut formatted = formatter.fmt_string(amount.abs());

    // numfmt omits the last trailing zero, so we must add it ourselves.
    // For example, "12.30" is rendered as "$12.3" so we append "0".
    if formatted.as_bytes()[formatted.len() - 3] != b'.' {
        formatted = format!("{formatted}0");
    }

    formatted
}
