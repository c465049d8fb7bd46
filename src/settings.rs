//! User settings: currencies, exchange rates, and the budget cap.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::currency::{Currency, RateTable};

/// The persisted user settings.
///
/// Stored as a JSON blob with camelCase keys. Fields missing from a stored
/// blob (e.g. one written by an older version) fall back to their defaults
/// rather than failing the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// The currency amounts are stored and budgeted in.
    pub base_currency: Currency,
    /// The currency amounts are shown in.
    pub display_currency: Currency,
    /// Units of the base currency per one unit of each foreign currency.
    pub exchange_rates: BTreeMap<Currency, f64>,
    /// The spending cap used for budget status. Zero means no cap.
    pub budget_cap: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_currency: Currency::Usd,
            display_currency: Currency::Usd,
            exchange_rates: BTreeMap::new(),
            budget_cap: 0.0,
        }
    }
}

impl Settings {
    /// Snapshot the exchange rates for conversion.
    pub fn rate_table(&self) -> RateTable {
        RateTable::new(self.base_currency, self.exchange_rates.clone())
    }

    /// Apply a partial update, leaving unset fields unchanged.
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(base_currency) = update.base_currency {
            self.base_currency = base_currency;
        }

        if let Some(display_currency) = update.display_currency {
            self.display_currency = display_currency;
        }

        if let Some(exchange_rates) = update.exchange_rates {
            self.exchange_rates = exchange_rates;
        }

        if let Some(budget_cap) = update.budget_cap {
            self.budget_cap = budget_cap;
        }
    }
}

/// A partial settings change. Only supplied fields are applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SettingsUpdate {
    /// Replace the base currency.
    pub base_currency: Option<Currency>,
    /// Replace the display currency.
    pub display_currency: Option<Currency>,
    /// Replace the whole exchange-rate table.
    pub exchange_rates: Option<BTreeMap<Currency, f64>>,
    /// Replace the budget cap. Zero clears it.
    pub budget_cap: Option<f64>,
}
