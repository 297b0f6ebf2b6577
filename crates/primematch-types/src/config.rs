//! Configuration for the matching circuits.
//!
//! Circuits have a fixed shape, so batch sizes, the symbol set and the
//! quantity bounds are fixed before any round runs. [`MatchConfig::validate`]
//! is the single place where they are checked.

use serde::{Deserialize, Serialize};

use crate::{PrimematchError, QuantityBounds, Result, Symbol, constants};

/// How a batch with several orders on the same (symbol, side) is treated.
///
/// The row/column aggregation counts every compatible counter-order, so a
/// batch with duplicates can report an order as filled beyond its own
/// quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Reject the batch at sealing time.
    #[default]
    Reject,
    /// Accept the batch; totals may exceed order quantities.
    Allow,
}

/// Configuration of the typed multi-symbol matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Number of bank orders per round (`N_bank`).
    pub bank_orders: usize,
    /// Number of client orders per round (`N_client`).
    pub client_orders: usize,
    /// Number of symbols traded, taken from the front of [`Symbol::ALL`].
    pub symbols: usize,
    /// Accepted order quantities.
    #[serde(flatten)]
    pub bounds: QuantityBounds,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            bank_orders: constants::DEFAULT_BANK_ORDERS,
            client_orders: constants::DEFAULT_CLIENT_ORDERS,
            symbols: constants::DEFAULT_SYMBOL_COUNT,
            bounds: QuantityBounds::default(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl MatchConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every configuration invariant.
    ///
    /// # Errors
    /// `Configuration` if the bounds are invalid, a batch size is zero or
    /// above [`constants::MAX_ORDERS_PER_BATCH`], the symbol count is
    /// outside `1..=SYMBOL_CAPACITY`, or a row/column total could need
    /// more than [`constants::MAX_CIRCUIT_BIT_WIDTH`] bits.
    pub fn validate(&self) -> Result<()> {
        self.bounds.validate()?;
        check_batch_size("bank", self.bank_orders)?;
        check_batch_size("client", self.client_orders)?;
        check_symbol_count(self.symbols)?;

        let total = self.accumulator_bound().ok_or_else(|| {
            PrimematchError::Configuration("accumulator bound overflows u64".to_string())
        })?;
        check_width(total)
    }

    /// Largest value a per-order filled total can take:
    /// `max(N_bank, N_client) × MAX_QTY`.
    #[must_use]
    pub fn accumulator_bound(&self) -> Option<u64> {
        let widest = u64::try_from(self.bank_orders.max(self.client_orders)).ok()?;
        widest.checked_mul(self.bounds.max_qty)
    }

    /// The symbols this configuration trades.
    #[must_use]
    pub fn symbol_set(&self) -> &'static [Symbol] {
        &Symbol::ALL[..self.symbols.min(constants::SYMBOL_CAPACITY)]
    }

    /// Whether `symbol` belongs to the configured set.
    #[must_use]
    pub fn trades(&self, symbol: Symbol) -> bool {
        symbol.index() < self.symbols
    }
}

/// Configuration of the single-symbol slot matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleSymbolConfig {
    /// Number of symbols; the slot vector holds two slots per symbol.
    pub symbols: usize,
    /// Accepted quantities of an occupied slot. Zero marks an empty slot.
    #[serde(flatten)]
    pub bounds: QuantityBounds,
}

impl Default for SingleSymbolConfig {
    fn default() -> Self {
        Self {
            symbols: constants::DEFAULT_SLOT_SYMBOLS,
            bounds: QuantityBounds {
                min_qty: constants::DEFAULT_SLOT_MIN_QTY,
                max_qty: constants::DEFAULT_SLOT_MAX_QTY,
            },
        }
    }
}

impl SingleSymbolConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.bounds.validate()?;
        check_symbol_count(self.symbols)?;
        check_width(self.bounds.max_qty)
    }

    /// Length of the slot vector.
    #[must_use]
    pub fn slots(&self) -> usize {
        self.symbols * 2
    }

    /// Check a slot quantity: zero (empty) or within bounds.
    pub fn check_slot(&self, quantity: u64) -> Result<()> {
        if quantity == 0 {
            return Ok(());
        }
        self.bounds.check(quantity)
    }
}

fn check_batch_size(party: &str, size: usize) -> Result<()> {
    if size == 0 || size > constants::MAX_ORDERS_PER_BATCH {
        return Err(PrimematchError::Configuration(format!(
            "{party} batch size must be in 1..={}, got {size}",
            constants::MAX_ORDERS_PER_BATCH
        )));
    }
    Ok(())
}

fn check_symbol_count(symbols: usize) -> Result<()> {
    if symbols == 0 || symbols > constants::SYMBOL_CAPACITY {
        return Err(PrimematchError::Configuration(format!(
            "symbol count must be in 1..={}, got {symbols}",
            constants::SYMBOL_CAPACITY
        )));
    }
    Ok(())
}

fn check_width(max_value: u64) -> Result<()> {
    let required = bit_width(max_value);
    if required > constants::MAX_CIRCUIT_BIT_WIDTH {
        return Err(PrimematchError::BitWidthExceeded {
            required,
            limit: constants::MAX_CIRCUIT_BIT_WIDTH,
        });
    }
    Ok(())
}

/// Number of bits needed to represent `value` (at least one).
#[must_use]
pub fn bit_width(value: u64) -> u32 {
    (u64::BITS - value.leading_zeros()).max(1)
}
