//! Slot layout for the single-symbol matcher.
//!
//! The slot vector has two slots per symbol, each pre-assigned to one
//! direction of trade:
//!
//! ```text
//! slot s              bank Buy  / client Sell of symbol s
//! slot symbols + s    bank Sell / client Buy  of symbol s
//! ```
//!
//! A bank order and a client order in the same slot are compatible by
//! construction. Unused slots hold `0`.

use primematch_types::{
    Order, Party, PrimematchError, Result, Side, SingleSymbolConfig, Symbol,
};

/// Packs orders into fixed slot vectors.
#[derive(Debug, Clone, Copy)]
pub struct SlotLayout {
    config: SingleSymbolConfig,
}

impl SlotLayout {
    /// # Errors
    /// `Configuration` if `config` does not validate.
    pub fn new(config: SingleSymbolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn slots(&self) -> usize {
        self.config.slots()
    }

    /// Slot for a trade in `symbol` where the bank is on `bank_side`.
    ///
    /// # Errors
    /// `SymbolOutOfRange` if `symbol` is outside the configured set.
    pub fn slot_of(&self, symbol: Symbol, bank_side: Side) -> Result<usize> {
        if symbol.index() >= self.config.symbols {
            return Err(PrimematchError::SymbolOutOfRange {
                symbol,
                count: self.config.symbols,
            });
        }
        Ok(match bank_side {
            Side::Buy => symbol.index(),
            Side::Sell => self.config.symbols + symbol.index(),
        })
    }

    /// Inverse of [`Self::slot_of`].
    #[must_use]
    pub fn describe(&self, slot: usize) -> Option<(Symbol, Side)> {
        let symbols = self.config.symbols;
        if slot >= self.slots() {
            return None;
        }
        let side = if slot < symbols { Side::Buy } else { Side::Sell };
        Symbol::from_index(slot % symbols).map(|symbol| (symbol, side))
    }

    /// Pack the bank's orders.
    ///
    /// # Errors
    /// See [`Self::pack`].
    pub fn pack_bank(&self, orders: &[Order]) -> Result<Vec<u64>> {
        self.pack(Party::Bank, orders)
    }

    /// Pack the client's orders. A client order sits in the slot of the
    /// bank side opposite to its own.
    ///
    /// # Errors
    /// See [`Self::pack`].
    pub fn pack_client(&self, orders: &[Order]) -> Result<Vec<u64>> {
        self.pack(Party::Client, orders)
    }

    /// Pack `party`'s orders into a slot vector.
    ///
    /// # Errors
    /// `SymbolOutOfRange`, `QuantityOutOfRange`, or `SlotOccupied` if two
    /// orders map to the same slot.
    pub fn pack(&self, party: Party, orders: &[Order]) -> Result<Vec<u64>> {
        let mut slots = vec![0u64; self.slots()];
        for order in orders {
            let bank_side = match party {
                Party::Bank => order.side(),
                Party::Client => order.side().opposite(),
            };
            let slot = self.slot_of(order.symbol(), bank_side)?;
            self.config.bounds.check(order.quantity())?;
            if slots[slot] != 0 {
                return Err(PrimematchError::SlotOccupied { party, slot });
            }
            slots[slot] = order.quantity();
        }
        Ok(slots)
    }
}
