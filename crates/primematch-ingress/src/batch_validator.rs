//! Batch validator: the hard gate every batch passes before sealing.
//!
//! The circuit itself never rejects anything; it computes a fill for
//! whatever integers it is given. Everything that makes those integers
//! meaningful is checked here:
//!
//! - the batch has exactly the configured length
//! - every quantity is inside the configured bounds
//! - every symbol is inside the configured symbol set
//! - under [`DuplicatePolicy::Reject`], no (symbol, side) pair repeats
//!
//! A failed check rejects the whole batch.

use std::collections::HashSet;

use primematch_types::{DuplicatePolicy, MatchConfig, Order, Party, PrimematchError, Result};

/// Validates batches against a [`MatchConfig`].
#[derive(Debug, Clone)]
pub struct BatchValidator {
    config: MatchConfig,
}

impl BatchValidator {
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Configured batch length for `party`.
    #[must_use]
    pub fn batch_size(&self, party: Party) -> usize {
        match party {
            Party::Bank => self.config.bank_orders,
            Party::Client => self.config.client_orders,
        }
    }

    /// Check one order in isolation.
    ///
    /// # Errors
    /// `QuantityOutOfRange` or `SymbolOutOfRange`.
    pub fn validate_order(&self, order: &Order) -> Result<()> {
        self.config.bounds.check(order.quantity())?;
        if !self.config.trades(order.symbol()) {
            return Err(PrimematchError::SymbolOutOfRange {
                symbol: order.symbol(),
                count: self.config.symbols,
            });
        }
        Ok(())
    }

    /// Check a full batch.
    ///
    /// # Errors
    /// The first failed check, in the order listed in the module docs.
    pub fn validate_batch(&self, party: Party, orders: &[Order]) -> Result<()> {
        let result = self.check_batch(party, orders);
        if let Err(ref err) = result {
            tracing::warn!(%party, orders = orders.len(), error = %err, "Batch rejected");
        }
        result
    }

    fn check_batch(&self, party: Party, orders: &[Order]) -> Result<()> {
        let expected = self.batch_size(party);
        if orders.len() != expected {
            return Err(PrimematchError::BatchSizeMismatch {
                party,
                expected,
                actual: orders.len(),
            });
        }

        for order in orders {
            self.validate_order(order)?;
        }

        if self.config.duplicate_policy == DuplicatePolicy::Reject {
            let mut seen = HashSet::with_capacity(orders.len());
            for order in orders {
                if !seen.insert((order.symbol(), order.side())) {
                    return Err(PrimematchError::DuplicateSymbolSide {
                        party,
                        symbol: order.symbol(),
                        side: order.side(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use primematch_types::{QuantityBounds, Side, Symbol};

    use super::*;

    fn config(policy: DuplicatePolicy) -> MatchConfig {
        MatchConfig {
            bank_orders: 2,
            client_orders: 1,
            symbols: 3,
            bounds: QuantityBounds::new(5, 60).unwrap(),
            duplicate_policy: policy,
        }
    }

    #[test]
    fn accepts_valid_batch() {
        let v = BatchValidator::new(config(DuplicatePolicy::Reject));
        let bank = [
            Order::dummy(Side::Sell, Symbol::A, 30),
            Order::dummy(Side::Buy, Symbol::A, 12),
        ];
        v.validate_batch(Party::Bank, &bank).unwrap();
    }

    #[test]
    fn wrong_length_rejected() {
        let v = BatchValidator::new(config(DuplicatePolicy::Reject));
        let err = v
            .validate_batch(Party::Client, &[
                Order::dummy(Side::Buy, Symbol::A, 20),
                Order::dummy(Side::Buy, Symbol::B, 20),
            ])
            .unwrap_err();
        assert!(matches!(
            err,
            PrimematchError::BatchSizeMismatch {
                party: Party::Client,
                expected: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn symbol_outside_set_rejected() {
        let v = BatchValidator::new(config(DuplicatePolicy::Reject));
        let err = v
            .validate_batch(Party::Client, &[Order::dummy(Side::Buy, Symbol::D, 20)])
            .unwrap_err();
        assert!(matches!(
            err,
            PrimematchError::SymbolOutOfRange {
                symbol: Symbol::D,
                count: 3
            }
        ));
    }

    #[test]
    fn quantity_outside_bounds_rejected() {
        let v = BatchValidator::new(config(DuplicatePolicy::Allow));
        let err = v
            .validate_order(&Order::dummy(Side::Buy, Symbol::A, 61))
            .unwrap_err();
        assert!(matches!(err, PrimematchError::QuantityOutOfRange { quantity: 61, .. }));
    }

    #[test]
    fn duplicate_symbol_side_rejected_under_reject() {
        let v = BatchValidator::new(config(DuplicatePolicy::Reject));
        let bank = [
            Order::dummy(Side::Sell, Symbol::B, 30),
            Order::dummy(Side::Sell, Symbol::B, 12),
        ];
        let err = v.validate_batch(Party::Bank, &bank).unwrap_err();
        assert!(matches!(
            err,
            PrimematchError::DuplicateSymbolSide {
                party: Party::Bank,
                symbol: Symbol::B,
                side: Side::Sell
            }
        ));
    }

    #[test]
    fn duplicate_symbol_side_accepted_under_allow() {
        let v = BatchValidator::new(config(DuplicatePolicy::Allow));
        let bank = [
            Order::dummy(Side::Sell, Symbol::B, 30),
            Order::dummy(Side::Sell, Symbol::B, 12),
        ];
        v.validate_batch(Party::Bank, &bank).unwrap();
    }

    #[test]
    fn same_symbol_opposite_sides_is_not_a_duplicate() {
        let v = BatchValidator::new(config(DuplicatePolicy::Reject));
        let bank = [
            Order::dummy(Side::Sell, Symbol::C, 30),
            Order::dummy(Side::Buy, Symbol::C, 12),
        ];
        v.validate_batch(Party::Bank, &bank).unwrap();
    }
}
