//! Batch types: the sealed, immutable input of a matching round and its
//! integer encoding as circuit inputs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Order, Party, RoundId};

// ---------------------------------------------------------------------------
// SealedBatch: one party's immutable input to a round
// ---------------------------------------------------------------------------

/// A sealed, fixed-length batch of one party's orders.
///
/// Position inside `orders` is the only correlation key between an order
/// and its result entry. Once sealed, `batch_hash` commits to the party,
/// the round and every order in position order.
#[derive(Debug, Clone, Serialize)]
pub struct SealedBatch {
    /// The round this batch belongs to.
    pub round: RoundId,
    /// Who submitted the batch.
    pub party: Party,
    /// Orders in submission order.
    pub orders: Vec<Order>,
    /// SHA-256 commitment over the encoded batch.
    pub batch_hash: [u8; 32],
    /// When this batch was sealed.
    pub sealed_at: DateTime<Utc>,
}

impl SealedBatch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Integer encoding of this batch.
    #[must_use]
    pub fn encode(&self) -> EncodedBatch {
        EncodedBatch::from_orders(&self.orders)
    }
}

// ---------------------------------------------------------------------------
// EncodedBatch: circuit input vectors
// ---------------------------------------------------------------------------

/// A batch split into the three parallel integer vectors a circuit consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedBatch {
    /// [`crate::Side::code`] per order.
    pub sides: Vec<u64>,
    /// [`crate::Symbol::code`] per order.
    pub symbols: Vec<u64>,
    /// Quantity per order.
    pub quantities: Vec<u64>,
}

impl EncodedBatch {
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        Self {
            sides: orders.iter().map(|o| o.side().code()).collect(),
            symbols: orders.iter().map(|o| o.symbol().code()).collect(),
            quantities: orders.iter().map(Order::quantity).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}
