//! Batch sealer: produces the immutable `SealedBatch` a matcher consumes.
//!
//! Sealing validates the batch, then commits to it with a SHA-256 hash
//! over the round, the party and every order in position order. Orders
//! are never reordered: position is the only link between an order and
//! its result entry.

use chrono::Utc;
use primematch_types::{MatchConfig, Order, Party, PrimematchError, Result, RoundId, SealedBatch};
use sha2::{Digest, Sha256};

use crate::{BatchValidator, PendingBuffer};

/// Seals validated orders into a [`SealedBatch`].
#[derive(Debug, Clone)]
pub struct BatchSealer {
    validator: BatchValidator,
}

impl BatchSealer {
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self {
            validator: BatchValidator::new(config),
        }
    }

    #[must_use]
    pub fn validator(&self) -> &BatchValidator {
        &self.validator
    }

    /// A pending buffer sized for `party` under this sealer's config.
    #[must_use]
    pub fn buffer(&self, party: Party) -> PendingBuffer {
        PendingBuffer::new(party, self.validator.batch_size(party))
    }

    /// Validate and seal `orders` for `party` in `round`.
    ///
    /// # Errors
    /// Any [`BatchValidator::validate_batch`] failure.
    pub fn seal(&self, round: RoundId, party: Party, orders: Vec<Order>) -> Result<SealedBatch> {
        self.validator.validate_batch(party, &orders)?;
        Ok(commit(round, party, orders))
    }

    /// Seal and drain a pending buffer.
    ///
    /// The buffered orders are validated before the buffer is touched. On a
    /// validation failure the buffer stays unsealed with its orders intact,
    /// so the caller can inspect them and [`PendingBuffer::reset`] the round.
    ///
    /// # Errors
    /// - `BufferAlreadySealed` if the buffer was sealed earlier
    /// - any [`BatchValidator::validate_batch`] failure
    pub fn seal_buffer(&self, round: RoundId, buffer: &mut PendingBuffer) -> Result<SealedBatch> {
        if buffer.is_sealed() {
            return Err(PrimematchError::BufferAlreadySealed);
        }
        self.validator.validate_batch(buffer.party(), buffer.orders())?;
        buffer.seal()?;
        let orders = buffer.drain()?;
        Ok(commit(round, buffer.party(), orders))
    }
}

fn commit(round: RoundId, party: Party, orders: Vec<Order>) -> SealedBatch {
    let batch_hash = compute_batch_hash(round, party, &orders);
    tracing::debug!(
        %round,
        %party,
        orders = orders.len(),
        batch_hash = %hex::encode(&batch_hash[..8]),
        "Batch sealed"
    );
    SealedBatch {
        round,
        party,
        orders,
        batch_hash,
        sealed_at: Utc::now(),
    }
}

/// SHA-256 commitment over a batch.
///
/// Commits to the round, the party tag, the batch length and each order's
/// side code, symbol code and quantity in position order.
#[must_use]
pub fn compute_batch_hash(round: RoundId, party: Party, orders: &[Order]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"primematch:batch:v1:");
    hasher.update(round.0.to_le_bytes());
    hasher.update([party.tag()]);
    hasher.update((orders.len() as u64).to_le_bytes());

    for order in orders {
        hasher.update(order.side().code().to_le_bytes());
        hasher.update(order.symbol().code().to_le_bytes());
        hasher.update(order.quantity().to_le_bytes());
    }

    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Recompute a sealed batch's commitment and compare.
#[must_use]
pub fn verify_batch_hash(batch: &SealedBatch) -> bool {
    compute_batch_hash(batch.round, batch.party, &batch.orders) == batch.batch_hash
}

/// Combined commitment over the two batches of a round.
#[must_use]
pub fn compute_input_hash(bank: &SealedBatch, client: &SealedBatch) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"primematch:input:v1:");
    hasher.update(bank.batch_hash);
    hasher.update(client.batch_hash);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

#[cfg(test)]
mod tests {
    use primematch_types::{DuplicatePolicy, QuantityBounds, Side, Symbol};

    use super::*;

    fn sealer() -> BatchSealer {
        BatchSealer::new(MatchConfig {
            bank_orders: 2,
            client_orders: 1,
            symbols: 4,
            bounds: QuantityBounds::new(5, 60).unwrap(),
            duplicate_policy: DuplicatePolicy::Reject,
        })
    }

    fn bank_orders() -> Vec<Order> {
        vec![
            Order::dummy(Side::Sell, Symbol::A, 30),
            Order::dummy(Side::Buy, Symbol::B, 12),
        ]
    }

    #[test]
    fn seal_keeps_position_order() {
        let batch = sealer().seal(RoundId(1), Party::Bank, bank_orders()).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.orders[0].symbol(), Symbol::A);
        assert_eq!(batch.orders[1].symbol(), Symbol::B);
        assert_eq!(batch.round, RoundId(1));
        assert_ne!(batch.batch_hash, [0u8; 32]);
    }

    #[test]
    fn batch_hash_is_deterministic() {
        let s = sealer();
        let a = s.seal(RoundId(1), Party::Bank, bank_orders()).unwrap();
        let b = s.seal(RoundId(1), Party::Bank, bank_orders()).unwrap();
        assert_eq!(a.batch_hash, b.batch_hash);
    }

    #[test]
    fn hash_commits_to_round_party_and_positions() {
        let orders = bank_orders();
        let base = compute_batch_hash(RoundId(1), Party::Bank, &orders);
        assert_ne!(base, compute_batch_hash(RoundId(2), Party::Bank, &orders));
        assert_ne!(base, compute_batch_hash(RoundId(1), Party::Client, &orders));
        let swapped = vec![orders[1], orders[0]];
        assert_ne!(base, compute_batch_hash(RoundId(1), Party::Bank, &swapped));
    }

    #[test]
    fn verify_and_tamper() {
        let mut batch = sealer().seal(RoundId(3), Party::Bank, bank_orders()).unwrap();
        assert!(verify_batch_hash(&batch));
        batch.batch_hash[0] ^= 0xFF;
        assert!(!verify_batch_hash(&batch));
    }

    #[test]
    fn invalid_batch_is_not_sealed() {
        let orders = vec![
            Order::dummy(Side::Sell, Symbol::A, 30),
            Order::dummy(Side::Sell, Symbol::A, 12),
        ];
        let err = sealer().seal(RoundId(1), Party::Bank, orders).unwrap_err();
        assert!(matches!(err, PrimematchError::DuplicateSymbolSide { .. }));
    }

    #[test]
    fn seal_buffer_round_trip() {
        let s = sealer();
        let mut buf = s.buffer(Party::Client);
        assert_eq!(buf.batch_size(), 1);
        buf.push(Order::dummy(Side::Buy, Symbol::A, 20)).unwrap();
        let batch = s.seal_buffer(RoundId(5), &mut buf).unwrap();
        assert_eq!(batch.party, Party::Client);
        assert_eq!(batch.len(), 1);
        assert!(buf.is_empty());
        assert!(buf.is_sealed());
    }

    #[test]
    fn rejected_buffer_keeps_orders_and_can_retry() {
        let s = sealer();
        let mut buf = s.buffer(Party::Bank);
        buf.push(Order::dummy(Side::Sell, Symbol::A, 30)).unwrap();
        buf.push(Order::dummy(Side::Sell, Symbol::A, 12)).unwrap();

        let err = s.seal_buffer(RoundId(1), &mut buf).unwrap_err();
        assert!(matches!(err, PrimematchError::DuplicateSymbolSide { .. }));
        assert_eq!(buf.len(), 2);
        assert!(!buf.is_sealed());
        assert_eq!(buf.orders()[1].quantity(), 12);

        buf.reset();
        buf.push(Order::dummy(Side::Sell, Symbol::A, 30)).unwrap();
        buf.push(Order::dummy(Side::Buy, Symbol::A, 12)).unwrap();
        let batch = s.seal_buffer(RoundId(1), &mut buf).unwrap();
        assert_eq!(batch.len(), 2);
        assert!(verify_batch_hash(&batch));
    }

    #[test]
    fn sealed_buffer_is_not_sealed_twice() {
        let s = sealer();
        let mut buf = s.buffer(Party::Client);
        buf.push(Order::dummy(Side::Buy, Symbol::A, 20)).unwrap();
        s.seal_buffer(RoundId(1), &mut buf).unwrap();
        assert!(matches!(
            s.seal_buffer(RoundId(1), &mut buf),
            Err(PrimematchError::BufferAlreadySealed)
        ));
    }

    #[test]
    fn short_buffer_stays_open() {
        let s = sealer();
        let mut buf = s.buffer(Party::Bank);
        buf.push(Order::dummy(Side::Sell, Symbol::A, 30)).unwrap();
        assert!(matches!(
            s.seal_buffer(RoundId(1), &mut buf),
            Err(PrimematchError::BatchSizeMismatch { expected: 2, actual: 1, .. })
        ));
        assert!(!buf.is_sealed());
        buf.push(Order::dummy(Side::Buy, Symbol::B, 12)).unwrap();
        assert!(s.seal_buffer(RoundId(1), &mut buf).is_ok());
    }

    #[test]
    fn random_rounds_seal_under_default_config() {
        use primematch_types::sample::random_round;
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let config = MatchConfig::default();
        let s = BatchSealer::new(config);
        let mut rng = StdRng::seed_from_u64(9);
        for round in 0..10 {
            let (bank, client) = random_round(&mut rng, &config).unwrap();
            let bank = s.seal(RoundId(round), Party::Bank, bank).unwrap();
            let client = s.seal(RoundId(round), Party::Client, client).unwrap();
            assert!(verify_batch_hash(&bank));
            assert!(verify_batch_hash(&client));
        }
    }

    #[test]
    fn sealed_batch_serializes() {
        let batch = sealer().seal(RoundId(2), Party::Bank, bank_orders()).unwrap();
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["party"], "Bank");
        assert_eq!(json["round"], 2);
        assert_eq!(json["orders"][0]["quantity"], 30);
        assert_eq!(json["orders"][0]["side"], "Sell");
    }

    #[test]
    fn input_hash_depends_on_both_batches() {
        let s = sealer();
        let bank = s.seal(RoundId(1), Party::Bank, bank_orders()).unwrap();
        let client_a = s
            .seal(RoundId(1), Party::Client, vec![Order::dummy(Side::Buy, Symbol::A, 20)])
            .unwrap();
        let client_b = s
            .seal(RoundId(1), Party::Client, vec![Order::dummy(Side::Buy, Symbol::A, 21)])
            .unwrap();
        assert_ne!(
            compute_input_hash(&bank, &client_a),
            compute_input_hash(&bank, &client_b)
        );
    }
}
