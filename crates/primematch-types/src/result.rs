//! Result types produced by the matching engines.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{OrderRef, Party, RoundId, Side, Symbol};

/// Which evaluation path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Direct evaluation on plaintext-equivalent values.
    Simulate,
    /// Evaluation of the compiled circuit by an executor backend.
    Execute,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simulate => write!(f, "SIMULATE"),
            Self::Execute => write!(f, "EXECUTE"),
        }
    }
}

/// Per-order outcome of a round: the original side and symbol, carried
/// through unchanged, and the filled quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultEntry {
    pub side: Side,
    pub symbol: Symbol,
    pub filled_quantity: u64,
}

impl fmt::Display for ResultEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4} {:3} of {}",
            self.side, self.filled_quantity, self.symbol
        )
    }
}

/// Output of one typed matching round.
///
/// `entries` holds the bank block first and the client block second, each
/// in original batch order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub round: RoundId,
    pub mode: ExecutionMode,
    pub entries: Vec<ResultEntry>,
    /// Number of leading entries that belong to the bank batch.
    pub bank_len: usize,
    /// Combined commitment of the two sealed input batches.
    pub input_hash: [u8; 32],
    /// SHA-256 over `entries`, for cross-mode comparison.
    pub result_root: [u8; 32],
    pub matched_at: DateTime<Utc>,
}

impl MatchReport {
    #[must_use]
    pub fn bank_entries(&self) -> &[ResultEntry] {
        &self.entries[..self.bank_len.min(self.entries.len())]
    }

    #[must_use]
    pub fn client_entries(&self) -> &[ResultEntry] {
        &self.entries[self.bank_len.min(self.entries.len())..]
    }

    /// Entry for the referenced order.
    #[must_use]
    pub fn entry_for(&self, order: OrderRef) -> Option<&ResultEntry> {
        match order.party {
            Party::Bank => self.bank_entries().get(order.position),
            Party::Client => self.client_entries().get(order.position),
        }
    }

    /// Sum of all bank fills; equals the client total by construction.
    #[must_use]
    pub fn total_filled(&self) -> u64 {
        self.bank_entries().iter().map(|e| e.filled_quantity).sum()
    }

    #[must_use]
    pub fn result_root_hex(&self) -> String {
        hex::encode(self.result_root)
    }
}

/// Output of one single-symbol slot round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotReport {
    pub mode: ExecutionMode,
    /// Filled quantity per slot.
    pub fills: Vec<u64>,
    pub result_root: [u8; 32],
}

impl SlotReport {
    #[must_use]
    pub fn result_root_hex(&self) -> String {
        hex::encode(self.result_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(side: Side, symbol: Symbol, filled: u64) -> ResultEntry {
        ResultEntry {
            side,
            symbol,
            filled_quantity: filled,
        }
    }

    fn make_report() -> MatchReport {
        MatchReport {
            round: RoundId(1),
            mode: ExecutionMode::Simulate,
            entries: vec![
                entry(Side::Sell, Symbol::A, 20),
                entry(Side::Buy, Symbol::B, 0),
                entry(Side::Buy, Symbol::A, 20),
            ],
            bank_len: 2,
            input_hash: [0u8; 32],
            result_root: [0xAB; 32],
            matched_at: Utc::now(),
        }
    }

    #[test]
    fn report_splits_bank_and_client() {
        let report = make_report();
        assert_eq!(report.bank_entries().len(), 2);
        assert_eq!(report.client_entries().len(), 1);
        assert_eq!(
            report.entry_for(OrderRef::new(Party::Client, 0)),
            Some(&entry(Side::Buy, Symbol::A, 20))
        );
        assert_eq!(report.entry_for(OrderRef::new(Party::Bank, 2)), None);
        assert_eq!(report.total_filled(), 20);
    }

    #[test]
    fn report_root_hex() {
        let report = make_report();
        assert_eq!(report.result_root_hex(), "ab".repeat(32));
    }

    #[test]
    fn entry_display() {
        assert_eq!(
            format!("{}", entry(Side::Sell, Symbol::A, 20)),
            "Sell  20 of A"
        );
    }

    #[test]
    fn report_serde_roundtrip() {
        let report = make_report();
        let json = serde_json::to_string(&report).unwrap();
        let back: MatchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report.entries, back.entries);
        assert_eq!(report.result_root, back.result_root);
        assert_eq!(back.mode, ExecutionMode::Simulate);
    }

    #[test]
    fn mode_display() {
        assert_eq!(format!("{}", ExecutionMode::Execute), "EXECUTE");
    }
}
