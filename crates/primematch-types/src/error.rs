//! Error types for the PrimeMatch matching circuit.
//!
//! All errors use the `PM_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order construction errors
//! - 2xx: Batch errors
//! - 3xx: Circuit errors
//! - 4xx: Backend / execution errors
//! - 9xx: General / configuration errors

use thiserror::Error;

use crate::{Party, Side, Symbol};

/// Central error enum for all PrimeMatch operations.
#[derive(Debug, Error)]
pub enum PrimematchError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The order quantity is outside the configured bounds.
    #[error("PM_ERR_100: Quantity {quantity} outside bounds [{min}, {max}]")]
    QuantityOutOfRange { quantity: u64, min: u64, max: u64 },

    /// The symbol is not part of the configured symbol set.
    #[error("PM_ERR_101: Symbol {symbol} outside configured set of {count} symbols")]
    SymbolOutOfRange { symbol: Symbol, count: usize },

    /// A wire value does not decode to a side.
    #[error("PM_ERR_102: Unknown side code {0}")]
    UnknownSide(u64),

    /// A wire value does not decode to a symbol.
    #[error("PM_ERR_103: Unknown symbol code {0}")]
    UnknownSymbol(u64),

    // =================================================================
    // Batch Errors (2xx)
    // =================================================================
    /// The batch length does not match the fixed circuit shape.
    #[error("PM_ERR_200: {party} batch size mismatch: expected {expected}, got {actual}")]
    BatchSizeMismatch {
        party: Party,
        expected: usize,
        actual: usize,
    },

    /// More than one order for the same (symbol, side) in one batch.
    #[error("PM_ERR_201: {party} batch holds more than one {side} order for {symbol}")]
    DuplicateSymbolSide {
        party: Party,
        symbol: Symbol,
        side: Side,
    },

    /// The pending buffer has already been sealed for this round.
    #[error("PM_ERR_202: Pending buffer already sealed")]
    BufferAlreadySealed,

    /// The pending buffer holds the configured number of orders.
    #[error("PM_ERR_203: Pending buffer full")]
    BufferFull,

    /// Orders were drained from a buffer that was never sealed.
    #[error("PM_ERR_204: Pending buffer not sealed")]
    BufferNotSealed,

    /// Two orders were packed into the same single-symbol slot.
    #[error("PM_ERR_205: Slot {slot} already occupied in {party} slot book")]
    SlotOccupied { party: Party, slot: usize },

    /// The batch commitment does not match the batch contents.
    #[error("PM_ERR_206: Batch hash mismatch for {party} batch")]
    BatchHashMismatch { party: Party },

    /// A batch was submitted on the wrong side of the match.
    #[error("PM_ERR_207: Expected {expected} batch, got {actual}")]
    WrongParty { expected: Party, actual: Party },

    /// Bank and client batches were sealed for different rounds.
    #[error("PM_ERR_208: Round mismatch: bank {bank}, client {client}")]
    RoundMismatch { bank: u64, client: u64 },

    // =================================================================
    // Circuit Errors (3xx)
    // =================================================================
    /// The number of inputs does not match the compiled circuit.
    #[error("PM_ERR_300: Circuit arity mismatch: expected {expected} inputs, got {actual}")]
    CircuitArity { expected: usize, actual: usize },

    /// A wire of the compiled circuit needs more bits than allowed.
    #[error("PM_ERR_301: Circuit bit width {required} exceeds limit {limit}")]
    BitWidthExceeded { required: u32, limit: u32 },

    /// An input value is larger than the bound it was compiled for.
    #[error("PM_ERR_302: Input {name} value {value} exceeds declared bound {bound}")]
    InputOutOfBounds {
        name: String,
        value: u64,
        bound: u64,
    },

    // =================================================================
    // Backend Errors (4xx)
    // =================================================================
    /// The execution backend failed to compile, encrypt, or run.
    #[error("PM_ERR_400: Backend failure: {reason}")]
    Backend { reason: String },

    /// Simulate and execute modes disagreed on the same input.
    #[error("PM_ERR_401: Mode mismatch: simulated root {simulated}, executed root {executed}")]
    ModeMismatch { simulated: String, executed: String },

    /// The backend returned output that does not decode to results.
    #[error("PM_ERR_402: Malformed circuit output: {reason}")]
    MalformedOutput { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("PM_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("PM_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (bounds, batch sizes, symbol count, widths).
    #[error("PM_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, PrimematchError>;

impl From<serde_json::Error> for PrimematchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_out_of_range_display() {
        let err = PrimematchError::QuantityOutOfRange {
            quantity: 61,
            min: 5,
            max: 60,
        };
        let msg = format!("{err}");
        assert!(msg.starts_with("PM_ERR_100"), "Got: {msg}");
        assert!(msg.contains("61"));
        assert!(msg.contains("[5, 60]"));
    }

    #[test]
    fn duplicate_symbol_side_display() {
        let err = PrimematchError::DuplicateSymbolSide {
            party: Party::Client,
            symbol: Symbol::C,
            side: Side::Sell,
        };
        let msg = format!("{err}");
        assert!(msg.contains("PM_ERR_201"));
        assert!(msg.contains("CLIENT"));
        assert!(msg.contains("Sell"));
        assert!(msg.contains('C'));
    }

    #[test]
    fn serde_error_converts() {
        let parse = serde_json::from_str::<u64>("not json").unwrap_err();
        let err: PrimematchError = parse.into();
        assert!(format!("{err}").starts_with("PM_ERR_901"));
    }

    #[test]
    fn all_errors_have_pm_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(PrimematchError::BufferFull),
            Box::new(PrimematchError::BufferNotSealed),
            Box::new(PrimematchError::UnknownSide(7)),
            Box::new(PrimematchError::Internal("test".into())),
            Box::new(PrimematchError::ModeMismatch {
                simulated: "a".into(),
                executed: "b".into(),
            }),
            Box::new(PrimematchError::BitWidthExceeded {
                required: 40,
                limit: 32,
            }),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("PM_ERR_"),
                "Error missing PM_ERR_ prefix: {msg}"
            );
        }
    }
}
