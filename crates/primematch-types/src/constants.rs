//! System-wide constants for the PrimeMatch matching circuit.

/// Number of instruments in the closed symbol set (`A` through `Z`).
pub const SYMBOL_CAPACITY: usize = 26;

/// Default number of bank orders per round.
pub const DEFAULT_BANK_ORDERS: usize = 10;

/// Default number of client orders per round.
pub const DEFAULT_CLIENT_ORDERS: usize = 5;

/// Default number of tradable symbols in the typed matcher.
pub const DEFAULT_SYMBOL_COUNT: usize = 10;

/// Default minimum order quantity for the typed matcher.
pub const DEFAULT_MIN_QTY: u64 = 5;

/// Default maximum order quantity for the typed matcher.
pub const DEFAULT_MAX_QTY: u64 = 60;

/// Default number of symbols served by the single-symbol slot matcher.
pub const DEFAULT_SLOT_SYMBOLS: usize = 10;

/// Default minimum quantity of an occupied slot.
pub const DEFAULT_SLOT_MIN_QTY: u64 = 1;

/// Default maximum quantity of an occupied slot.
pub const DEFAULT_SLOT_MAX_QTY: u64 = 50;

/// Widest integer a compiled circuit may carry on any wire.
///
/// Encrypted-arithmetic backends pay per bit; the plaintext backend's
/// branch-free tricks additionally need the top bit of a `u64` free.
pub const MAX_CIRCUIT_BIT_WIDTH: u32 = 32;

/// Maximum orders per party in a single round.
///
/// The pairwise stage is quadratic in batch size.
pub const MAX_ORDERS_PER_BATCH: usize = 1024;

/// Integer code of [`crate::Side::Buy`] on circuit wires.
pub const SIDE_CODE_BUY: u64 = 0;

/// Integer code of [`crate::Side::Sell`] on circuit wires.
pub const SIDE_CODE_SELL: u64 = 1;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "PrimeMatch";
