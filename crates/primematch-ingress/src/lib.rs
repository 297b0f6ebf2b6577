//! # primematch-ingress
//!
//! **Order intake**: pending buffers, batch validation, batch sealing
//! and slot packing.
//!
//! ## Architecture
//!
//! Intake sits between order submission and the matchers:
//! 1. **PendingBuffer**: collects one party's orders, seals at exactly the
//!    configured batch size
//! 2. **BatchValidator**: hard gate for symbol set, quantity bounds and
//!    the duplicate policy
//! 3. **BatchSealer**: seals a validated batch into a `SealedBatch` with a
//!    SHA-256 commitment
//! 4. **SlotLayout**: packs orders into the single-symbol slot vectors
//!
//! ## Order Flow
//!
//! ```text
//! submit → PendingBuffer.push() → BatchSealer.seal_buffer()
//!     → BatchValidator.validate_batch() → SealedBatch → TypedMatcher
//! ```

pub mod batch_sealer;
pub mod batch_validator;
pub mod pending_buffer;
pub mod slot_layout;

pub use batch_sealer::{BatchSealer, compute_batch_hash, compute_input_hash, verify_batch_hash};
pub use batch_validator::BatchValidator;
pub use pending_buffer::PendingBuffer;
pub use slot_layout::SlotLayout;
