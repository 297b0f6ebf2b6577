//! # primematch-engine
//!
//! **Matching engines**: run sealed batches through the compiled circuits
//! in simulate or execute mode.
//!
//! ## Architecture
//!
//! - **TypedMatcher**: multi-symbol matching of a bank batch against a
//!   client batch. Produces a [`primematch_types::MatchReport`].
//! - **SlotMatcher**: the simplified single-symbol variant over slot
//!   vectors. Produces a [`primematch_types::SlotReport`].
//! - **Executor**: the execute-mode seam. Any backend that can evaluate
//!   a compiled [`primematch_circuit::Circuit`] plugs in here;
//!   [`ClearExecutor`] replays it in the clear.
//!
//! ## Round Flow
//!
//! ```text
//! SealedBatch (bank) ─┐
//!                     ├→ check round → encode → SIMULATE | EXECUTE → decode → MatchReport
//! SealedBatch (client)┘
//! ```
//!
//! Every report carries a SHA-256 result root so the two modes can be
//! compared without exposing order contents in logs.

pub mod executor;
pub mod slot_matcher;
pub mod summary;
pub mod typed_matcher;

pub use executor::{ClearExecutor, Executor};
pub use slot_matcher::SlotMatcher;
pub use summary::CircuitSummary;
pub use typed_matcher::{TypedMatcher, ensure_same_result};
