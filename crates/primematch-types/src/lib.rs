//! # primematch-types
//!
//! Shared types, errors, and configuration for the **PrimeMatch**
//! confidential matching circuit.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`RoundId`], [`Party`]
//! - **Order model**: [`Order`], [`Side`], [`Symbol`], [`QuantityBounds`]
//! - **Batch model**: [`SealedBatch`], [`EncodedBatch`]
//! - **Result model**: [`ResultEntry`], [`MatchReport`], [`SlotReport`], [`ExecutionMode`]
//! - **Configuration**: [`MatchConfig`], [`SingleSymbolConfig`], [`DuplicatePolicy`]
//! - **Errors**: [`PrimematchError`] with `PM_ERR_` prefix codes
//! - **Constants**: circuit limits and defaults

pub mod batch;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod order;
pub mod result;
#[cfg(any(test, feature = "test-helpers"))]
pub mod sample;

// Re-export all primary types at crate root for ergonomic imports:
//   use primematch_types::{Order, Side, Symbol, ResultEntry, ...};

pub use batch::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use order::*;
pub use result::*;

// Constants are accessed via `primematch_types::constants::FOO`
// (not re-exported to avoid name collisions).
