//! # primematch-circuit
//!
//! **Branch-free matching circuit for PrimeMatch.**
//!
//! Every function in this crate is a fixed-shape data-flow graph over a
//! [`Backend`]: no branch, loop bound or output size depends on an order's
//! contents. That makes the same code usable three ways:
//!
//! - **Simulate**: run directly on [`PlainBackend`]
//! - **Compile**: record into a [`Circuit`] with [`CircuitBuilder`]
//! - **Execute**: replay the compiled [`Circuit`] on any backend,
//!   including an encrypted one supplied by the caller
//!
//! ```text
//! compatibility  = (bank_side != client_side) & (bank_symbol == client_symbol)
//! fill           = select(compatibility, min(bank_qty, client_qty), 0)
//! bank_filled    = row sums of fill
//! client_filled  = column sums of fill
//! ```

pub mod aggregate;
pub mod backend;
pub mod circuit;
pub mod compatibility;
pub mod determinism;
pub mod fill;
pub mod matrix;
pub mod plain;
pub mod single_symbol;
pub mod typed;

pub use aggregate::{ResultRow, aggregate};
pub use backend::Backend;
pub use circuit::{Circuit, CircuitBuilder, CircuitStats, Gate, InputSpec, Op, OpCounts, Wire};
pub use compatibility::build_compatibility;
pub use determinism::{compute_result_root, compute_slot_root, verify_result_root};
pub use fill::build_fill_matrix;
pub use matrix::Matrix;
pub use plain::PlainBackend;
pub use single_symbol::{compile_single_symbol, single_symbol_inputs, single_symbol_match};
pub use typed::{TypedInputs, TypedShape, compile_typed, decode_typed_output, typed_match};
