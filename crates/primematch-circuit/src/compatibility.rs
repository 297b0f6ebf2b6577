//! Compatibility matrix: which (bank, client) pairs may be matched.
//!
//! A pair is compatible iff the sides differ and the symbols are equal.
//! Both comparisons are broadcast over the full `N_bank × N_client` cross
//! product and combined with a non-short-circuiting conjunction.

use crate::{Backend, Matrix};

/// Build the `N_bank × N_client` compatibility matrix of `{0, 1}` values.
pub fn build_compatibility<B: Backend>(
    backend: &mut B,
    bank_sides: &[B::Value],
    bank_symbols: &[B::Value],
    client_sides: &[B::Value],
    client_symbols: &[B::Value],
) -> Matrix<B::Value> {
    debug_assert_eq!(bank_sides.len(), bank_symbols.len());
    debug_assert_eq!(client_sides.len(), client_symbols.len());
    let rows = bank_sides.len();
    let cols = client_sides.len();

    let sides_differ = backend.tag("comparing-order-sides", |b| {
        Matrix::from_fn(rows, cols, |i, j| b.not_equal(&bank_sides[i], &client_sides[j]))
    });

    let symbols_match = backend.tag("comparing-order-symbols", |b| {
        Matrix::from_fn(rows, cols, |i, j| b.equal(&bank_symbols[i], &client_symbols[j]))
    });

    backend.tag("checking-compatibility", |b| {
        Matrix::from_fn(rows, cols, |i, j| {
            b.and(sides_differ.get(i, j), symbols_match.get(i, j))
        })
    })
}
