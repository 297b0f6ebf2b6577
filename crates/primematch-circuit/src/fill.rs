//! Quantity match calculator.
//!
//! For every pair the candidate fill `min(bank_qty[i], client_qty[j])` is
//! computed unconditionally and then combined with the compatibility mask:
//! incompatible pairs select the constant `0`.

use crate::{Backend, Matrix};

/// Build the `N_bank × N_client` fill matrix.
///
/// `compatibility` must be a `{0, 1}` matrix of shape
/// `bank_qty.len() × client_qty.len()`.
pub fn build_fill_matrix<B: Backend>(
    backend: &mut B,
    bank_qty: &[B::Value],
    client_qty: &[B::Value],
    compatibility: &Matrix<B::Value>,
) -> Matrix<B::Value> {
    debug_assert_eq!(compatibility.rows(), bank_qty.len());
    debug_assert_eq!(compatibility.cols(), client_qty.len());
    let rows = bank_qty.len();
    let cols = client_qty.len();

    let candidate = backend.tag("calculating-matching-quantity", |b| {
        Matrix::from_fn(rows, cols, |i, j| b.min(&bank_qty[i], &client_qty[j]))
    });

    backend.tag("calculating-filled-quantity", |b| {
        let zero = b.constant(0);
        Matrix::from_fn(rows, cols, |i, j| {
            b.select(compatibility.get(i, j), candidate.get(i, j), &zero)
        })
    })
}
