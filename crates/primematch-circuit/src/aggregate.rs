//! Result aggregation: fill matrix to per-order totals.
//!
//! The output has exactly `N_bank + N_client` rows: bank orders first in
//! batch order (row sums), then client orders in batch order (column
//! sums). Side and symbol are passed through untouched.

use crate::{Backend, Matrix};

/// One output row of the typed circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultRow<V> {
    pub side: V,
    pub symbol: V,
    pub filled: V,
}

impl<V> ResultRow<V> {
    /// Number of circuit outputs per row.
    pub const WIDTH: usize = 3;
}

impl<V: Clone> ResultRow<V> {
    /// Flatten rows into `[side, symbol, filled, side, symbol, filled, ...]`.
    pub fn flatten(rows: &[Self]) -> Vec<V> {
        let mut out = Vec::with_capacity(rows.len() * Self::WIDTH);
        for row in rows {
            out.push(row.side.clone());
            out.push(row.symbol.clone());
            out.push(row.filled.clone());
        }
        out
    }
}

/// Reduce `fill` into one row per order.
pub fn aggregate<B: Backend>(
    backend: &mut B,
    fill: &Matrix<B::Value>,
    bank_sides: &[B::Value],
    bank_symbols: &[B::Value],
    client_sides: &[B::Value],
    client_symbols: &[B::Value],
) -> Vec<ResultRow<B::Value>> {
    let bank_len = fill.rows();
    let client_len = fill.cols();
    debug_assert_eq!(bank_sides.len(), bank_len);
    debug_assert_eq!(client_sides.len(), client_len);

    backend.tag("creating-result", |b| {
        let zero = b.constant(0);
        let blank = ResultRow {
            side: zero.clone(),
            symbol: zero.clone(),
            filled: zero,
        };
        let mut rows = vec![blank; bank_len + client_len];

        let (bank_rows, client_rows) = rows.split_at_mut(bank_len);
        for (i, row) in bank_rows.iter_mut().enumerate() {
            *row = ResultRow {
                side: bank_sides[i].clone(),
                symbol: bank_symbols[i].clone(),
                filled: b.sum(fill.row(i)),
            };
        }
        for (j, row) in client_rows.iter_mut().enumerate() {
            let column: Vec<B::Value> = fill.column(j).cloned().collect();
            *row = ResultRow {
                side: client_sides[j].clone(),
                symbol: client_symbols[j].clone(),
                filled: b.sum(&column),
            };
        }
        rows
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlainBackend;

    #[test]
    fn row_and_column_sums_in_order() {
        // 2 bank x 3 client
        let fill = Matrix::from_fn(2, 3, |i, j| [[1, 2, 3], [10, 20, 30]][i][j]);
        let rows = aggregate(
            &mut PlainBackend,
            &fill,
            &[0, 1],
            &[4, 5],
            &[1, 0, 1],
            &[7, 8, 9],
        );
        assert_eq!(rows.len(), 5);
        let filled: Vec<u64> = rows.iter().map(|r| r.filled).collect();
        assert_eq!(filled, vec![6, 60, 11, 22, 33]);
        let symbols: Vec<u64> = rows.iter().map(|r| r.symbol).collect();
        assert_eq!(symbols, vec![4, 5, 7, 8, 9]);
        let sides: Vec<u64> = rows.iter().map(|r| r.side).collect();
        assert_eq!(sides, vec![0, 1, 1, 0, 1]);
    }

    #[test]
    fn flatten_interleaves_fields() {
        let rows = vec![
            ResultRow {
                side: 1u64,
                symbol: 0,
                filled: 20,
            },
            ResultRow {
                side: 0,
                symbol: 0,
                filled: 20,
            },
        ];
        assert_eq!(ResultRow::flatten(&rows), vec![1, 0, 20, 0, 0, 20]);
    }
}
