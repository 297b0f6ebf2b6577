//! Fixed-shape row-major matrix.
//!
//! Every matrix is built at full size in one pass; there is no resize.

/// A `rows × cols` matrix stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Build a matrix by evaluating `f(i, j)` for every cell, row by row.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell `(i, j)`. Panics if out of shape.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> &T {
        assert!(i < self.rows && j < self.cols, "cell ({i}, {j}) outside {}x{}", self.rows, self.cols);
        &self.data[i * self.cols + j]
    }

    /// Row `i` as a contiguous slice.
    #[must_use]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Column `j`, top to bottom.
    pub fn column(&self, j: usize) -> impl Iterator<Item = &T> {
        self.data.iter().skip(j).step_by(self.cols.max(1)).take(self.rows)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone> Matrix<T> {
    /// A matrix with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }
}
