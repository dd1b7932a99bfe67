//! Conversion between `NumericMatrix` and Faer's dense `Mat`.
//!
//! Faer stores column-major; rows are gathered element by element, so these
//! conversions are O(rows * columns) copies.

use super::NumericMatrix;
use crate::core::traits::Number;
use faer::Mat;
use num_traits::Float;

impl<T: Number + Float> NumericMatrix<T> {
    /// Copy into a Faer matrix of the same shape.
    pub fn to_faer(&self) -> Mat<T> {
        Mat::from_fn(self.row_count(), self.column_count(), |i, j| {
            self.rows[i].as_slice()[j]
        })
    }

    /// Copy a Faer matrix into a new `NumericMatrix`.
    pub fn from_faer(mat: &Mat<T>) -> Self {
        let rows = (0..mat.nrows())
            .map(|i| (0..mat.ncols()).map(|j| mat[(i, j)]).collect())
            .collect();
        Self::assemble(rows, mat.ncols())
    }
}

impl<T: Number + Float> From<&Mat<T>> for NumericMatrix<T> {
    fn from(mat: &Mat<T>) -> Self {
        Self::from_faer(mat)
    }
}
