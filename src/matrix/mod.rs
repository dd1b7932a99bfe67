//! Rectangular numeric matrix stored as one `NumericVector` per row.
//!
//! Faults live on two levels. A row index past the end is recorded on the
//! matrix itself; a column index past the end of a valid row is recorded by
//! that row vector. [`NumericMatrix::faults`] merges both levels and is the
//! value callers should check after a sequence of operations.

pub mod dense;
pub mod ops;

use crate::core::reduce;
use crate::core::traits::Number;
use crate::error::{Faults, KError, Status};
use crate::vector::NumericVector;
use log::{debug, warn};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, IndexMut};

#[derive(Debug)]
pub struct NumericMatrix<T> {
    rows: Vec<NumericVector<T>>,
    columns: usize,
    status: Status,
}

impl<T> NumericMatrix<T> {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns)
    }

    /// True when the matrix holds no elements.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns == 0
    }

    pub fn row(&self, index: usize) -> Option<&NumericVector<T>> {
        self.rows.get(index)
    }

    /// Mutable row access. The row's length must be left unchanged, which
    /// `NumericVector` guarantees since it cannot be resized.
    pub fn row_mut(&mut self, index: usize) -> Option<&mut NumericVector<T>> {
        self.rows.get_mut(index)
    }

    pub fn rows(&self) -> std::slice::Iter<'_, NumericVector<T>> {
        self.rows.iter()
    }

    /// Matrix-level fault code. Column faults are kept by the rows.
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub fn status_name(&self) -> &'static str {
        self.status.as_str()
    }

    /// Every fault currently held by the matrix or any of its rows.
    pub fn faults(&self) -> Faults {
        self.rows
            .iter()
            .fold(Faults::from(self.status), |acc, row| acc | Faults::from(row.status()))
    }

    /// Reset the matrix and every row to [`Status::GoodAllocator`].
    pub fn clear_faults(&mut self) {
        self.status = Status::GoodAllocator;
        self.rows
            .iter_mut()
            .for_each(|row| row.set_status(Status::GoodAllocator));
    }

    pub(crate) fn record(&mut self, status: Status) {
        debug!("numeric matrix ({}x{}): {}", self.rows.len(), self.columns, status);
        self.status = status;
    }

    /// Clamp-and-flag read. A row index past the end resolves to the
    /// bottom-right element; a column index past the end resolves to the last
    /// element of that row. The fault is returned rather than recorded.
    ///
    /// # Panics
    /// If the matrix is empty.
    pub fn clamped(&self, row: usize, column: usize) -> (&T, Option<Status>) {
        match self.rows.get(row) {
            Some(r) => r.clamped(column),
            None => {
                let last = &self.rows[self.rows.len().saturating_sub(1)];
                (last.clamped(self.columns.saturating_sub(1)).0, Some(Status::BoundArray))
            }
        }
    }

    /// Clamp-and-flag access. Row faults are recorded on the matrix, column
    /// faults on the row vector.
    ///
    /// # Panics
    /// If the matrix is empty.
    pub fn at(&mut self, row: usize, column: usize) -> &mut T {
        if row < self.rows.len() {
            return self.rows[row].at(column);
        }
        self.record(Status::BoundArray);
        let last_row = self.rows.len().saturating_sub(1);
        let last_column = self.columns.saturating_sub(1);
        self.rows[last_row].at(last_column)
    }

    /// Strict bounds-checked read.
    pub fn get(&self, row: usize, column: usize) -> Result<&T, KError> {
        let len = self.rows.len();
        self.rows
            .get(row)
            .ok_or(KError::OutOfBounds { index: row, len })?
            .get(column)
    }

    /// Strict bounds-checked write access.
    pub fn get_mut(&mut self, row: usize, column: usize) -> Result<&mut T, KError> {
        let len = self.rows.len();
        self.rows
            .get_mut(row)
            .ok_or(KError::OutOfBounds { index: row, len })?
            .get_mut(column)
    }

    /// Assign through the clamp-and-flag path.
    pub fn set(&mut self, row: usize, column: usize, value: T) {
        *self.at(row, column) = value;
    }
}

impl<T: Number> NumericMatrix<T> {
    /// 5x5 zero matrix.
    pub fn new() -> Self {
        Self::square(5)
    }

    /// `size x size` zero matrix.
    pub fn square(size: usize) -> Self {
        Self::zeros(size, size)
    }

    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self::filled(rows, columns, T::zero())
    }

    /// `rows x columns` copies of `value`.
    pub fn filled(rows: usize, columns: usize, value: T) -> Self {
        Self::build(rows, columns, |_| NumericVector::from_elem(columns, value))
    }

    /// Build from nested rows. Ragged input is refused.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, KError> {
        let columns = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != columns) {
            return Err(KError::DimensionMismatch {
                lhs: (rows.len(), columns),
                rhs: (1, bad.len()),
            });
        }
        Ok(Self::assemble(rows, columns))
    }

    /// Adopt rows already known to have `columns` elements each.
    pub(crate) fn assemble(rows: Vec<Vec<T>>, columns: usize) -> Self {
        let count = rows.len();
        let mut rows = rows.into_iter();
        Self::build(count, columns, |_| {
            rows.next()
                .map(NumericVector::from)
                .unwrap_or_else(|| NumericVector::zeros(columns))
        })
    }

    fn build(
        rows: usize,
        columns: usize,
        make_row: impl FnMut(usize) -> NumericVector<T>,
    ) -> Self {
        let mut data = Vec::new();
        if let Err(err) = data.try_reserve_exact(rows) {
            warn!("numeric matrix: allocation of {rows} rows failed: {err}");
            return Self {
                rows: Vec::new(),
                columns: 0,
                status: Status::BadAllocator,
            };
        }
        data.extend((0..rows).map(make_row));
        let status = if data.iter().any(|r| r.status() == Status::BadAllocator) {
            warn!("numeric matrix: allocation of a {columns}-element row failed");
            Status::BadAllocator
        } else {
            Status::GoodAllocator
        };
        Self {
            rows: data,
            columns,
            status,
        }
    }

    /// Sum of every element.
    pub fn sum(&self) -> T {
        reduce::sum_by(&self.rows, NumericVector::sum)
    }
}

impl<T: Number> Default for NumericMatrix<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Number> Clone for NumericMatrix<T> {
    /// Deep copy, carrying over the matrix-level status.
    fn clone(&self) -> Self {
        let mut out = Self::build(self.rows.len(), self.columns, |i| self.rows[i].clone());
        if out.status.is_good() {
            out.status = self.status;
        }
        out
    }

    /// Replace the contents and status with a copy of `source`.
    fn clone_from(&mut self, source: &Self) {
        *self = source.clone();
    }
}

/// Clamp-and-flag read; see [`NumericMatrix::clamped`] to observe faults.
impl<T> Index<(usize, usize)> for NumericMatrix<T> {
    type Output = T;

    fn index(&self, (row, column): (usize, usize)) -> &T {
        self.clamped(row, column).0
    }
}

/// Clamp-and-flag write; see [`NumericMatrix::at`].
impl<T> IndexMut<(usize, usize)> for NumericMatrix<T> {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut T {
        self.at(row, column)
    }
}

/// Equal shapes and row-by-row multiset equality of the row vectors.
impl<T: Number> PartialEq for NumericMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        self.rows.iter().zip(other.rows.iter()).all(|(a, b)| a == b)
    }
}

/// Ordering by the sum of every element, like `NumericVector`.
impl<T: Number> PartialOrd for NumericMatrix<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.sum().partial_cmp(&other.sum())
    }

    fn lt(&self, other: &Self) -> bool {
        self.sum() < other.sum()
    }

    fn gt(&self, other: &Self) -> bool {
        other.lt(self)
    }

    fn le(&self, other: &Self) -> bool {
        !self.gt(other)
    }

    fn ge(&self, other: &Self) -> bool {
        !self.lt(other)
    }
}

/// One line per row, each terminated by a newline.
impl<T: fmt::Display> fmt::Display for NumericMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rows.iter().try_for_each(|row| writeln!(f, "{row}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_five_by_five() {
        let m = NumericMatrix::<f32>::default();
        assert_eq!(m.shape(), (5, 5));
        assert_eq!(m.sum(), 0.0);
    }

    #[test]
    fn row_fault_goes_to_matrix() {
        let mut m = NumericMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(*m.at(7, 0), 4);
        assert_eq!(m.status(), Status::BoundArray);
        assert!(m.row(1).unwrap().status().is_good());
    }

    #[test]
    fn column_fault_goes_to_row() {
        let mut m = NumericMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        m.set(0, 9, 8);
        assert_eq!(m.row(0).unwrap().as_slice(), &[1, 8]);
        assert!(m.status().is_good());
        assert_eq!(m.row(0).unwrap().status(), Status::BoundArray);
        assert_eq!(m.faults(), Faults::BOUND_ARRAY);
        m.clear_faults();
        assert!(m.faults().is_empty());
    }

    #[test]
    fn read_only_index_reports() {
        let m = NumericMatrix::from_rows(vec![vec![1, 2, 3]]).unwrap();
        assert_eq!(m.clamped(0, 1), (&2, None));
        assert_eq!(m.clamped(3, 0), (&3, Some(Status::BoundArray)));
        assert_eq!(m[(0, 5)], 3);
        assert!(m.faults().is_empty());
    }

    #[test]
    fn ragged_rows_refused() {
        let err = NumericMatrix::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert!(matches!(err, KError::DimensionMismatch { lhs: (2, 2), rhs: (1, 1) }));
    }

    #[test]
    fn clone_carries_status() {
        let mut m = NumericMatrix::<i32>::square(2);
        m.set_status(Status::DividedZero);
        let c = m.clone();
        assert_eq!(c.status(), Status::DividedZero);
        let mut d = NumericMatrix::<i32>::zeros(1, 3);
        d.clone_from(&m);
        assert_eq!(d.shape(), (2, 2));
        assert_eq!(d.status(), Status::DividedZero);
    }

    #[test]
    fn display_one_line_per_row() {
        let m = NumericMatrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(m.to_string(), "1 2\n3 4\n");
    }

    #[test]
    fn strict_get() {
        let m = NumericMatrix::<u8>::zeros(2, 3);
        assert!(m.get(1, 2).is_ok());
        assert!(matches!(m.get(2, 0), Err(KError::OutOfBounds { index: 2, len: 2 })));
        assert!(matches!(m.get(0, 3), Err(KError::OutOfBounds { index: 3, len: 3 })));
    }
}
