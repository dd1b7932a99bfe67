//! Arithmetic operators and multiplication for `NumericMatrix`.
//!
//! Element-wise operators delegate to the row vectors. On a shape mismatch
//! the binary forms return a copy of the left operand marked
//! [`Status::BoundArray`]; the compound forms leave `self` untouched.

use super::NumericMatrix;
use crate::config::options::MulRule;
use crate::core::traits::Number;
use crate::error::{KError, Status};
use crate::vector::NumericVector;
use crate::vector::ops::{forward_binop, forward_scalar_binop};
use log::warn;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

impl<T: Number> NumericMatrix<T> {
    fn zip_rows(
        &self,
        rhs: &Self,
        f: impl Fn(&NumericVector<T>, &NumericVector<T>) -> NumericVector<T>,
    ) -> Self {
        let mut out = self.clone();
        if self.shape() != rhs.shape() {
            out.record(Status::BoundArray);
            return out;
        }
        for (o, (a, b)) in out.rows.iter_mut().zip(self.rows.iter().zip(rhs.rows.iter())) {
            *o = f(a, b);
        }
        out
    }

    fn zip_rows_assign(
        &mut self,
        rhs: &Self,
        f: impl Fn(&mut NumericVector<T>, &NumericVector<T>),
    ) {
        if self.shape() != rhs.shape() {
            return;
        }
        for (a, b) in self.rows.iter_mut().zip(rhs.rows.iter()) {
            f(a, b);
        }
    }

    /// Multiply every element by `k`.
    pub fn scale(&self, k: T) -> Self {
        let mut out = self.clone();
        out.scale_assign(k);
        out
    }

    pub fn scale_assign(&mut self, k: T) {
        self.rows.iter_mut().for_each(|row| *row *= k);
    }

    /// Output shape under [`MulRule::Compat`], or `None` if incompatible.
    fn compat_shape(&self, rhs: &Self) -> Option<(usize, usize)> {
        let (lr, lc) = self.shape();
        let (rr, rc) = rhs.shape();
        if lr != rc && lc != rr {
            return None;
        }
        if lr >= rc {
            Some((lr, rc))
        } else {
            Some((lc, rr))
        }
    }

    fn compat_product(&self, rhs: &Self) -> Option<Self> {
        let (rows, columns) = self.compat_shape(rhs)?;
        let mut out = Self::zeros(rows, columns);
        if !out.status.is_good() || rows * columns == 0 {
            return Some(out);
        }
        if self.is_empty() || rhs.is_empty() {
            out.record(Status::BoundArray);
            return Some(out);
        }
        let mut clamped = false;
        for row in 0..rows {
            for col in 0..columns {
                let mut acc = T::zero();
                for inner in 0..rows {
                    let (a, fa) = self.clamped(row, inner);
                    let (b, fb) = rhs.clamped(inner, col);
                    clamped |= fa.is_some() || fb.is_some();
                    acc = acc.wrapping_add(a.wrapping_mul(*b));
                }
                out.rows[row].as_mut_slice()[col] = acc;
            }
        }
        if clamped {
            out.record(Status::BoundArray);
        }
        Some(out)
    }

    /// Matrix product under an explicit [`MulRule`].
    ///
    /// Incompatible operands yield a 1x1 zero matrix; under
    /// [`MulRule::Conventional`] it is additionally marked
    /// [`Status::BoundArray`].
    pub fn product(&self, rhs: &Self, rule: MulRule) -> Self {
        match rule {
            MulRule::Compat => self.compat_product(rhs).unwrap_or_else(|| {
                warn!(
                    "numeric matrix: cannot multiply {:?} by {:?}",
                    self.shape(),
                    rhs.shape()
                );
                Self::zeros(1, 1)
            }),
            MulRule::Conventional => self.checked_mul(rhs).unwrap_or_else(|err| {
                warn!("numeric matrix: {err}");
                let mut out = Self::zeros(1, 1);
                out.record(err.status());
                out
            }),
        }
    }

    /// Conventional `(m x k) * (k x n)` product, refusing mismatched shapes.
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, KError> {
        let (m, k) = self.shape();
        let (k2, n) = rhs.shape();
        if k != k2 {
            return Err(KError::DimensionMismatch {
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }
        let row_of = |i: usize| -> Vec<T> {
            let lhs = self.rows[i].as_slice();
            (0..n)
                .map(|j| {
                    (0..k).fold(T::zero(), |acc, p| {
                        acc.wrapping_add(lhs[p].wrapping_mul(rhs.rows[p].as_slice()[j]))
                    })
                })
                .collect()
        };
        #[cfg(feature = "rayon")]
        let data: Vec<Vec<T>> = {
            use rayon::prelude::*;
            if m * n * k >= crate::core::reduce::PAR_THRESHOLD {
                (0..m).into_par_iter().map(row_of).collect()
            } else {
                (0..m).map(row_of).collect()
            }
        };
        #[cfg(not(feature = "rayon"))]
        let data: Vec<Vec<T>> = (0..m).map(row_of).collect();
        let out = Self::assemble(data, n);
        if out.status == Status::BadAllocator {
            return Err(KError::Allocation(m * n));
        }
        Ok(out)
    }

    /// Element-wise sum, refusing mismatched shapes.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, KError> {
        self.check_shape(rhs)?;
        Ok(self + rhs)
    }

    /// Element-wise difference, refusing mismatched shapes.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, KError> {
        self.check_shape(rhs)?;
        Ok(self - rhs)
    }

    /// Scalar division, refusing a zero divisor.
    pub fn checked_div(&self, k: T) -> Result<Self, KError> {
        if k.is_zero() {
            return Err(KError::DivisionByZero);
        }
        Ok(self / k)
    }

    fn check_shape(&self, rhs: &Self) -> Result<(), KError> {
        if self.shape() != rhs.shape() {
            return Err(KError::DimensionMismatch {
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }
        Ok(())
    }
}

impl<'a, T: Number> Add<&'a NumericMatrix<T>> for &'a NumericMatrix<T> {
    type Output = NumericMatrix<T>;

    fn add(self, rhs: &'a NumericMatrix<T>) -> NumericMatrix<T> {
        self.zip_rows(rhs, |a, b| a + b)
    }
}

impl<'a, T: Number> Sub<&'a NumericMatrix<T>> for &'a NumericMatrix<T> {
    type Output = NumericMatrix<T>;

    fn sub(self, rhs: &'a NumericMatrix<T>) -> NumericMatrix<T> {
        self.zip_rows(rhs, |a, b| a - b)
    }
}

/// Product under [`MulRule::Compat`].
impl<'a, T: Number> Mul<&'a NumericMatrix<T>> for &'a NumericMatrix<T> {
    type Output = NumericMatrix<T>;

    fn mul(self, rhs: &'a NumericMatrix<T>) -> NumericMatrix<T> {
        self.product(rhs, MulRule::Compat)
    }
}

forward_binop!(impl Add, add for NumericMatrix);
forward_binop!(impl Sub, sub for NumericMatrix);
forward_binop!(impl Mul, mul for NumericMatrix);

impl<T: Number> AddAssign<&NumericMatrix<T>> for NumericMatrix<T> {
    fn add_assign(&mut self, rhs: &NumericMatrix<T>) {
        self.zip_rows_assign(rhs, |a, b| *a += b);
    }
}

impl<T: Number> AddAssign<NumericMatrix<T>> for NumericMatrix<T> {
    fn add_assign(&mut self, rhs: NumericMatrix<T>) {
        *self += &rhs;
    }
}

impl<T: Number> SubAssign<&NumericMatrix<T>> for NumericMatrix<T> {
    fn sub_assign(&mut self, rhs: &NumericMatrix<T>) {
        self.zip_rows_assign(rhs, |a, b| *a -= b);
    }
}

impl<T: Number> SubAssign<NumericMatrix<T>> for NumericMatrix<T> {
    fn sub_assign(&mut self, rhs: NumericMatrix<T>) {
        *self -= &rhs;
    }
}

/// Compat product in place; incompatible operands leave `self` untouched.
impl<T: Number> MulAssign<&NumericMatrix<T>> for NumericMatrix<T> {
    fn mul_assign(&mut self, rhs: &NumericMatrix<T>) {
        if let Some(product) = self.compat_product(rhs) {
            *self = product;
        }
    }
}

impl<T: Number> MulAssign<NumericMatrix<T>> for NumericMatrix<T> {
    fn mul_assign(&mut self, rhs: NumericMatrix<T>) {
        *self *= &rhs;
    }
}

impl<T: Number> Div<T> for &NumericMatrix<T> {
    type Output = NumericMatrix<T>;

    fn div(self, k: T) -> NumericMatrix<T> {
        let mut out = self.clone();
        if k.is_zero() {
            out.record(Status::DividedZero);
            return out;
        }
        for (o, row) in out.rows.iter_mut().zip(self.rows.iter()) {
            *o = row / k;
        }
        out
    }
}

impl<T: Number> DivAssign<T> for NumericMatrix<T> {
    fn div_assign(&mut self, k: T) {
        if k.is_zero() {
            self.record(Status::DividedZero);
            return;
        }
        self.rows.iter_mut().for_each(|row| *row /= k);
    }
}

forward_scalar_binop!(impl Div, div for NumericMatrix);
