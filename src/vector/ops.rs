//! Arithmetic operators for `NumericVector`.
//!
//! The binary operators are implemented on references; owned operands are
//! forwarded with [`forward_binop!`] and [`forward_scalar_binop!`].
//!
//! Fault behaviour differs between the binary and compound forms:
//!
//! | operator | mismatch / zero divisor |
//! |---|---|
//! | `a + b`, `a - b` | zero vector of `a.len()` with `BoundArray` |
//! | `a += b`, `a -= b` | `a` unchanged, status untouched |
//! | `a / 0` | copy of `a` with `DividedZero` |
//! | `a /= 0` | `a` unchanged, `DividedZero` recorded |

use super::NumericVector;
use crate::core::traits::Number;
use crate::error::{KError, Status};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

/// Owned-operand forwarding onto a `&lhs op &rhs` implementation.
macro_rules! forward_binop {
    (impl $imp:ident, $method:ident for $t:ident) => {
        impl<T: Number> $imp<$t<T>> for $t<T> {
            type Output = $t<T>;

            fn $method(self, rhs: $t<T>) -> $t<T> {
                (&self).$method(&rhs)
            }
        }

        impl<'a, T: Number> $imp<&'a $t<T>> for $t<T> {
            type Output = $t<T>;

            fn $method(self, rhs: &'a $t<T>) -> $t<T> {
                (&self).$method(rhs)
            }
        }

        impl<'a, T: Number> $imp<$t<T>> for &'a $t<T> {
            type Output = $t<T>;

            fn $method(self, rhs: $t<T>) -> $t<T> {
                self.$method(&rhs)
            }
        }
    };
}

/// Owned-operand forwarding onto a `&lhs op scalar` implementation.
macro_rules! forward_scalar_binop {
    (impl $imp:ident, $method:ident for $t:ident) => {
        impl<T: Number> $imp<T> for $t<T> {
            type Output = $t<T>;

            fn $method(self, k: T) -> $t<T> {
                (&self).$method(k)
            }
        }
    };
}

pub(crate) use {forward_binop, forward_scalar_binop};

impl<T: Number> NumericVector<T> {
    fn zip_with(&self, rhs: &Self, f: impl Fn(T, T) -> T) -> Self {
        let mut out = Self::zeros(self.len());
        if self.len() != rhs.len() {
            out.record(Status::BoundArray);
            return out;
        }
        for ((o, &a), &b) in out.iter_mut().zip(self.iter()).zip(rhs.iter()) {
            *o = f(a, b);
        }
        out
    }

    fn zip_assign(&mut self, rhs: &Self, f: impl Fn(&mut T, T)) {
        if self.len() != rhs.len() {
            return;
        }
        for (a, &b) in self.iter_mut().zip(rhs.iter()) {
            f(a, b);
        }
    }

    /// Element-wise sum, refusing mismatched lengths.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, KError> {
        self.check_len(rhs)?;
        Ok(self + rhs)
    }

    /// Element-wise difference, refusing mismatched lengths.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, KError> {
        self.check_len(rhs)?;
        Ok(self - rhs)
    }

    /// Scalar division, refusing a zero divisor.
    pub fn checked_div(&self, k: T) -> Result<Self, KError> {
        if k.is_zero() {
            return Err(KError::DivisionByZero);
        }
        Ok(self / k)
    }

    fn check_len(&self, rhs: &Self) -> Result<(), KError> {
        if self.len() != rhs.len() {
            return Err(KError::DimensionMismatch {
                lhs: (1, self.len()),
                rhs: (1, rhs.len()),
            });
        }
        Ok(())
    }
}

impl<'a, T: Number> Add<&'a NumericVector<T>> for &'a NumericVector<T> {
    type Output = NumericVector<T>;

    fn add(self, rhs: &'a NumericVector<T>) -> NumericVector<T> {
        self.zip_with(rhs, T::wrapping_add)
    }
}

impl<'a, T: Number> Sub<&'a NumericVector<T>> for &'a NumericVector<T> {
    type Output = NumericVector<T>;

    fn sub(self, rhs: &'a NumericVector<T>) -> NumericVector<T> {
        self.zip_with(rhs, T::wrapping_sub)
    }
}

forward_binop!(impl Add, add for NumericVector);
forward_binop!(impl Sub, sub for NumericVector);

impl<T: Number> AddAssign<&NumericVector<T>> for NumericVector<T> {
    fn add_assign(&mut self, rhs: &NumericVector<T>) {
        self.zip_assign(rhs, |a, b| *a = a.wrapping_add(b));
    }
}

impl<T: Number> AddAssign<NumericVector<T>> for NumericVector<T> {
    fn add_assign(&mut self, rhs: NumericVector<T>) {
        *self += &rhs;
    }
}

impl<T: Number> SubAssign<&NumericVector<T>> for NumericVector<T> {
    fn sub_assign(&mut self, rhs: &NumericVector<T>) {
        self.zip_assign(rhs, |a, b| *a = a.wrapping_sub(b));
    }
}

impl<T: Number> SubAssign<NumericVector<T>> for NumericVector<T> {
    fn sub_assign(&mut self, rhs: NumericVector<T>) {
        *self -= &rhs;
    }
}

impl<T: Number> Mul<T> for &NumericVector<T> {
    type Output = NumericVector<T>;

    fn mul(self, k: T) -> NumericVector<T> {
        let mut out = self.clone();
        out *= k;
        out
    }
}

impl<T: Number> MulAssign<T> for NumericVector<T> {
    fn mul_assign(&mut self, k: T) {
        if k.is_one() {
            return;
        }
        self.iter_mut().for_each(|v| *v = v.wrapping_mul(k));
    }
}

impl<T: Number> Div<T> for &NumericVector<T> {
    type Output = NumericVector<T>;

    fn div(self, k: T) -> NumericVector<T> {
        let mut out = self.clone();
        out /= k;
        out
    }
}

impl<T: Number> DivAssign<T> for NumericVector<T> {
    fn div_assign(&mut self, k: T) {
        if k.is_zero() {
            self.record(Status::DividedZero);
            return;
        }
        self.iter_mut().for_each(|v| *v = v.wrapping_div(k));
    }
}

forward_scalar_binop!(impl Mul, mul for NumericVector);
forward_scalar_binop!(impl Div, div for NumericVector);
