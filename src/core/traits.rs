//! Element traits for the numeric containers.

use crate::error::KError;
use num_traits::{Num, NumAssign, NumCast, WrappingAdd, WrappingMul, WrappingSub};
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::str::FromStr;

/// Numeric element type: integers and floats, never characters.
pub trait Number:
    Copy
    + Num
    + NumAssign
    + NumCast
    + PartialOrd
    + Sum
    + Debug
    + Display
    + FromStr
    + Send
    + Sync
    + 'static
{
    /// Value accepted by the fill constructors.
    ///
    /// Unsigned types take a signed `i64` so that a negative fill can be
    /// detected and rejected; every other type takes `Self`.
    type Fill: Copy + Debug;

    /// Validate a fill value and convert it to an element.
    fn from_fill(fill: Self::Fill) -> Result<Self, KError>;

    // Element kernels. Integers wrap on overflow (including `MIN / -1`);
    // floats use plain IEEE arithmetic. Callers guard zero divisors.

    fn wrapping_add(self, rhs: Self) -> Self;

    fn wrapping_sub(self, rhs: Self) -> Self;

    fn wrapping_mul(self, rhs: Self) -> Self;

    fn wrapping_div(self, rhs: Self) -> Self;

    /// Total order used for multiset comparison. NaN sorts after every number.
    fn sort_cmp(&self, other: &Self) -> Ordering {
        match self.partial_cmp(other) {
            Some(ord) => ord,
            #[allow(clippy::eq_op)]
            None => match (self != self, other != other) {
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                _ => Ordering::Equal,
            },
        }
    }
}

macro_rules! impl_wrapping_integer {
    ($t:ty) => {
        fn wrapping_add(self, rhs: Self) -> Self {
            WrappingAdd::wrapping_add(&self, &rhs)
        }

        fn wrapping_sub(self, rhs: Self) -> Self {
            WrappingSub::wrapping_sub(&self, &rhs)
        }

        fn wrapping_mul(self, rhs: Self) -> Self {
            WrappingMul::wrapping_mul(&self, &rhs)
        }

        fn wrapping_div(self, rhs: Self) -> Self {
            <$t>::wrapping_div(self, rhs)
        }
    };
}

macro_rules! impl_unsigned_number {
    ($($t:ty),* $(,)?) => {
        $(
            impl Number for $t {
                type Fill = i64;

                fn from_fill(fill: i64) -> Result<Self, KError> {
                    if fill < 0 {
                        return Err(KError::BadInitialized(fill));
                    }
                    <$t as NumCast>::from(fill).ok_or(KError::BadInitialized(fill))
                }

                impl_wrapping_integer!($t);
            }
        )*
    };
}

macro_rules! impl_signed_number {
    ($($t:ty),* $(,)?) => {
        $(
            impl Number for $t {
                type Fill = $t;

                fn from_fill(fill: $t) -> Result<Self, KError> {
                    Ok(fill)
                }

                impl_wrapping_integer!($t);
            }
        )*
    };
}

macro_rules! impl_float_number {
    ($($t:ty),* $(,)?) => {
        $(
            impl Number for $t {
                type Fill = $t;

                fn from_fill(fill: $t) -> Result<Self, KError> {
                    Ok(fill)
                }

                fn wrapping_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                fn wrapping_sub(self, rhs: Self) -> Self {
                    self - rhs
                }

                fn wrapping_mul(self, rhs: Self) -> Self {
                    self * rhs
                }

                fn wrapping_div(self, rhs: Self) -> Self {
                    self / rhs
                }
            }
        )*
    };
}

impl_unsigned_number!(u8, u16, u32, u64, usize);
impl_signed_number!(i8, i16, i32, i64, isize);
impl_float_number!(f32, f64);
