//! Summation kernels shared by both containers.
//!
//! With the `rayon` feature enabled, inputs at or above [`PAR_THRESHOLD`]
//! elements are reduced on the rayon pool; smaller inputs stay serial.

use crate::core::traits::Number;

/// Minimum input length before the parallel path is taken.
pub const PAR_THRESHOLD: usize = 4096;

/// Sum of a slice of elements.
pub fn sum<T: Number>(values: &[T]) -> T {
    #[cfg(feature = "rayon")]
    {
        if values.len() >= PAR_THRESHOLD {
            use rayon::prelude::*;
            return values
                .par_iter()
                .copied()
                .reduce(T::zero, T::wrapping_add);
        }
    }
    values.iter().fold(T::zero(), |acc, &v| acc.wrapping_add(v))
}

/// Sum of `f(item)` over a slice, e.g. row sums of a matrix.
pub fn sum_by<U, T, F>(items: &[U], f: F) -> T
where
    U: Sync,
    T: Number,
    F: Fn(&U) -> T + Send + Sync,
{
    #[cfg(feature = "rayon")]
    {
        if items.len() >= PAR_THRESHOLD {
            use rayon::prelude::*;
            return items.par_iter().map(&f).reduce(T::zero, T::wrapping_add);
        }
    }
    items.iter().map(f).fold(T::zero(), T::wrapping_add)
}
