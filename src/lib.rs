//! numcon: owned numeric vector and matrix value types with in-band fault status.
//!
//! This crate provides [`NumericVector`] and [`NumericMatrix`], heap-backed
//! containers with arithmetic and comparison operators. Recoverable faults
//! (out-of-range index, mismatched operands, zero divisor, negative fill for
//! an unsigned type, failed allocation) never panic; they are recorded as a
//! [`Status`] on the container and a best-effort value is returned. A checked
//! API returning [`KError`] is offered alongside for callers who prefer
//! `Result`.
//!
//! Recording a fault needs a mutable borrow. `v[i]` and `m[(r, c)]` on a
//! shared borrow still clamp an out-of-range index, but the fault is dropped.
//! Use `clamped`, which returns the fault next to the element, or `at` and
//! `IndexMut`, which record it on the container:
//!
//! ```
//! use numcon::{NumericVector, Status};
//!
//! let mut v = NumericVector::from(vec![1, 2, 3]);
//! assert_eq!(v[7], 3);
//! assert!(v.status().is_good());
//! assert_eq!(v.clamped(7), (&3, Some(Status::BoundArray)));
//! assert_eq!(*v.at(7), 3);
//! assert_eq!(v.status(), Status::BoundArray);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod matrix;
pub mod utils;
pub mod vector;

// Re-exports for convenience
pub use config::*;
pub use crate::core::Number;
pub use error::*;
pub use matrix::NumericMatrix;
pub use utils::live_count;
pub use vector::NumericVector;
