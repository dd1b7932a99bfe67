//! Fixed-length, heap-owned numeric vector with an in-band fault status.
//!
//! `NumericVector` never panics on a recoverable fault. Out-of-range indexing
//! is redirected to the last element, mismatched operands and zero divisors
//! produce a fallback value, and in every case a [`Status`] code is left for
//! the caller to poll.
//!
//! Faults are *recorded* only through `&mut self` access. Read-only access
//! (`Index`, [`NumericVector::clamped`]) performs the same redirection but
//! hands the fault back to the caller instead of storing it.
//!
//! # Example
//! ```
//! use numcon::{NumericVector, Status};
//!
//! let mut v = NumericVector::from(vec![2, 4, 6]);
//! v /= 0;
//! assert_eq!(v.status(), Status::DividedZero);
//! assert_eq!(v.as_slice(), &[2, 4, 6]);
//! ```

pub mod ops;

use crate::core::reduce;
use crate::core::traits::Number;
use crate::error::{KError, Status};
use crate::utils::counter;
use log::{debug, warn};
use std::cmp::Ordering;
use std::fmt;
use std::io::{self, BufRead};
use std::ops::{Index, IndexMut};

#[derive(Debug)]
pub struct NumericVector<T> {
    data: Vec<T>,
    status: Status,
}

/// Allocate `len` copies of `value`, reporting failure as a status instead of aborting.
fn alloc<T: Clone>(len: usize, value: T) -> (Vec<T>, Status) {
    let mut data = Vec::new();
    match data.try_reserve_exact(len) {
        Ok(()) => {
            data.resize(len, value);
            (data, Status::GoodAllocator)
        }
        Err(err) => {
            warn!("numeric vector: allocation of {len} elements failed: {err}");
            (Vec::new(), Status::BadAllocator)
        }
    }
}

impl<T> NumericVector<T> {
    fn from_parts(data: Vec<T>, status: Status) -> Self {
        counter::acquire();
        Self { data, status }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Consume the vector and return its storage.
    pub fn into_vec(mut self) -> Vec<T> {
        std::mem::take(&mut self.data)
    }

    /// Last fault recorded on this vector.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Overwrite the fault code, e.g. to clear it after handling.
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Diagnostic name of the current fault code.
    pub fn status_name(&self) -> &'static str {
        self.status.as_str()
    }

    pub(crate) fn record(&mut self, status: Status) {
        debug!("numeric vector (len {}): {}", self.data.len(), status);
        self.status = status;
    }

    /// Resolve `index` to a valid slot, or to the last slot plus a fault.
    fn slot(&self, index: usize) -> (usize, Option<Status>) {
        if index < self.data.len() {
            (index, None)
        } else {
            (self.data.len().saturating_sub(1), Some(Status::BoundArray))
        }
    }

    /// Clamp-and-flag read: out-of-range indices are redirected to the last
    /// element and the fault is returned rather than recorded.
    ///
    /// # Panics
    /// If the vector is empty (zero length or failed allocation).
    pub fn clamped(&self, index: usize) -> (&T, Option<Status>) {
        let (slot, fault) = self.slot(index);
        (&self.data[slot], fault)
    }

    /// Clamp-and-flag access: out-of-range indices are redirected to the last
    /// element and [`Status::BoundArray`] is recorded.
    ///
    /// # Panics
    /// If the vector is empty (zero length or failed allocation).
    pub fn at(&mut self, index: usize) -> &mut T {
        let (slot, fault) = self.slot(index);
        if let Some(status) = fault {
            self.record(status);
        }
        &mut self.data[slot]
    }

    /// Strict bounds-checked read.
    pub fn get(&self, index: usize) -> Result<&T, KError> {
        let len = self.data.len();
        self.data.get(index).ok_or(KError::OutOfBounds { index, len })
    }

    /// Strict bounds-checked write access.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, KError> {
        let len = self.data.len();
        self.data
            .get_mut(index)
            .ok_or(KError::OutOfBounds { index, len })
    }

    /// Assign through the clamp-and-flag path.
    pub fn set(&mut self, value: T, index: usize) {
        *self.at(index) = value;
    }
}

impl<T: Number> NumericVector<T> {
    /// One zero element.
    pub fn new() -> Self {
        Self::zeros(1)
    }

    /// `len` zero elements.
    pub fn zeros(len: usize) -> Self {
        let (data, status) = alloc(len, T::zero());
        Self::from_parts(data, status)
    }

    /// `len` copies of `fill`.
    ///
    /// For unsigned element types `fill` is an `i64`; a negative (or
    /// unrepresentable) value yields a zero vector with
    /// [`Status::BadInitialized`].
    pub fn filled(len: usize, fill: T::Fill) -> Self {
        match T::from_fill(fill) {
            Ok(value) => Self::from_elem(len, value),
            Err(err) => {
                let mut v = Self::zeros(len);
                if v.status.is_good() {
                    v.record(err.status());
                }
                v
            }
        }
    }

    /// `len` copies of an already validated element.
    pub(crate) fn from_elem(len: usize, value: T) -> Self {
        let (data, status) = alloc(len, value);
        Self::from_parts(data, status)
    }

    /// Copy a slice into a new vector.
    pub fn from_slice(values: &[T]) -> Self {
        let mut data = Vec::new();
        match data.try_reserve_exact(values.len()) {
            Ok(()) => {
                data.extend_from_slice(values);
                Self::from_parts(data, Status::GoodAllocator)
            }
            Err(err) => {
                warn!("numeric vector: copy of {} elements failed: {err}", values.len());
                Self::from_parts(Vec::new(), Status::BadAllocator)
            }
        }
    }

    /// Scalar sum of all elements.
    pub fn sum(&self) -> T {
        reduce::sum(&self.data)
    }

    /// Read exactly `len()` whitespace-separated elements from `reader` into
    /// the existing storage. The vector is never resized; elements after a
    /// parse failure keep their previous values.
    ///
    /// Input is consumed token by token and reading stops right after the
    /// last element, so several vectors can be read from one reader.
    pub fn read_from<R: BufRead>(&mut self, mut reader: R) -> Result<(), KError> {
        let mut token = Vec::new();
        for index in 0..self.data.len() {
            if !next_token(&mut reader, &mut token)? {
                return Err(KError::UnexpectedEof(index));
            }
            let parsed = std::str::from_utf8(&token)
                .ok()
                .and_then(|t| t.parse::<T>().ok());
            self.data[index] = parsed.ok_or_else(|| KError::Parse {
                index,
                token: String::from_utf8_lossy(&token).into_owned(),
            })?;
        }
        Ok(())
    }

    /// Elements sorted with NaN last, for multiset comparison.
    fn sorted(&self) -> Vec<T> {
        let mut values = self.data.clone();
        values.sort_by(T::sort_cmp);
        values
    }
}

/// Fill `token` with the next whitespace-delimited token. Leading whitespace
/// is consumed; the delimiter after the token is left in the reader.
/// Returns `false` at end of input with no token.
fn next_token<R: BufRead>(reader: &mut R, token: &mut Vec<u8>) -> io::Result<bool> {
    token.clear();
    loop {
        let buf = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        if buf.is_empty() {
            return Ok(!token.is_empty());
        }
        let start = if token.is_empty() {
            buf.iter()
                .position(|b| !b.is_ascii_whitespace())
                .unwrap_or(buf.len())
        } else {
            0
        };
        let rest = &buf[start..];
        match rest.iter().position(u8::is_ascii_whitespace) {
            Some(end) => {
                token.extend_from_slice(&rest[..end]);
                reader.consume(start + end);
                return Ok(true);
            }
            None => {
                token.extend_from_slice(rest);
                let used = buf.len();
                reader.consume(used);
            }
        }
    }
}

impl<T: Number> Default for NumericVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Number> Clone for NumericVector<T> {
    /// Deep copy. The copy starts with a healthy status.
    fn clone(&self) -> Self {
        Self::from_slice(&self.data)
    }

    /// Releases the current buffer and copies `source` into a new one.
    /// The existing status is kept unless the new allocation fails.
    fn clone_from(&mut self, source: &Self) {
        self.data = Vec::new();
        match self.data.try_reserve_exact(source.len()) {
            Ok(()) => self.data.extend_from_slice(&source.data),
            Err(err) => {
                warn!("numeric vector: copy of {} elements failed: {err}", source.len());
                self.record(Status::BadAllocator);
            }
        }
    }
}

impl<T> Drop for NumericVector<T> {
    fn drop(&mut self) {
        counter::release();
    }
}

impl<T> From<Vec<T>> for NumericVector<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_parts(data, Status::GoodAllocator)
    }
}

impl<T: Number> From<&[T]> for NumericVector<T> {
    fn from(values: &[T]) -> Self {
        Self::from_slice(values)
    }
}

impl<T> FromIterator<T> for NumericVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<'a, T> IntoIterator for &'a NumericVector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut NumericVector<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

/// Clamp-and-flag read; the fault is dropped because `&self` cannot record
/// it. Use [`NumericVector::clamped`] to observe it.
impl<T> Index<usize> for NumericVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.clamped(index).0
    }
}

/// Clamp-and-flag write; records [`Status::BoundArray`] when redirected.
impl<T> IndexMut<usize> for NumericVector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.at(index)
    }
}

/// Multiset equality: lengths must match, then sorted copies are compared
/// element-wise, so `[1, 2]` equals `[2, 1]`.
impl<T: Number> PartialEq for NumericVector<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.sorted() == other.sorted()
    }

    #[allow(clippy::partialeq_ne_impl)]
    fn ne(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return true;
        }
        !self.eq(other)
    }
}

/// Ordering by element sum. `<=` and `>=` are the negations of `>` and `<`,
/// so with NaN sums both hold at once.
impl<T: Number> PartialOrd for NumericVector<T> {
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

/// Elements separated by single spaces, on one line.
impl<T: fmt::Display> fmt::Display for NumericVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((first, rest)) = self.data.split_first() {
            write!(f, "{first}")?;
            rest.iter().try_for_each(|value| write!(f, " {value}"))?;
        }
        Ok(())
    }
}
