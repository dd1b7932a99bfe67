//! Options for matrix multiplication.
//!
//! `NumericMatrix` multiplication historically picks its output shape by
//! comparing `lhs.rows` with `rhs.columns`, which only agrees with textbook
//! multiplication for some shapes. [`MulRule`] lets callers choose which rule
//! [`crate::NumericMatrix::product`] applies; the `*` operator always uses
//! [`MulRule::Compat`].

/// Rule used to size and accumulate a matrix product.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MulRule {
    /// Compatible when `lhs.rows == rhs.columns || lhs.columns == rhs.rows`.
    /// Output is `lhs.rows x rhs.columns` if `lhs.rows >= rhs.columns`,
    /// else `lhs.columns x rhs.rows`; the inner sum runs over the output row
    /// count and reads operands through the clamping accessors.
    #[default]
    Compat,
    /// `(m x k) * (k x n) = (m x n)`.
    Conventional,
}
