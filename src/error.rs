use bitflags::bitflags;
use std::fmt;
use thiserror::Error;

/// In-band fault code carried by every container.
///
/// Operators never panic on these faults; they record one of these codes and
/// return a best-effort fallback value instead.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Status {
    /// Storage could not be allocated.
    BadAllocator,
    /// Index outside the container, or operands of mismatched size.
    BoundArray,
    /// Negative (or unrepresentable) fill value for an unsigned element type.
    BadInitialized,
    /// No fault.
    #[default]
    GoodAllocator,
    /// Scalar division by zero.
    DividedZero,
}

impl Status {
    /// Diagnostic name of the fault code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::BadAllocator => "BAD_ALLOCATOR",
            Status::BoundArray => "BOUND_ARRAY",
            Status::BadInitialized => "BAD_INITIALIZED",
            Status::DividedZero => "DIVIDED_ZERO",
            Status::GoodAllocator => "GOOD_ALLOCATOR",
        }
    }

    pub fn is_good(&self) -> bool {
        *self == Status::GoodAllocator
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Union of fault codes observed across several status channels,
    /// e.g. a matrix and all of its rows.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Faults: u8 {
        const BAD_ALLOCATOR   = 0b0001;
        const BOUND_ARRAY     = 0b0010;
        const BAD_INITIALIZED = 0b0100;
        const DIVIDED_ZERO    = 0b1000;
    }
}

impl From<Status> for Faults {
    fn from(status: Status) -> Self {
        match status {
            Status::BadAllocator => Faults::BAD_ALLOCATOR,
            Status::BoundArray => Faults::BOUND_ARRAY,
            Status::BadInitialized => Faults::BAD_INITIALIZED,
            Status::DividedZero => Faults::DIVIDED_ZERO,
            Status::GoodAllocator => Faults::empty(),
        }
    }
}

// Structured error for the checked API

#[derive(Error, Debug)]
pub enum KError {
    #[error("index {index} out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },
    #[error("dimension mismatch: {lhs:?} vs {rhs:?}")]
    DimensionMismatch { lhs: (usize, usize), rhs: (usize, usize) },
    #[error("division by zero")]
    DivisionByZero,
    #[error("fill value {0} is not representable by the element type")]
    BadInitialized(i64),
    #[error("allocation of {0} elements failed")]
    Allocation(usize),
    #[error("parse error at element {index}: {token:?}")]
    Parse { index: usize, token: String },
    #[error("unexpected end of input after {0} elements")]
    UnexpectedEof(usize),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl KError {
    /// The in-band fault code the operator form records for this error.
    ///
    /// Stream input has no operator form, so its errors borrow the nearest
    /// code: a malformed token is `BadInitialized` (the element could not be
    /// initialised), while running out of input or an I/O failure is
    /// `BoundArray` (fewer elements than the vector's length were available).
    pub fn status(&self) -> Status {
        match self {
            KError::OutOfBounds { .. } | KError::DimensionMismatch { .. } => Status::BoundArray,
            KError::DivisionByZero => Status::DividedZero,
            KError::BadInitialized(_) | KError::Parse { .. } => Status::BadInitialized,
            KError::Allocation(_) => Status::BadAllocator,
            KError::UnexpectedEof(_) | KError::Io(_) => Status::BoundArray,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_match_codes() {
        assert_eq!(Status::default(), Status::GoodAllocator);
        assert_eq!(Status::BadInitialized.to_string(), "BAD_INITIALIZED");
        assert_eq!(Status::DividedZero.as_str(), "DIVIDED_ZERO");
    }

    #[test]
    fn faults_union() {
        let f = Faults::from(Status::BoundArray) | Faults::from(Status::GoodAllocator);
        assert_eq!(f, Faults::BOUND_ARRAY);
        assert!(Faults::from(Status::GoodAllocator).is_empty());
    }

    #[test]
    fn stream_errors_map_to_nearest_code() {
        let parse = KError::Parse {
            index: 0,
            token: "x".into(),
        };
        assert_eq!(parse.status(), Status::BadInitialized);
        assert_eq!(KError::UnexpectedEof(3).status(), Status::BoundArray);
        let io = KError::from(std::io::Error::other("closed"));
        assert_eq!(io.status(), Status::BoundArray);
        assert_eq!(KError::DivisionByZero.status(), Status::DividedZero);
    }
}
