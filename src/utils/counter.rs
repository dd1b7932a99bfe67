//! Process-wide count of live `NumericVector` instances.
//!
//! Diagnostics only; nothing in the crate depends on the value.

use std::sync::atomic::{AtomicUsize, Ordering};

static LIVE_VECTORS: AtomicUsize = AtomicUsize::new(0);

/// Number of `NumericVector` values currently alive in the process,
/// including the rows owned by every `NumericMatrix`.
pub fn live_count() -> usize {
    LIVE_VECTORS.load(Ordering::Relaxed)
}

pub(crate) fn acquire() {
    LIVE_VECTORS.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn release() {
    LIVE_VECTORS.fetch_sub(1, Ordering::Relaxed);
}
