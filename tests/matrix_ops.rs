//! Tests for `NumericMatrix` arithmetic and multiplication.
//!
//! The `*` operator reproduces the historical shape-selection rule
//! (`MulRule::Compat`); the conventional product is checked separately against
//! a hand computation and against Faer.

use approx::assert_abs_diff_eq;
use numcon::{Faults, MulRule, NumericMatrix, Status};
use rand::Rng;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn mat(rows: Vec<Vec<i64>>) -> NumericMatrix<i64> {
    NumericMatrix::from_rows(rows).unwrap()
}

/// Builds a random dense `rows x columns` matrix in `[-1, 1)`.
fn random(rows: usize, columns: usize) -> NumericMatrix<f64> {
    let mut rng = rand::thread_rng();
    let data = (0..rows)
        .map(|_| (0..columns).map(|_| rng.gen_range(-1.0..1.0)).collect())
        .collect();
    NumericMatrix::from_rows(data).unwrap()
}

/// 2x3 times 3x2 under the compat rule: output is 2x2 and the inner sum
/// runs over the output row count (two terms), not the shared dimension.
#[test]
fn compat_two_by_three_times_three_by_two() {
    init();
    let a = mat(vec![vec![1, 2, 3], vec![4, 5, 6]]);
    let b = mat(vec![vec![7, 8], vec![9, 10], vec![11, 12]]);
    let c = &a * &b;
    assert_eq!(c.shape(), (2, 2));
    assert_eq!(c.row(0).unwrap().as_slice(), &[25, 28]);
    assert_eq!(c.row(1).unwrap().as_slice(), &[73, 82]);
    assert!(c.faults().is_empty());
}

/// 3x2 times 2x3 under the compat rule reads past both operands; reads are
/// clamped and the product is flagged.
#[test]
fn compat_three_by_two_times_two_by_three() {
    init();
    let a = mat(vec![vec![1, 2], vec![3, 4], vec![5, 6]]);
    let b = mat(vec![vec![1, 2, 3], vec![4, 5, 6]]);
    let c = &a * &b;
    assert_eq!(c.shape(), (3, 3));
    assert_eq!(c.row(0).unwrap().as_slice(), &[21, 24, 27]);
    assert_eq!(c.status(), Status::BoundArray);
    assert!(a.faults().is_empty() && b.faults().is_empty());
}

/// The conventional product of the same operands.
#[test]
fn conventional_two_by_three_times_three_by_two() {
    init();
    let a = mat(vec![vec![1, 2, 3], vec![4, 5, 6]]);
    let b = mat(vec![vec![7, 8], vec![9, 10], vec![11, 12]]);
    let c = a.product(&b, MulRule::Conventional);
    assert_eq!(c.shape(), (2, 2));
    assert_eq!(c.row(0).unwrap().as_slice(), &[58, 64]);
    assert_eq!(c.row(1).unwrap().as_slice(), &[139, 154]);

    let d = b.checked_mul(&a).unwrap();
    assert_eq!(d.shape(), (3, 3));
    assert_eq!(d.row(0).unwrap().as_slice(), &[39, 54, 69]);
    assert!(a.checked_mul(&a).is_err());
}

/// Conventional product agrees with Faer on random rectangular inputs.
#[test]
fn conventional_matches_faer() {
    init();
    for (m, k, n) in [(3, 4, 5), (8, 1, 2), (20, 30, 10)] {
        let a = random(m, k);
        let b = random(k, n);
        let ours = a.checked_mul(&b).unwrap();
        let (fa, fb) = (a.to_faer(), b.to_faer());
        let reference = &fa * &fb;
        assert_eq!(ours.shape(), (m, n));
        for i in 0..m {
            for j in 0..n {
                assert_abs_diff_eq!(*ours.get(i, j).unwrap(), reference[(i, j)], epsilon = 1e-12);
            }
        }
    }
}

/// `*=` leaves `self` untouched for incompatible shapes and takes the
/// product (and its status) otherwise.
#[test]
fn mul_assign_asymmetry() {
    init();
    let mut a = mat(vec![vec![1, 2, 3]]);
    let b = mat(vec![vec![1, 2], vec![3, 4]]);
    a *= &b;
    assert_eq!(a.shape(), (1, 3));
    assert!(a.status().is_good());
    assert_eq!((&a * &b).shape(), (1, 1));

    let mut sq = mat(vec![vec![1, 0], vec![0, 1]]);
    sq *= mat(vec![vec![2, 3], vec![4, 5]]);
    assert_eq!(sq.row(1).unwrap().as_slice(), &[4, 5]);
}

/// Element-wise operators and the scalar divisor policy.
#[test]
fn element_wise_and_division() {
    init();
    let a = NumericMatrix::<f64>::filled(2, 3, 4.0);
    let b = NumericMatrix::<f64>::filled(2, 3, 1.0);
    let mut c = &a + &b;
    c -= &b;
    assert_eq!(c, a);
    c += b;
    assert_abs_diff_eq!(c.sum(), 30.0);

    let z = &a / 0.0;
    assert_eq!(z.status(), Status::DividedZero);
    assert_abs_diff_eq!(z.sum(), 24.0);
    let h = a / 2.0;
    assert_abs_diff_eq!(h.sum(), 12.0);
    assert!(h.status().is_good());
}

/// Row and column faults are kept on separate channels and merged by `faults`.
#[test]
fn two_fault_channels() {
    init();
    let mut m = NumericMatrix::<i32>::square(3);
    m[(5, 0)] = 7;
    assert_eq!(m[(2, 2)], 7);
    assert_eq!(m.status(), Status::BoundArray);
    m[(0, 5)] = 9;
    assert_eq!(m[(0, 2)], 9);
    assert_eq!(m.row(0).unwrap().status(), Status::BoundArray);
    assert_eq!(m.faults(), Faults::BOUND_ARRAY);

    m.clear_faults();
    m /= 0;
    assert_eq!(m.faults(), Faults::DIVIDED_ZERO);
}

/// Equality is per-row multiset equality; ordering uses the total sum.
#[test]
fn comparisons() {
    init();
    let a = mat(vec![vec![1, 2], vec![3, 4]]);
    let b = mat(vec![vec![2, 1], vec![4, 3]]);
    let c = mat(vec![vec![3, 4], vec![1, 2]]);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, mat(vec![vec![1, 2, 3, 4]]));
    let bigger = mat(vec![vec![1, 2], vec![3, 5]]);
    assert!(a < bigger && bigger > a);
    assert!(a <= c && a >= c);
}

/// Copies are deep at both levels.
#[test]
fn deep_copy() {
    init();
    let original = mat(vec![vec![1, 2], vec![3, 4]]);
    let mut copy = original.clone();
    copy.set(0, 0, 100);
    copy.row_mut(1).unwrap()[1] = -1;
    assert_eq!(original.row(0).unwrap().as_slice(), &[1, 2]);
    assert_eq!(original.row(1).unwrap().as_slice(), &[3, 4]);
    assert_eq!(original.to_string(), "1 2\n3 4\n");
}

/// `+=` on mismatched shapes is a silent no-op, like the vector form.
#[test]
fn add_assign_mismatch_leaves_self() {
    init();
    let mut a = mat(vec![vec![1, 2], vec![3, 4]]);
    a += mat(vec![vec![9, 9, 9]]);
    assert_eq!(a, mat(vec![vec![1, 2], vec![3, 4]]));
    assert_eq!(a.row(0).unwrap().as_slice(), &[1, 2]);
    assert!(a.faults().is_empty());
    assert_eq!(a.status_name(), "GOOD_ALLOCATOR");
}

/// The matrix-level status name follows the last recorded fault.
#[test]
fn matrix_status_name() {
    init();
    let mut m = NumericMatrix::<f64>::square(2);
    assert_eq!(m.status_name(), "GOOD_ALLOCATOR");
    m /= 0.0;
    assert_eq!(m.status_name(), "DIVIDED_ZERO");
    m.set(5, 0, 1.0);
    assert_eq!(m.status_name(), "BOUND_ARRAY");
    m.clear_faults();
    assert_eq!(m.status_name(), "GOOD_ALLOCATOR");
}

/// Products with a zero-length shared dimension never read an element.
#[test]
fn zero_sized_products() {
    init();
    let a = NumericMatrix::<i32>::zeros(2, 0);
    let b = NumericMatrix::<i32>::zeros(0, 2);

    let compat = &a * &b;
    assert_eq!(compat.shape(), (2, 2));
    assert_eq!(compat.sum(), 0);
    assert_eq!(compat.status(), Status::BoundArray);

    let conventional = a.checked_mul(&b).unwrap();
    assert_eq!(conventional.shape(), (2, 2));
    assert_eq!(conventional.sum(), 0);
    assert!(conventional.faults().is_empty());

    let empty = NumericMatrix::<i32>::zeros(0, 0);
    let e = &empty * &empty;
    assert_eq!(e.shape(), (0, 0));
    assert!(e.faults().is_empty());
}

/// Integer products wrap instead of panicking.
#[test]
fn integer_product_wraps() {
    init();
    let a = NumericMatrix::from_rows(vec![vec![u8::MAX]]).unwrap();
    let b = NumericMatrix::from_rows(vec![vec![2u8]]).unwrap();
    assert_eq!(*(&a * &b).get(0, 0).unwrap(), 254);
    assert_eq!(*a.checked_mul(&b).unwrap().get(0, 0).unwrap(), 254);
    let diff = &b - &a;
    assert_eq!(diff.row(0).unwrap().as_slice(), &[3]);
}
