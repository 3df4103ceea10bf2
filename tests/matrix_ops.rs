//! Integration tests for the DynMatrix container.

use std::io::Cursor;

use dynmat::{DynMatrix, DynVector, Error, MAX_MATRIX_SIZE};

fn matrix_2x2(values: [[f64; 2]; 2]) -> DynMatrix<f64> {
    DynMatrix::from_vec(vec![values[0].to_vec(), values[1].to_vec()]).unwrap()
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn new_with_positive_dimension() {
    let m = DynMatrix::<i32>::new(5).unwrap();
    assert_eq!(m.dim(), 5);
    for row in m.iter() {
        assert_eq!(row.len(), 5);
        assert!(row.iter().all(|x| *x == 0));
    }
}

#[test]
fn new_rejects_zero_dimension() {
    let err = DynMatrix::<i32>::new(0).unwrap_err();
    assert!(matches!(err, Error::InvalidSize { size: 0, .. }));
}

#[test]
fn new_rejects_over_limit_dimension() {
    let err = DynMatrix::<i32>::new(MAX_MATRIX_SIZE).unwrap_err();
    assert!(matches!(err, Error::InvalidSize { .. }));
}

#[test]
fn from_vec_builds_square_matrix() {
    let m = matrix_2x2([[1.0, 2.0], [3.0, 4.0]]);
    assert_eq!(m.dim(), 2);
    assert_eq!(m[1][0], 3.0);
}

#[test]
fn from_vec_rejects_ragged_rows() {
    let err = DynMatrix::from_vec(vec![vec![1, 2], vec![3]]).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidShape {
            row: 1,
            len: 1,
            expected: 2
        }
    ));
}

#[test]
fn from_rows_validates_row_lengths() {
    let rows = DynVector::from_vec(vec![
        DynVector::from_vec(vec![1, 2, 3]).unwrap(),
        DynVector::from_vec(vec![4, 5, 6]).unwrap(),
        DynVector::from_vec(vec![7, 8]).unwrap(),
    ])
    .unwrap();
    let err = DynMatrix::from_rows(rows).unwrap_err();
    assert!(matches!(err, Error::InvalidShape { row: 2, .. }));
}

// ---------------------------------------------------------------------------
// Indexing and access
// ---------------------------------------------------------------------------

#[test]
fn set_and_get_element() {
    let mut m = DynMatrix::<i32>::new(2).unwrap();
    m[1][1] = 1;
    assert_eq!(m[1][1], 1);
}

#[test]
fn at_rejects_out_of_range_row() {
    let m = DynMatrix::<i32>::new(2).unwrap();
    let err = m.at(3).unwrap_err();
    assert!(matches!(err, Error::IndexOutOfRange { index: 3, len: 2 }));
}

#[test]
fn at_chains_into_row_checks() {
    let mut m = DynMatrix::<i32>::new(2).unwrap();
    let err = m.at(1).unwrap().at(2).unwrap_err();
    assert!(matches!(err, Error::IndexOutOfRange { index: 2, len: 2 }));
    *m.at_mut(0).unwrap().at_mut(1).unwrap() = 5;
    assert_eq!(m[0][1], 5);
}

// ---------------------------------------------------------------------------
// Copy, move, equality
// ---------------------------------------------------------------------------

#[test]
fn clone_equals_source_and_owns_storage() {
    let mut m = DynMatrix::<i32>::new(2).unwrap();
    m[0][0] = 1;
    let mut c = m.clone();
    assert_eq!(c, m);
    c[0][0] = 2;
    assert_eq!(m[0][0], 1);
    assert_ne!(c, m);
}

#[test]
fn take_transfers_rows_and_empties_source() {
    let mut m = matrix_2x2([[1.0, 2.0], [3.0, 4.0]]);
    let snapshot = m.clone();
    let moved = m.take();
    assert_eq!(moved, snapshot);
    assert_eq!(m.dim(), 0);
}

#[test]
fn swap_exchanges_matrices() {
    let mut a = matrix_2x2([[1.0, 2.0], [3.0, 4.0]]);
    let mut b = matrix_2x2([[5.0, 6.0], [7.0, 8.0]]);
    let a0 = a.clone();
    let b0 = b.clone();
    a.swap(&mut b);
    assert_eq!(a, b0);
    assert_eq!(b, a0);
}

#[test]
fn equality_is_reflexive_and_size_sensitive() {
    let m = DynMatrix::<i32>::new(2).unwrap();
    assert_eq!(m, m);
    let bigger = DynMatrix::<i32>::new(4).unwrap();
    assert_ne!(m, bigger);
}

// ---------------------------------------------------------------------------
// Transpose
// ---------------------------------------------------------------------------

#[test]
fn transpose_swaps_rows_and_columns() {
    let m = matrix_2x2([[1.0, 2.0], [3.0, 4.0]]);
    let t = m.transpose();
    assert_eq!(t, matrix_2x2([[1.0, 3.0], [2.0, 4.0]]));
    // source is unchanged
    assert_eq!(m[0][1], 2.0);
}

#[test]
fn transpose_is_involutive() {
    let m = matrix_2x2([[1.0, -2.5], [0.0, 4.25]]);
    assert_eq!(m.transpose().transpose(), m);
}

// ---------------------------------------------------------------------------
// Matrix-scalar and matrix-vector arithmetic
// ---------------------------------------------------------------------------

#[test]
fn scale_multiplies_every_entry() {
    let m = matrix_2x2([[1.0, 2.0], [3.0, 4.0]]);
    let scaled = &m * 2.0;
    assert_eq!(scaled, matrix_2x2([[2.0, 4.0], [6.0, 8.0]]));
    assert_eq!(m.scale(&2.0), scaled);
}

#[test]
fn identity_times_vector_is_identity_map() {
    let mut id = DynMatrix::<f64>::new(3).unwrap();
    for i in 0..3 {
        id[i][i] = 1.0;
    }
    let v = DynVector::from_slice(&[2.0, -3.0, 0.5]).unwrap();
    assert_eq!(id.mul_vector(&v).unwrap(), v);
}

#[test]
fn diagonal_matrix_times_vector_scales_elementwise() {
    let mut d = DynMatrix::<f64>::new(2).unwrap();
    d[0][0] = 6.0;
    d[1][1] = 6.0;
    let v = DynVector::from_slice(&[1.5, -2.0]).unwrap();
    assert_eq!(d.mul_vector(&v).unwrap(), &v * 6.0);
    assert_eq!(&d * &v, &v * 6.0);
}

#[test]
fn mul_vector_rejects_mismatched_length() {
    let m = DynMatrix::<f64>::new(2).unwrap();
    let v = DynVector::<f64>::new(3).unwrap();
    assert!(matches!(
        m.mul_vector(&v).unwrap_err(),
        Error::SizeMismatch { left: 2, right: 3 }
    ));
}

// ---------------------------------------------------------------------------
// Matrix-matrix arithmetic
// ---------------------------------------------------------------------------

#[test]
fn add_matrices_with_equal_size() {
    let mut m1 = DynMatrix::<i32>::new(2).unwrap();
    let mut m2 = DynMatrix::<i32>::new(2).unwrap();
    m1[0][0] = 6;
    m2[0][0] = 4;
    let m3 = m1.try_add(&m2).unwrap();
    assert_eq!(m3[0][0], 10);
    assert_eq!(m3[0][1], 0);
    assert_eq!(m3[1][0], 0);
    assert_eq!(m3[1][1], 0);
}

#[test]
fn subtract_matrices_with_equal_size() {
    let mut m1 = DynMatrix::<i32>::new(2).unwrap();
    let mut m2 = DynMatrix::<i32>::new(2).unwrap();
    m1[0][0] = 6;
    m2[0][0] = 4;
    assert_eq!(m1.try_sub(&m2).unwrap()[0][0], 2);
    assert_eq!(&m1 - &m2, m1.try_sub(&m2).unwrap());
}

#[test]
fn multiply_matrices_with_equal_size() {
    let a = matrix_2x2([[1.0, 2.0], [3.0, 4.0]]);
    let b = matrix_2x2([[5.0, 6.0], [7.0, 8.0]]);
    let product = a.try_mul(&b).unwrap();
    assert_eq!(product, matrix_2x2([[19.0, 22.0], [43.0, 50.0]]));
    assert_eq!(&a * &b, product);
}

#[test]
fn identity_is_multiplicative_neutral() {
    let mut id = DynMatrix::<f64>::new(2).unwrap();
    id[0][0] = 1.0;
    id[1][1] = 1.0;
    let m = matrix_2x2([[1.0, 2.0], [3.0, 4.0]]);
    assert_eq!(m.try_mul(&id).unwrap(), m);
    assert_eq!(id.try_mul(&m).unwrap(), m);
}

#[test]
fn mismatched_dimensions_fail_with_size_mismatch() {
    let a = DynMatrix::<i32>::new(2).unwrap();
    let b = DynMatrix::<i32>::new(3).unwrap();
    assert!(matches!(
        a.try_add(&b).unwrap_err(),
        Error::SizeMismatch { left: 2, right: 3 }
    ));
    assert!(matches!(
        a.try_sub(&b).unwrap_err(),
        Error::SizeMismatch { .. }
    ));
    assert!(matches!(
        a.try_mul(&b).unwrap_err(),
        Error::SizeMismatch { .. }
    ));
}

#[test]
#[should_panic(expected = "matching dimensions")]
fn addition_operator_panics_on_mismatch() {
    let a = DynMatrix::<i32>::new(2).unwrap();
    let b = DynMatrix::<i32>::new(3).unwrap();
    let _ = &a + &b;
}

// ---------------------------------------------------------------------------
// Stream I/O
// ---------------------------------------------------------------------------

#[test]
fn display_puts_each_row_on_its_own_line() {
    let m = DynMatrix::from_vec(vec![vec![1, 2], vec![3, 4]]).unwrap();
    assert_eq!(format!("{}", m), "1 2\n3 4");
}

#[test]
fn display_read_round_trip() {
    let m = matrix_2x2([[1.5, -2.0], [0.25, 4.0]]);
    let mut parsed = DynMatrix::<f64>::new(2).unwrap();
    parsed.read_from(&mut Cursor::new(format!("{}", m))).unwrap();
    assert_eq!(parsed, m);
}

#[test]
fn read_from_failure_leaves_matrix_untouched() {
    let mut m = DynMatrix::from_vec(vec![vec![1, 2], vec![3, 4]]).unwrap();
    let before = m.clone();
    let err = m.read_from(&mut Cursor::new("9 9 oops 9")).unwrap_err();
    assert!(matches!(err, Error::Parse { index: 2, .. }));
    assert_eq!(m, before);

    let err = m.read_from(&mut Cursor::new("1 2 3")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(m, before);
}
