//! Property-based tests for the matrix algebra.

use proptest::prelude::*;

use crate::matrix::Matrix;

// Small integer-valued entries keep every sum and product exact
fn small_entry() -> impl Strategy<Value = f64> {
    (-50i32..50i32).prop_map(f64::from)
}

// Possibly ragged nested rows, 0-5 rows of 0-5 entries
fn ragged_rows() -> impl Strategy<Value = Vec<Vec<f64>>> {
    proptest::collection::vec(proptest::collection::vec(small_entry(), 0..=5), 0..=5)
}

fn matrix_with_shape(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
    proptest::collection::vec(proptest::collection::vec(small_entry(), cols), rows)
        .prop_map(Matrix::from_rows)
}

fn small_matrix() -> impl Strategy<Value = Matrix> {
    (1usize..5, 1usize..5).prop_flat_map(|(rows, cols)| matrix_with_shape(rows, cols))
}

proptest! {
    #[test]
    fn construct_is_rectangular(rows in ragged_rows()) {
        let m = Matrix::from_rows(rows.clone());
        let expected_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        prop_assert_eq!(m.rows(), rows.len());
        prop_assert_eq!(m.cols(), expected_cols);
        for (index, row) in rows.iter().enumerate() {
            let stored = m.get_row(index + 1);
            prop_assert_eq!(stored.len(), expected_cols);
            prop_assert_eq!(&stored[..row.len()], &row[..]);
            prop_assert!(stored[row.len()..].iter().all(|&x| x == 0.0));
        }
    }

    #[test]
    fn get_entry_outside_is_zero(m in small_matrix(), di in 1usize..4, dj in 1usize..4) {
        prop_assert_eq!(m.get_entry(m.rows() + di, 1), 0.0);
        prop_assert_eq!(m.get_entry(1, m.cols() + dj), 0.0);
        prop_assert_eq!(m.get_entry(0, dj), 0.0);
        prop_assert_eq!(m.get_entry(di, 0), 0.0);
    }

    #[test]
    fn set_entry_grows_with_zeros(m in small_matrix(), i in 1usize..8, j in 1usize..8, v in small_entry()) {
        let original = m.clone();
        let mut grown = m;
        grown.set_entry(v, i, j);

        prop_assert_eq!(grown.get_entry(i, j), v);
        prop_assert_eq!(grown.rows(), original.rows().max(i));
        prop_assert_eq!(grown.cols(), original.cols().max(j));
        for r in 1..=grown.rows() {
            for c in 1..=grown.cols() {
                if (r, c) != (i, j) {
                    prop_assert_eq!(grown.get_entry(r, c), original.get_entry(r, c));
                }
            }
        }
    }

    #[test]
    fn sum_with_itself_is_double(a in small_matrix()) {
        prop_assert_eq!(Matrix::sum(&a, &a), Matrix::scale(&a, 2.0));
    }

    #[test]
    fn cwise_with_zero_is_zero(a in small_matrix()) {
        let zero = Matrix::zero(a.rows(), a.cols());
        prop_assert_eq!(Matrix::cwise_product(&a, &zero), zero);
    }

    #[test]
    fn difference_with_itself_is_zero(a in small_matrix()) {
        prop_assert_eq!(Matrix::difference(&a, &a), Matrix::zero(a.rows(), a.cols()));
    }

    #[test]
    fn product_of_zeros_is_zero(n in 0usize..5, k in 0usize..5, p in 0usize..5) {
        prop_assert_eq!(
            Matrix::product(&Matrix::zero(n, k), &Matrix::zero(k, p)),
            Matrix::zero(n, p)
        );
    }

    #[test]
    fn product_is_associative(
        (a, b, c) in (1usize..4, 1usize..4, 1usize..4, 1usize..4).prop_flat_map(|(n, k, l, p)| {
            (matrix_with_shape(n, k), matrix_with_shape(k, l), matrix_with_shape(l, p))
        })
    ) {
        let left = Matrix::product(&Matrix::product(&a, &b), &c);
        let right = Matrix::product(&a, &Matrix::product(&b, &c));
        prop_assert_eq!(left, right);
    }

    #[test]
    fn transpose_twice_is_identity(a in small_matrix()) {
        prop_assert_eq!(a.transposed().transposed(), a);
    }

    #[test]
    fn transpose_reverses_product(
        (a, b) in (1usize..4, 1usize..4, 1usize..4).prop_flat_map(|(n, k, p)| {
            (matrix_with_shape(n, k), matrix_with_shape(k, p))
        })
    ) {
        prop_assert_eq!(
            Matrix::product(&a, &b).transposed(),
            Matrix::product(&b.transposed(), &a.transposed())
        );
    }

    #[test]
    fn randomize_within_bounds(rows in 0usize..6, cols in 0usize..6, lo in -10.0f64..10.0, width in 0.0f64..5.0) {
        let hi = lo + width;
        let r = Matrix::randomize(rows, cols, lo, hi).unwrap();
        prop_assert_eq!((r.rows(), r.cols()), (rows, cols));
        for row in r.rows_iter() {
            prop_assert!(row.iter().all(|&x| lo <= x && x <= hi));
        }
    }
}
