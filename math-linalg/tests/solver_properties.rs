//! Property tests for the elimination-based solvers
//!
//! Randomized inputs use a fixed seed so failures are reproducible.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use math_linalg::{EliminationConfig, LinalgError, Matrix, Vector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TRIALS: usize = 50;

fn random_vector(rng: &mut StdRng, n: usize) -> Vector {
    (0..n).map(|_| rng.random_range(-10.0..10.0)).collect()
}

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix {
    Matrix::from_rows((0..rows).map(|_| random_vector(rng, cols)).collect())
        .expect("random rows are non-empty and equal length")
}

/// Random matrix made non-singular by a dominant diagonal
fn random_invertible(rng: &mut StdRng, n: usize) -> Matrix {
    let a = random_matrix(rng, n, n);
    let shift = Matrix::identity(n).unwrap().scale(20.0 * n as f64);
    a.checked_add(&shift).unwrap()
}

/// Dominant-diagonal matrix with its rows reversed, so that partial
/// pivoting has to swap rows to recover the large pivots
fn random_reversed_invertible(rng: &mut StdRng, n: usize) -> Matrix {
    let a = random_invertible(rng, n);
    Matrix::from_rows(a.rows().iter().rev().cloned().collect()).unwrap()
}

fn cofactor_det(a: &Matrix) -> f64 {
    match a.shape() {
        (1, 1) => a[0][0],
        (2, 2) => a[0][0] * a[1][1] - a[0][1] * a[1][0],
        (3, 3) => {
            a[0][0] * (a[1][1] * a[2][2] - a[1][2] * a[2][1])
                - a[0][1] * (a[1][0] * a[2][2] - a[1][2] * a[2][0])
                + a[0][2] * (a[1][0] * a[2][1] - a[1][1] * a[2][0])
        }
        shape => panic!("no cofactor formula for {:?}", shape),
    }
}

#[test]
fn add_then_sub_recovers_vector() {
    let mut rng = StdRng::seed_from_u64(1);
    for n in 1..TRIALS {
        let u = random_vector(&mut rng, n);
        let v = random_vector(&mut rng, n);
        let back = u.checked_add(&v).unwrap().checked_sub(&v).unwrap();
        assert_abs_diff_eq!(back, u, epsilon = 1e-12);
    }
}

#[test]
fn matrix_vector_mismatch_fails_without_mutation() {
    let mut rng = StdRng::seed_from_u64(2);
    let a = random_matrix(&mut rng, 3, 4);
    let before = a.clone();
    for len in [1, 2, 3, 5, 8] {
        let x = random_vector(&mut rng, len);
        assert_eq!(
            a.mul_vector(&x),
            Err(LinalgError::DimensionMismatch {
                expected: 4,
                got: len
            })
        );
    }
    assert_eq!(a, before);
}

#[test]
fn plu_reconstructs_permuted_input() {
    let mut rng = StdRng::seed_from_u64(3);
    for n in 1..=8 {
        let a = random_matrix(&mut rng, n, n);
        let plu = a.plu_decomposition();
        let pa = plu.p().mul_matrix(&a).unwrap();
        let lu = plu.l().mul_matrix(plu.u()).unwrap();
        assert_abs_diff_eq!(pa, lu, epsilon = 1e-9);
    }
}

#[test]
fn plu_reconstructs_singular_input() {
    // third row is the sum of the first two
    let a = Matrix::new(vec![vec![1, 2, 3], vec![4, 5, 6], vec![5, 7, 9]]).unwrap();
    let (p, l, u) = a.plu_decomposition().into_parts();
    assert_abs_diff_eq!(
        p.mul_matrix(&a).unwrap(),
        l.mul_matrix(&u).unwrap(),
        epsilon = 1e-12
    );
    assert!(a.det().unwrap_err().is_singular());
}

#[test]
fn plu_factors_have_expected_structure() {
    let mut rng = StdRng::seed_from_u64(4);
    let a = random_matrix(&mut rng, 5, 5);
    let plu = a.plu_decomposition();
    let (p, l, u) = (plu.p(), plu.l(), plu.u());
    for i in 0..5 {
        assert_eq!(l[i][i], 1.0);
        for j in (i + 1)..5 {
            assert_eq!(l[i][j], 0.0);
        }
        for j in 0..i {
            assert_eq!(u[i][j], 0.0);
            // partial pivoting keeps every multiplier at most 1 in magnitude
            assert!(l[i][j].abs() <= 1.0);
        }
        assert_eq!(p[i].iter().filter(|&&x| x == 1.0).count(), 1);
        assert_eq!(p[i][plu.permutation()[i]], 1.0);
    }
}

#[test]
fn plu_of_matrix_with_sub_tolerance_column_is_row_echelon() {
    let mut rng = StdRng::seed_from_u64(12);
    for n in 2..=6 {
        // first column is below the pivot tolerance everywhere
        let rows = random_matrix(&mut rng, n, n)
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut values = row.to_vec();
                values[0] = (i as f64 + 1.0) * 1e-11;
                Vector::from(values)
            })
            .collect();
        let a = Matrix::from_rows(rows).unwrap();
        let plu = a.plu_decomposition();

        assert!(!plu.is_invertible());
        for i in 0..n {
            for j in 0..i {
                assert_eq!(plu.u()[i][j], 0.0);
            }
        }
        assert_eq!(plu.u()[0][0], 0.0);
        assert_abs_diff_eq!(
            plu.p().mul_matrix(&a).unwrap(),
            plu.l().mul_matrix(plu.u()).unwrap(),
            epsilon = 1e-9
        );
    }
}

#[test]
fn det_matches_cofactor_expansion() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut swapped = 0;
    for _ in 0..TRIALS {
        for n in 2..=3 {
            let a = random_matrix(&mut rng, n, n);
            assert_relative_eq!(
                a.det().unwrap(),
                cofactor_det(&a),
                epsilon = 1e-9,
                max_relative = 1e-10
            );
            if a.plu_decomposition().swaps() > 0 {
                swapped += 1;
            }
        }
    }
    assert!(swapped > 0);
}

#[test]
fn det_with_row_swaps_matches_cofactor_expansion() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..TRIALS {
        for n in 2..=3 {
            let a = random_reversed_invertible(&mut rng, n);
            assert!(a.plu_decomposition().swaps() > 0);
            assert_relative_eq!(a.det().unwrap(), cofactor_det(&a), max_relative = 1e-10);
        }
    }
}

#[test]
fn det_of_permutation_matrix() {
    let swap = Matrix::new(vec![vec![0, 1], vec![1, 0]]).unwrap();
    assert_eq!(swap.det().unwrap(), -1.0);

    let cycle = Matrix::new(vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 0, 0]]).unwrap();
    assert_eq!(cycle.det().unwrap(), 1.0);
}

#[test]
fn det_examples() {
    let a = Matrix::new(vec![vec![1, 2], vec![3, 8]]).unwrap();
    assert_relative_eq!(a.det().unwrap(), 2.0, epsilon = 1e-12);

    let b = Matrix::new(vec![vec![1, 2], vec![3, 4]]).unwrap();
    assert_relative_eq!(b.det().unwrap(), -2.0, epsilon = 1e-12);
    assert_eq!(b.rows()[1], Vector::new([3, 4]));
}

#[test]
fn det_requires_square() {
    let a = Matrix::new(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    assert_eq!(
        a.det(),
        Err(LinalgError::NonSquareMatrix { rows: 2, cols: 3 })
    );
    assert!(a.inverse().unwrap_err().is_dimension_error());
}

#[test]
fn singular_matrix_is_an_error() {
    let a = Matrix::new(vec![vec![1, 2], vec![2, 4]]).unwrap();
    assert_eq!(a.det(), Err(LinalgError::SingularMatrix { column: 1 }));
    assert!(a.solve(&Vector::new([1, 2])).unwrap_err().is_singular());
    assert!(a.inverse().unwrap_err().is_singular());
}

#[test]
fn solve_with_forced_pivoting() {
    let a = Matrix::new(vec![vec![0, 1], vec![1, 1]]).unwrap();
    let b = Vector::new([1, 2]);
    let x = a.solve(&b).unwrap();
    assert_relative_eq!(x, Vector::new([1.0, 1.0]), epsilon = 1e-12);
    // neither operand was touched
    assert_eq!(a[0], Vector::new([0, 1]));
    assert_eq!(b, Vector::new([1, 2]));
}

#[test]
fn solve_random_systems() {
    let mut rng = StdRng::seed_from_u64(6);
    for n in 1..=10 {
        let a = random_invertible(&mut rng, n);
        let x = random_vector(&mut rng, n);
        let b = a.mul_vector(&x).unwrap();
        assert_abs_diff_eq!(a.solve(&b).unwrap(), x, epsilon = 1e-9);
    }
}

#[test]
fn inverse_times_matrix_is_identity() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in 1..=8 {
        let a = random_invertible(&mut rng, n);
        let inv = a.inverse().unwrap();
        let id = Matrix::identity(n).unwrap();
        assert_abs_diff_eq!(a.mul_matrix(&inv).unwrap(), id, epsilon = 1e-9);
        assert_abs_diff_eq!(inv.mul_matrix(&a).unwrap(), id, epsilon = 1e-9);
    }
}

#[test]
fn solve_random_systems_with_row_swaps() {
    let mut rng = StdRng::seed_from_u64(14);
    for n in 2..=10 {
        let a = random_reversed_invertible(&mut rng, n);
        let factorization = a.plu_decomposition();
        assert!(factorization.swaps() > 0);

        let x = random_vector(&mut rng, n);
        let b = a.mul_vector(&x).unwrap();
        assert_abs_diff_eq!(a.solve(&b).unwrap(), x, epsilon = 1e-9);
        assert_abs_diff_eq!(factorization.solve(&b).unwrap(), x, epsilon = 1e-9);
    }
}

#[test]
fn inverse_with_row_swaps_is_identity() {
    let mut rng = StdRng::seed_from_u64(15);
    for n in 2..=8 {
        let a = random_reversed_invertible(&mut rng, n);
        assert!(a.plu_decomposition().swaps() > 0);

        let inv = a.inverse().unwrap();
        let id = Matrix::identity(n).unwrap();
        assert_abs_diff_eq!(a.mul_matrix(&inv).unwrap(), id, epsilon = 1e-9);
        assert_abs_diff_eq!(inv.mul_matrix(&a).unwrap(), id, epsilon = 1e-9);
    }

    let fixed = Matrix::new(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 10]]).unwrap();
    let inv = fixed.inverse().unwrap();
    assert_abs_diff_eq!(
        fixed.mul_matrix(&inv).unwrap(),
        Matrix::identity(3).unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn rref_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(8);
    for (rows, cols) in [(2, 2), (3, 5), (5, 3), (4, 4), (1, 6)] {
        let a = random_matrix(&mut rng, rows, cols);
        let once = a.rref();
        assert_eq!(once.rref(), once);
    }
}

#[test]
fn rref_of_rank_deficient_matrix() {
    let mut rng = StdRng::seed_from_u64(9);
    let r0 = random_vector(&mut rng, 4);
    let r1 = random_vector(&mut rng, 4);
    let r2 = r0.checked_add(&r1.scale(2.0)).unwrap();
    let a = Matrix::from_rows(vec![r0, r1, r2]).unwrap();

    let reduced = a.rref();
    assert_eq!(a.rank(), 2);
    assert_eq!(reduced[2], Vector::zeros(4));
    assert_eq!(reduced.rref(), reduced);
}

#[test]
fn rref_of_invertible_matrix_is_identity() {
    let mut rng = StdRng::seed_from_u64(10);
    let a = random_invertible(&mut rng, 4);
    assert_abs_diff_eq!(a.rref(), Matrix::identity(4).unwrap(), epsilon = 1e-12);
    assert_eq!(a.rank(), 4);
}

#[test]
fn transpose_is_an_involution() {
    let mut rng = StdRng::seed_from_u64(11);
    for (rows, cols) in [(1, 1), (1, 4), (4, 1), (3, 5), (6, 6)] {
        let a = random_matrix(&mut rng, rows, cols);
        assert_eq!(a.transpose().shape(), (cols, rows));
        assert_eq!(a.transpose().transpose(), a);
    }
}

#[test]
fn swap_rows_mutates_in_place_with_companion() {
    let mut a = Matrix::new(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
    let mut b = Vector::new([10, 20, 30]);
    let a_ptr: *const Matrix = &a;

    a.swap_rows(0, 1, Some(&mut b)).unwrap();

    assert!(std::ptr::eq(a_ptr, &a));
    assert_eq!(a, Matrix::new(vec![vec![3, 4], vec![1, 2], vec![5, 6]]).unwrap());
    assert_eq!(b, Vector::new([20, 10, 30]));

    a.swap_rows(2, 2, None).unwrap();
    assert_eq!(a[2], Vector::new([5, 6]));
}

#[test]
fn tolerance_controls_singularity() {
    let a = Matrix::new(vec![vec![1.0, 0.0], vec![0.0, 1e-8]]).unwrap();
    assert_relative_eq!(a.det().unwrap(), 1e-8, max_relative = 1e-12);

    let loose = EliminationConfig::default().with_tolerance(1e-6);
    assert_eq!(
        a.det_with_config(&loose),
        Err(LinalgError::SingularMatrix { column: 1 })
    );
    assert_eq!(a.rref_with_config(&loose)[1], Vector::zeros(2));
}

#[test]
fn rref_keeps_small_values_outside_eliminated_positions() {
    let a = Matrix::new(vec![vec![1.0, 1e-11]]).unwrap();
    assert_eq!(a.rref(), a);
    assert_eq!(a.rank(), 1);
}
