//! PLU decomposition and the operations built on it
//!
//! Provides the `P * A = L * U` factorization with partial pivoting, plus
//! determinant, solve and inverse for square matrices.

use super::elimination::{Elimination, EliminationConfig, eliminate_free, eliminate_strict};
use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;
use crate::vector::Vector;

/// PLU factorization result
///
/// For an `m x n` input `A`: `P` is the `m x m` row permutation, `L` is
/// `m x m` unit lower triangular with the elimination multipliers below the
/// diagonal, and `U` is the `m x n` row-echelon result, with `P * A = L * U`.
///
/// The factors are read through accessors; [`PluDecomposition::into_parts`]
/// hands them over by value.
#[derive(Debug, Clone)]
pub struct PluDecomposition {
    p: Matrix,
    l: Matrix,
    u: Matrix,
    permutation: Vec<usize>,
    swaps: usize,
    /// First column elimination found no pivot for, if any
    free_column: Option<usize>,
}

impl PluDecomposition {
    fn from_elimination(e: Elimination) -> Self {
        let m = e.permutation.len();
        let n = e.u.ncols();

        let p = Matrix::from_rows_unchecked(
            e.permutation
                .iter()
                .map(|&src| {
                    let mut row = Vector::zeros(m);
                    row.coords_mut()[src] = 1.0;
                    row
                })
                .collect(),
        );

        let l = Matrix::from_rows_unchecked(
            (0..m)
                .map(|i| {
                    (0..m)
                        .map(|j| match j.cmp(&i) {
                            std::cmp::Ordering::Less => e.multipliers[[i, j]],
                            std::cmp::Ordering::Equal => 1.0,
                            std::cmp::Ordering::Greater => 0.0,
                        })
                        .collect()
                })
                .collect(),
        );

        // Pivot columns increase strictly, so the first position where the
        // k-th pivot is not in column k names the first free column.
        let free_column = (0..m.min(n)).find(|&k| e.pivots.get(k).map(|&(_, c)| c) != Some(k));

        Self {
            p,
            l,
            u: e.u,
            permutation: e.permutation,
            swaps: e.swaps,
            free_column,
        }
    }

    /// Permutation matrix `P`
    pub fn p(&self) -> &Matrix {
        &self.p
    }

    /// Unit lower-triangular factor `L`
    pub fn l(&self) -> &Matrix {
        &self.l
    }

    /// Upper-triangular (row-echelon) factor `U`
    pub fn u(&self) -> &Matrix {
        &self.u
    }

    /// `permutation()[i]` is the row of `A` that ends up at row `i`
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Row swaps performed during elimination
    pub fn swaps(&self) -> usize {
        self.swaps
    }

    /// `(P, L, U)`
    pub fn into_parts(self) -> (Matrix, Matrix, Matrix) {
        (self.p, self.l, self.u)
    }

    /// Whether every diagonal position of `U` holds a pivot
    pub fn is_invertible(&self) -> bool {
        self.u.is_square() && self.free_column.is_none()
    }

    /// Determinant: product of the pivots times `(-1)^swaps`
    pub fn det(&self) -> Result<f64> {
        self.check_invertible()?;
        let sign = if self.swaps % 2 == 0 { 1.0 } else { -1.0 };
        Ok(sign * diagonal_product(&self.u))
    }

    /// Solve `A x = b` using the pre-computed factorization
    ///
    /// Useful when the same matrix is solved against several right-hand sides.
    pub fn solve(&self, b: &Vector) -> Result<Vector> {
        self.check_invertible()?;
        let n = self.u.nrows();
        if b.len() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                got: b.len(),
            });
        }

        // Forward substitution: L y = P b
        let mut y = Vector::zeros(n);
        for i in 0..n {
            let mut sum = b[self.permutation[i]];
            for j in 0..i {
                sum -= self.l[i][j] * y[j];
            }
            y.coords_mut()[i] = sum;
        }

        Ok(back_substitute(&self.u, &y))
    }

    fn check_invertible(&self) -> Result<()> {
        let (rows, cols) = self.u.shape();
        if rows != cols {
            return Err(LinalgError::NonSquareMatrix { rows, cols });
        }
        match self.free_column {
            Some(column) => Err(LinalgError::SingularMatrix { column }),
            None => Ok(()),
        }
    }
}

/// PLU decomposition of any matrix
///
/// Columns without a pivot are skipped rather than reported, so this never
/// fails; a singular square input yields a `U` with a zero on its diagonal.
/// Entries of a skipped column are at most the pivot tolerance and are
/// cleared from `U`, so `P * A = L * U` holds to within that tolerance.
pub fn plu_decompose(a: &Matrix, config: &EliminationConfig) -> PluDecomposition {
    PluDecomposition::from_elimination(eliminate_free(a, config))
}

/// Compute the LU factorization of a square, non-singular matrix
pub fn lu_factorize(a: &Matrix, config: &EliminationConfig) -> Result<PluDecomposition> {
    check_square(a)?;
    let e = eliminate_strict(a, None, config)?;
    Ok(PluDecomposition::from_elimination(e))
}

/// Determinant by elimination
///
/// A singular matrix is an error, not `0.0`: elimination cannot complete.
pub fn determinant(a: &Matrix, config: &EliminationConfig) -> Result<f64> {
    check_square(a)?;
    let e = eliminate_strict(a, None, config)?;
    Ok(e.permutation_sign() * diagonal_product(&e.u))
}

/// Solve `A x = b`
///
/// `b` is copied and carried through the row swaps and updates of the
/// elimination, then `x` is recovered by back substitution.
pub fn lu_solve(a: &Matrix, b: &Vector, config: &EliminationConfig) -> Result<Vector> {
    let n = check_square(a)?;
    if b.len() != n {
        return Err(LinalgError::DimensionMismatch {
            expected: n,
            got: b.len(),
        });
    }

    let mut y = b.clone();
    let e = eliminate_strict(a, Some(&mut y), config)?;
    Ok(back_substitute(&e.u, &y))
}

/// Inverse of a square matrix
///
/// Factors once, then solves against each standard basis vector; the
/// solutions become the columns of the result.
pub fn inverse(a: &Matrix, config: &EliminationConfig) -> Result<Matrix> {
    let n = check_square(a)?;
    let factorization = lu_factorize(a, config)?;
    let columns = (0..n)
        .map(|j| factorization.solve(&Vector::basis(n, j)?))
        .collect::<Result<Vec<_>>>()?;
    Ok(Matrix::from_rows_unchecked(columns).transpose())
}

fn check_square(a: &Matrix) -> Result<usize> {
    let (rows, cols) = a.shape();
    if rows != cols {
        return Err(LinalgError::NonSquareMatrix { rows, cols });
    }
    Ok(rows)
}

fn diagonal_product(u: &Matrix) -> f64 {
    (0..u.nrows()).map(|i| u[i][i]).product()
}

/// Backward substitution: U x = y, for `U` square with a non-zero diagonal
fn back_substitute(u: &Matrix, y: &Vector) -> Vector {
    let n = u.nrows();
    let mut x = Vector::zeros(n);
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= u[i][j] * x[j];
        }
        x.coords_mut()[i] = sum / u[i][i];
    }
    x
}
