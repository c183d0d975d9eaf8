//! Dense row-major matrices
//!
//! A [`Matrix`] owns a non-empty sequence of equal-length row [`Vector`]s.
//! Arithmetic and the elimination-based operations (determinant, solve,
//! inverse, PLU, RREF) all return new values.
//!
//! [`Matrix::swap_rows`] is the only method that mutates a matrix. It exists
//! so that a right-hand side can be kept aligned with pivoted rows without a
//! separate bookkeeping pass.

use crate::direct::{self, EliminationConfig, PluDecomposition};
use crate::error::{LinalgError, Result};
use crate::vector::Vector;
use approx::{AbsDiffEq, RelativeEq};
use ndarray::Array2;
use num_traits::{One, Zero};
use std::ops::{Index, Mul};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dense matrix stored as a list of rows
///
/// With the `serde` feature a matrix is (de)serialized as its list of rows,
/// and deserializing goes through [`Matrix::from_rows`], so empty or ragged
/// input is rejected.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<Vector>", into = "Vec<Vector>")
)]
pub struct Matrix {
    rows: Vec<Vector>,
}

impl Matrix {
    /// Build a matrix from nested rows of values convertible to `f64`
    ///
    /// # Errors
    ///
    /// - `EmptyMatrix` if there are no rows or the rows are empty
    /// - `RaggedRows` if the rows do not all have the same length
    pub fn new<A>(rows: Vec<Vec<A>>) -> Result<Self>
    where
        A: Into<f64>,
    {
        Self::from_rows(rows.into_iter().map(Vector::new).collect())
    }

    /// Build a matrix from row vectors, with the same checks as [`Matrix::new`]
    pub fn from_rows(rows: Vec<Vector>) -> Result<Self> {
        let expected = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(LinalgError::EmptyMatrix),
        };
        if let Some((row, r)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != expected)
        {
            return Err(LinalgError::RaggedRows {
                row,
                expected,
                got: r.len(),
            });
        }
        Ok(Self { rows })
    }

    /// Copy an `ndarray` matrix
    pub fn from_array2(a: &Array2<f64>) -> Result<Self> {
        Self::from_rows(
            a.outer_iter()
                .map(|r| Vector::from(r.to_owned()))
                .collect(),
        )
    }

    /// `n x n` identity matrix
    pub fn identity(n: usize) -> Result<Self> {
        Self::from_rows(
            (0..n)
                .map(|i| {
                    (0..n)
                        .map(|j| if i == j { f64::one() } else { f64::zero() })
                        .collect()
                })
                .collect(),
        )
    }

    /// Copy into an `ndarray` matrix
    pub fn to_array2(&self) -> Array2<f64> {
        Array2::from_shape_fn(self.shape(), |(i, j)| self.rows[i][j])
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.rows[0].len()
    }

    /// Whether the matrix has as many rows as columns
    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    /// All rows, in order
    pub fn rows(&self) -> &[Vector] {
        &self.rows
    }

    /// Row `i`
    pub fn row(&self, i: usize) -> Result<&Vector> {
        self.rows.get(i).ok_or(LinalgError::IndexOutOfRange {
            index: i,
            len: self.nrows(),
        })
    }

    /// Column `j`, copied into a new vector
    pub fn col(&self, j: usize) -> Result<Vector> {
        if j >= self.ncols() {
            return Err(LinalgError::IndexOutOfRange {
                index: j,
                len: self.ncols(),
            });
        }
        Ok(self.col_unchecked(j))
    }

    /// Element-wise sum
    pub fn checked_add(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_shape(other)?;
        self.zip_rows(other, Vector::checked_add)
    }

    /// Element-wise difference `self - other`
    pub fn checked_sub(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_shape(other)?;
        self.zip_rows(other, Vector::checked_sub)
    }

    /// Multiply every entry by `scalar`
    pub fn scale(&self, scalar: f64) -> Matrix {
        Self {
            rows: self.rows.iter().map(|r| r.scale(scalar)).collect(),
        }
    }

    /// Matrix-vector product: each row dotted with `x`
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `x.len()` differs from the column count.
    pub fn mul_vector(&self, x: &Vector) -> Result<Vector> {
        if x.len() != self.ncols() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.ncols(),
                got: x.len(),
            });
        }
        self.rows.iter().map(|r| r.dot(x)).collect()
    }

    /// Matrix-matrix product, `result[i][j] = row_i(self) . col_j(other)`
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if `self.ncols() != other.nrows()`.
    pub fn mul_matrix(&self, other: &Matrix) -> Result<Matrix> {
        if self.ncols() != other.nrows() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.ncols(),
                got: other.nrows(),
            });
        }
        let columns = other.transpose();
        let rows = self
            .rows
            .iter()
            .map(|r| columns.mul_vector(r))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }

    /// New matrix with rows and columns exchanged
    pub fn transpose(&self) -> Matrix {
        Self {
            rows: (0..self.ncols()).map(|j| self.col_unchecked(j)).collect(),
        }
    }

    /// Swap rows `i` and `j` in place, and entries `i` and `j` of
    /// `companion` when one is supplied.
    ///
    /// This is the only mutating operation on [`Matrix`] and [`Vector`].
    /// Every index is checked before anything is modified.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if `i` or `j` is not a valid row index, or not a
    /// valid index into `companion`.
    pub fn swap_rows(
        &mut self,
        i: usize,
        j: usize,
        companion: Option<&mut Vector>,
    ) -> Result<()> {
        let mut lengths = vec![self.nrows()];
        if let Some(v) = companion.as_deref() {
            lengths.push(v.len());
        }
        for len in lengths {
            for index in [i, j] {
                if index >= len {
                    return Err(LinalgError::IndexOutOfRange { index, len });
                }
            }
        }
        self.swap_rows_unchecked(i, j, companion);
        Ok(())
    }

    /// Determinant by elimination
    ///
    /// # Errors
    ///
    /// `NonSquareMatrix`, or `SingularMatrix` when a column has no pivot.
    /// A singular matrix is reported as an error rather than as `0.0`.
    pub fn det(&self) -> Result<f64> {
        self.det_with_config(&EliminationConfig::default())
    }

    /// [`Matrix::det`] with an explicit pivot tolerance
    pub fn det_with_config(&self, config: &EliminationConfig) -> Result<f64> {
        direct::determinant(self, config)
    }

    /// Solve `self * x = b`
    ///
    /// # Errors
    ///
    /// `NonSquareMatrix`, `DimensionMismatch` if `b` has the wrong length,
    /// or `SingularMatrix` when there is no unique solution.
    pub fn solve(&self, b: &Vector) -> Result<Vector> {
        self.solve_with_config(b, &EliminationConfig::default())
    }

    /// [`Matrix::solve`] with an explicit pivot tolerance
    pub fn solve_with_config(&self, b: &Vector, config: &EliminationConfig) -> Result<Vector> {
        direct::lu_solve(self, b, config)
    }

    /// Matrix inverse
    ///
    /// # Errors
    ///
    /// `NonSquareMatrix` or `SingularMatrix`.
    pub fn inverse(&self) -> Result<Matrix> {
        self.inverse_with_config(&EliminationConfig::default())
    }

    /// [`Matrix::inverse`] with an explicit pivot tolerance
    pub fn inverse_with_config(&self, config: &EliminationConfig) -> Result<Matrix> {
        direct::inverse(self, config)
    }

    /// `P * self = L * U` factorization; never fails, see [`PluDecomposition`]
    pub fn plu_decomposition(&self) -> PluDecomposition {
        self.plu_decomposition_with_config(&EliminationConfig::default())
    }

    /// [`Matrix::plu_decomposition`] with an explicit pivot tolerance
    pub fn plu_decomposition_with_config(&self, config: &EliminationConfig) -> PluDecomposition {
        direct::plu_decompose(self, config)
    }

    /// Reduced row echelon form; works on any shape and on singular input
    ///
    /// Small entries in free columns of pivot rows are kept as they are.
    pub fn rref(&self) -> Matrix {
        self.rref_with_config(&EliminationConfig::default())
    }

    /// [`Matrix::rref`] with an explicit pivot tolerance
    pub fn rref_with_config(&self, config: &EliminationConfig) -> Matrix {
        direct::rref(self, config)
    }

    /// Number of pivots in the reduced row echelon form
    pub fn rank(&self) -> usize {
        self.pivot_columns().len()
    }

    /// Column of each RREF pivot, top row first
    pub fn pivot_columns(&self) -> Vec<usize> {
        direct::pivot_columns(self, &EliminationConfig::default())
    }

    /// Rows already known to be non-empty and of equal length
    pub(crate) fn from_rows_unchecked(rows: Vec<Vector>) -> Self {
        debug_assert!(Self::from_rows(rows.clone()).is_ok());
        Self { rows }
    }

    pub(crate) fn swap_rows_unchecked(
        &mut self,
        i: usize,
        j: usize,
        companion: Option<&mut Vector>,
    ) {
        self.rows.swap(i, j);
        if let Some(v) = companion {
            v.swap(i, j);
        }
    }

    pub(crate) fn row_mut(&mut self, i: usize) -> &mut Vector {
        &mut self.rows[i]
    }

    fn col_unchecked(&self, j: usize) -> Vector {
        self.rows.iter().map(|r| r[j]).collect()
    }

    fn check_same_shape(&self, other: &Matrix) -> Result<()> {
        let (m, n) = self.shape();
        let (p, q) = other.shape();
        if m != p {
            return Err(LinalgError::DimensionMismatch {
                expected: m,
                got: p,
            });
        }
        if n != q {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                got: q,
            });
        }
        Ok(())
    }

    fn zip_rows(
        &self,
        other: &Matrix,
        op: impl Fn(&Vector, &Vector) -> Result<Vector>,
    ) -> Result<Matrix> {
        let rows = self
            .rows
            .iter()
            .zip(other.rows.iter())
            .map(|(a, b)| op(a, b))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }
}

impl TryFrom<Vec<Vector>> for Matrix {
    type Error = LinalgError;

    fn try_from(rows: Vec<Vector>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vector> {
    fn from(m: Matrix) -> Self {
        m.rows
    }
}

impl Index<usize> for Matrix {
    type Output = Vector;

    fn index(&self, i: usize) -> &Vector {
        &self.rows[i]
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, scalar: f64) -> Matrix {
        self.scale(scalar)
    }
}

impl Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(self, scalar: f64) -> Matrix {
        Matrix {
            rows: self.rows.into_iter().map(|r| r * scalar).collect(),
        }
    }
}

impl Mul<&Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, a: &Matrix) -> Matrix {
        a.scale(self)
    }
}

impl Mul<Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, a: Matrix) -> Matrix {
        a * self
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.nrows() == other.nrows()
            && self
                .rows
                .iter()
                .zip(other.rows.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.nrows() == other.nrows()
            && self
                .rows
                .iter()
                .zip(other.rows.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
