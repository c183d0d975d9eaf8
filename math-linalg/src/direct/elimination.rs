//! Gaussian elimination with partial pivoting
//!
//! This is the engine shared by every direct operation in the crate. It
//! reduces a working copy of a matrix to row-echelon form column by column,
//! recording:
//! - the elimination multipliers (the strictly lower part of `L`)
//! - the row permutation and the number of row swaps performed
//! - the `(row, column)` position of every pivot
//!
//! A column whose best candidate pivot has magnitude `<= pivot_tolerance` has
//! no pivot. Determinant, solve and inverse treat that as a singular matrix;
//! PLU and RREF leave it as a free column and continue with the next one.
//! The free column's entries from the current pivot row down are set to
//! exactly zero, so the result stays in row-echelon form; the factorization
//! then reproduces the input to within `pivot_tolerance`.

use crate::error::{LinalgError, Result};
use crate::matrix::Matrix;
use crate::vector::Vector;
use ndarray::{Array2, s};
use std::convert::Infallible;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pivot magnitude at or below which an entry counts as zero.
///
/// This is an absolute threshold; it is not scaled by the matrix norm, so
/// callers working with very small or very large entries should pass their
/// own [`EliminationConfig`].
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-10;

/// Elimination configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EliminationConfig {
    /// Candidate pivots with magnitude `<= pivot_tolerance` are treated as zero
    pub pivot_tolerance: f64,
}

impl Default for EliminationConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl EliminationConfig {
    /// Same configuration with a different pivot tolerance
    pub fn with_tolerance(mut self, pivot_tolerance: f64) -> Self {
        self.pivot_tolerance = pivot_tolerance;
        self
    }
}

/// Result of running the engine on an `m x n` matrix
#[derive(Debug, Clone)]
pub(crate) struct Elimination {
    /// Row-echelon form of the permuted input
    pub u: Matrix,
    /// `m x m` multipliers, strictly below the diagonal
    pub multipliers: Array2<f64>,
    /// `permutation[i]` is the original row now at position `i`
    pub permutation: Vec<usize>,
    /// Number of row exchanges performed
    pub swaps: usize,
    /// `(row, column)` of each pivot, in elimination order
    pub pivots: Vec<(usize, usize)>,
}

impl Elimination {
    /// `(-1)^swaps`
    pub fn permutation_sign(&self) -> f64 {
        if self.swaps % 2 == 0 { 1.0 } else { -1.0 }
    }
}

/// Eliminate, failing with `SingularMatrix` on the first column without a pivot.
///
/// When `rhs` is given it receives the same row swaps and row updates as
/// the matrix, in place.
pub(crate) fn eliminate_strict(
    a: &Matrix,
    rhs: Option<&mut Vector>,
    config: &EliminationConfig,
) -> Result<Elimination> {
    run(a, rhs, config, |column| {
        log::debug!(
            "column {} has no pivot above {:e}, matrix is singular",
            column,
            config.pivot_tolerance
        );
        Err(LinalgError::SingularMatrix { column })
    })
}

/// Eliminate, leaving columns without a pivot as free columns.
pub(crate) fn eliminate_free(a: &Matrix, config: &EliminationConfig) -> Elimination {
    let Ok(elimination) = run(a, None, config, |column| {
        log::debug!(
            "column {} has no pivot above {:e}, leaving it free",
            column,
            config.pivot_tolerance
        );
        Ok::<(), Infallible>(())
    });
    elimination
}

/// Core loop. `on_missing_pivot` decides whether a column without a pivot
/// aborts elimination (`Err`) or is skipped (`Ok`).
fn run<E>(
    a: &Matrix,
    mut rhs: Option<&mut Vector>,
    config: &EliminationConfig,
    on_missing_pivot: impl Fn(usize) -> std::result::Result<(), E>,
) -> std::result::Result<Elimination, E> {
    let (m, n) = a.shape();
    let mut u = a.clone();
    let mut multipliers = Array2::<f64>::zeros((m, m));
    let mut permutation: Vec<usize> = (0..m).collect();
    let mut swaps = 0;
    let mut pivots = Vec::with_capacity(m.min(n));

    let mut r = 0;
    for k in 0..n {
        if r == m {
            break;
        }

        // Find pivot: first row with the largest magnitude wins ties
        let mut max_val = u[r][k].abs();
        let mut max_row = r;
        for i in (r + 1)..m {
            let val = u[i][k].abs();
            if val > max_val {
                max_val = val;
                max_row = i;
            }
        }

        if max_val <= config.pivot_tolerance {
            on_missing_pivot(k)?;
            // Free column: what is left below row r is zero within tolerance
            for i in r..m {
                u.row_mut(i).coords_mut()[k] = 0.0;
            }
            continue;
        }

        if max_row != r {
            log::debug!("column {}: swapping rows {} and {}", k, r, max_row);
            u.swap_rows_unchecked(r, max_row, rhs.as_deref_mut());
            permutation.swap(r, max_row);
            for j in 0..r {
                multipliers.swap([r, j], [max_row, j]);
            }
            swaps += 1;
        }

        let pivot_row = u[r].as_array().slice(s![k..]).to_owned();
        let pivot = pivot_row[0];
        log::trace!("pivot {:e} at ({}, {})", pivot, r, k);

        for i in (r + 1)..m {
            let target = u.row_mut(i).coords_mut();
            let mult = target[k] / pivot;
            if mult == 0.0 {
                continue;
            }
            multipliers[[i, r]] = mult;
            target.slice_mut(s![k..]).scaled_add(-mult, &pivot_row);
            target[k] = 0.0;

            if let Some(b) = rhs.as_deref_mut() {
                let b_r = b[r];
                b.coords_mut()[i] -= mult * b_r;
            }
        }

        pivots.push((r, k));
        r += 1;
    }

    Ok(Elimination {
        u,
        multipliers,
        permutation,
        swaps,
        pivots,
    })
}
