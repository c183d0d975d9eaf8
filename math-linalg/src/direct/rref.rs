//! Reduced row echelon form
//!
//! Runs the elimination engine in its column-skipping mode, then walks the
//! pivots from the last to the first: each pivot row is scaled so the pivot
//! is 1, and the entries above the pivot are eliminated.

use super::elimination::{Elimination, EliminationConfig, eliminate_free};
use crate::matrix::Matrix;
use ndarray::s;

/// Reduced row echelon form of `a`
///
/// Accepts any shape and any rank. Pivots come out as exactly 1 and the
/// entries eliminated around them as exactly 0. A column with no pivot is
/// zeroed only from its first non-pivot row down; the values it holds in
/// pivot rows are kept, however small.
pub fn rref(a: &Matrix, config: &EliminationConfig) -> Matrix {
    reduce(a, config).0
}

/// Column index of each pivot of the reduced form, top row first
pub fn pivot_columns(a: &Matrix, config: &EliminationConfig) -> Vec<usize> {
    reduce(a, config).1
}

fn reduce(a: &Matrix, config: &EliminationConfig) -> (Matrix, Vec<usize>) {
    let Elimination { mut u, pivots, .. } = eliminate_free(a, config);

    for &(r, k) in pivots.iter().rev() {
        let pivot = u[r][k];
        let row = u.row_mut(r).coords_mut();
        row.slice_mut(s![k..]).mapv_inplace(|x| x / pivot);
        row[k] = 1.0;

        let pivot_row = u[r].as_array().slice(s![k..]).to_owned();
        for i in 0..r {
            let target = u.row_mut(i).coords_mut();
            let factor = target[k];
            if factor == 0.0 {
                continue;
            }
            target.slice_mut(s![k..]).scaled_add(-factor, &pivot_row);
            target[k] = 0.0;
        }
    }

    (u, pivots.into_iter().map(|(_, k)| k).collect())
}
