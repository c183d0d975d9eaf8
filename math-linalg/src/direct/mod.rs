//! Direct solvers for dense linear systems
//!
//! Everything here runs on the partial-pivoting engine in `elimination`:
//! - [`plu_decompose`] / [`lu_factorize`]: `P * A = L * U` factorization
//! - [`determinant`], [`lu_solve`], [`inverse`]: fail on singular input
//! - [`rref`]: reduced row echelon form, tolerant of any shape or rank

mod elimination;
mod lu;
mod rref;

pub use elimination::{DEFAULT_PIVOT_TOLERANCE, EliminationConfig};
pub use lu::{PluDecomposition, determinant, inverse, lu_factorize, lu_solve, plu_decompose};
pub use rref::{pivot_columns, rref};
