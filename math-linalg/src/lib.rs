//! Dense vectors, matrices and direct linear solvers
//!
//! This crate provides small dense real [`Vector`] and [`Matrix`] types with
//! value-semantics arithmetic, and a family of direct solvers that all share
//! one partial-pivoting elimination engine and one pivot tolerance.
//!
//! # Features
//!
//! - **Arithmetic**: add, subtract, scale, dot, norm, matrix-vector and
//!   matrix-matrix products, transpose
//! - **Direct solvers**: PLU decomposition, determinant, solve, inverse
//! - **Row reduction**: reduced row echelon form, rank, pivot columns
//! - **Tolerance-aware comparison**: `approx` traits on both types
//! - **Optional `serde`** support behind the `serde` feature
//!
//! # Example
//!
//! ```
//! use math_linalg::{Matrix, Vector};
//!
//! let a = Matrix::new(vec![vec![2, 1], vec![3, 4]])?;
//! let b = Vector::new([5, 15]);
//!
//! let x = a.solve(&b)?;
//! assert!((x[0] - 1.0).abs() < 1e-12);
//! assert!((x[1] - 3.0).abs() < 1e-12);
//! assert!((a.det()? - 5.0).abs() < 1e-12);
//! # Ok::<(), math_linalg::LinalgError>(())
//! ```
//!
//! # Singular matrices
//!
//! A candidate pivot whose magnitude is at or below
//! [`DEFAULT_PIVOT_TOLERANCE`] (`1e-10`, absolute) counts as zero.
//! [`Matrix::det`], [`Matrix::solve`] and [`Matrix::inverse`] then fail with
//! [`LinalgError::SingularMatrix`]; [`Matrix::plu_decomposition`] and
//! [`Matrix::rref`] treat the column as free and keep going. Use the
//! `_with_config` variants to change the tolerance.

pub mod direct;
pub mod error;
pub mod matrix;
pub mod vector;

// Re-export main types
pub use error::{LinalgError, Result};
pub use matrix::Matrix;
pub use vector::Vector;

// Re-export direct solvers
pub use direct::{DEFAULT_PIVOT_TOLERANCE, EliminationConfig, PluDecomposition};
