//! Error types for vector, matrix and elimination operations.
//!
//! Every fallible operation in this crate validates its inputs before doing
//! any work, so an `Err` never leaves a `Vector` or `Matrix` half-modified.

use thiserror::Error;

/// Errors that can occur when building or operating on vectors and matrices.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinalgError {
    /// A matrix was built from zero rows or from zero-length rows.
    #[error("matrix can't be empty")]
    EmptyMatrix,

    /// A matrix was built from rows of different lengths.
    #[error("ragged rows: row {row} has {got} entries, expected {expected}")]
    RaggedRows {
        /// Index of the first offending row
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        got: usize,
    },

    /// Operand shapes are incompatible for a binary operation.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Dimension required by the left operand
        expected: usize,
        /// Dimension supplied by the right operand
        got: usize,
    },

    /// A row, column or element index is out of bounds.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The requested index
        index: usize,
        /// The length of the indexed dimension
        len: usize,
    },

    /// A square matrix was required.
    #[error("matrix must be square, got {rows}x{cols}")]
    NonSquareMatrix {
        /// Row count
        rows: usize,
        /// Column count
        cols: usize,
    },

    /// Elimination found no usable pivot in a column.
    #[error("matrix is singular: no pivot above tolerance in column {column}")]
    SingularMatrix {
        /// The column in which elimination stalled
        column: usize,
    },

    /// A vector was divided by a zero scalar.
    #[error("division by zero")]
    DivisionByZero,
}

/// A specialized `Result` type for linear algebra operations.
pub type Result<T> = std::result::Result<T, LinalgError>;

impl LinalgError {
    /// Returns `true` if this is a construction-time structural error.
    ///
    /// This includes `EmptyMatrix` and `RaggedRows`.
    pub fn is_structural_error(&self) -> bool {
        matches!(
            self,
            LinalgError::EmptyMatrix | LinalgError::RaggedRows { .. }
        )
    }

    /// Returns `true` if operand or matrix shapes were incompatible.
    ///
    /// This includes `DimensionMismatch` and `NonSquareMatrix`.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            LinalgError::DimensionMismatch { .. } | LinalgError::NonSquareMatrix { .. }
        )
    }

    /// Returns `true` if elimination hit a zero pivot.
    pub fn is_singular(&self) -> bool {
        matches!(self, LinalgError::SingularMatrix { .. })
    }
}
