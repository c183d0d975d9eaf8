//! Dense real vectors
//!
//! A [`Vector`] is a fixed-length sequence of `f64` with value semantics:
//! every arithmetic operation returns a new vector and leaves its operands
//! untouched. The one exception is the entry swap that
//! [`Matrix::swap_rows`](crate::Matrix::swap_rows) performs on a companion
//! right-hand side, which is not exposed outside the crate.

use crate::error::{LinalgError, Result};
use approx::{AbsDiffEq, RelativeEq};
use ndarray::Array1;
use std::ops::{Index, Mul};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed-length vector of real numbers
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector {
    coords: Array1<f64>,
}

impl Vector {
    /// Create a vector from any sequence of values convertible to `f64`
    pub fn new<I, A>(coords: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<f64>,
    {
        Self {
            coords: coords.into_iter().map(Into::into).collect(),
        }
    }

    /// Vector of `n` zeros
    pub fn zeros(n: usize) -> Self {
        Self {
            coords: Array1::zeros(n),
        }
    }

    /// Standard basis vector `e_j` of length `n`
    pub fn basis(n: usize, j: usize) -> Result<Self> {
        if j >= n {
            return Err(LinalgError::IndexOutOfRange { index: j, len: n });
        }
        let mut e = Self::zeros(n);
        e.coords[j] = 1.0;
        Ok(e)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether the vector has no entries
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Entry `i`, or `IndexOutOfRange`
    pub fn get(&self, i: usize) -> Result<f64> {
        self.coords
            .get(i)
            .copied()
            .ok_or(LinalgError::IndexOutOfRange {
                index: i,
                len: self.len(),
            })
    }

    /// Iterate over the entries in order
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.coords.iter()
    }

    /// Copy the entries into a `Vec`
    pub fn to_vec(&self) -> Vec<f64> {
        self.coords.to_vec()
    }

    /// Borrow the underlying `ndarray` storage
    pub fn as_array(&self) -> &Array1<f64> {
        &self.coords
    }

    /// Consume the vector, returning its `ndarray` storage
    pub fn into_array(self) -> Array1<f64> {
        self.coords
    }

    /// Element-wise sum
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the lengths differ.
    pub fn checked_add(&self, other: &Vector) -> Result<Vector> {
        self.check_len(other)?;
        Ok(Self {
            coords: &self.coords + &other.coords,
        })
    }

    /// Element-wise difference `self - other`
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the lengths differ.
    pub fn checked_sub(&self, other: &Vector) -> Result<Vector> {
        self.check_len(other)?;
        Ok(Self {
            coords: &self.coords - &other.coords,
        })
    }

    /// Multiply every entry by `scalar`
    pub fn scale(&self, scalar: f64) -> Vector {
        Self {
            coords: &self.coords * scalar,
        }
    }

    /// Divide every entry by `scalar`
    ///
    /// # Errors
    ///
    /// `DivisionByZero` if `scalar == 0.0`. Infinities are never produced
    /// from a zero divisor.
    pub fn checked_div(&self, scalar: f64) -> Result<Vector> {
        if scalar == 0.0 {
            return Err(LinalgError::DivisionByZero);
        }
        Ok(Self {
            coords: &self.coords / scalar,
        })
    }

    /// Dot product
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the lengths differ.
    pub fn dot(&self, other: &Vector) -> Result<f64> {
        self.check_len(other)?;
        Ok(self.coords.dot(&other.coords))
    }

    /// Euclidean norm: sqrt(self · self)
    pub fn norm(&self) -> f64 {
        self.coords.dot(&self.coords).sqrt()
    }

    /// Exchange entries `i` and `j`. Callers validate both indices.
    pub(crate) fn swap(&mut self, i: usize, j: usize) {
        self.coords.swap(i, j);
    }

    pub(crate) fn coords_mut(&mut self) -> &mut Array1<f64> {
        &mut self.coords
    }

    fn check_len(&self, other: &Vector) -> Result<()> {
        if self.len() != other.len() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.len(),
                got: other.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<f64>> for Vector {
    fn from(coords: Vec<f64>) -> Self {
        Self {
            coords: Array1::from_vec(coords),
        }
    }
}

impl From<Array1<f64>> for Vector {
    fn from(coords: Array1<f64>) -> Self {
        Self { coords }
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            coords: iter.into_iter().collect(),
        }
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.coords[i]
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, scalar: f64) -> Vector {
        self.scale(scalar)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(mut self, scalar: f64) -> Vector {
        self.coords *= scalar;
        self
    }
}

impl Mul<&Vector> for f64 {
    type Output = Vector;

    fn mul(self, v: &Vector) -> Vector {
        v.scale(self)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, v: Vector) -> Vector {
        v * self
    }
}

impl AbsDiffEq for Vector {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Vector {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
