use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Dense all-pairs similarity matrix, stored row-major
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarityMatrix {
    dim: usize,
    data: Vec<f32>,
}

impl SimilarityMatrix {
    pub fn new(dim: usize, data: Vec<f32>) -> Result<Self> {
        let matrix = Self { dim, data };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Build a matrix from its rows
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let dim = rows.len();
        let mut data = Vec::with_capacity(dim * dim);
        for row in rows {
            if row.len() != dim {
                return Err(Error::InvalidMatrix {
                    expected: dim,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Self::new(dim, data)
    }

    /// Check that the backing buffer is square
    pub fn validate(&self) -> Result<()> {
        let expected = self.dim.checked_mul(self.dim).ok_or(Error::InvalidMatrix {
            expected: usize::MAX,
            actual: self.data.len(),
        })?;
        if self.data.len() != expected {
            return Err(Error::InvalidMatrix {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    /// Similarity of every record to record `i`
    #[inline]
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        (i < self.dim).then(|| &self.data[i * self.dim..(i + 1) * self.dim])
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        self.row(i).and_then(|row| row.get(j).copied())
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Exact (bitwise) symmetry check
    pub fn is_symmetric(&self) -> bool {
        (0..self.dim).all(|i| {
            (i + 1..self.dim).all(|j| {
                self.data[i * self.dim + j].to_bits() == self.data[j * self.dim + i].to_bits()
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_and_lookup() {
        let m = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
        assert_eq!(m.dim(), 2);
        assert_eq!(m.row(1), Some(&[0.5, 1.0][..]));
        assert_eq!(m.get(0, 1), Some(0.5));
        assert_eq!(m.get(2, 0), None);
        assert!(m.is_symmetric());
    }

    #[test]
    fn test_rejects_non_square() {
        assert!(matches!(
            SimilarityMatrix::new(2, vec![1.0, 0.0, 0.0]),
            Err(Error::InvalidMatrix { expected: 4, actual: 3 })
        ));
        assert!(SimilarityMatrix::from_rows(vec![vec![1.0], vec![0.0, 1.0]]).is_err());
    }

    #[test]
    fn test_asymmetry_detected() {
        let m = SimilarityMatrix::from_rows(vec![vec![1.0, 0.3], vec![0.2, 1.0]]).unwrap();
        assert!(!m.is_symmetric());
    }
}
