//! Sensor confusion matrices and the sources that supply them.
//!
//! A [`ConfusionMatrix`] is square with one row and one column per
//! observation. Entry `[a, b]` is the probability of *observing* symbol
//! `a` when the *true* symbol is `b`, so every column is a probability
//! distribution.
//!
//! The matrix is produced by a [`ConfusionSource`]. Real sensor or
//! classifier pipelines plug in here; the crate ships a fixed matrix,
//! a noise-free identity, and a seeded random source for exercising the
//! compiler before real data exists.

use std::io::Read;

use dialogc_core::tolerance::{sums_to_one, COLUMN_SUM_TOLERANCE};
use dialogc_core::{MatrixError, ObsId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A validated, column-stochastic square matrix.
///
/// # Examples
///
/// ```
/// use dialogc_core::ObsId;
/// use dialogc_spec::ConfusionMatrix;
///
/// let m = ConfusionMatrix::from_rows(vec![
///     vec![0.9, 0.2],
///     vec![0.1, 0.8],
/// ]).unwrap();
/// assert_eq!(m.dim(), 2);
/// assert_eq!(m.get(ObsId(1), ObsId(0)), 0.1);
///
/// // Rows need not sum to one, columns must.
/// assert!(ConfusionMatrix::from_rows(vec![vec![0.5, 0.5], vec![0.5, 0.4]]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ConfusionMatrix {
    dim: usize,
    /// Row-major: `data[observed * dim + truth]`.
    data: Vec<f64>,
}

impl ConfusionMatrix {
    /// Validate `rows` with the default column tolerance (`1e-6`).
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        Self::from_rows_with_tolerance(rows, COLUMN_SUM_TOLERANCE)
    }

    /// Validate `rows`: square, finite non-negative entries, and every
    /// column summing to 1 within `tolerance`.
    pub fn from_rows_with_tolerance(
        rows: Vec<Vec<f64>>,
        tolerance: f64,
    ) -> Result<Self, MatrixError> {
        let dim = check_square(&rows)?;
        let data: Vec<f64> = rows.into_iter().flatten().collect();
        let matrix = Self { dim, data };
        matrix.check_entries()?;
        matrix.check_columns(tolerance)?;
        Ok(matrix)
    }

    /// Parse a JSON array of rows and validate it.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, MatrixError> {
        let rows: Vec<Vec<f64>> =
            serde_json::from_reader(reader).map_err(|e| MatrixError::Parse {
                reason: e.to_string(),
            })?;
        Self::from_rows(rows)
    }

    /// The `dim × dim` identity: a sensor that never confuses symbols.
    pub fn identity(dim: usize) -> Self {
        let mut data = vec![0.0; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = 1.0;
        }
        Self { dim, data }
    }

    /// Number of rows (and columns).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// `P(observed | truth)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, observed: ObsId, truth: ObsId) -> f64 {
        assert!(truth.index() < self.dim, "truth index {truth} out of range");
        self.data[observed.index() * self.dim + truth.index()]
    }

    /// Row `observed` as a slice over true symbols.
    ///
    /// # Panics
    ///
    /// Panics if `observed` is out of range.
    pub fn row(&self, observed: ObsId) -> &[f64] {
        let start = observed.index() * self.dim;
        &self.data[start..start + self.dim]
    }

    /// Check that every column sums to 1 within `tolerance`.
    pub fn check_columns(&self, tolerance: f64) -> Result<(), MatrixError> {
        for column in 0..self.dim {
            let sum: f64 = (0..self.dim).map(|row| self.data[row * self.dim + column]).sum();
            if !sums_to_one(sum, tolerance) {
                return Err(MatrixError::ColumnSum { column, sum });
            }
        }
        Ok(())
    }

    fn check_entries(&self) -> Result<(), MatrixError> {
        for (i, &value) in self.data.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(MatrixError::InvalidEntry {
                    row: i / self.dim,
                    column: i % self.dim,
                    value,
                });
            }
        }
        Ok(())
    }
}

fn check_square(rows: &[Vec<f64>]) -> Result<usize, MatrixError> {
    let dim = rows.len();
    for (row, r) in rows.iter().enumerate() {
        if r.len() != dim {
            return Err(MatrixError::NotSquare {
                row,
                len: r.len(),
                expected: dim,
            });
        }
    }
    Ok(dim)
}

/// Supplies the confusion matrix for a model with a given number of
/// observation symbols.
///
/// Implementations must return a validated matrix of exactly
/// `observations × observations`, or a [`MatrixError`] explaining why
/// they cannot.
pub trait ConfusionSource {
    /// Produce the matrix for `observations` symbols.
    fn confusion_matrix(&self, observations: usize) -> Result<ConfusionMatrix, MatrixError>;
}

impl ConfusionSource for ConfusionMatrix {
    fn confusion_matrix(&self, observations: usize) -> Result<ConfusionMatrix, MatrixError> {
        if self.dim != observations {
            return Err(MatrixError::WrongSize {
                expected: observations,
                found: self.dim,
            });
        }
        Ok(self.clone())
    }
}

/// Raw caller-supplied rows, validated in order: square, sized to the
/// observation count, then entries and column sums.
impl ConfusionSource for Vec<Vec<f64>> {
    fn confusion_matrix(&self, observations: usize) -> Result<ConfusionMatrix, MatrixError> {
        let dim = check_square(self)?;
        if dim != observations {
            return Err(MatrixError::WrongSize {
                expected: observations,
                found: dim,
            });
        }
        ConfusionMatrix::from_rows(self.clone())
    }
}

/// A noise-free sensor.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityConfusion;

impl ConfusionSource for IdentityConfusion {
    fn confusion_matrix(&self, observations: usize) -> Result<ConfusionMatrix, MatrixError> {
        Ok(ConfusionMatrix::identity(observations))
    }
}

/// A deterministic random column-stochastic matrix.
///
/// Entries are drawn uniformly from `(0, 1]` with a ChaCha8 RNG seeded
/// from `seed`, then each column is normalised. The same seed always
/// yields the same matrix.
#[derive(Clone, Copy, Debug)]
pub struct RandomConfusion {
    /// RNG seed.
    pub seed: u64,
}

impl RandomConfusion {
    /// A source seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl ConfusionSource for RandomConfusion {
    fn confusion_matrix(&self, observations: usize) -> Result<ConfusionMatrix, MatrixError> {
        let dim = observations;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        // (0, 1] keeps every column sum strictly positive.
        let mut data: Vec<f64> = (0..dim * dim).map(|_| 1.0 - rng.random::<f64>()).collect();
        for column in 0..dim {
            let sum: f64 = (0..dim).map(|row| data[row * dim + column]).sum();
            for row in 0..dim {
                data[row * dim + column] /= sum;
            }
        }
        let matrix = ConfusionMatrix { dim, data };
        matrix.check_columns(COLUMN_SUM_TOLERANCE)?;
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identity_is_column_stochastic() {
        let m = ConfusionMatrix::identity(4);
        assert!(m.check_columns(0.0).is_ok());
        assert_eq!(m.get(ObsId(2), ObsId(2)), 1.0);
        assert_eq!(m.get(ObsId(2), ObsId(1)), 0.0);
    }

    #[test]
    fn ragged_rows_are_not_square() {
        let err = ConfusionMatrix::from_rows(vec![vec![1.0, 0.0], vec![0.0]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn negative_entry_reports_its_cell() {
        let err =
            ConfusionMatrix::from_rows(vec![vec![1.5, 0.0], vec![-0.5, 1.0]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::InvalidEntry {
                row: 1,
                column: 0,
                value: -0.5
            }
        );
    }

    #[test]
    fn column_sum_reports_its_column() {
        let err = ConfusionMatrix::from_rows(vec![vec![1.0, 0.3], vec![0.0, 0.6]]).unwrap_err();
        match err {
            MatrixError::ColumnSum { column, sum } => {
                assert_eq!(column, 1);
                assert!((sum - 0.9).abs() < 1e-12);
            }
            other => panic!("expected ColumnSum, got {other:?}"),
        }
    }

    #[test]
    fn column_sum_within_tolerance_is_accepted() {
        let m = ConfusionMatrix::from_rows(vec![vec![0.5, 0.0], vec![0.5 + 5e-7, 1.0]]);
        assert!(m.is_ok());
        let strict =
            ConfusionMatrix::from_rows_with_tolerance(vec![vec![0.5, 0.0], vec![0.5 + 5e-7, 1.0]], 1e-9);
        assert!(strict.is_err());
    }

    #[test]
    fn fixed_source_checks_size() {
        let m = ConfusionMatrix::identity(3);
        assert!(m.confusion_matrix(3).is_ok());
        assert_eq!(
            m.confusion_matrix(2).unwrap_err(),
            MatrixError::WrongSize {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn raw_rows_check_size_before_column_sums() {
        // Square but wrong size and not stochastic: size is reported first.
        let rows = vec![vec![5.0, 5.0], vec![5.0, 5.0]];
        assert_eq!(
            rows.confusion_matrix(3).unwrap_err(),
            MatrixError::WrongSize {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn json_rows_parse() {
        let m = ConfusionMatrix::from_json_reader("[[0.7, 0.4], [0.3, 0.6]]".as_bytes()).unwrap();
        assert_eq!(m.row(ObsId(0)), &[0.7, 0.4]);
        let err = ConfusionMatrix::from_json_reader("[[0.7, \"x\"]]".as_bytes()).unwrap_err();
        assert!(matches!(err, MatrixError::Parse { .. }));
    }

    #[test]
    fn random_source_is_deterministic() {
        let a = RandomConfusion::new(7).confusion_matrix(5).unwrap();
        let b = RandomConfusion::new(7).confusion_matrix(5).unwrap();
        let c = RandomConfusion::new(8).confusion_matrix(5).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    proptest! {
        #[test]
        fn random_source_is_column_stochastic(seed in any::<u64>(), dim in 1usize..12) {
            let m = RandomConfusion::new(seed).confusion_matrix(dim).unwrap();
            prop_assert_eq!(m.dim(), dim);
            prop_assert!(m.check_columns(COLUMN_SUM_TOLERANCE).is_ok());
            for row in 0..dim {
                for &v in m.row(ObsId(row as u32)) {
                    prop_assert!(v > 0.0 && v <= 1.0);
                }
            }
        }
    }
}
