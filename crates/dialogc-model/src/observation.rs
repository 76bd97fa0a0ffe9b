//! Observation probabilities per state.

use dialogc_core::tolerance::sums_to_one;
use dialogc_core::{ObsId, StateId};
use dialogc_spec::EffectiveNoiseTable;

use crate::error::ModelError;
use crate::state_space::StateSpace;

/// Dense `|S| × |O|` row-stochastic matrix.
///
/// General and terminal states observe uniformly. `Question(q, c)`
/// observes with row `c` of question `q`'s noise table.
#[derive(Clone, Debug, PartialEq)]
pub struct ObservationMatrix {
    observations: usize,
    /// Row-major: `probs[state * observations + obs]`.
    probs: Vec<f64>,
}

impl ObservationMatrix {
    /// Build the matrix and check every row sums to 1 within `row_tolerance`.
    ///
    /// `tables` must hold one `|C| × |O|` table per question, in
    /// declaration order.
    pub fn build(
        states: &StateSpace,
        observations: usize,
        tables: &[EffectiveNoiseTable],
        row_tolerance: f64,
    ) -> Result<Self, ModelError> {
        let uniform = if observations == 0 {
            0.0
        } else {
            1.0 / observations as f64
        };
        let expected = states.question_count() as usize;
        if tables.len() != expected {
            return Err(ModelError::NoiseTableMismatch {
                expected,
                found: tables.len(),
            });
        }
        let shape = (states.class_count() as usize, observations);
        for (q, table) in tables.iter().enumerate() {
            let found = (table.class_count(), table.observation_count());
            if found != shape {
                return Err(ModelError::NoiseTableShape {
                    question: q,
                    expected: shape,
                    found,
                });
            }
        }

        let mut probs = vec![uniform; states.len() * observations];

        for (q, table) in tables.iter().enumerate() {
            for from in states.question_block((q as u32).into()) {
                let class = states.state(StateId(from as u32)).classification();
                let start = from * observations;
                probs[start..start + observations].copy_from_slice(table.row(class));
            }
        }

        let matrix = Self {
            observations,
            probs,
        };
        for (id, _) in states.iter() {
            let sum: f64 = matrix.row(id).iter().sum();
            if !sums_to_one(sum, row_tolerance) {
                return Err(ModelError::ObservationRow { state: id, sum });
            }
        }
        Ok(matrix)
    }

    /// Number of observation columns.
    pub fn observation_count(&self) -> usize {
        self.observations
    }

    /// Distribution over observations in state `s`.
    pub fn row(&self, s: StateId) -> &[f64] {
        let start = s.index() * self.observations;
        &self.probs[start..start + self.observations]
    }

    /// `P(o | s)`.
    pub fn get(&self, s: StateId, o: ObsId) -> f64 {
        self.row(s)[o.index()]
    }

    /// Every nonzero entry as `(state, observation, probability)`.
    pub fn iter(&self) -> impl Iterator<Item = (StateId, ObsId, f64)> + '_ {
        let n = self.observations;
        self.probs
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p != 0.0)
            .map(move |(i, &p)| (StateId((i / n) as u32), ObsId((i % n) as u32), p))
    }
}
