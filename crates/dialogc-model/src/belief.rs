//! Initial belief distribution.

use crate::state_space::StateSpace;

/// Uniform `1/|C|` over the general block, zero elsewhere.
#[derive(Clone, Debug, PartialEq)]
pub struct InitialBelief {
    probs: Vec<f64>,
}

impl InitialBelief {
    /// The initial belief over `states`.
    pub fn new(states: &StateSpace) -> Self {
        let mut probs = vec![0.0; states.len()];
        let general = states.general_block();
        if !general.is_empty() {
            let p = 1.0 / general.len() as f64;
            probs[general].fill(p);
        }
        Self { probs }
    }

    /// Probabilities in state order.
    pub fn as_slice(&self) -> &[f64] {
        &self.probs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reference_start_vector() {
        let b = InitialBelief::new(&StateSpace::with_dims(2, 1));
        assert_eq!(b.as_slice(), &[0.5, 0.5, 0.0, 0.0, 0.0, 0.0]);
    }

    proptest! {
        #[test]
        fn sums_to_one_over_general_block(classes in 1u32..50, questions in 0u32..5) {
            let s = StateSpace::with_dims(classes, questions);
            let b = InitialBelief::new(&s);
            let sum: f64 = b.as_slice().iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-12);
            for (i, &p) in b.as_slice().iter().enumerate() {
                if s.general_block().contains(&i) {
                    prop_assert_eq!(p, 1.0 / classes as f64);
                } else {
                    prop_assert_eq!(p, 0.0);
                }
            }
        }
    }
}
