//! Bayesian composition of question priors with sensor noise.
//!
//! For each question and classification, the declared (noise-free)
//! observation prior is a vector over observations. Multiplying it by
//! the confusion matrix and renormalising gives the probability of each
//! *observed* symbol once sensor confusion is taken into account:
//!
//! ```text
//! effective[b] = Σ_a prior[a] · confusion[a, b]   then   effective /= Σ effective
//! ```
//!
//! Classifications a question does not mention get a uniform row.
//! Questions are independent, so [`compose_all`] can spread them over
//! worker threads; results are always returned in declaration order.

use std::error::Error;
use std::fmt;

use dialogc_core::{ClassId, ObsId, QuestionId};
use smallvec::{smallvec, SmallVec};
use tracing::{debug, warn};

use crate::confusion::ConfusionMatrix;
use crate::spec::ModelSpec;

/// Errors from noise composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoiseError {
    /// The composed vector has no probability mass and cannot be
    /// normalised. Happens when every observation the prior mentions
    /// maps to an all-zero confusion row, or the prior is all zeros.
    ZeroMass {
        /// Question label.
        question: String,
        /// Classification label.
        classification: String,
    },
}

impl fmt::Display for NoiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMass {
                question,
                classification,
            } => write!(
                f,
                "question '{question}', classification '{classification}': \
                 composed observation distribution has zero mass"
            ),
        }
    }
}

impl Error for NoiseError {}

/// `P(observation | classification, question asked)` for one question.
///
/// A `|C| × |O|` row-stochastic table.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectiveNoiseTable {
    question: QuestionId,
    observations: usize,
    /// Row-major: `probs[class * observations + obs]`.
    probs: Vec<f64>,
}

impl EffectiveNoiseTable {
    /// The question this table belongs to.
    pub fn question(&self) -> QuestionId {
        self.question
    }

    /// Number of classification rows.
    pub fn class_count(&self) -> usize {
        if self.observations == 0 {
            0
        } else {
            self.probs.len() / self.observations
        }
    }

    /// Number of observation columns.
    pub fn observation_count(&self) -> usize {
        self.observations
    }

    /// Distribution over observations for classification `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c` is out of range.
    pub fn row(&self, c: ClassId) -> &[f64] {
        let start = c.index() * self.observations;
        &self.probs[start..start + self.observations]
    }

    /// `P(o | c)`.
    pub fn get(&self, c: ClassId, o: ObsId) -> f64 {
        self.row(c)[o.index()]
    }
}

/// Compose the effective noise table for question `q`.
pub fn compose_question(
    spec: &ModelSpec,
    q: QuestionId,
    confusion: &ConfusionMatrix,
) -> Result<EffectiveNoiseTable, NoiseError> {
    let n_obs = spec.observation_count();
    let n_class = spec.class_count();
    let question = spec.question(q);
    let uniform = 1.0 / n_obs as f64;
    let mut probs = vec![uniform; n_class * n_obs];

    for c in spec.class_ids() {
        let Some(declared) = question.effect().get(&c) else {
            warn!(
                question = %question.label(),
                classification = %spec.class_label(c),
                "no effect declared; using uniform observation distribution"
            );
            continue;
        };

        let mut prior: SmallVec<[f64; 8]> = smallvec![0.0; n_obs];
        for &(o, p) in declared {
            prior[o.index()] = p;
        }

        let out = &mut probs[c.index() * n_obs..(c.index() + 1) * n_obs];
        for (b, cell) in out.iter_mut().enumerate() {
            *cell = prior
                .iter()
                .enumerate()
                .map(|(a, &pa)| pa * confusion.get(ObsId(a as u32), ObsId(b as u32)))
                .sum();
        }

        let mass: f64 = out.iter().sum();
        if !(mass.is_finite() && mass > 0.0) {
            return Err(NoiseError::ZeroMass {
                question: question.label().to_string(),
                classification: spec.class_label(c).to_string(),
            });
        }
        for cell in out.iter_mut() {
            *cell /= mass;
        }
    }

    Ok(EffectiveNoiseTable {
        question: q,
        observations: n_obs,
        probs,
    })
}

/// Compose every question's table, in declaration order.
///
/// With `workers > 1` questions are spread across scoped threads and
/// re-joined by index. The output, including which error is reported
/// when several questions fail, is identical to the serial run: the
/// error of the lowest-indexed failing question wins.
pub fn compose_all(
    spec: &ModelSpec,
    confusion: &ConfusionMatrix,
    workers: usize,
) -> Result<Vec<EffectiveNoiseTable>, NoiseError> {
    let count = spec.question_count();
    let workers = workers.clamp(1, count.max(1));

    let tables = if workers == 1 {
        spec.question_ids()
            .map(|q| compose_question(spec, q, confusion))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        compose_parallel(spec, confusion, workers)?
    };

    debug!(questions = count, workers, "noise tables composed");
    Ok(tables)
}

fn compose_parallel(
    spec: &ModelSpec,
    confusion: &ConfusionMatrix,
    workers: usize,
) -> Result<Vec<EffectiveNoiseTable>, NoiseError> {
    let count = spec.question_count();
    let (result_tx, result_rx) = crossbeam_channel::unbounded();

    std::thread::scope(|s| {
        for w in 0..workers {
            let tx = result_tx.clone();
            s.spawn(move || {
                for q in (w..count).step_by(workers) {
                    let result = compose_question(spec, QuestionId(q as u32), confusion);
                    if tx.send((q, result)).is_err() {
                        break;
                    }
                }
            });
        }
    });
    drop(result_tx);

    let mut slots: Vec<Option<EffectiveNoiseTable>> = vec![None; count];
    let mut first_error: Option<(usize, NoiseError)> = None;
    for (q, result) in result_rx.iter() {
        match result {
            Ok(table) => slots[q] = Some(table),
            Err(e) => {
                if first_error.as_ref().is_none_or(|(seen, _)| q < *seen) {
                    first_error = Some((q, e));
                }
            }
        }
    }
    if let Some((_, e)) = first_error {
        return Err(e);
    }
    Ok(slots.into_iter().flatten().collect())
}
