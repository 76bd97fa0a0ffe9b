//! Specification loading and validation.
//!
//! [`SpecLoader::load`] checks the document in a fixed order and stops
//! at the first violation:
//!
//! 1. required keys (`Classifications`, `Observations`, `Questions`,
//!    `Rewards.{Success,Failure,Question,Wait}`, `Time Discount`)
//! 2. labels: well formed, non-empty sets, no duplicates (including
//!    repeated `Questions` keys)
//! 3. confusion matrix: square, sized to the observation count,
//!    column-stochastic
//! 4. discount in `[0, 1]`
//! 5. rewards finite, `Question > Failure`
//! 6. every question has `English` and `Effect`
//! 7. every label inside an effect table is declared and appears once,
//!    every probability finite and non-negative
//! 8. every rendered state label (`S_<c>`, `q_<q>_S_<c>`, `tS_<c>`) is
//!    distinct
//!
//! Nothing is constructed until every check has passed.

use std::collections::HashSet;
use std::io::Read;

use dialogc_core::tolerance::COLUMN_SUM_TOLERANCE;
use dialogc_core::{
    ClassId, LabelKind, MatrixError, ObsId, ReferenceError, SpecError, State, ValidationError,
};
use indexmap::IndexMap;
use tracing::debug;

use crate::confusion::{ConfusionMatrix, ConfusionSource};
use crate::label::Label;
use crate::raw::{Entries, RawQuestion, RawRewards, RawSpec};
use crate::spec::{EffectRow, ModelSpec, QuestionSpec, Rewards};

/// Loads and validates dialog specifications.
///
/// # Examples
///
/// ```
/// use dialogc_spec::{IdentityConfusion, SpecLoader};
///
/// let doc = r#"{
///     "Classifications": ["yes", "no"],
///     "Observations": ["a", "b"],
///     "Questions": {
///         "q1": {
///             "English": "Is it yes?",
///             "Effect": {
///                 "yes": {"a": 0.9, "b": 0.1},
///                 "no":  {"a": 0.2, "b": 0.8}
///             }
///         }
///     },
///     "Rewards": {"Success": 10, "Failure": -30, "Question": -5, "Wait": -0.0001},
///     "Time Discount": 0.99
/// }"#;
///
/// let (spec, confusion) = SpecLoader::new().load_str(doc, &IdentityConfusion).unwrap();
/// assert_eq!(spec.class_count(), 2);
/// assert_eq!(spec.question_count(), 1);
/// assert_eq!(confusion.dim(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct SpecLoader {
    column_tolerance: f64,
}

impl Default for SpecLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecLoader {
    /// A loader using the default column-sum tolerance (`1e-6`).
    pub fn new() -> Self {
        Self {
            column_tolerance: COLUMN_SUM_TOLERANCE,
        }
    }

    /// Override the confusion matrix column-sum tolerance.
    pub fn with_column_tolerance(mut self, tolerance: f64) -> Self {
        self.column_tolerance = tolerance;
        self
    }

    /// Load from a JSON string.
    pub fn load_str(
        &self,
        doc: &str,
        confusion: &dyn ConfusionSource,
    ) -> Result<(ModelSpec, ConfusionMatrix), ValidationError> {
        let raw: RawSpec = serde_json::from_str(doc).map_err(parse_error)?;
        self.validate(raw, confusion)
    }

    /// Load from any JSON byte stream.
    ///
    /// A failing stream is reported as [`SpecError::Read`], malformed
    /// content as [`SpecError::Parse`].
    pub fn load_reader<R: Read>(
        &self,
        reader: R,
        confusion: &dyn ConfusionSource,
    ) -> Result<(ModelSpec, ConfusionMatrix), ValidationError> {
        let raw: RawSpec = serde_json::from_reader(reader).map_err(|e| {
            if e.is_io() {
                ValidationError::from(SpecError::Read {
                    reason: e.to_string(),
                })
            } else {
                parse_error(e)
            }
        })?;
        self.validate(raw, confusion)
    }

    fn validate(
        &self,
        raw: RawSpec,
        confusion: &dyn ConfusionSource,
    ) -> Result<(ModelSpec, ConfusionMatrix), ValidationError> {
        // 1. Required keys.
        let classifications = required(raw.classifications, "Classifications")?;
        let observations = required(raw.observations, "Observations")?;
        let questions = required(raw.questions, "Questions")?;
        let raw_rewards = required(raw.rewards, "Rewards")?;
        let rewards = required_rewards(raw_rewards)?;
        let discount = required(raw.time_discount, "Time Discount")?;

        // 2. Labels.
        let classifications = label_set(LabelKind::Classification, &classifications)?;
        let observations = label_set(LabelKind::Observation, &observations)?;
        let mut question_labels = Vec::with_capacity(questions.len());
        for (name, _) in &questions.0 {
            question_labels.push(Label::new(LabelKind::Question, name)?);
        }
        no_duplicates(LabelKind::Question, &questions)?;

        // 3. Confusion matrix.
        let matrix = confusion.confusion_matrix(observations.len())?;
        if matrix.dim() != observations.len() {
            return Err(MatrixError::WrongSize {
                expected: observations.len(),
                found: matrix.dim(),
            }
            .into());
        }
        matrix.check_columns(self.column_tolerance)?;

        // 4. Discount.
        finite("Time Discount", discount)?;
        if !(0.0..=1.0).contains(&discount) {
            return Err(SpecError::DiscountOutOfRange { value: discount }.into());
        }

        // 5. Rewards.
        finite("Rewards.Success", rewards.success)?;
        finite("Rewards.Failure", rewards.failure)?;
        finite("Rewards.Question", rewards.question)?;
        finite("Rewards.Wait", rewards.wait)?;
        if rewards.question <= rewards.failure {
            return Err(SpecError::RewardOrdering {
                question: rewards.question,
                failure: rewards.failure,
            }
            .into());
        }

        // 6. Question structure.
        let mut present = Vec::with_capacity(questions.len());
        for (name, question) in questions {
            let RawQuestion { english, effect } = question;
            let description = english.ok_or_else(|| SpecError::MissingKey {
                key: format!("Questions.{name}.English"),
            })?;
            let effect = effect.ok_or_else(|| SpecError::MissingKey {
                key: format!("Questions.{name}.Effect"),
            })?;
            present.push((description, effect));
        }

        // 7. References and probabilities.
        let mut resolved = Vec::with_capacity(present.len());
        for (label, (description, effect)) in question_labels.into_iter().zip(present) {
            let effect = resolve_effect(&label, effect, &classifications, &observations)?;
            resolved.push(QuestionSpec {
                label,
                description,
                effect,
            });
        }

        let spec = ModelSpec {
            classifications,
            observations,
            questions: resolved,
            rewards,
            discount,
        };

        // 8. Rendered state labels.
        distinct_state_labels(&spec)?;

        debug!(
            classifications = spec.class_count(),
            observations = spec.observation_count(),
            questions = spec.question_count(),
            "specification validated"
        );
        Ok((spec, matrix))
    }
}

fn parse_error(e: serde_json::Error) -> ValidationError {
    SpecError::Parse {
        reason: e.to_string(),
    }
    .into()
}

fn required<T>(value: Option<T>, key: &str) -> Result<T, SpecError> {
    value.ok_or_else(|| SpecError::MissingKey {
        key: key.to_string(),
    })
}

fn required_rewards(raw: RawRewards) -> Result<Rewards, SpecError> {
    Ok(Rewards {
        success: required(raw.success, "Rewards.Success")?,
        failure: required(raw.failure, "Rewards.Failure")?,
        question: required(raw.question, "Rewards.Question")?,
        wait: required(raw.wait, "Rewards.Wait")?,
    })
}

fn finite(key: &str, value: f64) -> Result<(), SpecError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SpecError::NonFiniteValue {
            key: key.to_string(),
            value,
        })
    }
}

fn label_set(kind: LabelKind, raw: &[String]) -> Result<Vec<Label>, SpecError> {
    if raw.is_empty() {
        return Err(SpecError::EmptyLabelSet { kind });
    }
    let mut seen = HashSet::with_capacity(raw.len());
    let mut labels = Vec::with_capacity(raw.len());
    for name in raw {
        let label = Label::new(kind, name)?;
        if !seen.insert(name.as_str()) {
            return Err(SpecError::DuplicateLabel {
                kind,
                label: name.clone(),
            });
        }
        labels.push(label);
    }
    Ok(labels)
}

fn no_duplicates<V>(kind: LabelKind, entries: &Entries<V>) -> Result<(), SpecError> {
    match entries.first_duplicate() {
        Some(label) => Err(SpecError::DuplicateLabel {
            kind,
            label: label.to_string(),
        }),
        None => Ok(()),
    }
}

/// `q_<q>_S_<c>` is not injective over underscored labels, so two
/// distinct states can render identically.
fn distinct_state_labels(spec: &ModelSpec) -> Result<(), SpecError> {
    let states = spec
        .class_ids()
        .map(State::General)
        .chain(
            spec.question_ids()
                .flat_map(|q| spec.class_ids().map(move |c| State::Question(q, c))),
        )
        .chain(spec.class_ids().map(State::Terminal));

    let mut seen = HashSet::new();
    for state in states {
        let label = spec.state_label(state);
        if seen.contains(&label) {
            return Err(SpecError::DuplicateLabel {
                kind: LabelKind::State,
                label,
            });
        }
        seen.insert(label);
    }
    Ok(())
}

fn position(labels: &[Label], name: &str) -> Option<u32> {
    labels
        .iter()
        .position(|l| l.as_str() == name)
        .map(|i| i as u32)
}

fn resolve_effect(
    question: &Label,
    effect: Entries<Entries<f64>>,
    classifications: &[Label],
    observations: &[Label],
) -> Result<IndexMap<ClassId, EffectRow>, ValidationError> {
    no_duplicates(LabelKind::Classification, &effect)?;
    let mut resolved = IndexMap::with_capacity(effect.len());
    for (class_name, row) in effect {
        no_duplicates(LabelKind::Observation, &row)?;
        let class = position(classifications, &class_name).ok_or_else(|| {
            ReferenceError::UnknownClassification {
                question: question.to_string(),
                label: class_name.clone(),
            }
        })?;
        let mut entries = EffectRow::new();
        for (obs_name, value) in row {
            let obs = position(observations, &obs_name).ok_or_else(|| {
                ReferenceError::UnknownObservation {
                    question: question.to_string(),
                    classification: class_name.clone(),
                    label: obs_name.clone(),
                }
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(SpecError::InvalidProbability {
                    question: question.to_string(),
                    classification: class_name.clone(),
                    observation: obs_name,
                    value,
                }
                .into());
            }
            entries.push((ObsId(obs), value));
        }
        resolved.insert(ClassId(class), entries);
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confusion::IdentityConfusion;
    use dialogc_test_utils::fixtures;
    use serde_json::{json, Value};

    fn load(doc: &Value) -> Result<ModelSpec, ValidationError> {
        SpecLoader::new()
            .load_str(&doc.to_string(), &IdentityConfusion)
            .map(|(spec, _)| spec)
    }

    fn base() -> Value {
        serde_json::from_str(fixtures::YES_NO_SPEC).unwrap()
    }

    #[test]
    fn loads_reference_spec() {
        let spec = load(&base()).unwrap();
        assert_eq!(spec.classifications()[1].as_str(), "no");
        assert_eq!(spec.observations()[0].as_str(), "a");
        assert_eq!(spec.question(dialogc_core::QuestionId(0)).label().as_str(), "q1");
        assert_eq!(spec.discount(), 0.99);
        assert_eq!(spec.rewards().wait, -0.0001);
        let effect = spec.questions()[0].effect();
        assert_eq!(effect[&ClassId(0)].as_slice(), &[(ObsId(0), 0.9), (ObsId(1), 0.1)]);
    }

    #[test]
    fn question_order_follows_the_document() {
        let mut doc = base();
        doc["Questions"] = json!({
            "zeta": {"English": "z", "Effect": {}},
            "alpha": {"English": "a", "Effect": {}},
            "mid": {"English": "m", "Effect": {}}
        });
        let spec = load(&doc).unwrap();
        let names: Vec<_> = spec.questions().iter().map(|q| q.label().as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SpecLoader::new()
            .load_str("{ not json", &IdentityConfusion)
            .unwrap_err();
        assert!(matches!(err, ValidationError::Spec(SpecError::Parse { .. })));
    }

    #[test]
    fn missing_top_level_keys() {
        for key in ["Classifications", "Observations", "Questions", "Rewards", "Time Discount"] {
            let mut doc = base();
            doc.as_object_mut().unwrap().remove(key);
            assert_eq!(
                load(&doc).unwrap_err(),
                ValidationError::Spec(SpecError::MissingKey { key: key.into() }),
                "removing {key}"
            );
        }
    }

    #[test]
    fn missing_reward_keys() {
        for key in ["Success", "Failure", "Question", "Wait"] {
            let mut doc = base();
            doc["Rewards"].as_object_mut().unwrap().remove(key);
            assert_eq!(
                load(&doc).unwrap_err(),
                ValidationError::Spec(SpecError::MissingKey {
                    key: format!("Rewards.{key}")
                })
            );
        }
    }

    #[test]
    fn missing_question_parts() {
        let mut doc = base();
        doc["Questions"]["q1"].as_object_mut().unwrap().remove("English");
        assert_eq!(
            load(&doc).unwrap_err(),
            ValidationError::Spec(SpecError::MissingKey {
                key: "Questions.q1.English".into()
            })
        );

        let mut doc = base();
        doc["Questions"]["q1"].as_object_mut().unwrap().remove("Effect");
        assert_eq!(
            load(&doc).unwrap_err(),
            ValidationError::Spec(SpecError::MissingKey {
                key: "Questions.q1.Effect".into()
            })
        );
    }

    #[test]
    fn labels_with_whitespace_are_rejected() {
        let mut doc = base();
        doc["Classifications"] = json!(["yes", "not sure"]);
        assert_eq!(
            load(&doc).unwrap_err(),
            ValidationError::Spec(SpecError::InvalidLabel {
                kind: LabelKind::Classification,
                label: "not sure".into()
            })
        );

        let mut doc = base();
        doc["Questions"] = json!({"bad question": {"English": "?", "Effect": {}}});
        assert!(matches!(
            load(&doc).unwrap_err(),
            ValidationError::Spec(SpecError::InvalidLabel {
                kind: LabelKind::Question,
                ..
            })
        ));
    }

    #[test]
    fn duplicate_and_empty_label_sets() {
        let mut doc = base();
        doc["Observations"] = json!(["a", "b", "a"]);
        assert_eq!(
            load(&doc).unwrap_err(),
            ValidationError::Spec(SpecError::DuplicateLabel {
                kind: LabelKind::Observation,
                label: "a".into()
            })
        );

        let mut doc = base();
        doc["Classifications"] = json!([]);
        assert_eq!(
            load(&doc).unwrap_err(),
            ValidationError::Spec(SpecError::EmptyLabelSet {
                kind: LabelKind::Classification
            })
        );
    }

    #[test]
    fn confusion_matrix_must_match_observations() {
        let err = SpecLoader::new()
            .load_str(fixtures::YES_NO_SPEC, &ConfusionMatrix::identity(3))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::Matrix(MatrixError::WrongSize {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn stricter_tolerance_rejects_a_loose_matrix() {
        let loose = ConfusionMatrix::from_rows(vec![vec![0.5, 0.0], vec![0.5 + 5e-7, 1.0]]).unwrap();
        assert!(SpecLoader::new().load_str(fixtures::YES_NO_SPEC, &loose).is_ok());
        let err = SpecLoader::new()
            .with_column_tolerance(1e-9)
            .load_str(fixtures::YES_NO_SPEC, &loose)
            .unwrap_err();
        assert!(matches!(err, ValidationError::Matrix(MatrixError::ColumnSum { column: 0, .. })));
    }

    #[test]
    fn discount_bounds() {
        for ok in [0.0, 1.0, 0.5] {
            let mut doc = base();
            doc["Time Discount"] = json!(ok);
            assert!(load(&doc).is_ok());
        }
        for bad in [-0.01, 1.01] {
            let mut doc = base();
            doc["Time Discount"] = json!(bad);
            assert_eq!(
                load(&doc).unwrap_err(),
                ValidationError::Spec(SpecError::DiscountOutOfRange { value: bad })
            );
        }
    }

    #[test]
    fn question_reward_must_exceed_failure() {
        let mut doc = base();
        doc["Rewards"]["Question"] = json!(-30);
        assert_eq!(
            load(&doc).unwrap_err(),
            ValidationError::Spec(SpecError::RewardOrdering {
                question: -30.0,
                failure: -30.0
            })
        );
    }

    #[test]
    fn undeclared_references() {
        let mut doc = base();
        doc["Questions"]["q1"]["Effect"]["maybe"] = json!({"a": 1.0});
        assert_eq!(
            load(&doc).unwrap_err(),
            ValidationError::Reference(ReferenceError::UnknownClassification {
                question: "q1".into(),
                label: "maybe".into()
            })
        );

        let mut doc = base();
        doc["Questions"]["q1"]["Effect"]["no"]["c"] = json!(0.5);
        assert_eq!(
            load(&doc).unwrap_err(),
            ValidationError::Reference(ReferenceError::UnknownObservation {
                question: "q1".into(),
                classification: "no".into(),
                label: "c".into()
            })
        );
    }

    #[test]
    fn negative_probability_is_rejected() {
        let mut doc = base();
        doc["Questions"]["q1"]["Effect"]["yes"]["b"] = json!(-0.1);
        assert!(matches!(
            load(&doc).unwrap_err(),
            ValidationError::Spec(SpecError::InvalidProbability { value, .. }) if value == -0.1
        ));
    }

    #[test]
    fn first_violation_wins() {
        // Bad label and bad discount: labels are checked first.
        let mut doc = base();
        doc["Observations"] = json!(["a b", "c"]);
        doc["Time Discount"] = json!(2.0);
        assert!(matches!(
            load(&doc).unwrap_err(),
            ValidationError::Spec(SpecError::InvalidLabel { .. })
        ));

        // Bad discount and bad reward ordering: discount first.
        let mut doc = base();
        doc["Time Discount"] = json!(2.0);
        doc["Rewards"]["Question"] = json!(-100);
        assert!(matches!(
            load(&doc).unwrap_err(),
            ValidationError::Spec(SpecError::DiscountOutOfRange { .. })
        ));
    }

    #[test]
    fn wrong_value_type_is_a_parse_error() {
        let mut doc = base();
        doc["Rewards"]["Success"] = json!("ten");
        assert!(matches!(
            load(&doc).unwrap_err(),
            ValidationError::Spec(SpecError::Parse { .. })
        ));
    }
    // ── Duplicates and label collisions ─────────────────────────────

    #[test]
    fn repeated_question_key_is_rejected() {
        let doc = r#"{
            "Classifications": ["yes", "no"],
            "Observations": ["a", "b"],
            "Questions": {
                "q1": {"English": "first", "Effect": {}},
                "q1": {"English": "second", "Effect": {}}
            },
            "Rewards": {"Success": 10, "Failure": -30, "Question": -5, "Wait": -0.0001},
            "Time Discount": 0.99
        }"#;
        let err = SpecLoader::new().load_str(doc, &IdentityConfusion).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Spec(SpecError::DuplicateLabel {
                kind: LabelKind::Question,
                label: "q1".into()
            })
        );
    }

    #[test]
    fn repeated_effect_keys_are_rejected() {
        let with_effect = |effect: &str| {
            fixtures::YES_NO_SPEC.replace(
                r#"{
                "yes": {"a": 0.9, "b": 0.1},
                "no": {"a": 0.2, "b": 0.8}
            }"#,
                effect,
            )
        };

        let doc = with_effect(r#"{"yes": {"a": 1.0}, "yes": {"b": 1.0}}"#);
        assert_eq!(
            SpecLoader::new().load_str(&doc, &IdentityConfusion).unwrap_err(),
            ValidationError::Spec(SpecError::DuplicateLabel {
                kind: LabelKind::Classification,
                label: "yes".into()
            })
        );

        let doc = with_effect(r#"{"no": {"a": 0.4, "b": 0.1, "a": 0.5}}"#);
        assert_eq!(
            SpecLoader::new().load_str(&doc, &IdentityConfusion).unwrap_err(),
            ValidationError::Spec(SpecError::DuplicateLabel {
                kind: LabelKind::Observation,
                label: "a".into()
            })
        );
    }

    #[test]
    fn colliding_state_labels_are_rejected() {
        // q_a_S_ + S_b and q_a_S_S_ + b both render as q_a_S_S_b.
        let doc = fixtures::spec_json(
            &["b", "S_b"],
            &["o"],
            &[("a", &[("b", &[("o", 1.0)])]), ("a_S", &[("b", &[("o", 1.0)])])],
        );
        let err = SpecLoader::new().load_str(&doc, &IdentityConfusion).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Spec(SpecError::DuplicateLabel {
                kind: LabelKind::State,
                label: "q_a_S_S_b".into()
            })
        );
    }

    #[test]
    fn underscored_labels_that_do_not_collide_are_accepted() {
        let doc = fixtures::spec_json(
            &["b", "S_b"],
            &["o"],
            &[("a", &[("b", &[("o", 1.0)])])],
        );
        let spec = load(&serde_json::from_str(&doc).unwrap()).unwrap();
        assert_eq!(
            spec.state_label(State::Question(dialogc_core::QuestionId(0), ClassId(1))),
            "q_a_S_S_b"
        );
    }

    // ── Readers ─────────────────────────────────────────────────────

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stream closed"))
        }
    }

    #[test]
    fn failing_stream_is_a_read_error() {
        let err = SpecLoader::new()
            .load_reader(FailingReader, &IdentityConfusion)
            .unwrap_err();
        match err {
            ValidationError::Spec(SpecError::Read { reason }) => {
                assert!(reason.contains("stream closed"));
            }
            other => panic!("expected Read, got {other:?}"),
        }
    }

    #[test]
    fn malformed_stream_is_still_a_parse_error() {
        let err = SpecLoader::new()
            .load_reader("{ not json".as_bytes(), &IdentityConfusion)
            .unwrap_err();
        assert!(matches!(err, ValidationError::Spec(SpecError::Parse { .. })));
    }
}
