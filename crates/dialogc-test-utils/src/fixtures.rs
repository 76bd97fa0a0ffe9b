//! Reference specifications and matrix helpers.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::{json, Map, Value};

/// The two-class, one-question reference specification.
///
/// Compiled with an identity confusion matrix it yields 6 states,
/// 5 actions and `start: 0.5 0.5 0 0 0 0`.
pub const YES_NO_SPEC: &str = r#"{
    "Classifications": ["yes", "no"],
    "Observations": ["a", "b"],
    "Questions": {
        "q1": {
            "English": "Is the answer yes?",
            "Effect": {
                "yes": {"a": 0.9, "b": 0.1},
                "no": {"a": 0.2, "b": 0.8}
            }
        }
    },
    "Rewards": {"Success": 10, "Failure": -30, "Question": -5, "Wait": -0.0001},
    "Time Discount": 0.99
}"#;

/// A three-class, two-question specification in which `q2` leaves
/// `right` undeclared.
pub const HANDS_SPEC: &str = r#"{
    "Classifications": ["left", "right", "rest"],
    "Observations": ["low", "mid", "high"],
    "Questions": {
        "move_left": {
            "English": "Imagine moving your left hand.",
            "Effect": {
                "left": {"low": 0.1, "mid": 0.2, "high": 0.7},
                "right": {"low": 0.6, "mid": 0.3, "high": 0.1},
                "rest": {"low": 0.3, "mid": 0.4, "high": 0.3}
            }
        },
        "move_right": {
            "English": "Imagine moving your right hand.",
            "Effect": {
                "left": {"low": 0.7, "high": 0.3},
                "rest": {"mid": 1.0}
            }
        }
    },
    "Rewards": {"Success": 20, "Failure": -50, "Question": -2, "Wait": -0.01},
    "Time Discount": 0.95
}"#;

/// One question: its label and, per classification, a partial
/// observation prior.
pub type QuestionFixture<'a> = (&'a str, &'a [(&'a str, &'a [(&'a str, f64)])]);

/// Build a specification document with the reference rewards
/// (`10 / -30 / -5 / -0.0001`) and discount `0.99`.
pub fn spec_json(
    classifications: &[&str],
    observations: &[&str],
    questions: &[QuestionFixture<'_>],
) -> String {
    let mut qs = Map::new();
    for (name, effect) in questions {
        let mut rows = Map::new();
        for (class, entries) in effect.iter() {
            let row: Map<String, Value> = entries
                .iter()
                .map(|(obs, p)| (obs.to_string(), json!(p)))
                .collect();
            rows.insert(class.to_string(), Value::Object(row));
        }
        qs.insert(
            name.to_string(),
            json!({"English": format!("Question {name}?"), "Effect": rows}),
        );
    }
    json!({
        "Classifications": classifications,
        "Observations": observations,
        "Questions": qs,
        "Rewards": {"Success": 10, "Failure": -30, "Question": -5, "Wait": -0.0001},
        "Time Discount": 0.99
    })
    .to_string()
}

/// A synthetic specification with `classes` classifications,
/// `observations` observations and `questions` questions.
///
/// Every question declares every classification with strictly positive
/// probabilities drawn from a ChaCha8 RNG seeded with `seed`.
pub fn synthetic_spec_json(
    classes: usize,
    observations: usize,
    questions: usize,
    seed: u64,
) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let class_names: Vec<String> = (0..classes).map(|i| format!("c{i}")).collect();
    let obs_names: Vec<String> = (0..observations).map(|i| format!("o{i}")).collect();

    let mut qs = Map::new();
    for q in 0..questions {
        let mut rows = Map::new();
        for class in &class_names {
            let row: Map<String, Value> = obs_names
                .iter()
                .map(|o| (o.clone(), json!(0.05 + rng.random::<f64>())))
                .collect();
            rows.insert(class.clone(), Value::Object(row));
        }
        qs.insert(
            format!("q{q}"),
            json!({"English": format!("Synthetic question {q}"), "Effect": rows}),
        );
    }
    json!({
        "Classifications": class_names,
        "Observations": obs_names,
        "Questions": qs,
        "Rewards": {"Success": 10, "Failure": -30, "Question": -5, "Wait": -0.0001},
        "Time Discount": 0.99
    })
    .to_string()
}

/// The `dim × dim` identity as raw rows.
pub fn identity_rows(dim: usize) -> Vec<Vec<f64>> {
    (0..dim)
        .map(|r| (0..dim).map(|c| if r == c { 1.0 } else { 0.0 }).collect())
        .collect()
}
