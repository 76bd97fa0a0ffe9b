//! Exchange-format reader.
//!
//! [`PomdpDocument::parse`] reads text produced by
//! [`PomdpWriter`](crate::PomdpWriter) back into id-indexed entries, so
//! a written file can be checked against the model it came from.

use std::io::Read;

use dialogc_core::{ActionId, ObsId, StateId};
use indexmap::IndexSet;

use crate::error::FormatError;

/// A parsed exchange-format document.
///
/// Labels are resolved against the `states:`, `actions:` and
/// `observations:` headers, so entries use the same ids as the
/// compiled model.
#[derive(Clone, Debug, PartialEq)]
pub struct PomdpDocument {
    discount: f64,
    values: String,
    states: IndexSet<String>,
    actions: IndexSet<String>,
    observations: IndexSet<String>,
    start: Vec<f64>,
    transitions: Vec<(ActionId, StateId, StateId, f64)>,
    observation_probs: Vec<(StateId, ObsId, f64)>,
    rewards: Vec<(ActionId, StateId, f64)>,
}

#[derive(Default)]
struct Builder {
    discount: Option<f64>,
    values: Option<String>,
    states: Option<IndexSet<String>>,
    actions: Option<IndexSet<String>>,
    observations: Option<IndexSet<String>>,
    start: Option<Vec<f64>>,
    transitions: Vec<(ActionId, StateId, StateId, f64)>,
    observation_probs: Vec<(StateId, ObsId, f64)>,
    rewards: Vec<(ActionId, StateId, f64)>,
}

impl PomdpDocument {
    /// Parse a whole document.
    ///
    /// Blank lines and lines starting with `#` are skipped. Headers
    /// must precede any `T`, `O` or `R` line that uses their labels.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let mut b = Builder::default();

        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let Some((key, rest)) = trimmed.split_once(':') else {
                return Err(malformed(line, "expected '<key>:'"));
            };
            let rest = rest.trim();

            match key.trim() {
                "discount" => b.discount = Some(parse_float(line, rest)?),
                "values" => b.values = Some(rest.to_owned()),
                "states" => b.states = Some(parse_labels(line, rest)?),
                "actions" => b.actions = Some(parse_labels(line, rest)?),
                "observations" => b.observations = Some(parse_labels(line, rest)?),
                "start" => {
                    let probs = rest
                        .split_whitespace()
                        .map(|tok| parse_float(line, tok))
                        .collect::<Result<Vec<_>, _>>()?;
                    b.start = Some(probs);
                }
                "T" => {
                    let [action, from, tail] = fields::<3>(line, rest)?;
                    let (to, p) = value_suffix(line, tail)?;
                    let actions = require(&b.actions, "actions")?;
                    let states = require(&b.states, "states")?;
                    b.transitions.push((
                        ActionId(lookup(line, actions, action)?),
                        StateId(lookup(line, states, from)?),
                        StateId(lookup(line, states, to)?),
                        p,
                    ));
                }
                "O" => {
                    let [action, state, tail] = fields::<3>(line, rest)?;
                    if action != "*" {
                        return Err(malformed(line, "observation lines must use '*' for the action"));
                    }
                    let (obs, p) = value_suffix(line, tail)?;
                    let states = require(&b.states, "states")?;
                    let observations = require(&b.observations, "observations")?;
                    b.observation_probs.push((
                        StateId(lookup(line, states, state)?),
                        ObsId(lookup(line, observations, obs)?),
                        p,
                    ));
                }
                "R" => {
                    let [action, state, next, tail] = fields::<4>(line, rest)?;
                    let (obs, r) = value_suffix(line, tail)?;
                    if next != "*" || obs != "*" {
                        return Err(malformed(
                            line,
                            "reward lines must use '*' for end state and observation",
                        ));
                    }
                    let actions = require(&b.actions, "actions")?;
                    let states = require(&b.states, "states")?;
                    b.rewards.push((
                        ActionId(lookup(line, actions, action)?),
                        StateId(lookup(line, states, state)?),
                        r,
                    ));
                }
                other => return Err(malformed(line, &format!("unknown key '{other}'"))),
            }
        }

        let states = b
            .states
            .ok_or(FormatError::MissingHeader { header: "states" })?;
        let start = b.start.ok_or(FormatError::MissingHeader { header: "start" })?;
        if start.len() != states.len() {
            return Err(FormatError::Malformed {
                line: 0,
                detail: format!(
                    "start has {} entries for {} states",
                    start.len(),
                    states.len()
                ),
            });
        }

        Ok(Self {
            discount: b
                .discount
                .ok_or(FormatError::MissingHeader { header: "discount" })?,
            values: b.values.ok_or(FormatError::MissingHeader { header: "values" })?,
            states,
            actions: b
                .actions
                .ok_or(FormatError::MissingHeader { header: "actions" })?,
            observations: b.observations.ok_or(FormatError::MissingHeader {
                header: "observations",
            })?,
            start,
            transitions: b.transitions,
            observation_probs: b.observation_probs,
            rewards: b.rewards,
        })
    }

    /// Read and parse a whole document from `reader`.
    pub fn read<R: Read>(mut reader: R) -> Result<Self, FormatError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    /// The `discount:` value.
    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// The `values:` value.
    pub fn values(&self) -> &str {
        &self.values
    }

    /// State labels in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &str> + '_ {
        self.states.iter().map(String::as_str)
    }

    /// Action labels in declaration order.
    pub fn actions(&self) -> impl Iterator<Item = &str> + '_ {
        self.actions.iter().map(String::as_str)
    }

    /// Observation labels in declaration order.
    pub fn observations(&self) -> impl Iterator<Item = &str> + '_ {
        self.observations.iter().map(String::as_str)
    }

    /// The `start:` vector.
    pub fn start(&self) -> &[f64] {
        &self.start
    }

    /// `T` entries in file order.
    pub fn transitions(&self) -> &[(ActionId, StateId, StateId, f64)] {
        &self.transitions
    }

    /// `O` entries in file order.
    pub fn observation_probs(&self) -> &[(StateId, ObsId, f64)] {
        &self.observation_probs
    }

    /// `R` entries in file order.
    pub fn rewards(&self) -> &[(ActionId, StateId, f64)] {
        &self.rewards
    }
}

fn malformed(line: usize, detail: &str) -> FormatError {
    FormatError::Malformed {
        line,
        detail: detail.to_owned(),
    }
}

fn parse_float(line: usize, tok: &str) -> Result<f64, FormatError> {
    tok.parse::<f64>()
        .map_err(|_| malformed(line, &format!("'{tok}' is not a number")))
}

fn parse_labels(line: usize, rest: &str) -> Result<IndexSet<String>, FormatError> {
    let mut set = IndexSet::new();
    for tok in rest.split_whitespace() {
        if !set.insert(tok.to_owned()) {
            return Err(malformed(line, &format!("duplicate label '{tok}'")));
        }
    }
    Ok(set)
}

/// Split the remainder of a `T`/`O`/`R` line into exactly `N`
/// colon-separated, trimmed fields.
fn fields<const N: usize>(line: usize, rest: &str) -> Result<[&str; N], FormatError> {
    let parts: Vec<&str> = rest.split(':').map(str::trim).collect();
    parts
        .try_into()
        .map_err(|p: Vec<&str>| malformed(line, &format!("expected {N} fields, found {}", p.len())))
}

/// Split `"<label> <float>"`.
fn value_suffix(line: usize, tail: &str) -> Result<(&str, f64), FormatError> {
    let mut toks = tail.split_whitespace();
    match (toks.next(), toks.next(), toks.next()) {
        (Some(label), Some(value), None) => Ok((label, parse_float(line, value)?)),
        _ => Err(malformed(line, &format!("expected '<label> <value>', found '{tail}'"))),
    }
}

fn require<'a>(
    header: &'a Option<IndexSet<String>>,
    name: &'static str,
) -> Result<&'a IndexSet<String>, FormatError> {
    header
        .as_ref()
        .ok_or(FormatError::MissingHeader { header: name })
}

fn lookup(line: usize, set: &IndexSet<String>, label: &str) -> Result<u32, FormatError> {
    set.get_index_of(label)
        .map(|i| i as u32)
        .ok_or_else(|| FormatError::UnknownLabel {
            line,
            label: label.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
discount: 0.5
values: reward
states: S_a tS_a
actions: wait cA_a
observations: o_x
start: 1 0
T : wait : S_a : S_a 1
T : cA_a : S_a : tS_a 1
O : * : S_a : o_x 1
R : cA_a : S_a : * : * 10
";

    #[test]
    fn parses_small_document() {
        let doc = PomdpDocument::parse(SMALL).unwrap();
        assert_eq!(doc.discount(), 0.5);
        assert_eq!(doc.values(), "reward");
        assert_eq!(doc.states().collect::<Vec<_>>(), vec!["S_a", "tS_a"]);
        assert_eq!(doc.start(), &[1.0, 0.0]);
        assert_eq!(
            doc.transitions(),
            &[
                (ActionId(0), StateId(0), StateId(0), 1.0),
                (ActionId(1), StateId(0), StateId(1), 1.0),
            ]
        );
        assert_eq!(doc.observation_probs(), &[(StateId(0), ObsId(0), 1.0)]);
        assert_eq!(doc.rewards(), &[(ActionId(1), StateId(0), 10.0)]);
    }

    #[test]
    fn read_matches_parse() {
        let doc = PomdpDocument::read(SMALL.as_bytes()).unwrap();
        assert_eq!(doc, PomdpDocument::parse(SMALL).unwrap());
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let text = format!("# generated\n\n{SMALL}\n");
        assert!(PomdpDocument::parse(&text).is_ok());
    }

    #[test]
    fn unknown_label_reports_line() {
        let text = SMALL.replace("T : wait : S_a : S_a 1", "T : wait : S_a : S_b 1");
        match PomdpDocument::parse(&text) {
            Err(FormatError::UnknownLabel { line, label }) => {
                assert_eq!(line, 7);
                assert_eq!(label, "S_b");
            }
            other => panic!("expected UnknownLabel, got {other:?}"),
        }
    }

    #[test]
    fn transition_before_states_is_missing_header() {
        let text = "discount: 0.5\nT : wait : S_a : S_a 1\n";
        assert!(matches!(
            PomdpDocument::parse(text),
            Err(FormatError::MissingHeader { header: "actions" })
        ));
    }

    #[test]
    fn missing_discount() {
        let text = SMALL.replace("discount: 0.5\n", "");
        assert!(matches!(
            PomdpDocument::parse(&text),
            Err(FormatError::MissingHeader { header: "discount" })
        ));
    }

    #[test]
    fn bad_number_is_malformed() {
        let text = SMALL.replace("o_x 1", "o_x one");
        match PomdpDocument::parse(&text) {
            Err(FormatError::Malformed { line, detail }) => {
                assert_eq!(line, 9);
                assert!(detail.contains("'one'"), "{detail}");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        let text = SMALL.replace("R : cA_a : S_a : * : * 10", "R : cA_a : S_a 10");
        assert!(matches!(
            PomdpDocument::parse(&text),
            Err(FormatError::Malformed { line: 10, .. })
        ));
    }

    #[test]
    fn start_length_must_match_states() {
        let text = SMALL.replace("start: 1 0", "start: 1");
        assert!(matches!(
            PomdpDocument::parse(&text),
            Err(FormatError::Malformed { .. })
        ));
    }

    #[test]
    fn duplicate_state_label_is_malformed() {
        let text = SMALL.replace("states: S_a tS_a", "states: S_a S_a");
        assert!(matches!(
            PomdpDocument::parse(&text),
            Err(FormatError::Malformed { line: 3, .. })
        ));
    }
}
