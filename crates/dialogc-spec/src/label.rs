//! Validated labels.

use std::fmt;

use dialogc_core::{LabelKind, SpecError};

/// A classification, observation or question label.
///
/// Labels are embedded verbatim into the exchange format, where tokens
/// are whitespace-separated and `:` is a field separator, so they are
/// restricted to ASCII alphanumerics and underscore.
///
/// # Examples
///
/// ```
/// use dialogc_core::LabelKind;
/// use dialogc_spec::Label;
///
/// let label = Label::new(LabelKind::Classification, "left_hand").unwrap();
/// assert_eq!(label.as_str(), "left_hand");
///
/// assert!(Label::new(LabelKind::Observation, "two words").is_err());
/// assert!(Label::new(LabelKind::Question, "").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    /// Validate and wrap `raw`.
    pub fn new(kind: LabelKind, raw: &str) -> Result<Self, SpecError> {
        let valid = !raw.is_empty() && raw.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
        if !valid {
            return Err(SpecError::InvalidLabel {
                kind,
                label: raw.to_string(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    /// The label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
