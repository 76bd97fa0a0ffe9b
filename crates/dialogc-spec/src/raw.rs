//! Serde mirror of the specification document.
//!
//! Every key is optional here so that absence is reported as a
//! [`SpecError::MissingKey`](dialogc_core::SpecError::MissingKey) naming
//! the key, rather than as a generic parse failure. Object-valued
//! tables are read as [`Entries`], which keeps declaration order and
//! repeated keys so the loader can reject duplicates by label.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

#[derive(Debug, serde::Deserialize)]
pub(crate) struct RawSpec {
    #[serde(rename = "Classifications")]
    pub classifications: Option<Vec<String>>,
    #[serde(rename = "Observations")]
    pub observations: Option<Vec<String>>,
    #[serde(rename = "Questions")]
    pub questions: Option<Entries<RawQuestion>>,
    #[serde(rename = "Rewards")]
    pub rewards: Option<RawRewards>,
    #[serde(rename = "Time Discount")]
    pub time_discount: Option<f64>,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct RawQuestion {
    #[serde(rename = "English")]
    pub english: Option<String>,
    /// classification -> observation -> prior probability.
    #[serde(rename = "Effect")]
    pub effect: Option<Entries<Entries<f64>>>,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct RawRewards {
    #[serde(rename = "Success")]
    pub success: Option<f64>,
    #[serde(rename = "Failure")]
    pub failure: Option<f64>,
    #[serde(rename = "Question")]
    pub question: Option<f64>,
    #[serde(rename = "Wait")]
    pub wait: Option<f64>,
}

/// A JSON object as an ordered list of `(key, value)` pairs.
///
/// Unlike a map, repeated keys are kept.
#[derive(Debug)]
pub(crate) struct Entries<V>(pub Vec<(String, V)>);

impl<V> Entries<V> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The first key that appears more than once.
    pub fn first_duplicate(&self) -> Option<&str> {
        self.0.iter().enumerate().find_map(|(i, (key, _))| {
            self.0[..i]
                .iter()
                .any(|(earlier, _)| earlier == key)
                .then_some(key.as_str())
        })
    }
}

impl<V> IntoIterator for Entries<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Entries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}
