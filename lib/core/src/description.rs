//! Serialized graph description: vertex key -> list of `[x, y]` neighbors.
//!
//! ```json
//! {
//!   "(0.0, 0.0)": [[3.0, 0.0]],
//!   "(3.0, 0.0)": [[3.0, 4.0]]
//! }
//! ```
//!
//! Neighbors that never appear as keys are still registered as vertices when
//! a [`GraphStore`](crate::GraphStore) is built from the description.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphDescription {
    entries: BTreeMap<String, Vec<[f64; 2]>>,
}

impl GraphDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Append neighbors to a vertex entry, creating it if absent.
    pub fn insert<I>(&mut self, key: impl Into<String>, neighbors: I)
    where
        I: IntoIterator<Item = [f64; 2]>,
    {
        self.entries.entry(key.into()).or_default().extend(neighbors);
    }

    #[inline]
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[[f64; 2]])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<[f64; 2]>)> for GraphDescription {
    fn from_iter<T: IntoIterator<Item = (K, Vec<[f64; 2]>)>>(iter: T) -> Self {
        let mut description = GraphDescription::new();
        for (key, neighbors) in iter {
            description.insert(key, neighbors);
        }
        description
    }
}
