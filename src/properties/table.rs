//! Immutable property tables.

use std::collections::HashMap;

use serde::Serialize;

use crate::properties::parser::{self, PropertiesParseError};

/// Name/value pairs loaded for one scope.
///
/// There is no mutating API: a table is built once and then shared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PropertyTable {
    entries: HashMap<String, String>,
}

impl PropertyTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse raw properties bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, PropertiesParseError> {
        Self::parse_str(&parser::decode(bytes))
    }

    /// Parse properties text. Later duplicates replace earlier ones.
    pub fn parse_str(text: &str) -> Result<Self, PropertiesParseError> {
        Ok(parser::parse(text)?.into_iter().collect())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for PropertyTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
