use std::fmt;

use crate::error::{DrugIndexError, Result};

/// Key used to order the nodes of the drug index.
///
/// The key is the drug name with surrounding whitespace
/// removed and all characters lowercased. Two spellings
/// that differ only in case or surrounding whitespace
/// (e.g. "  ParaceTamol " and "paracetamol") produce the
/// same key, and so end up in the same node.
///
/// Ordering is plain lexicographic ordering on the
/// normalized string.
///
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Hash)]
pub struct DrugKey(String);

impl DrugKey {
    /// Normalize a raw drug name into a key
    ///
    /// Blank input (empty, or only whitespace) is not a
    /// valid key and returns EmptyKey. The same function
    /// must be used when inserting and when searching.
    pub fn normalize(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(DrugIndexError::EmptyKey)
        } else {
            Ok(Self(trimmed.to_lowercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key in the form shown to users (e.g. "Paracetamol")
    pub fn display_name(&self) -> String {
        title_case(&self.0)
    }
}

impl fmt::Display for DrugKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capitalise the first letter of every run of alphabetic
/// characters and lowercase the rest, so "amoxicillin 500mg"
/// becomes "Amoxicillin 500Mg".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_alphabetic = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            out.push(c);
            previous_alphabetic = false;
        }
    }
    out
}
