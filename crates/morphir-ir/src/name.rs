// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Morphir names and paths.
//!
//! A [`Name`] is a list of lowercase words, a [`Path`] is a list of names.
//! Both follow the Morphir-Elm conventions for splitting and rendering:
//!
//! | Input | Name words | Title case | Camel case |
//! |-------|------------|------------|------------|
//! | `valueInUSD` | `value in u s d` | `ValueInUSD` | `valueInUSD` |
//! | `shape` | `shape` | `Shape` | `shape` |
//! | `My.Package` (path) | `my`, `package` | `My.Package` | - |

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Name
// ---------------------------------------------------------------------------

/// A Morphir name: an ordered list of lowercase words.
///
/// JSON form is an array of strings, e.g. `["local","name"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(Vec<String>);

impl Name {
    /// Build a name from already-split words.
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Name(parts.into_iter().map(Into::into).collect())
    }

    /// Split a string into words.
    ///
    /// A word is either a letter followed by lowercase letters, or a run of
    /// digits. Anything else separates words. Words are lowercased.
    pub fn parse(s: &str) -> Self {
        let mut words: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut in_digits = false;

        for c in s.chars() {
            if c.is_ascii_uppercase() {
                flush(&mut words, &mut current);
                current.push(c.to_ascii_lowercase());
                in_digits = false;
            } else if c.is_ascii_lowercase() {
                if current.is_empty() || in_digits {
                    flush(&mut words, &mut current);
                }
                current.push(c);
                in_digits = false;
            } else if c.is_ascii_digit() {
                if !in_digits {
                    flush(&mut words, &mut current);
                }
                current.push(c);
                in_digits = true;
            } else {
                flush(&mut words, &mut current);
                in_digits = false;
            }
        }
        flush(&mut words, &mut current);

        Name(words)
    }

    /// The words of this name.
    pub fn parts(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `["value","in","u","s","d"]` -> `ValueInUSD`.
    pub fn to_title_case(&self) -> String {
        self.0.iter().map(|w| capitalize(w)).collect()
    }

    /// `["value","in","u","s","d"]` -> `valueInUSD`.
    pub fn to_camel_case(&self) -> String {
        let mut words = self.0.iter();
        let mut out = match words.next() {
            Some(first) => first.clone(),
            None => return String::new(),
        };
        for w in words {
            out.push_str(&capitalize(w));
        }
        out
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_camel_case())
    }
}

fn flush(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// A Morphir path: an ordered list of names (package or module path).
///
/// JSON form is an array of names, e.g. `[["my"],["package"]]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<Name>);

impl Path {
    pub fn from_names(names: Vec<Name>) -> Self {
        Path(names)
    }

    /// Parse a dotted path such as `My.Package`.
    ///
    /// Runs of non-word characters separate segments; each segment is parsed
    /// with [`Name::parse`].
    pub fn parse(s: &str) -> Self {
        let names = s
            .split(|c: char| !(c.is_alphanumeric() || c == '_' || c.is_whitespace()))
            .filter(|seg| !seg.is_empty())
            .map(Name::parse)
            .collect();
        Path(names)
    }

    pub fn names(&self) -> &[Name] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render with TitleCase names joined by `.`.
    pub fn to_dotted_string(&self) -> String {
        self.0
            .iter()
            .map(Name::to_title_case)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dotted_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
