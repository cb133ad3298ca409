//! Syllable grouping for talk text.
//!
//! Records from the tokenizer are grouped into syllable-like units using
//! ordered candidate tables, then consonants are re-flowed across unit
//! boundaries.
//!
//! ```text
//! tokenize("kanda")  ->  k a n d a
//! group              ->  [k|a|n:d] [a]
//! resolve            ->  "kan" "da"
//! ```

mod candidates;
mod config;
mod group;
mod resolve;
mod table;

#[cfg(test)]
mod tests;

use serde::Serialize;
use tracing::debug_span;

use crate::mark::{render, Mark};
use crate::talk::{tokenize, TokenizeError};

pub use candidates::{Candidate, CandidateMatch, CandidateTable, TableKind};
pub use config::{parse_phonotactics_toml, PhonotacticsConfig, PhonotacticsError, TablesConfig};
pub use group::{group, Group, GroupingError, Span};
pub use resolve::resolve;
pub use table::{Phonotactics, DEFAULT_TOML};

#[derive(Debug, thiserror::Error)]
pub enum ProsodyError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    #[error(transparent)]
    Grouping(#[from] GroupingError),
}

/// One output syllable with its prosody annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Syllable {
    pub text: String,
    pub marks: Vec<Mark>,
    /// Some record carries stress.
    pub stressed: bool,
    /// Ends in a vowel.
    pub open: bool,
}

impl Syllable {
    pub fn new(marks: Vec<Mark>) -> Self {
        Self {
            text: render(&marks),
            stressed: marks.iter().any(|m| m.flags.stress),
            open: marks.last().is_some_and(Mark::is_vowel),
            marks,
        }
    }

    pub fn is_punctuation(&self) -> bool {
        matches!(self.marks.as_slice(), [m] if m.is_punctuation())
    }
}

/// Parse talk text into syllables using the global tables.
pub fn parse(text: &str) -> Result<Vec<Syllable>, ProsodyError> {
    parse_with(text, Phonotactics::global())
}

pub fn parse_with(text: &str, tables: &Phonotactics) -> Result<Vec<Syllable>, ProsodyError> {
    let _span = debug_span!("parse", text).entered();
    let marks = tokenize(text)?;
    let groups = group(&marks, tables)?;
    Ok(resolve(groups, tables))
}

/// Syllable texts only.
pub fn syllables(text: &str) -> Result<Vec<String>, ProsodyError> {
    Ok(parse(text)?.into_iter().map(|s| s.text).collect())
}
