use serde::Serialize;
use tracing::{debug, debug_span};

use super::candidates::{CandidateMatch, TableKind};
use super::table::Phonotactics;
use crate::mark::{render, Mark};

/// A run of records matched by one candidate entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub kind: TableKind,
    /// Candidate entry as written, split marker included.
    pub pattern: String,
    pub marks: Vec<Mark>,
}

impl Span {
    fn from_match(kind: TableKind, marks: &[Mark], start: usize, m: CandidateMatch<'_>) -> Self {
        Self {
            kind,
            pattern: m.candidate.pattern.clone(),
            marks: marks[start..start + m.len].to_vec(),
        }
    }

    /// The coda part and onset part of a split end cluster.
    pub fn split_parts(&self) -> Option<(&str, &str)> {
        if self.kind != TableKind::End {
            return None;
        }
        self.pattern.split_once(':')
    }

    pub fn render(&self) -> String {
        render(&self.marks)
    }
}

/// One syllable-like unit before boundary re-flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub spans: Vec<Span>,
}

impl Group {
    pub fn is_punctuation(&self) -> bool {
        self.spans
            .first()
            .is_some_and(|s| s.kind == TableKind::Punctuation)
    }

    pub fn marks(&self) -> impl Iterator<Item = &Mark> {
        self.spans.iter().flat_map(|s| s.marks.iter())
    }

}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no candidate matches at record {index}: {remainder:?}")]
pub struct GroupingError {
    pub index: usize,
    pub remainder: String,
}

/// Group records into syllable-like units.
///
/// Tables are consulted in a fixed order at each position: full, start,
/// plain, vowel, end, then plain again as a final coda.
pub fn group(marks: &[Mark], tables: &Phonotactics) -> Result<Vec<Group>, GroupingError> {
    let _span = debug_span!("group", records = marks.len()).entered();
    let mut groups = Vec::new();
    let mut i = 0;

    while i < marks.len() {
        if marks[i].is_punctuation() {
            groups.push(Group {
                spans: vec![Span {
                    kind: TableKind::Punctuation,
                    pattern: marks[i].value.clone(),
                    marks: vec![marks[i].clone()],
                }],
            });
            i += 1;
            continue;
        }

        if let Some(m) = tables.full.first_match(marks, i) {
            groups.push(Group {
                spans: vec![Span::from_match(TableKind::Full, marks, i, m)],
            });
            i += m.len;
            continue;
        }

        let start = i;
        let mut spans = Vec::new();

        if let Some(m) = tables.start.first_match(marks, i) {
            spans.push(Span::from_match(TableKind::Start, marks, i, m));
            i += m.len;
        }

        if let Some(m) = tables.plain.first_match(marks, i) {
            // A consonant after an onset cluster opens a new unit.
            if !spans.is_empty() {
                groups.push(Group {
                    spans: std::mem::take(&mut spans),
                });
            }
            spans.push(Span::from_match(TableKind::Plain, marks, i, m));
            i += m.len;
        }

        if let Some(m) = tables.vowel.first_match(marks, i) {
            spans.push(Span::from_match(TableKind::Vowel, marks, i, m));
            i += m.len;
        }

        let coda = tables
            .end
            .matches(marks, i)
            .find(|m| m.candidate.is_splittable() || closes_syllable(marks, i + m.len, tables));
        match coda {
            Some(m) => {
                spans.push(Span::from_match(TableKind::End, marks, i, m));
                i += m.len;
            }
            None if i + 1 == marks.len() => {
                if let Some(m) = tables.plain.first_match(marks, i) {
                    spans.push(Span::from_match(TableKind::Plain, marks, i, m));
                    i += m.len;
                }
            }
            None => {}
        }

        if i == start {
            return Err(GroupingError {
                index: i,
                remainder: render(&marks[i..]),
            });
        }
        if !spans.is_empty() {
            groups.push(Group { spans });
        }
    }

    debug!(groups = groups.len());
    Ok(groups)
}

/// A non-splittable coda ending at `end` must not take an onset away from a
/// following vowel, nor cut a protected digraph in half.
fn closes_syllable(marks: &[Mark], end: usize, tables: &Phonotactics) -> bool {
    let Some(next) = marks.get(end) else {
        return true;
    };
    if next.is_vowel() {
        return false;
    }
    !tables.is_protected(&marks[end - 1], next)
}
