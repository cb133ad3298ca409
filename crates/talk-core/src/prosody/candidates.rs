use std::fmt;

use serde::Serialize;

use crate::mark::{Category, Mark};

/// Where a span came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Full,
    Start,
    Plain,
    Vowel,
    End,
    Punctuation,
}

impl TableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TableKind::Full => "full",
            TableKind::Start => "start",
            TableKind::Plain => "plain",
            TableKind::Vowel => "vowel",
            TableKind::End => "end",
            TableKind::Punctuation => "punctuation",
        }
    }

    /// Record category this table matches against.
    pub fn category(self) -> Category {
        match self {
            TableKind::Vowel => Category::Vowel,
            TableKind::Punctuation => Category::Punctuation,
            _ => Category::Consonant,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Entry as written, including any split marker.
    pub pattern: String,
    /// Pattern without the split marker.
    pub literal: String,
    /// Byte offset into `literal` where the cluster may split.
    pub split: Option<usize>,
    sort_len: usize,
}

impl Candidate {
    pub fn new(pattern: &str) -> Self {
        let split = pattern.find(':');
        let literal: String = pattern.chars().filter(|&c| c != ':').collect();
        let sort_len = literal.chars().filter(|&c| c != '$').count();
        Self {
            pattern: pattern.to_string(),
            literal,
            split,
            sort_len,
        }
    }

    pub fn is_splittable(&self) -> bool {
        self.split.is_some()
    }

    /// Number of records starting at `start` whose values spell out the
    /// literal, if they do.
    fn match_len(&self, marks: &[Mark], start: usize, category: Category) -> Option<usize> {
        let mut rest = self.literal.as_str();
        let mut len = 0;
        for mark in marks.get(start..)? {
            if rest.is_empty() {
                break;
            }
            if mark.category != category {
                return None;
            }
            rest = rest.strip_prefix(mark.value.as_str())?;
            len += 1;
        }
        (rest.is_empty() && len > 0).then_some(len)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CandidateMatch<'a> {
    pub candidate: &'a Candidate,
    /// Records consumed.
    pub len: usize,
}

/// Candidates of one table, longest first. Equal lengths keep table order.
#[derive(Debug, Clone)]
pub struct CandidateTable {
    kind: TableKind,
    entries: Vec<Candidate>,
}

impl CandidateTable {
    pub fn new<S: AsRef<str>>(kind: TableKind, patterns: impl IntoIterator<Item = S>) -> Self {
        let mut entries: Vec<Candidate> = patterns
            .into_iter()
            .map(|p| Candidate::new(p.as_ref()))
            .collect();
        entries.sort_by(|a, b| b.sort_len.cmp(&a.sort_len));
        Self { kind, entries }
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn entries(&self) -> &[Candidate] {
        &self.entries
    }

    /// All candidates matching at `start`, in priority order.
    pub fn matches<'a>(
        &'a self,
        marks: &'a [Mark],
        start: usize,
    ) -> impl Iterator<Item = CandidateMatch<'a>> + 'a {
        let category = self.kind.category();
        self.entries.iter().filter_map(move |candidate| {
            candidate
                .match_len(marks, start, category)
                .map(|len| CandidateMatch { candidate, len })
        })
    }

    pub fn first_match<'a>(&'a self, marks: &'a [Mark], start: usize) -> Option<CandidateMatch<'a>> {
        self.matches(marks, start).next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::talk::tokenize;

    #[test]
    fn test_candidate_split() {
        let c = Candidate::new("s:tr");
        assert_eq!(c.literal, "str");
        assert_eq!(c.split, Some(1));
        assert!(c.is_splittable());
        assert!(!Candidate::new("nst").is_splittable());
    }

    #[test]
    fn test_sort_by_length_then_table_order() {
        let table = CandidateTable::new(TableKind::End, ["t", "n:d", "st", "nst", "s"]);
        let order: Vec<&str> = table.entries().iter().map(|c| c.pattern.as_str()).collect();
        assert_eq!(order, ["nst", "n:d", "st", "t", "s"]);
    }

    #[test]
    fn test_variant_marker_ignored_for_length() {
        let table = CandidateTable::new(TableKind::Vowel, ["a", "u$", "ou"]);
        let order: Vec<&str> = table.entries().iter().map(|c| c.pattern.as_str()).collect();
        assert_eq!(order, ["ou", "a", "u$"]);
    }

    #[test]
    fn test_matches_in_priority_order() {
        let marks = tokenize("nda").unwrap();
        let table = CandidateTable::new(TableKind::End, ["n", "n:dj", "n:d", "nd"]);
        let found: Vec<(&str, usize)> = table
            .matches(&marks, 0)
            .map(|m| (m.candidate.pattern.as_str(), m.len))
            .collect();
        assert_eq!(found, [("n:d", 2), ("nd", 2), ("n", 1)]);
    }

    #[test]
    fn test_category_must_match() {
        let marks = tokenize("ka").unwrap();
        let vowels = CandidateTable::new(TableKind::Vowel, ["a"]);
        assert!(vowels.first_match(&marks, 0).is_none());
        assert_eq!(vowels.first_match(&marks, 1).unwrap().len, 1);
        let plain = CandidateTable::new(TableKind::Plain, ["k"]);
        assert!(plain.first_match(&marks, 1).is_none());
    }

    #[test]
    fn test_variant_value_matches_exactly() {
        let marks = tokenize("ou$").unwrap();
        let table = CandidateTable::new(TableKind::Vowel, ["ou", "ou$", "o"]);
        let m = table.first_match(&marks, 0).unwrap();
        assert_eq!(m.candidate.pattern, "ou$");
        assert_eq!(m.len, 2);
    }

    #[test]
    fn test_out_of_range_start() {
        let marks = tokenize("k").unwrap();
        let table = CandidateTable::new(TableKind::Plain, ["k"]);
        assert!(table.first_match(&marks, 1).is_none());
        assert!(table.first_match(&marks, 5).is_none());
    }
}
