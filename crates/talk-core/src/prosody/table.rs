use std::sync::OnceLock;

use tracing::debug;

use super::candidates::{CandidateTable, TableKind};
use super::config::{parse_phonotactics_toml, PhonotacticsConfig, PhonotacticsError};
use crate::mark::Mark;

pub const DEFAULT_TOML: &str = include_str!("default_phonotactics.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();
static INSTANCE: OnceLock<Phonotactics> = OnceLock::new();

/// Candidate tables and protected digraphs that drive syllable grouping.
#[derive(Debug, Clone)]
pub struct Phonotactics {
    pub full: CandidateTable,
    pub start: CandidateTable,
    pub plain: CandidateTable,
    pub vowel: CandidateTable,
    pub end: CandidateTable,
    protected: Vec<String>,
}

impl Phonotactics {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), PhonotacticsError> {
        // Validate eagerly
        parse_phonotactics_toml(&toml_content)?;
        if INSTANCE.get().is_some() {
            return Err(PhonotacticsError::AlreadyInitialized);
        }
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| PhonotacticsError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static Phonotactics {
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let tables = Phonotactics::from_toml(toml_str).expect("phonotactics TOML must be valid");
            debug!(
                start = tables.start.entries().len(),
                end = tables.end.entries().len(),
                "phonotactics loaded"
            );
            tables
        })
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, PhonotacticsError> {
        parse_phonotactics_toml(toml_str).map(Self::from_config)
    }

    pub fn from_config(config: PhonotacticsConfig) -> Self {
        let t = &config.tables;
        Self {
            full: CandidateTable::new(TableKind::Full, &t.full),
            start: CandidateTable::new(TableKind::Start, &t.start),
            plain: CandidateTable::new(TableKind::Plain, &t.plain),
            vowel: CandidateTable::new(TableKind::Vowel, &t.vowel),
            end: CandidateTable::new(TableKind::End, &t.end),
            protected: config.protected,
        }
    }

    /// Whether `a` followed by `b` is a protected digraph.
    pub fn is_protected(&self, a: &Mark, b: &Mark) -> bool {
        self.protected.iter().any(|digraph| {
            digraph
                .strip_prefix(a.value.as_str())
                .is_some_and(|rest| rest == b.value)
        })
    }
}
