use serde::Deserialize;

use super::candidates::TableKind;
use crate::talk::table::{is_consonant_value, is_vowel_glyph};

#[derive(Debug, Clone, Deserialize)]
pub struct PhonotacticsConfig {
    pub protected: Vec<String>,
    pub tables: TablesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TablesConfig {
    pub full: Vec<String>,
    pub start: Vec<String>,
    pub plain: Vec<String>,
    pub vowel: Vec<String>,
    pub end: Vec<String>,
}

impl TablesConfig {
    pub fn iter(&self) -> impl Iterator<Item = (TableKind, &[String])> {
        [
            (TableKind::Full, self.full.as_slice()),
            (TableKind::Start, self.start.as_slice()),
            (TableKind::Plain, self.plain.as_slice()),
            (TableKind::Vowel, self.vowel.as_slice()),
            (TableKind::End, self.end.as_slice()),
        ]
        .into_iter()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PhonotacticsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[tables] {0} is empty")]
    EmptyTable(TableKind),
    #[error("empty entry in {0} table")]
    EmptyEntry(TableKind),
    #[error("non-ASCII entry in {table} table: {entry}")]
    NonAscii { table: TableKind, entry: String },
    #[error("misplaced split marker in {table} table: {entry}")]
    MisplacedSplit { table: TableKind, entry: String },
    #[error("misplaced variant marker in {table} table: {entry}")]
    MisplacedVariant { table: TableKind, entry: String },
    #[error("unknown symbol {symbol:?} in {table} table: {entry}")]
    UnknownSymbol {
        table: TableKind,
        entry: String,
        symbol: char,
    },
    #[error("protected digraph must be two consonants: {0}")]
    BadProtected(String),
    #[error("phonotactics already initialized")]
    AlreadyInitialized,
}

/// Parse and validate phonotactics TOML.
pub fn parse_phonotactics_toml(toml_str: &str) -> Result<PhonotacticsConfig, PhonotacticsError> {
    let config: PhonotacticsConfig =
        toml::from_str(toml_str).map_err(|e| PhonotacticsError::Parse(e.to_string()))?;

    for (kind, entries) in config.tables.iter() {
        if entries.is_empty() {
            return Err(PhonotacticsError::EmptyTable(kind));
        }
        for entry in entries {
            validate_entry(kind, entry)?;
        }
    }

    for digraph in &config.protected {
        let mut chars = digraph.chars();
        let ok = matches!(
            (chars.next(), chars.next(), chars.next()),
            (Some(a), Some(b), None) if is_consonant_value(a) && is_consonant_value(b)
        );
        if !ok {
            return Err(PhonotacticsError::BadProtected(digraph.clone()));
        }
    }

    Ok(config)
}

fn validate_entry(table: TableKind, entry: &str) -> Result<(), PhonotacticsError> {
    if entry.is_empty() {
        return Err(PhonotacticsError::EmptyEntry(table));
    }
    if !entry.is_ascii() {
        return Err(PhonotacticsError::NonAscii {
            table,
            entry: entry.to_string(),
        });
    }

    let splits = entry.matches(':').count();
    if splits > 0 {
        let ok = table == TableKind::End
            && splits == 1
            && !entry.starts_with(':')
            && !entry.ends_with(':');
        if !ok {
            return Err(PhonotacticsError::MisplacedSplit {
                table,
                entry: entry.to_string(),
            });
        }
    }

    let unknown = |symbol| PhonotacticsError::UnknownSymbol {
        table,
        entry: entry.to_string(),
        symbol,
    };

    if table == TableKind::Vowel {
        let mut prev_glyph = false;
        for c in entry.chars() {
            match c {
                '$' if prev_glyph => prev_glyph = false,
                '$' => {
                    return Err(PhonotacticsError::MisplacedVariant {
                        table,
                        entry: entry.to_string(),
                    })
                }
                c if is_vowel_glyph(c) => prev_glyph = true,
                c => return Err(unknown(c)),
            }
        }
        return Ok(());
    }

    for c in entry.chars().filter(|&c| c != ':') {
        if c == '$' {
            return Err(PhonotacticsError::MisplacedVariant {
                table,
                entry: entry.to_string(),
            });
        }
        if !is_consonant_value(c) {
            return Err(unknown(c));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(end: &str) -> String {
        format!(
            r#"
protected = ["tx"]
[tables]
full = ["'l"]
start = ["pr"]
plain = ["p", "r", "k"]
vowel = ["a", "u$"]
end = [{end}]
"#
        )
    }

    #[test]
    fn parse_valid_toml() {
        let config = parse_phonotactics_toml(&tables(r#""k", "n:d""#)).unwrap();
        assert_eq!(config.tables.end, ["k", "n:d"]);
        assert_eq!(config.protected, ["tx"]);
    }

    #[test]
    fn parse_default_toml() {
        let config = parse_phonotactics_toml(super::super::table::DEFAULT_TOML).unwrap();
        assert_eq!(config.tables.plain.len(), 37);
        assert!(config.tables.vowel.len() >= 20);
        assert_eq!(config.protected, ["tx", "dj"]);
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_phonotactics_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, PhonotacticsError::Parse(_)));
    }

    #[test]
    fn error_empty_table() {
        let err = parse_phonotactics_toml(&tables("")).unwrap_err();
        assert!(matches!(err, PhonotacticsError::EmptyTable(TableKind::End)));
    }

    #[test]
    fn error_empty_entry() {
        let err = parse_phonotactics_toml(&tables(r#""""#)).unwrap_err();
        assert!(matches!(err, PhonotacticsError::EmptyEntry(TableKind::End)));
    }

    #[test]
    fn error_non_ascii() {
        let err = parse_phonotactics_toml(&tables(r#""ŋ""#)).unwrap_err();
        assert!(matches!(err, PhonotacticsError::NonAscii { .. }));
    }

    #[test]
    fn error_misplaced_split() {
        for bad in [r#"":t""#, r#""n:""#, r#""n:t:d""#] {
            let err = parse_phonotactics_toml(&tables(bad)).unwrap_err();
            assert!(
                matches!(err, PhonotacticsError::MisplacedSplit { .. }),
                "{bad}: {err}"
            );
        }
        let toml = tables(r#""k""#).replace(r#"start = ["pr"]"#, r#"start = ["p:r"]"#);
        let err = parse_phonotactics_toml(&toml).unwrap_err();
        assert!(matches!(
            err,
            PhonotacticsError::MisplacedSplit {
                table: TableKind::Start,
                ..
            }
        ));
    }

    #[test]
    fn error_misplaced_variant() {
        let err = parse_phonotactics_toml(&tables(r#""k$""#)).unwrap_err();
        assert!(matches!(err, PhonotacticsError::MisplacedVariant { .. }));
        let toml = tables(r#""k""#).replace(r#""u$""#, r#""$u""#);
        let err = parse_phonotactics_toml(&toml).unwrap_err();
        assert!(matches!(
            err,
            PhonotacticsError::MisplacedVariant {
                table: TableKind::Vowel,
                ..
            }
        ));
    }

    #[test]
    fn error_unknown_symbol() {
        let err = parse_phonotactics_toml(&tables(r#""kB""#)).unwrap_err();
        assert!(matches!(
            err,
            PhonotacticsError::UnknownSymbol { symbol: 'B', .. }
        ));
        let toml = tables(r#""k""#).replace(r#""a", "#, r#""ak", "#);
        let err = parse_phonotactics_toml(&toml).unwrap_err();
        assert!(matches!(
            err,
            PhonotacticsError::UnknownSymbol { symbol: 'k', .. }
        ));
    }

    #[test]
    fn error_bad_protected() {
        for bad in ["t", "txs", "ta"] {
            let toml = tables(r#""k""#).replace(r#"["tx"]"#, &format!("[\"{bad}\"]"));
            let err = parse_phonotactics_toml(&toml).unwrap_err();
            assert!(matches!(err, PhonotacticsError::BadProtected(_)), "{bad}");
        }
    }
}
