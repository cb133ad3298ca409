use tracing::{debug, debug_span};

use super::trie::SymbolTrie;
use crate::mark::{Mark, Symbol};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    #[error("no symbol matches at byte {position}: {remainder:?}")]
    Unmatched { position: usize, remainder: String },
    #[error("modifier {token:?} at byte {position} has no preceding record")]
    OrphanModifier { position: usize, token: String },
}

/// Tokenize talk text into feature records.
///
/// At each position the longest matching key wins. Record keys start a new
/// mark; modifier keys merge into the last one.
pub fn tokenize(text: &str) -> Result<Vec<Mark>, TokenizeError> {
    let _span = debug_span!("tokenize", len = text.len()).entered();
    let trie = SymbolTrie::global();
    let mut marks: Vec<Mark> = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        let (len, symbol) = trie
            .longest_match(rest)
            .ok_or_else(|| TokenizeError::Unmatched {
                position: pos,
                remainder: rest.to_string(),
            })?;
        match symbol {
            Symbol::NewRecord(mark) => marks.push(mark.clone()),
            Symbol::MergeFlags(modifier) => match marks.last_mut() {
                Some(last) => last.apply(modifier),
                None => {
                    return Err(TokenizeError::OrphanModifier {
                        position: pos,
                        token: rest[..len].to_string(),
                    })
                }
            },
        }
        pos += len;
    }

    debug!(marks = marks.len());
    Ok(marks)
}
