//! Talk text tokenizer.
//!
//! A byte trie over the symbol table turns ASCII talk text into feature
//! records, one longest match at a time.

pub mod table;
mod tokenize;
mod trie;

pub use tokenize::{tokenize, TokenizeError};
pub use trie::{SymbolTrie, TrieLookupResult};

/// Every key of the symbol table.
pub fn symbol_keys() -> Vec<String> {
    table::entries().into_iter().map(|(key, _)| key).collect()
}
