use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use super::table;
use crate::mark::Symbol;

#[derive(Debug, PartialEq)]
pub enum TrieLookupResult<'a> {
    None,
    Prefix,
    Exact(&'a Symbol),
    ExactAndPrefix(&'a Symbol),
}

struct Node {
    children: HashMap<u8, Node>,
    symbol: Option<Symbol>,
}

impl Node {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            symbol: None,
        }
    }
}

/// Byte trie over the talk symbol table.
pub struct SymbolTrie {
    root: Node,
    len: usize,
}

impl SymbolTrie {
    /// Get or initialize the global singleton.
    pub fn global() -> &'static SymbolTrie {
        static INSTANCE: OnceLock<SymbolTrie> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let trie = SymbolTrie::build(table::entries());
            debug!(keys = trie.len, "symbol trie built");
            trie
        })
    }

    pub fn build(entries: impl IntoIterator<Item = (String, Symbol)>) -> Self {
        let mut trie = SymbolTrie {
            root: Node::new(),
            len: 0,
        };
        for (key, symbol) in entries {
            trie.insert(&key, symbol);
        }
        trie
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn lookup(&self, key: &str) -> TrieLookupResult<'_> {
        let mut node = &self.root;
        for &b in key.as_bytes() {
            match node.children.get(&b) {
                Some(child) => node = child,
                None => return TrieLookupResult::None,
            }
        }
        let has_children = !node.children.is_empty();
        match &node.symbol {
            Some(symbol) => {
                if has_children {
                    TrieLookupResult::ExactAndPrefix(symbol)
                } else {
                    TrieLookupResult::Exact(symbol)
                }
            }
            None => {
                if has_children {
                    TrieLookupResult::Prefix
                } else {
                    TrieLookupResult::None
                }
            }
        }
    }

    /// Longest key that is a prefix of `text`, with its byte length.
    pub fn longest_match(&self, text: &str) -> Option<(usize, &Symbol)> {
        let mut node = &self.root;
        let mut best = None;
        for (i, b) in text.bytes().enumerate() {
            match node.children.get(&b) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(symbol) = &node.symbol {
                best = Some((i + 1, symbol));
            }
        }
        best
    }

    fn insert(&mut self, key: &str, symbol: Symbol) {
        let mut node = &mut self.root;
        for &b in key.as_bytes() {
            node = node.children.entry(b).or_insert_with(Node::new);
        }
        if node.symbol.replace(symbol).is_none() {
            self.len += 1;
        }
    }
}
