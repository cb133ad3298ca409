
use super::{parse, Syllable};

pub(super) fn split(text: &str) -> Vec<String> {
    parse(text)
        .unwrap_or_else(|e| panic!("{text:?} failed: {e}"))
        .into_iter()
        .map(|s| s.text)
        .collect()
}

pub(super) fn parsed(text: &str) -> Vec<Syllable> {
    parse(text).unwrap_or_else(|e| panic!("{text:?} failed: {e}"))
}
