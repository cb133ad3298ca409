//! Tokenizer, syllable grouper and simplifier for the "talk" ASCII phonetic
//! notation.
//!
//! ```
//! let syllables = talk_core::prosody::syllables("kanda").unwrap();
//! assert_eq!(syllables, ["kan", "da"]);
//! ```

pub mod mark;
pub mod prosody;
pub mod settings;
pub mod simplify;
pub mod talk;
pub mod trace_init;

pub use mark::{render, serialize, Mark};
pub use prosody::{parse, syllables, ProsodyError, Syllable};
pub use talk::{tokenize, TokenizeError};
