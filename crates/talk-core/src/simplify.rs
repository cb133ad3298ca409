//! Reduced spellings of talk text.
//!
//! Each [`View`] is the text after applying one choice per axis (vowels,
//! consonants, tone, duration, aspiration). Its mass is the product of the
//! configured axis weights, so spellings closer to the input score higher.

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::mark::render;
use crate::settings::{settings, SimplifySettings};
use crate::talk::tokenize;

/// Reading of the `u$` pair, which is not treated as a vowel.
const RHOTIC: &str = "u$";
const VOWEL_MARKS: &[char] = &['$', '^', '&', '_', '+', '-', '!', '@'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VowelMode {
    None,
    One,
    Basic,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsonantMode {
    All,
    Simplified,
}

/// One choice per axis. `true` keeps the feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Simplification {
    pub vowel: VowelMode,
    pub consonant: ConsonantMode,
    pub tone: bool,
    pub duration: bool,
    pub aspiration: bool,
}

impl Simplification {
    /// Keep everything.
    pub const FULL: Simplification = Simplification {
        vowel: VowelMode::All,
        consonant: ConsonantMode::All,
        tone: true,
        duration: true,
        aspiration: true,
    };

    /// Every combination, vowel axis outermost.
    pub fn all() -> impl Iterator<Item = Simplification> {
        [VowelMode::None, VowelMode::One, VowelMode::Basic, VowelMode::All]
            .into_iter()
            .flat_map(|vowel| {
                [ConsonantMode::All, ConsonantMode::Simplified]
                    .into_iter()
                    .flat_map(move |consonant| {
                        [true, false].into_iter().flat_map(move |tone| {
                            [true, false].into_iter().flat_map(move |duration| {
                                [true, false].into_iter().map(move |aspiration| Simplification {
                                    vowel,
                                    consonant,
                                    tone,
                                    duration,
                                    aspiration,
                                })
                            })
                        })
                    })
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub text: String,
    /// Canonical rendering of `text`, empty when it does not tokenize.
    pub code: String,
    pub mass: f64,
    pub load: Simplification,
}

struct Draft {
    text: String,
    mass: f64,
}

impl Draft {
    fn keep(&mut self, weight: u32) {
        self.mass *= f64::from(weight);
    }

    fn reduce(&mut self, weight: u32, text: String) {
        if text != self.text {
            self.mass *= f64::from(weight);
            self.text = text;
        }
    }
}

/// Apply one simplification to `text` with the global weights.
pub fn simplify_case(text: &str, load: Simplification) -> View {
    simplify_case_with(text, load, &settings().simplify)
}

pub fn simplify_case_with(text: &str, load: Simplification, w: &SimplifySettings) -> View {
    let mut d = Draft {
        text: text.to_string(),
        mass: 1.0,
    };

    match load.consonant {
        ConsonantMode::Simplified => {
            let t = simplify_consonants(&d.text);
            d.reduce(w.consonant_simplified, t);
        }
        ConsonantMode::All => d.keep(w.consonant_all),
    }

    match load.vowel {
        VowelMode::None => {
            let t = per_segment(&d.text, drop_vowels);
            d.reduce(w.vowel_none, t);
        }
        VowelMode::One => {
            let t = per_segment(&d.text, one_vowel);
            d.reduce(w.vowel_one, t);
        }
        VowelMode::Basic => {
            let t = per_segment(&d.text, basic_vowels);
            d.reduce(w.vowel_basic, t);
        }
        VowelMode::All => d.keep(w.vowel_all),
    }

    if load.tone {
        d.keep(w.tone_yes);
    } else {
        let t = d.text.replace(|c: char| c == '+' || c == '-', "");
        d.reduce(w.tone_no, t);
    }

    if load.aspiration {
        d.keep(w.aspiration_yes);
    } else {
        let t = d.text.replace("h~", "");
        d.reduce(w.aspiration_no, t);
    }

    if load.duration {
        d.keep(w.duration_yes);
    } else {
        let t = d.text.replace('_', "");
        d.reduce(w.duration_no, t);
    }

    let code = tokenize(&d.text)
        .map(|marks| render(&marks))
        .unwrap_or_default();

    View {
        text: d.text,
        code,
        mass: d.mass,
        load,
    }
}

/// All distinct simplified spellings of `text`, best first.
///
/// Masses are normalized into (0, 1]; the best view always scores 1.
pub fn simplify(text: &str) -> Vec<View> {
    simplify_with(text, &settings().simplify)
}

pub fn simplify_with(text: &str, weights: &SimplifySettings) -> Vec<View> {
    let _span = debug_span!("simplify", text).entered();
    let text = strip_punctuation(text);

    // Best view per distinct text, in first-seen order.
    let mut best: Vec<View> = Vec::new();
    for load in Simplification::all() {
        let view = simplify_case_with(&text, load, weights);
        match best.iter_mut().find(|v| v.text == view.text) {
            Some(existing) if view.mass > existing.mass => *existing = view,
            Some(_) => {}
            None => best.push(view),
        }
    }

    let mut seen: Vec<&str> = Vec::new();
    let mut heads: Vec<View> = Vec::new();
    for view in &best {
        if !view.code.is_empty() && !seen.contains(&view.code.as_str()) {
            heads.push(view.clone());
        }
        seen.push(&view.code);
    }

    let min = heads.iter().map(|v| v.mass).fold(f64::INFINITY, f64::min) - 1.0;
    let max = heads.iter().map(|v| v.mass).fold(f64::NEG_INFINITY, f64::max);
    let scale = 10f64.powi(weights.precision as i32);
    for view in &mut heads {
        let normalized = (view.mass - min) / (max - min);
        view.mass = (normalized * scale).round() / scale;
    }
    heads.sort_by(|a, b| b.mass.total_cmp(&a.mass));

    debug!(views = heads.len());
    heads
}

/// Drop each `=` together with the character after it.
fn strip_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '=' {
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

fn is_vowel_letter(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Run `f` on the text between `u$` pairs and keep the pairs untouched.
fn per_segment(text: &str, f: fn(&str) -> String) -> String {
    text.split(RHOTIC).map(f).collect::<Vec<_>>().join(RHOTIC)
}

fn drop_vowels(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();
    while let Some(c) = chars.next() {
        if is_vowel_letter(c) {
            while chars.next_if(|m| VOWEL_MARKS.contains(m)).is_some() {}
        } else {
            out.push(c);
        }
    }
    out
}

/// Each vowel with its marks becomes `a`; a `$` right after a vowel goes too.
fn one_vowel(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for_each_vowel(segment, &mut out, |_| 'a');
    collapse_runs(&out, &['a'])
}

fn basic_vowels(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for_each_vowel(segment, &mut out, |v| v.to_ascii_lowercase());
    let mut text = collapse_runs(&out, &['a', 'e', 'i', 'o', 'u']);
    for (from, to) in [
        ("ai", "a"),
        ("au", "a"),
        ("ao", "o"),
        ("ae", "e"),
        ("io", "o"),
        ("ia", "a"),
        ("ou", "u"),
        ("oi", "i"),
    ] {
        text = text.replace(from, to);
    }
    text
}

/// Replace every vowel, an immediately following `$`, and any trailing
/// stress, nasal, duration, tone or tense marks with `f(vowel)`.
fn for_each_vowel(segment: &str, out: &mut String, f: impl Fn(char) -> char) {
    let mut chars = segment.chars().peekable();
    while let Some(c) = chars.next() {
        if is_vowel_letter(c) {
            chars.next_if_eq(&'$');
            while chars.next_if(|m| VOWEL_MARKS[1..].contains(m)).is_some() {}
            out.push(f(c));
        } else {
            out.push(c);
        }
    }
}

fn collapse_runs(text: &str, letters: &[char]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev = None;
    for c in text.chars() {
        if prev == Some(c) && letters.contains(&c) {
            continue;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Merge consonants into a smaller voiceless inventory and drop secondary
/// articulations.
fn simplify_consonants(text: &str) -> String {
    let mut text = text.replace('H', "h");
    for (from, to) in [
        ("h~", "h"),
        ("y~", "y"),
        ("G~", ""),
        ("Q~", ""),
        ("w~", "w"),
        ("t~", "t"),
        ("d~", "d"),
    ] {
        text = text.replace(from, to);
    }
    text = merge_with_marks(&text, 'b', &['?', '!', '@'], 'p');
    text = merge_with_marks(&text, 'p', &['?', '!', '*', '.', '@'], 'p');
    text = merge_with_marks(&text, 't', &['?', '!', '*', '.', '@'], 't');
    text = merge_with_marks(&text, 'd', &['?', '!', '*', '@'], 't');
    text = merge_with_marks(&text, 's', &['?', '!', '*', '@'], 's');
    text.chars()
        .map(|c| match c.to_ascii_lowercase() {
            'j' => 'x',
            'v' => 'f',
            'z' => 's',
            'd' => 't',
            'g' => 'k',
            _ => c,
        })
        .collect()
}

/// Replace `letter` (either case) and at most one following mark with `to`.
fn merge_with_marks(text: &str, letter: char, marks: &[char], to: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c.eq_ignore_ascii_case(&letter) {
            chars.next_if(|m| marks.contains(m));
            out.push(to);
        } else {
            out.push(c);
        }
    }
    out
}
