//! Feature records for the talk notation.
//!
//! A `Mark` is the atomic unit produced by the tokenizer: a category, a base
//! value, articulatory flags and an optional tone. `serialize` renders a mark
//! back to talk text with its flags in a fixed order.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Vowel,
    Consonant,
    Punctuation,
}

/// Consonant shape class. Flow consonants (nasals, liquids, glides) cluster
/// freely; wall consonants (stops, fricatives, glottals) do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Form {
    Wall,
    Flow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    ExtraHigh,
    High,
    Low,
    ExtraLow,
    Rising,
    Rising2,
    Falling,
    Falling2,
    RisingFalling,
    FallingRising,
}

impl Tone {
    pub const ALL: [Tone; 10] = [
        Tone::ExtraHigh,
        Tone::High,
        Tone::Low,
        Tone::ExtraLow,
        Tone::Rising,
        Tone::Rising2,
        Tone::Falling,
        Tone::Falling2,
        Tone::RisingFalling,
        Tone::FallingRising,
    ];

    /// The talk marker for this tone.
    pub fn marker(self) -> &'static str {
        match self {
            Tone::ExtraHigh => "++",
            Tone::High => "+",
            Tone::Low => "-",
            Tone::ExtraLow => "--",
            Tone::Rising => "/",
            Tone::Rising2 => "//",
            Tone::Falling => "\\",
            Tone::Falling2 => "\\\\",
            Tone::RisingFalling => "/\\",
            Tone::FallingRising => "\\/",
        }
    }
}

macro_rules! flags {
    ($($name:ident),* $(,)?) => {
        /// Articulatory flags carried by a mark. All default to false.
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
        pub struct Flags {
            $(pub $name: bool,)*
        }

        impl Flags {
            /// Set every flag that is set in `other`.
            pub fn merge(&mut self, other: &Flags) {
                $(self.$name |= other.$name;)*
            }

            pub fn is_empty(&self) -> bool {
                !($(self.$name)||*)
            }
        }
    };
}

flags!(
    click,
    ejection,
    implosion,
    nasalization,
    dentalization,
    pharyngealization,
    velarization,
    palatalization,
    labialization,
    aspiration,
    elongation,
    truncation,
    stress,
    tense,
    stop,
    voicelessness,
);

/// Flags and tone carried by a modifier-only token (e.g. `h~`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifier {
    pub flags: Flags,
    pub tone: Option<Tone>,
}

impl Modifier {
    pub fn flags(flags: Flags) -> Self {
        Self { flags, tone: None }
    }

    pub fn tone(tone: Tone) -> Self {
        Self {
            flags: Flags::default(),
            tone: Some(tone),
        }
    }
}

/// What a symbol-table key produces when matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// Emit a fresh record.
    NewRecord(Mark),
    /// Merge into the previously emitted record.
    MergeFlags(Modifier),
}

/// A parsed feature record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Mark {
    pub category: Category,
    pub value: String,
    pub flags: Flags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<Form>,
}

impl Mark {
    pub fn vowel(value: impl Into<String>) -> Self {
        Self {
            category: Category::Vowel,
            value: value.into(),
            flags: Flags::default(),
            tone: None,
            form: None,
        }
    }

    pub fn consonant(value: impl Into<String>, form: Form) -> Self {
        Self {
            category: Category::Consonant,
            value: value.into(),
            flags: Flags::default(),
            tone: None,
            form: Some(form),
        }
    }

    pub fn punctuation(value: impl Into<String>) -> Self {
        Self {
            category: Category::Punctuation,
            value: value.into(),
            flags: Flags::default(),
            tone: None,
            form: None,
        }
    }

    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags.merge(&flags);
        self
    }

    pub fn with_tone(mut self, tone: Option<Tone>) -> Self {
        if tone.is_some() {
            self.tone = tone;
        }
        self
    }

    /// Apply a modifier: flags accumulate, a tone replaces the current one.
    pub fn apply(&mut self, modifier: &Modifier) {
        self.flags.merge(&modifier.flags);
        if modifier.tone.is_some() {
            self.tone = modifier.tone;
        }
    }

    pub fn is_vowel(&self) -> bool {
        self.category == Category::Vowel
    }

    pub fn is_consonant(&self) -> bool {
        self.category == Category::Consonant
    }

    pub fn is_punctuation(&self) -> bool {
        self.category == Category::Punctuation
    }
}

/// Render a mark back to talk text.
///
/// The marker order is fixed: value, click, ejection, implosion, nasalization,
/// tone, elongation, truncation, stress, dentalization, pharyngealization,
/// velarization, palatalization, labialization, aspiration, stop, tense.
/// Voicelessness has no marker.
pub fn serialize(mark: &Mark) -> String {
    let mut text = String::with_capacity(mark.value.len() + 4);
    if mark.is_punctuation() && mark.value != " " {
        text.push('=');
    }
    text.push_str(&mark.value);

    let f = &mark.flags;
    if f.click {
        text.push('*');
    }
    if f.ejection {
        text.push('!');
    }
    if f.implosion {
        text.push('?');
    }
    if f.nasalization {
        text.push('&');
    }
    if let Some(tone) = mark.tone {
        text.push_str(tone.marker());
    }
    if f.elongation {
        text.push('_');
    }
    if f.truncation {
        text.push('!');
    }
    if f.stress {
        text.push('^');
    }
    if f.dentalization {
        text.push('~');
    }
    if f.pharyngealization {
        text.push_str("Q~");
    }
    if f.velarization {
        text.push_str("G~");
    }
    if f.palatalization {
        text.push_str("y~");
    }
    if f.labialization {
        text.push_str("w~");
    }
    if f.aspiration {
        text.push_str("h~");
    }
    if f.stop {
        text.push('.');
    }
    if f.tense {
        text.push('@');
    }
    text
}

/// Serialize a run of marks and concatenate the result.
pub fn render(marks: &[Mark]) -> String {
    marks.iter().map(serialize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value() {
        assert_eq!(serialize(&Mark::vowel("a")), "a");
        assert_eq!(serialize(&Mark::consonant("t", Form::Wall)), "t");
        assert_eq!(serialize(&Mark::vowel("u$")), "u$");
    }

    #[test]
    fn test_punctuation_keeps_prefix() {
        assert_eq!(serialize(&Mark::punctuation(".")), "=.");
        assert_eq!(serialize(&Mark::punctuation(" ")), " ");
    }

    #[test]
    fn test_fixed_marker_order() {
        let flags = Flags {
            tense: true,
            stress: true,
            nasalization: true,
            elongation: true,
            aspiration: true,
            ..Flags::default()
        };
        let mark = Mark::vowel("a")
            .with_flags(flags)
            .with_tone(Some(Tone::FallingRising));
        assert_eq!(serialize(&mark), "a&\\/_^h~@");
    }

    #[test]
    fn test_consonant_secondary_articulations() {
        let flags = Flags {
            ejection: true,
            dentalization: true,
            pharyngealization: true,
            labialization: true,
            stop: true,
            ..Flags::default()
        };
        let mark = Mark::consonant("t", Form::Wall).with_flags(flags);
        assert_eq!(serialize(&mark), "t!~Q~w~.");
    }

    #[test]
    fn test_voicelessness_is_silent() {
        let flags = Flags {
            voicelessness: true,
            ..Flags::default()
        };
        let mark = Mark::consonant("m", Form::Flow).with_flags(flags);
        assert_eq!(serialize(&mark), "m");
        assert!(mark.flags.voicelessness);
    }

    #[test]
    fn test_apply_overwrites_tone() {
        let mut mark = Mark::vowel("e").with_tone(Some(Tone::High));
        mark.apply(&Modifier::tone(Tone::Low));
        assert_eq!(mark.tone, Some(Tone::Low));
        mark.apply(&Modifier::flags(Flags {
            stress: true,
            ..Flags::default()
        }));
        assert_eq!(mark.tone, Some(Tone::Low));
        assert!(mark.flags.stress);
    }

    #[test]
    fn test_tone_markers_distinct() {
        let markers: std::collections::HashSet<&str> = Tone::ALL.iter().map(|t| t.marker()).collect();
        assert_eq!(markers.len(), Tone::ALL.len());
    }

    #[test]
    fn test_render_concatenates() {
        let marks = vec![
            Mark::consonant("k", Form::Wall),
            Mark::vowel("a"),
            Mark::punctuation(" "),
        ];
        assert_eq!(render(&marks), "ka ");
    }

    #[test]
    fn test_flags_empty() {
        assert!(Flags::default().is_empty());
        let f = Flags {
            click: true,
            ..Flags::default()
        };
        assert!(!f.is_empty());
    }
}
