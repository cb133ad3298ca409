use crate::mark::{Flags, Form, Mark, Modifier, Symbol, Tone};

/// Consonant values. Each is a single ASCII character.
pub const CONSONANTS: &[char] = &[
    'm', 'n', 'N', 'q', 'g', 'd', 'b', 'p', 't', 'T', 'k', 'K', 'h', 'H', 's', 'S', 'f', 'F', 'V',
    'v', 'z', 'Z', 'j', 'J', 'x', 'X', 'c', 'C', 'y', 'W', 'w', 'Q', '\'', 'l', 'L', 'r', 'R',
];

/// Nasals, liquids and glides.
const FLOW: &[char] = &['m', 'n', 'N', 'q', 'l', 'L', 'r', 'R', 'y', 'w', 'W'];

const EJECTIVES: &[char] = &[
    'n', 'q', 'g', 'd', 'b', 'p', 't', 'k', 's', 'f', 'v', 'z', 'j', 'x', 'c', 'C', 'y', 'w', 'Q',
    'l', 'r',
];

const CLICKS: &[char] = &['l', 't', 'd', 'k', 'p'];

pub const VOWEL_GLYPHS: &[char] = &['I', 'E', 'A', 'O', 'U', 'i', 'e', 'a', 'o', 'u'];

const PUNCTUATION: &[char] = &['.', '@', '?', '!', '+', '-'];

pub fn is_consonant_value(c: char) -> bool {
    CONSONANTS.contains(&c)
}

pub fn is_vowel_glyph(c: char) -> bool {
    VOWEL_GLYPHS.contains(&c)
}

pub fn form_of(c: char) -> Form {
    if FLOW.contains(&c) {
        Form::Flow
    } else {
        Form::Wall
    }
}

macro_rules! flag {
    ($name:ident) => {
        Flags {
            $name: true,
            ..Flags::default()
        }
    };
}

fn consonant(c: char) -> Mark {
    Mark::consonant(c.to_string(), form_of(c))
}

/// Every key of the symbol table with the symbol it produces.
///
/// Keys are unique; the trie resolves overlaps by length alone.
pub fn entries() -> Vec<(String, Symbol)> {
    let mut out = Vec::with_capacity(5400);

    for &c in CONSONANTS {
        out.push((c.to_string(), Symbol::NewRecord(consonant(c))));
    }
    for &c in EJECTIVES {
        let mark = consonant(c).with_flags(flag!(ejection));
        out.push((format!("{c}!"), Symbol::NewRecord(mark)));
    }
    for &c in CLICKS {
        let mark = consonant(c).with_flags(flag!(click));
        out.push((format!("{c}*"), Symbol::NewRecord(mark)));
    }

    let modifiers: [(&str, Flags); 15] = [
        ("h!", flag!(voicelessness)),
        ("h~", flag!(aspiration)),
        ("w~", flag!(labialization)),
        ("y~", flag!(palatalization)),
        ("G~", flag!(velarization)),
        ("Q~", flag!(pharyngealization)),
        ("~", flag!(dentalization)),
        ("*", flag!(click)),
        ("?", flag!(implosion)),
        ("&", flag!(nasalization)),
        ("_", flag!(elongation)),
        ("!", flag!(truncation)),
        ("^", flag!(stress)),
        (".", flag!(stop)),
        ("@", flag!(tense)),
    ];
    for (key, flags) in modifiers {
        out.push((key.to_string(), Symbol::MergeFlags(Modifier::flags(flags))));
    }
    for tone in Tone::ALL {
        out.push((
            tone.marker().to_string(),
            Symbol::MergeFlags(Modifier::tone(tone)),
        ));
    }

    for &p in PUNCTUATION {
        out.push((
            format!("={p}"),
            Symbol::NewRecord(Mark::punctuation(p.to_string())),
        ));
    }
    out.push((" ".to_string(), Symbol::NewRecord(Mark::punctuation(" "))));

    push_vowels(&mut out);
    out
}

/// Glyph × variant × nasal × syllabic × tone × duration × accent, keyed in
/// that order.
fn push_vowels(out: &mut Vec<(String, Symbol)>) {
    let tones: Vec<Option<Tone>> = std::iter::once(None)
        .chain(Tone::ALL.into_iter().map(Some))
        .collect();
    let durations: [(&str, Flags); 3] = [
        ("", Flags::default()),
        ("_", flag!(elongation)),
        ("!", flag!(truncation)),
    ];

    for &glyph in VOWEL_GLYPHS {
        for variant in ["", "$"] {
            let value = format!("{glyph}{variant}");
            for nasal in [false, true] {
                for syllabic in [false, true] {
                    for &tone in &tones {
                        for (duration, duration_flags) in &durations {
                            for accent in [false, true] {
                                let mut key = value.clone();
                                let mut flags = *duration_flags;
                                if nasal {
                                    key.push('&');
                                    flags.nasalization = true;
                                }
                                if syllabic {
                                    key.push('@');
                                    flags.tense = true;
                                }
                                if let Some(t) = tone {
                                    key.push_str(t.marker());
                                }
                                key.push_str(duration);
                                if accent {
                                    key.push('^');
                                    flags.stress = true;
                                }
                                let mark = Mark::vowel(value.clone())
                                    .with_flags(flags)
                                    .with_tone(tone);
                                out.push((key, Symbol::NewRecord(mark)));
                            }
                        }
                    }
                }
            }
        }
    }
}
