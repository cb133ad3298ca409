use tracing::{debug, debug_span};

use super::group::Group;
use super::table::Phonotactics;
use super::Syllable;
use crate::mark::Mark;

/// Re-flow consonants across group boundaries and produce syllables.
///
/// Split end clusters first donate their onset half to the following group.
/// Then a single sweep folds vowel-less units into their predecessor (or, at
/// the start of a word, into their successor) and moves a trailing consonant
/// pair onto a following vowel-initial unit.
pub fn resolve(mut groups: Vec<Group>, tables: &Phonotactics) -> Vec<Syllable> {
    let _span = debug_span!("resolve", groups = groups.len()).entered();
    donate_splits(&mut groups);

    let units = groups
        .into_iter()
        .map(|g| Unit {
            punctuation: g.is_punctuation(),
            marks: g.spans.into_iter().flat_map(|s| s.marks).collect(),
        })
        .collect();
    let units = reflow(units, tables);

    debug!(syllables = units.len());
    units.into_iter().map(|u| Syllable::new(u.marks)).collect()
}

fn donate_splits(groups: &mut [Group]) {
    for idx in 1..groups.len() {
        let (head, tail) = groups.split_at_mut(idx);
        let (prev, cur) = (&mut head[idx - 1], &mut tail[0]);
        if prev.is_punctuation() || cur.is_punctuation() {
            continue;
        }
        let Some(last) = prev.spans.last_mut() else {
            continue;
        };
        let Some((coda, _)) = last.split_parts() else {
            continue;
        };

        let mut acc = String::new();
        let keep = last
            .marks
            .iter()
            .take_while(|mark| {
                if acc == coda {
                    return false;
                }
                acc.push_str(&mark.value);
                true
            })
            .count();

        let moved = last.marks.split_off(keep);
        if moved.is_empty() {
            continue;
        }
        if let Some(first) = cur.spans.first_mut() {
            first.marks.splice(0..0, moved);
        }
    }
}

#[derive(Debug)]
struct Unit {
    marks: Vec<Mark>,
    punctuation: bool,
}

fn reflow(units: Vec<Unit>, tables: &Phonotactics) -> Vec<Unit> {
    let mut out: Vec<Unit> = Vec::with_capacity(units.len());
    // Vowel-less unit at the start of a word, waiting for the next unit.
    let mut lead: Option<Unit> = None;

    for mut unit in units {
        if unit.punctuation {
            out.extend(lead.take());
            out.push(unit);
            continue;
        }
        if let Some(mut l) = lead.take() {
            l.marks.append(&mut unit.marks);
            unit.marks = l.marks;
        }

        let has_vowel = unit.marks.iter().any(Mark::is_vowel);
        let prev = out.len().checked_sub(1).filter(|&p| !out[p].punctuation);
        let Some(prev) = prev else {
            if has_vowel {
                out.push(unit);
            } else {
                lead = Some(unit);
            }
            continue;
        };

        if !has_vowel {
            out[prev].marks.extend(unit.marks);
            continue;
        }

        let vowel_initial = unit.marks.first().is_some_and(Mark::is_vowel);
        if vowel_initial && ends_in_free_pair(&out[prev].marks, tables) {
            let at = out[prev].marks.len() - 2;
            let mut marks = out[prev].marks.split_off(at);
            marks.extend(unit.marks);
            if out[prev].marks.is_empty() {
                out.pop();
            }
            out.push(Unit {
                marks,
                punctuation: false,
            });
            continue;
        }

        out.push(unit);
    }
    out.extend(lead);
    out
}

/// Last two records are consonants and not a protected digraph.
fn ends_in_free_pair(marks: &[Mark], tables: &Phonotactics) -> bool {
    match marks {
        [.., a, b] => a.is_consonant() && b.is_consonant() && !tables.is_protected(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prosody::candidates::TableKind;
    use crate::prosody::group::Span;
    use crate::talk::tokenize;

    fn span(kind: TableKind, pattern: &str, text: &str) -> Span {
        Span {
            kind,
            pattern: pattern.to_string(),
            marks: tokenize(text).unwrap(),
        }
    }

    fn texts(syllables: &[Syllable]) -> Vec<&str> {
        syllables.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_split_donation() {
        use TableKind::*;
        let groups = vec![
            Group {
                spans: vec![span(Plain, "k", "k"), span(Vowel, "a", "a"), span(End, "s:tr", "str")],
            },
            Group {
                spans: vec![span(Vowel, "a", "a")],
            },
        ];
        let out = resolve(groups, Phonotactics::global());
        assert_eq!(texts(&out), ["kas", "tra"]);
    }

    #[test]
    fn test_pair_moves_to_vowel_initial_unit() {
        use TableKind::*;
        let groups = vec![
            Group {
                spans: vec![span(Plain, "k", "k"), span(Vowel, "a", "a"), span(End, "st", "st")],
            },
            Group {
                spans: vec![span(Vowel, "a", "a")],
            },
        ];
        let out = resolve(groups, Phonotactics::global());
        assert_eq!(texts(&out), ["ka", "sta"]);
    }

    #[test]
    fn test_protected_pair_stays() {
        use TableKind::*;
        let groups = vec![
            Group {
                spans: vec![span(Plain, "k", "k"), span(Vowel, "a", "a"), span(End, "tx", "tx")],
            },
            Group {
                spans: vec![span(Vowel, "a", "a")],
            },
        ];
        let out = resolve(groups, Phonotactics::global());
        assert_eq!(texts(&out), ["katx", "a"]);
    }

    #[test]
    fn test_vowelless_unit_merges_back() {
        use TableKind::*;
        let groups = vec![
            Group {
                spans: vec![span(Plain, "k", "k"), span(Vowel, "a", "a")],
            },
            Group {
                spans: vec![span(Start, "st", "st")],
            },
        ];
        let out = resolve(groups, Phonotactics::global());
        assert_eq!(texts(&out), ["kast"]);
    }

    #[test]
    fn test_leading_vowelless_unit_joins_next() {
        use TableKind::*;
        let groups = vec![
            Group {
                spans: vec![span(Full, "'l", "'l")],
            },
            Group {
                spans: vec![span(Plain, "K", "K"), span(Vowel, "a", "a")],
            },
        ];
        let out = resolve(groups, Phonotactics::global());
        assert_eq!(texts(&out), ["'lKa"]);
    }

    #[test]
    fn test_vowelless_word_before_punctuation_stands_alone() {
        use TableKind::*;
        let groups = vec![
            Group {
                spans: vec![span(Start, "st", "st")],
            },
            Group {
                spans: vec![span(Punctuation, " ", " ")],
            },
            Group {
                spans: vec![span(Plain, "k", "k"), span(Vowel, "a", "a")],
            },
        ];
        let out = resolve(groups, Phonotactics::global());
        assert_eq!(texts(&out), ["st", " ", "ka"]);
        assert!(!out[0].is_punctuation());
    }

    #[test]
    fn test_emptied_unit_dropped() {
        use TableKind::*;
        let groups = vec![
            Group {
                spans: vec![span(Full, "'l", "'l")],
            },
            Group {
                spans: vec![span(Vowel, "a", "a")],
            },
        ];
        let out = resolve(groups, Phonotactics::global());
        assert_eq!(texts(&out), ["'la"]);
    }

    #[test]
    fn test_punctuation_is_a_barrier() {
        use TableKind::*;
        let groups = vec![
            Group {
                spans: vec![span(Plain, "k", "k"), span(Vowel, "a", "a"), span(End, "s:t", "st")],
            },
            Group {
                spans: vec![span(Punctuation, " ", " ")],
            },
            Group {
                spans: vec![span(Plain, "t", "t")],
            },
            Group {
                spans: vec![span(Vowel, "a", "a")],
            },
        ];
        let out = resolve(groups, Phonotactics::global());
        assert_eq!(texts(&out), ["kast", " ", "ta"]);
        assert!(out[1].is_punctuation());
    }
}
