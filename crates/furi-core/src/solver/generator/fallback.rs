use std::cell::RefCell;
use std::collections::HashMap;

use regex::Regex;
use tracing::{debug, warn};

use crate::settings::FallbackSettings;
use crate::solution::SolutionPart;
use crate::unicode::{is_kanji, kana_eq, rune_len, split_at_rune};

use super::super::slice::KanjiFormSlice;
use super::super::state::ReadingState;
use super::Continuation;

/// Infers readings for slices the resource data says nothing about.
///
/// Kana are matched literally. A kanji surrounded by kana (or text
/// boundaries) takes whatever the reading holds between those anchors. A
/// kanji next to another kanji has no anchor, so every prefix of the
/// remaining reading is proposed and the step is marked as a guess.
pub struct FallbackGenerator<'a> {
    settings: &'a FallbackSettings,
    /// Compiled anchor patterns by anchor text. Every hypothesis in the beam
    /// asks about the same slice, so each anchor is compiled once per solve.
    anchors: RefCell<HashMap<String, Option<AnchorPattern>>>,
}

impl<'a> FallbackGenerator<'a> {
    pub fn new(settings: &'a FallbackSettings) -> Self {
        Self {
            settings,
            anchors: RefCell::new(HashMap::new()),
        }
    }

    pub fn generate(
        &self,
        slice: &KanjiFormSlice<'_>,
        state: &ReadingState<'_>,
    ) -> Vec<Continuation> {
        match slice.normalized_runes() {
            [c] if !is_kanji(*c) => literal_match(slice, *c, state).into_iter().collect(),
            [_] if slice.is_kana_bounded() => self
                .anchored(slice, state)
                .map(|(furigana, _)| {
                    Continuation::derived(vec![SolutionPart::annotated(slice.text(), furigana)])
                })
                .into_iter()
                .collect(),
            [_] => self.enumerate_prefixes(slice, state),
            [a, b] if a == b && is_kanji(*a) && slice.is_kana_bounded() => {
                self.split_repeated(slice, state).into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    fn enumerate_prefixes(
        &self,
        slice: &KanjiFormSlice<'_>,
        state: &ReadingState<'_>,
    ) -> Vec<Continuation> {
        match state.next_normalized() {
            Some(next) if self.settings.can_start_reading(next) => {}
            _ => return Vec::new(),
        }
        let base = slice.text();
        (1..=rune_len(state.remaining()))
            .map(|n| Continuation::guessed(vec![SolutionPart::annotated(base, state.take_raw(n))]))
            .collect()
    }
}

/// A kana (or symbol) that must appear verbatim at the reading cursor.
fn literal_match(slice: &KanjiFormSlice<'_>, c: char, state: &ReadingState<'_>) -> Option<Continuation> {
    let next = state.next_normalized()?;
    if !kana_eq(c, next) {
        return None;
    }
    let raw = state.take_raw(1);
    Some(Continuation::derived(vec![SolutionPart::annotated(slice.text(), raw)]))
}

/// Greedy and lazy captures of the reading up to one anchor.
#[derive(Clone)]
struct AnchorPattern {
    greedy: Regex,
    lazy: Regex,
}

impl AnchorPattern {
    /// `anchor` is already escaped. `None` only if the regex engine refuses
    /// it (size limits).
    fn for_anchor(anchor: &str) -> Option<Self> {
        let compile = |pattern: String| match Regex::new(&pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(pattern = %pattern, error = %e, "anchor pattern rejected");
                None
            }
        };
        Some(Self {
            greedy: compile(format!("^(.+){anchor}"))?,
            lazy: compile(format!("^(.+?){anchor}"))?,
        })
    }

    /// The unique capture, or `None` if there is no match or the anchor
    /// occurs more than once.
    fn capture<'h>(&self, haystack: &'h str) -> Option<&'h str> {
        let greedy = first_group(&self.greedy, haystack)?;
        let lazy = first_group(&self.lazy, haystack)?;
        if greedy != lazy || greedy.is_empty() {
            debug!(greedy, lazy, "anchor ambiguous");
            return None;
        }
        Some(greedy)
    }
}

fn first_group<'h>(re: &Regex, haystack: &'h str) -> Option<&'h str> {
    re.captures(haystack)?.get(1).map(|m| m.as_str())
}

impl FallbackGenerator<'_> {
    /// Reading between the slice start and the kana that follow the slice.
    ///
    /// Returns the raw furigana and its rune length. Greedy and lazy matches
    /// must agree, otherwise the split is ambiguous.
    fn anchored<'e>(
        &self,
        slice: &KanjiFormSlice<'_>,
        state: &ReadingState<'e>,
    ) -> Option<(&'e str, usize)> {
        let (run, reaches_end) = slice.following_kana_run();
        let mut anchor = regex::escape(&run);
        if reaches_end {
            anchor.push('$');
        }
        let pattern = self
            .anchors
            .borrow_mut()
            .entry(anchor)
            .or_insert_with_key(|anchor| AnchorPattern::for_anchor(anchor))
            .clone()?;
        let captured = pattern.capture(state.remaining_normalized())?;
        let len = rune_len(captured);
        Some((state.take_raw(len), len))
    }

    /// 唖々 / 代々: one anchored reading split evenly across the two runes.
    fn split_repeated(
        &self,
        slice: &KanjiFormSlice<'_>,
        state: &ReadingState<'_>,
    ) -> Option<Continuation> {
        let (furigana, len) = self.anchored(slice, state)?;
        if len % 2 != 0 {
            return None;
        }
        let (first_reading, second_reading) = split_at_rune(furigana, len / 2);
        let (first_base, second_base) = split_at_rune(slice.text(), 1);
        Some(Continuation::derived(vec![
            SolutionPart::annotated(first_base, first_reading),
            SolutionPart::annotated(second_base, second_reading),
        ]))
    }

    #[cfg(test)]
    fn compiled_anchors(&self) -> usize {
        self.anchors.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;
    use crate::settings::settings;

    fn generate(kanji: &str, reading: &str, start: usize, end: usize, consumed: usize) -> Vec<Continuation> {
        let entry = Entry::vocab(kanji, reading).unwrap();
        let generator = FallbackGenerator::new(&settings().fallback);
        let slice = KanjiFormSlice::new(&entry, start, end);
        generator.generate(&slice, &ReadingState::at(&entry, consumed))
    }

    fn readings(out: &[Continuation]) -> Vec<String> {
        out.iter()
            .map(|c| c.parts.iter().map(|p| p.reading().to_string()).collect::<Vec<_>>().join("|"))
            .collect()
    }

    #[test]
    fn test_kana_matches_script_insensitively() {
        let out = generate("お茶", "オチャ", 0, 1, 0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].parts, vec![SolutionPart::literal("お")]);
        assert!(!out[0].guessed);
        assert!(generate("お茶", "ちゃ", 0, 1, 0).is_empty());
    }

    #[test]
    fn test_anchor_to_end_of_text() {
        let out = generate("張る", "はる", 0, 1, 0);
        assert_eq!(readings(&out), vec!["は"]);
        assert!(!out[0].guessed);
    }

    #[test]
    fn test_anchor_inside_text() {
        let out = generate("見つける", "みつける", 0, 1, 0);
        assert_eq!(readings(&out), vec!["み"]);
    }

    #[test]
    fn test_ambiguous_anchor_rejected() {
        // た occurs twice after the slice start: greedy and lazy disagree.
        assert!(generate("日た本", "ひたたほん", 0, 1, 0).is_empty());
        // Anchored to the end, the split is unique again.
        assert_eq!(readings(&generate("日た", "ひたた", 0, 1, 0)), vec!["ひた"]);
    }

    #[test]
    fn test_unanchored_enumerates_prefixes() {
        let out = generate("可能", "かのう", 0, 1, 0);
        assert_eq!(readings(&out), vec!["か", "かの", "かのう"]);
        assert!(out.iter().all(|c| c.guessed));
    }

    #[test]
    fn test_unanchored_rejects_impossible_start() {
        assert!(generate("可能", "かんう", 1, 2, 1).is_empty());
    }

    #[test]
    fn test_repeated_kanji_split() {
        let out = generate("唖々", "アア", 0, 2, 0);
        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].parts,
            vec![SolutionPart::annotated("唖", "ア"), SolutionPart::annotated("々", "ア")]
        );
        assert!(generate("唖々", "あああ", 0, 2, 0).is_empty());
    }

    #[test]
    fn test_anchor_compiled_once_per_solve() {
        let entry = Entry::vocab("見つける", "みつける").unwrap();
        let generator = FallbackGenerator::new(&settings().fallback);
        let slice = KanjiFormSlice::new(&entry, 0, 1);
        let first = generator.generate(&slice, &ReadingState::at(&entry, 0));
        let second = generator.generate(&slice, &ReadingState::at(&entry, 0));
        assert_eq!(readings(&first), vec!["み"]);
        assert_eq!(first, second);
        assert_eq!(generator.compiled_anchors(), 1);

        let other = Entry::vocab("見る", "みる").unwrap();
        let slice = KanjiFormSlice::new(&other, 0, 1);
        assert_eq!(readings(&generator.generate(&slice, &ReadingState::at(&other, 0))), vec!["み"]);
        assert_eq!(generator.compiled_anchors(), 2);
    }

    #[test]
    fn test_unrelated_pairs_rejected() {
        assert!(generate("可能", "かのう", 0, 2, 0).is_empty());
    }
}
