use std::collections::HashSet;

use crate::character::JapaneseCharacter;
use crate::reading::ExpansionContext;
use crate::resource::ResourceCache;
use crate::solution::SolutionPart;

use super::super::slice::KanjiFormSlice;
use super::super::state::ReadingState;
use super::Continuation;

/// Proposes readings declared in the resource cache: expanded character
/// readings for single runes, whole readings of special expressions.
pub struct CachedGenerator<'a> {
    cache: &'a ResourceCache,
}

impl<'a> CachedGenerator<'a> {
    pub fn new(cache: &'a ResourceCache) -> Self {
        Self { cache }
    }

    /// Candidate hiragana texts in enumeration order, before matching
    /// against the reading.
    pub fn candidate_texts(&self, slice: &KanjiFormSlice<'_>) -> Vec<String> {
        let mut texts = Vec::new();
        if slice.len() == 1 {
            let following = slice.following_text();
            let ctx = ExpansionContext {
                contains_first_rune: slice.contains_first_rune(),
                contains_final_rune: slice.contains_final_rune(),
                following_text: &following,
            };
            let rune = slice.normalized_runes()[0];
            let is_name = slice.entry().is_name();
            let characters = [
                self.cache.vocab_character(rune),
                self.cache.name_character(rune).filter(|_| is_name),
            ];
            for character in characters.into_iter().flatten() {
                expand_character(character, is_name, &ctx, &mut texts);
            }
        }

        let text = slice.text();
        let normalized = slice.normalized_text();
        let mut keys = vec![text];
        if normalized != text {
            keys.push(&normalized);
        }
        for key in keys {
            if let Some(compound) = self.cache.compound(key) {
                texts.extend(compound.readings.iter().cloned());
            }
        }
        texts
    }

    pub fn generate(
        &self,
        slice: &KanjiFormSlice<'_>,
        state: &ReadingState<'_>,
    ) -> Vec<Continuation> {
        let base = slice.text();
        let mut seen = HashSet::new();
        self.candidate_texts(slice)
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .filter_map(|t| state.match_prefix(&t))
            .map(|furigana| Continuation::derived(vec![SolutionPart::annotated(base, furigana)]))
            .collect()
    }
}

fn expand_character(
    character: &JapaneseCharacter,
    is_name_entry: bool,
    ctx: &ExpansionContext<'_>,
    out: &mut Vec<String>,
) {
    for reading in &character.readings {
        if reading.is_name_reading() && !is_name_entry {
            continue;
        }
        reading.expand(ctx, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Compound;
    use crate::entry::Entry;

    fn cache() -> ResourceCache {
        ResourceCache::build(
            [
                JapaneseCharacter::vocab('一', &["ひと-", "いち", "いつ"]).unwrap(),
                JapaneseCharacter::vocab('人', &["ひと", "ジン", "ニン"]).unwrap(),
                JapaneseCharacter::vocab('和', &["ワ"]).unwrap(),
                JapaneseCharacter::name('和', &["かず"]).unwrap(),
            ],
            [
                Compound::new("ヶ", &["ヶ", "か", "が"]),
                Compound::new("今日", &["きょう", "こんにち"]),
            ],
        )
        .unwrap()
    }

    fn furigana(continuations: &[Continuation]) -> Vec<Option<String>> {
        continuations
            .iter()
            .map(|c| c.parts[0].furigana.clone())
            .collect()
    }

    #[test]
    fn test_sokuon_candidates_deduplicated() {
        let cache = cache();
        let generator = CachedGenerator::new(&cache);
        let entry = Entry::vocab("一ヶ月", "いっかげつ").unwrap();
        let slice = KanjiFormSlice::new(&entry, 0, 1);
        assert_eq!(
            generator.candidate_texts(&slice),
            vec!["ひと", "いち", "いっ", "いつ", "いっ"]
        );
        let state = ReadingState::at(&entry, 0);
        let out = generator.generate(&slice, &state);
        assert_eq!(furigana(&out), vec![Some("いっ".to_string())]);
        assert!(!out[0].guessed);
    }

    #[test]
    fn test_single_rune_compound() {
        let cache = cache();
        let generator = CachedGenerator::new(&cache);
        let entry = Entry::vocab("一ヶ月", "いっかげつ").unwrap();
        let slice = KanjiFormSlice::new(&entry, 1, 2);
        let out = generator.generate(&slice, &ReadingState::at(&entry, 2));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].parts, vec![SolutionPart::annotated("ヶ", "か")]);
    }

    #[test]
    fn test_multi_rune_uses_compounds_only() {
        let cache = cache();
        let generator = CachedGenerator::new(&cache);
        let entry = Entry::vocab("今日は", "コンニチハ").unwrap();
        let slice = KanjiFormSlice::new(&entry, 0, 2);
        let out = generator.generate(&slice, &ReadingState::at(&entry, 0));
        assert_eq!(out[0].parts, vec![SolutionPart::annotated("今日", "コンニチ")]);

        let entry = Entry::vocab("一人", "ひとり").unwrap();
        let slice = KanjiFormSlice::new(&entry, 0, 2);
        assert!(generator.candidate_texts(&slice).is_empty());
    }

    #[test]
    fn test_iteration_mark_uses_repeated_character() {
        let cache = cache();
        let generator = CachedGenerator::new(&cache);
        let entry = Entry::vocab("人々", "ひとびと").unwrap();
        let slice = KanjiFormSlice::new(&entry, 1, 2);
        let out = generator.generate(&slice, &ReadingState::at(&entry, 2));
        assert_eq!(out[0].parts, vec![SolutionPart::annotated("々", "びと")]);
    }

    #[test]
    fn test_name_readings_only_for_names() {
        let cache = cache();
        let generator = CachedGenerator::new(&cache);
        let vocab = Entry::vocab("和", "かず").unwrap();
        let slice = KanjiFormSlice::new(&vocab, 0, 1);
        assert!(generator
            .generate(&slice, &ReadingState::at(&vocab, 0))
            .is_empty());

        let name = Entry::name("和", "かず").unwrap();
        let slice = KanjiFormSlice::new(&name, 0, 1);
        let out = generator.generate(&slice, &ReadingState::at(&name, 0));
        assert_eq!(furigana(&out), vec![Some("かず".to_string())]);
    }

    #[test]
    fn test_prefix_reading_not_used_at_end() {
        let cache = cache();
        let generator = CachedGenerator::new(&cache);
        let entry = Entry::vocab("一", "ひと").unwrap();
        let slice = KanjiFormSlice::new(&entry, 0, 1);
        assert!(generator
            .generate(&slice, &ReadingState::at(&entry, 0))
            .is_empty());
    }
}
