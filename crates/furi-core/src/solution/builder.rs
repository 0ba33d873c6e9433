use crate::entry::Entry;
use crate::unicode::{contains_kanji, katakana_to_hiragana};

use super::{Solution, SolutionError, SolutionPart};

/// An in-progress segmentation: one hypothesis in the solver's beam.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionBuilder {
    parts: Vec<SolutionPart>,
    /// Parallel to `parts`: the furigana was enumerated, not derived.
    guessed: Vec<bool>,
    /// Runes of the reading consumed by `parts`.
    reading_runes: usize,
}

impl SolutionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parts(&self) -> &[SolutionPart] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Number of reading runes already attributed to parts.
    pub fn reading_runes(&self) -> usize {
        self.reading_runes
    }

    pub fn push(&mut self, part: SolutionPart) {
        self.push_part(part, false);
    }

    fn push_part(&mut self, part: SolutionPart, guessed: bool) {
        self.reading_runes += part.reading().chars().count();
        self.parts.push(part);
        self.guessed.push(guessed);
    }

    pub fn has_guess(&self) -> bool {
        self.guessed.contains(&true)
    }

    /// Parts with guessed furigana blanked out. Two hypotheses with the same
    /// settled parts differ only in what was guessed.
    pub fn settled_parts(&self) -> Vec<(&str, Option<&str>)> {
        self.parts
            .iter()
            .zip(&self.guessed)
            .map(|(p, &guessed)| {
                let furigana = if guessed { None } else { p.furigana.as_deref() };
                (p.base_text.as_str(), furigana)
            })
            .collect()
    }

    pub fn with_part(mut self, part: SolutionPart) -> Self {
        self.push(part);
        self
    }

    /// A copy of this builder extended by `parts`; the original is untouched
    /// so that sibling hypotheses can branch from it.
    pub fn extended(&self, parts: &[SolutionPart]) -> Self {
        self.branch(parts, false)
    }

    /// Like [`extended`](Self::extended), marking `parts` as guessed.
    pub fn extended_guess(&self, parts: &[SolutionPart]) -> Self {
        self.branch(parts, true)
    }

    fn branch(&self, parts: &[SolutionPart], guessed: bool) -> Self {
        let mut next = self.clone();
        next.parts.reserve(parts.len());
        next.guessed.reserve(parts.len());
        for part in parts {
            next.push_part(part.clone(), guessed);
        }
        next
    }

    /// Validate against `entry` and produce the final solution.
    ///
    /// Adjacent parts without furigana are merged into one span.
    pub fn build<'e>(&self, entry: &'e Entry) -> Result<Solution<'e>, SolutionError> {
        let base: String = self.parts.iter().map(|p| p.base_text.as_str()).collect();
        if base != entry.kanji_form_text() {
            return Err(SolutionError::BaseTextMismatch {
                expected: entry.kanji_form_text().to_string(),
                actual: base,
            });
        }

        let reading: String = self.parts.iter().map(SolutionPart::reading).collect();
        if katakana_to_hiragana(&reading) != entry.normalized_reading_text() {
            return Err(SolutionError::ReadingMismatch {
                expected: entry.reading_text().to_string(),
                actual: reading,
            });
        }

        if let Some(bad) = self.parts.iter().find(|p| {
            contains_kanji(&p.base_text) && p.furigana.as_deref().map_or(true, |f| f.trim().is_empty())
        }) {
            return Err(SolutionError::MissingFurigana {
                base: bad.base_text.clone(),
            });
        }

        let mut parts: Vec<SolutionPart> = Vec::with_capacity(self.parts.len());
        for part in &self.parts {
            match parts.last_mut() {
                Some(prev) if prev.furigana.is_none() && part.furigana.is_none() => {
                    prev.base_text.push_str(&part.base_text);
                }
                _ => parts.push(part.clone()),
            }
        }

        Ok(Solution { entry, parts })
    }
}
