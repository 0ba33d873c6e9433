use crate::unicode::{katakana_to_hiragana, needs_surrogate_pair, resolve_iteration_marks};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("kanji form is empty")]
    EmptyKanjiForm,
    #[error("reading is empty")]
    EmptyReading,
    #[error("reading contains {ch:?} which needs a UTF-16 surrogate pair")]
    SurrogatePair { ch: char },
}

/// Vocabulary words exclude name-only readings; names allow them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Vocab,
    Name,
}

/// A headword and its known reading, the unit the solver works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    kind: EntryKind,
    kanji_form_text: String,
    kanji_form_runes: Vec<char>,
    /// Iteration marks resolved to the rune they repeat.
    normalized_kanji_form_runes: Vec<char>,
    reading_text: String,
    /// Katakana folded to hiragana; same rune count as `reading_text`.
    normalized_reading_text: String,
}

impl Entry {
    pub fn vocab(kanji_form: &str, reading: &str) -> Result<Self, EntryError> {
        Self::new(EntryKind::Vocab, kanji_form, reading)
    }

    pub fn name(kanji_form: &str, reading: &str) -> Result<Self, EntryError> {
        Self::new(EntryKind::Name, kanji_form, reading)
    }

    pub fn new(kind: EntryKind, kanji_form: &str, reading: &str) -> Result<Self, EntryError> {
        if kanji_form.is_empty() {
            return Err(EntryError::EmptyKanjiForm);
        }
        if reading.is_empty() {
            return Err(EntryError::EmptyReading);
        }
        if let Some(ch) = reading.chars().find(|&c| needs_surrogate_pair(c)) {
            return Err(EntryError::SurrogatePair { ch });
        }
        let kanji_form_runes: Vec<char> = kanji_form.chars().collect();
        let normalized_kanji_form_runes = resolve_iteration_marks(&kanji_form_runes);
        Ok(Self {
            kind,
            kanji_form_text: kanji_form.to_string(),
            kanji_form_runes,
            normalized_kanji_form_runes,
            reading_text: reading.to_string(),
            normalized_reading_text: katakana_to_hiragana(reading),
        })
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_name(&self) -> bool {
        self.kind == EntryKind::Name
    }

    pub fn kanji_form_text(&self) -> &str {
        &self.kanji_form_text
    }

    pub fn kanji_form_runes(&self) -> &[char] {
        &self.kanji_form_runes
    }

    pub fn normalized_kanji_form_runes(&self) -> &[char] {
        &self.normalized_kanji_form_runes
    }

    pub fn reading_text(&self) -> &str {
        &self.reading_text
    }

    pub fn normalized_reading_text(&self) -> &str {
        &self.normalized_reading_text
    }

    /// Kanji-form length in runes.
    pub fn len(&self) -> usize {
        self.kanji_form_runes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kanji_form_runes.is_empty()
    }
}
