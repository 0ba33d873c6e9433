use serde::{Deserialize, Serialize};

use crate::reading::{CharacterReading, ReadingError, ReadingOrigin};
use crate::unicode::{is_kanji, katakana_to_hiragana};

/// Whether a character's readings come from the vocabulary or the name list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterKind {
    Vocab,
    Name,
}

/// A character plus its ordered, de-duplicated declared readings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JapaneseCharacter {
    pub character: char,
    pub kind: CharacterKind,
    pub readings: Vec<CharacterReading>,
}

impl JapaneseCharacter {
    pub fn vocab<S: AsRef<str>>(character: char, readings: &[S]) -> Result<Self, ReadingError> {
        Self::parse(character, CharacterKind::Vocab, readings)
    }

    pub fn name<S: AsRef<str>>(character: char, readings: &[S]) -> Result<Self, ReadingError> {
        Self::parse(character, CharacterKind::Name, readings)
    }

    fn parse<S: AsRef<str>>(
        character: char,
        kind: CharacterKind,
        raw: &[S],
    ) -> Result<Self, ReadingError> {
        let origin = match kind {
            CharacterKind::Name => ReadingOrigin::Name,
            CharacterKind::Vocab if is_kanji(character) => ReadingOrigin::Kanji,
            CharacterKind::Vocab => ReadingOrigin::NonKanji,
        };
        let mut readings = Vec::with_capacity(raw.len());
        for notation in raw {
            let reading = CharacterReading::parse(notation.as_ref(), origin)?;
            if !readings.contains(&reading) {
                readings.push(reading);
            }
        }
        Ok(Self {
            character,
            kind,
            readings,
        })
    }

    /// Append readings from another record for the same character.
    pub(crate) fn merge(&mut self, other: JapaneseCharacter) {
        for reading in other.readings {
            if !self.readings.contains(&reading) {
                self.readings.push(reading);
            }
        }
    }
}

/// A special expression: literal text with whole readings that cannot be
/// derived from its characters (一ヶ月's ヶ, 今日).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    pub text: String,
    /// Hiragana-normalized, de-duplicated, in declaration order.
    pub readings: Vec<String>,
}

impl Compound {
    pub fn new<S: AsRef<str>>(text: &str, readings: &[S]) -> Self {
        let mut normalized: Vec<String> = Vec::with_capacity(readings.len());
        for r in readings {
            let r = katakana_to_hiragana(r.as_ref().trim());
            if !r.is_empty() && !normalized.contains(&r) {
                normalized.push(r);
            }
        }
        Self {
            text: text.to_string(),
            readings: normalized,
        }
    }

    pub(crate) fn merge(&mut self, other: Compound) {
        for r in other.readings {
            if !self.readings.contains(&r) {
                self.readings.push(r);
            }
        }
    }
}

/// Raw character record as produced by the import pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub character: char,
    pub readings: Vec<String>,
    /// Name-only readings (nanori).
    #[serde(default)]
    pub name: bool,
}

/// Raw special-expression record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundRecord {
    pub text: String,
    pub readings: Vec<String>,
}
