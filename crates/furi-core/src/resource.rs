//! Read-only lookup from characters and literal texts to their readings.
//!
//! Built once from the character and special-expression lists and then
//! shared (usually behind an `Arc`) by every solve.

use std::collections::HashMap;

use tracing::debug;

use crate::character::{
    CharacterKind, CharacterRecord, Compound, CompoundRecord, JapaneseCharacter,
};
use crate::reading::ReadingError;

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("invalid reading for {character}: {source}")]
    Reading {
        character: char,
        #[source]
        source: ReadingError,
    },
    #[error("special expression has empty text")]
    EmptyCompound,
}

/// Vocabulary and name readings of one rune, kept apart so that name-only
/// readings can be withheld from vocabulary entries.
#[derive(Debug, Clone, Default)]
pub struct CharacterReadings {
    pub vocab: Option<JapaneseCharacter>,
    pub name: Option<JapaneseCharacter>,
}

#[derive(Debug, Default)]
pub struct ResourceCache {
    characters: HashMap<char, CharacterReadings>,
    compounds: HashMap<String, Compound>,
}

impl ResourceCache {
    /// A cache with no data; only the default generator can produce parts.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from already-parsed characters and compounds. Records sharing a
    /// key are merged in input order.
    pub fn build(
        characters: impl IntoIterator<Item = JapaneseCharacter>,
        compounds: impl IntoIterator<Item = Compound>,
    ) -> Result<Self, ResourceError> {
        let mut cache = Self::default();
        for character in characters {
            let slot = cache.characters.entry(character.character).or_default();
            let target = match character.kind {
                CharacterKind::Vocab => &mut slot.vocab,
                CharacterKind::Name => &mut slot.name,
            };
            match target {
                Some(existing) => existing.merge(character),
                None => *target = Some(character),
            }
        }
        for compound in compounds {
            if compound.text.is_empty() {
                return Err(ResourceError::EmptyCompound);
            }
            match cache.compounds.get_mut(&compound.text) {
                Some(existing) => existing.merge(compound),
                None => {
                    cache.compounds.insert(compound.text.clone(), compound);
                }
            }
        }
        debug!(
            characters = cache.characters.len(),
            compounds = cache.compounds.len(),
            "resource cache built"
        );
        Ok(cache)
    }

    /// Parse raw records and build the cache.
    pub fn from_records(
        characters: &[CharacterRecord],
        compounds: &[CompoundRecord],
    ) -> Result<Self, ResourceError> {
        let mut parsed = Vec::with_capacity(characters.len());
        for record in characters {
            let result = if record.name {
                JapaneseCharacter::name(record.character, record.readings.as_slice())
            } else {
                JapaneseCharacter::vocab(record.character, record.readings.as_slice())
            };
            parsed.push(result.map_err(|source| ResourceError::Reading {
                character: record.character,
                source,
            })?);
        }
        let compounds = compounds
            .iter()
            .map(|r| Compound::new(&r.text, r.readings.as_slice()));
        Self::build(parsed, compounds)
    }

    pub fn character(&self, c: char) -> Option<&CharacterReadings> {
        self.characters.get(&c)
    }

    pub fn vocab_character(&self, c: char) -> Option<&JapaneseCharacter> {
        self.characters.get(&c).and_then(|r| r.vocab.as_ref())
    }

    pub fn name_character(&self, c: char) -> Option<&JapaneseCharacter> {
        self.characters.get(&c).and_then(|r| r.name.as_ref())
    }

    pub fn compound(&self, text: &str) -> Option<&Compound> {
        self.compounds.get(text)
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    pub fn compound_count(&self) -> usize {
        self.compounds.len()
    }
}
