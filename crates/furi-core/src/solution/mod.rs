//! Segmentations of an entry into (base text, furigana) parts.

mod builder;
mod notation;

pub use builder::SolutionBuilder;
pub use notation::{format_parts, parse_notation, NotationError};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::unicode::{contains_kanji, kana_equivalent};

/// One span of the kanji form and the reading attributed to it.
///
/// `furigana` is `None` exactly when the base text is read as written
/// (kana, or literal symbols).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolutionPart {
    pub base_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub furigana: Option<String>,
}

impl SolutionPart {
    pub fn new(base_text: impl Into<String>, furigana: Option<String>) -> Self {
        Self {
            base_text: base_text.into(),
            furigana,
        }
    }

    /// A part read exactly as written.
    pub fn literal(base_text: impl Into<String>) -> Self {
        Self::new(base_text, None)
    }

    /// A part with furigana. Kanji-free text whose furigana only restates it
    /// (modulo kana script) drops the furigana.
    pub fn annotated(base_text: impl Into<String>, furigana: impl Into<String>) -> Self {
        let base_text = base_text.into();
        let furigana = furigana.into();
        if !contains_kanji(&base_text) && kana_equivalent(&base_text, &furigana) {
            Self::literal(base_text)
        } else {
            Self::new(base_text, Some(furigana))
        }
    }

    /// The reading this part contributes: its furigana, or its own text.
    pub fn reading(&self) -> &str {
        self.furigana.as_deref().unwrap_or(&self.base_text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolutionError {
    #[error("base text {actual:?} does not rebuild kanji form {expected:?}")]
    BaseTextMismatch { expected: String, actual: String },
    #[error("furigana {actual:?} does not rebuild reading {expected:?}")]
    ReadingMismatch { expected: String, actual: String },
    #[error("part {base:?} contains kanji but has no furigana")]
    MissingFurigana { base: String },
}

/// A validated segmentation of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<'e> {
    entry: &'e Entry,
    parts: Vec<SolutionPart>,
}

impl<'e> Solution<'e> {
    pub fn entry(&self) -> &'e Entry {
        self.entry
    }

    pub fn parts(&self) -> &[SolutionPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<SolutionPart> {
        self.parts
    }

    /// Parts with furigana, paired with their rune offset in the kanji form.
    pub fn furigana_spans(&self) -> impl Iterator<Item = (usize, &SolutionPart)> + '_ {
        let mut offset = 0;
        self.parts.iter().filter_map(move |part| {
            let start = offset;
            offset += part.base_text.chars().count();
            part.furigana.as_ref().map(|_| (start, part))
        })
    }
}

impl fmt::Display for Solution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_parts(&self.parts))
    }
}
