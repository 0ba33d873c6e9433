//! Strategies that propose (text, furigana) continuations for a slice.
//!
//! The solver asks each generator in priority order; the cached generator
//! only knows what the resource data declares, the fallback infers readings
//! from the surrounding kana when the data has nothing.

mod cached;
mod fallback;

pub use cached::CachedGenerator;
pub use fallback::FallbackGenerator;

use crate::solution::SolutionPart;

use super::slice::KanjiFormSlice;
use super::state::ReadingState;

/// Parts covering a whole slice, proposed for one hypothesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continuation {
    pub parts: Vec<SolutionPart>,
    /// The reading was enumerated rather than derived from data or anchors.
    pub guessed: bool,
}

impl Continuation {
    pub fn derived(parts: Vec<SolutionPart>) -> Self {
        Self {
            parts,
            guessed: false,
        }
    }

    pub fn guessed(parts: Vec<SolutionPart>) -> Self {
        Self {
            parts,
            guessed: true,
        }
    }
}

/// Generator selection, in the order the solver consults them.
pub enum Generator<'a> {
    Cached(CachedGenerator<'a>),
    Fallback(FallbackGenerator<'a>),
}

impl Generator<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cached(_) => "cached",
            Self::Fallback(_) => "fallback",
        }
    }

    /// Every continuation of `state` that covers `slice` exactly.
    pub fn generate(
        &self,
        slice: &KanjiFormSlice<'_>,
        state: &ReadingState<'_>,
    ) -> Vec<Continuation> {
        if state.is_exhausted() {
            return Vec::new();
        }
        match self {
            Self::Cached(g) => g.generate(slice, state),
            Self::Fallback(g) => g.generate(slice, state),
        }
    }
}
