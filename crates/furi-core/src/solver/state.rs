use crate::entry::Entry;
use crate::solution::SolutionBuilder;
use crate::unicode::{rune_len, split_at_rune};

/// The reading a hypothesis has consumed so far and what is left, as
/// borrowed slices of the entry's reading (raw and hiragana-normalized).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingState<'e> {
    prior: &'e str,
    remaining: &'e str,
    prior_normalized: &'e str,
    remaining_normalized: &'e str,
}

impl<'e> ReadingState<'e> {
    pub fn new(entry: &'e Entry, builder: &SolutionBuilder) -> Self {
        Self::at(entry, builder.reading_runes())
    }

    /// State after `consumed` reading runes.
    pub fn at(entry: &'e Entry, consumed: usize) -> Self {
        let (prior, remaining) = split_at_rune(entry.reading_text(), consumed);
        let (prior_normalized, remaining_normalized) =
            split_at_rune(entry.normalized_reading_text(), consumed);
        Self {
            prior,
            remaining,
            prior_normalized,
            remaining_normalized,
        }
    }

    pub fn prior(&self) -> &'e str {
        self.prior
    }

    pub fn remaining(&self) -> &'e str {
        self.remaining
    }

    pub fn prior_normalized(&self) -> &'e str {
        self.prior_normalized
    }

    pub fn remaining_normalized(&self) -> &'e str {
        self.remaining_normalized
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Next reading rune, hiragana-normalized.
    pub fn next_normalized(&self) -> Option<char> {
        self.remaining_normalized.chars().next()
    }

    /// The raw reading covering the first `runes` runes of what remains.
    pub fn take_raw(&self, runes: usize) -> &'e str {
        split_at_rune(self.remaining, runes).0
    }

    /// If `candidate` (hiragana) is a non-empty prefix of the remaining
    /// reading, the raw text it corresponds to.
    pub fn match_prefix(&self, candidate: &str) -> Option<&'e str> {
        if candidate.is_empty() || !self.remaining_normalized.starts_with(candidate) {
            return None;
        }
        Some(self.take_raw(rune_len(candidate)))
    }
}
