use crate::entry::Entry;
use crate::unicode::{byte_offset, is_kana, katakana_char_to_hiragana};

/// A half-open rune range `[start, end)` of an entry's kanji form.
///
/// Borrows the entry; building one is cheap and the solver makes one per
/// (position, length) it tries.
#[derive(Debug, Clone, Copy)]
pub struct KanjiFormSlice<'e> {
    entry: &'e Entry,
    start: usize,
    end: usize,
}

impl<'e> KanjiFormSlice<'e> {
    /// # Panics
    /// If the range is empty or exceeds the entry.
    pub fn new(entry: &'e Entry, start: usize, end: usize) -> Self {
        assert!(start < end && end <= entry.len(), "invalid slice {start}..{end}");
        Self { entry, start, end }
    }

    pub fn entry(&self) -> &'e Entry {
        self.entry
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Original runes, iteration marks included.
    pub fn runes(&self) -> &'e [char] {
        &self.entry.kanji_form_runes()[self.start..self.end]
    }

    /// Runes with iteration marks resolved.
    pub fn normalized_runes(&self) -> &'e [char] {
        &self.entry.normalized_kanji_form_runes()[self.start..self.end]
    }

    /// The original text covered by the slice.
    pub fn text(&self) -> &'e str {
        let text = self.entry.kanji_form_text();
        &text[byte_offset(text, self.start)..byte_offset(text, self.end)]
    }

    pub fn normalized_text(&self) -> String {
        self.normalized_runes().iter().collect()
    }

    /// The (normalized) rune just before the slice, `None` at the start.
    pub fn previous_rune(&self) -> Option<char> {
        self.start
            .checked_sub(1)
            .map(|i| self.entry.normalized_kanji_form_runes()[i])
    }

    /// The (normalized) rune just after the slice, `None` at the end.
    pub fn next_rune(&self) -> Option<char> {
        self.entry.normalized_kanji_form_runes().get(self.end).copied()
    }

    pub fn contains_first_rune(&self) -> bool {
        self.start == 0
    }

    pub fn contains_final_rune(&self) -> bool {
        self.end == self.entry.len()
    }

    /// Kanji-form text after the slice, hiragana-normalized.
    pub fn following_text(&self) -> String {
        self.entry.normalized_kanji_form_runes()[self.end..]
            .iter()
            .map(|&c| katakana_char_to_hiragana(c))
            .collect()
    }

    /// Both neighbors are kana or text boundaries.
    pub fn is_kana_bounded(&self) -> bool {
        self.previous_rune().map_or(true, is_kana) && self.next_rune().map_or(true, is_kana)
    }

    /// The run of kana directly after the slice (hiragana-normalized), and
    /// whether that run reaches the end of the text.
    pub fn following_kana_run(&self) -> (String, bool) {
        let rest = &self.entry.normalized_kanji_form_runes()[self.end..];
        let run: String = rest
            .iter()
            .take_while(|&&c| is_kana(c))
            .map(|&c| katakana_char_to_hiragana(c))
            .collect();
        let reaches_end = run.chars().count() == rest.len();
        (run, reaches_end)
    }
}
