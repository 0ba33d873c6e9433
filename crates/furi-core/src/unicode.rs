//! Character-level Unicode classification and kana normalization.
//!
//! Everything here works on `char` (Unicode scalar values). Offsets handed
//! around the solver are always rune offsets, never byte offsets.

use crate::reading::phonetics::voiced;

/// Distance between a katakana codepoint and its hiragana counterpart.
const KANA_OFFSET: u32 = 0x60;

/// Check the full Hiragana block (U+3040..U+309F). This includes a few unassigned
/// codepoints (U+3040, U+3097-3098) but these never appear in readings, so the
/// block-level check is preferred over an exact range for clarity.
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF), including ー and ヶ.
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

pub fn is_kana(c: char) -> bool {
    is_hiragana(c) || is_katakana(c)
}

/// CJK ideographs plus the kanji-like marks 々 and 〆.
pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{F900}'..='\u{FAFF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
        || ('\u{2A700}'..='\u{2EBEF}').contains(&c)
        || ('\u{30000}'..='\u{3134F}').contains(&c)
        || c == '々'
        || c == '〆'
}

pub fn contains_kanji(s: &str) -> bool {
    s.chars().any(is_kanji)
}

/// True when the character cannot be represented by a single UTF-16 unit.
pub fn needs_surrogate_pair(c: char) -> bool {
    c as u32 > 0xFFFF
}

/// Iteration marks: 々 repeats a kanji, ゝ/ヽ repeat a kana, ゞ/ヾ repeat it voiced.
pub fn is_iteration_mark(c: char) -> bool {
    matches!(c, '々' | 'ゝ' | 'ゞ' | 'ヽ' | 'ヾ')
}

/// Map a single katakana to hiragana. Characters without a hiragana
/// counterpart (ー, ヷ..ヺ, ・) are returned unchanged.
pub fn katakana_char_to_hiragana(c: char) -> char {
    match c {
        'ァ'..='ヶ' | 'ヽ' | 'ヾ' => char::from_u32(c as u32 - KANA_OFFSET).unwrap_or(c),
        _ => c,
    }
}

/// Map a single hiragana to katakana. Non-hiragana pass through.
pub fn hiragana_char_to_katakana(c: char) -> char {
    match c {
        'ぁ'..='ゖ' | 'ゝ' | 'ゞ' => char::from_u32(c as u32 + KANA_OFFSET).unwrap_or(c),
        _ => c,
    }
}

/// Convert a katakana string to hiragana, one rune per rune.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars().map(katakana_char_to_hiragana).collect()
}

/// Convert a hiragana string to katakana.
/// Non-hiragana characters (ー, ASCII, etc.) are passed through unchanged.
pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars().map(hiragana_char_to_katakana).collect()
}

/// Compare two runes ignoring the hiragana/katakana distinction.
pub fn kana_eq(a: char, b: char) -> bool {
    katakana_char_to_hiragana(a) == katakana_char_to_hiragana(b)
}

/// Compare two strings rune by rune ignoring the hiragana/katakana distinction.
pub fn kana_equivalent(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count() && a.chars().zip(b.chars()).all(|(x, y)| kana_eq(x, y))
}

/// Replace iteration marks with the rune they repeat.
///
/// A mark with nothing before it is kept. Consecutive marks (人々々) keep
/// repeating the last resolved rune.
pub fn resolve_iteration_marks(runes: &[char]) -> Vec<char> {
    let mut out: Vec<char> = Vec::with_capacity(runes.len());
    for &c in runes {
        let resolved = match (c, out.last().copied()) {
            ('々' | 'ゝ' | 'ヽ', Some(prev)) => prev,
            ('ゞ' | 'ヾ', Some(prev)) => voiced(prev).first().copied().unwrap_or(prev),
            _ => c,
        };
        out.push(resolved);
    }
    out
}

/// Number of runes in `s`.
pub fn rune_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of rune `n` in `s` (or `s.len()` past the end).
pub fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

/// Split `s` after `n` runes.
pub fn split_at_rune(s: &str, n: usize) -> (&str, &str) {
    s.split_at(byte_offset(s, n))
}
