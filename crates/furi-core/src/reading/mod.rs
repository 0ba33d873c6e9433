//! Declared readings of a single character.
//!
//! A raw reading string uses dictionary notation: `stem[.okurigana]`, with a
//! trailing dash for prefix readings (`ひと-`) and a leading dash for suffix
//! readings (`-びと`). Katakana readings are on-yomi, hiragana readings are
//! kun-yomi. Many lists write on-yomi in hiragana too, so a dotless
//! hiragana reading also takes the sokuon forms of an on-yomi. Parsing
//! happens once when the resource cache is built; the solver only ever sees
//! the structured [`CharacterReading`].

pub mod phonetics;

use std::fmt;

use crate::unicode::{is_hiragana, is_katakana, katakana_to_hiragana};

use phonetics::{masu_form, rendaku_variants, sokuon_form};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadingError {
    #[error("empty reading")]
    Empty,
    #[error("more than one okurigana marker in {0:?}")]
    MultipleDots(String),
    #[error("on-yomi cannot carry okurigana: {0:?}")]
    DotInOnReading(String),
    #[error("literal reading cannot carry okurigana: {0:?}")]
    UnexpectedDot(String),
    #[error("reading mixes hiragana and katakana: {0:?}")]
    MixedScript(String),
    #[error("reading is not kana: {0:?}")]
    NotKana(String),
}

/// Which kind of reading a character record declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Yomi {
    Kun,
    On,
    Unknown,
}

/// Where a raw reading string came from; decides how it is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingOrigin {
    /// Reading of a kanji in the vocabulary character list.
    Kanji,
    /// Reading of a non-kanji character (kana, symbols).
    NonKanji,
    /// Name-only reading (nanori).
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OnReading {
    /// Hiragana-normalized reading.
    pub reading: String,
    pub sokuon_form: Option<String>,
    pub rendaku_readings: Vec<String>,
    pub rendaku_sokuon_readings: Vec<String>,
}

impl OnReading {
    fn new(reading: String) -> Self {
        let sokuon = sokuon_form(&reading);
        let rendaku_readings = rendaku_variants(&reading);
        let rendaku_sokuon_readings = sokuon
            .as_deref()
            .map(rendaku_variants)
            .unwrap_or_default();
        Self {
            reading,
            sokuon_form: sokuon,
            rendaku_readings,
            rendaku_sokuon_readings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KunReading {
    pub stem: String,
    pub rendaku_stems: Vec<String>,
    /// Geminated stem (いち → いっ). Only offered when no okurigana follows.
    pub sokuon_form: Option<String>,
    pub rendaku_sokuon_stems: Vec<String>,
}

impl KunReading {
    fn new(stem: String) -> Self {
        let rendaku_stems = rendaku_variants(&stem);
        let sokuon = sokuon_form(&stem);
        let rendaku_sokuon_stems = sokuon
            .as_deref()
            .map(rendaku_variants)
            .unwrap_or_default();
        Self {
            stem,
            rendaku_stems,
            sokuon_form: sokuon,
            rendaku_sokuon_stems,
        }
    }
}

/// The structural form of a reading. Generators dispatch on this with an
/// exhaustive match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReadingForm {
    On(OnReading),
    Kun(KunReading),
    /// Kun reading with non-verb okurigana (高.い).
    SuffixedKun { kun: KunReading, okurigana: String },
    /// Kun reading whose okurigana ends in a godan verb ending (張.る).
    VerbKun {
        kun: KunReading,
        okurigana: String,
        masu_form_suffix: String,
    },
    NonKanji(String),
    Name(String),
}

/// One declared reading of one character.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharacterReading {
    /// Raw notation as supplied by the resource data.
    pub notation: String,
    /// Only valid when the character is followed by something (`ひと-`).
    pub is_prefix: bool,
    /// Only valid when the character is preceded by something (`-びと`).
    pub is_suffix: bool,
    pub form: ReadingForm,
}

/// Position facts about the slice a reading is being expanded for.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionContext<'a> {
    pub contains_first_rune: bool,
    pub contains_final_rune: bool,
    /// Kanji-form text after the slice, hiragana-normalized.
    pub following_text: &'a str,
}

enum Script {
    Hiragana,
    Katakana,
}

fn classify(body: &str) -> Result<Script, ReadingError> {
    let kana: Vec<char> = body.chars().filter(|&c| c != '.' && c != 'ー').collect();
    if kana.is_empty() {
        return Err(ReadingError::NotKana(body.to_string()));
    }
    let hira = kana.iter().all(|&c| is_hiragana(c));
    let kata = kana.iter().all(|&c| is_katakana(c));
    match (hira, kata) {
        (true, _) => Ok(Script::Hiragana),
        (_, true) => Ok(Script::Katakana),
        _ if kana.iter().all(|&c| is_hiragana(c) || is_katakana(c)) => {
            Err(ReadingError::MixedScript(body.to_string()))
        }
        _ => Err(ReadingError::NotKana(body.to_string())),
    }
}

impl CharacterReading {
    pub fn parse(notation: &str, origin: ReadingOrigin) -> Result<Self, ReadingError> {
        let trimmed = notation.trim();
        let is_suffix = trimmed.starts_with('-');
        let is_prefix = trimmed.ends_with('-');
        let body = trimmed.trim_matches('-');
        if body.is_empty() {
            return Err(ReadingError::Empty);
        }
        let dots = body.matches('.').count();
        if dots > 1 {
            return Err(ReadingError::MultipleDots(body.to_string()));
        }
        let script = classify(body)?;

        let form = match origin {
            ReadingOrigin::NonKanji | ReadingOrigin::Name if dots > 0 => {
                return Err(ReadingError::UnexpectedDot(body.to_string()));
            }
            ReadingOrigin::NonKanji => ReadingForm::NonKanji(katakana_to_hiragana(body)),
            ReadingOrigin::Name => ReadingForm::Name(katakana_to_hiragana(body)),
            ReadingOrigin::Kanji => match script {
                Script::Katakana if dots > 0 => {
                    return Err(ReadingError::DotInOnReading(body.to_string()));
                }
                Script::Katakana => ReadingForm::On(OnReading::new(katakana_to_hiragana(body))),
                Script::Hiragana => match body.split_once('.') {
                    None => ReadingForm::Kun(KunReading::new(body.to_string())),
                    Some((stem, okurigana)) if stem.is_empty() || okurigana.is_empty() => {
                        return Err(ReadingError::Empty);
                    }
                    Some((stem, okurigana)) => {
                        let kun = KunReading::new(stem.to_string());
                        let okurigana = okurigana.to_string();
                        match masu_form(&okurigana) {
                            Some(masu_form_suffix) => ReadingForm::VerbKun {
                                kun,
                                okurigana,
                                masu_form_suffix,
                            },
                            None => ReadingForm::SuffixedKun { kun, okurigana },
                        }
                    }
                },
            },
        };

        Ok(Self {
            notation: trimmed.to_string(),
            is_prefix,
            is_suffix,
            form,
        })
    }

    pub fn yomi(&self) -> Yomi {
        match self.form {
            ReadingForm::On(_) => Yomi::On,
            ReadingForm::Kun(_) | ReadingForm::SuffixedKun { .. } | ReadingForm::VerbKun { .. } => {
                Yomi::Kun
            }
            ReadingForm::NonKanji(_) | ReadingForm::Name(_) => Yomi::Unknown,
        }
    }

    pub fn is_name_reading(&self) -> bool {
        matches!(self.form, ReadingForm::Name(_))
    }

    /// Prefix readings need a following character, suffix readings a
    /// preceding one.
    pub fn applies_to(&self, ctx: &ExpansionContext<'_>) -> bool {
        !((self.is_prefix && ctx.contains_final_rune) || (self.is_suffix && ctx.contains_first_rune))
    }

    /// Append every concrete hiragana text this reading can take in `ctx`.
    /// Output may contain duplicates; callers de-duplicate.
    pub fn expand(&self, ctx: &ExpansionContext<'_>, out: &mut Vec<String>) {
        if !self.applies_to(ctx) {
            return;
        }
        match &self.form {
            ReadingForm::NonKanji(text) | ReadingForm::Name(text) => out.push(text.clone()),
            ReadingForm::On(on) => expand_on(on, ctx, out),
            ReadingForm::Kun(kun) => expand_kun(kun, None, None, ctx, out),
            ReadingForm::SuffixedKun { kun, okurigana } => {
                expand_kun(kun, Some(okurigana), None, ctx, out)
            }
            ReadingForm::VerbKun {
                kun,
                okurigana,
                masu_form_suffix,
            } => expand_kun(kun, Some(okurigana), Some(masu_form_suffix), ctx, out),
        }
    }
}

impl fmt::Display for CharacterReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation)
    }
}

fn expand_on(on: &OnReading, ctx: &ExpansionContext<'_>, out: &mut Vec<String>) {
    out.push(on.reading.clone());
    if !ctx.contains_first_rune {
        out.extend(on.rendaku_readings.iter().cloned());
    }
    if !ctx.contains_final_rune {
        if let Some(sokuon) = &on.sokuon_form {
            out.push(sokuon.clone());
        }
    }
    if !ctx.contains_first_rune && !ctx.contains_final_rune {
        out.extend(on.rendaku_sokuon_readings.iter().cloned());
    }
}

fn expand_kun(
    kun: &KunReading,
    okurigana: Option<&str>,
    masu_form_suffix: Option<&str>,
    ctx: &ExpansionContext<'_>,
    out: &mut Vec<String>,
) {
    let rendaku: &[String] = if ctx.contains_first_rune {
        &[]
    } else {
        &kun.rendaku_stems
    };
    for stem in std::iter::once(&kun.stem).chain(rendaku) {
        out.push(stem.clone());
        if let Some(okurigana) = okurigana {
            let mut grown = stem.clone();
            for (i, c) in okurigana.char_indices() {
                // The rest of the okurigana is written out in the kanji form.
                if ctx.following_text.starts_with(&okurigana[i..]) {
                    break;
                }
                grown.push(c);
                out.push(grown.clone());
            }
        }
        if let Some(masu) = masu_form_suffix {
            out.push(format!("{stem}{masu}"));
        }
    }
    if okurigana.is_some() || ctx.contains_final_rune {
        return;
    }
    if let Some(sokuon) = &kun.sokuon_form {
        out.push(sokuon.clone());
    }
    if !ctx.contains_first_rune {
        out.extend(kun.rendaku_sokuon_stems.iter().cloned());
    }
}
