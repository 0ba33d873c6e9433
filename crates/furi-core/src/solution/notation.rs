//! Inline `[kanji|furigana]` notation for fixtures and diagnostics.
//!
//! `[頑|がん][張|ば]る` describes three parts; bare text outside brackets is
//! a part without furigana.

use super::SolutionPart;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("unterminated '[' at rune {0}")]
    Unterminated(usize),
    #[error("missing '|' in bracket at rune {0}")]
    MissingSeparator(usize),
    #[error("empty base text in bracket at rune {0}")]
    EmptyBase(usize),
    #[error("empty furigana in bracket at rune {0}")]
    EmptyFurigana(usize),
    #[error("unexpected ']' at rune {0}")]
    UnexpectedClose(usize),
}

pub fn format_parts(parts: &[SolutionPart]) -> String {
    let mut out = String::new();
    for part in parts {
        match &part.furigana {
            Some(furigana) => {
                out.push('[');
                out.push_str(&part.base_text);
                out.push('|');
                out.push_str(furigana);
                out.push(']');
            }
            None => out.push_str(&part.base_text),
        }
    }
    out
}

pub fn parse_notation(text: &str) -> Result<Vec<SolutionPart>, NotationError> {
    let mut parts = Vec::new();
    let mut plain = String::new();
    let mut chars = text.chars().enumerate();

    while let Some((pos, c)) = chars.next() {
        match c {
            '[' => {
                if !plain.is_empty() {
                    parts.push(SolutionPart::literal(std::mem::take(&mut plain)));
                }
                let mut inner = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    inner.push(c);
                }
                if !closed {
                    return Err(NotationError::Unterminated(pos));
                }
                let (base, furigana) = inner
                    .split_once('|')
                    .ok_or(NotationError::MissingSeparator(pos))?;
                if base.is_empty() {
                    return Err(NotationError::EmptyBase(pos));
                }
                if furigana.is_empty() {
                    return Err(NotationError::EmptyFurigana(pos));
                }
                parts.push(SolutionPart::new(base, Some(furigana.to_string())));
            }
            ']' => return Err(NotationError::UnexpectedClose(pos)),
            _ => plain.push(c),
        }
    }
    if !plain.is_empty() {
        parts.push(SolutionPart::literal(plain));
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed() {
        let parts = parse_notation("[頑|がん][張|ば]る").unwrap();
        assert_eq!(
            parts,
            vec![
                SolutionPart::new("頑", Some("がん".into())),
                SolutionPart::new("張", Some("ば".into())),
                SolutionPart::literal("る"),
            ]
        );
        assert_eq!(format_parts(&parts), "[頑|がん][張|ば]る");
    }

    #[test]
    fn test_parse_leading_kana() {
        let parts = parse_notation("お[茶|ちゃ]").unwrap();
        assert_eq!(parts[0], SolutionPart::literal("お"));
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_notation("[月|げつ"), Err(NotationError::Unterminated(0)));
        assert_eq!(parse_notation("あ[月]"), Err(NotationError::MissingSeparator(1)));
        assert_eq!(parse_notation("[|げつ]"), Err(NotationError::EmptyBase(0)));
        assert_eq!(parse_notation("[月|]"), Err(NotationError::EmptyFurigana(0)));
        assert_eq!(parse_notation("月]"), Err(NotationError::UnexpectedClose(1)));
    }

    #[test]
    fn test_empty_notation() {
        assert!(parse_notation("").unwrap().is_empty());
        assert_eq!(format_parts(&[]), "");
    }
}
