//! Solver settings loaded from TOML, lazily initialized once per process.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`
//!
//! `Solver::with_settings` bypasses the singleton for callers that want
//! per-solver tuning.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::unicode::is_kana;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub solver: SolverSettings,
    pub fallback: FallbackSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolverSettings {
    pub max_beam_width: usize,
    pub fallback: bool,
    pub reject_guessed_ambiguity: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FallbackSettings {
    pub never_initial: Vec<char>,
}

impl FallbackSettings {
    pub fn can_start_reading(&self, c: char) -> bool {
        !self.never_initial.contains(&c)
    }
}

impl Default for Settings {
    fn default() -> Self {
        settings().clone()
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.solver.max_beam_width == 0 {
        return Err(SettingsError::InvalidValue {
            field: "solver.max_beam_width".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if let Some(c) = s.fallback.never_initial.iter().find(|&&c| !is_kana(c)) {
        return Err(SettingsError::InvalidValue {
            field: "fallback.never_initial".to_string(),
            reason: format!("{c:?} is not kana"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.solver.max_beam_width, 512);
        assert!(s.solver.fallback);
        assert!(s.solver.reject_guessed_ambiguity);
        assert_eq!(s.fallback.never_initial, vec!['っ', 'ょ', 'ゃ', 'ゅ', 'ん']);
        assert!(!s.fallback.can_start_reading('ん'));
        assert!(s.fallback.can_start_reading('か'));
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[solver]
max_beam_width = 64
fallback = false
reject_guessed_ambiguity = false

[fallback]
never_initial = ["ん", "ー"]
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.solver.max_beam_width, 64);
        assert!(!s.solver.fallback);
        assert!(!s.fallback.can_start_reading('ー'));
    }

    #[test]
    fn error_zero_beam_width() {
        let toml = r#"
[solver]
max_beam_width = 0
fallback = true
reject_guessed_ambiguity = true

[fallback]
never_initial = []
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("solver.max_beam_width"));
    }

    #[test]
    fn error_non_kana_never_initial() {
        let toml = r#"
[solver]
max_beam_width = 8
fallback = true
reject_guessed_ambiguity = true

[fallback]
never_initial = ["x"]
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("fallback.never_initial"));
    }

    #[test]
    fn error_multi_char_never_initial() {
        let toml = r#"
[solver]
max_beam_width = 8
fallback = true
reject_guessed_ambiguity = true

[fallback]
never_initial = ["っょ"]
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[solver]
max_beam_width = 8
fallback = true
reject_guessed_ambiguity = true
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
