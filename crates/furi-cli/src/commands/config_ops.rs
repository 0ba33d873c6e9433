use std::fs;

use furigana_engine::settings::{default_toml, parse_settings_toml, Settings};

pub fn settings_export() {
    print!("{}", default_toml());
}

/// One-line description of validated settings.
pub fn describe(s: &Settings) -> String {
    let never_initial: String = s.fallback.never_initial.iter().collect();
    format!(
        "solver.max_beam_width={}, solver.fallback={}, solver.reject_guessed_ambiguity={}, fallback.never_initial={}",
        s.solver.max_beam_width, s.solver.fallback, s.solver.reject_guessed_ambiguity, never_initial
    )
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(parse_settings_toml(&content), "Error: {}");
    println!("OK: {}", describe(&s));
}
