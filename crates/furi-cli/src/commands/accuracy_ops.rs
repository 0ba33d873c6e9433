//! Accuracy corpus: entries with the exact solutions they must produce.
//!
//! ```toml
//! [[cases]]
//! kanji = "好嫌"
//! reading = "すききら"
//! expected = ["[好|すき][嫌|きら]", "[好|す][嫌|ききら]"]
//! category = "ambiguity"
//! ```
//!
//! An empty `expected` asserts that the entry has no solution.

use std::collections::BTreeMap;
use std::fs;

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use furigana_engine::solution::{format_parts, parse_notation, NotationError};
use furigana_engine::{Entry, EntryKind, SolutionPart, Solver};

use super::open_solver;

#[derive(Debug, Deserialize)]
pub struct AccuracyCorpus {
    pub cases: Vec<AccuracyCase>,
}

#[derive(Debug, Deserialize)]
pub struct AccuracyCase {
    pub kanji: String,
    pub reading: String,
    #[serde(default)]
    pub expected: Vec<String>,
    #[serde(default)]
    pub name: bool,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub note: Option<String>,
}

fn default_category() -> String {
    "general".to_string()
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyStatus {
    Pass,
    Fail,
    Skip,
    /// The case itself is malformed (bad entry or bad expected notation).
    Invalid,
}

#[derive(Debug, Serialize)]
pub struct AccuracyResult {
    pub kanji: String,
    pub reading: String,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
    pub status: AccuracyStatus,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccuracySummary {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub skip: usize,
    pub invalid: usize,
    pub pass_rate: String,
}

#[derive(Debug, Serialize)]
pub struct AccuracyReport {
    pub results: Vec<AccuracyResult>,
    pub summary: AccuracySummary,
}

/// Canonical notation of an expected solution: kana written with redundant
/// furigana (`[る|る]`) lose it and adjacent plain runs are joined.
fn canonical(expected: &str) -> Result<String, NotationError> {
    let mut merged: Vec<SolutionPart> = Vec::new();
    for part in parse_notation(expected)? {
        let part = match part.furigana {
            Some(furigana) => SolutionPart::annotated(part.base_text, furigana),
            None => part,
        };
        match merged.last_mut() {
            Some(prev) if prev.furigana.is_none() && part.furigana.is_none() => {
                prev.base_text.push_str(&part.base_text)
            }
            _ => merged.push(part),
        }
    }
    Ok(format_parts(&merged))
}

fn evaluate_case(solver: &Solver, case: &AccuracyCase) -> AccuracyResult {
    let mut result = AccuracyResult {
        kanji: case.kanji.clone(),
        reading: case.reading.clone(),
        expected: case.expected.clone(),
        actual: Vec::new(),
        status: AccuracyStatus::Skip,
        category: case.category.clone(),
        error: None,
        note: case.note.clone(),
    };
    if case.skip {
        return result;
    }

    let expected: Result<Vec<String>, NotationError> =
        case.expected.iter().map(|e| canonical(e)).collect();
    let kind = if case.name { EntryKind::Name } else { EntryKind::Vocab };
    let entry = Entry::new(kind, &case.kanji, &case.reading);
    let (expected, entry) = match (expected, entry) {
        (Ok(expected), Ok(entry)) => (expected, entry),
        (Err(e), _) => {
            result.status = AccuracyStatus::Invalid;
            result.error = Some(e.to_string());
            return result;
        }
        (_, Err(e)) => {
            result.status = AccuracyStatus::Invalid;
            result.error = Some(e.to_string());
            return result;
        }
    };

    result.actual = solver.solve(&entry).map(|s| s.to_string()).collect();
    result.status = if result.actual == expected {
        AccuracyStatus::Pass
    } else {
        AccuracyStatus::Fail
    };
    result
}

pub fn evaluate(solver: &Solver, corpus: &AccuracyCorpus, category: Option<&str>) -> AccuracyReport {
    let results: Vec<AccuracyResult> = corpus
        .cases
        .iter()
        .filter(|c| category.map_or(true, |cat| c.category == cat))
        .map(|c| evaluate_case(solver, c))
        .collect();

    let count = |status| results.iter().filter(|r| r.status == status).count();
    let (pass, fail, skip, invalid) = (
        count(AccuracyStatus::Pass),
        count(AccuracyStatus::Fail),
        count(AccuracyStatus::Skip),
        count(AccuracyStatus::Invalid),
    );
    let tested = results.len() - skip;
    let rate = if tested > 0 {
        pass as f64 / tested as f64 * 100.0
    } else {
        0.0
    };
    let summary = AccuracySummary {
        total: results.len(),
        pass,
        fail,
        skip,
        invalid,
        pass_rate: format!("{:.1}%", rate),
    };
    AccuracyReport { results, summary }
}

/// Pad `s` with spaces to `width` terminal columns.
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(w)))
}

fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

pub fn format_text(report: &AccuracyReport, verbose: bool) -> String {
    let mut out = String::new();
    let mut grouped: BTreeMap<&str, Vec<&AccuracyResult>> = BTreeMap::new();
    for r in &report.results {
        grouped.entry(&r.category).or_default().push(r);
    }
    let column = report
        .results
        .iter()
        .map(|r| UnicodeWidthStr::width(r.kanji.as_str()))
        .max()
        .unwrap_or(0);

    for (cat, group) in &grouped {
        out.push_str(&format!("\n=== {} ({} cases) ===\n", cat, group.len()));
        for r in group {
            let kanji = pad(&r.kanji, column);
            match r.status {
                AccuracyStatus::Pass if verbose => {
                    out.push_str(&format!("  \u{2713} {kanji}  {}\n", format_list(&r.actual)));
                }
                AccuracyStatus::Pass => {}
                AccuracyStatus::Fail => {
                    out.push_str(&format!(
                        "  \u{2717} {kanji}  expected {}, got {}\n",
                        format_list(&r.expected),
                        format_list(&r.actual)
                    ));
                }
                AccuracyStatus::Skip => {
                    out.push_str(&format!("  - {kanji}  skipped\n"));
                }
                AccuracyStatus::Invalid => {
                    out.push_str(&format!(
                        "  ! {kanji}  {}\n",
                        r.error.as_deref().unwrap_or("invalid case")
                    ));
                }
            }
            if let (Some(note), true) = (&r.note, verbose || r.status != AccuracyStatus::Pass) {
                out.push_str(&format!("      note: {note}\n"));
            }
        }
    }

    let s = &report.summary;
    out.push_str(&format!(
        "\n{} cases: {} pass, {} fail, {} skip, {} invalid ({})\n",
        s.total, s.pass, s.fail, s.skip, s.invalid, s.pass_rate
    ));
    out
}

pub fn accuracy_cmd(
    resource_file: &str,
    corpus_file: &str,
    category: Option<&str>,
    verbose: bool,
    json: bool,
) {
    let solver = open_solver(resource_file);
    let text = die!(fs::read_to_string(corpus_file), "Failed to read corpus file: {}");
    let corpus: AccuracyCorpus = die!(toml::from_str(&text), "Failed to parse corpus TOML: {}");

    let report = evaluate(&solver, &corpus, category);
    if report.results.is_empty() {
        eprintln!("No cases match the given filters");
        std::process::exit(1);
    }

    if json {
        let text = die!(serde_json::to_string_pretty(&report), "JSON serialization failed: {}");
        println!("{text}");
    } else {
        print!("{}", format_text(&report, verbose));
    }

    if report.summary.fail + report.summary.invalid > 0 {
        std::process::exit(1);
    }
}
