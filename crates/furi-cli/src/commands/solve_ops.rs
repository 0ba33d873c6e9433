use serde::Serialize;

use furigana_engine::{Entry, EntryKind, SolutionPart, Solver};

use super::open_solver;

/// Solutions for one entry in the shape the CLI prints and writes.
#[derive(Debug, Serialize)]
pub struct SolveOutput {
    pub kanji: String,
    pub reading: String,
    pub name: bool,
    /// Solutions in `[kanji|furigana]` notation.
    pub solutions: Vec<String>,
    pub parts: Vec<Vec<SolutionPart>>,
}

impl SolveOutput {
    pub fn collect(solver: &Solver, entry: &Entry) -> Self {
        let mut solutions = Vec::new();
        let mut parts = Vec::new();
        for solution in solver.solve(entry) {
            solutions.push(solution.to_string());
            parts.push(solution.into_parts());
        }
        Self {
            kanji: entry.kanji_form_text().to_string(),
            reading: entry.reading_text().to_string(),
            name: entry.is_name(),
            solutions,
            parts,
        }
    }
}

pub fn solve_cmd(resource_file: &str, kanji: &str, reading: &str, name: bool, json: bool) {
    let solver = open_solver(resource_file);
    let kind = if name { EntryKind::Name } else { EntryKind::Vocab };
    let entry = die!(Entry::new(kind, kanji, reading), "Invalid entry: {}");
    let output = SolveOutput::collect(&solver, &entry);

    if json {
        let text = die!(serde_json::to_string_pretty(&output), "JSON serialization failed: {}");
        println!("{text}");
        return;
    }
    if output.solutions.is_empty() {
        println!("{} ({}): no solution", output.kanji, output.reading);
        return;
    }
    for (i, solution) in output.solutions.iter().enumerate() {
        println!("#{:>2}: {}", i + 1, solution);
    }
}
