use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use furigana_engine::{Entry, EntryError, EntryKind, Solver};

use super::open_solver;
use super::solve_ops::SolveOutput;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub entries: usize,
    pub solved: usize,
    pub ambiguous: usize,
    pub skipped: usize,
}

#[derive(Debug, thiserror::Error)]
enum LineError {
    #[error("expected kanji<TAB>reading[<TAB>name]")]
    Columns,
    #[error("unknown entry kind {0:?}")]
    Kind(String),
    #[error(transparent)]
    Entry(#[from] EntryError),
}

fn parse_line(line: &str) -> Result<Entry, LineError> {
    let mut cols = line.split('\t');
    let (Some(kanji), Some(reading)) = (cols.next(), cols.next()) else {
        return Err(LineError::Columns);
    };
    let kind = match cols.next().map(str::trim) {
        None | Some("") | Some("vocab") => EntryKind::Vocab,
        Some("name") => EntryKind::Name,
        Some(other) => return Err(LineError::Kind(other.to_string())),
    };
    Ok(Entry::new(kind, kanji.trim(), reading.trim())?)
}

/// Solve every `kanji<TAB>reading[<TAB>name]` line of `input`, writing one
/// JSON object per entry to `output`. Blank lines and `#` comments are
/// ignored; malformed lines are reported on stderr and skipped.
pub fn run_batch(solver: &Solver, input: impl BufRead, mut output: impl Write) -> io::Result<BatchStats> {
    let mut stats = BatchStats::default();
    for (lineno, line) in input.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.trim().is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let entry = match parse_line(trimmed) {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("line {}: {}", lineno + 1, e);
                stats.skipped += 1;
                continue;
            }
        };
        let result = SolveOutput::collect(solver, &entry);
        stats.entries += 1;
        match result.solutions.len() {
            0 => {}
            1 => stats.solved += 1,
            _ => stats.ambiguous += 1,
        }
        serde_json::to_writer(&mut output, &result)?;
        output.write_all(b"\n")?;
    }
    output.flush()?;
    Ok(stats)
}

pub fn batch_cmd(resource_file: &str, input_file: &str, output_file: &str) {
    let solver = open_solver(resource_file);
    let input = die!(File::open(input_file), "Failed to open input file: {}");
    let output = die!(File::create(output_file), "Failed to create output file: {}");
    let stats = die!(
        run_batch(&solver, BufReader::new(input), BufWriter::new(output)),
        "Batch failed: {}"
    );
    eprintln!(
        "{} entries: {} solved, {} ambiguous, {} unsolved, {} skipped lines",
        stats.entries,
        stats.solved,
        stats.ambiguous,
        stats.entries - stats.solved - stats.ambiguous,
        stats.skipped
    );
}
