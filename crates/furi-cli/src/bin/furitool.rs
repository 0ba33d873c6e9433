use std::path::PathBuf;

use clap::{Parser, Subcommand};

use furi_cli::commands::{accuracy_ops, batch_ops, config_ops, solve_ops};

#[derive(Parser)]
#[command(name = "furitool", about = "Furigana solver diagnostics")]
struct Cli {
    /// Directory for JSON trace output (requires the `trace` feature)
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,

    /// Solver settings TOML replacing the built-in defaults
    #[arg(long, global = true)]
    settings: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a single entry and print every solution
    Solve {
        /// Path to the resource TOML file
        resource_file: String,
        /// Kanji form of the entry
        kanji: String,
        /// Reading of the entry (hiragana or katakana)
        reading: String,
        /// Treat the entry as a name (enables name readings)
        #[arg(long)]
        name: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Solve entries from a TSV file and write results to JSONL
    Batch {
        /// Path to the resource TOML file
        resource_file: String,
        /// Input file, one `kanji<TAB>reading[<TAB>name]` per line
        input_file: String,
        /// Path to the output JSONL file
        output_file: String,
    },

    /// Run solver accuracy tests from a TOML corpus
    Accuracy {
        /// Path to the resource TOML file
        resource_file: String,
        /// Path to the accuracy corpus TOML file
        corpus_file: String,
        /// Only run cases in this category
        #[arg(long)]
        category: Option<String>,
        /// Show passing cases too (default: only failures and skips)
        #[arg(long)]
        verbose: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the built-in settings TOML
    SettingsExport,

    /// Validate a settings TOML file
    SettingsValidate {
        /// Path to the settings TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(dir) = &cli.trace_dir {
        if let Err(e) = furigana_engine::init_tracing(dir) {
            eprintln!("Failed to set up tracing in {}: {}", dir.display(), e);
            std::process::exit(1);
        }
    }
    if let Some(path) = &cli.settings {
        let content = std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Failed to read settings file {}: {}", path, e);
            std::process::exit(1);
        });
        if let Err(e) = furigana_engine::settings::init_custom(content) {
            eprintln!("Invalid settings in {}: {}", path, e);
            std::process::exit(1);
        }
    }

    match cli.command {
        Command::Solve {
            resource_file,
            kanji,
            reading,
            name,
            json,
        } => solve_ops::solve_cmd(&resource_file, &kanji, &reading, name, json),

        Command::Batch {
            resource_file,
            input_file,
            output_file,
        } => batch_ops::batch_cmd(&resource_file, &input_file, &output_file),

        Command::Accuracy {
            resource_file,
            corpus_file,
            category,
            verbose,
            json,
        } => accuracy_ops::accuracy_cmd(
            &resource_file,
            &corpus_file,
            category.as_deref(),
            verbose,
            json,
        ),

        Command::SettingsExport => config_ops::settings_export(),

        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
