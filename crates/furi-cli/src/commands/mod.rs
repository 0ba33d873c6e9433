use std::path::Path;
use std::process;
use std::sync::Arc;

use furigana_engine::Solver;

use crate::resource_source::load_cache;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod accuracy_ops;
pub mod batch_ops;
pub mod config_ops;
pub mod solve_ops;

/// Load a resource file into a solver, or exit.
pub(crate) fn open_solver(resource_file: &str) -> Solver {
    let cache = load_cache(Path::new(resource_file)).unwrap_or_else(|e| {
        eprintln!("Failed to load resources from {}: {}", resource_file, e);
        process::exit(1);
    });
    Solver::new(Arc::new(cache))
}
