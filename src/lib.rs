//! Furigana engine: attach per-character readings to Japanese headwords.
//!
//! The solving core lives in `furi_core`; this crate re-exports it and owns
//! process-level setup such as trace output.

mod trace_init;

pub use furi_core::*;
pub use trace_init::{init_tracing, TRACE_FILE};
