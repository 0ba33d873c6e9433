use std::io;
use std::path::{Path, PathBuf};

/// File the JSON trace is written to, inside the trace directory.
pub const TRACE_FILE: &str = "furigana-trace.jsonl";

#[cfg(feature = "trace")]
const DEFAULT_FILTER: &str = "furi_core=debug";

#[cfg(feature = "trace")]
static INIT: std::sync::Once = std::sync::Once::new();

/// Send solver spans and events to `log_dir/furigana-trace.jsonl` as JSON
/// lines, creating `log_dir` if needed. `RUST_LOG` overrides the default
/// filter. Only the first call installs the subscriber; later calls just
/// return the path.
///
/// Without the `trace` feature nothing is recorded and the directory is left
/// alone.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> io::Result<PathBuf> {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    std::fs::create_dir_all(log_dir)?;
    INIT.call_once(|| {
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, TRACE_FILE));
        // Solves run until process exit; the writer must outlive main.
        std::mem::forget(guard);

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        tracing_subscriber::fmt()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_env_filter(filter)
            .init();
    });
    Ok(log_dir.join(TRACE_FILE))
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(log_dir: &Path) -> io::Result<PathBuf> {
    Ok(log_dir.join(TRACE_FILE))
}
