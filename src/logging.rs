//! Tracing subscriber setup.
//!
//! CLI commands log to stderr. The board UI logs to a file instead, since
//! ratatui owns the terminal while it runs. `RUST_LOG` overrides the
//! configured level in both cases.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Log to stderr at `level`.
pub fn init_stderr(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(level))
        .with_target(false)
        .try_init();
}

/// Log to `path` at `level`.
///
/// Returns a guard that flushes buffered entries when dropped; hold it until
/// the UI exits. Returns `None` if `path` has no usable parent or file name.
pub fn init_file(level: &str, path: &Path) -> Option<WorkerGuard> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file_name = path.file_name()?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(env_filter(level))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_filter_matches_event_targets() {
        // Event targets are module paths, which start with the binary name.
        assert!(module_path!().starts_with("board::"));
        let filter: EnvFilter = "board=debug".parse().unwrap();
        assert_eq!(filter.to_string(), "board=debug");
    }
}
