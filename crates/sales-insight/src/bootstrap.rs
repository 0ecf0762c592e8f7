use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.sales-insight/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing
/// parents):
/// - `~/.sales-insight/`
/// - `~/.sales-insight/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let insight_dir = home.join(".sales-insight");
    std::fs::create_dir_all(&insight_dir)?;
    std::fs::create_dir_all(insight_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` uses the CLI's uppercase level names and is mapped to a
/// [`tracing_subscriber::EnvFilter`] directive, falling back to `"info"`
/// when unrecognised.
///
/// The `log_file` parameter is accepted for forward-compatibility but file
/// logging is not yet wired – all output currently goes to stderr.
pub fn setup_logging(log_level: &str, _log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let directive = match log_level.to_uppercase().as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => return setup_with_directive(&other.to_lowercase()),
    };
    setup_with_directive(directive)
}

fn setup_with_directive(directive: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Input discovery ────────────────────────────────────────────────────────────

/// Attempt to locate a default input CSV when `--data` was not given.
///
/// Checks `data/sales_data.csv` first, then falls back to the first `.csv`
/// file (sorted by path) found under `data/`. Returns `None` when neither
/// exists.
pub fn discover_data_file() -> Option<PathBuf> {
    discover_data_file_in(Path::new("."))
}

/// Same as [`discover_data_file`] but rooted at `base_dir` (used for
/// testing).
pub fn discover_data_file_in(base_dir: &Path) -> Option<PathBuf> {
    let data_dir = base_dir.join("data");
    let preferred = data_dir.join("sales_data.csv");
    if preferred.exists() {
        return Some(preferred);
    }
    insight_data::loader::find_csv_files(&data_dir).into_iter().next()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── test_ensure_directories ───────────────────────────────────────────────

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();

        // Restore HOME.
        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        result.expect("ensure_directories should succeed");

        let insight_dir = tmp.path().join(".sales-insight");
        assert!(insight_dir.is_dir(), ".sales-insight dir must exist");
        assert!(insight_dir.join("logs").is_dir(), "logs subdir must exist");
    }

    // ── test_discover_data_file ───────────────────────────────────────────────

    #[test]
    fn test_discover_data_file_returns_none_when_absent() {
        let tmp = TempDir::new().expect("tempdir");
        assert!(discover_data_file_in(tmp.path()).is_none());
    }

    #[test]
    fn test_discover_data_file_prefers_sales_data_csv() {
        let tmp = TempDir::new().expect("tempdir");
        let data_dir = tmp.path().join("data");
        std::fs::create_dir_all(&data_dir).expect("create data dir");
        std::fs::write(data_dir.join("a.csv"), "h\n").expect("write");
        std::fs::write(data_dir.join("sales_data.csv"), "h\n").expect("write");

        let found = discover_data_file_in(tmp.path()).expect("should find a file");
        assert_eq!(found.file_name().unwrap(), "sales_data.csv");
    }

    #[test]
    fn test_discover_data_file_falls_back_to_first_csv() {
        let tmp = TempDir::new().expect("tempdir");
        let data_dir = tmp.path().join("data");
        std::fs::create_dir_all(&data_dir).expect("create data dir");
        std::fs::write(data_dir.join("b.csv"), "h\n").expect("write");
        std::fs::write(data_dir.join("a.csv"), "h\n").expect("write");

        let found = discover_data_file_in(tmp.path()).expect("should find a file");
        assert_eq!(found.file_name().unwrap(), "a.csv");
    }
}
