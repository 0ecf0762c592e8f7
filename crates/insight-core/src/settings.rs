use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Sales CSV analysis and chart generation
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sales-insight",
    about = "Sales CSV analysis and chart generation",
    version
)]
pub struct Settings {
    /// Input CSV file (auto-discovered under ./data when omitted)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Directory where chart images are written
    #[arg(long, default_value = "output")]
    pub output: PathBuf,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.sales-insight/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".sales-insight").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());

        // Parse into the typed struct using the same args.
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            return Self::apply_debug_override(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // Merge last-used values for fields that were NOT explicitly set on
        // the command line (CLI always wins). The input path is never loaded
        // from last-used.
        if !is_arg_explicitly_set(&matches, "output") {
            if let Some(v) = last.output {
                settings.output = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "log_level") {
            if let Some(v) = last.log_level {
                settings.log_level = v;
            }
        }

        settings = Self::apply_debug_override(settings);

        // Persist current settings for next run.
        let params = LastUsedParams::from(&settings);
        let _ = params.save_to(config_path);

        settings
    }

    /// `--debug` overrides the configured log level.
    fn apply_debug_override(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            output: Some(s.output.clone()),
            log_level: Some(s.log_level.clone()),
        }
    }
}

// ── Helper: check if an arg was explicitly set on the command line ─────────────

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tmp_config_path(tmp: &TempDir) -> PathBuf {
        LastUsedParams::config_path_in(tmp.path())
    }

    // ── LastUsedParams persistence ────────────────────────────────────────────

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        let params = LastUsedParams {
            output: Some(PathBuf::from("charts")),
            log_level: Some("DEBUG".to_string()),
        };

        params.save_to(&path).expect("save");
        let loaded = LastUsedParams::load_from(&path);

        assert_eq!(loaded.output, Some(PathBuf::from("charts")));
        assert_eq!(loaded.log_level, Some("DEBUG".to_string()));
    }

    #[test]
    fn test_last_used_params_default_when_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let loaded = LastUsedParams::load_from(&tmp_config_path(&tmp));
        assert!(loaded.output.is_none());
        assert!(loaded.log_level.is_none());
    }

    #[test]
    fn test_last_used_params_clear() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            output: Some(PathBuf::from("out")),
            ..Default::default()
        };
        params.save_to(&path).expect("save");
        assert!(path.exists(), "file must exist after save");

        LastUsedParams::clear_at(&path).expect("clear");
        assert!(!path.exists(), "file must be gone after clear");
    }

    // ── Settings defaults and parsing ─────────────────────────────────────────

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["sales-insight"]);

        assert!(settings.data.is_none());
        assert_eq!(settings.output, PathBuf::from("output"));
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
        assert!(!settings.clear);
    }

    #[test]
    fn test_settings_cli_data_flag() {
        let settings = Settings::parse_from(["sales-insight", "--data", "data/orders.csv"]);
        assert_eq!(settings.data, Some(PathBuf::from("data/orders.csv")));
    }

    // ── load_with_last_used ───────────────────────────────────────────────────

    #[test]
    fn test_load_with_last_used_merges_persisted_output() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            output: Some(PathBuf::from("charts")),
            ..Default::default()
        };
        params.save_to(&config_path).expect("save");

        let settings =
            Settings::load_with_last_used_impl(vec!["sales-insight".into()], &config_path);
        assert_eq!(settings.output, PathBuf::from("charts"));
    }

    #[test]
    fn test_load_with_last_used_cli_overrides_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            output: Some(PathBuf::from("charts")),
            ..Default::default()
        };
        params.save_to(&config_path).expect("save");

        let settings = Settings::load_with_last_used_impl(
            vec!["sales-insight".into(), "--output".into(), "plots".into()],
            &config_path,
        );
        assert_eq!(settings.output, PathBuf::from("plots"));
    }

    #[test]
    fn test_load_with_last_used_clear_removes_file() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            log_level: Some("ERROR".to_string()),
            ..Default::default()
        };
        params.save_to(&config_path).expect("save");
        assert!(config_path.exists(), "file must exist before clear");

        Settings::load_with_last_used_impl(
            vec!["sales-insight".into(), "--clear".into()],
            &config_path,
        );

        assert!(!config_path.exists(), "file must be gone after --clear");
    }

    #[test]
    fn test_load_with_last_used_debug_overrides_log_level() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let settings = Settings::load_with_last_used_impl(
            vec!["sales-insight".into(), "--debug".into()],
            &config_path,
        );
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_load_with_last_used_persists_after_run() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        Settings::load_with_last_used_impl(
            vec!["sales-insight".into(), "--output".into(), "charts".into()],
            &config_path,
        );

        assert!(
            config_path.exists(),
            "config file must be persisted after run"
        );
        let loaded = LastUsedParams::load_from(&config_path);
        assert_eq!(loaded.output, Some(PathBuf::from("charts")));
    }
}
