//! Startup configuration.
//!
//! Values are layered: compiled-in defaults, then the optional JSON file at
//! `$XDG_CONFIG_HOME/tarn/dwindle.json` (or `--config <path>`), then command
//! line flags. The result is fixed for the lifetime of the process.
//!
//! ```json
//! {
//!   "view_padding": 8,
//!   "outer_padding": 4,
//!   "horizontal_ratio": 0.55,
//!   "vertical_ratio": 0.5
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Args;
use crate::command::{MAX_RATIO, MIN_RATIO};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Gutter between adjacent views, in pixels.
    pub view_padding: u32,
    /// Margin between the views and the edge of the usable area, in pixels.
    pub outer_padding: u32,
    /// Initial horizontal split ratio of every new output.
    pub horizontal_ratio: f64,
    /// Initial vertical split ratio of every new output.
    pub vertical_ratio: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            view_padding: 6,
            outer_padding: 6,
            horizontal_ratio: 0.5,
            vertical_ratio: 0.5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{name} must be between {} and {}, got {value}", MIN_RATIO, MAX_RATIO)]
    RatioOutOfRange { name: &'static str, value: f64 },
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tarn").join("dwindle.json"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build the effective configuration for this process.
    ///
    /// An explicit `--config` path must exist. The default path is only read
    /// when present.
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let base = match &args.config {
            Some(path) => Self::load(path)?,
            None => match Self::default_path() {
                Some(path) if path.is_file() => {
                    tracing::debug!("reading config from {}", path.display());
                    Self::load(&path)?
                }
                _ => Self::default(),
            },
        };

        base.with_overrides(args).validate()
    }

    pub fn with_overrides(mut self, args: &Args) -> Self {
        if let Some(padding) = args.view_padding {
            self.view_padding = padding;
        }
        if let Some(padding) = args.outer_padding {
            self.outer_padding = padding;
        }
        if let Some(ratio) = args.horizontal_ratio {
            self.horizontal_ratio = ratio;
        }
        if let Some(ratio) = args.vertical_ratio {
            self.vertical_ratio = ratio;
        }
        self
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        check_ratio("horizontal_ratio", self.horizontal_ratio)?;
        check_ratio("vertical_ratio", self.vertical_ratio)?;
        Ok(self)
    }
}

fn check_ratio(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (MIN_RATIO..=MAX_RATIO).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RatioOutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(flags: &[&str]) -> Args {
        argh::FromArgs::from_args(&["tarn-dwindle"], flags).unwrap()
    }

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.view_padding, 6);
        assert_eq!(config.outer_padding, 6);
        assert_eq!(config.horizontal_ratio, 0.5);
        assert_eq!(config.vertical_ratio, 0.5);
    }

    #[test]
    fn test_partial_file() {
        let file = config_file(r#"{ "outer_padding": 0, "vertical_ratio": 0.7 }"#);
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.outer_padding, 0);
        assert_eq!(config.vertical_ratio, 0.7);
        assert_eq!(config.view_padding, 6);
        assert_eq!(config.horizontal_ratio, 0.5);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let file = config_file(r#"{ "main_ratio": 0.5 }"#);
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_flags_override_file() {
        let file = config_file(r#"{ "view_padding": 20, "horizontal_ratio": 0.3 }"#);
        let path = file.path().to_str().unwrap();
        let config =
            Config::resolve(&args(&["--config", path, "--horizontal-ratio", "0.6"])).unwrap();

        assert_eq!(config.view_padding, 20);
        assert_eq!(config.horizontal_ratio, 0.6);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let result = Config::resolve(&args(&["--config", path.to_str().unwrap()]));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_out_of_range_ratio_in_file() {
        let file = config_file(r#"{ "vertical_ratio": 0.95 }"#);
        let path = file.path().to_str().unwrap();
        let result = Config::resolve(&args(&["--config", path]));

        assert!(matches!(
            result,
            Err(ConfigError::RatioOutOfRange {
                name: "vertical_ratio",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_bounds_are_inclusive() {
        let config = Config {
            horizontal_ratio: 0.1,
            vertical_ratio: 0.9,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
