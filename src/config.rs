use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use llmcost::ModelCost;
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) json: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) strict: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
    /// Extra or replacement prices, keyed by model name or prefix
    #[serde(default)]
    pub(crate) prices: HashMap<String, ModelCost>,
}

/// A config plus what happened while finding it. Messages are held back
/// until the config's own `json`/`debug` flags are merged into the CLI.
#[derive(Debug, Default)]
pub(crate) struct LoadedConfig {
    pub(crate) config: Config,
    pub(crate) path: Option<PathBuf>,
    pub(crate) warnings: Vec<String>,
}

impl LoadedConfig {
    pub(crate) fn report(&self, quiet: bool) {
        if quiet {
            return;
        }
        for warning in &self.warnings {
            eprintln!("Warning: {warning}");
        }
        if let Some(path) = &self.path {
            eprintln!("Loaded config from {}", path.display());
        }
    }
}

impl Config {
    /// Load config. An explicit path must exist and parse; otherwise the
    /// default locations are tried in order and unreadable files are skipped
    /// with a warning.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<LoadedConfig, AppError> {
        if let Some(path) = explicit {
            return Ok(LoadedConfig {
                config: Self::read(path)?,
                path: Some(path.to_path_buf()),
                warnings: Vec::new(),
            });
        }
        Ok(Self::load_first(Self::get_config_paths()))
    }

    fn load_first(paths: Vec<PathBuf>) -> LoadedConfig {
        let mut warnings = Vec::new();
        for path in paths {
            if !path.exists() {
                continue;
            }
            match Self::read(&path) {
                Ok(config) => {
                    return LoadedConfig {
                        config,
                        path: Some(path),
                        warnings,
                    };
                }
                Err(e) => warnings.push(e.to_string()),
            }
        }
        LoadedConfig {
            warnings,
            ..LoadedConfig::default()
        }
    }

    fn read(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // ~/.config/llmcost/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("llmcost").join("config.toml"));
        }

        // Platform config dir (e.g. ~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("llmcost").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // ~/.llmcost.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".llmcost.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn config_paths_not_empty() {
        assert!(!Config::get_config_paths().is_empty());
    }

    #[test]
    fn empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert!(!config.strict);
        assert!(config.prices.is_empty());
        assert!(config.color.is_none());
    }

    #[test]
    fn parses_flags_and_prices() {
        let config = Config::parse(
            r#"
strict = true
color = "never"
locale = "de"

[prices]
"my-embedder" = 0.00000002
"llama-3-70b" = { prompt = 0.0000006, completion = 0.0000008 }
"#,
        )
        .unwrap();

        assert!(config.strict);
        assert_eq!(config.color, Some(ConfigColorMode::Never));
        assert_eq!(config.locale.as_deref(), Some("de"));
        assert_eq!(
            config.prices.get("my-embedder"),
            Some(&ModelCost::PerUnit(0.00000002))
        );
        assert!(config.prices["llama-3-70b"].is_completion());
    }

    #[test]
    fn rejects_malformed_price() {
        let result = Config::parse(
            r#"
[prices]
"broken" = "free"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn explicit_path_must_parse() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "strict = \"yes\"").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, AppError::ConfigParse { .. }));
    }

    #[test]
    fn explicit_path_missing_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
    }

    #[test]
    fn explicit_path_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debug = true").unwrap();
        let loaded = Config::load(Some(file.path())).unwrap();
        assert!(loaded.config.debug);
        assert_eq!(loaded.path.as_deref(), Some(file.path()));
    }

    #[test]
    fn broken_default_is_skipped_with_a_held_warning() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&broken, "json = [").unwrap();
        std::fs::write(&good, "json = true").unwrap();

        let loaded = Config::load_first(vec![dir.path().join("absent.toml"), broken, good.clone()]);
        assert!(loaded.config.json);
        assert_eq!(loaded.path, Some(good));
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("broken.toml"));
    }

    #[test]
    fn no_default_config_found() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_first(vec![dir.path().join("absent.toml")]);
        assert!(loaded.path.is_none());
        assert!(loaded.warnings.is_empty());
        assert!(!loaded.config.json);
    }
}
