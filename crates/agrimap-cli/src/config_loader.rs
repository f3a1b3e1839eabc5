//! Configuration loading utilities for CLI commands

use agrimap_core::config::{parse_base_url, CliConfigOverrides, LayeredConfig};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "agrimap.toml";

/// Load layered configuration.
///
/// An explicit `--config` path must exist; the default file is optional.
pub fn load_config(path: Option<&Path>) -> Result<LayeredConfig> {
    let config = match path {
        Some(path) => LayeredConfig::with_defaults()
            .load_from_file(path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?,
        None => LayeredConfig::with_defaults()
            .load_from_optional_file(PathBuf::from(DEFAULT_CONFIG_FILE))
            .context("Failed to load configuration file")?,
    };

    Ok(config.load_from_env())
}

/// Load layered configuration with CLI overrides
pub fn load_config_with_overrides(
    path: Option<&Path>,
    overrides: CliConfigOverrides,
) -> Result<LayeredConfig> {
    let mut config = load_config(path)?;
    config.update_from_cli(overrides);
    Ok(config)
}

/// Overrides carried by global flags
pub fn global_overrides(base_url: Option<&str>) -> Result<CliConfigOverrides> {
    let base_url = base_url.map(parse_base_url).transpose().context("Invalid --base-url")?;
    Ok(CliConfigOverrides { base_url, ..Default::default() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrimap_core::config::ConfigSource;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_explicit_file_must_exist() {
        let err = load_config(Some(Path::new("/nonexistent/agrimap.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/agrimap.toml"));
    }

    #[test]
    fn test_cli_override_wins_over_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://file.example:5000\"").unwrap();
        writeln!(file, "reconnect_delay_secs = 9").unwrap();

        let overrides = global_overrides(Some("http://cli.example:5000/")).unwrap();
        let config = load_config_with_overrides(Some(file.path()), overrides).unwrap();

        assert_eq!(config.base_url.value, "http://cli.example:5000");
        assert_eq!(config.base_url.source, ConfigSource::Cli);
        assert_eq!(config.reconnect_delay_secs.value, 9);
    }

    #[test]
    fn test_invalid_base_url_flag() {
        assert!(global_overrides(Some("localhost:5000")).is_err());
        assert!(global_overrides(None).unwrap().base_url.is_none());
    }
}
