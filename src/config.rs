use crate::core::score::RoundingMode;
use crate::core::severity::Palette;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "cvsscalc.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub palette: Palette,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    pub json: bool,
    pub rounding: RoundingMode,
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<Config> {
    if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }

        return read_config(path);
    }

    let local_path = cwd.join(CONFIG_FILE_NAME);
    if local_path.exists() {
        return read_config(&local_path);
    }

    debug!("no {CONFIG_FILE_NAME} found, using defaults");
    Ok(Config::default())
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "refusing to overwrite existing config file: {}",
            path.display()
        );
    }

    let content = default_config_toml()?;
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("failed to serialize default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("failed parsing config file {}", path.display()))?;
    debug!(path = %path.display(), rounding = %config.general.rounding, "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let content = default_config_toml().unwrap();
        assert!(content.contains("rounding = \"calculator\""));
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let parsed: Config = toml::from_str(
            r##"
[general]
rounding = "appendix-a"

[palette]
critical = "#ff0000"
"##,
        )
        .unwrap();
        assert_eq!(parsed.general.rounding, RoundingMode::AppendixA);
        assert!(!parsed.general.json);
        assert_eq!(parsed.palette.critical, "#ff0000");
        assert_eq!(parsed.palette.low, Palette::default().low);
    }

    #[test]
    fn rejects_unknown_rounding_mode() {
        let parsed = toml::from_str::<Config>("[general]\nrounding = \"ceil\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_config(Some(&missing), dir.path()).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn discovers_config_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[general]\njson = true\n",
        )
        .unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert!(config.general.json);
        assert_eq!(config.general.rounding, RoundingMode::Calculator);
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        write_default_config(&path).unwrap();
        assert!(write_default_config(&path).is_err());
    }
}
