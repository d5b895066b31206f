use std::path::PathBuf;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub display: Display,
}
impl Config {
    pub const FILENAME: &str = "trackline.toml";

    pub fn load() -> anyhow::Result<Self> {
        match std::fs::read_to_string(Self::FILENAME) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", Self::FILENAME)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config file found, using default config");
                Ok(Config::default())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", Self::FILENAME)),
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        std::fs::write(Self::FILENAME, toml::to_string(self)?)
            .with_context(|| format!("Failed to write {}", Self::FILENAME))?;
        tracing::info!("saved config to {}", Self::FILENAME);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct General {
    /// Used when `RUST_LOG` isn't set.
    pub log_filter: String,
    /// The playlist to open when none is given on the command line.
    pub playlist: Option<PathBuf>,
}
impl Default for General {
    fn default() -> Self {
        Self {
            log_filter: "trackline=info".to_string(),
            playlist: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Display {
    pub show_header: bool,
    /// Marker printed beside the now-playing row.
    pub playing_marker: String,
}
impl Default for Display {
    fn default() -> Self {
        Self {
            show_header: true,
            playing_marker: ">".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [general]
            playlist = "mix.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.general.playlist, Some(PathBuf::from("mix.json")));
        assert_eq!(config.general.log_filter, "trackline=info");
        assert_eq!(config.display, Display::default());
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(toml::from_str::<Config>("").unwrap(), Config::default());
    }
}
