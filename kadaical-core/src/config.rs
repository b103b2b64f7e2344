//! Feed configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{FeedError, FeedResult};

fn default_schedule_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("kadaical").join("schedules"))
        .unwrap_or_else(|| PathBuf::from("schedules"))
}

/// Configuration at ~/.config/kadaical/config.toml
///
/// Everything has a default, so a missing file is not an error.
#[derive(Deserialize, Clone)]
pub struct FeedConfig {
    /// Directory holding one `<year>.csv` per academic year.
    #[serde(default = "default_schedule_dir")]
    pub schedule_dir: PathBuf,

    /// Port the feed server listens on, when one is run.
    pub port: Option<u16>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            schedule_dir: default_schedule_dir(),
            port: None,
        }
    }
}

impl FeedConfig {
    pub fn config_path() -> FeedResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FeedError::Config("Could not determine config directory".into()))?
            .join("kadaical");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when absent.
    pub fn load() -> FeedResult<FeedConfig> {
        let path = Self::config_path()?;
        if !path.is_file() {
            return Ok(FeedConfig::default());
        }
        let contents = std::fs::read_to_string(&path)?;
        toml::from_str(&contents)
            .map_err(|e| FeedError::Config(format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: FeedConfig = toml::from_str("").unwrap();
        assert_eq!(config.schedule_dir, default_schedule_dir());
        assert_eq!(config.port, None);
    }

    #[test]
    fn explicit_values_are_honored() {
        let config: FeedConfig =
            toml::from_str("schedule_dir = \"/srv/schedules\"\nport = 8080\n").unwrap();
        assert_eq!(config.schedule_dir, PathBuf::from("/srv/schedules"));
        assert_eq!(config.port, Some(8080));
    }
}
