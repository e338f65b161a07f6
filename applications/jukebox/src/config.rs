/// Jukebox configuration
use crate::error::{AppError, Result};
use jukebox_library::ScanConfig;
use jukebox_playback::EngineConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File picked up from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "jukebox.toml";

/// Environment variable prefix (`JUKEBOX__PLAYBACK__FADE_DURATION_MS=...`)
pub const ENV_PREFIX: &str = "JUKEBOX";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JukeboxConfig {
    #[serde(default)]
    pub library: ScanConfig,

    #[serde(default)]
    pub playback: PlaybackSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_fade_duration_ms")]
    pub fade_duration_ms: u64,

    #[serde(default = "default_fade_tick_ms")]
    pub fade_tick_ms: u64,

    #[serde(default = "default_progress_tick_ms")]
    pub progress_tick_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl JukeboxConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (JUKEBOX__SECTION__KEY)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("library.extensions")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.library.extensions.is_empty() {
            return Err(AppError::Config(
                "library.extensions must list at least one extension".to_string(),
            ));
        }

        if self.playback.fade_tick_ms == 0 {
            return Err(AppError::Config(
                "playback.fade_tick_ms must be greater than zero".to_string(),
            ));
        }

        if self.playback.progress_tick_ms == 0 {
            return Err(AppError::Config(
                "playback.progress_tick_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Engine timing derived from the playback section
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            fade_duration: Duration::from_millis(self.playback.fade_duration_ms),
            fade_tick: Duration::from_millis(self.playback.fade_tick_ms),
            progress_tick: Duration::from_millis(self.playback.progress_tick_ms),
        }
    }
}

// Default values
fn default_fade_duration_ms() -> u64 {
    2000
}

fn default_fade_tick_ms() -> u64 {
    50
}

fn default_progress_tick_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "jukebox=info".to_string()
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            fade_duration_ms: default_fade_duration_ms(),
            fade_tick_ms: default_fade_tick_ms(),
            progress_tick_ms: default_progress_tick_ms(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
