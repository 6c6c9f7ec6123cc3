/// Runtime configuration loaded from a TOML file (`space_dodger.toml` by
/// default).
///
/// Every field has a default, so a file only needs the keys it changes and a
/// missing file is the same as an empty one. Gameplay rules are not in here;
/// they are fixed in [`crate::constants`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::Deserialize;

use crate::driver::Cadence;
use crate::error::GameResult;
use crate::session::SessionOptions;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub timing: TimingConfig,
    pub display: DisplayConfig,
    pub audio: AudioConfig,
    pub storage: StorageConfig,
    pub log_file: Option<PathBuf>,
    pub seed: Option<u64>,
}

/// Timer intervals in milliseconds.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub frame_ms: u64,
    pub stars_ms: u64,
    pub asteroids_ms: u64,
    pub fuel_tanks_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            frame_ms: 33,
            stars_ms: 200,
            asteroids_ms: 100,
            fuel_tanks_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Pixels covered by one terminal cell.
    pub cell_width: f64,
    pub cell_height: f64,
    pub draw_stars: bool,
    pub ship_width: f64,
    pub ship_height: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            cell_width: 10.0,
            cell_height: 20.0,
            draw_stars: true,
            ship_width: 60.0,
            ship_height: 40.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub sound_on_start: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Score file location; `None` uses `$HOME/.space_dodger_score`.
    pub high_score_file: Option<PathBuf>,
    /// When false the game runs without a high score.
    pub persist: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            high_score_file: None,
            persist: true,
        }
    }
}

impl GameConfig {
    pub fn from_toml(text: &str) -> GameResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load `path`, or the defaults if it does not exist.
    pub fn load(path: &Path) -> GameResult<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                info!("loaded config from {}", path.display());
                Self::from_toml(&text)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn cadence(&self) -> Cadence {
        Cadence {
            frame: Duration::from_millis(self.timing.frame_ms),
            stars: Duration::from_millis(self.timing.stars_ms),
            asteroids: Duration::from_millis(self.timing.asteroids_ms),
            fuel_tanks: Duration::from_millis(self.timing.fuel_tanks_ms),
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            ship_width: self.display.ship_width,
            ship_height: self.display.ship_height,
            draw_stars: self.display.draw_stars,
            sound_enabled: self.audio.sound_on_start,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.cadence(), Cadence::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = GameConfig::from_toml(
            r#"
            seed = 7

            [timing]
            stars_ms = 250

            [storage]
            persist = false
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.timing.stars_ms, 250);
        assert_eq!(config.timing.asteroids_ms, 100);
        assert!(!config.storage.persist);
        assert!(config.display.draw_stars);
        assert_eq!(config.session_options().seed, Some(7));
    }

    #[test]
    fn bad_types_are_rejected() {
        assert!(GameConfig::from_toml("[timing]\nframe_ms = \"fast\"").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = GameConfig::load(Path::new("/nonexistent/space_dodger.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
