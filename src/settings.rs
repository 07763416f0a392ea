//! Game settings and preferences
//!
//! Persisted as `key=value` lines in the user's config directory. A missing
//! file is created with defaults; a broken line never stops the game.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Viewport;
use crate::consts::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, SPACING, WALL_BUFFER};

/// Shortest screen that fits an obstacle pair with a full gap
const MIN_SCREEN_HEIGHT: u32 = (2.0 * (WALL_BUFFER + SPACING)) as u32;

/// Errors from reading or writing the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No config directory available")]
    NoConfigDir,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Display ===
    pub screen_width: u32,
    pub screen_height: u32,
    pub fullscreen: bool,
    /// Whether the display paces frames; only honored by renderers that wait for it
    pub vsync: bool,

    // === Audio ===
    pub audio_enabled: bool,
    /// Sound effects volume (0.0 - 1.0)
    pub sound_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            fullscreen: false,
            vsync: true,

            audio_enabled: true,
            sound_volume: 1.0,
            music_volume: 0.8,
        }
    }
}

impl Settings {
    /// Settings file name inside the config directory
    const FILE_NAME: &'static str = "settings.cfg";

    /// Play area derived from the screen size
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.screen_width, self.screen_height)
    }

    /// Default location: `<config dir>/openflap/settings.cfg`, or
    /// `~/.openflap/settings.cfg` where no config dir is known
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        if let Some(dir) = dirs::config_dir() {
            return Ok(dir.join("openflap").join(Self::FILE_NAME));
        }
        dirs::home_dir()
            .map(|home| home.join(".openflap").join(Self::FILE_NAME))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Parse `key=value` lines on top of the defaults
    pub fn parse(text: &str) -> Self {
        let mut settings = Self::default();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                log::warn!("settings line {}: expected key=value, got {:?}", number + 1, line);
                continue;
            };
            settings.apply(key.trim(), value.trim());
        }
        settings
    }

    /// Apply one key. Unknown keys and bad values keep the current value.
    fn apply(&mut self, key: &str, value: &str) {
        let applied = match key {
            "screen_width" => parse_dimension(value).map(|v| self.screen_width = v),
            "screen_height" => parse_dimension(value)
                .filter(|&v| v >= MIN_SCREEN_HEIGHT)
                .map(|v| self.screen_height = v),
            "fullscreen" => parse_bool(value).map(|v| self.fullscreen = v),
            "vsync" => parse_bool(value).map(|v| self.vsync = v),
            "audio_enabled" => parse_bool(value).map(|v| self.audio_enabled = v),
            "sound_volume" => parse_volume(value).map(|v| self.sound_volume = v),
            "music_volume" => parse_volume(value).map(|v| self.music_volume = v),
            _ => {
                log::warn!("Ignoring unknown setting {:?}", key);
                return;
            }
        };
        if applied.is_none() {
            log::warn!("Ignoring bad value {:?} for setting {}", value, key);
        }
    }

    /// Render as `key=value` lines
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "screen_width={}", self.screen_width);
        let _ = writeln!(out, "screen_height={}", self.screen_height);
        let _ = writeln!(out, "fullscreen={}", u8::from(self.fullscreen));
        let _ = writeln!(out, "vsync={}", u8::from(self.vsync));
        let _ = writeln!(out, "audio_enabled={}", u8::from(self.audio_enabled));
        let _ = writeln!(out, "sound_volume={}", self.sound_volume);
        let _ = writeln!(out, "music_volume={}", self.music_volume);
        out
    }

    /// Load settings from `path`
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(Self::parse(&text))
    }

    /// Save settings to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.serialize())?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Load `path`, or write and return defaults when it can't be read.
    /// Never fails: a write error is only logged.
    pub fn load_or_create(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::info!("Using default settings ({})", err);
                let settings = Self::default();
                if let Err(err) = settings.save(path) {
                    log::warn!("Could not write default settings: {}", err);
                }
                settings
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

fn parse_dimension(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|&v| v > 0)
}

fn parse_volume(value: &str) -> Option<f32> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.screen_width, 800);
        assert_eq!(settings.screen_height, 600);
        assert!(!settings.fullscreen);
        assert!(settings.vsync);
        assert!(settings.audio_enabled);
        assert_eq!(settings.sound_volume, 1.0);
        assert_eq!(settings.music_volume, 0.8);
        assert_eq!(settings.viewport(), Viewport::default());
    }

    #[test]
    fn test_parse_overrides_defaults() {
        let settings = Settings::parse(
            "screen_width=1024\nscreen_height = 768\nfullscreen=true\nvsync=0\nsound_volume=0.25\n",
        );
        assert_eq!(settings.screen_width, 1024);
        assert_eq!(settings.screen_height, 768);
        assert!(settings.fullscreen);
        assert!(!settings.vsync);
        assert_eq!(settings.sound_volume, 0.25);
        // Untouched keys keep defaults
        assert!(settings.audio_enabled);
        assert_eq!(settings.music_volume, 0.8);
    }

    #[test]
    fn test_parse_ignores_garbage() {
        let settings = Settings::parse(
            "# comment\n\nbogus_key=3\nscreen_width=wide\nvsync=maybe\nno equals sign\nscreen_height=0\n",
        );
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_volume_is_clamped() {
        let settings = Settings::parse("sound_volume=3.5\nmusic_volume=-1\n");
        assert_eq!(settings.sound_volume, 1.0);
        assert_eq!(settings.music_volume, 0.0);
    }

    #[test]
    fn test_serialize_parses_back() {
        let settings = Settings {
            screen_width: 640,
            screen_height: 480,
            fullscreen: true,
            vsync: false,
            audio_enabled: false,
            sound_volume: 0.5,
            music_volume: 0.125,
        };
        assert_eq!(Settings::parse(&settings.serialize()), settings);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.cfg");

        let settings = Settings::load_or_create(&path);
        assert_eq!(settings, Settings::default());
        assert!(path.exists());

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("screen_width=800"));
        assert!(text.contains("vsync=1"));
    }

    #[test]
    fn test_load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.cfg");
        std::fs::write(&path, "audio_enabled=0\nscreen_width=1280\n").unwrap();

        let settings = Settings::load_or_create(&path);
        assert!(!settings.audio_enabled);
        assert_eq!(settings.screen_width, 1280);
        // Existing file is left alone
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "audio_enabled=0\nscreen_width=1280\n");
    }

    #[test]
    fn test_load_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::load(&dir.path().join("absent.cfg"));
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }

    #[test]
    fn test_screen_too_short_for_a_gap_is_rejected() {
        assert_eq!(MIN_SCREEN_HEIGHT, 310);
        assert_eq!(Settings::parse("screen_height=200\n").screen_height, 600);
        assert_eq!(Settings::parse("screen_height=309\n").screen_height, 600);
        assert_eq!(Settings::parse("screen_height=310\n").screen_height, 310);
    }
}
