//! TOML configuration for the button player.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// BCM pin number of the push-button input.
    #[serde(default = "default_button_pin")]
    pub button_pin: u8,
    /// BCM pin number of the status LED (active-high).
    #[serde(default = "default_led_pin")]
    pub led_pin: u8,
    #[serde(default)]
    pub button_pull: Pull,
    #[serde(default = "default_music_dir")]
    pub music_dir: PathBuf,
    /// File suffix (without the dot) a clip must carry.
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub serial: SerialConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

/// Internal pull resistor for the button input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pull {
    Up,
    Down,
    #[default]
    Off,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SerialConfig {
    /// `false` replaces the serial link with a no-op.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Exit at startup when no candidate opens.
    #[serde(default)]
    pub required: bool,
    /// Device paths tried in order.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,
    #[serde(default = "default_baud")]
    pub baud: u32,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            enabled: true,
            required: false,
            candidates: default_candidates(),
            baud: default_baud(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_program")]
    pub program: String,
    /// Playback buffer in microseconds, 0 leaves the player default.
    #[serde(default = "default_buffer_time_us")]
    pub buffer_time_us: u32,
    /// Delay before the device starts, in microseconds. 0 leaves the player default.
    #[serde(default)]
    pub start_delay_us: u32,
    #[serde(default = "default_extra_args")]
    pub extra_args: Vec<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            program: default_program(),
            buffer_time_us: default_buffer_time_us(),
            start_delay_us: 0,
            extra_args: default_extra_args(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            button_pin: default_button_pin(),
            led_pin: default_led_pin(),
            button_pull: Pull::default(),
            music_dir: default_music_dir(),
            extension: default_extension(),
            poll_interval_ms: default_poll_interval_ms(),
            serial: SerialConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("read {}: {e}", path.display()))?;
        toml::from_str(&content).map_err(|e| format!("parse {}: {e}", path.display()))
    }

    /// Load config with fallback chain:
    /// 1. explicit path (first CLI argument)
    /// 2. $SOUNDBUTTON_CONFIG env var
    /// 3. /etc/soundbutton/config.toml
    /// 4. ./soundbutton.toml
    /// 5. Built-in defaults
    ///
    /// A path named by 1 or 2 must exist and parse; only 3 and 4 fall through silently.
    pub fn find_and_load(explicit: Option<&Path>) -> Result<Self, String> {
        let explicit = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("SOUNDBUTTON_CONFIG").ok().map(PathBuf::from));
        let implicit = [
            PathBuf::from("/etc/soundbutton/config.toml"),
            PathBuf::from("soundbutton.toml"),
        ];

        match explicit {
            Some(path) => {
                let config = Self::load(&path)?;
                info!("Loaded config from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::load_first(&implicit)),
        }
    }

    fn load_first(candidates: &[PathBuf]) -> Self {
        for path in candidates {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        info!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => warn!("Failed to load {}: {e}", path.display()),
                }
            }
        }

        info!("Using built-in default config");
        Config::default()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl SerialConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_true() -> bool { true }
fn default_button_pin() -> u8 { 22 }
fn default_led_pin() -> u8 { 27 }
fn default_music_dir() -> PathBuf { PathBuf::from("../music") }
fn default_extension() -> String { "wav".into() }
fn default_poll_interval_ms() -> u64 { 100 }
fn default_candidates() -> Vec<String> { vec!["/dev/ttyUSB0".into(), "/dev/ttyUSB1".into()] }
fn default_baud() -> u32 { 115_200 }
fn default_timeout_ms() -> u64 { 500 }
fn default_program() -> String { "aplay".into() }
fn default_buffer_time_us() -> u32 { 100_000 }
fn default_extra_args() -> Vec<String> { vec!["-q".into()] }
