//! Clip playback through an external player (aplay on ALSA systems).

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use log::debug;

use crate::config::PlayerConfig;
use crate::error::PlayerError;

/// Plays one clip to completion.
pub trait AudioSink {
    fn play(&mut self, clip: &Path) -> Result<(), PlayerError>;
}

/// Runs the configured player program and waits for it.
pub struct AplayPlayer {
    config: PlayerConfig,
}

impl AplayPlayer {
    pub fn new(config: PlayerConfig) -> Self {
        AplayPlayer { config }
    }

    fn args(&self, clip: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.config.extra_args.iter().map(OsString::from).collect();
        if self.config.buffer_time_us > 0 {
            args.push(format!("--buffer-time={}", self.config.buffer_time_us).into());
        }
        if self.config.start_delay_us > 0 {
            args.push(format!("--start-delay={}", self.config.start_delay_us).into());
        }
        args.push(clip.as_os_str().to_owned());
        args
    }
}

impl AudioSink for AplayPlayer {
    fn play(&mut self, clip: &Path) -> Result<(), PlayerError> {
        let args = self.args(clip);
        debug!("Running {} {:?}", self.config.program, args);
        let status = Command::new(&self.config.program)
            .args(&args)
            .status()
            .map_err(|cause| PlayerError::Spawn { program: self.config.program.clone(), cause })?;
        if !status.success() {
            return Err(PlayerError::Exit { clip: clip.to_path_buf(), status });
        }
        Ok(())
    }
}
