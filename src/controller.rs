//! Playback state machine: one toggle, one clip, played to the end.
//!
//! The controller owns every collaborator (button, LED, light link, player, playlist)
//! and runs on a single thread. Playback blocks, so toggles that happen while a clip
//! is playing are dropped rather than queued.

use std::path::PathBuf;
use std::time::Duration;

use log::{info, warn};

use crate::error::{LinkError, PlayerError};
use crate::gpio::StatusLed;
use crate::input::{LevelSource, ToggleMonitor};
use crate::link::PeripheralLink;
use crate::player::AudioSink;
use crate::playlist::Playlist;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Playing,
}

/// Outcome of one playback. Failures here never stop the loop.
#[derive(Debug)]
pub struct PlaybackReport {
    pub index: usize,
    pub clip: PathBuf,
    pub start: Result<(), LinkError>,
    pub playback: Result<(), PlayerError>,
    pub stop: Result<(), LinkError>,
}

pub struct Controller<S, L, K, A>
where
    S: LevelSource,
    L: StatusLed,
    K: PeripheralLink,
    A: AudioSink,
{
    monitor: ToggleMonitor<S>,
    led: L,
    link: K,
    sink: A,
    playlist: Playlist,
    state: State,
}

impl<S, L, K, A> Controller<S, L, K, A>
where
    S: LevelSource,
    L: StatusLed,
    K: PeripheralLink,
    A: AudioSink,
{
    /// Starts idle at the first clip with the LED on.
    pub fn new(button: S, mut led: L, link: K, sink: A, playlist: Playlist) -> Self {
        led.set(true);
        Controller {
            monitor: ToggleMonitor::new(button),
            led,
            link,
            sink,
            playlist,
            state: State::Idle,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Sample the button once; play the current clip on a toggle.
    pub fn tick(&mut self) -> Option<PlaybackReport> {
        if self.monitor.poll() {
            Some(self.play_current())
        } else {
            None
        }
    }

    /// Idle -> Playing -> Idle for the clip under the cursor, then advance.
    pub fn play_current(&mut self) -> PlaybackReport {
        let index = self.playlist.cursor();
        let clip = self.playlist.current().to_path_buf();

        self.state = State::Playing;
        self.led.set(false);

        let start = self.link.notify_start();
        if let Err(e) = &start {
            warn!("Light start cue lost: {e}");
        }

        info!("Playing {}", clip.display());
        let playback = self.sink.play(&clip);
        if let Err(e) = &playback {
            warn!("Playback failed: {e}");
        }

        let stop = self.link.notify_stop();
        if let Err(e) = &stop {
            warn!("Light stop cue lost: {e}");
        }

        self.led.set(true);
        self.playlist.advance();
        self.monitor.resync();
        self.state = State::Idle;

        PlaybackReport { index, clip, start, playback, stop }
    }

    /// Poll forever at `interval`. Only process termination ends the loop.
    pub fn run(&mut self, interval: Duration) -> ! {
        info!("Press button to play next clip");
        loop {
            self.tick();
            if !interval.is_zero() {
                std::thread::sleep(interval);
            }
        }
    }
}
