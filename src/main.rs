//! soundbutton: plays the next clip from a music directory on every button toggle
//! and signals a serial light controller when playback starts and stops.

use std::path::PathBuf;

use log::{debug, error, info};

use soundbutton::config::{Config, SerialConfig};
use soundbutton::controller::Controller;
use soundbutton::error::StartupError;
use soundbutton::gpio;
use soundbutton::link::{NullLink, PeripheralLink, SerialLink, SerialOpener};
use soundbutton::player::AplayPlayer;
use soundbutton::playlist;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match Config::find_and_load(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config) {
        let mut message = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(inner) = source {
            message.push_str(&format!(": {inner}"));
            source = inner.source();
        }
        error!("{message}");
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), StartupError> {
    info!("Music directory: {}", config.music_dir.display());
    let playlist = playlist::list_clips(&config.music_dir, &config.extension)?;
    info!("{} clips available", playlist.len());
    for clip in playlist.clips() {
        debug!("  {}", clip.display());
    }

    let link = open_link(&config.serial)?;
    let (button, led) = gpio::open_pins(config.button_pin, config.led_pin, config.button_pull)?;
    let player = AplayPlayer::new(config.player.clone());

    let mut controller = Controller::new(button, led, link, player, playlist);
    controller.run(config.poll_interval())
}

fn open_link(serial: &SerialConfig) -> Result<Box<dyn PeripheralLink>, StartupError> {
    if !serial.enabled {
        info!("Serial link disabled");
        return Ok(Box::new(NullLink));
    }

    let opener = SerialOpener::new(serial.baud, serial.timeout());
    match SerialLink::connect(opener, serial.candidates.clone()) {
        Ok(link) => Ok(Box::new(link)),
        Err(e) if serial.required => Err(StartupError::PeripheralUnreachable(e)),
        Err(e) => {
            info!("Light controller not reachable ({e}), will retry on first cue");
            let opener = SerialOpener::new(serial.baud, serial.timeout());
            Ok(Box::new(SerialLink::disconnected(opener, serial.candidates.clone())))
        }
    }
}
