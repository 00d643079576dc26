//! Raspberry Pi pins for the button and the status LED.

use log::info;
use rppal::gpio::{Gpio, InputPin, OutputPin};

use crate::config::Pull;
use crate::error::StartupError;
use crate::input::LevelSource;

/// Idle/playing indicator.
pub trait StatusLed {
    fn set(&mut self, on: bool);
}

pub struct ButtonPin(InputPin);

impl LevelSource for ButtonPin {
    fn is_high(&mut self) -> bool {
        self.0.is_high()
    }
}

/// Active-high LED. Keeps its level when the process exits.
pub struct LedPin(OutputPin);

impl StatusLed for LedPin {
    fn set(&mut self, on: bool) {
        if on {
            self.0.set_high();
        } else {
            self.0.set_low();
        }
    }
}

/// Claim both pins (BCM numbering).
pub fn open_pins(button: u8, led: u8, pull: Pull) -> Result<(ButtonPin, LedPin), StartupError> {
    let gpio = Gpio::new().map_err(|e| StartupError::Gpio(e.to_string()))?;

    let pin = gpio
        .get(button)
        .map_err(|e| StartupError::Gpio(format!("button pin {button}: {e}")))?;
    let mut input = match pull {
        Pull::Up => pin.into_input_pullup(),
        Pull::Down => pin.into_input_pulldown(),
        Pull::Off => pin.into_input(),
    };
    input.set_reset_on_drop(false);

    let mut output = gpio
        .get(led)
        .map_err(|e| StartupError::Gpio(format!("led pin {led}: {e}")))?
        .into_output();
    output.set_reset_on_drop(false);

    info!("GPIO ready: button={button} ({pull:?}) led={led}");
    Ok((ButtonPin(input), LedPin(output)))
}
