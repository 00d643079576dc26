//! Serial link to the light controller.
//!
//! The controller listens for single raw bytes: [`START`] switches it from the idle
//! animation to the show, [`STOP`] switches it back. Nothing is read back.

use std::io::Write;
use std::time::Duration;

use log::{debug, info, warn};
use serialport::SerialPort;

use crate::error::LinkError;

pub const START: u8 = 1;
pub const STOP: u8 = 0;

/// Start/stop cues for the auxiliary device.
pub trait PeripheralLink {
    fn notify_start(&mut self) -> Result<(), LinkError>;
    fn notify_stop(&mut self) -> Result<(), LinkError>;
}

impl<L: PeripheralLink + ?Sized> PeripheralLink for Box<L> {
    fn notify_start(&mut self) -> Result<(), LinkError> {
        (**self).notify_start()
    }

    fn notify_stop(&mut self) -> Result<(), LinkError> {
        (**self).notify_stop()
    }
}

/// Stand-in for setups without a light controller.
#[derive(Debug, Default)]
pub struct NullLink;

impl PeripheralLink for NullLink {
    fn notify_start(&mut self) -> Result<(), LinkError> {
        Ok(())
    }

    fn notify_stop(&mut self) -> Result<(), LinkError> {
        Ok(())
    }
}

/// Opens a writable port for a device path.
pub trait PortOpener {
    type Port: Write;

    fn open(&self, path: &str) -> Result<Self::Port, LinkError>;
}

/// Opens real serial devices at a fixed baud rate.
pub struct SerialOpener {
    baud: u32,
    timeout: Duration,
}

impl SerialOpener {
    pub fn new(baud: u32, timeout: Duration) -> Self {
        SerialOpener { baud, timeout }
    }
}

impl PortOpener for SerialOpener {
    type Port = Box<dyn SerialPort>;

    fn open(&self, path: &str) -> Result<Self::Port, LinkError> {
        serialport::new(path, self.baud)
            .timeout(self.timeout)
            .open()
            .map_err(|e| LinkError::Open { path: path.to_string(), cause: e.into() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Connected,
    Disconnected,
}

/// Serial link with ordered candidate fallback and a single reconnect per send.
pub struct SerialLink<O: PortOpener> {
    opener: O,
    candidates: Vec<String>,
    port: Option<(String, O::Port)>,
}

impl<O: PortOpener> SerialLink<O> {
    /// Open the first candidate that works.
    pub fn connect(opener: O, candidates: Vec<String>) -> Result<Self, LinkError> {
        let mut link = Self::disconnected(opener, candidates);
        link.reconnect()?;
        Ok(link)
    }

    /// A link that opens its device lazily on the first send.
    pub fn disconnected(opener: O, candidates: Vec<String>) -> Self {
        SerialLink { opener, candidates, port: None }
    }

    pub fn state(&self) -> LinkState {
        if self.port.is_some() {
            LinkState::Connected
        } else {
            LinkState::Disconnected
        }
    }

    /// Path of the device currently open, if any.
    pub fn device(&self) -> Option<&str> {
        self.port.as_ref().map(|(path, _)| path.as_str())
    }

    /// Drop the current port and try every candidate in order.
    /// Fails with the last candidate's error when none opens.
    pub fn reconnect(&mut self) -> Result<(), LinkError> {
        self.port = None;
        let mut last_err = LinkError::NoCandidates;
        for path in &self.candidates {
            match self.opener.open(path) {
                Ok(port) => {
                    info!("Serial link open on {path}");
                    self.port = Some((path.clone(), port));
                    return Ok(());
                }
                Err(e) => {
                    warn!("Serial candidate unavailable: {e}");
                    last_err = e;
                }
            }
        }
        Err(last_err)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), LinkError> {
        let (_, port) = self.port.as_mut().ok_or(LinkError::Disconnected)?;
        let result = port.write_all(&[byte]).and_then(|()| port.flush());
        if result.is_err() {
            self.port = None;
        }
        Ok(result?)
    }

    /// Write once; on failure reconnect once and write again.
    fn send(&mut self, byte: u8) -> Result<(), LinkError> {
        match self.write_byte(byte) {
            Ok(()) => {
                debug!("Sent cue {byte}");
                Ok(())
            }
            Err(e) => {
                warn!("Cue {byte} failed ({e}), reconnecting");
                self.reconnect()?;
                self.write_byte(byte)
            }
        }
    }
}

impl<O: PortOpener> PeripheralLink for SerialLink<O> {
    fn notify_start(&mut self) -> Result<(), LinkError> {
        self.send(START)
    }

    fn notify_stop(&mut self) -> Result<(), LinkError> {
        self.send(STOP)
    }
}
