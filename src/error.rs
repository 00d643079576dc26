//! Error taxonomy: fatal startup errors and the per-event errors the loop recovers from.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Failures before the polling loop starts. All of them end the process with status 1.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("no clips found in {}", dir.display())]
    NoClipsFound { dir: PathBuf },

    #[error("read {}: {cause}", dir.display())]
    ReadDir {
        dir: PathBuf,
        cause: io::Error,
    },

    #[error("peripheral unreachable")]
    PeripheralUnreachable(#[source] LinkError),

    #[error("gpio: {0}")]
    Gpio(String),
}

/// Serial link failures.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("no serial candidates configured")]
    NoCandidates,

    #[error("open {path}: {cause}")]
    Open {
        path: String,
        cause: io::Error,
    },

    #[error("link is disconnected")]
    Disconnected,

    #[error("write: {0}")]
    Write(#[from] io::Error),
}

/// External player failures. Recovered: the cursor still advances.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("spawn {program}: {cause}")]
    Spawn {
        program: String,
        cause: io::Error,
    },

    #[error("player exited with {status} on {}", clip.display())]
    Exit { clip: PathBuf, status: ExitStatus },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn peripheral_error_names_cause_once() {
        let err = StartupError::PeripheralUnreachable(LinkError::Open {
            path: "/dev/ttyUSB1".into(),
            cause: io::Error::new(io::ErrorKind::NotFound, "no such device"),
        });
        assert_eq!(err.to_string(), "peripheral unreachable");
        let cause = err.source().unwrap().to_string();
        assert_eq!(cause, "open /dev/ttyUSB1: no such device");
        assert!(err.source().unwrap().source().is_none());
    }
}
