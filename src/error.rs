//! Crate-level error types.

use std::fmt;

/// Errors produced by the fieldview crate.
#[derive(Debug)]
pub enum CameraError {
    /// Camera construction or stereo parameters out of range.
    InvalidParameter(String),
    /// A capability was requested that the render surface never offered.
    UnsupportedCapability(String),
    /// Stereo was enabled a second time on the same camera.
    StereoAlreadyEnabled,
    /// Negative, NaN or infinite elapsed time passed to a per-frame advance.
    InvalidTimestep(f64),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => {
                write!(f, "invalid camera parameter: {msg}")
            }
            Self::UnsupportedCapability(msg) => {
                write!(f, "unsupported capability: {msg}")
            }
            Self::StereoAlreadyEnabled => {
                write!(f, "stereo is already enabled on this camera")
            }
            Self::InvalidTimestep(ms) => {
                write!(f, "invalid timestep: {ms} ms")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CameraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CameraError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Failure reported by a game-state listener while handling a notification.
///
/// Caught by the dispatch loop and logged; it never reaches the code that
/// mutated the game state and never deregisters the listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFault {
    message: String,
}

impl NotificationFault {
    /// Create a fault with a human-readable reason.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The reason given by the listener.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for NotificationFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener fault: {}", self.message)
    }
}

impl std::error::Error for NotificationFault {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_value() {
        let err = CameraError::InvalidTimestep(-16.0);
        assert_eq!(err.to_string(), "invalid timestep: -16 ms");

        let err = CameraError::InvalidParameter("near 5 >= far 1".into());
        assert!(err.to_string().contains("near 5 >= far 1"));
    }

    #[test]
    fn io_errors_keep_their_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = CameraError::from(io);
        assert!(std::error::Error::source(&err).is_some());
    }
}
