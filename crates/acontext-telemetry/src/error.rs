use std::fmt;

/// Result type for acontext-telemetry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the telemetry layer
///
/// None of these ever reach the user through the lifecycle hooks: transport
/// failures are swallowed by the dispatcher and configuration failures are
/// replaced by defaults at the call site.
#[derive(Debug)]
pub enum Error {
    /// Sending the event to the collector failed
    Transport(reqwest::Error),

    /// The collector answered with a non-success status
    Rejected(u16),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(err) => write!(f, "Transport error: {}", err),
            Error::Rejected(status) => write!(f, "Collector rejected event with status {}", status),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Rejected(_) | Error::Config(_) => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
