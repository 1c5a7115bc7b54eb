use std::{error, fmt, io};

#[derive(Debug)]
pub enum Error {
    /// Configuration or trace file could not be accessed.
    Io(io::Error),
    /// Configuration file could not be parsed.
    Config(toml::de::Error),
    /// Link lengths must be strictly positive.
    InvalidLinkLength(f32, f32),
    /// Viewport dimensions must be strictly positive.
    InvalidViewport(f32, f32),
    /// Trace output failed.
    Trace(csv::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "{}", e),
            Error::Config(e) => write!(f, "invalid configuration: {}", e),
            Error::InvalidLinkLength(anchor, floating) => write!(
                f,
                "invalid link lengths: anchor {} floating {}",
                anchor, floating
            ),
            Error::InvalidViewport(width, height) => {
                write!(f, "invalid viewport: {}x{}", width, height)
            }
            Error::Trace(e) => write!(f, "trace: {}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Config(e) => Some(e),
            Error::Trace(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Trace(e)
    }
}
