use std::error::Error;
use std::fmt;
use std::io;

/// Common result type for sitewright operations
pub type BoxResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Error types for sitewright operations
#[derive(Debug)]
pub enum SiteError {
    /// IO error wrapper
    Io(io::Error),
    /// Configuration error
    Config(String),
    /// Template processing error
    Template(String),
    /// Front matter parsing error
    FrontMatter(String),
    /// Markdown processing error
    Markdown(String),
    /// Sass compilation error
    Stylesheet(String),
    /// File watching error
    Watch(String),
    /// Generic error message
    Generic(String),
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteError::Io(err) => write!(f, "IO error: {}", err),
            SiteError::Config(msg) => write!(f, "Configuration error: {}", msg),
            SiteError::Template(msg) => write!(f, "Template error: {}", msg),
            SiteError::FrontMatter(msg) => write!(f, "Front matter error: {}", msg),
            SiteError::Markdown(msg) => write!(f, "Markdown error: {}", msg),
            SiteError::Stylesheet(msg) => write!(f, "Stylesheet error: {}", msg),
            SiteError::Watch(msg) => write!(f, "Watch error: {}", msg),
            SiteError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for SiteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SiteError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SiteError {
    fn from(err: io::Error) -> Self {
        SiteError::Io(err)
    }
}

impl From<notify::Error> for SiteError {
    fn from(err: notify::Error) -> Self {
        SiteError::Watch(err.to_string())
    }
}

impl From<String> for SiteError {
    fn from(msg: String) -> Self {
        SiteError::Generic(msg)
    }
}

impl From<&str> for SiteError {
    fn from(msg: &str) -> Self {
        SiteError::Generic(msg.to_string())
    }
}
