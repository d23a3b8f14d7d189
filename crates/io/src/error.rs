/// Why a script could not be loaded.
///
/// One error type covers every failure of a load: the caller shows it,
/// logs it, and keeps whatever script it already had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Transport failure: DNS, connection refused, TLS, reset mid-body
    Network(String),
    /// Server answered with a non-success status
    Http(u16, String),
    /// Body was not a JSON array of records
    Parse(String),
    /// Local file could not be read
    Io(String),
}

impl LoadError {
    /// Short label for status bars and log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::Network(_) => "network",
            LoadError::Http(..) => "http",
            LoadError::Parse(_) => "parse",
            LoadError::Io(_) => "io",
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Network(msg) => write!(f, "Network error: {}", msg),
            LoadError::Http(code, body) if body.trim().is_empty() => write!(f, "HTTP {}", code),
            LoadError::Http(code, body) => write!(f, "HTTP {}: {}", code, body.trim()),
            LoadError::Parse(msg) => write!(f, "Malformed script: {}", msg),
            LoadError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}
