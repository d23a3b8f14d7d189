use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use url::Url;

/// Where a script is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    /// `http://` or `https://` URL, fetched with a single GET
    Http(Url),
    /// Local file (plain path or `file://` URL)
    File(PathBuf),
}

impl ScriptSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        ScriptSource::File(path.into())
    }

    /// Parse a user-supplied source string.
    ///
    /// Anything that parses as an absolute URL must use http, https or file.
    /// Everything else is taken as a filesystem path.
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err("script source is empty".into());
        }

        // Windows drive letters ("C:\...") parse as a one-letter URL scheme
        let looks_like_drive = input.len() >= 2
            && input.as_bytes()[1] == b':'
            && input.as_bytes()[0].is_ascii_alphabetic();

        if !looks_like_drive {
            if let Ok(url) = Url::parse(input) {
                return match url.scheme() {
                    "http" | "https" => Ok(ScriptSource::Http(url)),
                    "file" => url
                        .to_file_path()
                        .map(ScriptSource::File)
                        .map_err(|_| format!("invalid file URL: {}", input)),
                    other => Err(format!(
                        "unsupported source scheme '{}' (expected http, https, file, or a path)",
                        other
                    )),
                };
            }
        }

        Ok(ScriptSource::File(PathBuf::from(input)))
    }

    /// Final path segment, for titles ("TK8.json").
    pub fn file_name(&self) -> String {
        match self {
            ScriptSource::Http(url) => url
                .path_segments()
                .and_then(|mut segs| segs.next_back().map(str::to_string))
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| url.host_str().unwrap_or("script").to_string()),
            ScriptSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }
}

impl FromStr for ScriptSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ScriptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptSource::Http(url) => write!(f, "{}", url),
            ScriptSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
