//! Script fetching over HTTP or from disk.
//!
//! Blocking reqwest client (no Tokio runtime required). Callers that must
//! stay responsive run it on a worker thread, see [`crate::background`].

use std::time::Duration;

use url::Url;

use scriptview_core::Script;

use crate::{json, LoadError, ScriptSource};

/// Upper bound on an error body kept in [`LoadError::Http`].
const MAX_ERROR_BODY: usize = 512;

/// Loads scripts from any [`ScriptSource`].
#[derive(Clone)]
pub struct ScriptLoader {
    http: reqwest::blocking::Client,
}

impl ScriptLoader {
    /// Build a loader. No request timeout is set: a stalled server leaves
    /// the load pending until the transport itself gives up.
    pub fn new() -> Result<Self, LoadError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("scriptview/{}", env!("CARGO_PKG_VERSION")))
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| LoadError::Network(e.to_string()))?;
        Ok(Self { http })
    }

    /// Fetch and decode one script. Exactly one request or file read.
    pub fn load(&self, source: &ScriptSource) -> Result<Script, LoadError> {
        log::debug!("loading script from {}", source);
        let bytes = match source {
            ScriptSource::Http(url) => self.get(url)?,
            ScriptSource::File(path) => std::fs::read(path)
                .map_err(|e| LoadError::Io(format!("{}: {}", path.display(), e)))?,
        };
        let script = json::decode(&bytes)?;
        log::debug!("decoded {} lines ({} bytes) from {}", script.len(), bytes.len(), source);
        Ok(script)
    }

    fn get(&self, url: &Url) -> Result<Vec<u8>, LoadError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|e| LoadError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let mut body = response.text().unwrap_or_default();
            truncate_at_char_boundary(&mut body, MAX_ERROR_BODY);
            return Err(LoadError::Http(status, body));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| LoadError::Network(e.to_string()))
    }
}

fn truncate_at_char_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}
