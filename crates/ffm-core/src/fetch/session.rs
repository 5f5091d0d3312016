// Stored browser session (storage-state JSON as exported by the browser
// automation tooling).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::FfmError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default = "default_path")]
    pub path: String,
    /// Expiry, flags and anything else the exporter wrote, kept so a saved
    /// session round-trips unchanged.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_path() -> String {
    "/".into()
}

impl Cookie {
    /// Whether this cookie is sent to `host`. A leading dot on the domain
    /// matches the domain itself and any subdomain.
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        let domain = self.domain.to_ascii_lowercase();
        match domain.strip_prefix('.') {
            Some(bare) => host == bare || host.ends_with(&format!(".{bare}")),
            None => !domain.is_empty() && host == domain,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub cookies: Vec<Cookie>,
    /// Per-origin local storage. Not used for fetching.
    #[serde(default)]
    pub origins: Vec<serde_json::Value>,
}

impl SessionState {
    /// Load a stored session. No file means no session; an unreadable or
    /// malformed file is logged and treated the same way.
    pub fn load(path: &Path) -> Option<SessionState> {
        if !path.exists() {
            info!("no saved session at {}, fetching anonymously", path.display());
            return None;
        }
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("could not read session file {}: {e}", path.display());
                return None;
            }
        };
        match serde_json::from_str::<SessionState>(&text) {
            Ok(state) => {
                info!("loaded session with {} cookies", state.cookies.len());
                Some(state)
            }
            Err(e) => {
                warn!("ignoring malformed session file {}: {e}", path.display());
                None
            }
        }
    }

    /// Parse a session strictly, for importing.
    pub fn parse(text: &str) -> Result<SessionState, FfmError> {
        let state: SessionState = serde_json::from_str(text)
            .map_err(|e| FfmError::DataValidation(format!("not a browser storage state: {e}")))?;
        if state.cookies.is_empty() {
            return Err(FfmError::DataValidation(
                "storage state has no cookies".into(),
            ));
        }
        Ok(state)
    }

    /// Write as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), FfmError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| FfmError::file(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| FfmError::file(path, e))?;
        std::fs::write(path, json).map_err(|e| FfmError::file(path, e))
    }

    /// Validate an exported storage state and store it at `dest`.
    pub fn import(src: &Path, dest: &Path) -> Result<SessionState, FfmError> {
        let text = std::fs::read_to_string(src).map_err(|e| FfmError::file(src, e))?;
        let state = SessionState::parse(&text)?;
        state.save(dest)?;
        info!(
            "imported session ({} cookies) from {} to {}",
            state.cookies.len(),
            src.display(),
            dest.display()
        );
        Ok(state)
    }

    /// `Cookie` header value for `host`, or `None` when no cookie applies.
    pub fn cookie_header(&self, host: &str) -> Option<String> {
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .filter(|c| c.matches_host(host))
            .map(|c| format!("{}={}", c.name, c.value))
            .collect();
        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
