//! Resource fetching for the two loaders. Local paths always work; http(s)
//! URLs require the `remote` feature.

use crate::error::{Error, Result};

#[cfg(feature = "remote")]
const FETCH_TIMEOUT_SECS: u64 = 30;

/// Fetch a UTF-8 text resource from an http(s) URL, a `file://` URL, or a
/// plain filesystem path.
pub fn fetch_text(url: &str) -> Result<String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        return fetch_remote(url);
    }
    let path = url.strip_prefix("file://").unwrap_or(url);
    std::fs::read_to_string(path)
        .map_err(|e| Error::load(format!("[fetch] failed to read {path}: {e}")))
}

#[cfg(feature = "remote")]
fn fetch_remote(url: &str) -> Result<String> {
    use std::time::Duration;

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("chorograph/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .map_err(|e| Error::load(format!("[fetch] failed to build client: {e}")))?;

    let resp = client
        .get(url)
        .send()
        .map_err(|e| Error::load(format!("[fetch] GET {url}: {e}")))?
        .error_for_status()
        .map_err(|e| Error::load(format!("[fetch] GET {url}: {e}")))?;

    resp.text()
        .map_err(|e| Error::load(format!("[fetch] reading body of {url}: {e}")))
}

#[cfg(not(feature = "remote"))]
fn fetch_remote(url: &str) -> Result<String> {
    Err(Error::load(format!(
        "[fetch] {url}: remote fetching requires the \"remote\" feature"
    )))
}
