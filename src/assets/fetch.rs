//! Font download.
//!
//! Downloads are checked: the response must have a success status and a
//! non-empty body, and the optional SHA-256 must match. The file is written
//! to a temporary name next to its destination and renamed into place, so
//! an interrupted download never leaves a truncated font behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context};
use sha2::{Digest, Sha256};

use crate::config::FontConfig;
use crate::error::{Result, SetupError};

/// Retrieves remote assets.
pub trait AssetFetcher {
    /// Fetch the body of `url`.
    fn fetch(&self, url: &str, timeout: Duration) -> anyhow::Result<Vec<u8>>;
}

/// Fetches assets over HTTP(S).
///
/// # Example
///
/// ```no_run
/// use xshot_setup::assets::{AssetFetcher, HttpFetcher};
/// use std::time::Duration;
///
/// let fetcher = HttpFetcher::new().unwrap();
/// let bytes = fetcher.fetch("https://example.com/font.ttf", Duration::from_secs(60)).unwrap();
/// ```
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher.
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("xshot-setup/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

impl AssetFetcher for HttpFetcher {
    fn fetch(&self, url: &str, timeout: Duration) -> anyhow::Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP {} fetching {}", response.status(), url));
        }

        let bytes = response
            .bytes()
            .with_context(|| format!("Failed to read response from {}", url))?;
        Ok(bytes.to_vec())
    }
}

/// What [`ensure_font`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontOutcome {
    /// The font was downloaded.
    Downloaded {
        /// Size in bytes.
        bytes: usize,
        /// Hex SHA-256 of the file.
        sha256: String,
    },
    /// A non-empty font file was already in place.
    AlreadyPresent,
}

/// Make sure the font exists at `dest`, downloading it when missing.
///
/// # Errors
///
/// `DownloadFailed` for transport errors, bad statuses, empty bodies and
/// checksum mismatches. Callers treat every error as advisory.
pub fn ensure_font(
    fetcher: &dyn AssetFetcher,
    font: &FontConfig,
    dest: &Path,
) -> Result<FontOutcome> {
    if fs::metadata(dest).map(|m| m.is_file() && m.len() > 0).unwrap_or(false) {
        tracing::debug!("Font already present at {}", dest.display());
        return Ok(FontOutcome::AlreadyPresent);
    }

    let failed = |message: String| SetupError::DownloadFailed {
        url: font.url.clone(),
        message,
    };

    tracing::info!("Downloading font from {}", font.url);
    let body = fetcher
        .fetch(&font.url, Duration::from_secs(font.timeout_secs))
        .map_err(|e| failed(format!("{:#}", e)))?;

    if body.is_empty() {
        return Err(failed("empty response body".to_string()));
    }

    let digest = hex::encode(&Sha256::digest(&body)[..]);
    if let Some(expected) = &font.sha256 {
        if !digest.eq_ignore_ascii_case(expected.trim()) {
            return Err(failed(format!(
                "checksum mismatch (expected {}, got {})",
                expected, digest
            )));
        }
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    let partial = partial_path(dest);
    fs::write(&partial, &body)?;
    if let Err(e) = fs::rename(&partial, dest) {
        let _ = fs::remove_file(&partial);
        return Err(e.into());
    }

    tracing::info!("Saved font to {} (sha256 {})", dest.display(), digest);
    Ok(FontOutcome::Downloaded {
        bytes: body.len(),
        sha256: digest,
    })
}

fn partial_path(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "font".to_string());
    dest.with_file_name(format!(".{}.part", name))
}
