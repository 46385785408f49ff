//! Snapshot retrieval.
//!
//! A snapshot lives either behind an HTTP(S) URL or in a local file. Every
//! fetch must observe the latest published content, so HTTP requests carry a
//! cache-busting `ts` query parameter and `no-cache` headers.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rankdown_core::Snapshot;
use reqwest::header::{CACHE_CONTROL, PRAGMA};

use crate::error::{Error, Result};

/// Upper bound on a single HTTP fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Anything that can produce a fresh snapshot on demand.
pub trait SnapshotFetch: Send + Sync + 'static {
    /// Retrieve and decode the current snapshot.
    fn fetch(&self) -> impl Future<Output = Result<Snapshot>> + Send;
}

/// Where the snapshot document is published.
#[derive(Debug, Clone)]
pub enum SnapshotSource {
    /// Fetched over HTTP(S)
    Http { url: String, client: reqwest::Client },
    /// Read from the local filesystem
    File { path: PathBuf },
}

impl SnapshotSource {
    /// Pick a source from a location string: `http://` and `https://`
    /// select HTTP, anything else is a file path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::http(location)
        } else {
            Self::file(location)
        }
    }

    /// HTTP source for `url`.
    pub fn http(url: impl Into<String>) -> Self {
        Self::Http {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// File source for `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    async fn fetch_http(client: &reqwest::Client, url: &str) -> Result<Snapshot> {
        let ts = chrono::Utc::now().timestamp_millis();
        tracing::debug!(url, ts, "fetching snapshot");

        let response = client
            .get(url)
            .query(&[("ts", ts)])
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        Ok(Snapshot::from_slice(&body)?)
    }

    async fn fetch_file(path: &Path) -> Result<Snapshot> {
        tracing::debug!(path = %path.display(), "reading snapshot");
        let body = tokio::fs::read(path).await.map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Snapshot::from_slice(&body)?)
    }
}

impl SnapshotFetch for SnapshotSource {
    async fn fetch(&self) -> Result<Snapshot> {
        match self {
            SnapshotSource::Http { url, client } => Self::fetch_http(client, url).await,
            SnapshotSource::File { path } => Self::fetch_file(path).await,
        }
    }
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotSource::Http { url, .. } => f.write_str(url),
            SnapshotSource::File { path } => write!(f, "{}", path.display()),
        }
    }
}
