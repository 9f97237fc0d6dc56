//! The site's own `data/projects.json`.
//!
//! It seeds a fresh data directory and receives a best-effort copy on save. Most static
//! hosts refuse writes, so a failed `put` is reported as "saved locally only" and never
//! treated as an error by callers.

use crate::error::{FolioError, Result};
use crate::model::Manifest;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Path of the manifest relative to the site root.
pub const MANIFEST_PATH: &str = "data/projects.json";

pub trait ManifestRemote {
    /// `Ok(None)` when the site has no manifest yet.
    fn fetch(&self) -> Result<Option<Manifest>>;
    fn put(&self, manifest: &Manifest) -> Result<()>;
    fn describe(&self) -> String;
}

/// Pick the remote for a `remote` config value: an http(s) base URL or a local site
/// checkout.
pub fn from_location(location: &str) -> Result<Box<dyn ManifestRemote>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpRemote::new(location)?))
    } else {
        Ok(Box::new(SiteDir::new(location)))
    }
}

/// A site checked out on disk.
#[derive(Debug, Clone)]
pub struct SiteDir {
    root: PathBuf,
}

impl SiteDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_PATH)
    }
}

impl ManifestRemote for SiteDir {
    fn fetch(&self) -> Result<Option<Manifest>> {
        let path = self.manifest_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(Some(manifest))
    }

    fn put(&self, manifest: &Manifest) -> Result<()> {
        let path = self.manifest_path();
        if !self.root.is_dir() {
            return Err(FolioError::Network(format!(
                "Site directory {} does not exist",
                self.root.display()
            )));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(manifest)?)?;
        debug!(path = %path.display(), "wrote site manifest");
        Ok(())
    }

    fn describe(&self) -> String {
        self.manifest_path().display().to_string()
    }
}

/// A site served over HTTP.
pub struct HttpRemote {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpRemote {
    pub fn new(base: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| FolioError::Network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            url: format!("{}/{}", base.trim_end_matches('/'), MANIFEST_PATH),
            client,
        })
    }
}

impl ManifestRemote for HttpRemote {
    fn fetch(&self) -> Result<Option<Manifest>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| FolioError::Network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FolioError::Network(format!(
                "GET {} returned {}",
                self.url, status
            )));
        }
        let manifest = response
            .json::<Manifest>()
            .map_err(|e| FolioError::Network(e.to_string()))?;
        Ok(Some(manifest))
    }

    fn put(&self, manifest: &Manifest) -> Result<()> {
        let response = self
            .client
            .put(&self.url)
            .json(manifest)
            .send()
            .map_err(|e| FolioError::Network(e.to_string()))?;
        if !response.status().is_success() {
            return Err(FolioError::Network(format!(
                "PUT {} returned {}",
                self.url,
                response.status()
            )));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
