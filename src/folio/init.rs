//! Context wiring: data directory, config, storage, remote, session.
//!
//! The data directory comes from `FOLIO_HOME` when set, otherwise the platform data
//! directory (`~/.local/share/folio` on Linux).

use crate::api::FolioApi;
use crate::config::FolioConfig;
use crate::error::{FolioError, Result};
use crate::remote::{from_location, ManifestRemote};
use crate::session::Session;
use crate::store::fs_backend::FsBackend;
use crate::store::gateway::Gateway;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

pub const HOME_ENV: &str = "FOLIO_HOME";

pub struct FolioContext {
    pub api: FolioApi<FsBackend>,
    pub data_dir: PathBuf,
}

pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "folio", "folio")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| FolioError::Store("Could not determine a data directory".into()))
}

/// Build the API over `data_dir`, loading local data, else the configured site
/// manifest, else nothing.
pub fn initialize(data_dir: PathBuf) -> Result<FolioContext> {
    let config = FolioConfig::load(&data_dir)?;
    let gateway = Gateway::new(FsBackend::new(data_dir.clone())).with_quota(config.quota());

    let remote: Option<Box<dyn ManifestRemote>> = match config.remote.as_deref() {
        Some(location) if !location.trim().is_empty() => Some(from_location(location.trim())?),
        _ => None,
    };

    let session = Session::open(gateway, remote.as_deref(), config.session_options())?;
    debug!(
        data_dir = %data_dir.display(),
        projects = session.store().len(),
        source = ?session.source(),
        "context ready"
    );

    let api = FolioApi::new(session, config, remote, data_dir.clone());
    Ok(FolioContext { api, data_dir })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Manifest, ProjectRecord};
    use crate::remote::SiteDir;
    use crate::session::LoadSource;
    use tempfile::tempdir;

    #[test]
    fn empty_directory_starts_empty() {
        let dir = tempdir().unwrap();
        let ctx = initialize(dir.path().to_path_buf()).unwrap();
        assert_eq!(ctx.api.session().source(), LoadSource::Empty);
        assert!(ctx.api.session().store().is_empty());
    }

    #[test]
    fn seeds_from_configured_site() {
        let dir = tempdir().unwrap();
        let site = tempdir().unwrap();
        SiteDir::new(site.path())
            .put(&Manifest::new(vec![ProjectRecord::new(
                "villa".into(),
                "Villa".into(),
                String::new(),
                "images/villa.jpg".into(),
            )]))
            .unwrap();

        let mut config = FolioConfig::default();
        config.remote = Some(site.path().display().to_string());
        config.save(dir.path()).unwrap();

        let ctx = initialize(dir.path().to_path_buf()).unwrap();
        assert_eq!(ctx.api.session().source(), LoadSource::Remote);
        assert_eq!(ctx.api.session().carousel().len(), 1);
    }
}
