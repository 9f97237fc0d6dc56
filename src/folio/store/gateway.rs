use super::backend::StorageBackend;
use crate::error::{FolioError, Result};
use crate::model::{Manifest, ProjectRecord};
use tracing::{info, warn};

/// Key of the live record: `{ "projects": [...] }`.
pub const PROJECTS_KEY: &str = "projectsData";
/// Key of the persisted rollback target.
pub const CHECKPOINT_KEY: &str = "originalProjectsData";
/// Default write limit for the live record.
pub const DEFAULT_QUOTA_BYTES: usize = 4 * 1024 * 1024;

/// Serializes the store to a single durable key.
///
/// Every write replaces the whole record. There is no version token: two writers on
/// the same backend silently overwrite each other, last write wins.
pub struct Gateway<B: StorageBackend> {
    backend: B,
    quota_bytes: Option<usize>,
}

impl<B: StorageBackend> Gateway<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
        }
    }

    /// `None` disables the size check.
    pub fn with_quota(mut self, quota_bytes: Option<usize>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load the live record. Absent, empty or unreadable data yields `None` so the
    /// caller can fall back to the site manifest.
    pub fn load(&self) -> Result<Option<Vec<ProjectRecord>>> {
        self.load_key(PROJECTS_KEY)
    }

    pub fn load_checkpoint(&self) -> Result<Option<Vec<ProjectRecord>>> {
        self.load_key(CHECKPOINT_KEY)
    }

    /// Persist the full store. Returns the number of bytes written.
    pub fn save(&self, projects: &[ProjectRecord]) -> Result<usize> {
        let written = self.save_key(PROJECTS_KEY, projects)?;
        info!(
            projects = projects.len(),
            bytes = written,
            location = %self.backend.location(PROJECTS_KEY).display(),
            "saved projects"
        );
        Ok(written)
    }

    pub fn save_checkpoint(&self, projects: &[ProjectRecord]) -> Result<usize> {
        self.save_key(CHECKPOINT_KEY, projects)
    }

    fn load_key(&self, key: &str) -> Result<Option<Vec<ProjectRecord>>> {
        let Some(raw) = self.backend.read(key)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Manifest>(&raw) {
            Ok(manifest) if !manifest.projects.is_empty() => Ok(Some(manifest.projects)),
            Ok(_) => Ok(None),
            Err(e) => {
                warn!(key, error = %e, "stored projects are unreadable, ignoring");
                Ok(None)
            }
        }
    }

    fn save_key(&self, key: &str, projects: &[ProjectRecord]) -> Result<usize> {
        let payload = serde_json::to_string(&ManifestRef { projects })
            .map_err(FolioError::Serialization)?;
        if let Some(limit) = self.quota_bytes {
            if payload.len() > limit {
                return Err(FolioError::QuotaExceeded {
                    size: payload.len(),
                    limit,
                });
            }
        }
        self.backend.write(key, &payload)?;
        Ok(payload.len())
    }
}

#[derive(serde::Serialize)]
struct ManifestRef<'a> {
    projects: &'a [ProjectRecord],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::record;

    #[test]
    fn save_then_load_returns_projects() {
        let gateway = Gateway::new(MemBackend::new());
        gateway.save(&[record("a"), record("b")]).unwrap();

        let loaded = gateway.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].id, "b");
    }

    #[test]
    fn empty_or_garbage_data_loads_as_none() {
        let backend = MemBackend::new();
        backend.seed(PROJECTS_KEY, r#"{"projects":[]}"#);
        assert!(Gateway::new(backend).load().unwrap().is_none());

        let backend = MemBackend::new();
        backend.seed(PROJECTS_KEY, "{not json");
        assert!(Gateway::new(backend).load().unwrap().is_none());
    }

    #[test]
    fn oversized_payload_is_rejected_before_writing() {
        let gateway = Gateway::new(MemBackend::new()).with_quota(Some(64));
        let mut big = record("a");
        big.photos.push("x".repeat(200));

        let err = gateway.save(&[big]).unwrap_err();
        assert!(matches!(err, FolioError::QuotaExceeded { limit: 64, .. }));
        assert_eq!(gateway.backend().write_count(), 0);
        assert!(gateway.load().unwrap().is_none());
    }

    #[test]
    fn checkpoint_is_a_separate_key() {
        let gateway = Gateway::new(MemBackend::new());
        gateway.save(&[record("a")]).unwrap();
        assert!(gateway.load_checkpoint().unwrap().is_none());

        gateway.save_checkpoint(&[record("b")]).unwrap();
        assert_eq!(gateway.load_checkpoint().unwrap().unwrap()[0].id, "b");
        assert_eq!(gateway.load().unwrap().unwrap()[0].id, "a");
    }
}
