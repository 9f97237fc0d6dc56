use crate::error::{FolioError, Result};
use crate::model::ProjectRecord;

/// The ordered collection of projects plus the pristine copy used by "cancel".
///
/// The pristine copy is always a structural clone, never shared with the live list, so
/// edits to live records cannot leak into the rollback target.
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Vec<ProjectRecord>,
    original: Vec<ProjectRecord>,
}

impl ProjectStore {
    /// Build a store whose pristine copy equals the loaded data.
    pub fn new(projects: Vec<ProjectRecord>) -> Self {
        let original = projects.clone();
        Self { projects, original }
    }

    /// Build a store with an explicit rollback target (e.g. a persisted checkpoint).
    pub fn with_original(projects: Vec<ProjectRecord>, original: Vec<ProjectRecord>) -> Self {
        Self { projects, original }
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn original(&self) -> &[ProjectRecord] {
        &self.original
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.projects.iter().any(|p| p.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ProjectRecord> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&ProjectRecord> {
        self.get(id)
            .ok_or_else(|| FolioError::ProjectNotFound(id.to_string()))
    }

    pub fn require_mut(&mut self, id: &str) -> Result<&mut ProjectRecord> {
        self.get_mut(id)
            .ok_or_else(|| FolioError::ProjectNotFound(id.to_string()))
    }

    /// Append a record. A duplicate id is rejected and the store left untouched.
    pub fn push(&mut self, record: ProjectRecord) -> Result<()> {
        if self.contains(&record.id) {
            return Err(FolioError::Validation(format!(
                "A project with id '{}' already exists",
                record.id
            )));
        }
        self.projects.push(record);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Option<ProjectRecord> {
        let pos = self.projects.iter().position(|p| p.id == id)?;
        Some(self.projects.remove(pos))
    }

    pub fn max_order(&self) -> Option<i64> {
        self.projects.iter().map(|p| p.order).max()
    }

    /// Next free carousel position: one past the current maximum, or 0 when empty.
    pub fn next_order(&self) -> i64 {
        self.max_order().map_or(0, |max| max.saturating_add(1))
    }

    /// Records by ascending `order`; ties keep storage order.
    pub fn sorted_by_order(&self) -> Vec<&ProjectRecord> {
        let mut sorted: Vec<&ProjectRecord> = self.projects.iter().collect();
        sorted.sort_by_key(|p| p.order);
        sorted
    }

    /// Rearrange storage itself by `order` (stable).
    pub fn sort_by_order(&mut self) {
        self.projects.sort_by_key(|p| p.order);
    }

    /// Make the current live list the new rollback target.
    pub fn checkpoint(&mut self) {
        self.original = self.projects.clone();
    }

    /// Discard every edit since the last checkpoint.
    pub fn rollback(&mut self) {
        self.projects = self.original.clone();
    }

    pub fn is_pristine(&self) -> bool {
        self.projects == self.original
    }
}
