use crate::commands::images::{resolve_image, ImageSource, UploadPolicy};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FolioError, Result};
use crate::model::{validate_project_id, ProjectRecord};
use crate::session::Session;
use crate::store::backend::StorageBackend;

#[derive(Debug, Clone)]
pub struct NewProject {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Placeholder image when `None`.
    pub preview: Option<ImageSource>,
}

pub fn run<B: StorageBackend>(
    session: &mut Session<B>,
    project: NewProject,
    policy: &UploadPolicy,
) -> Result<CmdResult> {
    let name = project.name.trim().to_string();
    let id = project.id.trim().to_string();

    if name.is_empty() {
        return Err(FolioError::Validation("Project name is required".into()));
    }
    validate_project_id(&id)?;
    if session.store().contains(&id) {
        return Err(FolioError::Validation(format!(
            "A project with id '{}' already exists",
            id
        )));
    }

    let mut result = CmdResult::default();
    let preview = match &project.preview {
        Some(source) => resolve_image(source, policy, &mut result)?,
        None => session.options().placeholder.clone(),
    };

    let mut record = ProjectRecord::new(id, name, project.description.trim().to_string(), preview);
    record.order = session.store().len() as i64;

    let created = record.clone();
    session.commit_quiet(|s| {
        s.store_mut().push(record)?;
        // A new project becomes part of the rollback point
        s.store_mut().checkpoint();
        s.rerender();
        Ok(())
    })?;
    if let Err(e) = session.persist_checkpoint() {
        result.add_message(CmdMessage::warning(format!(
            "Project saved, but the rollback point could not be updated: {}",
            e
        )));
    }

    result.add_message(CmdMessage::success(format!(
        "Project created: {} ({})",
        created.name, created.id
    )));
    Ok(result.with_affected_projects(vec![created]))
}
