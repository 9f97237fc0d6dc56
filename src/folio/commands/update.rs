use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FolioError, Result};
use crate::session::Session;
use crate::store::backend::StorageBackend;

pub fn rename<B: StorageBackend>(
    session: &mut Session<B>,
    id: &str,
    name: &str,
) -> Result<CmdResult> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FolioError::Validation("Project name is required".into()));
    }

    let updated = session.commit(|s| {
        let record = s.store_mut().require_mut(id)?;
        record.name = name.to_string();
        Ok(record.clone())
    })?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Renamed {} to {}", id, name)));
    Ok(result.with_affected_projects(vec![updated]))
}

pub fn describe<B: StorageBackend>(
    session: &mut Session<B>,
    id: &str,
    description: &str,
) -> Result<CmdResult> {
    let updated = session.commit(|s| {
        let record = s.store_mut().require_mut(id)?;
        record.description = description.trim().to_string();
        Ok(record.clone())
    })?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Description updated for {}", id)));
    Ok(result.with_affected_projects(vec![updated]))
}
