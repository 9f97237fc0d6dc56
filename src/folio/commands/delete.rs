use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FolioError, Result};
use crate::session::Session;
use crate::store::backend::StorageBackend;

pub fn run<B: StorageBackend>(session: &mut Session<B>, id: &str) -> Result<CmdResult> {
    let removed = session.commit(|s| {
        let removed = s
            .store_mut()
            .remove(id)
            .ok_or_else(|| FolioError::ProjectNotFound(id.to_string()))?;
        // Drops every slide for the id, clones included
        s.rerender();
        Ok(removed)
    })?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Project deleted: {} ({})",
        removed.name, removed.id
    )));
    Ok(result.with_affected_projects(vec![removed]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{session_with, slide_ids};

    #[test]
    fn removes_record_and_all_slides() {
        let mut session = session_with(&["a", "b", "c"]);
        session.set_edit_mode(false);
        assert_eq!(session.carousel().len(), 6);

        run(&mut session, "b").unwrap();
        assert!(!session.store().contains("b"));
        assert_eq!(slide_ids(&session), vec!["a", "c", "a", "c"]);
        assert_eq!(session.gateway().load().unwrap().unwrap().len(), 2);
    }

    #[test]
    fn unknown_id_is_an_error_without_write() {
        let mut session = session_with(&["a"]);
        assert!(matches!(
            run(&mut session, "x"),
            Err(FolioError::ProjectNotFound(_))
        ));
        assert_eq!(session.gateway().backend().write_count(), 0);
    }
}
