use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Manifest;
use crate::remote::ManifestRemote;
use crate::session::Session;
use crate::store::backend::StorageBackend;
use tracing::{info, warn};

/// Write locally, offer the manifest to the site, then make the current state the
/// rollback point. The site write is best effort.
pub fn save<B: StorageBackend>(
    session: &mut Session<B>,
    remote: Option<&dyn ManifestRemote>,
) -> Result<CmdResult> {
    session.persist()?;

    let mut result = CmdResult::default();
    let manifest = Manifest::new(session.store().projects().to_vec());
    match remote.map(|r| (r.describe(), r.put(&manifest))) {
        Some((target, Ok(()))) => {
            info!(target = %target, "manifest written to site");
            result.add_message(CmdMessage::success(format!(
                "Changes saved on server ({})",
                target
            )));
        }
        Some((target, Err(e))) => {
            warn!(target = %target, error = %e, "site write failed");
            result.add_message(CmdMessage::warning(format!(
                "Changes saved locally only: {}",
                e
            )));
        }
        None => result.add_message(CmdMessage::success("Changes saved locally")),
    }

    // The on-disk rollback point moves first so memory never gets ahead of it
    session.gateway().save_checkpoint(session.store().projects())?;
    session.store_mut().checkpoint();
    session.set_has_changes(false);
    Ok(result)
}

/// Throw away every edit since the last rollback point.
pub fn cancel<B: StorageBackend>(session: &mut Session<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if session.store().is_pristine() && !session.has_changes() {
        result.add_message(CmdMessage::info("No changes to discard"));
        return Ok(result);
    }

    session.commit_quiet(|s| {
        s.store_mut().rollback();
        s.rerender();
        Ok(())
    })?;
    session.set_has_changes(false);

    result.add_message(CmdMessage::success("All changes discarded"));
    Ok(result)
}

pub fn status<B: StorageBackend>(session: &Session<B>) -> Result<CmdResult> {
    let store = session.store();
    let changed = store
        .projects()
        .iter()
        .filter(|p| store.original().iter().find(|o| o.id == p.id) != Some(*p))
        .count();
    let removed = store
        .original()
        .iter()
        .filter(|o| !store.contains(&o.id))
        .count();

    let mut result = CmdResult::default();
    if store.is_pristine() {
        result.add_message(CmdMessage::info(format!(
            "{} projects, no unsaved changes",
            store.len()
        )));
    } else {
        result.add_message(CmdMessage::warning(format!(
            "{} projects; {} changed or new, {} removed since last save",
            store.len(),
            changed,
            removed
        )));
    }
    Ok(result)
}
