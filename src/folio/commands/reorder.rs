use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FolioError, Result};
use crate::session::Session;
use crate::store::backend::StorageBackend;

/// Move a project's slide so it lands at `position` (0-based) on the strip.
pub fn run<B: StorageBackend>(
    session: &mut Session<B>,
    id: &str,
    position: usize,
) -> Result<CmdResult> {
    session.store().require(id)?;
    let from = session
        .carousel()
        .position_of(id)
        .ok_or_else(|| FolioError::Api(format!("{} is not on the carousel", id)))?;

    let landed = reposition(session, from, Some(position))?;

    let mut result = CmdResult::default();
    let message = match landed {
        Some(p) => format!("Moved {} to position {}", id, p + 1),
        None => format!("Moved {}", id),
    };
    result.add_message(CmdMessage::success(message));
    Ok(result)
}

/// Replay a full drag of the slide at `from`: start, hover so the pointer sits before
/// slot `at` of the remaining strip (past the end when `None`), drop, end.
///
/// Returns where the project's first slide ended up.
pub(crate) fn reposition<B: StorageBackend>(
    session: &mut Session<B>,
    from: usize,
    at: Option<usize>,
) -> Result<Option<usize>> {
    let id = session
        .carousel()
        .get(from)
        .and_then(|s| s.project_id.clone());
    if !session.drag_start(from) {
        return Ok(None);
    }

    let geometry = session.options().geometry;
    let others = session.carousel().len().saturating_sub(1);
    let x = match at {
        Some(slot) if slot < others => geometry.pointer_before(slot),
        _ => geometry.center(others),
    };
    if let Some(target) = (0..session.carousel().len()).find(|&i| i != from) {
        session.drag_over(target, x);
    }

    if let Err(e) = session.drop() {
        session.abandon_drag();
        return Err(e);
    }
    session.drag_end()?;

    Ok(id.and_then(|id| session.carousel().position_of(&id)))
}
