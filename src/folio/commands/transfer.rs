//! Drops on the carousel strip coming from the folder list (or a plain reorder).
//!
//! A project that already has a slide is repositioned, never duplicated. Otherwise a
//! slide is inserted at the drop slot and, when the store does not know the id yet, the
//! carried record is appended with the next free `order`. Either way the strip is then
//! reconciled into `order` and the store written.

use crate::carousel::Slide;
use crate::commands::reorder::reposition;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::validate_project_id;
use crate::payload::DragPayload;
use crate::session::Session;
use crate::store::backend::StorageBackend;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum TransferOutcome {
    /// Payload unusable or of the wrong kind; nothing changed.
    Ignored,
    Repositioned {
        id: String,
        position: Option<usize>,
    },
    Inserted {
        id: String,
        /// `order` handed out before reconciling; `None` when the store already had it.
        assigned_order: Option<i64>,
    },
}

/// Handle a drop on the strip. `at` is the slot to insert before; `None` means the end.
pub fn drop_on_carousel<B: StorageBackend>(
    session: &mut Session<B>,
    payload: &DragPayload,
    at: Option<usize>,
) -> Result<TransferOutcome> {
    let (id, carried) = match payload {
        DragPayload::Reorder { id } => (id, None),
        DragPayload::Transfer { id, record } => (id, record.as_ref()),
        DragPayload::Image { .. } => {
            warn!(project = payload.id(), "image dropped on the project carousel, ignored");
            return Ok(TransferOutcome::Ignored);
        }
    };
    if carried.is_some_and(|r| r.id != *id) || validate_project_id(id).is_err() {
        warn!(id = %id, "inconsistent drag payload, ignored");
        return Ok(TransferOutcome::Ignored);
    }

    if let Some(from) = session.carousel().position_of(id) {
        let position = reposition(session, from, at)?;
        return Ok(TransferOutcome::Repositioned {
            id: id.clone(),
            position,
        });
    }

    if matches!(payload, DragPayload::Reorder { .. }) {
        warn!(id = %id, "reorder drop for a project with no slide, ignored");
        return Ok(TransferOutcome::Ignored);
    }

    let Some(record) = carried
        .cloned()
        .or_else(|| session.store().get(id).cloned())
    else {
        warn!(id = %id, "dropped project is unknown and carries no record, ignored");
        return Ok(TransferOutcome::Ignored);
    };
    let placeholder = session.options().placeholder.clone();
    let assigned_order = session.commit(|s| {
        let assigned = if s.store().contains(&record.id) {
            None
        } else {
            let order = s.store().next_order();
            let mut added = record.clone();
            added.order = order;
            s.store_mut().push(added)?;
            Some(order)
        };

        let preview = if record.preview_image.is_empty() {
            placeholder
        } else {
            record.preview_image.clone()
        };
        let slot = at.filter(|&i| i <= s.carousel().len());
        s.carousel_mut()
            .insert_before(slot, Slide::new(record.id.clone(), preview));
        s.recompute();
        Ok(assigned)
    })?;
    session.rerender();

    info!(id = %record.id, added = assigned_order.is_some(), "project placed on carousel");
    Ok(TransferOutcome::Inserted {
        id: record.id,
        assigned_order,
    })
}

pub fn run<B: StorageBackend>(
    session: &mut Session<B>,
    payload: Option<&DragPayload>,
    at: Option<usize>,
) -> Result<CmdResult> {
    let outcome = match payload {
        Some(payload) => drop_on_carousel(session, payload, at)?,
        None => {
            warn!("drop without a readable payload, ignored");
            TransferOutcome::Ignored
        }
    };

    let mut result = CmdResult::default();
    let message = match &outcome {
        TransferOutcome::Ignored => CmdMessage::warning("Nothing usable was dropped; no changes"),
        TransferOutcome::Repositioned { id, position } => CmdMessage::success(match position {
            Some(p) => format!("{} is already on the carousel; moved to position {}", id, p + 1),
            None => format!("{} is already on the carousel; moved", id),
        }),
        TransferOutcome::Inserted {
            id,
            assigned_order: Some(_),
        } => CmdMessage::success(format!("{} added to the carousel", id)),
        TransferOutcome::Inserted { id, .. } => {
            CmdMessage::success(format!("{} placed on the carousel", id))
        }
    };
    result.add_message(message);

    if let TransferOutcome::Inserted { id, .. } | TransferOutcome::Repositioned { id, .. } =
        &outcome
    {
        if let Some(record) = session.store().get(id) {
            result.affected_projects.push(record.clone());
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::Carousel;
    use crate::payload::RawDragData;
    use crate::test_utils::{orders, record, session_with, slide_ids};

    fn folder_drag(id: &str) -> DragPayload {
        DragPayload::for_folder(&record(id))
    }

    #[test]
    fn novel_record_is_appended_once_with_next_order() {
        let mut session = session_with(&["a", "b", "c"]);
        let before = session.store().len();
        let max = session.store().max_order().unwrap();

        let outcome = drop_on_carousel(&mut session, &folder_drag("villa"), None).unwrap();
        assert_eq!(
            outcome,
            TransferOutcome::Inserted {
                id: "villa".into(),
                assigned_order: Some(max + 1),
            }
        );
        assert_eq!(session.store().len(), before + 1);
        assert_eq!(session.store().get("villa").unwrap().order, max + 1);
        assert_eq!(slide_ids(&session), vec!["a", "b", "c", "villa"]);
        assert_eq!(session.gateway().load().unwrap().unwrap().len(), 4);
    }

    #[test]
    fn novel_record_after_maximal_order_lands_last() {
        let mut session = session_with(&["a"]);
        session.store_mut().get_mut("a").unwrap().order = i64::MAX;

        let outcome = drop_on_carousel(&mut session, &folder_drag("villa"), None).unwrap();
        assert_eq!(
            outcome,
            TransferOutcome::Inserted {
                id: "villa".into(),
                assigned_order: Some(i64::MAX),
            }
        );
        assert_eq!(slide_ids(&session), vec!["a", "villa"]);
        assert_eq!(
            orders(&session),
            vec![("a".into(), 0), ("villa".into(), 1)]
        );
    }

    #[test]
    fn first_record_in_empty_store_gets_order_zero() {
        let mut session = session_with(&[]);
        let outcome = drop_on_carousel(&mut session, &folder_drag("villa"), Some(3)).unwrap();
        assert!(matches!(
            outcome,
            TransferOutcome::Inserted {
                assigned_order: Some(0),
                ..
            }
        ));
        assert_eq!(orders(&session), vec![("villa".into(), 0)]);
    }

    #[test]
    fn insert_at_slot_reconciles_neighbours() {
        let mut session = session_with(&["a", "b"]);
        drop_on_carousel(&mut session, &folder_drag("villa"), Some(1)).unwrap();
        assert_eq!(slide_ids(&session), vec!["a", "villa", "b"]);
        assert_eq!(
            orders(&session),
            vec![("a".into(), 0), ("b".into(), 2), ("villa".into(), 1)]
        );
    }

    #[test]
    fn existing_id_is_repositioned_not_duplicated() {
        let mut session = session_with(&["a", "b", "c"]);
        let outcome = drop_on_carousel(&mut session, &folder_drag("a"), None).unwrap();

        assert!(matches!(outcome, TransferOutcome::Repositioned { .. }));
        assert_eq!(session.store().len(), 3);
        assert_eq!(slide_ids(&session), vec!["b", "c", "a"]);
        assert_eq!(session.store().get("a").unwrap().order, 2);
        // The carried copy does not overwrite the stored record
        assert_eq!(session.store().get("a").unwrap().name, "Project a");
    }

    #[test]
    fn tracked_record_without_slide_gets_slide_only() {
        let mut session = session_with(&["a", "b"]);
        *session.carousel_mut() = Carousel::from_slides(vec![Slide::new("a", "")]);

        let payload = DragPayload::Transfer {
            id: "b".into(),
            record: None,
        };
        let outcome = drop_on_carousel(&mut session, &payload, Some(0)).unwrap();
        assert_eq!(
            outcome,
            TransferOutcome::Inserted {
                id: "b".into(),
                assigned_order: None,
            }
        );
        assert_eq!(session.store().len(), 2);
        assert_eq!(orders(&session), vec![("a".into(), 1), ("b".into(), 0)]);
    }

    #[test]
    fn malformed_or_unknown_payloads_change_nothing() {
        let mut session = session_with(&["a"]);
        let snapshot = session.store().projects().to_vec();

        let malformed = RawDragData {
            source: Some("folder".into()),
            text: Some("ghost".into()),
            project_json: Some("{\"id\":".into()),
        }
        .into_payload();
        run(&mut session, malformed.as_ref(), None).unwrap();

        let unknown = DragPayload::Transfer {
            id: "ghost".into(),
            record: None,
        };
        assert_eq!(
            drop_on_carousel(&mut session, &unknown, None).unwrap(),
            TransferOutcome::Ignored
        );

        let mismatched = DragPayload::Transfer {
            id: "ghost".into(),
            record: Some(record("other")),
        };
        assert_eq!(
            drop_on_carousel(&mut session, &mismatched, None).unwrap(),
            TransferOutcome::Ignored
        );

        assert_eq!(session.store().projects(), snapshot.as_slice());
        assert_eq!(session.gateway().backend().write_count(), 0);
    }

    #[test]
    fn storage_failure_rolls_back_insert() {
        let mut session = session_with(&["a"]);
        session.gateway().backend().set_simulate_write_error(true);

        assert!(drop_on_carousel(&mut session, &folder_drag("villa"), None).is_err());
        assert_eq!(session.store().len(), 1);
        assert_eq!(slide_ids(&session), vec!["a"]);
    }
}
