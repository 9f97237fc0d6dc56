//! Canonical order recompute: slide sequence → `order` fields.
//!
//! The strip may show a project more than once (loop clones), so only the first
//! occurrence of each id counts. The deduplicated sequence is capped at the number of
//! records, then each position is written to the record carrying that id. Records with
//! no slide keep whatever `order` they had.

use crate::carousel::Slide;
use crate::store::project_store::ProjectStore;
use std::collections::HashSet;
use tracing::{debug, warn};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecomputeReport {
    /// `(id, order)` pairs written, in strip order.
    pub assigned: Vec<(String, i64)>,
    /// How many records ended up with a different `order`.
    pub changed: usize,
    pub skipped_without_id: usize,
    /// Ids on the strip that no record carries. They still take up a position.
    pub unknown_ids: Vec<String>,
}

pub fn recompute_order(store: &mut ProjectStore, slides: &[Slide]) -> RecomputeReport {
    let mut report = RecomputeReport::default();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut sequence: Vec<&str> = Vec::new();

    for (index, slide) in slides.iter().enumerate() {
        let Some(id) = slide.id() else {
            warn!(index, "slide without a project id, skipped");
            report.skipped_without_id += 1;
            continue;
        };
        if seen.insert(id) {
            sequence.push(id);
        }
    }
    sequence.truncate(store.len());

    for (position, id) in sequence.into_iter().enumerate() {
        let order = position as i64;
        match store.get_mut(id) {
            Some(record) => {
                if record.order != order {
                    report.changed += 1;
                    record.order = order;
                }
                report.assigned.push((id.to_string(), order));
            }
            None => report.unknown_ids.push(id.to_string()),
        }
    }

    debug!(
        assigned = report.assigned.len(),
        changed = report.changed,
        "order recomputed"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::record;

    fn store_of(ids: &[&str]) -> ProjectStore {
        ProjectStore::new(
            ids.iter()
                .enumerate()
                .map(|(i, id)| {
                    let mut r = record(id);
                    r.order = 100 + i as i64;
                    r
                })
                .collect(),
        )
    }

    fn strip(ids: &[&str]) -> Vec<Slide> {
        ids.iter().map(|id| Slide::new(*id, "")).collect()
    }

    fn orders(store: &ProjectStore) -> Vec<(String, i64)> {
        let mut o: Vec<(String, i64)> = store
            .projects()
            .iter()
            .map(|p| (p.id.clone(), p.order))
            .collect();
        o.sort();
        o
    }

    #[test]
    fn clones_do_not_get_their_own_order_and_rerun_is_stable() {
        let mut store = store_of(&["a", "b", "c"]);
        let mut slides = strip(&["c", "a", "b", "c", "a", "b"]);
        for s in &mut slides[3..] {
            s.is_clone = true;
        }

        let first = recompute_order(&mut store, &slides);
        assert_eq!(first.changed, 3);
        assert_eq!(
            orders(&store),
            vec![("a".into(), 1), ("b".into(), 2), ("c".into(), 0)]
        );

        let second = recompute_order(&mut store, &slides);
        assert_eq!(second.changed, 0);
        assert_eq!(second.assigned, first.assigned);
        assert_eq!(
            orders(&store),
            vec![("a".into(), 1), ("b".into(), 2), ("c".into(), 0)]
        );
    }

    #[test]
    fn slide_without_id_is_skipped() {
        let mut store = store_of(&["a", "b"]);
        let mut slides = strip(&["b", "x", "a"]);
        slides[1].project_id = None;

        let report = recompute_order(&mut store, &slides);
        assert_eq!(report.skipped_without_id, 1);
        assert_eq!(orders(&store), vec![("a".into(), 1), ("b".into(), 0)]);
    }

    #[test]
    fn record_without_slide_keeps_its_order() {
        let mut store = store_of(&["a", "b", "c"]);
        recompute_order(&mut store, &strip(&["c", "a"]));
        assert_eq!(
            orders(&store),
            vec![("a".into(), 1), ("b".into(), 101), ("c".into(), 0)]
        );
    }

    #[test]
    fn sequence_is_capped_at_store_size_and_unknown_ids_take_a_slot() {
        let mut store = store_of(&["a", "b"]);
        let report = recompute_order(&mut store, &strip(&["ghost", "b", "a"]));
        assert_eq!(report.unknown_ids, vec!["ghost".to_string()]);
        // "a" fell past the cap of two positions
        assert_eq!(orders(&store), vec![("a".into(), 100), ("b".into(), 1)]);
    }
}
