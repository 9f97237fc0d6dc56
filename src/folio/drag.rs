//! Drag-reorder controller.
//!
//! A drag moves one slide live through the strip. Placement is computed against the
//! strip *without* the dragged slide: its neighbours are laid out on the geometry, the
//! pointer picks the first neighbour whose centre lies to its right, and the dragged
//! slide is re-inserted before it (or at the end). Because the neighbours' order does
//! not change when the dragged slide moves, repeating `over` at the same pointer
//! position always lands in the same place.

use crate::carousel::Carousel;
use tracing::{debug, warn};

/// Horizontal layout of a strip of equally sized units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideGeometry {
    pub origin: f64,
    pub slide_width: f64,
    pub gap: f64,
}

impl Default for SlideGeometry {
    fn default() -> Self {
        Self {
            origin: 0.0,
            slide_width: 300.0,
            gap: 0.0,
        }
    }
}

impl SlideGeometry {
    pub fn new(slide_width: f64, gap: f64) -> Self {
        Self {
            origin: 0.0,
            slide_width,
            gap,
        }
    }

    pub fn left(&self, index: usize) -> f64 {
        self.origin + index as f64 * (self.slide_width + self.gap)
    }

    pub fn center(&self, index: usize) -> f64 {
        self.left(index) + self.slide_width / 2.0
    }

    /// A pointer position that anchors before slot `index` of a strip.
    pub fn pointer_before(&self, index: usize) -> f64 {
        self.center(index) - self.slide_width / 4.0
    }
}

/// Pick the insertion anchor for pointer `x`: among `(index, centre)` pairs, the one
/// with `x - centre < 0` closest to zero. `None` means "append at the end".
pub fn insertion_anchor<I>(centers: I, x: f64) -> Option<usize>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, center) in centers {
        let offset = x - center;
        if offset < 0.0 && best.map_or(true, |(_, b)| offset > b) {
            best = Some((index, offset));
        }
    }
    best.map(|(index, _)| index)
}

/// Anchor for `x` over a strip of `count` units laid out on `geometry`.
pub fn anchor_in_strip(count: usize, geometry: &SlideGeometry, x: f64) -> Option<usize> {
    insertion_anchor((0..count).map(|i| (i, geometry.center(i))), x)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag {
    /// Current index of the dragged slide.
    pub index: usize,
    pub project_id: Option<String>,
    pub dropped: bool,
}

#[derive(Debug, Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Begin dragging the slide at `index`. A drag already in progress is abandoned:
    /// the last one started wins.
    pub fn start(&mut self, carousel: &mut Carousel, index: usize) -> bool {
        carousel.clear_dragging();
        let Some(slide) = carousel.get_mut(index) else {
            warn!(index, "drag start on a missing slide");
            self.active = None;
            return false;
        };
        slide.dragging = true;
        debug!(index, id = ?slide.project_id, "drag started");
        self.active = Some(ActiveDrag {
            index,
            project_id: slide.project_id.clone(),
            dropped: false,
        });
        true
    }

    /// Pointer moved over the slide at `target`. Moves the dragged slide to where `x`
    /// points and returns its new index, or `None` when nothing moved.
    pub fn over(
        &mut self,
        carousel: &mut Carousel,
        target: usize,
        x: f64,
        geometry: &SlideGeometry,
    ) -> Option<usize> {
        let drag = self.active.as_mut()?;
        if target == drag.index || target >= carousel.len() || drag.index >= carousel.len() {
            return None;
        }

        let slide = carousel.remove(drag.index);
        let anchor = anchor_in_strip(carousel.len(), geometry, x);
        let new_index = carousel.insert_before(anchor, slide);
        if new_index != drag.index {
            debug!(from = drag.index, to = new_index, "slide moved");
        }
        drag.index = new_index;
        Some(new_index)
    }

    pub(crate) fn mark_dropped(&mut self) {
        if let Some(drag) = self.active.as_mut() {
            drag.dropped = true;
        }
    }

    /// End the gesture, normally or not. Always clears the dragging flag.
    pub fn finish(&mut self, carousel: &mut Carousel) -> Option<ActiveDrag> {
        carousel.clear_dragging();
        self.active.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::Slide;

    fn strip(ids: &[&str]) -> Carousel {
        Carousel::from_slides(ids.iter().map(|id| Slide::new(*id, "")).collect())
    }

    fn ids(carousel: &Carousel) -> Vec<&str> {
        carousel.slides().iter().filter_map(Slide::id).collect()
    }

    #[test]
    fn anchor_is_closest_centre_right_of_pointer() {
        let centers = vec![(0, 50.0), (1, 150.0), (2, 250.0)];
        assert_eq!(insertion_anchor(centers.clone(), 120.0), Some(1));
        assert_eq!(insertion_anchor(centers.clone(), 10.0), Some(0));
        assert_eq!(insertion_anchor(centers.clone(), 260.0), None);
        // Exactly on a centre is not "before" it
        assert_eq!(insertion_anchor(centers, 150.0), Some(2));
    }

    #[test]
    fn anchor_in_empty_strip_is_end() {
        assert_eq!(anchor_in_strip(0, &SlideGeometry::default(), 0.0), None);
    }

    #[test]
    fn over_moves_dragged_slide_and_is_idempotent() {
        let geometry = SlideGeometry::new(100.0, 0.0);
        let mut carousel = strip(&["a", "b", "c", "d"]);
        let mut drag = DragController::new();
        assert!(drag.start(&mut carousel, 0));

        // Neighbours without "a": b c d; point before "d" (slot 2)
        let x = geometry.pointer_before(2);
        assert_eq!(drag.over(&mut carousel, 3, x, &geometry), Some(2));
        assert_eq!(ids(&carousel), vec!["b", "c", "a", "d"]);

        // Same pointer again, hovering another slide: nothing changes, no duplicates
        drag.over(&mut carousel, 0, x, &geometry);
        drag.over(&mut carousel, 1, x, &geometry);
        assert_eq!(ids(&carousel), vec!["b", "c", "a", "d"]);
        assert_eq!(carousel.len(), 4);
    }

    #[test]
    fn over_past_last_centre_appends() {
        let geometry = SlideGeometry::new(100.0, 0.0);
        let mut carousel = strip(&["a", "b", "c"]);
        let mut drag = DragController::new();
        drag.start(&mut carousel, 0);
        assert_eq!(drag.over(&mut carousel, 2, 1_000.0, &geometry), Some(2));
        assert_eq!(ids(&carousel), vec!["b", "c", "a"]);
    }

    #[test]
    fn over_without_drag_or_on_itself_is_noop() {
        let geometry = SlideGeometry::default();
        let mut carousel = strip(&["a", "b"]);
        let mut drag = DragController::new();
        assert_eq!(drag.over(&mut carousel, 1, 0.0, &geometry), None);

        drag.start(&mut carousel, 1);
        assert_eq!(drag.over(&mut carousel, 1, 0.0, &geometry), None);
        assert_eq!(drag.over(&mut carousel, 9, 0.0, &geometry), None);
        assert_eq!(ids(&carousel), vec!["a", "b"]);
    }

    #[test]
    fn new_start_replaces_active_drag_and_finish_clears_flag() {
        let mut carousel = strip(&["a", "b", "c"]);
        let mut drag = DragController::new();
        drag.start(&mut carousel, 0);
        drag.start(&mut carousel, 2);

        let flagged: Vec<bool> = carousel.slides().iter().map(|s| s.dragging).collect();
        assert_eq!(flagged, vec![false, false, true]);
        assert_eq!(drag.active().unwrap().project_id.as_deref(), Some("c"));

        let ended = drag.finish(&mut carousel).unwrap();
        assert_eq!(ended.index, 2);
        assert!(!drag.is_active());
        assert!(carousel.slides().iter().all(|s| !s.dragging));
    }

    #[test]
    fn start_on_missing_slide_is_rejected() {
        let mut carousel = strip(&["a"]);
        let mut drag = DragController::new();
        assert!(!drag.start(&mut carousel, 5));
        assert!(!drag.is_active());
    }
}
