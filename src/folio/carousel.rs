//! The rendered carousel strip.
//!
//! Slides are produced from the store, never edited into existence by hand, except
//! transiently during a drag. In view mode one full clone set follows the originals so
//! the strip can scroll forever; clones carry their original's id.

use crate::store::project_store::ProjectStore;

/// One visual unit of the strip.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    /// Join key with the store. `None` models a unit that lost its id attribute.
    pub project_id: Option<String>,
    pub preview: String,
    pub is_clone: bool,
    /// Styling flag for the unit being dragged.
    pub dragging: bool,
}

impl Slide {
    pub fn new(project_id: impl Into<String>, preview: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            preview: preview.into(),
            is_clone: false,
            dragging: false,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Carousel {
    slides: Vec<Slide>,
}

impl Carousel {
    pub fn from_slides(slides: Vec<Slide>) -> Self {
        Self { slides }
    }

    /// Render from the store, sorted by `order`. `looped` appends the clone set.
    pub fn render(store: &ProjectStore, looped: bool, placeholder: &str) -> Self {
        let mut slides: Vec<Slide> = store
            .sorted_by_order()
            .into_iter()
            .map(|p| {
                let preview = if p.preview_image.is_empty() {
                    placeholder
                } else {
                    p.preview_image.as_str()
                };
                Slide::new(p.id.clone(), preview)
            })
            .collect();

        if looped {
            let clones: Vec<Slide> = slides
                .iter()
                .map(|s| Slide {
                    is_clone: true,
                    ..s.clone()
                })
                .collect();
            slides.extend(clones);
        }

        Self { slides }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    /// First slide showing `id`.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id() == Some(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position_of(id).is_some()
    }

    pub(crate) fn remove(&mut self, index: usize) -> Slide {
        self.slides.remove(index)
    }

    /// Insert before `anchor`, or at the end when there is none. Returns the new index.
    pub(crate) fn insert_before(&mut self, anchor: Option<usize>, slide: Slide) -> usize {
        match anchor {
            Some(i) if i <= self.slides.len() => {
                self.slides.insert(i, slide);
                i
            }
            _ => {
                self.slides.push(slide);
                self.slides.len() - 1
            }
        }
    }

    /// Clear the dragging flag everywhere.
    pub(crate) fn clear_dragging(&mut self) {
        for slide in &mut self.slides {
            slide.dragging = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::record;

    fn store() -> ProjectStore {
        let mut a = record("a");
        a.order = 2;
        let mut b = record("b");
        b.order = 0;
        b.preview_image.clear();
        let mut c = record("c");
        c.order = 1;
        ProjectStore::new(vec![a, b, c])
    }

    #[test]
    fn renders_sorted_by_order_with_placeholder() {
        let carousel = Carousel::render(&store(), false, "placeholder.png");
        let ids: Vec<&str> = carousel.slides().iter().filter_map(Slide::id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert_eq!(carousel.slides()[0].preview, "placeholder.png");
        assert!(carousel.slides().iter().all(|s| !s.is_clone));
    }

    #[test]
    fn looped_render_appends_one_clone_set() {
        let carousel = Carousel::render(&store(), true, "p.png");
        assert_eq!(carousel.len(), 6);
        assert!(carousel.slides()[3..].iter().all(|s| s.is_clone));
        let clone_ids: Vec<&str> = carousel.slides()[3..]
            .iter()
            .filter_map(Slide::id)
            .collect();
        assert_eq!(clone_ids, vec!["b", "c", "a"]);
    }
}
