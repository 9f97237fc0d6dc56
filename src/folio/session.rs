//! The editing session: one owner for the store, the strip and the drag state.
//!
//! Every mutation goes through [`Session::commit`], which snapshots, runs the edit,
//! writes the whole store and rolls back if either step fails. Drag gestures arrive as
//! `drag_start` / `drag_over` / `drop` / `drag_end`; the last two reconcile the strip
//! into `order` fields and persist.

use crate::carousel::Carousel;
use crate::drag::{DragController, SlideGeometry};
use crate::error::Result;
use crate::order::{recompute_order, RecomputeReport};
use crate::remote::ManifestRemote;
use crate::store::backend::StorageBackend;
use crate::store::gateway::Gateway;
use crate::store::project_store::ProjectStore;
use tracing::{debug, info, warn};

pub const DEFAULT_PLACEHOLDER: &str = "images/photos/ComfyUI_00070_.png";

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Append a clone set when not editing.
    pub loop_carousel: bool,
    /// Editing shows the bare strip, no clones.
    pub edit_mode: bool,
    pub geometry: SlideGeometry,
    pub placeholder: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            loop_carousel: true,
            edit_mode: true,
            geometry: SlideGeometry::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

/// Where the session's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Local,
    Remote,
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// No drag in progress or nothing to drop.
    Ignored,
    Reordered(RecomputeReport),
}

pub struct Session<B: StorageBackend> {
    store: ProjectStore,
    gateway: Gateway<B>,
    carousel: Carousel,
    drag: DragController,
    options: SessionOptions,
    has_changes: bool,
    source: LoadSource,
}

impl<B: StorageBackend> Session<B> {
    pub fn new(store: ProjectStore, gateway: Gateway<B>, options: SessionOptions) -> Self {
        let has_changes = !store.is_pristine();
        let mut session = Self {
            store,
            gateway,
            carousel: Carousel::default(),
            drag: DragController::new(),
            options,
            has_changes,
            source: LoadSource::Local,
        };
        session.rerender();
        session
    }

    /// Load local data, else the remote manifest, else start empty.
    pub fn open(
        gateway: Gateway<B>,
        remote: Option<&dyn ManifestRemote>,
        options: SessionOptions,
    ) -> Result<Self> {
        if let Some(projects) = gateway.load()? {
            let original = gateway
                .load_checkpoint()?
                .unwrap_or_else(|| projects.clone());
            debug!(projects = projects.len(), "loaded local projects");
            let store = ProjectStore::with_original(projects, original);
            return Ok(Self::new(store, gateway, options).with_source(LoadSource::Local));
        }

        if let Some(remote) = remote {
            match remote.fetch() {
                Ok(Some(manifest)) if !manifest.projects.is_empty() => {
                    info!(
                        projects = manifest.projects.len(),
                        remote = %remote.describe(),
                        "loaded projects from site manifest"
                    );
                    let store = ProjectStore::new(manifest.projects);
                    return Ok(Self::new(store, gateway, options).with_source(LoadSource::Remote));
                }
                Ok(_) => debug!(remote = %remote.describe(), "site manifest is empty"),
                Err(e) => warn!(error = %e, "could not fetch site manifest"),
            }
        }

        Ok(Self::new(ProjectStore::default(), gateway, options).with_source(LoadSource::Empty))
    }

    fn with_source(mut self, source: LoadSource) -> Self {
        self.source = source;
        self
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn gateway(&self) -> &Gateway<B> {
        &self.gateway
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn source(&self) -> LoadSource {
        self.source
    }

    pub fn has_changes(&self) -> bool {
        self.has_changes
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub(crate) fn store_mut(&mut self) -> &mut ProjectStore {
        &mut self.store
    }

    pub(crate) fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    pub(crate) fn set_has_changes(&mut self, value: bool) {
        self.has_changes = value;
    }

    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        if self.options.edit_mode != edit_mode {
            self.options.edit_mode = edit_mode;
            self.rerender();
        }
    }

    /// Rebuild the strip from the store.
    pub fn rerender(&mut self) {
        let looped = self.options.loop_carousel && !self.options.edit_mode;
        self.carousel = Carousel::render(&self.store, looped, &self.options.placeholder);
    }

    /// Write the whole store, changed or not.
    pub fn persist(&self) -> Result<usize> {
        self.gateway.save(self.store.projects())
    }

    pub(crate) fn persist_checkpoint(&self) -> Result<usize> {
        self.gateway.save_checkpoint(self.store.original())
    }

    /// Run an edit and persist it. On any failure the store and strip are put back as
    /// they were and the error is returned.
    pub fn commit<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let outcome = self.commit_quiet(f);
        if outcome.is_ok() {
            self.has_changes = true;
        }
        outcome
    }

    /// [`Session::commit`] without flagging unsaved changes.
    pub(crate) fn commit_quiet<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let store = self.store.clone();
        let carousel = self.carousel.clone();

        let outcome = f(self).and_then(|value| self.persist().map(|_| value));
        if let Err(e) = &outcome {
            warn!(error = %e, "edit rolled back");
            self.store = store;
            self.carousel = carousel;
        }
        outcome
    }

    pub fn drag_start(&mut self, index: usize) -> bool {
        self.drag.start(&mut self.carousel, index)
    }

    pub fn drag_over(&mut self, target: usize, x: f64) -> Option<usize> {
        let geometry = self.options.geometry;
        self.drag.over(&mut self.carousel, target, x, &geometry)
    }

    /// Drop on the strip: reconcile and persist. The drag stays active until
    /// [`Session::drag_end`].
    pub fn drop(&mut self) -> Result<DropOutcome> {
        if !self.drag.is_active() {
            warn!("drop without an active drag, ignored");
            return Ok(DropOutcome::Ignored);
        }
        self.drag.mark_dropped();
        self.reconcile().map(DropOutcome::Reordered)
    }

    /// End of the gesture, whether it was dropped or abandoned. Clears the dragging
    /// flag, reconciles and persists, then re-renders from the store.
    pub fn drag_end(&mut self) -> Result<DropOutcome> {
        let Some(ended) = self.drag.finish(&mut self.carousel) else {
            return Ok(DropOutcome::Ignored);
        };
        debug!(index = ended.index, dropped = ended.dropped, "drag ended");
        let report = self.reconcile()?;
        self.rerender();
        Ok(DropOutcome::Reordered(report))
    }

    /// Drop the gesture without touching the store, e.g. after a failed write.
    pub(crate) fn abandon_drag(&mut self) {
        if self.drag.finish(&mut self.carousel).is_some() {
            self.rerender();
        }
    }

    /// Recompute `order` from the strip, in memory only.
    pub(crate) fn recompute(&mut self) -> RecomputeReport {
        recompute_order(&mut self.store, self.carousel.slides())
    }

    /// Recompute `order` from the strip and write the store.
    pub fn reconcile(&mut self) -> Result<RecomputeReport> {
        let outcome = self.commit(|s| Ok(s.recompute()));
        if outcome.is_err() {
            // The strip moved ahead of the store during the drag
            self.rerender();
        }
        outcome
    }
}
