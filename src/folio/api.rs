//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single entry
//! point for every folio operation, whichever front-end drives it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (raw drag payload JSON, upload limits from config, export
//!   targets)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O to the terminal**: no stdout or stderr
//! - **Presentation**: positions stay 0-based here; front-ends number them as they like
//!
//! ## Generic Over StorageBackend
//!
//! `FolioApi<B: StorageBackend>` runs on `FsBackend` in production and `MemBackend` in
//! tests, so the facade is tested without touching the filesystem.

use crate::commands::{self, CmdResult};
use crate::config::FolioConfig;
use crate::download::{ArchiveSink, DirSink, Sink};
use crate::error::Result;
use crate::model::Bucket;
use crate::page::render_project_page;
use crate::payload::{DragPayload, RawDragData, FOLDER_SOURCE};
use crate::remote::ManifestRemote;
use crate::session::Session;
use crate::store::backend::StorageBackend;
use std::path::{Path, PathBuf};

pub use crate::commands::config::ConfigAction;
pub use crate::commands::create::NewProject;
pub use crate::commands::images::{ImageSource, UploadPolicy};
pub use crate::commands::{CmdMessage, MessageLevel, ProjectListing};

/// The main API facade for folio operations.
pub struct FolioApi<B: StorageBackend> {
    session: Session<B>,
    config: FolioConfig,
    remote: Option<Box<dyn ManifestRemote>>,
    data_dir: PathBuf,
}

impl<B: StorageBackend> FolioApi<B> {
    pub fn new(
        session: Session<B>,
        config: FolioConfig,
        remote: Option<Box<dyn ManifestRemote>>,
        data_dir: PathBuf,
    ) -> Self {
        Self {
            session,
            config,
            remote,
            data_dir,
        }
    }

    pub fn session(&self) -> &Session<B> {
        &self.session
    }

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy {
            settings: self.config.image,
            large_file_bytes: self.config.large_file_bytes,
        }
    }

    pub fn list_projects(&self) -> Result<CmdResult> {
        commands::list::run(&self.session)
    }

    pub fn show_project(&self, id: &str) -> Result<CmdResult> {
        commands::list::show(&self.session, id)
    }

    pub fn create_project(&mut self, project: NewProject) -> Result<CmdResult> {
        let policy = self.upload_policy();
        commands::create::run(&mut self.session, project, &policy)
    }

    pub fn rename_project(&mut self, id: &str, name: &str) -> Result<CmdResult> {
        commands::update::rename(&mut self.session, id, name)
    }

    pub fn describe_project(&mut self, id: &str, description: &str) -> Result<CmdResult> {
        commands::update::describe(&mut self.session, id, description)
    }

    pub fn delete_project(&mut self, id: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.session, id)
    }

    pub fn set_preview(&mut self, id: &str, source: &ImageSource) -> Result<CmdResult> {
        let policy = self.upload_policy();
        commands::images::set_preview(&mut self.session, id, source, &policy)
    }

    pub fn add_image(&mut self, id: &str, bucket: Bucket, source: &ImageSource) -> Result<CmdResult> {
        let policy = self.upload_policy();
        commands::images::add(&mut self.session, id, bucket, source, &policy)
    }

    pub fn remove_image(&mut self, id: &str, bucket: Bucket, index: usize) -> Result<CmdResult> {
        commands::images::remove(&mut self.session, id, bucket, index)
    }

    pub fn move_image(
        &mut self,
        id: &str,
        from: Bucket,
        index: usize,
        to: Bucket,
        insert_at: Option<usize>,
    ) -> Result<CmdResult> {
        commands::images::move_image(&mut self.session, id, from, index, to, insert_at)
    }

    /// Drop a serialized image payload on one of `target_id`'s strips.
    pub fn drop_image(
        &mut self,
        payload_json: &str,
        target_id: &str,
        to: Bucket,
        insert_at: Option<usize>,
    ) -> Result<CmdResult> {
        match DragPayload::parse(payload_json) {
            Some(payload) => {
                commands::images::drop_on_bucket(&mut self.session, &payload, target_id, to, insert_at)
            }
            None => {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::warning("Unreadable drag payload; no changes"));
                Ok(result)
            }
        }
    }

    /// Move a project's slide to `position` (0-based).
    pub fn move_project(&mut self, id: &str, position: usize) -> Result<CmdResult> {
        commands::reorder::run(&mut self.session, id, position)
    }

    /// Drop a project from the folder list onto the strip by id alone.
    pub fn transfer_project(&mut self, id: &str, at: Option<usize>) -> Result<CmdResult> {
        let payload = RawDragData {
            source: Some(FOLDER_SOURCE.to_string()),
            text: Some(id.to_string()),
            project_json: None,
        }
        .into_payload();
        commands::transfer::run(&mut self.session, payload.as_ref(), at)
    }

    /// Drop serialized drag data on the strip. Accepts a full [`DragPayload`] or a bare
    /// project record, as a folder drag would carry it.
    pub fn transfer_payload(&mut self, json: &str, at: Option<usize>) -> Result<CmdResult> {
        let payload = DragPayload::parse(json).or_else(|| {
            RawDragData {
                source: Some(FOLDER_SOURCE.to_string()),
                text: None,
                project_json: Some(json.to_string()),
            }
            .into_payload()
        });
        commands::transfer::run(&mut self.session, payload.as_ref(), at)
    }

    /// What a drag of this project (or of one of its images) would carry.
    pub fn drag_payload(&self, id: &str, image: Option<(Bucket, usize)>) -> Result<CmdResult> {
        let record = self.session.store().require(id)?;
        let payload = match image {
            Some((bucket, index)) => DragPayload::Image {
                project_id: record.id.clone(),
                bucket,
                index,
            },
            None => DragPayload::for_folder(record),
        };
        Ok(CmdResult::default().with_output(payload.to_json()))
    }

    /// Recompute `order` from the strip as it stands.
    pub fn reconcile(&mut self) -> Result<CmdResult> {
        let report = self.session.reconcile()?;
        let mut result = CmdResult::default();
        let message = if report.changed > 0 {
            format!(
                "Order recomputed: {} of {} projects moved",
                report.changed,
                report.assigned.len()
            )
        } else {
            "Order already matches the carousel".to_string()
        };
        result.add_message(CmdMessage::success(message));
        if report.skipped_without_id > 0 {
            result.add_message(CmdMessage::warning(format!(
                "{} slides without a project id were skipped",
                report.skipped_without_id
            )));
        }
        Ok(result)
    }

    pub fn save(&mut self) -> Result<CmdResult> {
        commands::save::save(&mut self.session, self.remote.as_deref())
    }

    pub fn cancel(&mut self) -> Result<CmdResult> {
        commands::save::cancel(&mut self.session)
    }

    pub fn status(&self) -> Result<CmdResult> {
        commands::save::status(&self.session)
    }

    /// Write the manifest and pages into `dir`, or into a `.tar.gz` inside it.
    pub fn export(&mut self, dir: &Path, archive: bool) -> Result<CmdResult> {
        let sink: Box<dyn Sink> = if archive {
            Box::new(ArchiveSink::in_dir(dir)?)
        } else {
            Box::new(DirSink::new(dir)?)
        };
        let title = self.config.site_title.clone();
        commands::export::run(&mut self.session, sink, self.remote.as_deref(), &title)
    }

    /// Render one project's static page.
    pub fn project_page(&self, id: &str) -> Result<CmdResult> {
        let record = self.session.store().require(id)?;
        let html = render_project_page(record, &self.config.site_title)?;
        Ok(CmdResult::default().with_output(html))
    }

    pub fn config_action(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.data_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }
}
