//! Image bucket edits.
//!
//! Any change to a bucket's contents (add, remove, move, reorder) invalidates that
//! bucket's `carouselOrder` permutation, which is then cleared so the page falls back
//! to storage order.

use crate::commands::{CmdMessage, CmdResult};
use crate::config::DEFAULT_LARGE_FILE_BYTES;
use crate::error::{FolioError, Result};
use crate::image_input::{read_upload, ImageSettings};
use crate::model::Bucket;
use crate::payload::DragPayload;
use crate::session::Session;
use crate::store::backend::StorageBackend;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// A path or URL stored as-is.
    Reference(String),
    /// A local file to compress and embed.
    Upload(PathBuf),
}

#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
    pub settings: ImageSettings,
    pub large_file_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            settings: ImageSettings::default(),
            large_file_bytes: DEFAULT_LARGE_FILE_BYTES,
        }
    }
}

/// Turn a source into the string stored on the record. Runs before any mutation.
pub fn resolve_image(
    source: &ImageSource,
    policy: &UploadPolicy,
    result: &mut CmdResult,
) -> Result<String> {
    match source {
        ImageSource::Reference(path) => {
            let path = path.trim();
            if path.is_empty() {
                return Err(FolioError::Validation("Image path is empty".into()));
            }
            Ok(path.to_string())
        }
        ImageSource::Upload(file) => {
            let upload = read_upload(file, &policy.settings, policy.large_file_bytes)?;
            if upload.oversized {
                result.add_message(CmdMessage::warning(format!(
                    "{} is {:.1} MB; large images slow the editor down",
                    file.display(),
                    upload.source_bytes as f64 / (1024.0 * 1024.0)
                )));
            }
            Ok(upload.image.data_url)
        }
    }
}

pub fn add<B: StorageBackend>(
    session: &mut Session<B>,
    id: &str,
    bucket: Bucket,
    source: &ImageSource,
    policy: &UploadPolicy,
) -> Result<CmdResult> {
    session.store().require(id)?;
    let mut result = CmdResult::default();
    let image = resolve_image(source, policy, &mut result)?;

    let updated = session.commit(|s| {
        let record = s.store_mut().require_mut(id)?;
        record.images_mut(bucket).push(image);
        record.reset_carousel_order(bucket);
        Ok(record.clone())
    })?;

    result.add_message(CmdMessage::success(format!(
        "Image added to {} of {} ({} total)",
        bucket,
        id,
        updated.images(bucket).len()
    )));
    Ok(result.with_affected_projects(vec![updated]))
}

pub fn remove<B: StorageBackend>(
    session: &mut Session<B>,
    id: &str,
    bucket: Bucket,
    index: usize,
) -> Result<CmdResult> {
    let updated = session.commit(|s| {
        let record = s.store_mut().require_mut(id)?;
        let images = record.images_mut(bucket);
        if index >= images.len() {
            return Err(out_of_range(id, bucket, index));
        }
        images.remove(index);
        record.reset_carousel_order(bucket);
        Ok(record.clone())
    })?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Removed image {} from {} of {}",
        index + 1,
        bucket,
        id
    )));
    Ok(result.with_affected_projects(vec![updated]))
}

pub fn set_preview<B: StorageBackend>(
    session: &mut Session<B>,
    id: &str,
    source: &ImageSource,
    policy: &UploadPolicy,
) -> Result<CmdResult> {
    session.store().require(id)?;
    let mut result = CmdResult::default();
    let image = resolve_image(source, policy, &mut result)?;

    let updated = session.commit(|s| {
        let record = s.store_mut().require_mut(id)?;
        record.preview_image = image;
        let record = record.clone();
        s.rerender();
        Ok(record)
    })?;

    result.add_message(CmdMessage::success(format!("Preview updated for {}", id)));
    Ok(result.with_affected_projects(vec![updated]))
}

/// Move one image to another bucket, or within its own. The reference leaves `from`
/// and lands in `to` at `insert_at` (end when `None` or past the end).
pub fn move_image<B: StorageBackend>(
    session: &mut Session<B>,
    id: &str,
    from: Bucket,
    index: usize,
    to: Bucket,
    insert_at: Option<usize>,
) -> Result<CmdResult> {
    let updated = session.commit(|s| {
        let record = s.store_mut().require_mut(id)?;
        if index >= record.images(from).len() {
            return Err(out_of_range(id, from, index));
        }
        let image = record.images_mut(from).remove(index);
        let target = record.images_mut(to);
        let at = insert_at.unwrap_or(target.len()).min(target.len());
        target.insert(at, image);

        record.reset_carousel_order(from);
        record.reset_carousel_order(to);
        Ok(record.clone())
    })?;

    let mut result = CmdResult::default();
    let message = if from == to {
        format!("Reordered {} of {}", from, id)
    } else {
        format!("Moved image from {} to {} in {}", from, to, id)
    };
    result.add_message(CmdMessage::success(message));
    Ok(result.with_affected_projects(vec![updated]))
}

/// Drop handler for an image strip. Anything but an image payload is ignored.
pub fn drop_on_bucket<B: StorageBackend>(
    session: &mut Session<B>,
    payload: &DragPayload,
    target_id: &str,
    to: Bucket,
    insert_at: Option<usize>,
) -> Result<CmdResult> {
    match payload {
        DragPayload::Image {
            project_id,
            bucket,
            index,
        } if project_id == target_id => {
            move_image(session, project_id, *bucket, *index, to, insert_at)
        }
        _ => {
            warn!(target = target_id, "drop on image strip ignored");
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info("Nothing to drop here"));
            Ok(result)
        }
    }
}

fn out_of_range(id: &str, bucket: Bucket, index: usize) -> FolioError {
    FolioError::Api(format!(
        "{} of {} has no image {}",
        bucket.label(),
        id,
        index + 1
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CarouselOrder;
    use crate::test_utils::session_with;

    fn with_images() -> Session<crate::store::mem_backend::MemBackend> {
        let mut session = session_with(&["villa"]);
        session.commit(|s| {
            let r = s.store_mut().require_mut("villa")?;
            r.photos = vec!["p0.jpg".into(), "p1.jpg".into()];
            r.drawings = vec!["d0.jpg".into()];
            r.carousel_order = Some(CarouselOrder {
                photos: vec![1, 0],
                drawings: vec![0],
                renders: vec![],
            });
            Ok(())
        })
        .unwrap();
        session
    }

    fn reference(path: &str) -> ImageSource {
        ImageSource::Reference(path.into())
    }

    #[test]
    fn move_across_buckets_is_exclusive() {
        let mut session = with_images();
        let before = session.store().get("villa").unwrap().image_count();

        move_image(&mut session, "villa", Bucket::Photos, 1, Bucket::Drawings, None).unwrap();

        let r = session.store().get("villa").unwrap();
        assert_eq!(r.photos.iter().filter(|p| *p == "p1.jpg").count(), 0);
        assert_eq!(r.drawings.iter().filter(|p| *p == "p1.jpg").count(), 1);
        assert_eq!(r.drawings, vec!["d0.jpg", "p1.jpg"]);
        assert_eq!(r.image_count(), before);
        let order = r.carousel_order.as_ref().unwrap();
        assert!(order.photos.is_empty() && order.drawings.is_empty());
    }

    #[test]
    fn move_inserts_at_drop_position_and_within_bucket() {
        let mut session = with_images();
        move_image(&mut session, "villa", Bucket::Photos, 0, Bucket::Drawings, Some(0)).unwrap();
        assert_eq!(session.store().get("villa").unwrap().drawings, vec!["p0.jpg", "d0.jpg"]);

        move_image(&mut session, "villa", Bucket::Drawings, 1, Bucket::Drawings, Some(0)).unwrap();
        assert_eq!(session.store().get("villa").unwrap().drawings, vec!["d0.jpg", "p0.jpg"]);
    }

    #[test]
    fn image_payload_drop_moves_and_other_payloads_are_ignored() {
        let mut session = with_images();
        let writes = session.gateway().backend().write_count();

        let ignored = DragPayload::Reorder { id: "villa".into() };
        drop_on_bucket(&mut session, &ignored, "villa", Bucket::Renders, None).unwrap();
        assert_eq!(session.gateway().backend().write_count(), writes);

        let payload = DragPayload::Image {
            project_id: "villa".into(),
            bucket: Bucket::Photos,
            index: 0,
        };
        drop_on_bucket(&mut session, &payload, "villa", Bucket::Renders, None).unwrap();
        assert_eq!(session.store().get("villa").unwrap().renders, vec!["p0.jpg"]);
    }

    #[test]
    fn add_and_remove_reset_only_that_bucket() {
        let mut session = with_images();
        add(
            &mut session,
            "villa",
            Bucket::Photos,
            &reference("p2.jpg"),
            &UploadPolicy::default(),
        )
        .unwrap();
        let r = session.store().get("villa").unwrap();
        assert_eq!(r.photos.len(), 3);
        let order = r.carousel_order.as_ref().unwrap();
        assert!(order.photos.is_empty());
        assert_eq!(order.drawings, vec![0]);

        remove(&mut session, "villa", Bucket::Photos, 0).unwrap();
        assert_eq!(session.store().get("villa").unwrap().photos, vec!["p1.jpg", "p2.jpg"]);
        assert!(remove(&mut session, "villa", Bucket::Photos, 9).is_err());
    }

    #[test]
    fn quota_failure_pops_appended_image() {
        let mut session = with_images();
        session.gateway().backend().set_simulate_write_error(true);

        let err = add(
            &mut session,
            "villa",
            Bucket::Photos,
            &reference("p2.jpg"),
            &UploadPolicy::default(),
        )
        .unwrap_err();
        assert!(err.is_storage());
        assert_eq!(session.store().get("villa").unwrap().photos.len(), 2);
    }

    #[test]
    fn undecodable_upload_mutates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"nope").unwrap();
        let mut session = with_images();
        let writes = session.gateway().backend().write_count();

        let err = add(
            &mut session,
            "villa",
            Bucket::Renders,
            &ImageSource::Upload(path),
            &UploadPolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FolioError::Image(_)));
        assert!(session.store().get("villa").unwrap().renders.is_empty());
        assert_eq!(session.gateway().backend().write_count(), writes);
    }

    #[test]
    fn preview_replacement_updates_slide() {
        let mut session = with_images();
        set_preview(&mut session, "villa", &reference("cover.jpg"), &UploadPolicy::default())
            .unwrap();
        assert_eq!(session.carousel().slides()[0].preview, "cover.jpg");
    }
}
