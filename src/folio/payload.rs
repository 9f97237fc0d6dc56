//! What a drag carries across the drop boundary.
//!
//! Native drags expose three loose string slots; they are folded into [`DragPayload`]
//! once, at the drop handler, so nothing downstream probes for ad hoc keys.

use crate::model::{Bucket, ProjectRecord};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Source tag set by the secondary (folder) list.
pub const FOLDER_SOURCE: &str = "folder";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DragPayload {
    /// Same-list move of a slide already on the strip.
    Reorder { id: String },
    /// A project dragged in from the folder list. `record` travels with the drag so the
    /// drop does not depend on the source list still existing.
    Transfer {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        record: Option<ProjectRecord>,
    },
    /// One image reference leaving its bucket.
    #[serde(rename_all = "camelCase")]
    Image {
        project_id: String,
        bucket: Bucket,
        index: usize,
    },
}

impl DragPayload {
    pub fn for_folder(record: &ProjectRecord) -> Self {
        DragPayload::Transfer {
            id: record.id.clone(),
            record: Some(record.clone()),
        }
    }

    /// Parse the tagged JSON form. Anything unreadable is `None`.
    pub fn parse(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!(error = %e, "unreadable drag payload");
                None
            }
        }
    }

    pub fn to_json(&self) -> String {
        // Plain data, serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn id(&self) -> &str {
        match self {
            DragPayload::Reorder { id } | DragPayload::Transfer { id, .. } => id,
            DragPayload::Image { project_id, .. } => project_id,
        }
    }
}

/// The three native data-transfer slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDragData {
    /// `drag-source`
    pub source: Option<String>,
    /// `text/plain`
    pub text: Option<String>,
    /// `application/project`
    pub project_json: Option<String>,
}

impl RawDragData {
    /// Fold the slots into a payload. A folder drag with an unparseable record is
    /// dropped outright; a drag with nothing usable is `None`.
    pub fn into_payload(self) -> Option<DragPayload> {
        let text = self.text.filter(|t| !t.trim().is_empty());
        let from_folder = self.source.as_deref() == Some(FOLDER_SOURCE);

        if let Some(json) = self.project_json.filter(|j| !j.trim().is_empty()) {
            let record: ProjectRecord = match serde_json::from_str(&json) {
                Ok(record) => record,
                Err(e) => {
                    warn!(error = %e, "malformed project in drag data, drop ignored");
                    return None;
                }
            };
            return Some(DragPayload::Transfer {
                id: record.id.clone(),
                record: Some(record),
            });
        }

        let id = text?;
        if from_folder {
            Some(DragPayload::Transfer { id, record: None })
        } else {
            Some(DragPayload::Reorder { id })
        }
    }

    pub fn from_payload(payload: &DragPayload) -> Self {
        match payload {
            DragPayload::Reorder { id } => Self {
                source: None,
                text: Some(id.clone()),
                project_json: None,
            },
            DragPayload::Transfer { id, record } => Self {
                source: Some(FOLDER_SOURCE.to_string()),
                text: Some(id.clone()),
                project_json: record
                    .as_ref()
                    .and_then(|r| serde_json::to_string(r).ok()),
            },
            DragPayload::Image { .. } => Self {
                source: None,
                text: Some(payload.to_json()),
                project_json: None,
            },
        }
    }
}
