use crate::commands::{CmdMessage, CmdResult};
use crate::download::Sink;
use crate::error::Result;
use crate::model::{Manifest, ProjectRecord};
use crate::page::{page_filename, render_project_page};
use crate::remote::{ManifestRemote, MANIFEST_PATH};
use crate::session::Session;
use crate::store::backend::StorageBackend;
use std::collections::HashSet;
use tracing::{debug, info};

pub const MANIFEST_FILENAME: &str = "projects.json";

/// Build a deployable copy of the site data: the manifest plus one page per project.
///
/// The store is sorted by `order` and written first, so what gets exported is exactly
/// what is persisted. Projects the site still lists but the store no longer has are
/// reported for manual cleanup.
pub fn run<B: StorageBackend>(
    session: &mut Session<B>,
    sink: Box<dyn Sink>,
    remote: Option<&dyn ManifestRemote>,
    site_title: &str,
) -> Result<CmdResult> {
    session.commit_quiet(|s| {
        s.store_mut().sort_by_order();
        Ok(())
    })?;

    let projects = session.store().projects().to_vec();
    let mut sink = sink;
    let manifest = serde_json::to_string_pretty(&Manifest::new(projects.clone()))?;
    sink.offer(MANIFEST_FILENAME, &manifest)?;
    for project in &projects {
        let html = render_project_page(project, site_title)?;
        sink.offer(&page_filename(&project.id), &html)?;
        debug!(id = %project.id, bytes = html.len(), "page generated");
    }
    let location = sink.finish()?;
    info!(location = %location.display(), projects = projects.len(), "export finished");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} and {} project pages to {}",
        MANIFEST_FILENAME,
        projects.len(),
        location.display()
    )));
    result.add_message(CmdMessage::info(format!(
        "Replace {} with the exported {} and copy the pages to the site root",
        MANIFEST_PATH, MANIFEST_FILENAME
    )));

    if let Some(remote) = remote {
        match remote.fetch() {
            Ok(Some(previous)) => {
                for gone in deleted_projects(&previous.projects, &projects) {
                    let mut message = format!(
                        "Deleted project {}: remove {} by hand",
                        gone.id,
                        page_filename(&gone.id)
                    );
                    if let Some(folder) = &gone.folder {
                        message.push_str(&format!(" and folder {}", folder));
                    }
                    result.add_message(CmdMessage::warning(message));
                }
            }
            Ok(None) => {}
            Err(e) => result.add_message(CmdMessage::info(format!(
                "Could not compare with the published projects: {}",
                e
            ))),
        }
    }

    result.exported_files.push(location);
    Ok(result.with_affected_projects(projects))
}

/// Records in `previous` whose id no longer appears in `current`.
pub fn deleted_projects<'a>(
    previous: &'a [ProjectRecord],
    current: &[ProjectRecord],
) -> Vec<&'a ProjectRecord> {
    let live: HashSet<&str> = current.iter().map(|p| p.id.as_str()).collect();
    previous
        .iter()
        .filter(|p| !live.contains(p.id.as_str()))
        .collect()
}
