use crate::model::ProjectRecord;
use crate::session::{Session, SessionOptions};
use crate::store::gateway::Gateway;
use crate::store::mem_backend::MemBackend;
use crate::store::project_store::ProjectStore;

pub fn record(id: &str) -> ProjectRecord {
    ProjectRecord::new(
        id.to_string(),
        format!("Project {}", id),
        String::new(),
        format!("images/{}.jpg", id),
    )
}

/// A session over `MemBackend` holding `ids` with orders 0..n.
pub fn session_with(ids: &[&str]) -> Session<MemBackend> {
    let projects = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let mut r = record(id);
            r.order = i as i64;
            r
        })
        .collect();
    Session::new(
        ProjectStore::new(projects),
        Gateway::new(MemBackend::new()),
        SessionOptions::default(),
    )
}

/// Slide ids in on-screen order.
pub fn slide_ids(session: &Session<MemBackend>) -> Vec<String> {
    session
        .carousel()
        .slides()
        .iter()
        .map(|s| s.project_id.clone().unwrap_or_default())
        .collect()
}

pub fn orders(session: &Session<MemBackend>) -> Vec<(String, i64)> {
    session
        .store()
        .projects()
        .iter()
        .map(|p| (p.id.clone(), p.order))
        .collect()
}
