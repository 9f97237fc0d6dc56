use crate::commands::{CmdResult, ProjectListing};
use crate::error::Result;
use crate::session::Session;
use crate::store::backend::StorageBackend;

/// The folder list: every project by `order`, marked when it has a slide.
pub fn run<B: StorageBackend>(session: &Session<B>) -> Result<CmdResult> {
    let carousel = session.carousel();
    let listed = session
        .store()
        .sorted_by_order()
        .into_iter()
        .map(|record| {
            let position = carousel.position_of(&record.id);
            ProjectListing {
                record: record.clone(),
                in_carousel: position.is_some(),
                position,
            }
        })
        .collect();
    Ok(CmdResult::default().with_listed_projects(listed))
}

pub fn show<B: StorageBackend>(session: &Session<B>, id: &str) -> Result<CmdResult> {
    let record = session.store().require(id)?.clone();
    let position = session.carousel().position_of(id);
    Ok(CmdResult::default().with_listed_projects(vec![ProjectListing {
        record,
        in_carousel: position.is_some(),
        position,
    }]))
}
