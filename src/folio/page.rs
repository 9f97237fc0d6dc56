//! Static project page generation.
//!
//! A pure function of one record: the three image strips are laid out in their
//! `carouselOrder`, and the record itself is embedded as inline JSON for client
//! scripts.

use crate::error::Result;
use crate::model::{Bucket, ProjectRecord};
use minijinja::{context, Environment, Value};
use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::error;

const PROJECT_TEMPLATE: &str = "project.html";

/// Page strip order, top to bottom.
const PAGE_BUCKETS: [Bucket; 3] = [Bucket::Drawings, Bucket::Photos, Bucket::Renders];

static PAGES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    // `.html` names get HTML auto-escaping
    if let Err(e) = env.add_template(PROJECT_TEMPLATE, include_str!("templates/project.html")) {
        error!(error = %e, "project page template failed to load");
    }
    env
});

#[derive(Serialize)]
struct PageCarousel<'a> {
    bucket: &'static str,
    label: &'static str,
    images: Vec<&'a str>,
}

/// File name of a project's generated page.
pub fn page_filename(id: &str) -> String {
    format!("project-{}.html", id)
}

pub fn render_project_page(record: &ProjectRecord, site_title: &str) -> Result<String> {
    let order = record.carousel_order.clone().unwrap_or_default();
    let carousels: Vec<PageCarousel> = PAGE_BUCKETS
        .iter()
        .map(|&bucket| PageCarousel {
            bucket: bucket.as_str(),
            label: bucket.label(),
            images: order.arrange(bucket, record.images(bucket)),
        })
        .collect();

    let template = PAGES.get_template(PROJECT_TEMPLATE)?;
    let html = template.render(context! {
        lang => "en",
        name => &record.name,
        description => &record.description,
        site_title => site_title,
        back_label => "Back",
        carousels => carousels,
        record_json => Value::from_safe_string(script_json(record)?),
    })?;
    Ok(html)
}

/// JSON that cannot close the surrounding `<script>` element.
fn script_json(record: &ProjectRecord) -> Result<String> {
    let json = serde_json::to_string(record)?;
    Ok(json.replace("</", "<\\/").replace("<!--", "<\\!--"))
}
