use colored::Colorize;
use folio::api::{CmdMessage, MessageLevel, ProjectListing};
use folio::config::FolioConfig;
use folio::image_input::DATA_URL_PREFIX;
use folio::model::Bucket;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;
const ID_WIDTH: usize = 20;
const SLIDE_MARKER: &str = "◆";

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// The folder list. Projects with a slide carry its 1-based carousel position.
pub(crate) fn print_projects(projects: &[ProjectListing]) {
    if projects.is_empty() {
        println!("No projects yet.");
        return;
    }

    for listing in projects {
        let (marker, position) = match listing.position {
            Some(p) => (SLIDE_MARKER.to_string(), format!("{:>3}. ", p + 1)),
            None => (" ".to_string(), "     ".to_string()),
        };
        let id = pad_to(&truncate(&listing.record.id, ID_WIDTH), ID_WIDTH);
        let used = 2 + position.width() + ID_WIDTH + 1;
        let name = truncate(&listing.record.name, LINE_WIDTH.saturating_sub(used));

        let line = format!("{} {}{} {}", marker, position, id.cyan(), name);
        if listing.in_carousel {
            println!("{}", line);
        } else {
            println!("{}", line.dimmed());
        }
    }
}

pub(crate) fn print_project_detail(listing: &ProjectListing) {
    let record = &listing.record;
    println!("{} {}", record.id.yellow(), record.name.bold());
    println!("--------------------------------");
    match listing.position {
        Some(p) => println!("carousel position {}, order {}", p + 1, record.order),
        None => println!("not on the carousel, order {}", record.order),
    }
    println!("preview: {}", describe_image(&record.preview_image));
    if !record.description.is_empty() {
        println!();
        println!("{}", record.description);
    }
    for bucket in Bucket::ALL {
        let images = record.images(bucket);
        println!();
        println!("{} ({})", bucket.label().bold(), images.len());
        for (i, image) in images.iter().enumerate() {
            println!("  {:>2}. {}", i + 1, describe_image(image));
        }
    }
}

pub(crate) fn print_config(config: &FolioConfig) {
    for key in FolioConfig::KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{} = {}", key.cyan(), value);
    }
}

/// Embedded images are summarized, not dumped.
fn describe_image(image: &str) -> String {
    if image.starts_with(DATA_URL_PREFIX) {
        format!("<embedded jpeg, {} bytes>", image.len())
    } else {
        image.to_string()
    }
}

fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}

fn pad_to(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}
