//! Business logic, one module per operation.
//!
//! Commands take a [`Session`](crate::session::Session) and return a [`CmdResult`]:
//! records touched, listings, files written, raw output, and user-facing messages.
//! They never print. Anything that mutates goes through `Session::commit` so a failed
//! write leaves the store and the strip as they were.

use crate::config::FolioConfig;
use crate::model::ProjectRecord;
use std::path::PathBuf;

pub mod config;
pub mod create;
pub mod delete;
pub mod export;
pub mod images;
pub mod list;
pub mod reorder;
pub mod save;
pub mod transfer;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A line of feedback for the user. Front-ends decide how each level looks.
#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn new(level: MessageLevel, content: impl Into<String>) -> Self {
        Self {
            level,
            content: content.into(),
        }
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Info, content)
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Success, content)
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Warning, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Error, content)
    }
}

/// A project as the folder list shows it.
#[derive(Debug, Clone)]
pub struct ProjectListing {
    pub record: ProjectRecord,
    /// Highlighted when the project already has a slide.
    pub in_carousel: bool,
    /// First slide index on the strip.
    pub position: Option<usize>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_projects: Vec<ProjectRecord>,
    pub listed_projects: Vec<ProjectListing>,
    pub exported_files: Vec<PathBuf>,
    /// Raw text meant for stdout as-is (generated pages, payload JSON).
    pub output: Option<String>,
    pub config: Option<FolioConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_projects(mut self, projects: Vec<ProjectRecord>) -> Self {
        self.affected_projects = projects;
        self
    }

    pub fn with_listed_projects(mut self, projects: Vec<ProjectListing>) -> Self {
        self.listed_projects = projects;
        self
    }

    pub fn with_output(mut self, output: String) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_config(mut self, config: FolioConfig) -> Self {
        self.config = Some(config);
        self
    }
}
