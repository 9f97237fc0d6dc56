//! # Folio Architecture
//!
//! Folio is the editing core behind a small portfolio site: a carousel of project
//! thumbnails, a folder list of every project with its image buckets, and an export
//! step that rebuilds the site's `data/projects.json` and one static page per project.
//!
//! Like any UI-agnostic library, the core never prints and never exits. The CLI in
//! `main.rs` is one client; a browser front-end driving the same [`api::FolioApi`]
//! would be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, cli/)                         │
//! │  - Parses arguments, prints messages, owns exit codes       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Resolves positions / payloads, returns CmdResult         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic, always through Session::commit           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session + Storage (session.rs, store/)                     │
//! │  - ProjectStore with pristine snapshot                      │
//! │  - Gateway over a StorageBackend (FsBackend, MemBackend)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering
//!
//! The carousel is a list of slides rendered from the store, sorted by `order`, with an
//! optional clone set appended for infinite scrolling. Drag gestures move slides in that
//! list ([`drag`]); on drop the canonical order is recomputed from the slide sequence
//! ([`order`]) and the whole store is persisted. Clones share their original's id and
//! never receive an order of their own.
//!
//! ## Module Overview
//!
//! - [`api`]: facade, entry point for all operations
//! - [`commands`]: business logic per operation
//! - [`session`]: the application-state object (store, gateway, carousel, drag)
//! - [`store`]: backends, `ProjectStore`, persistence `Gateway`
//! - [`carousel`], [`drag`], [`order`], [`payload`]: the reorder / transfer core
//! - [`image_input`]: downsample + JPEG encode into embeddable payloads
//! - [`page`]: static project page generation
//! - [`remote`]: the site's `data/projects.json` (directory or http)
//! - [`download`]: directory / tar.gz side channel for exported files
//! - [`config`], [`init`]: configuration and context wiring
//! - [`model`], [`error`]: core types

pub mod api;
pub mod carousel;
pub mod commands;
pub mod config;
pub mod download;
pub mod drag;
pub mod error;
pub mod image_input;
pub mod init;
pub mod model;
pub mod order;
pub mod page;
pub mod payload;
pub mod remote;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;
