//! # Storage Layer
//!
//! There is no server-side database. All durable state is one JSON record under a
//! single key, overwritten wholesale on every mutation; the site's
//! `data/projects.json` (see [`crate::remote`]) is only the initial source and an
//! optional best-effort write target.
//!
//! ## Pieces
//!
//! - [`backend::StorageBackend`]: raw key/value I/O.
//!   - [`fs_backend::FsBackend`]: `<data dir>/<key>.json`, atomic writes.
//!   - [`mem_backend::MemBackend`]: in-memory, for tests (write counting, failure
//!     simulation).
//! - [`gateway::Gateway`]: the record shape, the quota check, the checkpoint key.
//! - [`project_store::ProjectStore`]: the live ordered list and its pristine copy.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── projectsData.json          # live record: { "projects": [...] }
//! ├── originalProjectsData.json  # rollback target as of the last save
//! └── config.json                # FolioConfig
//! ```
//!
//! ## Known limitation
//!
//! Nothing guards against two processes editing the same data directory. Each one
//! writes its full view of the store, so the last writer wins and the other's edits are
//! lost without notice.

pub mod backend;
pub mod fs_backend;
pub mod gateway;
pub mod mem_backend;
pub mod project_store;
