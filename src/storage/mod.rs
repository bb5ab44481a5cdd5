//! # Storage Layer
//!
//! Persistence for pulse workspaces. The engine in `domain` never touches
//! this layer; the CLI loads a project here, hands its task list to the
//! engine, and writes mutations back.
//!
//! ## Layout
//!
//! ```text
//! .pulse/
//! ├── projects.json   # All projects + the active-project pointer
//! ├── config.toml     # Workspace configuration
//! └── .gitignore      # Ignores write buffers
//! ```
//!
//! ## Concurrency Safety
//!
//! - [`ProjectStore`] uses file locking (`fs2`) for concurrent access
//! - All writes are atomic (temp file + rename)

mod config;
mod store;
mod workspace;

pub use config::Config;
pub use store::{ProjectStore, StoreError};
pub use workspace::{Workspace, WorkspaceError};
