//! # project-tree
//!
//! Renders a directory as a `tree`-style diagram and saves it to a text file.
//!
//! ## Quick Start
//!
//! ```no_run
//! use project_tree::{Config, Pipeline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .root_dir("./src")
//!     .output_file("project_structure.txt")
//!     .build()?;
//!
//! Pipeline::new(config)?.run()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Output
//!
//! ```text
//! src/
//! ├── a.txt
//! ├── b.txt
//! └── sub
//!     └── c.txt
//! ```
//!
//! Entries starting with `.` are left out along with their contents.
//! Siblings are ordered by name, case-sensitively.

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod entry;
mod error;
mod pipeline;
mod render;
mod writer;

pub use config::{AccessPolicy, Config, ConfigBuilder};
pub use entry::{list_entries, Entry, EntryKind};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, RunStats};
pub use render::{TreeRenderer, TreeStats, BLANK, BRANCH, CORNER, PIPE, UNREADABLE_MARKER};

/// Renders and saves the tree for the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Root directory doesn't exist
/// - A directory cannot be listed
/// - The output file cannot be written
///
/// # Examples
///
/// ```no_run
/// use project_tree::{Config, run};
///
/// # fn main() -> anyhow::Result<()> {
/// run(Config::default())?;
/// # Ok(())
/// # }
/// ```
pub fn run(config: Config) -> Result<RunStats> {
    Pipeline::new(config)?.run()
}
