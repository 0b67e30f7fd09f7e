//! Tree diagram rendering.
//!
//! Produces `tree`-style output: one line per entry, siblings in name order,
//! each line prefixed by the ancestor continuation bars and a connector.

use crate::{
    config::{AccessPolicy, Config},
    entry::{list_entries, Entry},
    error::{Error, Result},
};
use std::path::Path;
use tracing::{debug, warn};

/// Connector for an entry that has later siblings.
pub const BRANCH: &str = "├── ";

/// Connector for the last entry of a directory.
pub const CORNER: &str = "└── ";

/// Prefix extension below a non-last entry.
pub const PIPE: &str = "│   ";

/// Prefix extension below a last entry.
pub const BLANK: &str = "    ";

/// Marker appended to directories skipped under [`AccessPolicy::Skip`].
pub const UNREADABLE_MARKER: &str = " [unreadable]";

/// Counts gathered while rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Directories rendered (excluding the root)
    pub directories: usize,

    /// Non-directory entries rendered
    pub files: usize,

    /// Directories rendered with the unreadable marker
    pub skipped: usize,
}

impl TreeStats {
    /// Total number of rendered entries.
    #[must_use]
    pub const fn entries(&self) -> usize {
        self.directories + self.files
    }
}

/// Lists the visible, sorted children of a directory.
type ListFn = fn(&Path, char) -> Result<Vec<Entry>>;

/// Renders a directory's contents as an indented tree diagram.
#[derive(Debug, Clone)]
pub struct TreeRenderer {
    hidden_marker: char,
    access_policy: AccessPolicy,
    lister: ListFn,
}

impl Default for TreeRenderer {
    fn default() -> Self {
        Self {
            hidden_marker: '.',
            access_policy: AccessPolicy::Abort,
            lister: list_entries,
        }
    }
}

impl TreeRenderer {
    /// Creates a renderer from configuration.
    #[must_use]
    pub const fn new(config: &Config) -> Self {
        Self {
            hidden_marker: config.hidden_marker,
            access_policy: config.access_policy,
            lister: list_entries,
        }
    }

    /// Sets the policy for unreadable subdirectories.
    #[must_use]
    pub const fn with_access_policy(mut self, policy: AccessPolicy) -> Self {
        self.access_policy = policy;
        self
    }

    #[cfg(test)]
    const fn with_lister(mut self, lister: ListFn) -> Self {
        self.lister = lister;
        self
    }

    /// Renders the children of `path`, each line starting with `prefix`.
    ///
    /// No line is emitted for `path` itself. Pass an empty prefix for the
    /// top-level call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Access`] if `path` cannot be listed, or if any
    /// subdirectory cannot be listed under [`AccessPolicy::Abort`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use project_tree::TreeRenderer;
    ///
    /// # fn main() -> project_tree::Result<()> {
    /// let text = TreeRenderer::default().render("src", "")?;
    /// print!("{text}");
    /// # Ok(())
    /// # }
    /// ```
    pub fn render(&self, path: impl AsRef<Path>, prefix: &str) -> Result<String> {
        let mut out = String::new();
        let mut stats = TreeStats::default();
        self.render_into(path.as_ref(), prefix, &mut out, &mut stats)?;
        Ok(out)
    }

    /// Renders a full diagram: `label` on the first line, then the children.
    ///
    /// # Errors
    ///
    /// Same as [`TreeRenderer::render`].
    pub fn render_tree(&self, root: impl AsRef<Path>, label: &str) -> Result<String> {
        self.render_with_stats(root, label).map(|(text, _)| text)
    }

    /// Like [`TreeRenderer::render_tree`], also returning entry counts.
    ///
    /// # Errors
    ///
    /// Same as [`TreeRenderer::render`].
    pub fn render_with_stats(
        &self,
        root: impl AsRef<Path>,
        label: &str,
    ) -> Result<(String, TreeStats)> {
        let mut out = format!("{label}\n");
        let mut stats = TreeStats::default();
        self.render_into(root.as_ref(), "", &mut out, &mut stats)?;

        debug!(
            "Rendered {} directories, {} files ({} skipped)",
            stats.directories, stats.files, stats.skipped
        );
        Ok((out, stats))
    }

    fn render_into(
        &self,
        dir: &Path,
        prefix: &str,
        out: &mut String,
        stats: &mut TreeStats,
    ) -> Result<()> {
        let entries = (self.lister)(dir, self.hidden_marker)?;
        let count = entries.len();

        for (index, entry) in entries.iter().enumerate() {
            let is_last = index + 1 == count;
            let (connector, extension) = if is_last {
                (CORNER, BLANK)
            } else {
                (BRANCH, PIPE)
            };

            out.push_str(prefix);
            out.push_str(connector);
            out.push_str(&entry.name);

            if !entry.is_dir() {
                out.push('\n');
                stats.files += 1;
                continue;
            }

            stats.directories += 1;
            let child_prefix = format!("{prefix}{extension}");

            // Children go to a scratch buffer so a skipped directory leaves no partial lines.
            let mut children = String::new();
            match self.render_into(&entry.path, &child_prefix, &mut children, stats) {
                Ok(()) => {
                    out.push('\n');
                    out.push_str(&children);
                }
                Err(Error::Access { path, message })
                    if self.access_policy == AccessPolicy::Skip =>
                {
                    warn!("Skipping unreadable directory {}: {}", path.display(), message);
                    stats.skipped += 1;
                    out.push_str(UNREADABLE_MARKER);
                    out.push('\n');
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }
}
