use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

const DEFAULT_ROOT_DIR: &str = "src";
const DEFAULT_OUTPUT_FILE: &str = "project_structure.txt";
const DEFAULT_HIDDEN_MARKER: char = '.';

/// What to do when a subdirectory cannot be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessPolicy {
    /// Abort the whole run on the first unreadable directory
    #[default]
    Abort,
    /// Render the directory with an `[unreadable]` marker and keep going
    Skip,
}

/// Configuration for a tree generation run.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Directory whose contents are rendered
    pub root_dir: PathBuf,

    /// File the rendered tree is written to
    pub output_file: PathBuf,

    /// First line of the output, naming the root
    pub root_label: String,

    /// Entries whose name starts with this character are skipped
    pub hidden_marker: char,

    /// Handling of directories that cannot be listed
    pub access_policy: AccessPolicy,

    /// Dry run mode (no file writes)
    pub dry_run: bool,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use project_tree::Config;
    ///
    /// let config = Config::builder()
    ///     .root_dir("./src")
    ///     .output_file("tree.txt")
    ///     .build()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.root_label, "src/");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// The root directory is not checked here; a missing root is reported
    /// by the pipeline as [`Error::RootNotFound`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Output path is empty or points at a directory
    /// - Root label is empty
    pub fn validate(&self) -> Result<()> {
        if self.output_file.as_os_str().is_empty() {
            return Err(Error::config("output_file must not be empty"));
        }

        if self.output_file.is_dir() {
            return Err(Error::config(format!(
                "Output path is a directory: {}",
                self.output_file.display()
            )));
        }

        if self.root_label.is_empty() {
            return Err(Error::config("root_label must not be empty"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let root_dir = PathBuf::from(DEFAULT_ROOT_DIR);
        Self {
            root_label: label_for(&root_dir),
            root_dir,
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            hidden_marker: DEFAULT_HIDDEN_MARKER,
            access_policy: AccessPolicy::Abort,
            dry_run: false,
        }
    }
}

/// Derives the root label from the last path component, with a trailing slash.
///
/// Paths without a usable final component (`.`, `/`) fall back to the path
/// as written.
fn label_for(root: &Path) -> String {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    if name.ends_with('/') {
        name
    } else {
        format!("{name}/")
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    root_dir: Option<PathBuf>,
    output_file: Option<PathBuf>,
    root_label: Option<String>,
    hidden_marker: Option<char>,
    access_policy: Option<AccessPolicy>,
    dry_run: bool,
}

impl ConfigBuilder {
    /// Sets the root directory to render.
    #[must_use]
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(path.into());
        self
    }

    /// Sets the output file path.
    #[must_use]
    pub fn output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Overrides the first output line.
    ///
    /// Defaults to the root directory name followed by `/`.
    #[must_use]
    pub fn root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = Some(label.into());
        self
    }

    /// Sets the character that marks hidden entries.
    #[must_use]
    pub fn hidden_marker(mut self, marker: char) -> Self {
        self.hidden_marker = Some(marker);
        self
    }

    /// Sets the policy for unreadable subdirectories.
    #[must_use]
    pub fn access_policy(mut self, policy: AccessPolicy) -> Self {
        self.access_policy = Some(policy);
        self
    }

    /// Enables dry run mode (no file writes).
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let root_dir = self
            .root_dir
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT_DIR));

        let config = Config {
            root_label: self.root_label.unwrap_or_else(|| label_for(&root_dir)),
            root_dir,
            output_file: self
                .output_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
            hidden_marker: self.hidden_marker.unwrap_or(DEFAULT_HIDDEN_MARKER),
            access_policy: self.access_policy.unwrap_or_default(),
            dry_run: self.dry_run,
        };

        config.validate()?;
        Ok(config)
    }
}
