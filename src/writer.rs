use crate::{
    config::Config,
    error::{Error, Result},
};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Persists rendered text to the output file.
pub(crate) struct Writer {
    output_file: PathBuf,
}

impl Writer {
    /// Creates a new writer from configuration.
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            output_file: config.output_file.clone(),
        }
    }

    /// Returns the target path.
    pub(crate) fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// Writes `content` as UTF-8, replacing any existing file.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// file cannot be written.
    pub(crate) fn write(&self, content: &str) -> Result<usize> {
        if let Some(parent) = self.output_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
        }

        write_file_atomic(&self.output_file, content)?;

        debug!(
            "Wrote {} bytes to {}",
            content.len(),
            self.output_file.display()
        );
        Ok(content.len())
    }
}

/// Writes a file atomically.
///
/// # Process
///
/// 1. Writes content to a temporary sibling file
/// 2. Syncs the temporary file to disk
/// 3. Renames it over the target path
///
/// A failure at any step leaves the target untouched.
fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = temp_path_for(path);

    let result = write_synced(&temp_path, content)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| Error::io(path, e)));

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_synced(path: &Path, content: &str) -> Result<()> {
    let mut file = fs::File::create(path).map_err(|e| Error::io(path, e))?;

    file.write_all(content.as_bytes())
        .map_err(|e| Error::io(path, e))?;

    // Ensure data is flushed to disk
    file.sync_all().map_err(|e| Error::io(path, e))
}

/// `project_structure.txt` -> `project_structure.txt.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
