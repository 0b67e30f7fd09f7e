use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Kind of a directory entry, as reported at listing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory, rendered with its children
    Directory,

    /// Regular file
    File,

    /// Symbolic link (never followed)
    Symlink,

    /// Sockets, fifos, devices, or entries whose type could not be read
    Other,
}

/// A direct child of a directory being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// File name, lossily converted to UTF-8
    pub name: String,

    /// Full path to the entry
    pub path: PathBuf,

    /// Entry kind
    pub kind: EntryKind,
}

impl Entry {
    /// Returns true if the renderer should descend into this entry.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    /// Returns true if the name starts with the hidden marker.
    #[must_use]
    pub fn is_hidden(&self, marker: char) -> bool {
        self.name.starts_with(marker)
    }
}

impl From<fs::FileType> for EntryKind {
    fn from(ft: fs::FileType) -> Self {
        if ft.is_symlink() {
            Self::Symlink
        } else if ft.is_dir() {
            Self::Directory
        } else if ft.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// Lists the visible children of `dir`, sorted by name.
///
/// Hidden entries are dropped before sorting. Names that are not valid UTF-8
/// are converted lossily; entries whose converted names collide are ordered
/// by their raw bytes. The file type comes from the
/// directory listing itself, so symlinks are reported as [`EntryKind::Symlink`]
/// and never resolved. An entry whose type cannot be read (for example one
/// removed after the listing) is kept as [`EntryKind::Other`].
///
/// # Errors
///
/// Returns [`Error::Access`] if the directory cannot be opened or read.
pub fn list_entries(dir: &Path, hidden_marker: char) -> Result<Vec<Entry>> {
    let read_dir = fs::read_dir(dir).map_err(|e| Error::access(dir, &e))?;

    let mut entries = Vec::new();
    for item in read_dir {
        let item = item.map_err(|e| Error::access(dir, &e))?;

        let name = item.file_name().to_string_lossy().into_owned();
        if name.starts_with(hidden_marker) {
            trace!("Skipping hidden entry: {}", item.path().display());
            continue;
        }

        let kind = item.file_type().map_or(EntryKind::Other, EntryKind::from);

        entries.push(Entry {
            name,
            path: item.path(),
            kind,
        });
    }

    // Raw names break ties between distinct names that convert to the same text.
    entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_sorted_case_sensitive() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("b.txt").write_str("").unwrap();
        temp.child("a.txt").write_str("").unwrap();
        temp.child("Z.txt").write_str("").unwrap();
        temp.child("_x").write_str("").unwrap();

        let entries = list_entries(temp.path(), '.').unwrap();

        assert_eq!(names(&entries), vec!["Z.txt", "_x", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_hidden_entries_skipped() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".env").write_str("").unwrap();
        temp.child(".git/HEAD").write_str("").unwrap();
        temp.child("main.rs").write_str("").unwrap();

        let entries = list_entries(temp.path(), '.').unwrap();

        assert_eq!(names(&entries), vec!["main.rs"]);
    }

    #[test]
    fn test_custom_marker() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("_private").write_str("").unwrap();
        temp.child(".visible").write_str("").unwrap();

        let entries = list_entries(temp.path(), '_').unwrap();

        assert_eq!(names(&entries), vec![".visible"]);
        assert!(!entries[0].is_hidden('_'));
        assert!(entries[0].is_hidden('.'));
    }

    #[test]
    fn test_kinds() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("dir").create_dir_all().unwrap();
        temp.child("file.txt").write_str("").unwrap();

        let entries = list_entries(temp.path(), '.').unwrap();

        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert!(entries[0].is_dir());
        assert_eq!(entries[1].kind, EntryKind::File);
        assert!(!entries[1].is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_not_followed() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("real").create_dir_all().unwrap();
        std::os::unix::fs::symlink(temp.child("real").path(), temp.child("link").path())
            .unwrap();

        let entries = list_entries(temp.path(), '.').unwrap();

        assert_eq!(names(&entries), vec!["link", "real"]);
        assert_eq!(entries[0].kind, EntryKind::Symlink);
        assert!(!entries[0].is_dir());
    }

    #[test]
    fn test_missing_directory_is_access_error() {
        let temp = assert_fs::TempDir::new().unwrap();

        let err = list_entries(&temp.path().join("missing"), '.').unwrap_err();

        assert!(err.is_access());
    }

    #[test]
    fn test_file_is_access_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("plain.txt").write_str("x").unwrap();

        let err = list_entries(temp.child("plain.txt").path(), '.').unwrap_err();

        assert!(err.is_access());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_lossy_name_collisions_order_by_raw_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = assert_fs::TempDir::new().unwrap();
        // Written in reverse so creation order cannot explain the result.
        for raw in [b"\xff-name".as_slice(), b"\xfe-name".as_slice()] {
            std::fs::write(temp.path().join(OsStr::from_bytes(raw)), "").unwrap();
        }

        let entries = list_entries(temp.path(), '.').unwrap();

        assert_eq!(entries[0].name, entries[1].name);
        let raw: Vec<&[u8]> = entries
            .iter()
            .map(|e| e.path.file_name().unwrap().as_bytes())
            .collect();
        assert_eq!(raw, vec![b"\xfe-name".as_slice(), b"\xff-name".as_slice()]);
    }
}
