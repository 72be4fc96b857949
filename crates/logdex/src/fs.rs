//! File system access used by the scanner and parser.
//!
//! The [`FileSystem`] trait abstracts the three capabilities ingestion needs
//! (list a directory, stat its entries, read a file as text) so tests and
//! embedders can supply their own backend. [`OsFileSystem`] is the default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Metadata for one directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    /// Full path of the entry
    pub path: PathBuf,
    /// True for regular files
    pub is_file: bool,
    /// Size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: DateTime<Utc>,
}

/// Directory listing and file reading capability.
pub trait FileSystem: Send + Sync {
    /// Lists the direct children of `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be opened or listed.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<FileStat>>;

    /// Reads a whole file as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<FileStat>> {
        let dir = std::path::absolute(dir)?;
        let mut stats = Vec::new();

        for entry in fs::read_dir(&dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            let path = entry.path();
            // Follows symlinks so a linked log file counts as a file.
            let metadata = match fs::metadata(&path) {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "cannot stat file");
                    continue;
                }
            };
            let modified = metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());

            stats.push(FileStat {
                path,
                is_file: metadata.is_file(),
                size: metadata.len(),
                modified,
            });
        }

        Ok(stats)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_list_dir_reports_files_and_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("error.log"), "boom\n").expect("write");
        fs::create_dir(dir.path().join("nested")).expect("mkdir");

        let mut stats = OsFileSystem.list_dir(dir.path()).expect("list");
        stats.sort_by(|a, b| a.path.cmp(&b.path));

        assert_eq!(stats.len(), 2);
        assert!(stats[0].is_file);
        assert_eq!(stats[0].size, 5);
        assert!(stats[0].path.is_absolute());
        assert!(!stats[1].is_file);
    }

    #[test]
    fn os_list_missing_dir_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = OsFileSystem.list_dir(&dir.path().join("missing"));
        assert!(result.is_err());
    }

    #[test]
    fn os_read_is_lossy_utf8() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("debug.log");
        fs::write(&path, b"ok \xff line\n").expect("write");

        let text = OsFileSystem.read_to_string(&path).expect("read");
        assert!(text.starts_with("ok "));
        assert!(text.ends_with(" line\n"));
    }

    #[cfg(unix)]
    #[test]
    fn os_list_dir_follows_symlinks() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("app-2025-01-20.txt");
        fs::write(&target, "rotated\n").expect("write");
        std::os::unix::fs::symlink(&target, dir.path().join("error.log")).expect("symlink");

        let stats = OsFileSystem.list_dir(dir.path()).expect("list");
        let link = stats
            .iter()
            .find(|s| s.path.ends_with("error.log"))
            .expect("link listed");
        assert!(link.is_file);
        assert_eq!(link.size, 8);
    }
}
