//! Filesystem access used by the plugin engine.
//!
//! Every component reads and writes through a [`Storage`] instead of calling
//! `std::fs` directly, so the same sync code runs against the real disk
//! ([`FsStorage`]) or an in-memory tree ([`MemoryStorage`]) whose final
//! contents tests can assert exactly.

pub mod fs;
pub mod memory;

pub use fs::FsStorage;
pub use memory::{MemoryNode, MemoryStorage};

use crate::error::Result;
use std::io;
use std::path::{Path, PathBuf};

/// Kind of a directory entry, as seen without following symbolic links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

pub trait Storage {
    /// True if `path` exists, following symbolic links.
    fn exists(&self, path: &Path) -> bool;

    /// True if anything occupies `path`, including a dangling symbolic link.
    fn entry_exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_symlink(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Raw contents of a file, without requiring valid UTF-8.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Entries of a directory, sorted by name.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create a symbolic link at `link` pointing to `target`.
    fn symlink(&self, target: &Path, link: &Path) -> io::Result<()>;

    fn read_link(&self, path: &Path) -> io::Result<PathBuf>;

    /// Run `f` while holding an exclusive lock keyed on `lock_path`.
    fn with_exclusive_lock<T, F>(&self, lock_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>;
}
