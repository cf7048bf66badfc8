//! In-memory storage for tests.

use super::{DirEntry, EntryKind, Storage};
use crate::error::Result;
use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

const MAX_LINK_DEPTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryNode {
    File(String),
    Dir,
    Symlink(PathBuf),
}

/// [`Storage`] backed by a `BTreeMap` of absolute paths. No persistence.
///
/// Symbolic links are only resolved for the final path component, which is
/// all the plugin engine needs: it reads through live links but never
/// through a linked directory.
#[derive(Debug)]
pub struct MemoryStorage {
    nodes: Mutex<BTreeMap<PathBuf, MemoryNode>>,
    lock: Mutex<()>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(PathBuf::from("/"), MemoryNode::Dir);
        Self {
            nodes: Mutex::new(nodes),
            lock: Mutex::new(()),
        }
    }

    /// Insert a file, creating missing parent directories.
    pub fn insert_file(&self, path: impl AsRef<Path>, contents: &str) {
        let path = normalize(path.as_ref());
        let mut nodes = self.nodes();
        if let Some(parent) = path.parent() {
            for ancestor in parent.ancestors().filter(|a| !a.as_os_str().is_empty()) {
                nodes
                    .entry(ancestor.to_path_buf())
                    .or_insert(MemoryNode::Dir);
            }
        }
        nodes.insert(path, MemoryNode::File(contents.to_string()));
    }

    /// Snapshot of the whole tree.
    pub fn tree(&self) -> BTreeMap<PathBuf, MemoryNode> {
        self.nodes().clone()
    }

    pub fn node(&self, path: impl AsRef<Path>) -> Option<MemoryNode> {
        self.nodes().get(&normalize(path.as_ref())).cloned()
    }

    fn nodes(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, MemoryNode>> {
        self.nodes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Lexically normalize a path: drop `.` and fold `..`.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{}: no such file or directory", path.display()),
    )
}

/// Follow symlinks on the final component until a non-link node is reached.
fn resolve(nodes: &BTreeMap<PathBuf, MemoryNode>, path: &Path) -> Option<(PathBuf, MemoryNode)> {
    let mut current = normalize(path);
    for _ in 0..MAX_LINK_DEPTH {
        match nodes.get(&current)? {
            MemoryNode::Symlink(target) => {
                current = match current.parent() {
                    Some(parent) if target.is_relative() => normalize(&parent.join(target)),
                    _ => normalize(target),
                };
            }
            node => return Some((current, node.clone())),
        }
    }
    None
}

fn require_parent_dir(nodes: &BTreeMap<PathBuf, MemoryNode>, path: &Path) -> io::Result<()> {
    match path.parent() {
        None => Ok(()),
        Some(parent) => match resolve(nodes, parent) {
            Some((_, MemoryNode::Dir)) => Ok(()),
            _ => Err(not_found(parent)),
        },
    }
}

impl Storage for MemoryStorage {
    fn exists(&self, path: &Path) -> bool {
        resolve(&self.nodes(), path).is_some()
    }

    fn entry_exists(&self, path: &Path) -> bool {
        self.nodes().contains_key(&normalize(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(resolve(&self.nodes(), path), Some((_, MemoryNode::Dir)))
    }

    fn is_symlink(&self, path: &Path) -> bool {
        matches!(
            self.nodes().get(&normalize(path)),
            Some(MemoryNode::Symlink(_))
        )
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        match resolve(&self.nodes(), path) {
            Some((_, MemoryNode::File(contents))) => Ok(contents),
            Some((_, _)) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{}: is a directory", path.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.read_to_string(path).map(String::into_bytes)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut nodes = self.nodes();
        let target = match resolve(&nodes, path) {
            Some((resolved, MemoryNode::File(_))) => resolved,
            Some((_, _)) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{}: is a directory", path.display()),
                ))
            }
            None => normalize(path),
        };
        require_parent_dir(&nodes, &target)?;
        nodes.insert(target, MemoryNode::File(contents.to_string()));
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let path = normalize(path);
        let mut nodes = self.nodes();
        let mut ancestors: Vec<&Path> = path
            .ancestors()
            .filter(|a| !a.as_os_str().is_empty())
            .collect();
        ancestors.reverse();
        for ancestor in ancestors {
            match resolve(&nodes, ancestor) {
                Some((_, MemoryNode::Dir)) => {}
                Some((_, _)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("{}: not a directory", ancestor.display()),
                    ))
                }
                None => {
                    nodes.insert(ancestor.to_path_buf(), MemoryNode::Dir);
                }
            }
        }
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let nodes = self.nodes();
        let dir = match resolve(&nodes, path) {
            Some((resolved, MemoryNode::Dir)) => resolved,
            Some(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{}: not a directory", path.display()),
                ))
            }
            None => return Err(not_found(path)),
        };

        let listed = normalize(path);
        let entries = nodes
            .iter()
            .filter(|(child, _)| child.parent() == Some(dir.as_path()))
            .filter_map(|(child, node)| {
                let name = child.file_name()?.to_string_lossy().to_string();
                let kind = match node {
                    MemoryNode::File(_) => EntryKind::File,
                    MemoryNode::Dir => EntryKind::Dir,
                    MemoryNode::Symlink(_) => EntryKind::Symlink,
                };
                Some(DirEntry {
                    path: listed.join(&name),
                    name,
                    kind,
                })
            })
            .collect();
        // BTreeMap iteration already yields names in order
        Ok(entries)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let path = normalize(path);
        let mut nodes = self.nodes();
        match nodes.get(&path).cloned() {
            Some(MemoryNode::File(_)) | Some(MemoryNode::Symlink(_)) => {
                nodes.remove(&path);
                Ok(())
            }
            Some(MemoryNode::Dir) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{}: is a directory", path.display()),
            )),
            None => Err(not_found(&path)),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        let path = normalize(path);
        let mut nodes = self.nodes();
        match nodes.get(&path).cloned() {
            Some(MemoryNode::Dir) => {
                nodes.retain(|candidate, _| !candidate.starts_with(&path));
                Ok(())
            }
            Some(_) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{}: not a directory", path.display()),
            )),
            None => Err(not_found(&path)),
        }
    }

    fn symlink(&self, target: &Path, link: &Path) -> io::Result<()> {
        let link = normalize(link);
        let mut nodes = self.nodes();
        if nodes.contains_key(&link) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{}: file exists", link.display()),
            ));
        }
        require_parent_dir(&nodes, &link)?;
        nodes.insert(link, MemoryNode::Symlink(target.to_path_buf()));
        Ok(())
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        match self.nodes().get(&normalize(path)) {
            Some(MemoryNode::Symlink(target)) => Ok(target.clone()),
            Some(_) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{}: not a symbolic link", path.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    fn with_exclusive_lock<T, F>(&self, _lock_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        f()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_requires_parent() {
        let storage = MemoryStorage::new();
        let err = storage
            .write(Path::new("/missing/file.json"), "{}")
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);

        storage.create_dir_all(Path::new("/missing")).unwrap();
        storage.write(Path::new("/missing/file.json"), "{}").unwrap();
        assert_eq!(
            storage.read_to_string(Path::new("/missing/file.json")).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_symlink_resolves_for_reads() {
        let storage = MemoryStorage::new();
        storage.insert_file("/plugins/a/agents/x.md", "agent x");
        storage.create_dir_all(Path::new("/live")).unwrap();
        storage
            .symlink(Path::new("/plugins/a/agents/x.md"), Path::new("/live/x.md"))
            .unwrap();

        assert!(storage.is_symlink(Path::new("/live/x.md")));
        assert_eq!(
            storage.read_to_string(Path::new("/live/x.md")).unwrap(),
            "agent x"
        );
        assert_eq!(
            storage.read_link(Path::new("/live/x.md")).unwrap(),
            PathBuf::from("/plugins/a/agents/x.md")
        );
    }

    #[test]
    fn test_symlink_refuses_existing_entry() {
        let storage = MemoryStorage::new();
        storage.insert_file("/live/x.md", "user file");
        let err = storage
            .symlink(Path::new("/elsewhere"), Path::new("/live/x.md"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_dangling_symlink() {
        let storage = MemoryStorage::new();
        storage.create_dir_all(Path::new("/live")).unwrap();
        storage
            .symlink(Path::new("/nowhere"), Path::new("/live/x.md"))
            .unwrap();
        assert!(!storage.exists(Path::new("/live/x.md")));
        assert!(storage.entry_exists(Path::new("/live/x.md")));
    }

    #[test]
    fn test_read_dir_lists_direct_children_only() {
        let storage = MemoryStorage::new();
        storage.insert_file("/root/b.txt", "");
        storage.insert_file("/root/a/nested.txt", "");
        storage.insert_file("/rootless.txt", "");

        let entries = storage.read_dir(Path::new("/root")).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b.txt"]);
        assert_eq!(entries[0].kind, EntryKind::Dir);
        assert_eq!(entries[0].path, PathBuf::from("/root/a"));
    }

    #[test]
    fn test_remove_dir_all_removes_subtree() {
        let storage = MemoryStorage::new();
        storage.insert_file("/plugins/foo/settings.json", "{}");
        storage.insert_file("/plugins/foo/agents/a.md", "");
        storage.insert_file("/plugins/foobar/settings.json", "{}");

        storage.remove_dir_all(Path::new("/plugins/foo")).unwrap();

        assert!(!storage.exists(Path::new("/plugins/foo")));
        assert!(!storage.exists(Path::new("/plugins/foo/agents/a.md")));
        assert!(storage.exists(Path::new("/plugins/foobar/settings.json")));
    }
}
