//! Filesystem tree with copy-on-write path updates.
//!
//! Directories hold their children behind `Rc`, so cloning an [`FsTree`] is
//! O(1). A mutation copies only the nodes on the path from the root to the
//! changed directory (`Rc::make_mut`); every other subtree stays shared with
//! earlier snapshots, and no snapshot ever observes a later mutation.

use std::collections::BTreeMap;
use std::rc::Rc;

use folio_types::error::{FolioError, Result};
use serde::{Deserialize, Serialize};

use crate::path;

/// A file (text content) or a directory (name -> child).
///
/// Serialized untagged: a file is a JSON string and a directory a JSON
/// object, which is the persisted layout of the terminal filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FsNode {
    File(String),
    Directory(BTreeMap<String, Rc<FsNode>>),
}

impl FsNode {
    pub fn empty_dir() -> Self {
        Self::Directory(BTreeMap::new())
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    pub fn children(&self) -> Option<&BTreeMap<String, Rc<FsNode>>> {
        match self {
            Self::Directory(children) => Some(children),
            Self::File(_) => None,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Self::File(content) => Some(content.as_str()),
            Self::Directory(_) => None,
        }
    }
}

/// One line of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// The terminal's root folder and everything below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsTree {
    root: Rc<FsNode>,
}

impl Default for FsTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FsTree {
    /// A tree holding only an empty root folder.
    pub fn new() -> Self {
        Self {
            root: Rc::new(FsNode::empty_dir()),
        }
    }

    /// Wrap an existing node as a root, validating the tree invariants.
    pub fn from_root(root: FsNode) -> Result<Self> {
        if !root.is_dir() {
            return Err(FolioError::CorruptFilesystem(
                "root is not a folder".to_string(),
            ));
        }
        validate(&root, &mut Vec::new())?;
        Ok(Self {
            root: Rc::new(root),
        })
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let root: FsNode = serde_json::from_str(text)?;
        Self::from_root(root)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self.root.as_ref())?)
    }

    pub fn root(&self) -> &FsNode {
        &self.root
    }

    pub fn lookup<S: AsRef<str>>(&self, segments: &[S]) -> Option<&FsNode> {
        path::lookup(segments, &self.root)
    }

    pub fn is_dir<S: AsRef<str>>(&self, segments: &[S]) -> bool {
        self.lookup(segments).is_some_and(FsNode::is_dir)
    }

    /// Children of the folder at `segments`, sorted by name.
    pub fn list(&self, segments: &[String]) -> Result<Vec<DirEntry>> {
        match self.lookup(segments) {
            Some(FsNode::Directory(children)) => Ok(children
                .iter()
                .map(|(name, node)| DirEntry {
                    name: name.clone(),
                    is_dir: node.is_dir(),
                })
                .collect()),
            Some(FsNode::File(_)) => Err(FolioError::NotADirectory(path::display(segments))),
            None => Err(FolioError::NotFound(path::display(segments))),
        }
    }

    /// Read the file at `segments`.
    pub fn read(&self, segments: &[String]) -> Result<&str> {
        match self.lookup(segments) {
            Some(FsNode::File(content)) => Ok(content.as_str()),
            Some(FsNode::Directory(_)) => Err(FolioError::IsADirectory(path::display(segments))),
            None => Err(FolioError::NotFound(path::display(segments))),
        }
    }

    /// Create an empty file. Fails if anything already has that name.
    pub fn create_file(&mut self, segments: &[String]) -> Result<()> {
        self.insert_new(segments, FsNode::File(String::new()))
    }

    /// Create an empty folder. Fails if anything already has that name.
    pub fn create_dir(&mut self, segments: &[String]) -> Result<()> {
        self.insert_new(segments, FsNode::empty_dir())
    }

    /// Create or overwrite a file. The parent folder must already exist.
    pub fn write_file(&mut self, segments: &[String], content: &str) -> Result<()> {
        let (parent, name) = path::split_last(segments)
            .ok_or_else(|| FolioError::IsADirectory(path::display(segments)))?;
        self.check_parent(parent)?;
        if self.is_dir(segments) {
            return Err(FolioError::IsADirectory(path::display(segments)));
        }
        self.dir_mut(parent)?
            .insert(name.to_string(), Rc::new(FsNode::File(content.to_string())));
        Ok(())
    }

    /// Remove a file or an empty folder.
    pub fn remove(&mut self, segments: &[String]) -> Result<()> {
        let (parent, name) = path::split_last(segments).ok_or_else(|| {
            FolioError::InvalidArgument("cannot remove the root folder".to_string())
        })?;
        match self.lookup(segments) {
            None => return Err(FolioError::NotFound(path::display(segments))),
            Some(FsNode::Directory(children)) if !children.is_empty() => {
                return Err(FolioError::DirectoryNotEmpty(path::display(segments)));
            },
            Some(_) => {},
        }
        self.dir_mut(parent)?.remove(name);
        Ok(())
    }

    fn insert_new(&mut self, segments: &[String], node: FsNode) -> Result<()> {
        let (parent, name) = path::split_last(segments)
            .ok_or_else(|| FolioError::AlreadyExists(path::display(segments)))?;
        if name.is_empty() {
            return Err(FolioError::InvalidArgument("empty name".to_string()));
        }
        self.check_parent(parent)?;
        if self.lookup(segments).is_some() {
            return Err(FolioError::AlreadyExists(path::display(segments)));
        }
        self.dir_mut(parent)?.insert(name.to_string(), Rc::new(node));
        Ok(())
    }

    /// Read-only check run before any mutation, so failures copy nothing.
    fn check_parent(&self, parent: &[String]) -> Result<()> {
        match self.lookup(parent) {
            Some(FsNode::Directory(_)) => Ok(()),
            Some(FsNode::File(_)) => Err(FolioError::NotADirectory(path::display(parent))),
            None => Err(FolioError::NoSuchFolder(path::display(parent))),
        }
    }

    /// Mutable access to a folder's children, un-sharing the path to it.
    fn dir_mut(&mut self, segments: &[String]) -> Result<&mut BTreeMap<String, Rc<FsNode>>> {
        let mut node = &mut self.root;
        for (depth, segment) in segments.iter().enumerate() {
            let children = match Rc::make_mut(node) {
                FsNode::Directory(children) => children,
                FsNode::File(_) => {
                    return Err(FolioError::NotADirectory(path::display(
                        &segments[..depth],
                    )));
                },
            };
            node = children
                .get_mut(segment)
                .ok_or_else(|| FolioError::NoSuchFolder(path::display(&segments[..=depth])))?;
        }
        match Rc::make_mut(node) {
            FsNode::Directory(children) => Ok(children),
            FsNode::File(_) => Err(FolioError::NotADirectory(path::display(segments))),
        }
    }
}

fn validate(node: &FsNode, trail: &mut Vec<String>) -> Result<()> {
    if let FsNode::Directory(children) = node {
        for (name, child) in children {
            if name.is_empty() || name.contains('/') || name == "." || name == ".." {
                return Err(FolioError::CorruptFilesystem(format!(
                    "invalid name {name:?} in {}",
                    path::display(trail.as_slice())
                )));
            }
            trail.push(name.clone());
            validate(child, trail)?;
            trail.pop();
        }
    }
    Ok(())
}
