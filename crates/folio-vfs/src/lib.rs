//! Virtual filesystem for the folio terminal.
//!
//! The tree is a nest of [`FsNode`]s rooted at an [`FsTree`]. Paths are
//! handled as segment lists: [`path::resolve`] turns user input into
//! segments, and every tree operation takes segments rather than strings.

pub mod node;
pub mod path;
pub mod seed;

pub use node::{DirEntry, FsNode, FsTree};
pub use seed::{PressArticle, default_press_articles, seed_tree};
