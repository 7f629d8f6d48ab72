//! Directory walking.
//!
//! Trees are flattened into sorted relative file paths so two trees holding
//! the same files always produce the same sequence.

mod file_tree;

pub use file_tree::{FileTree, FileTreeError};
