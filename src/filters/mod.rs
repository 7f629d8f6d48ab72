//! Classification of paths that are listed in a tree but never diffed.

mod binary;
mod ignore_set;

pub use binary::{BinaryDetector, HeuristicDetector};
pub use ignore_set::{DEFAULT_BLACKLIST, IgnoreSet, IgnoreSetError};
