//! Full binary tree engine.
//!
//! Keys are inserted level by level, left to right; deletion moves the
//! deepest level-order key into the removed key's slot. Trees persist as a
//! length-prefixed binary snapshot of their level-order keys.
//!
//! Layers:
//! - [`domain`]: the tree itself, traversals, snapshot codec (no I/O)
//! - [`application`]: snapshot persistence through the `FileSystem` boundary
//! - [`infrastructure`]: real I/O and service wiring
//! - [`config`]: layered settings
//! - [`cli`]: the `fbtree` command-line shell

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{FullBinaryTree, Key, Order, RemoveOutcome};
