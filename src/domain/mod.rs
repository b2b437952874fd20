//! Domain layer: the full binary tree engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod codec;
pub mod display;
pub mod error;
pub mod traversal;
pub mod tree;

pub use codec::{decode, encode, DecodeOutcome, Decoded};
pub use display::TreeConvert;
pub use error::{DomainError, DomainResult};
pub use traversal::Order;
pub use tree::{FullBinaryTree, Key, RemoveOutcome};
