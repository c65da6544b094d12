//! Arena-backed splay tree.
//!
//! A self-adjusting binary search tree: every insert, lookup and erase
//! rotates the touched node to the root, which gives amortized `O(log n)`
//! cost per operation with no balance bookkeeping.
//!
//! Nodes are not individually heap-allocated. They live in a `Vec` arena
//! and every parent/left/right link is an `Option<u32>` index into it, so
//! rotations are index swaps and erased slots are recycled.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] link trait, [`NodeId`] handle |
//! [`node`] | [`SplayNode`] arena slot |
//! [`splay`](mod@splay) | `rotate_left`, `rotate_right`, `splay` |
//! [`util`] | walks, search, insertion point, subtree `join` |
//! [`tree`] | [`SplayTree`] container |
//! [`error`] | [`SplayError`] |
//!
//! The tree is single-threaded. Lookups mutate it, so sharing one across
//! threads needs a lock around every call, reads included.

pub mod error;
pub mod node;
mod print;
pub mod splay;
pub mod tree;
pub mod types;
pub mod util;

pub use error::SplayError;
pub use node::SplayNode;
pub use splay::{rotate_left, rotate_right, splay};
pub use tree::{SplayTree, MAX_SLOTS};
pub use types::{Node, NodeId};
