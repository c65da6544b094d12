//! Link trait and node handle.
//!
//! Nodes live in a [`Vec`]-backed arena. Every "pointer" (parent, left,
//! right) is an `Option<u32>` index into that arena, so rotations are plain
//! index swaps and no node ever owns another.

use std::fmt;

/// Parent/left/right links of an arena node.
///
/// Rotations, splaying, joins and walks only ever touch links, never keys,
/// so they are written against this trait. [`crate::SplayNode`] is the
/// tree's own implementation; tests drive the same functions on bare
/// link-only nodes.
pub trait Node {
    /// Parent slot. `None` only for the root of a (sub)tree.
    fn p(&self) -> Option<u32>;
    /// Left child slot: keys ordering before this node.
    fn l(&self) -> Option<u32>;
    /// Right child slot: keys ordering at or after this node.
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Handle to a node stored in a [`crate::SplayTree`].
///
/// A handle is only guaranteed to name the same key until the next
/// structural operation that could free its slot (`erase`, `clear`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Raw arena index.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
