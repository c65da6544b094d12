use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Write};

use crate::error::SplayError;
use crate::node::SplayNode;
use crate::splay::splay;
use crate::types::{Node, NodeId};
use crate::util::{descend, first, in_order, insertion_point, join, last, link_child, post_order};

/// Most slots one arena can hold, so every index and the arena length
/// fit in a `u32` link.
pub const MAX_SLOTS: usize = u32::MAX as usize;

fn default_comparator<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

/// Index of the first of `extra` slots appended to an arena of `len`.
fn append_index(len: usize, extra: usize) -> Result<u32, SplayError> {
    len.checked_add(extra)
        .filter(|&total| total <= MAX_SLOTS)
        .and_then(|_| u32::try_from(len).ok())
        .ok_or(SplayError::CapacityExceeded { limit: MAX_SLOTS })
}

/// Self-adjusting binary search tree.
///
/// Every `insert`, `access` and `erase` splays the node it touched (or, on
/// a miss, the last node visited) to the root. Lookups therefore take
/// `&mut self`: they restructure the tree even when the key is absent.
///
/// Keys comparing equal may coexist; they are routed right on insert and
/// their relative order after later rotations is unspecified.
pub struct SplayTree<K, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub(crate) root: Option<u32>,
    pub(crate) len: usize,
    pub(crate) comparator: C,
    pub(crate) arena: Vec<SplayNode<K>>,
    // Freed slots, reused before the arena grows.
    free: Vec<u32>,
}

impl<K: Ord> SplayTree<K, fn(&K, &K) -> Ordering> {
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, default_comparator::<K>)
    }
}

impl<K: Ord> Default for SplayTree<K, fn(&K, &K) -> Ordering> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> SplayTree<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity_and_comparator(0, comparator)
    }

    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            root: None,
            len: 0,
            comparator,
            arena: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn get_root(&self) -> Option<NodeId> {
        self.root.map(NodeId)
    }

    pub fn root_key(&self) -> Option<&K> {
        self.root.and_then(|r| self.arena[r as usize].key())
    }

    /// Key stored at `id`, or `None` if the handle no longer names a node.
    pub fn key(&self, id: NodeId) -> Option<&K> {
        self.node(id).and_then(SplayNode::key)
    }

    /// Node stored at `id`, for navigating its parent and children.
    pub fn node(&self, id: NodeId) -> Option<&SplayNode<K>> {
        self.arena.get(id.0 as usize).filter(|n| n.is_live())
    }

    /// Smallest key. Does not restructure the tree.
    pub fn first(&self) -> Option<&K> {
        first(&self.arena, self.root).and_then(|i| self.arena[i as usize].key())
    }

    /// Largest key. Does not restructure the tree.
    pub fn last(&self) -> Option<&K> {
        last(&self.arena, self.root).and_then(|i| self.arena[i as usize].key())
    }

    /// Insert `key` and splay its new node to the root.
    ///
    /// Aborts on allocation failure like any growing `Vec`; see
    /// [`SplayTree::try_insert`] for a fallible variant.
    ///
    /// # Panics
    ///
    /// If the arena already holds [`MAX_SLOTS`] slots and none is free.
    pub fn insert(&mut self, key: K) -> NodeId {
        let at = self.insertion_point(&key);
        let node = self.alloc(key);
        self.attach(node, at)
    }

    /// Like [`SplayTree::insert`], but reports a failure to grow the arena
    /// instead of aborting. The tree is unchanged on error.
    pub fn try_insert(&mut self, key: K) -> Result<NodeId, SplayError> {
        if self.free.is_empty() {
            append_index(self.arena.len(), 1)?;
            self.arena.try_reserve(1)?;
        }
        Ok(self.insert(key))
    }

    /// Look `key` up and splay.
    ///
    /// On a hit the matching node becomes the root and its handle is
    /// returned. On a miss the last node visited is splayed instead and the
    /// result is `None`.
    pub fn access(&mut self, key: &K) -> Option<NodeId> {
        let cmp = &self.comparator;
        let hit = descend(&self.arena, self.root, |n: &SplayNode<K>| {
            n.key().map_or(Ordering::Greater, |k| cmp(key, k))
        });
        if let Some(visited) = hit.last {
            log::trace!(
                "access: {} at slot {visited}, splaying to root",
                if hit.found.is_some() { "hit" } else { "miss" }
            );
            self.root = splay(&mut self.arena, self.root, visited);
        }
        hit.found.map(NodeId)
    }

    /// `access(key).is_some()`, with the same restructuring.
    pub fn contains(&mut self, key: &K) -> bool {
        self.access(key).is_some()
    }

    /// Remove one node holding `key` and hand its key back.
    ///
    /// A missing key is a no-op returning `None`, though the failed access
    /// has already reshaped the tree.
    pub fn erase(&mut self, key: &K) -> Option<K> {
        let NodeId(node) = self.access(key)?;
        let l = self.arena[node as usize].l();
        let r = self.arena[node as usize].r();
        for child in [l, r].into_iter().flatten() {
            self.arena[child as usize].set_p(None);
        }
        self.root = join(&mut self.arena, l, r);
        self.len -= 1;
        log::trace!("erase: freed slot {node}, {} nodes left", self.len);
        self.release(node)
    }

    /// Splay the node at `id` to the root.
    pub fn splay(&mut self, id: NodeId) -> Result<(), SplayError> {
        if self.node(id).is_none() {
            return Err(SplayError::InvalidArgument { node: id.0 });
        }
        self.root = splay(&mut self.arena, self.root, id.0);
        Ok(())
    }

    /// Combine `self` with `other` into one tree.
    ///
    /// Every key of `self` must order before every key of `other`; this is
    /// not checked, and violating it silently breaks the search order.
    /// Node handles from `other` are invalid afterwards.
    ///
    /// # Panics
    ///
    /// If the two arenas together exceed [`MAX_SLOTS`] slots.
    pub fn join(mut self, other: Self) -> Self {
        let SplayTree {
            root: other_root,
            len: other_len,
            arena: other_arena,
            free: other_free,
            ..
        } = other;

        let offset = match append_index(self.arena.len(), other_arena.len()) {
            Ok(offset) => offset,
            Err(err) => panic!("cannot join splay trees: {err}"),
        };
        let shift = |link: Option<u32>| link.map(|i| i + offset);
        self.arena.reserve(other_arena.len());
        self.arena.extend(other_arena.into_iter().map(|mut n| {
            n.p = shift(n.p);
            n.l = shift(n.l);
            n.r = shift(n.r);
            n
        }));
        self.free.extend(other_free.into_iter().map(|i| i + offset));

        self.root = join(&mut self.arena, self.root, shift(other_root));
        self.len += other_len;
        log::trace!("join: {} nodes after absorbing {other_len}", self.len);
        self
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Vec<&K> {
        in_order(&self.arena, self.root)
            .into_iter()
            .filter_map(|i| self.arena[i as usize].key())
            .collect()
    }

    /// Drop every node, children before parents, and leave the tree empty
    /// and ready for reuse.
    pub fn clear(&mut self) {
        let mut dropped = 0usize;
        for i in post_order(&self.arena, self.root) {
            if self.arena[i as usize].release().is_some() {
                dropped += 1;
            }
        }
        log::trace!("clear: dropped {dropped} of {} nodes", self.len);
        debug_assert_eq!(dropped, self.len);
        self.arena.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    /// Check search order, parent/child links and the node count.
    pub fn validate(&self) -> Result<(), SplayError> {
        let mut reached = 0usize;
        let mut stack: Vec<(u32, Option<u32>)> = self.root.map(|r| (r, None)).into_iter().collect();
        while let Some((i, parent)) = stack.pop() {
            reached += 1;
            if reached > self.arena.len() {
                // More visits than slots means a cycle.
                return Err(SplayError::BrokenLink { node: i });
            }
            let node = self
                .arena
                .get(i as usize)
                .filter(|n| n.is_live())
                .ok_or(SplayError::BrokenLink { node: i })?;
            if node.p() != parent {
                return Err(SplayError::BrokenLink { node: i });
            }
            stack.extend(node.l().map(|l| (l, Some(i))));
            stack.extend(node.r().map(|r| (r, Some(i))));
        }
        if reached != self.len {
            return Err(SplayError::LengthMismatch {
                expected: self.len,
                actual: reached,
            });
        }

        let order = in_order(&self.arena, self.root);
        for pair in order.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if let (Some(ka), Some(kb)) = (self.arena[a as usize].key(), self.arena[b as usize].key()) {
                if (self.comparator)(kb, ka) == Ordering::Less {
                    return Err(SplayError::OrderViolation { node: b });
                }
            }
        }
        Ok(())
    }

    fn insertion_point(&self, key: &K) -> Option<(u32, bool)> {
        let cmp = &self.comparator;
        insertion_point(&self.arena, self.root, |n: &SplayNode<K>| {
            n.key().map_or(Ordering::Greater, |k| cmp(key, k))
        })
    }

    fn attach(&mut self, node: u32, at: Option<(u32, bool)>) -> NodeId {
        match at {
            Some((parent, left)) => {
                link_child(&mut self.arena, parent, node, left);
                self.root = splay(&mut self.arena, self.root, node);
            }
            None => self.root = Some(node),
        }
        self.len += 1;
        log::trace!("insert: slot {node} is now root of {} nodes", self.len);
        NodeId(node)
    }

    fn alloc(&mut self, key: K) -> u32 {
        if let Some(slot) = self.free.pop() {
            log::debug!("reusing freed slot {slot}");
            self.arena[slot as usize] = SplayNode::new(key);
            return slot;
        }
        let slot = match append_index(self.arena.len(), 1) {
            Ok(slot) => slot,
            Err(err) => panic!("cannot insert into splay tree: {err}"),
        };
        if self.arena.len() == self.arena.capacity() {
            log::debug!("growing node arena past {} slots", self.arena.len());
        }
        self.arena.push(SplayNode::new(key));
        slot
    }

    fn release(&mut self, node: u32) -> Option<K> {
        let key = self.arena[node as usize].release();
        self.free.push(node);
        key
    }
}

impl<K, C> SplayTree<K, C>
where
    K: fmt::Display,
    C: Fn(&K, &K) -> Ordering,
{
    /// Write the keys in ascending order, separated by single spaces and
    /// terminated by a newline. Does not restructure the tree.
    pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{self}")
    }

    pub fn print_stdout(&self) -> io::Result<()> {
        self.print(&mut io::stdout().lock())
    }
}

impl<K, C> fmt::Display for SplayTree<K, C>
where
    K: fmt::Display,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, key) in self.keys().into_iter().enumerate() {
            if n > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

impl<K, C> fmt::Debug for SplayTree<K, C>
where
    K: fmt::Debug,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplayTree")
            .field("len", &self.len)
            .field("root", &self.root)
            .field("keys", &self.keys())
            .finish()
    }
}
