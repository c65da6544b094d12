//! Arena helpers for the p / l / r tree.
//!
//! Key-based helpers do not read keys themselves. They take an `ord_at`
//! closure that compares the search key against a node, so any arena
//! layout (and any comparator) can drive them.
//!
//! Walks use explicit stacks. A splay tree can degrade into a chain between
//! accesses, so recursion depth is not bounded by `log n`.

use std::cmp::Ordering;

use crate::splay::splay;
use crate::types::Node;

// Link reads and writes by arena index. Indices come from the tree
// itself, so an out-of-range index is a bug and panics on the slice access.

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Leftmost node.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, node) {
        return first(arena, Some(r));
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, node) {
        return last(arena, Some(l));
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    let mut count = 0;
    let mut stack: Vec<u32> = root.into_iter().collect();
    while let Some(i) = stack.pop() {
        count += 1;
        stack.extend(get_l(arena, i));
        stack.extend(get_r(arena, i));
    }
    count
}

/// Outcome of a root-to-leaf search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descent {
    /// Node whose key compared equal, if any.
    pub found: Option<u32>,
    /// Last node visited. Equals `found` on a hit; on a miss it is the
    /// closest candidate, the node the search fell off of.
    pub last: Option<u32>,
}

/// Walk from `root` toward the key described by `ord_at`.
///
/// `ord_at(node)` returns how the search key compares to the node's key:
/// `Less` descends left, `Greater` descends right, `Equal` stops.
pub fn descend<N, F>(arena: &[N], root: Option<u32>, ord_at: F) -> Descent
where
    N: Node,
    F: Fn(&N) -> Ordering,
{
    let mut curr = root;
    let mut last = None;
    while let Some(i) = curr {
        last = Some(i);
        curr = match ord_at(&arena[i as usize]) {
            Ordering::Equal => {
                return Descent {
                    found: Some(i),
                    last,
                }
            }
            Ordering::Less => get_l(arena, i),
            Ordering::Greater => get_r(arena, i),
        };
    }
    Descent { found: None, last }
}

/// Where a new key would hang: its parent-to-be, and whether it goes on
/// the left. `None` for an empty tree.
///
/// Keys comparing equal go right, so duplicates land after their twins.
pub fn insertion_point<N, F>(arena: &[N], root: Option<u32>, ord_at: F) -> Option<(u32, bool)>
where
    N: Node,
    F: Fn(&N) -> Ordering,
{
    let mut curr = root?;
    loop {
        let left = ord_at(&arena[curr as usize]) == Ordering::Less;
        let child = if left {
            get_l(arena, curr)
        } else {
            get_r(arena, curr)
        };
        match child {
            Some(c) => curr = c,
            None => return Some((curr, left)),
        }
    }
}

/// Hang the detached `node` under `parent`. The target link must be empty.
pub fn link_child<N: Node>(arena: &mut [N], parent: u32, node: u32, left: bool) {
    if left {
        set_l(arena, parent, Some(node));
    } else {
        set_r(arena, parent, Some(node));
    }
    set_p(arena, node, Some(parent));
}

/// Combine two detached subtrees into one and return its root.
///
/// Every key under `tree1` must order before every key under `tree2`; this
/// is not checked. Both inputs must have no parent. The maximum of `tree1`
/// is splayed to the top of `tree1` and `tree2` becomes its right child, so
/// neither input root is meaningful afterwards.
pub fn join<N: Node>(arena: &mut [N], tree1: Option<u32>, tree2: Option<u32>) -> Option<u32> {
    let Some(t1) = tree1 else {
        return tree2;
    };
    let Some(t2) = tree2 else {
        return tree1;
    };
    let max = last(arena, Some(t1)).unwrap_or(t1);
    // `tree1` is detached, so splaying its maximum makes `max` the root of
    // that subtree, with an empty right link. The returned root is `max`.
    splay(arena, Some(t1), max);
    set_r(arena, max, Some(t2));
    set_p(arena, t2, Some(max));
    Some(max)
}

/// Node indices in ascending (left, node, right) order.
pub fn in_order<N: Node>(arena: &[N], root: Option<u32>) -> Vec<u32> {
    let mut out = Vec::new();
    let mut stack = Vec::new();
    let mut curr = root;
    loop {
        while let Some(i) = curr {
            stack.push(i);
            curr = get_l(arena, i);
        }
        let Some(i) = stack.pop() else {
            break;
        };
        out.push(i);
        curr = get_r(arena, i);
    }
    out
}

/// Node indices in (left, right, node) order: every node appears after
/// all of its descendants.
pub fn post_order<N: Node>(arena: &[N], root: Option<u32>) -> Vec<u32> {
    let mut out = Vec::new();
    let mut stack: Vec<u32> = root.into_iter().collect();
    // Collected as (node, right, left), then reversed.
    while let Some(i) = stack.pop() {
        out.push(i);
        stack.extend(get_l(arena, i));
        stack.extend(get_r(arena, i));
    }
    out.reverse();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SplayNode;

    fn chain(n: u32) -> (Vec<SplayNode<u32>>, Option<u32>) {
        // 0 → 1 → 2 … all right children, the shape an ascending run leaves.
        let mut arena: Vec<SplayNode<u32>> = (0..n).map(SplayNode::new).collect();
        for i in 1..n {
            link_child(&mut arena, i - 1, i, false);
        }
        (arena, if n == 0 { None } else { Some(0) })
    }

    #[test]
    fn walks_survive_deep_chains() {
        let (arena, root) = chain(200_000);
        assert_eq!(size(&arena, root), 200_000);
        let ordered = in_order(&arena, root);
        assert_eq!(ordered.len(), 200_000);
        assert!(ordered.windows(2).all(|w| w[0] < w[1]));
        let post = post_order(&arena, root);
        assert_eq!(post.first(), Some(&199_999));
        assert_eq!(post.last(), Some(&0));
    }

    #[test]
    fn post_order_puts_children_first() {
        //     1
        //    / \
        //   0   2
        let mut arena: Vec<SplayNode<u32>> = (0..3).map(SplayNode::new).collect();
        link_child(&mut arena, 1, 0, true);
        link_child(&mut arena, 1, 2, false);
        assert_eq!(post_order(&arena, Some(1)), vec![0, 2, 1]);
        assert_eq!(in_order(&arena, Some(1)), vec![0, 1, 2]);
    }

    #[test]
    fn empty_inputs() {
        let arena: Vec<SplayNode<u32>> = Vec::new();
        assert_eq!(first(&arena, None), None);
        assert_eq!(last(&arena, None), None);
        assert_eq!(size(&arena, None), 0);
        assert!(in_order(&arena, None).is_empty());
        assert!(post_order(&arena, None).is_empty());
        let miss = descend(&arena, None, |_| Ordering::Equal);
        assert_eq!(miss, Descent { found: None, last: None });
    }
}
