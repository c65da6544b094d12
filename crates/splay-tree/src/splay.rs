//! Rotations and the splay step.
//!
//! All functions take the arena and node indices, and return the root of
//! the tree after restructuring. A rotation at the root hands the root
//! role to the promoted child; anywhere else the root is unchanged.

use crate::types::Node;
use crate::util::{get_l, get_p, get_r, set_l, set_p, set_r};

// ── single rotations ──────────────────────────────────────────────────────

/// Rotate the edge between `x` and its right child `y`, promoting `y`.
///
/// ```text
///   x              y
///  / \            / \
/// a   y    →     x   c
///    / \        / \
///   b   c      a   b
/// ```
///
/// No-op when `x` has no right child.
pub fn rotate_left<N: Node>(arena: &mut [N], root: Option<u32>, x: u32) -> Option<u32> {
    let Some(y) = get_r(arena, x) else {
        return root;
    };
    let b = get_l(arena, y);
    set_r(arena, x, b);
    if let Some(b) = b {
        set_p(arena, b, Some(x));
    }
    let p = get_p(arena, x);
    set_p(arena, y, p);
    let root = replace_child(arena, root, p, x, y);
    set_l(arena, y, Some(x));
    set_p(arena, x, Some(y));
    root
}

/// Rotate the edge between `y` and its left child `x`, promoting `x`.
///
/// ```text
///     y          x
///    / \        / \
///   x   c  →   a   y
///  / \            / \
/// a   b          b   c
/// ```
///
/// No-op when `y` has no left child.
pub fn rotate_right<N: Node>(arena: &mut [N], root: Option<u32>, y: u32) -> Option<u32> {
    let Some(x) = get_l(arena, y) else {
        return root;
    };
    let b = get_r(arena, x);
    set_l(arena, y, b);
    if let Some(b) = b {
        set_p(arena, b, Some(y));
    }
    let p = get_p(arena, y);
    set_p(arena, x, p);
    let root = replace_child(arena, root, p, y, x);
    set_r(arena, x, Some(y));
    set_p(arena, y, Some(x));
    root
}

// ── splay ─────────────────────────────────────────────────────────────────

/// Rotate `x` up until it becomes the root and return it as the new root.
///
/// Each step is one of:
/// - zig: the parent is the root, one rotation at the parent;
/// - zig-zig: `x` and its parent lean the same way, rotate the grandparent
///   then the parent in that direction;
/// - zig-zag: they lean opposite ways, rotate the parent twice in
///   alternating directions.
pub fn splay<N: Node>(arena: &mut [N], mut root: Option<u32>, x: u32) -> Option<u32> {
    while let Some(p) = get_p(arena, x) {
        let x_is_left = get_l(arena, p) == Some(x);
        root = match get_p(arena, p) {
            None if x_is_left => rotate_right(arena, root, p),
            None => rotate_left(arena, root, p),
            Some(g) => {
                let p_is_left = get_l(arena, g) == Some(p);
                match (p_is_left, x_is_left) {
                    (true, true) => {
                        let root = rotate_right(arena, root, g);
                        rotate_right(arena, root, p)
                    }
                    (false, false) => {
                        let root = rotate_left(arena, root, g);
                        rotate_left(arena, root, p)
                    }
                    (false, true) => {
                        let root = rotate_right(arena, root, p);
                        rotate_left(arena, root, g)
                    }
                    (true, false) => {
                        let root = rotate_left(arena, root, p);
                        rotate_right(arena, root, g)
                    }
                }
            }
        };
    }
    root
}

// ── internal helper ───────────────────────────────────────────────────────

/// Point `p`'s link that used to hold `old` at `new`. With no `p`, `new`
/// takes over as root.
fn replace_child<N: Node>(
    arena: &mut [N],
    root: Option<u32>,
    p: Option<u32>,
    old: u32,
    new: u32,
) -> Option<u32> {
    match p {
        Some(p) => {
            if get_l(arena, p) == Some(old) {
                set_l(arena, p, Some(new));
            } else {
                set_r(arena, p, Some(new));
            }
            root
        }
        None => Some(new),
    }
}
