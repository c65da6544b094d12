//! Tree-shaped debug dump.

use std::cmp::Ordering;
use std::fmt::Display;

use crate::tree::SplayTree;
use crate::types::Node;

impl<K, C> SplayTree<K, C>
where
    K: Display,
    C: Fn(&K, &K) -> Ordering,
{
    /// Render the tree one node per line, children indented under their
    /// parent and marked `←` (left) or `→` (right).
    ///
    /// ```text
    /// SplayTree
    /// └─ 5
    ///   ← 3
    ///   → 8
    /// ```
    pub fn to_tree_string(&self, tab: &str) -> String {
        let Some(root) = self.root else {
            return "SplayTree ∅".to_string();
        };
        let mut out = String::from("SplayTree");
        let mut stack = vec![(root, tab.to_string(), "└─")];
        while let Some((i, tab, side)) = stack.pop() {
            let node = &self.arena[i as usize];
            if let Some(key) = node.key() {
                out.push_str(&format!("\n{tab}{side} {key}"));
            }
            let child_tab = format!("{tab}  ");
            if let Some(r) = node.r() {
                stack.push((r, child_tab.clone(), "→"));
            }
            if let Some(l) = node.l() {
                stack.push((l, child_tab, "←"));
            }
        }
        out
    }
}
