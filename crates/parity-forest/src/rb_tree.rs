use std::fmt::Display;

use tracing::debug;

use crate::error::TreeError;
use crate::print::{color_tag, level_order};
use crate::types::{default_comparator, KeyLane, RbNode};
use crate::util;

/// Single-key red-black tree.
///
/// Nodes are stored in an arena and addressed by `u32` index; they are
/// never removed, so an index stays valid until [`RbTree::clear`].
pub struct RbTree<K, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    arena: Vec<RbNode<K>>,
    root: Option<u32>,
    comparator: C,
}

impl<K> RbTree<K, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K> Default for RbTree<K, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> RbTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            comparator,
        }
    }

    /// Inserts `key`; equal keys are kept and land to the left.
    ///
    /// Accepts either `K` or `Option<K>`; `None` is rejected with
    /// [`TreeError::NullValue`] and leaves the tree untouched.
    pub fn insert(&mut self, key: impl Into<Option<K>>) -> Result<(), TreeError> {
        let Some(key) = key.into() else {
            debug!("insert rejected: null key");
            return Err(TreeError::NullValue);
        };

        self.arena.push(RbNode::new(key));
        let idx = (self.arena.len() - 1) as u32;
        self.root = Some(util::insert::<_, KeyLane, _>(
            &mut self.arena,
            self.root,
            idx,
            &self.comparator,
        ));
        Ok(())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Index of a node holding `key`.
    pub fn find(&self, key: &K) -> Option<u32> {
        util::find::<_, KeyLane, _>(&self.arena, self.root, key, &self.comparator)
    }

    /// Rotates `child` above `parent`, see [`util::rotate`].
    pub fn rotate(&mut self, child: Option<u32>, parent: Option<u32>) -> Result<(), TreeError> {
        let Some(root) = self.root else {
            debug!(?child, ?parent, "rotation rejected: empty tree");
            return Err(TreeError::MissingNode);
        };
        self.root = Some(util::rotate::<_, KeyLane>(
            &mut self.arena,
            root,
            child,
            parent,
        )?);
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn height(&self) -> usize {
        util::height::<_, KeyLane>(&self.arena, self.root)
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    pub fn arena(&self) -> &[RbNode<K>] {
        &self.arena
    }

    pub fn node(&self, idx: u32) -> Option<&RbNode<K>> {
        self.arena.get(idx as usize)
    }

    pub fn key(&self, idx: u32) -> Option<&K> {
        self.node(idx).map(|n| &n.k)
    }

    pub fn left(&self, idx: u32) -> Option<u32> {
        self.node(idx).and_then(|n| n.links.l)
    }

    pub fn right(&self, idx: u32) -> Option<u32> {
        self.node(idx).and_then(|n| n.links.r)
    }

    pub fn up(&self, idx: u32) -> Option<u32> {
        self.node(idx).and_then(|n| n.links.p)
    }

    /// Missing nodes count as black.
    pub fn is_red(&self, idx: u32) -> bool {
        self.node(idx).is_some_and(|n| n.links.is_red())
    }

    /// `[ 10(b), 5(b), 20(b) ]`
    pub fn to_level_order_string(&self) -> String
    where
        K: Display,
    {
        level_order::<_, KeyLane, _>(&self.arena, self.root, |n| {
            format!("{}{}", n.k, color_tag(&n.links))
        })
    }

    pub fn assert_valid(&self) -> Result<(), String> {
        util::assert_red_black_tree::<_, KeyLane, _>(&self.arena, self.root, &self.comparator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_comparator_reverses_order() {
        let mut tree = RbTree::with_comparator(|a: &i32, b: &i32| b.cmp(a) as i32);
        for k in [1, 2, 3] {
            tree.insert(k).unwrap();
        }
        assert_eq!(tree.to_level_order_string(), "[ 2(b), 3(r), 1(r) ]");
        tree.assert_valid().unwrap();
    }

    #[test]
    fn null_insert_leaves_tree_untouched() {
        let mut tree = RbTree::<i32>::new();
        tree.insert(4).unwrap();
        assert_eq!(tree.insert(None::<i32>), Err(TreeError::NullValue));
        assert_eq!(tree.size(), 1);
        assert_eq!(tree.to_level_order_string(), "[ 4(b) ]");
    }

    #[test]
    fn clear_resets() {
        let mut tree = RbTree::<i32>::new();
        tree.insert(1).unwrap();
        tree.insert(2).unwrap();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.size(), 0);
        assert!(!tree.contains(&1));
        assert_eq!(tree.to_level_order_string(), "[ ]");
    }

    #[test]
    fn rotate_on_empty_tree_is_rejected() {
        let mut tree = RbTree::<i32>::new();
        assert_eq!(tree.rotate(None, None), Err(TreeError::MissingNode));
    }
}
