use crate::amt::{check_value, Parity};
use crate::error::TreeError;
use crate::rb_tree::RbTree;

/// Baseline for [`crate::AmtTree`]: one independent [`RbTree`] per parity.
///
/// Same value rules as the merged tree, but every value gets its own node.
#[derive(Default)]
pub struct DualRbTree {
    even: RbTree<i64>,
    odd: RbTree<i64>,
}

impl DualRbTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: i64) -> Result<(), TreeError> {
        check_value(value)?;
        self.tree_mut(Parity::of(value)).insert(value)
    }

    pub fn contains(&self, value: i64) -> bool {
        self.tree(Parity::of(value)).contains(&value)
    }

    pub fn size(&self) -> usize {
        self.even.size() + self.odd.size()
    }

    pub fn is_empty(&self) -> bool {
        self.even.is_empty() && self.odd.is_empty()
    }

    pub fn clear(&mut self) {
        self.even.clear();
        self.odd.clear();
    }

    pub fn tree(&self, parity: Parity) -> &RbTree<i64> {
        match parity {
            Parity::Even => &self.even,
            Parity::Odd => &self.odd,
        }
    }

    fn tree_mut(&mut self, parity: Parity) -> &mut RbTree<i64> {
        match parity {
            Parity::Even => &mut self.even,
            Parity::Odd => &mut self.odd,
        }
    }

    pub fn assert_valid(&self) -> Result<(), String> {
        self.even
            .assert_valid()
            .map_err(|e| format!("even tree: {e}"))?;
        self.odd.assert_valid().map_err(|e| format!("odd tree: {e}"))
    }
}
