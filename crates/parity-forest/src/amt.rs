//! Alternating/merged tree (AMT).
//!
//! One arena of two-slot nodes carries two independent red-black trees: an
//! even lane ordered by the `even` slot and an odd lane ordered by the `odd`
//! slot. Each lane has its own links and color bit, so rotations made while
//! repairing one parity never disturb the other.
//!
//! A slot holding [`VACANT`] has not been written yet. Nodes are shared: a
//! value goes into the oldest node whose slot of its parity is vacant, and a
//! new node is allocated only when there is none. The arena therefore holds
//! `max(evens, odds)` nodes instead of `evens + odds`.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::error::TreeError;
use crate::print::{color_tag, level_order};
use crate::types::{default_comparator, Lane, Links};
use crate::util;

/// Slot value meaning "not written yet".
pub const VACANT: i64 = 0;

/// Smallest value accepted by the parity trees.
pub const MIN_VALUE: i64 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn of(value: i64) -> Self {
        if value.rem_euclid(2) == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }

    pub fn other(self) -> Self {
        match self {
            Parity::Even => Parity::Odd,
            Parity::Odd => Parity::Even,
        }
    }
}

/// Rejects values that collide with [`VACANT`] or are negative.
pub(crate) fn check_value(value: i64) -> Result<(), TreeError> {
    if value < MIN_VALUE {
        debug!(value, "insert rejected: below minimum");
        return Err(TreeError::ValueTooSmall {
            value,
            min: MIN_VALUE,
        });
    }
    Ok(())
}

/// Two-slot node with one set of links per parity.
#[derive(Clone, Debug, Default)]
pub struct AmtNode {
    pub even: i64,
    pub odd: i64,
    pub even_links: Links,
    pub odd_links: Links,
}

impl AmtNode {
    pub fn new(value: i64, parity: Parity) -> Self {
        let mut node = Self::default();
        node.set_slot(parity, value);
        node
    }

    pub fn slot(&self, parity: Parity) -> i64 {
        match parity {
            Parity::Even => self.even,
            Parity::Odd => self.odd,
        }
    }

    pub fn is_vacant(&self, parity: Parity) -> bool {
        self.slot(parity) == VACANT
    }

    pub fn links(&self, parity: Parity) -> &Links {
        match parity {
            Parity::Even => &self.even_links,
            Parity::Odd => &self.odd_links,
        }
    }

    fn set_slot(&mut self, parity: Parity, value: i64) {
        match parity {
            Parity::Even => self.even = value,
            Parity::Odd => self.odd = value,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct EvenLane;

impl Lane<AmtNode> for EvenLane {
    type Key = i64;

    #[inline]
    fn links(node: &AmtNode) -> &Links {
        &node.even_links
    }

    #[inline]
    fn links_mut(node: &mut AmtNode) -> &mut Links {
        &mut node.even_links
    }

    #[inline]
    fn key(node: &AmtNode) -> &i64 {
        &node.even
    }
}

#[derive(Clone, Copy, Debug)]
pub struct OddLane;

impl Lane<AmtNode> for OddLane {
    type Key = i64;

    #[inline]
    fn links(node: &AmtNode) -> &Links {
        &node.odd_links
    }

    #[inline]
    fn links_mut(node: &mut AmtNode) -> &mut Links {
        &mut node.odd_links
    }

    #[inline]
    fn key(node: &AmtNode) -> &i64 {
        &node.odd
    }
}

/// Dual-parity red-black tree over positive integers.
#[derive(Clone, Debug, Default)]
pub struct AmtTree {
    arena: Vec<AmtNode>,
    even_root: Option<u32>,
    odd_root: Option<u32>,
    /// Nodes whose even slot is still vacant, oldest first.
    vacant_even: VecDeque<u32>,
    /// Nodes whose odd slot is still vacant, oldest first.
    vacant_odd: VecDeque<u32>,
    even_len: usize,
    odd_len: usize,
}

impl AmtTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` into the lane of its parity.
    ///
    /// # Errors
    ///
    /// [`TreeError::ValueTooSmall`] for values below [`MIN_VALUE`]; the tree
    /// is left untouched.
    pub fn insert(&mut self, value: i64) -> Result<(), TreeError> {
        check_value(value)?;
        let parity = Parity::of(value);

        let idx = match self.vacancies_mut(parity).pop_front() {
            Some(idx) => {
                self.arena[idx as usize].set_slot(parity, value);
                trace!(value, node = idx, "filling vacant slot");
                idx
            }
            None => {
                self.arena.push(AmtNode::new(value, parity));
                let idx = (self.arena.len() - 1) as u32;
                self.vacancies_mut(parity.other()).push_back(idx);
                trace!(value, node = idx, "allocating node");
                idx
            }
        };

        let cmp = default_comparator::<i64>;
        match parity {
            Parity::Even => {
                self.even_root = Some(util::insert::<_, EvenLane, _>(
                    &mut self.arena,
                    self.even_root,
                    idx,
                    &cmp,
                ));
                self.even_len += 1;
            }
            Parity::Odd => {
                self.odd_root = Some(util::insert::<_, OddLane, _>(
                    &mut self.arena,
                    self.odd_root,
                    idx,
                    &cmp,
                ));
                self.odd_len += 1;
            }
        }
        Ok(())
    }

    pub fn contains(&self, value: i64) -> bool {
        self.find(value).is_some()
    }

    /// Index of a node whose slot of `value`'s parity holds `value`.
    pub fn find(&self, value: i64) -> Option<u32> {
        if value < MIN_VALUE {
            return None;
        }
        let cmp = default_comparator::<i64>;
        match Parity::of(value) {
            Parity::Even => util::find::<_, EvenLane, _>(&self.arena, self.even_root, &value, &cmp),
            Parity::Odd => util::find::<_, OddLane, _>(&self.arena, self.odd_root, &value, &cmp),
        }
    }

    /// Rotates `child` above `parent` in the lane of `parity`.
    pub fn rotate(
        &mut self,
        parity: Parity,
        child: Option<u32>,
        parent: Option<u32>,
    ) -> Result<(), TreeError> {
        let Some(root) = self.root_index(parity) else {
            debug!(?parity, ?child, ?parent, "rotation rejected: empty lane");
            return Err(TreeError::MissingNode);
        };
        match parity {
            Parity::Even => {
                self.even_root = Some(util::rotate::<_, EvenLane>(
                    &mut self.arena,
                    root,
                    child,
                    parent,
                )?);
            }
            Parity::Odd => {
                self.odd_root = Some(util::rotate::<_, OddLane>(
                    &mut self.arena,
                    root,
                    child,
                    parent,
                )?);
            }
        }
        Ok(())
    }

    /// Number of stored values of both parities.
    pub fn size(&self) -> usize {
        self.even_len + self.odd_len
    }

    pub fn size_of(&self, parity: Parity) -> usize {
        match parity {
            Parity::Even => self.even_len,
            Parity::Odd => self.odd_len,
        }
    }

    /// Number of allocated nodes.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn root_index(&self, parity: Parity) -> Option<u32> {
        match parity {
            Parity::Even => self.even_root,
            Parity::Odd => self.odd_root,
        }
    }

    pub fn height(&self, parity: Parity) -> usize {
        match parity {
            Parity::Even => util::height::<_, EvenLane>(&self.arena, self.even_root),
            Parity::Odd => util::height::<_, OddLane>(&self.arena, self.odd_root),
        }
    }

    pub fn arena(&self) -> &[AmtNode] {
        &self.arena
    }

    pub fn node(&self, idx: u32) -> Option<&AmtNode> {
        self.arena.get(idx as usize)
    }

    pub fn left(&self, parity: Parity, idx: u32) -> Option<u32> {
        self.node(idx).and_then(|n| n.links(parity).l)
    }

    pub fn right(&self, parity: Parity, idx: u32) -> Option<u32> {
        self.node(idx).and_then(|n| n.links(parity).r)
    }

    pub fn up(&self, parity: Parity, idx: u32) -> Option<u32> {
        self.node(idx).and_then(|n| n.links(parity).p)
    }

    /// Missing nodes count as black.
    pub fn is_red(&self, parity: Parity, idx: u32) -> bool {
        self.node(idx).is_some_and(|n| n.links(parity).is_red())
    }

    /// Level-order rendering of one lane; each node prints as
    /// `even:odd(color)` with the color of that lane.
    pub fn to_level_order_string(&self, parity: Parity) -> String {
        let label = |n: &AmtNode| format!("{}:{}{}", n.even, n.odd, color_tag(n.links(parity)));
        match parity {
            Parity::Even => level_order::<_, EvenLane, _>(&self.arena, self.even_root, label),
            Parity::Odd => level_order::<_, OddLane, _>(&self.arena, self.odd_root, label),
        }
    }

    /// Checks both lanes, slot occupancy and node sharing.
    pub fn assert_valid(&self) -> Result<(), String> {
        let cmp = default_comparator::<i64>;
        util::assert_red_black_tree::<_, EvenLane, _>(&self.arena, self.even_root, &cmp)
            .map_err(|e| format!("even lane: {e}"))?;
        util::assert_red_black_tree::<_, OddLane, _>(&self.arena, self.odd_root, &cmp)
            .map_err(|e| format!("odd lane: {e}"))?;

        self.check_lane::<EvenLane>(Parity::Even)?;
        self.check_lane::<OddLane>(Parity::Odd)?;

        if self.arena.len() != self.even_len.max(self.odd_len) {
            return Err(format!(
                "{} nodes allocated for {} even and {} odd values",
                self.arena.len(),
                self.even_len,
                self.odd_len
            ));
        }
        Ok(())
    }

    fn check_lane<L: Lane<AmtNode>>(&self, parity: Parity) -> Result<(), String> {
        let mut linked = 0;
        let mut curr = util::first::<_, L>(&self.arena, self.root_index(parity));
        while let Some(i) = curr {
            let n = &self.arena[i as usize];
            if n.is_vacant(parity) {
                return Err(format!("{parity:?} lane links node {i} with a vacant slot"));
            }
            if Parity::of(n.slot(parity)) != parity {
                return Err(format!("{parity:?} lane holds value {}", n.slot(parity)));
            }
            linked += 1;
            curr = util::next::<_, L>(&self.arena, i);
        }
        if linked != self.size_of(parity) {
            return Err(format!(
                "{parity:?} lane links {linked} nodes, expected {}",
                self.size_of(parity)
            ));
        }
        Ok(())
    }

    fn vacancies_mut(&mut self, parity: Parity) -> &mut VecDeque<u32> {
        match parity {
            Parity::Even => &mut self.vacant_even,
            Parity::Odd => &mut self.vacant_odd,
        }
    }
}
