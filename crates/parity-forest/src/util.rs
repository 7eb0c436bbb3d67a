//! Lane-generic red-black tree routines.
//!
//! All functions take the arena plus the current root index and return the
//! root after the operation, so rotations deep inside a repair never need a
//! back-reference to the owning tree. The lane type parameter `L` picks
//! which links and key of `N` are walked.
//!
//! Duplicates are allowed and placed to the left: a new key goes left when
//! `new <= current`, right otherwise.

use tracing::{debug, trace};

use crate::error::TreeError;
use crate::types::Lane;

/// Index-level link accessors for any [`Lane`].
pub(crate) trait LaneExt<N>: Lane<N> {
    #[inline]
    fn p(arena: &[N], i: u32) -> Option<u32> {
        Self::links(&arena[i as usize]).p
    }

    #[inline]
    fn l(arena: &[N], i: u32) -> Option<u32> {
        Self::links(&arena[i as usize]).l
    }

    #[inline]
    fn r(arena: &[N], i: u32) -> Option<u32> {
        Self::links(&arena[i as usize]).r
    }

    #[inline]
    fn is_black(arena: &[N], i: u32) -> bool {
        Self::links(&arena[i as usize]).b
    }

    /// Empty subtrees count as black.
    #[inline]
    fn is_red_at(arena: &[N], i: Option<u32>) -> bool {
        i.is_some_and(|i| !Self::is_black(arena, i))
    }

    #[inline]
    fn set_p(arena: &mut [N], i: u32, v: Option<u32>) {
        Self::links_mut(&mut arena[i as usize]).p = v;
    }

    #[inline]
    fn set_l(arena: &mut [N], i: u32, v: Option<u32>) {
        Self::links_mut(&mut arena[i as usize]).l = v;
    }

    #[inline]
    fn set_r(arena: &mut [N], i: u32, v: Option<u32>) {
        Self::links_mut(&mut arena[i as usize]).r = v;
    }

    #[inline]
    fn set_black(arena: &mut [N], i: u32, black: bool) {
        Self::links_mut(&mut arena[i as usize]).b = black;
    }
}

impl<N, L: Lane<N>> LaneExt<N> for L {}

/// Rotates `child` above `parent`.
///
/// A right child produces a left rotation, a left child a right rotation.
/// Colors are untouched. Returns the tree root after the rotation, which is
/// `child` when `parent` was the root.
///
/// # Errors
///
/// - [`TreeError::MissingNode`] when either index is absent or out of range.
/// - [`TreeError::NotRelated`] when `child` is not a direct child of `parent`.
pub fn rotate<N, L>(
    arena: &mut [N],
    root: u32,
    child: Option<u32>,
    parent: Option<u32>,
) -> Result<u32, TreeError>
where
    L: Lane<N>,
{
    let len = arena.len();
    let in_range = |i: &u32| (*i as usize) < len;
    let (Some(c), Some(p)) = (child.filter(in_range), parent.filter(in_range)) else {
        debug!(?child, ?parent, "rotation rejected: missing node");
        return Err(TreeError::MissingNode);
    };
    if L::l(arena, p) != Some(c) && L::r(arena, p) != Some(c) {
        debug!(child = c, parent = p, "rotation rejected: nodes are not related");
        return Err(TreeError::NotRelated {
            child: c,
            parent: p,
        });
    }
    Ok(rotate_unchecked::<N, L>(arena, root, c, p))
}

/// [`rotate`] without the relationship checks. `c` must be a child of `p`.
pub(crate) fn rotate_unchecked<N, L>(arena: &mut [N], root: u32, c: u32, p: u32) -> u32
where
    L: Lane<N>,
{
    let g = L::p(arena, p);

    if L::r(arena, p) == Some(c) {
        let cl = L::l(arena, c);
        L::set_r(arena, p, cl);
        if let Some(cl) = cl {
            L::set_p(arena, cl, Some(p));
        }
        L::set_l(arena, c, Some(p));
    } else {
        let cr = L::r(arena, c);
        L::set_l(arena, p, cr);
        if let Some(cr) = cr {
            L::set_p(arena, cr, Some(p));
        }
        L::set_r(arena, c, Some(p));
    }

    L::set_p(arena, c, g);
    L::set_p(arena, p, Some(c));
    trace!(child = c, parent = p, "rotate");

    match g {
        Some(g) => {
            if L::l(arena, g) == Some(p) {
                L::set_l(arena, g, Some(c));
            } else {
                L::set_r(arena, g, Some(c));
            }
            root
        }
        None => c,
    }
}

/// Repairs red-red violations starting at the red node `n`, walking toward
/// the root. Returns the root after all rotations.
///
/// A red aunt recolors and moves the violation up to the grandparent. A
/// black (or missing) aunt rotates once or twice and ends the repair.
pub fn ensure_red_property<N, L>(arena: &mut [N], mut root: u32, mut n: u32) -> u32
where
    L: Lane<N>,
{
    loop {
        let Some(p) = L::p(arena, n) else {
            L::set_black(arena, n, true);
            return root;
        };
        if L::is_black(arena, p) {
            return root;
        }
        let Some(g) = L::p(arena, p) else {
            // Red root: blackening it adds one black to every path.
            L::set_black(arena, p, true);
            return root;
        };

        let parent_is_left = L::l(arena, g) == Some(p);
        let aunt = if parent_is_left {
            L::r(arena, g)
        } else {
            L::l(arena, g)
        };

        if let Some(aunt) = aunt.filter(|&a| !L::is_black(arena, a)) {
            trace!(node = n, parent = p, aunt, grandparent = g, "recolor");
            L::set_black(arena, p, true);
            L::set_black(arena, aunt, true);
            L::set_black(arena, g, false);
            n = g;
            continue;
        }

        let node_is_left = L::l(arena, p) == Some(n);
        if parent_is_left == node_is_left {
            let shape = if parent_is_left { "left-left" } else { "right-right" };
            trace!(node = n, shape, "rebalance");
            root = rotate_unchecked::<N, L>(arena, root, p, g);
            L::set_black(arena, p, true);
            L::set_black(arena, g, false);
        } else {
            let shape = if parent_is_left { "left-right" } else { "right-left" };
            trace!(node = n, shape, "rebalance");
            root = rotate_unchecked::<N, L>(arena, root, n, p);
            root = rotate_unchecked::<N, L>(arena, root, n, g);
            L::set_black(arena, n, true);
            L::set_black(arena, g, false);
        }
        return root;
    }
}

/// Plain binary-search-tree placement of the unlinked node `n`.
///
/// Does not touch colors. Returns the root (`n` itself for an empty tree).
pub fn bst_insert<N, L, C>(arena: &mut [N], root: Option<u32>, n: u32, comparator: &C) -> u32
where
    L: Lane<N>,
    C: Fn(&L::Key, &L::Key) -> i32,
{
    let Some(root) = root else {
        return n;
    };

    let mut curr = root;
    loop {
        let go_left = comparator(L::key(&arena[n as usize]), L::key(&arena[curr as usize])) <= 0;
        let next = if go_left {
            L::l(arena, curr)
        } else {
            L::r(arena, curr)
        };
        match next {
            Some(next) => curr = next,
            None => {
                if go_left {
                    L::set_l(arena, curr, Some(n));
                } else {
                    L::set_r(arena, curr, Some(n));
                }
                L::set_p(arena, n, Some(curr));
                return root;
            }
        }
    }
}

/// Red-black insertion of the unlinked node `n`. Returns the new root.
///
/// Into an empty tree `n` becomes a black root. Otherwise it is placed red,
/// repaired, and the root is forced black.
pub fn insert<N, L, C>(arena: &mut [N], root: Option<u32>, n: u32, comparator: &C) -> u32
where
    L: Lane<N>,
    C: Fn(&L::Key, &L::Key) -> i32,
{
    if root.is_none() {
        L::set_black(arena, n, true);
        return n;
    }

    L::set_black(arena, n, false);
    let root = bst_insert::<N, L, C>(arena, root, n, comparator);
    let root = ensure_red_property::<N, L>(arena, root, n);
    L::set_black(arena, root, true);
    root
}

/// Finds a node holding `key`.
pub fn find<N, L, C>(arena: &[N], root: Option<u32>, key: &L::Key, comparator: &C) -> Option<u32>
where
    L: Lane<N>,
    C: Fn(&L::Key, &L::Key) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(key, L::key(&arena[i as usize]));
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 {
            L::l(arena, i)
        } else {
            L::r(arena, i)
        };
    }
    None
}

/// Leftmost node in the tree.
pub(crate) fn first<N, L: Lane<N>>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = L::l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// In-order successor.
pub(crate) fn next<N, L: Lane<N>>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = L::r(arena, curr) {
        return first::<N, L>(arena, Some(r));
    }
    let mut p = L::p(arena, curr);
    while let Some(pi) = p {
        if L::r(arena, pi) == Some(curr) {
            curr = pi;
            p = L::p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Number of nodes under `root`.
pub fn size<N, L: Lane<N>>(arena: &[N], root: Option<u32>) -> usize {
    let mut count = 0;
    let mut curr = first::<N, L>(arena, root);
    while let Some(i) = curr {
        count += 1;
        curr = next::<N, L>(arena, i);
    }
    count
}

/// Longest root-to-leaf path, counted in nodes.
pub fn height<N, L: Lane<N>>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |i| {
        1 + height::<N, L>(arena, L::l(arena, i)).max(height::<N, L>(arena, L::r(arena, i)))
    })
}

/// Checks every red-black and binary-search-tree invariant of one lane.
///
/// Returns a description of the first violation found.
pub fn assert_red_black_tree<N, L, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), String>
where
    L: Lane<N>,
    C: Fn(&L::Key, &L::Key) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if L::p(arena, root).is_some() {
        return Err("Root has parent".to_string());
    }
    if !L::is_black(arena, root) {
        return Err("Root is not black".to_string());
    }

    fn black_height<N, L: Lane<N>>(arena: &[N], node: Option<u32>) -> Result<usize, String> {
        let Some(node) = node else {
            return Ok(0);
        };

        let l = L::l(arena, node);
        let r = L::r(arena, node);

        if l.is_some_and(|li| L::p(arena, li) != Some(node)) {
            return Err(format!("Broken parent link on left child of node {node}"));
        }
        if r.is_some_and(|ri| L::p(arena, ri) != Some(node)) {
            return Err(format!("Broken parent link on right child of node {node}"));
        }

        let black = L::is_black(arena, node);
        if !black && (L::is_red_at(arena, l) || L::is_red_at(arena, r)) {
            return Err(format!("Red node {node} has a red child"));
        }

        let lh = black_height::<N, L>(arena, l)?;
        let rh = black_height::<N, L>(arena, r)?;
        if lh != rh {
            return Err(format!("Black height mismatch under node {node}: {lh} != {rh}"));
        }

        Ok(lh + usize::from(black))
    }

    black_height::<N, L>(arena, Some(root))?;

    let mut curr = first::<N, L>(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            let cmp = comparator(L::key(&arena[prev as usize]), L::key(&arena[i as usize]));
            if cmp > 0 {
                return Err(format!("Node order violated between {prev} and {i}"));
            }
        }
        prev_node = Some(i);
        curr = next::<N, L>(arena, i);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{default_comparator, KeyLane, RbNode};

    fn push(arena: &mut Vec<RbNode<i32>>, k: i32) -> u32 {
        arena.push(RbNode::new(k));
        (arena.len() - 1) as u32
    }

    fn build(keys: &[i32]) -> (Vec<RbNode<i32>>, Option<u32>) {
        let mut arena = Vec::new();
        let mut root = None;
        for &k in keys {
            let n = push(&mut arena, k);
            root = Some(insert::<_, KeyLane, _>(
                &mut arena,
                root,
                n,
                &default_comparator::<i32>,
            ));
        }
        (arena, root)
    }

    #[test]
    fn empty_tree_insert_makes_black_root() {
        let (arena, root) = build(&[7]);
        assert_eq!(root, Some(0));
        assert!(arena[0].links.b);
        assert_eq!(arena[0].links.p, None);
    }

    #[test]
    fn duplicates_go_left() {
        let mut arena = Vec::new();
        let a = push(&mut arena, 5);
        let b = push(&mut arena, 5);
        let root = bst_insert::<_, KeyLane, _>(&mut arena, None, a, &default_comparator::<i32>);
        let root =
            bst_insert::<_, KeyLane, _>(&mut arena, Some(root), b, &default_comparator::<i32>);
        assert_eq!(root, a);
        assert_eq!(arena[a as usize].links.l, Some(b));
        assert_eq!(arena[a as usize].links.r, None);
    }

    #[test]
    fn rotate_root_updates_root() {
        let (mut arena, root) = build(&[2, 1, 3]);
        let root = root.unwrap();
        let left = arena[root as usize].links.l;
        let new_root = rotate::<_, KeyLane>(&mut arena, root, left, Some(root)).unwrap();
        assert_eq!(Some(new_root), left);
        assert_eq!(arena[new_root as usize].links.p, None);
        assert_eq!(arena[root as usize].links.p, Some(new_root));
    }

    #[test]
    fn rotate_rejects_out_of_range_index() {
        let (mut arena, root) = build(&[2, 1, 3]);
        let root = root.unwrap();
        assert_eq!(
            rotate::<_, KeyLane>(&mut arena, root, Some(99), Some(root)),
            Err(TreeError::MissingNode)
        );
    }

    #[test]
    fn find_and_size() {
        let (arena, root) = build(&[10, 20, 5, 3, 25]);
        assert_eq!(size::<_, KeyLane>(&arena, root), 5);
        assert!(find::<_, KeyLane, _>(&arena, root, &3, &default_comparator::<i32>).is_some());
        assert!(find::<_, KeyLane, _>(&arena, root, &4, &default_comparator::<i32>).is_none());
        assert_eq!(height::<_, KeyLane>(&arena, root), 3);
    }

    #[test]
    fn validator_reports_red_root() {
        let (mut arena, root) = build(&[1, 2]);
        arena[root.unwrap() as usize].links.b = false;
        let err = assert_red_black_tree::<_, KeyLane, _>(&arena, root, &default_comparator::<i32>)
            .unwrap_err();
        assert_eq!(err, "Root is not black");
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let keys: Vec<i32> = (0..=100).collect();
        let (arena, root) = build(&keys);
        assert_red_black_tree::<_, KeyLane, _>(&arena, root, &default_comparator::<i32>).unwrap();
        // 2 * log2(n + 1)
        assert!(height::<_, KeyLane>(&arena, root) <= 14);
    }
}
