//! Node and lane definitions.
//!
//! Every "pointer" is an `Option<u32>` index into a [`Vec`]-backed arena.
//! A node type may carry more than one set of links; each set is a
//! [`Lane`], and every tree routine in [`crate::util`] is generic over the
//! lane it walks. This is how the dual-parity tree threads two independent
//! red-black trees through one arena of nodes.

/// Parent/child links plus the color bit of one lane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Links {
    /// Parent (`up`). Non-owning; `None` only for the root.
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    /// Node color: `true` = black, `false` = red.
    pub b: bool,
}

impl Links {
    pub fn is_red(&self) -> bool {
        !self.b
    }
}

/// Comparator used by the trees when none is given.
///
/// Negative when `a < b`, zero when equal, positive when `a > b`.
pub fn default_comparator<K: PartialOrd>(a: &K, b: &K) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}

/// Selects one set of [`Links`] and one key inside a node type.
///
/// Implemented by zero-sized marker types, so the lane is chosen at compile
/// time: `util::insert::<_, EvenLane, _>(..)`.
pub trait Lane<N> {
    type Key;

    fn links(node: &N) -> &Links;
    fn links_mut(node: &mut N) -> &mut Links;
    fn key(node: &N) -> &Self::Key;
}

/// Single-key red-black tree node.
#[derive(Clone, Debug)]
pub struct RbNode<K> {
    pub k: K,
    pub links: Links,
}

impl<K> RbNode<K> {
    /// Fresh nodes start red and unlinked.
    pub fn new(k: K) -> Self {
        Self {
            k,
            links: Links::default(),
        }
    }
}

/// The only lane of [`RbNode`].
#[derive(Clone, Copy, Debug)]
pub struct KeyLane;

impl<K> Lane<RbNode<K>> for KeyLane {
    type Key = K;

    #[inline]
    fn links(node: &RbNode<K>) -> &Links {
        &node.links
    }

    #[inline]
    fn links_mut(node: &mut RbNode<K>) -> &mut Links {
        &mut node.links
    }

    #[inline]
    fn key(node: &RbNode<K>) -> &K {
        &node.k
    }
}
