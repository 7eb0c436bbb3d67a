//! Arena-based red-black trees.
//!
//! Nodes live in a `Vec` arena and link to each other through `Option<u32>`
//! indices (`p` / `l` / `r`), so parent back-references never own anything.
//! The balancing core in [`util`] is written once, generic over a [`Lane`]
//! (which links and key of a node to walk), and reused by:
//!
//! - [`RbTree`]: a single-key red-black tree;
//! - [`AmtTree`]: the alternating/merged tree, which threads an even-value
//!   tree and an odd-value tree through one arena of two-slot nodes;
//! - [`DualRbTree`]: the two-separate-trees baseline for [`AmtTree`].
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Links`], [`Lane`], [`RbNode`], comparators |
//! [`util`] | rotation, red-black repair, insertion, lookup, validation |
//! [`print`] | level-order debug strings |
//! [`rb_tree`] | [`RbTree`] |
//! [`amt`] | [`AmtTree`], [`AmtNode`], [`Parity`] |
//! [`dual`] | [`DualRbTree`] |
//!
//! Trees are single-threaded: mutation needs `&mut`, and shared `&` access
//! only reads.

pub mod amt;
pub mod dual;
pub mod error;
pub mod print;
pub mod rb_tree;
pub mod types;
pub mod util;

pub use amt::{AmtNode, AmtTree, EvenLane, OddLane, Parity, MIN_VALUE, VACANT};
pub use dual::DualRbTree;
pub use error::TreeError;
pub use rb_tree::RbTree;
pub use types::{default_comparator, KeyLane, Lane, Links, RbNode};
