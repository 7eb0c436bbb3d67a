use std::collections::VecDeque;

use crate::types::{Lane, Links};
use crate::util::LaneExt;

/// Color suffix used in level-order strings.
pub fn color_tag(links: &Links) -> &'static str {
    if links.b {
        "(b)"
    } else {
        "(r)"
    }
}

/// Breadth-first rendering of one lane, left child before right child:
/// `[ v1, v2, ..., vn ]`. An empty tree renders as `[ ]`.
pub fn level_order<N, L, F>(arena: &[N], root: Option<u32>, label: F) -> String
where
    L: Lane<N>,
    F: Fn(&N) -> String,
{
    let Some(root) = root else {
        return "[ ]".to_string();
    };

    let mut parts = Vec::new();
    let mut queue = VecDeque::from([root]);
    while let Some(i) = queue.pop_front() {
        if let Some(l) = L::l(arena, i) {
            queue.push_back(l);
        }
        if let Some(r) = L::r(arena, i) {
            queue.push_back(r);
        }
        parts.push(label(&arena[i as usize]));
    }

    format!("[ {} ]", parts.join(", "))
}
