use parity_forest::{AmtTree, Parity, TreeError};

fn amt_of(values: &[i64]) -> AmtTree {
    let mut tree = AmtTree::new();
    for &v in values {
        tree.insert(v).unwrap();
        if let Err(err) = tree.assert_valid() {
            panic!("invalid AMT after insert({v}): {err}");
        }
    }
    tree
}

#[test]
fn amt_mixed_parity_contains_matrix() {
    let tree = amt_of(&[2, 3, 4, 7]);
    assert!(tree.contains(2));
    assert!(tree.contains(3));
    assert!(tree.contains(4));
    assert!(tree.contains(7));
    assert!(!tree.contains(5));
    assert!(!tree.contains(6));
    assert!(!tree.contains(0));
    assert!(!tree.contains(-2));

    assert_eq!(tree.size(), 4);
    assert_eq!(tree.node_count(), 2);
    assert_eq!(tree.to_level_order_string(Parity::Even), "[ 2:3(b), 4:7(r) ]");
    assert_eq!(tree.to_level_order_string(Parity::Odd), "[ 2:3(b), 4:7(r) ]");
}

#[test]
fn amt_lanes_balance_independently_matrix() {
    let tree = amt_of(&[2, 4, 6, 5, 3, 1]);
    assert_eq!(tree.node_count(), 3);
    assert_eq!(
        tree.to_level_order_string(Parity::Even),
        "[ 4:3(b), 2:5(r), 6:1(r) ]"
    );
    assert_eq!(
        tree.to_level_order_string(Parity::Odd),
        "[ 4:3(b), 6:1(r), 2:5(r) ]"
    );
}

#[test]
fn amt_rotation_touches_one_lane_matrix() {
    let mut tree = amt_of(&[2, 4, 6, 5, 3, 1]);
    let odd_before = tree.to_level_order_string(Parity::Odd);

    let root = tree.root_index(Parity::Even).unwrap();
    let left = tree.left(Parity::Even, root);
    tree.rotate(Parity::Even, left, Some(root)).unwrap();

    assert_eq!(tree.root_index(Parity::Even), left);
    assert_eq!(
        tree.to_level_order_string(Parity::Even),
        "[ 2:5(r), 4:3(b), 6:1(r) ]"
    );
    assert_eq!(tree.to_level_order_string(Parity::Odd), odd_before);
    assert!(tree.contains(6));
    assert!(tree.contains(1));
}

#[test]
fn amt_rotation_errors_matrix() {
    let mut tree = AmtTree::new();
    assert_eq!(
        tree.rotate(Parity::Odd, None, None),
        Err(TreeError::MissingNode)
    );

    let mut tree = amt_of(&[2, 4, 6]);
    let root = tree.root_index(Parity::Even).unwrap();
    let left = tree.left(Parity::Even, root);
    let right = tree.right(Parity::Even, root);
    assert!(matches!(
        tree.rotate(Parity::Even, left, right),
        Err(TreeError::NotRelated { .. })
    ));
    assert_eq!(
        tree.rotate(Parity::Even, None, Some(root)),
        Err(TreeError::MissingNode)
    );
    // Nodes exist but the odd lane is empty.
    assert_eq!(
        tree.rotate(Parity::Odd, left, Some(root)),
        Err(TreeError::MissingNode)
    );
    tree.assert_valid().unwrap();
}

#[test]
fn amt_rejects_sentinel_matrix() {
    let mut tree = amt_of(&[1, 2]);
    let before = tree.to_level_order_string(Parity::Even);
    assert_eq!(
        tree.insert(0),
        Err(TreeError::ValueTooSmall { value: 0, min: 1 })
    );
    assert_eq!(
        tree.insert(-1),
        Err(TreeError::ValueTooSmall { value: -1, min: 1 })
    );
    assert_eq!(tree.size(), 2);
    assert_eq!(tree.to_level_order_string(Parity::Even), before);
    tree.assert_valid().unwrap();
}

#[test]
fn amt_single_parity_matrix() {
    let evens: Vec<i64> = (1..=100).map(|i| i * 2).collect();
    let tree = amt_of(&evens);
    assert_eq!(tree.size_of(Parity::Even), 100);
    assert_eq!(tree.size_of(Parity::Odd), 0);
    assert_eq!(tree.node_count(), 100);
    assert_eq!(tree.root_index(Parity::Odd), None);
    assert_eq!(tree.to_level_order_string(Parity::Odd), "[ ]");
    assert!(tree.height(Parity::Even) <= 14);
    assert!(evens.iter().all(|&v| tree.contains(v)));
    assert!(!tree.contains(201));
}

#[test]
fn amt_ascending_and_descending_matrix() {
    let mut tree = AmtTree::new();
    for i in 1..=200 {
        tree.insert(i).unwrap();
        tree.insert(401 - i).unwrap();
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.size(), 400);
    assert_eq!(tree.node_count(), 200);
    assert!((1..=400).all(|v| tree.contains(v)));
    assert!(!tree.contains(401));
}

#[test]
fn amt_duplicates_matrix() {
    let tree = amt_of(&[4, 4, 4, 9, 9]);
    assert_eq!(tree.size_of(Parity::Even), 3);
    assert_eq!(tree.size_of(Parity::Odd), 2);
    assert_eq!(tree.node_count(), 3);
    assert!(tree.contains(4));
    assert!(tree.contains(9));
}

#[test]
fn amt_clear_matrix() {
    let mut tree = amt_of(&[1, 2, 3]);
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.size(), 0);
    assert!(!tree.contains(1));
    tree.insert(3).unwrap();
    assert_eq!(tree.node_count(), 1);
    tree.assert_valid().unwrap();
}
