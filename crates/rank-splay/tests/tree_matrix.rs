use rank_splay::{RankSplayTree, SplayError, SplayForest};

fn values(forest: &SplayForest<i32>, tree: &RankSplayTree<i32>) -> Vec<i32> {
    tree.iter(forest).copied().collect()
}

#[test]
fn build_iterate_and_index_matrix() {
    let input: Vec<i32> = (0..257).map(|i| i * 3 - 100).collect();
    let mut forest = SplayForest::new();
    let tree = forest.build(input.clone());

    assert_eq!(tree.len(&forest), input.len());
    assert_eq!(values(&forest, &tree), input);
    for (i, expected) in input.iter().enumerate() {
        assert_eq!(tree.get(&forest, i), Ok(expected));
    }
    // Splaying accesses in a scattered order must not disturb the sequence.
    for i in (0..input.len()).rev().step_by(7) {
        assert_eq!(*tree.at(&mut forest, i).unwrap(), input[i]);
    }
    assert_eq!(values(&forest, &tree), input);
    assert_eq!(forest.verify(&tree), Ok(()));
}

#[test]
fn empty_tree_matrix() {
    let mut forest = SplayForest::<i32>::new();
    let tree = forest.build(Vec::new());
    assert!(tree.is_empty(&forest));
    assert_eq!(tree.len(&forest), 0);
    assert_eq!(
        tree.get(&forest, 0),
        Err(SplayError::OutOfRange { index: 0, len: 0 })
    );
    assert_eq!(
        tree.at(&mut forest, 0).unwrap_err(),
        SplayError::OutOfRange { index: 0, len: 0 }
    );
    assert_eq!(tree.reverse(&mut forest, 0, 0), Ok(()));
    let right = tree.split(&mut forest, 0).unwrap();
    assert!(right.is_empty(&forest));
    tree.merge(&mut forest, right);
    assert!(tree.is_empty(&forest));
    assert_eq!(forest.verify(&tree), Ok(()));
}

#[test]
fn reverse_scenario_matrix() {
    let mut forest = SplayForest::new();
    let tree = forest.build([1, 2, 3, 4, 5]);
    tree.reverse(&mut forest, 1, 4).unwrap();
    assert_eq!(values(&forest, &tree), vec![1, 4, 3, 2, 5]);
    assert_eq!(*tree.at(&mut forest, 1).unwrap(), 4);
    assert_eq!(forest.verify(&tree), Ok(()));
}

#[test]
fn merge_scenario_matrix() {
    let mut forest = SplayForest::new();
    let left = forest.build([1, 2, 3]);
    let right = forest.build([4, 5]);
    left.merge(&mut forest, right);
    assert_eq!(values(&forest, &left), vec![1, 2, 3, 4, 5]);
    assert_eq!(left.len(&forest), 5);
    assert_eq!(forest.verify(&left), Ok(()));
}

#[test]
fn split_scenario_matrix() {
    let mut forest = SplayForest::new();
    let tree = forest.build([1, 2, 3, 4, 5]);
    let right = tree.split(&mut forest, 2).unwrap();
    assert_eq!(values(&forest, &tree), vec![1, 2]);
    assert_eq!(values(&forest, &right), vec![3, 4, 5]);
    assert_eq!(forest.verify(&tree), Ok(()));
    assert_eq!(forest.verify(&right), Ok(()));
}

#[test]
fn split_then_merge_every_rank_matrix() {
    let input: Vec<i32> = (1..=12).collect();
    for k in 0..=input.len() {
        let mut forest = SplayForest::new();
        let tree = forest.build(input.clone());
        let right = tree.split(&mut forest, k).unwrap();
        assert_eq!(tree.len(&forest), k);
        assert_eq!(right.len(&forest), input.len() - k);
        assert_eq!(values(&forest, &tree), input[..k]);
        assert_eq!(values(&forest, &right), input[k..]);
        tree.merge(&mut forest, right);
        assert_eq!(values(&forest, &tree), input);
        assert_eq!(forest.verify(&tree), Ok(()));
    }
}

#[test]
fn reverse_twice_is_identity_matrix() {
    let input: Vec<i32> = (0..20).collect();
    let mut forest = SplayForest::new();
    let tree = forest.build(input.clone());
    for first in 0..=input.len() {
        for last in first..=input.len() {
            tree.reverse(&mut forest, first, last).unwrap();
            let mut expected = input.clone();
            expected[first..last].reverse();
            assert_eq!(values(&forest, &tree), expected);
            tree.reverse(&mut forest, first, last).unwrap();
            assert_eq!(values(&forest, &tree), input);
        }
    }
    assert_eq!(forest.verify(&tree), Ok(()));
}

#[test]
fn reverse_whole_equals_backward_iteration_matrix() {
    let input: Vec<i32> = (0..33).map(|i| i * i).collect();
    let mut forest = SplayForest::new();
    let reversed = forest.build(input.clone());
    let plain = forest.build(input.clone());
    reversed.reverse(&mut forest, 0, input.len()).unwrap();

    let forward: Vec<i32> = reversed.iter(&forest).copied().collect();
    let backward: Vec<i32> = plain.iter(&forest).rev().copied().collect();
    assert_eq!(forward, backward);
}

#[test]
fn nested_reversals_matrix() {
    let mut forest = SplayForest::new();
    let tree = forest.build(0..10);
    let mut model: Vec<i32> = (0..10).collect();
    for (first, last) in [(0, 10), (2, 7), (1, 9), (4, 5), (3, 10), (0, 6)] {
        tree.reverse(&mut forest, first, last).unwrap();
        model[first..last].reverse();
        assert_eq!(values(&forest, &tree), model);
        for (i, expected) in model.iter().enumerate() {
            assert_eq!(tree.get(&forest, i), Ok(expected));
        }
    }
    for (i, expected) in model.iter().enumerate() {
        assert_eq!(tree.at(&mut forest, i).copied(), Ok(*expected));
    }
    assert_eq!(forest.verify(&tree), Ok(()));
}

#[test]
fn erase_range_matrix() {
    let input: Vec<i32> = (0..9).collect();
    for first in 0..=input.len() {
        for last in first..=input.len() {
            let mut forest = SplayForest::new();
            let tree = forest.build(input.clone());
            let next = tree.erase_range(&mut forest, first, last).unwrap();

            let mut expected = input.clone();
            expected.drain(first..last);
            assert_eq!(values(&forest, &tree), expected);
            assert_eq!(forest.is_end(next), last == input.len());
            if last < input.len() {
                assert_eq!(forest.get(next), Some(&input[last]));
            }
            assert_eq!(forest.verify(&tree), Ok(()));
        }
    }
}

#[test]
fn erase_everything_matrix() {
    let mut forest = SplayForest::new();
    let tree = forest.build(0..50);
    let next = tree.erase_range(&mut forest, 0, 50).unwrap();
    assert!(tree.is_empty(&forest));
    assert_eq!(next, tree.end(&forest));
    // Only the sentinel remains allocated.
    assert_eq!(forest.slot_count(), 1);
}

#[test]
fn erase_range_errors_matrix() {
    let mut forest = SplayForest::new();
    let tree = forest.build([1, 2, 3]);
    assert_eq!(
        tree.erase_range(&mut forest, 2, 1),
        Err(SplayError::InvalidRange { first: 2, last: 1 })
    );
    assert_eq!(
        tree.erase_range(&mut forest, 1, 4),
        Err(SplayError::OutOfRange { index: 4, len: 3 })
    );
    assert_eq!(values(&forest, &tree), vec![1, 2, 3]);
}

#[test]
fn take_range_keeps_detached_tree_matrix() {
    let mut forest = SplayForest::new();
    let tree = forest.build(1..=6);
    let middle = tree.take_range(&mut forest, 1, 4).unwrap();
    assert_eq!(values(&forest, &tree), vec![1, 5, 6]);
    assert_eq!(values(&forest, &middle), vec![2, 3, 4]);

    // The detached tree is a full tree on its own.
    middle.reverse(&mut forest, 0, 3).unwrap();
    tree.splice(&mut forest, 3, middle).unwrap();
    assert_eq!(values(&forest, &tree), vec![1, 5, 6, 4, 3, 2]);
    assert_eq!(forest.verify(&tree), Ok(()));
}

#[test]
fn insert_at_every_rank_matrix() {
    let mut forest = SplayForest::new();
    let tree = forest.tree();
    let mut model = Vec::new();
    for (step, value) in (0..40).enumerate() {
        let rank = (step * 7) % (model.len() + 1);
        let cur = tree.insert_at(&mut forest, rank, value).unwrap();
        model.insert(rank, value);
        assert_eq!(forest.get(cur), Some(&value));
        assert_eq!(tree.rank_of(&mut forest, cur), rank);
    }
    assert_eq!(values(&forest, &tree), model);
    assert_eq!(
        tree.insert_at(&mut forest, 41, 0).unwrap_err(),
        SplayError::OutOfRange { index: 41, len: 40 }
    );
    assert_eq!(forest.verify(&tree), Ok(()));
}

#[test]
fn release_returns_values_in_order_matrix() {
    let mut forest = SplayForest::new();
    let tree = forest.build(vec!["a", "b", "c", "d"]);
    tree.reverse(&mut forest, 1, 3).unwrap();
    assert_eq!(forest.release(tree), vec!["a", "c", "b", "d"]);
    assert_eq!(forest.slot_count(), 0);
}

#[test]
fn print_tree_matrix() {
    let mut forest = SplayForest::new();
    let tree = forest.build([10, 20]);
    assert_eq!(
        tree.print_tree(&forest, ""),
        "RankSplayTree\n└─ 20 [2]\n  ← 10 [1]"
    );
}
