//! Deterministic splay scenarios: hand-picked trees, exhaustive sweeps over
//! complete trees, degenerate vines and seeded random walks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

use vine::check::check_tree;
use vine::{BufferId, NodeId, Piece, PieceState, PieceTree, synth};

// =============================================================================
// Test helpers
// =============================================================================

fn in_order_sizes(tree: &PieceTree<BufferId>) -> Vec<usize> {
    tree.edges().map(|(id, _)| tree.piece(id).size).collect()
}

fn node_ids(tree: &PieceTree<BufferId>) -> FxHashSet<NodeId> {
    tree.edges().map(|(id, _)| id).collect()
}

/// Splay at each offset in turn, checking every invariant after each call.
/// On failure the panic carries the offsets applied so far.
fn splay_all(tree: &mut PieceTree<BufferId>, offsets: &[usize]) {
    let sizes = in_order_sizes(tree);
    let ids = node_ids(tree);
    for (i, &offset) in offsets.iter().enumerate() {
        let root = tree.splay(offset).expect("tree is not empty");
        let applied = &offsets[..=i];

        if let Err(err) = check_tree(tree) {
            panic!("{err} after splaying {applied:?}");
        }
        assert_eq!(in_order_sizes(tree), sizes, "order changed after {applied:?}");
        assert_eq!(node_ids(tree), ids, "node set changed after {applied:?}");
        assert_root_covers(tree, root, offset);
    }
}

/// The root's piece interval contains `offset` under the boundary policy:
/// `(left, right]`, or `[0, right]` for the first piece.
fn assert_root_covers(tree: &PieceTree<BufferId>, root: NodeId, offset: usize) {
    assert_eq!(tree.root(), Some(root));
    let left = tree.node(root).lsize();
    let right = left + tree.piece(root).size;
    let covered = if left == 0 { offset <= right } else { left < offset && offset <= right };
    assert!(covered, "root {root} spans ({left}, {right}] but offset is {offset}");
}

// =============================================================================
// Boundary policy
// =============================================================================

#[test]
fn total_coverage_of_small_tree() {
    let mut tree = synth::from_sizes(&[1, 1, 2, 4]);
    let ids: Vec<NodeId> = tree.edges().map(|(id, _)| id).collect();

    assert_eq!(tree.splay(1), Some(ids[0]));
    assert_eq!(tree.splay(2), Some(ids[1]));
    assert_eq!(tree.splay(0), Some(ids[0]));
    assert_eq!(tree.splay(8), Some(ids[3]));
    check_tree(&tree).unwrap();
}

#[test]
fn every_offset_of_small_tree() {
    // Piece i covers (edges[i], edges[i + 1]], and the first piece also owns 0.
    let sizes = [1, 1, 2, 4];
    let expected = [0, 0, 1, 2, 2, 3, 3, 3, 3];
    for offset in 0..=8 {
        let mut tree = synth::from_sizes(&sizes);
        let ids: Vec<NodeId> = tree.edges().map(|(id, _)| id).collect();
        assert_eq!(tree.splay(offset), Some(ids[expected[offset]]), "offset {offset}");
    }
}

#[test]
fn offset_zero_always_finds_first_piece() {
    for depth in 1..=synth::MAX_POWERS_OF_TWO_DEPTH {
        let mut tree = synth::complete_powers_of_two(depth);
        let first = tree.edges().next().map(|(id, _)| id);
        // Move something else to the root first so the walk has work to do.
        tree.splay(tree.len());
        assert_eq!(tree.splay(0), first, "depth {depth}");
        assert_eq!(tree.node(first.unwrap()).left(), None);
    }
}

#[test]
fn maximum_offset_finds_last_piece() {
    for depth in 1..=synth::MAX_POWERS_OF_TWO_DEPTH {
        let mut tree = synth::complete_powers_of_two(depth);
        let last = tree.edges().last().map(|(id, _)| id);
        tree.splay(0);
        assert_eq!(tree.splay(tree.len()), last, "depth {depth}");
        assert_eq!(tree.node(last.unwrap()).right(), None);
    }
}

// =============================================================================
// Exhaustive small trees
// =============================================================================

#[test]
fn exhaustive_complete_trees() {
    for depth in 1..=synth::MAX_POWERS_OF_TWO_DEPTH {
        let mut tree = synth::complete_powers_of_two(depth);
        let total = tree.len();
        let edges: Vec<usize> = tree.edges().map(|(_, e)| e).collect();
        let probes = [total / 2, total / 3, 1, total, 0, total.saturating_sub(1)];

        let mut offsets = Vec::new();
        for (i, &edge) in edges.iter().enumerate() {
            offsets.push(edge);
            offsets.push(probes[i % probes.len()]);
        }
        splay_all(&mut tree, &offsets);
    }
}

#[test]
fn exhaustive_every_offset_from_fresh_tree() {
    for depth in 1..=4 {
        let fresh = synth::complete(depth, |i| i % 3 + 1);
        for offset in 0..=fresh.len() {
            let mut tree = fresh.clone();
            splay_all(&mut tree, &[offset]);
        }
    }
}

#[test]
fn exhaustive_pairs_of_offsets() {
    let fresh = synth::complete(3, |i| 2 + i % 2);
    let total = fresh.len();
    for a in 0..=total {
        for b in 0..=total {
            let mut tree = fresh.clone();
            splay_all(&mut tree, &[a, b]);
        }
    }
}

#[test]
fn ascending_and_descending_sweeps() {
    let mut tree = synth::complete(5, |i| (i * 7) % 5 + 1);
    let total = tree.len();
    let up: Vec<usize> = (0..=total).collect();
    let down: Vec<usize> = (0..=total).rev().collect();
    splay_all(&mut tree, &up);
    splay_all(&mut tree, &down);
}

// =============================================================================
// Idempotence
// =============================================================================

#[test]
fn splaying_twice_keeps_the_same_root() {
    let mut tree = synth::complete(5, |i| i + 1);
    for offset in [0, 1, 17, 100, 250, tree.len()] {
        let first = tree.splay(offset);
        let shape = tree.root().map(|r| (tree.node(r).lsize(), tree.node(r).rsize()));
        let second = tree.splay(offset);
        assert_eq!(first, second, "offset {offset}");
        let again = tree.root().map(|r| (tree.node(r).lsize(), tree.node(r).rsize()));
        assert_eq!(shape, again);
    }
}

// =============================================================================
// Degenerate shapes
// =============================================================================

#[test]
fn left_vine_every_offset() {
    let sizes = vec![3; 40];
    let total: usize = sizes.iter().sum();
    let mut tree = synth::left_vine(&sizes);
    splay_all(&mut tree, &[0]);
    let mut tree = synth::left_vine(&sizes);
    splay_all(&mut tree, &(0..=total).step_by(2).collect::<Vec<_>>());
}

#[test]
fn right_vine_every_offset() {
    let sizes: Vec<usize> = (1..=40).collect();
    let total: usize = sizes.iter().sum();
    let mut tree = synth::right_vine(&sizes);
    splay_all(&mut tree, &[total]);
    let mut tree = synth::right_vine(&sizes);
    splay_all(&mut tree, &(0..=total).rev().step_by(3).collect::<Vec<_>>());
}

#[test]
fn deep_vine_does_not_overflow() {
    let sizes = vec![1; 100_000];
    let mut tree = synth::left_vine(&sizes);
    let root = tree.splay(1).unwrap();
    assert_eq!(tree.offset_of(root), 0);
    check_tree(&tree).unwrap();
    let root = tree.splay(100_000).unwrap();
    assert_eq!(tree.offset_of(root), 99_999);
    check_tree(&tree).unwrap();
}

#[test]
fn deep_shaped_tree_builds_and_splays() {
    // Choice 0 roots every range at its first piece: a right vine.
    let mut tree = synth::shaped(&vec![1; 100_000], &[0]);
    check_tree(&tree).unwrap();
    assert_eq!(tree.len(), 100_000);

    let root = tree.splay(0).unwrap();
    assert_eq!(tree.offset_of(root), 0);
    check_tree(&tree).unwrap();
    let root = tree.splay(tree.len()).unwrap();
    assert_eq!(tree.offset_of(root), 99_999);
    check_tree(&tree).unwrap();
}

#[test]
fn splay_halves_vine_depth() {
    // Each zig-zig rotation during the walk folds the path, so one access to
    // the bottom of a vine leaves a tree roughly half as deep.
    let sizes = vec![1; 256];
    let mut tree = synth::left_vine(&sizes);
    tree.splay(0);

    let mut deepest = 0;
    for (id, _) in tree.edges() {
        let mut depth = 0;
        let mut node = tree.node(id).parent();
        while let Some(p) = node {
            depth += 1;
            node = tree.node(p).parent();
        }
        deepest = deepest.max(depth);
    }
    assert!(deepest < 160, "depth {deepest} after one splay");
}

// =============================================================================
// Seeded random walks
// =============================================================================

#[test]
fn random_shapes_random_offsets() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..50 {
        let count = rng.gen_range(1..60);
        let sizes: Vec<usize> = (0..count).map(|_| rng.gen_range(1..20)).collect();
        let choices: Vec<usize> = (0..count).map(|_| rng.gen_range(0..1000)).collect();
        let mut tree = synth::shaped(&sizes, &choices);
        let total = tree.len();
        let offsets: Vec<usize> = (0..100).map(|_| rng.gen_range(0..=total)).collect();
        splay_all(&mut tree, &offsets);
    }
}

#[test]
fn cursor_like_access_pattern() {
    let mut rng = StdRng::seed_from_u64(42);
    let sizes: Vec<usize> = (0..500).map(|_| rng.gen_range(1..40)).collect();
    let mut tree = synth::from_sizes(&sizes);
    let total = tree.len();

    let mut cursor = total / 2;
    let mut offsets = Vec::new();
    for _ in 0..2000 {
        cursor = if rng.gen_bool(0.5) { cursor.saturating_sub(rng.gen_range(0..4)) } else { (cursor + rng.gen_range(0..4)).min(total) };
        offsets.push(cursor);
    }
    splay_all(&mut tree, &offsets);
}

// =============================================================================
// Attaching around the root
// =============================================================================

#[test]
fn typing_session() {
    // Simulate an editor placing new pieces next to the cursor piece, then
    // moving the cursor around. Sizes and order must stay exact throughout.
    let mut tree = PieceTree::from_pieces([Piece::new(BufferId(0), 13)]);
    let mut expected = vec![13usize];
    let mut rng = StdRng::seed_from_u64(7);

    for round in 0..200 {
        let total = tree.len();
        let offset = rng.gen_range(0..=total);
        let root = tree.splay(offset).unwrap();
        let index = tree.edges().position(|(id, _)| id == root).unwrap();

        let size = rng.gen_range(1..10);
        let piece = Piece::mutable(BufferId(1), size, 4096);
        if rng.gen_bool(0.5) {
            tree.attach_before_root(piece);
            expected.insert(index, size);
        } else {
            tree.attach_after_root(piece);
            expected.insert(index + 1, size);
        }

        if let Err(err) = check_tree(&tree) {
            panic!("{err} in round {round}");
        }
        assert_eq!(in_order_sizes(&tree), expected, "round {round}");
    }

    let mutable = tree.views().filter(|v| v.state() == PieceState::Mutable).count();
    assert_eq!(mutable, 200);
}

#[test]
fn offset_of_agrees_with_edges_after_splays() {
    let mut tree = synth::complete(5, |i| i % 4 + 1);
    for offset in [3, 40, 11, 0, 60] {
        tree.splay(offset);
        for (id, edge) in tree.edges() {
            assert_eq!(tree.offset_of(id), edge);
        }
    }
}

#[test]
fn spans_cover_queried_range_exactly() {
    let mut tree = synth::complete(4, |i| i + 1);
    let total = tree.len();
    for (first, last) in [(0, total), (5, 6), (10, 50), (total - 1, total)] {
        tree.splay((first + last) / 2);
        let covered: usize = tree.spans(first, last).map(|s| s.within.len()).sum();
        assert_eq!(covered, last - first, "{first}..{last}");
    }
}
