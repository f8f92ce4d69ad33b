//! Synthetic trees for tests and benchmarks.
//!
//! Shapes are chosen to stress the splay pass: complete trees, degenerate
//! vines that make the first splay walk the full depth, and (with the `rand`
//! feature) random shapes. All pieces live in `BufferId(0)`.

use crate::build::TreeBuilder;
use crate::piece::{BufferId, Piece};
use crate::tree::PieceTree;

/// Balanced tree over the given piece sizes, in document order.
pub fn from_sizes(sizes: &[usize]) -> PieceTree<BufferId> {
    PieceTree::from_pieces(sizes.iter().copied().map(Piece::sized))
}

/// Complete binary tree of `depth` levels (`2^depth - 1` nodes). The piece
/// at in-order position `i` gets size `size_at(i)`.
pub fn complete<F>(depth: u32, mut size_at: F) -> PieceTree<BufferId>
where
    F: FnMut(usize) -> usize,
{
    let count = (1usize << depth) - 1;
    let pieces = (0..count).map(|i| Piece::sized(size_at(i))).collect();
    let mut b = TreeBuilder::with_capacity(count);
    let root = b.balanced(pieces);
    b.finish(root)
}

/// Complete tree whose in-order sizes are `1, 1, 2, 4, 8, ...`, so the
/// right edges land on successive powers of two.
///
/// The total is `2^(2^depth - 2)`, so `depth` is at most
/// [`MAX_POWERS_OF_TWO_DEPTH`]: 6 on 64-bit targets, 5 on 32-bit ones.
pub fn complete_powers_of_two(depth: u32) -> PieceTree<BufferId> {
    assert!(
        depth <= MAX_POWERS_OF_TWO_DEPTH,
        "depth {depth} overflows usize (max {MAX_POWERS_OF_TWO_DEPTH})"
    );
    complete(depth, |i| if i == 0 { 1 } else { 1 << (i - 1) })
}

/// Deepest tree [`complete_powers_of_two`] can build on this target.
pub const MAX_POWERS_OF_TWO_DEPTH: u32 = if usize::BITS >= 64 { 6 } else { 5 };

/// Every node is the left child of the next one: the root holds the last
/// piece and the first piece sits at the bottom.
pub fn left_vine(sizes: &[usize]) -> PieceTree<BufferId> {
    let mut b = TreeBuilder::with_capacity(sizes.len());
    let mut top = None;
    for &size in sizes {
        top = Some(b.join(top, Piece::sized(size), None));
    }
    b.finish(top)
}

/// Every node is the right child of the previous one: the root holds the
/// first piece and the last piece sits at the bottom.
pub fn right_vine(sizes: &[usize]) -> PieceTree<BufferId> {
    let mut b = TreeBuilder::with_capacity(sizes.len());
    let mut top = None;
    for &size in sizes.iter().rev() {
        top = Some(b.join(None, Piece::sized(size), top));
    }
    b.finish(top)
}

/// Tree over `sizes` whose shape is driven by `choices`: each subtree over
/// in-order range `lo..hi` is rooted at `lo + choice % (hi - lo)`, taking
/// choices in order and cycling. An empty `choices` gives a balanced tree.
pub fn shaped(sizes: &[usize], choices: &[usize]) -> PieceTree<BufferId> {
    let mut b = TreeBuilder::with_capacity(sizes.len());
    let pieces = sizes.iter().copied().map(Piece::sized).collect();
    let mut next = choices.iter().cycle();
    let root = b.split_with(pieces, |lo, hi| match next.next() {
        Some(choice) => lo + choice % (hi - lo),
        None => lo + (hi - lo) / 2,
    });
    b.finish(root)
}

/// Random shape over `count` pieces with sizes in `1..=max_size`.
#[cfg(feature = "rand")]
pub fn random_tree<R: rand::Rng>(rng: &mut R, count: usize, max_size: usize) -> PieceTree<BufferId> {
    let pieces = (0..count)
        .map(|_| Piece::sized(rng.gen_range(1..=max_size)))
        .collect();
    let mut b = TreeBuilder::with_capacity(count);
    let root = b.split_with(pieces, |lo, hi| rng.gen_range(lo..hi));
    b.finish(root)
}
