//! Bottom-up construction of piece trees.
//!
//! The builder knows nothing about balance or splaying. It wires children to
//! parents and fills in `lsize`/`rsize` from the children it is handed, so
//! any shape built through it starts out with exact sizes. Generators in
//! [`crate::synth`] and the balanced [`PieceTree::from_pieces`] sit on top.

use smallvec::SmallVec;

use crate::node::{Node, NodeId};
use crate::piece::Piece;
use crate::tree::PieceTree;

/// Pending work in [`TreeBuilder::split_with`].
enum Frame {
    /// Choose a root for `lo..hi` and schedule both halves.
    Split { lo: usize, hi: usize },
    /// Both halves of the range rooted at `mid` are built.
    Join { mid: usize },
}

/// Arena under construction.
#[derive(Debug)]
pub struct TreeBuilder<B> {
    nodes: Vec<Node<B>>,
}

impl<B> Default for TreeBuilder<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> TreeBuilder<B> {
    pub fn new() -> TreeBuilder<B> {
        TreeBuilder { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> TreeBuilder<B> {
        TreeBuilder {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// A childless node.
    pub fn leaf(&mut self, piece: Piece<B>) -> NodeId {
        self.join(None, piece, None)
    }

    /// A node over the given subtrees. Each child must be a subtree root
    /// returned by this builder that has not been joined yet.
    pub fn join(&mut self, left: Option<NodeId>, piece: Piece<B>, right: Option<NodeId>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        let mut node = Node::detached(piece);
        node.left = left;
        node.right = right;
        node.lsize = left.map_or(0, |c| self.adopt(c, id));
        node.rsize = right.map_or(0, |c| self.adopt(c, id));
        self.nodes.push(node);
        id
    }

    fn adopt(&mut self, child: NodeId, parent: NodeId) -> usize {
        let node = &mut self.nodes[child.index()];
        debug_assert!(node.parent.is_none(), "{child} already has a parent");
        node.parent = Some(parent);
        node.size()
    }

    /// Build a height-balanced subtree over `pieces` (in document order).
    pub fn balanced(&mut self, pieces: Vec<Piece<B>>) -> Option<NodeId> {
        self.split_with(pieces, |lo, hi| lo + (hi - lo) / 2)
    }

    /// Build a subtree over `pieces` (in document order), letting `pick`
    /// choose which index of each half-open range `lo..hi` becomes the
    /// subtree root. `pick` must return a value in `lo..hi`.
    ///
    /// Ranges are visited root first, then the left range, then the right,
    /// so `pick` sees them in pre-order. Any shape depth is fine: pending
    /// ranges live on a heap stack, not the call stack.
    pub fn split_with<F>(&mut self, pieces: Vec<Piece<B>>, mut pick: F) -> Option<NodeId>
    where
        F: FnMut(usize, usize) -> usize,
    {
        let mut slots: Vec<Option<Piece<B>>> = pieces.into_iter().map(Some).collect();
        let mut frames: SmallVec<[Frame; 32]> = SmallVec::new();
        let mut built: SmallVec<[Option<NodeId>; 32]> = SmallVec::new();
        frames.push(Frame::Split { lo: 0, hi: slots.len() });

        while let Some(frame) = frames.pop() {
            match frame {
                Frame::Split { lo, hi } => {
                    if lo >= hi {
                        built.push(None);
                        continue;
                    }
                    let mid = pick(lo, hi);
                    debug_assert!(lo <= mid && mid < hi, "pick returned {mid} outside {lo}..{hi}");
                    frames.push(Frame::Join { mid });
                    frames.push(Frame::Split { lo: mid + 1, hi });
                    frames.push(Frame::Split { lo, hi: mid });
                }
                Frame::Join { mid } => {
                    let right = built.pop().flatten();
                    let left = built.pop().flatten();
                    let piece = slots[mid].take()?;
                    built.push(Some(self.join(left, piece, right)));
                }
            }
        }
        built.pop().flatten()
    }

    /// Hand the arena over to a tree rooted at `root`.
    pub fn finish(self, root: Option<NodeId>) -> PieceTree<B> {
        PieceTree::from_parts(self.nodes, root)
    }
}
