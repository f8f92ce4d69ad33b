//! Read-only traversal of a piece tree.
//!
//! Everything here borrows the tree immutably and only follows `left`/`right`
//! links, so a walk never disturbs the splay order. Checkers, exporters and
//! tests are built on these iterators rather than on node internals.

use std::ops::Range;

use smallvec::SmallVec;

use crate::node::NodeId;
use crate::piece::{Piece, PieceState};
use crate::tree::PieceTree;

/// In-order walk yielding each node with the document offset of its left
/// edge.
///
/// The iterator is lazy and finite. Cloning it, or calling
/// [`PieceTree::edges`] again, restarts the walk from that point.
pub struct Edges<'a, B> {
    tree: &'a PieceTree<B>,
    stack: SmallVec<[(NodeId, usize); 32]>,
}

impl<'a, B> Clone for Edges<'a, B> {
    fn clone(&self) -> Self {
        return Edges {
            tree: self.tree,
            stack: self.stack.clone(),
        };
    }
}

impl<'a, B> Edges<'a, B> {
    fn new(tree: &'a PieceTree<B>) -> Edges<'a, B> {
        let mut edges = Edges {
            tree,
            stack: SmallVec::new(),
        };
        edges.descend(tree.root(), 0);
        return edges;
    }

    /// Start the walk at the first node whose right edge lies past `offset`.
    fn seek(tree: &'a PieceTree<B>, offset: usize) -> Edges<'a, B> {
        let mut edges = Edges {
            tree,
            stack: SmallVec::new(),
        };
        let mut id = tree.root();
        let mut base = 0;
        while let Some(n) = id {
            let node = tree.node(n);
            let le = base + node.lsize;
            let re = le + node.piece.size;
            if re <= offset {
                base = re;
                id = node.right;
            } else {
                edges.stack.push((n, le));
                id = node.left;
            }
        }
        return edges;
    }

    /// Push `id` and its chain of left descendants. `base` is the offset at
    /// which the subtree rooted at `id` begins.
    fn descend(&mut self, mut id: Option<NodeId>, base: usize) {
        while let Some(n) = id {
            let node = self.tree.node(n);
            self.stack.push((n, base + node.lsize));
            id = node.left;
        }
    }
}

impl<'a, B> Iterator for Edges<'a, B> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, edge) = self.stack.pop()?;
        let node = self.tree.node(id);
        self.descend(node.right, edge + node.piece.size);
        return Some((id, edge));
    }
}

/// Everything a visitor may want to know about one node.
#[derive(Debug)]
pub struct NodeView<'a, B> {
    pub id: NodeId,
    pub piece: &'a Piece<B>,
    /// Document offset where this piece begins.
    pub left_edge: usize,
    /// Document offset where this piece ends.
    pub right_edge: usize,
    pub lsize: usize,
    pub rsize: usize,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
}

impl<'a, B> NodeView<'a, B> {
    #[inline]
    pub fn size(&self) -> usize {
        return self.piece.size;
    }

    #[inline]
    pub fn state(&self) -> PieceState {
        return self.piece.state;
    }
}

/// The part of one piece that falls inside a queried document range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub node: NodeId,
    /// Document offset of the piece's left edge.
    pub left_edge: usize,
    /// Range within the piece, relative to its start.
    pub within: Range<usize>,
}

/// Iterator returned by [`PieceTree::spans`].
pub struct Spans<'a, B> {
    edges: Edges<'a, B>,
    first: usize,
    last: usize,
}

impl<'a, B> Iterator for Spans<'a, B> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        let (id, le) = self.edges.next()?;
        if le >= self.last {
            self.edges.stack.clear();
            return None;
        }
        let size = self.edges.tree.piece(id).size;
        let start = self.first.saturating_sub(le);
        let end = (self.last - le).min(size);
        return Some(Span {
            node: id,
            left_edge: le,
            within: start..end,
        });
    }
}

impl<B> PieceTree<B> {
    /// Walk the pieces in document order with their left-edge offsets.
    pub fn edges(&self) -> Edges<'_, B> {
        return Edges::new(self);
    }

    /// Walk the nodes in document order as [`NodeView`]s.
    pub fn views(&self) -> impl Iterator<Item = NodeView<'_, B>> + '_ {
        self.edges().map(move |(id, left_edge)| {
            let node = self.node(id);
            NodeView {
                id,
                piece: &node.piece,
                left_edge,
                right_edge: left_edge + node.piece.size,
                lsize: node.lsize,
                rsize: node.rsize,
                left: node.left,
                right: node.right,
                parent: node.parent,
            }
        })
    }

    /// Call `f` once per node, in document order.
    pub fn visit<F>(&self, mut f: F)
    where
        F: FnMut(&NodeView<'_, B>),
    {
        for view in self.views() {
            f(&view);
        }
    }

    /// The pieces overlapping the document range `first..last`, clipped to
    /// that range. Empty when `first >= last`.
    pub fn spans(&self, first: usize, last: usize) -> Spans<'_, B> {
        let edges = if first < last {
            Edges::seek(self, first)
        } else {
            Edges {
                tree: self,
                stack: SmallVec::new(),
            }
        };
        return Spans { edges, first, last };
    }
}
