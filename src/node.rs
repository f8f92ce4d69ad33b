//! Tree nodes and their augmented sizes.

use std::fmt;

use crate::piece::Piece;

/// Index of a node inside a [`PieceTree`](crate::PieceTree) arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Id for arena slot `index`. Arenas are capped at `u32::MAX + 1` nodes.
    #[inline]
    pub(crate) fn from_index(index: usize) -> NodeId {
        let Ok(raw) = u32::try_from(index) else {
            panic!("arena slot {index} does not fit a node id");
        };
        return NodeId(raw);
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        return self.0 as usize;
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A binary tree node wrapping exactly one piece.
///
/// `left` and `right` are the ownership edges of the tree. `parent` is a
/// back-reference for walking upwards and says nothing about lifetime.
#[derive(Clone, Debug)]
pub struct Node<B> {
    pub(crate) piece: Piece<B>,
    /// Total piece size of the left subtree.
    pub(crate) lsize: usize,
    /// Total piece size of the right subtree.
    pub(crate) rsize: usize,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl<B> Node<B> {
    pub(crate) fn detached(piece: Piece<B>) -> Node<B> {
        return Node {
            piece,
            lsize: 0,
            rsize: 0,
            left: None,
            right: None,
            parent: None,
        };
    }

    /// Size of the subtree rooted here: `lsize + piece.size + rsize`.
    #[inline]
    pub fn size(&self) -> usize {
        return self.lsize + self.piece.size + self.rsize;
    }

    #[inline]
    pub fn piece(&self) -> &Piece<B> {
        return &self.piece;
    }

    #[inline]
    pub fn lsize(&self) -> usize {
        return self.lsize;
    }

    #[inline]
    pub fn rsize(&self) -> usize {
        return self.rsize;
    }

    #[inline]
    pub fn left(&self) -> Option<NodeId> {
        return self.left;
    }

    #[inline]
    pub fn right(&self) -> Option<NodeId> {
        return self.right;
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        return self.parent;
    }
}
