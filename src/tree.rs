//! The piece tree arena.
//!
//! All nodes of one document live in a single `Vec`, and links between them
//! are [`NodeId`] indices. The tree never frees a node: splaying only
//! relinks, and the attach helpers only ever add.

use smallvec::SmallVec;

use crate::node::{Node, NodeId};
use crate::piece::Piece;

/// A size-augmented binary tree whose in-order sequence of pieces is the
/// document.
#[derive(Clone, Debug)]
pub struct PieceTree<B> {
    pub(crate) nodes: Vec<Node<B>>,
    pub(crate) root: Option<NodeId>,
}

impl<B> Default for PieceTree<B> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<B> PieceTree<B> {
    /// Create an empty tree.
    pub fn new() -> PieceTree<B> {
        return PieceTree {
            nodes: Vec::new(),
            root: None,
        };
    }

    /// Build a balanced tree from pieces given in document order.
    pub fn from_pieces<I>(pieces: I) -> PieceTree<B>
    where
        I: IntoIterator<Item = Piece<B>>,
    {
        let mut builder = crate::build::TreeBuilder::new();
        let root = builder.balanced(pieces.into_iter().collect());
        return builder.finish(root);
    }

    pub(crate) fn from_parts(nodes: Vec<Node<B>>, root: Option<NodeId>) -> PieceTree<B> {
        return PieceTree { nodes, root };
    }

    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        return self.root;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.root.is_none();
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn node_count(&self) -> usize {
        return self.nodes.len();
    }

    /// Total document size.
    #[inline]
    pub fn len(&self) -> usize {
        return self.subtree_size(self.root);
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node<B> {
        return &self.nodes[id.index()];
    }

    #[inline]
    pub fn piece(&self, id: NodeId) -> &Piece<B> {
        return &self.nodes[id.index()].piece;
    }

    /// Cached size of the subtree rooted at `id`. O(1).
    #[inline]
    pub fn size(&self, id: NodeId) -> usize {
        return self.nodes[id.index()].size();
    }

    #[inline]
    pub(crate) fn subtree_size(&self, id: Option<NodeId>) -> usize {
        match id {
            Some(id) => self.size(id),
            None => 0,
        }
    }

    /// Size of the subtree rooted at `id`, summed piece by piece without
    /// looking at any cached `lsize`/`rsize`. O(subtree).
    pub fn true_size(&self, id: Option<NodeId>) -> usize {
        let mut total = 0;
        let mut stack: SmallVec<[NodeId; 32]> = SmallVec::new();
        stack.extend(id);
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            total += node.piece.size;
            stack.extend(node.left);
            stack.extend(node.right);
        }
        return total;
    }

    /// Document offset of the left edge of `id`, found by walking parent
    /// links up to the root.
    pub fn offset_of(&self, id: NodeId) -> usize {
        let mut offset = self.node(id).lsize;
        let mut child = id;
        while let Some(parent) = self.node(child).parent {
            let node = self.node(parent);
            if node.right == Some(child) {
                offset += node.lsize + node.piece.size;
            }
            child = parent;
        }
        return offset;
    }

    fn push(&mut self, node: Node<B>) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(node);
        return id;
    }

    /// Add `piece` immediately before the current root. The new node becomes
    /// the root, with the old root as its right child.
    pub fn attach_before_root(&mut self, piece: Piece<B>) -> NodeId {
        let new = self.push(Node::detached(piece));
        let Some(old) = self.root else {
            self.root = Some(new);
            return new;
        };

        let (left, lsize) = {
            let root = &mut self.nodes[old.index()];
            let taken = (root.left.take(), root.lsize);
            root.lsize = 0;
            taken
        };
        let rsize = self.size(old);

        let node = &mut self.nodes[new.index()];
        node.left = left;
        node.lsize = lsize;
        node.right = Some(old);
        node.rsize = rsize;

        if let Some(left) = left {
            self.nodes[left.index()].parent = Some(new);
        }
        self.nodes[old.index()].parent = Some(new);
        self.root = Some(new);
        return new;
    }

    /// Add `piece` immediately after the current root. The new node becomes
    /// the root, with the old root as its left child.
    pub fn attach_after_root(&mut self, piece: Piece<B>) -> NodeId {
        let new = self.push(Node::detached(piece));
        let Some(old) = self.root else {
            self.root = Some(new);
            return new;
        };

        let (right, rsize) = {
            let root = &mut self.nodes[old.index()];
            let taken = (root.right.take(), root.rsize);
            root.rsize = 0;
            taken
        };
        let lsize = self.size(old);

        let node = &mut self.nodes[new.index()];
        node.right = right;
        node.rsize = rsize;
        node.left = Some(old);
        node.lsize = lsize;

        if let Some(right) = right {
            self.nodes[right.index()].parent = Some(new);
        }
        self.nodes[old.index()].parent = Some(new);
        self.root = Some(new);
        return new;
    }
}
