//! Top-down splay by document offset.
//!
//! The walk starts at the root and, in one downward pass, peels the nodes it
//! leaves behind onto two spines: nodes wholly left of the target hang off
//! the left spine's right slots, nodes wholly right of it hang off the right
//! spine's left slots. When the target is reached its own children are
//! handed to the spines, the sizes cached on the spine nodes are rebuilt
//! bottom-up, and the two spines become the target's new subtrees.
//!
//! ```text
//!          anchor                        t
//!         /      \                     /   \
//!   right tree  left tree    -->  left tree  right tree
//!   (r spine)   (l spine)
//! ```
//!
//! Offsets on a piece edge resolve to the piece *ending* there, except
//! offset 0 which resolves to the first piece.

use smallvec::SmallVec;

use crate::node::NodeId;
use crate::tree::PieceTree;

/// One step of a splay pass, reported to [`PieceTree::splay_traced`]
/// observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplayStep {
    /// `child`, the left child of `node`, was rotated above it.
    RotateRight { node: NodeId, child: NodeId },
    /// `child`, the right child of `node`, was rotated above it.
    RotateLeft { node: NodeId, child: NodeId },
    /// `node` and its right subtree now lie right of the target.
    LinkRight { node: NodeId },
    /// `node` and its left subtree now lie left of the target.
    LinkLeft { node: NodeId },
    /// `node` covers the offset and is the new root.
    Target { node: NodeId, depth: usize },
}

/// Stand-in for the sentinel node. `left` is the root of the tree right of
/// the target, `right` the root of the tree left of it.
#[derive(Default)]
struct Anchor {
    left: Option<NodeId>,
    right: Option<NodeId>,
}

type Spine = SmallVec<[NodeId; 32]>;

impl<B> PieceTree<B> {
    /// Restructure the tree so that the piece covering `offset` is the root,
    /// and return it. Returns `None` only for an empty tree.
    ///
    /// `offset` must lie in `0..=self.len()`.
    pub fn splay(&mut self, offset: usize) -> Option<NodeId> {
        return self.splay_traced(offset, |_| {});
    }

    /// [`splay`](Self::splay), reporting every rotation and spine link to
    /// `observe` as it happens.
    pub fn splay_traced<F>(&mut self, offset: usize, mut observe: F) -> Option<NodeId>
    where
        F: FnMut(SplayStep),
    {
        let mut t = self.root?;
        debug_assert!(offset <= self.len(), "offset {offset} past end {}", self.len());

        let mut emit = |step: SplayStep| {
            log::trace!("splay({offset}): {step:?}");
            observe(step);
        };

        let mut anchor = Anchor::default();
        let mut l: Option<NodeId> = None;
        let mut r: Option<NodeId> = None;
        let mut lspine = Spine::new();
        let mut rspine = Spine::new();
        let mut prefix = 0;
        let mut depth = 0;

        loop {
            let node = &self.nodes[t.index()];
            let le = prefix + node.lsize;
            let re = le + node.piece.size;

            if offset <= le && !(offset == 0 && le == 0) {
                let Some(child) = node.left else { break };
                if offset <= prefix + self.nodes[child.index()].lsize {
                    self.rotate_right(t, child);
                    emit(SplayStep::RotateRight { node: t, child });
                    t = child;
                }
                let Some(next) = self.nodes[t.index()].left else { break };

                match r {
                    None => anchor.left = Some(t),
                    Some(r) => self.nodes[r.index()].left = Some(t),
                }
                self.nodes[t.index()].parent = r;
                rspine.push(t);
                r = Some(t);
                emit(SplayStep::LinkRight { node: t });
                t = next;
            } else if offset > re {
                let Some(child) = node.right else { break };
                let right = &self.nodes[child.index()];
                if offset > re + right.lsize + right.piece.size {
                    self.rotate_left(t, child);
                    emit(SplayStep::RotateLeft { node: t, child });
                    t = child;
                }
                let Some(next) = self.nodes[t.index()].right else { break };

                match l {
                    None => anchor.right = Some(t),
                    Some(l) => self.nodes[l.index()].right = Some(t),
                }
                self.nodes[t.index()].parent = l;
                lspine.push(t);
                l = Some(t);
                let node = &self.nodes[t.index()];
                prefix += node.lsize + node.piece.size;
                emit(SplayStep::LinkLeft { node: t });
                t = next;
            } else {
                break;
            }
            depth += 1;
        }

        // Hand the target's children to the ends of the spines.
        let (inner_left, inner_right) = {
            let node = &self.nodes[t.index()];
            (node.left, node.right)
        };
        match l {
            None => anchor.right = inner_left,
            Some(l) => self.nodes[l.index()].right = inner_left,
        }
        match r {
            None => anchor.left = inner_right,
            Some(r) => self.nodes[r.index()].left = inner_right,
        }
        if let Some(c) = inner_left {
            self.nodes[c.index()].parent = l;
        }
        if let Some(c) = inner_right {
            self.nodes[c.index()].parent = r;
        }

        // Every spine node lost or gained subtree on its inner side. Rebuild
        // those sizes from the deepest spine node up; everything hanging off
        // the spines still has exact sizes.
        for &id in lspine.iter().rev() {
            let rsize = self.subtree_size(self.nodes[id.index()].right);
            self.nodes[id.index()].rsize = rsize;
        }
        for &id in rspine.iter().rev() {
            let lsize = self.subtree_size(self.nodes[id.index()].left);
            self.nodes[id.index()].lsize = lsize;
        }

        let lsize = self.subtree_size(anchor.right);
        let rsize = self.subtree_size(anchor.left);
        let node = &mut self.nodes[t.index()];
        node.left = anchor.right;
        node.right = anchor.left;
        node.lsize = lsize;
        node.rsize = rsize;
        node.parent = None;
        if let Some(c) = anchor.right {
            self.nodes[c.index()].parent = Some(t);
        }
        if let Some(c) = anchor.left {
            self.nodes[c.index()].parent = Some(t);
        }
        self.root = Some(t);

        emit(SplayStep::Target { node: t, depth });
        log::debug!("splay({offset}) -> {t} at depth {depth}");
        return Some(t);
    }

    /// Promote `child`, the left child of `node`, above it.
    ///
    /// ```text
    ///       node        child
    ///       /     -->       \
    ///    child              node
    ///        \              /
    ///         b            b
    /// ```
    fn rotate_right(&mut self, node: NodeId, child: NodeId) {
        let (b, bsize) = {
            let c = &self.nodes[child.index()];
            (c.right, c.rsize)
        };

        let n = &mut self.nodes[node.index()];
        n.left = b;
        n.lsize = bsize;
        n.parent = Some(child);
        let nsize = n.size();

        if let Some(b) = b {
            self.nodes[b.index()].parent = Some(node);
        }

        let c = &mut self.nodes[child.index()];
        c.right = Some(node);
        c.rsize = nsize;
        c.parent = None;
    }

    /// Promote `child`, the right child of `node`, above it.
    fn rotate_left(&mut self, node: NodeId, child: NodeId) {
        let (b, bsize) = {
            let c = &self.nodes[child.index()];
            (c.left, c.lsize)
        };

        let n = &mut self.nodes[node.index()];
        n.right = b;
        n.rsize = bsize;
        n.parent = Some(child);
        let nsize = n.size();

        if let Some(b) = b {
            self.nodes[b.index()].parent = Some(node);
        }

        let c = &mut self.nodes[child.index()];
        c.left = Some(node);
        c.lsize = nsize;
        c.parent = None;
    }
}
