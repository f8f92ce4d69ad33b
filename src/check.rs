//! Exhaustive invariant checking.
//!
//! A violation here is a bug in whatever last restructured the tree, never a
//! condition for production code to recover from. Tests call
//! [`check_tree`] after every operation and fail loudly on `Err`.

use std::fmt;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::node::NodeId;
use crate::tree::PieceTree;

/// Which child slot of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("root {root} still points at parent {parent}")]
    RootHasParent { root: NodeId, parent: NodeId },

    #[error("{node}: cached {side} size is {cached} but the subtree holds {actual}")]
    SizeMismatch {
        node: NodeId,
        side: Side,
        cached: usize,
        actual: usize,
    },

    #[error("{child} is the {side} child of {node} but its parent link is {found:?}")]
    ParentMismatch {
        node: NodeId,
        child: NodeId,
        side: Side,
        found: Option<NodeId>,
    },

    #[error("{0} holds an empty piece")]
    EmptyPiece(NodeId),

    #[error("{0} is reachable along more than one path")]
    Shared(NodeId),

    #[error("{0} is not reachable from the root")]
    Unreachable(NodeId),
}

/// Verify every structural invariant of `tree`.
///
/// - each reachable node's `lsize`/`rsize` equal the true piece sums of its
///   subtrees, all the way down
/// - children point back at their parent and the root has no parent
/// - every piece is non-empty
/// - every node in the arena is reachable from the root exactly once
pub fn check_tree<B>(tree: &PieceTree<B>) -> Result<(), InvariantError> {
    let mut seen: FxHashSet<NodeId> = FxHashSet::default();
    let mut actual = vec![0usize; tree.node_count()];
    let mut stack: SmallVec<[(NodeId, bool); 64]> = SmallVec::new();

    if let Some(root) = tree.root() {
        if let Some(parent) = tree.node(root).parent() {
            return Err(InvariantError::RootHasParent { root, parent });
        }
        stack.push((root, false));
    }

    while let Some((id, children_done)) = stack.pop() {
        let node = tree.node(id);

        if children_done {
            let left = node.left().map_or(0, |c| actual[c.index()]);
            let right = node.right().map_or(0, |c| actual[c.index()]);
            if node.lsize() != left {
                return Err(InvariantError::SizeMismatch {
                    node: id,
                    side: Side::Left,
                    cached: node.lsize(),
                    actual: left,
                });
            }
            if node.rsize() != right {
                return Err(InvariantError::SizeMismatch {
                    node: id,
                    side: Side::Right,
                    cached: node.rsize(),
                    actual: right,
                });
            }
            actual[id.index()] = left + node.piece().size + right;
            continue;
        }

        if !seen.insert(id) {
            return Err(InvariantError::Shared(id));
        }
        if node.piece().size == 0 {
            return Err(InvariantError::EmptyPiece(id));
        }

        stack.push((id, true));
        for (side, child) in [(Side::Left, node.left()), (Side::Right, node.right())] {
            let Some(child) = child else { continue };
            let found = tree.node(child).parent();
            if found != Some(id) {
                return Err(InvariantError::ParentMismatch {
                    node: id,
                    child,
                    side,
                    found,
                });
            }
            stack.push((child, false));
        }
    }

    if seen.len() != tree.node_count() {
        let missing = (0..tree.node_count())
            .map(NodeId::from_index)
            .find(|id| !seen.contains(id));
        if let Some(id) = missing {
            return Err(InvariantError::Unreachable(id));
        }
    }
    Ok(())
}
