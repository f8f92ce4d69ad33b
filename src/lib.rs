//! Vine - the piece index of a piece-table text buffer.
//!
//! A document is an ordered run of [`Piece`]s, each naming a slice of some
//! externally owned buffer. [`PieceTree`] keeps those pieces in a binary
//! tree whose in-order sequence is the document, with every node caching
//! the total size of its left and right subtrees. The one restructuring
//! operation is [`PieceTree::splay`]: given a document offset it finds the
//! piece covering that offset and rotates it to the root in a single
//! top-down pass, so repeated edits near the cursor stay cheap.
//!
//! # Quick Start
//!
//! ```
//! use vine::{Piece, PieceTree};
//!
//! // Four pieces: edges at 1, 2, 4 and 8.
//! let mut tree = PieceTree::from_pieces([1, 1, 2, 4].map(Piece::sized));
//!
//! // Offset 3 lies inside the third piece.
//! let root = tree.splay(3).unwrap();
//! assert_eq!(tree.piece(root).size, 2);
//!
//! // A boundary offset picks the piece ending there.
//! let root = tree.splay(4).unwrap();
//! assert_eq!(tree.offset_of(root), 2);
//!
//! vine::check::check_tree(&tree).unwrap();
//! ```
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`piece`] | `Piece`, `PieceState`, `BufferId` |
//! | [`node`] | `Node`, `NodeId` |
//! | [`tree`] | `PieceTree` arena, size queries, root attachment |
//! | [`splay`] | top-down splay by offset and its step trace |
//! | [`walk`] | in-order edges, node views, range spans |
//! | [`build`] | bottom-up `TreeBuilder` |
//! | [`check`] | exhaustive invariant checker |
//! | [`dot`] | Graphviz export |
//! | [`synth`] | synthetic trees for tests and benchmarks |
//! | [`map`] | `u64`-keyed splay map |
//!
//! Nothing here is thread-safe on its own: `splay` rewires the tree in
//! place and needs `&mut`, so sharing a tree across threads means wrapping
//! it in a lock held for the whole call.

pub mod build;
pub mod check;
pub mod dot;
pub mod map;
pub mod node;
pub mod piece;
pub mod splay;
pub mod synth;
pub mod tree;
pub mod walk;

pub use build::TreeBuilder;
pub use check::{InvariantError, check_tree};
pub use map::SplayMap;
pub use node::{Node, NodeId};
pub use piece::{BufferId, Piece, PieceState};
pub use splay::SplayStep;
pub use tree::PieceTree;
pub use walk::{Edges, NodeView, Span};
