//! Graphviz export for eyeballing tree shapes.
//!
//! Built only on [`PieceTree::views`]. Render with
//! `dot -Tsvg tree.dot > tree.svg`.

use std::fmt::{self, Write};

use crate::piece::PieceState;
use crate::tree::PieceTree;

const CONST_COLOR: &str = "cornflowerblue";
const MUTABLE_COLOR: &str = "crimson";

/// Write `tree` as a `digraph` to `out`.
///
/// Each node is labelled `id:size [left, right)`; a missing child shows its
/// cached size on that side of the label so stale sizes stand out. Child
/// edges carry the subtree size, parent links are dotted.
pub fn write_dot<B, W: Write>(tree: &PieceTree<B>, out: &mut W) -> fmt::Result {
    writeln!(out, "digraph vine {{")?;
    writeln!(out, "        graph [ordering=\"out\"];")?;
    writeln!(out, "        ratio = fill;")?;
    writeln!(out, "        node [style=\"filled\"];")?;

    for view in tree.views() {
        let mut label = String::new();
        if view.left.is_none() {
            write!(label, "{}:", view.lsize)?;
        }
        write!(label, "{}:{} [{}, {})", view.id, view.size(), view.left_edge, view.right_edge)?;
        if view.right.is_none() {
            write!(label, ":{}", view.rsize)?;
        }
        let color = match view.state() {
            PieceState::Const => CONST_COLOR,
            PieceState::Mutable => MUTABLE_COLOR,
        };
        writeln!(out, "        \"{}\" [label=\"{}\",color=\"{}\"];", view.id, label, color)?;

        if let Some(left) = view.left {
            writeln!(out, "        \"{}\" -> \"{}\" [label=\"{}\"];", view.id, left, view.lsize)?;
        }
        if let Some(right) = view.right {
            writeln!(out, "        \"{}\" -> \"{}\" [label=\"{}\"];", view.id, right, view.rsize)?;
        }
        if let Some(parent) = view.parent {
            writeln!(out, "        \"{}\" -> \"{}\" [style=\"dotted\"];", view.id, parent)?;
        }
    }

    writeln!(out, "}}")
}

/// Displays a tree in dot syntax, for use with `format!` and friends.
pub struct Dot<'a, B>(pub &'a PieceTree<B>);

impl<B> fmt::Display for Dot<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_dot(self.0, f)
    }
}

/// [`write_dot`] into a fresh `String`.
pub fn to_dot<B>(tree: &PieceTree<B>) -> String {
    Dot(tree).to_string()
}
