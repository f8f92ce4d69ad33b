//! Piece descriptors.
//!
//! A piece names a contiguous run of document text living in some buffer
//! segment owned elsewhere. The tree only ever looks at `size`; the other
//! fields are carried through untouched for whoever owns the buffers.

/// Identifier of a backing buffer segment.
///
/// The index never dereferences this. Callers with richer handles can use
/// their own type as the `B` parameter of [`Piece`] instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(pub u32);

/// Provenance flag of a piece.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PieceState {
    /// Frozen text: the original file or a sealed append buffer.
    #[default]
    Const,
    /// The piece currently being typed into. It may still grow into its
    /// spare capacity.
    Mutable,
}

/// A contiguous run of document text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece<B = BufferId> {
    /// Backing storage segment.
    pub buffer: B,
    /// Number of text units this piece contributes to the document.
    pub size: usize,
    /// Provenance flag.
    pub state: PieceState,
    /// Allocated capacity of the backing segment. May exceed `size`.
    pub capacity: usize,
}

impl<B> Piece<B> {
    /// Create a frozen piece whose capacity equals its size.
    pub fn new(buffer: B, size: usize) -> Piece<B> {
        return Piece {
            buffer,
            size,
            state: PieceState::Const,
            capacity: size,
        };
    }

    /// Create a piece with spare capacity that can still be appended to.
    pub fn mutable(buffer: B, size: usize, capacity: usize) -> Piece<B> {
        debug_assert!(capacity >= size);
        return Piece {
            buffer,
            size,
            state: PieceState::Mutable,
            capacity,
        };
    }

    /// Whether this piece is flagged as still growing.
    #[inline]
    pub fn is_mutable(&self) -> bool {
        return self.state == PieceState::Mutable;
    }
}

impl Piece<BufferId> {
    /// A piece in buffer 0 with the given size. Used by the synthetic
    /// generators and tests, which only care about sizes.
    pub fn sized(size: usize) -> Piece<BufferId> {
        return Piece::new(BufferId(0), size);
    }
}
