//! Dynamic memory manager: a table of word-addressable segments named by a
//! recyclable integer identifier.

use crate::error::Trap;
use crate::Word;
use std::fmt;

/// A segment identifier.
///
/// Identifier 0 is permanently reserved for the program segment and is never
/// returned by [`SegmentTable::allocate`] nor accepted by [`SegmentTable::free`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(u32);

impl SegmentId {
    /// The identifier of the program segment.
    pub const PROGRAM: SegmentId = SegmentId(0);

    fn as_index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Word> for SegmentId {
    fn from(raw: Word) -> Self {
        SegmentId(raw)
    }
}

impl From<SegmentId> for Word {
    fn from(id: SegmentId) -> Self {
        id.0
    }
}

/// An ordered, fixed-length sequence of words.
pub type Segment = Vec<Word>;

/// Allocates, frees, and indexes segments by identifier, recycling freed
/// identifiers in last-in-first-out order.
///
/// `segments[i]` is `Some(_)` for every live identifier and `None` for every
/// freed or never-allocated one; `free_ids` names exactly the indices holding
/// `None` that are eligible for reuse, most-recently-freed first.
#[derive(Debug, Clone)]
pub struct SegmentTable {
    segments: Vec<Option<Segment>>,
    free_ids: Vec<SegmentId>,
}

impl SegmentTable {
    /// Builds a table whose program segment (identifier 0) holds `program`.
    pub fn new(program: Segment) -> Self {
        Self {
            segments: vec![Some(program)],
            free_ids: Vec::new(),
        }
    }

    /// Allocates a fresh, zero-filled segment of `len` words and returns its
    /// identifier.
    ///
    /// Prefers a recycled identifier over growing the table, and never
    /// returns [`SegmentId::PROGRAM`].
    pub fn allocate(&mut self, len: Word) -> Result<SegmentId, Trap> {
        let segment = vec![0; len as usize];

        if let Some(id) = self.free_ids.pop() {
            self.segments[id.as_index()] = Some(segment);
            return Ok(id);
        }

        let index = self.segments.len();
        let id = u32::try_from(index).map_err(|_| Trap::SegmentIdSpaceExhausted)?;
        self.segments.push(Some(segment));
        Ok(SegmentId(id))
    }

    /// Releases the segment named by `id`, making the identifier eligible for
    /// reuse by a subsequent [`allocate`](Self::allocate).
    pub fn free(&mut self, id: SegmentId) -> Result<(), Trap> {
        if id == SegmentId::PROGRAM {
            return Err(Trap::FreeReservedSegment);
        }
        match self.segments.get_mut(id.as_index()) {
            Some(slot @ Some(_)) => {
                *slot = None;
                self.free_ids.push(id);
                Ok(())
            }
            Some(None) => Err(Trap::DoubleFree { id }),
            None => Err(Trap::DoubleFree { id }),
        }
    }

    /// Reads the word at `offset` within the segment named by `id`.
    pub fn read(&self, id: SegmentId, offset: Word) -> Result<Word, Trap> {
        self.segment(id)?
            .get(offset as usize)
            .copied()
            .ok_or(Trap::SegmentOffsetOutOfBounds { id, offset })
    }

    /// Writes `value` at `offset` within the segment named by `id`.
    pub fn write(&mut self, id: SegmentId, offset: Word, value: Word) -> Result<(), Trap> {
        let segment = self.segment_mut(id)?;
        let slot = segment
            .get_mut(offset as usize)
            .ok_or(Trap::SegmentOffsetOutOfBounds { id, offset })?;
        *slot = value;
        Ok(())
    }

    /// Deep-copies the segment named by `id` over the program segment.
    ///
    /// A no-op when `id` already names the program segment.
    pub fn replace_zero(&mut self, id: SegmentId) -> Result<(), Trap> {
        if id == SegmentId::PROGRAM {
            return Ok(());
        }
        let copy = self.segment(id)?.clone();
        self.segments[SegmentId::PROGRAM.as_index()] = Some(copy);
        Ok(())
    }

    /// Borrows the program segment, for the execution loop's fetch step.
    pub fn program(&self) -> &Segment {
        self.segment(SegmentId::PROGRAM)
            .expect("program segment is never freed")
    }

    fn segment(&self, id: SegmentId) -> Result<&Segment, Trap> {
        self.segments
            .get(id.as_index())
            .and_then(Option::as_ref)
            .ok_or(Trap::UnmappedSegment { id })
    }

    fn segment_mut(&mut self, id: SegmentId) -> Result<&mut Segment, Trap> {
        self.segments
            .get_mut(id.as_index())
            .and_then(Option::as_mut)
            .ok_or(Trap::UnmappedSegment { id })
    }
}
