//! Cursor values and movement requests.

use crate::manager::BufferId;

/// Sentinel stored in every field of an invalidated cursor.
const INVALID: usize = usize::MAX;

/// An edit position tracked as byte offset, line and column.
///
/// All three fields are 0-indexed. `line` counts the newlines strictly before
/// `pos` and `col` is the distance from the start of that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Absolute byte offset into the buffer.
    pub pos: usize,
    /// Line containing `pos`.
    pub line: usize,
    /// Offset of `pos` from the start of its line.
    pub col: usize,
    /// Buffer this cursor belongs to.
    pub buffer_id: BufferId,
}

impl Cursor {
    /// Creates a cursor at the origin of the given buffer.
    pub fn new(buffer_id: BufferId) -> Self {
        Self {
            pos: 0,
            line: 0,
            col: 0,
            buffer_id,
        }
    }

    /// Moves the cursor back to the origin.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.line = 0;
        self.col = 0;
    }

    /// Marks the cursor as not pointing anywhere.
    pub fn invalidate(&mut self) {
        self.pos = INVALID;
        self.line = INVALID;
        self.col = INVALID;
    }

    /// Returns false after [`Cursor::invalidate`] until the cursor is reset.
    pub fn is_valid(&self) -> bool {
        self.pos != INVALID
    }
}

/// Granularity of a movement or deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Char,
    Word,
    Line,
    /// Reserved, not implemented.
    Block,
    /// Reserved, not implemented.
    File,
}

/// Direction of a movement or deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A movement request: move `count` units in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    pub unit: Unit,
    pub direction: Direction,
    pub count: usize,
}

impl Movement {
    pub fn new(unit: Unit, direction: Direction, count: usize) -> Self {
        Self {
            unit,
            direction,
            count,
        }
    }

    pub fn chars(direction: Direction, count: usize) -> Self {
        Self::new(Unit::Char, direction, count)
    }

    pub fn words(direction: Direction, count: usize) -> Self {
        Self::new(Unit::Word, direction, count)
    }

    pub fn lines(direction: Direction, count: usize) -> Self {
        Self::new(Unit::Line, direction, count)
    }
}

/// Which side of a line's delimiting newline a query resolves to.
///
/// `Inside` never lands on the delimiter: for a line start it is the first
/// byte of the line, for a line end the last content byte. `Outside` lands on
/// the delimiter itself: the newline ending the previous line, or the newline
/// ending this one (the buffer size on the last line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    #[default]
    Inside,
    Outside,
}

/// The lower and upper ends of the current selection, ordered by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorRect {
    pub lower: Cursor,
    pub upper: Cursor,
}

impl CursorRect {
    /// Orders two cursors by ascending position.
    pub fn new(a: Cursor, b: Cursor) -> Self {
        if a.pos <= b.pos {
            Self { lower: a, upper: b }
        } else {
            Self { lower: b, upper: a }
        }
    }

    /// Returns the byte length covered.
    pub fn len(&self) -> usize {
        self.upper.pos - self.lower.pos
    }

    /// Returns true if both ends coincide.
    pub fn is_empty(&self) -> bool {
        self.lower.pos == self.upper.pos
    }
}
