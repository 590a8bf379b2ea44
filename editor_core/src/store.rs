//! Contiguous byte storage backing a buffer.
//!
//! The store is a plain growable byte array. Insertions grow the capacity
//! geometrically so that typing character by character only reallocates a
//! logarithmic number of times.

/// Growth factor applied to the capacity when an insert does not fit.
const GROWTH_FACTOR: usize = 2;

/// Default minimum capacity reserved on the first growth.
pub const DEFAULT_MIN_CAPACITY: usize = 64;

/// A mutable, contiguous byte sequence with tracked size and capacity.
#[derive(Debug, Clone)]
pub struct TextStore {
    /// Stored bytes. `bytes.len()` is the logical size.
    bytes: Vec<u8>,
    /// Reserved capacity. Tracked separately so growth is deterministic.
    capacity: usize,
    /// Smallest capacity reserved when growing from empty.
    min_capacity: usize,
    /// Number of times the backing allocation was grown.
    reallocations: usize,
}

impl Default for TextStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TextStore {
    /// Creates an empty store with the default minimum capacity.
    pub fn new() -> Self {
        Self::with_min_capacity(DEFAULT_MIN_CAPACITY)
    }

    /// Creates an empty store that reserves at least `min_capacity` bytes on
    /// its first growth.
    pub fn with_min_capacity(min_capacity: usize) -> Self {
        Self {
            bytes: Vec::new(),
            capacity: 0,
            min_capacity: min_capacity.max(1),
            reallocations: 0,
        }
    }

    /// Returns the number of stored bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the reserved capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if the store holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns how many times the allocation has grown.
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    /// Returns the stored bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the byte at `pos`, if any.
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.bytes.get(pos).copied()
    }

    /// Inserts `data` at `pos`, growing the capacity if needed.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is greater than the current size.
    pub fn insert_at(&mut self, pos: usize, data: &[u8]) {
        assert!(
            pos <= self.size(),
            "insert position {} out of bounds (size {})",
            pos,
            self.size()
        );
        if data.is_empty() {
            return;
        }

        self.ensure_capacity(self.size() + data.len());
        self.bytes.splice(pos..pos, data.iter().copied());
    }

    /// Removes `len` bytes starting at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if the range `pos..pos + len` reaches past the end of the store.
    pub fn erase_at(&mut self, pos: usize, len: usize) {
        let end = pos.checked_add(len).unwrap_or(usize::MAX);
        assert!(
            end <= self.size(),
            "erase range {}..{} out of bounds (size {})",
            pos,
            end,
            self.size()
        );
        self.bytes.drain(pos..end);
    }

    /// Replaces the whole content with `data`.
    pub fn load(&mut self, data: Vec<u8>) {
        self.bytes = data;
        if self.bytes.len() > self.capacity {
            self.capacity = self.bytes.len();
            self.reallocations += 1;
        }
        self.bytes.reserve_exact(self.capacity - self.bytes.len());
    }

    /// Removes all bytes. The allocation is kept for reuse.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Finds the first occurrence of `needle` starting at byte `from`.
    pub fn find(&self, needle: &[u8], from: usize) -> Option<usize> {
        if needle.is_empty() || from >= self.size() {
            return None;
        }
        self.bytes[from..]
            .windows(needle.len())
            .position(|window| window == needle)
            .map(|offset| from + offset)
    }

    /// Counts newline bytes in `range`.
    pub fn count_newlines(&self, range: std::ops::Range<usize>) -> usize {
        self.bytes[range].iter().filter(|&&b| b == b'\n').count()
    }

    /// Grows the capacity geometrically until `required` bytes fit.
    fn ensure_capacity(&mut self, required: usize) {
        if required <= self.capacity {
            return;
        }

        let mut new_capacity = (self.capacity * GROWTH_FACTOR).max(self.min_capacity);
        while new_capacity < required {
            new_capacity *= GROWTH_FACTOR;
        }

        self.bytes.reserve_exact(new_capacity - self.bytes.len());
        self.capacity = new_capacity;
        self.reallocations += 1;
    }
}
