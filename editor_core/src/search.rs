//! Forward substring search with repeat.

use crate::buffer::Buffer;

impl Buffer {
    /// Moves the cursor to the next occurrence of `needle` after the cursor.
    ///
    /// The search starts one byte past the cursor so repeating it advances to
    /// the following match. On a hit the needle is remembered for
    /// [`Buffer::goto_next_again`]. On a miss the cursor stays put and `None`
    /// is returned.
    pub fn goto_next(&mut self, needle: impl AsRef<[u8]>) -> Option<usize> {
        let needle = needle.as_ref();
        if needle.is_empty() {
            return None;
        }

        let found = self.store.find(needle, self.cursor.pos + 1)?;
        self.last_search = Some(needle.to_vec());
        self.step_cursor_to(found);
        Some(found)
    }

    /// Repeats the last successful search.
    pub fn goto_next_again(&mut self) -> Option<usize> {
        let needle = self.last_search.clone()?;
        self.goto_next(needle)
    }

    /// Returns the needle of the last successful search.
    pub fn last_search(&self) -> Option<&[u8]> {
        self.last_search.as_deref()
    }
}
