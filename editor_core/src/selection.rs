//! Marks, selection ranges and bookmarks.
//!
//! The mark is not adjusted when text is edited: after an edit it keeps its
//! old offset even if that now points at different content.

use crate::buffer::Buffer;
use crate::cursor::{Cursor, CursorRect};
use crate::line_index::Bookmark;

impl Buffer {
    // ==================== Marks ====================

    /// Sets the mark at the cursor.
    pub fn set_mark_at_cursor(&mut self) {
        self.mark = self.cursor;
        self.mark_set = true;
    }

    /// Sets the mark `length` bytes ahead of the cursor without moving it.
    pub fn set_mark_from_cursor(&mut self, length: usize) {
        let saved = self.cursor;
        let target = saved.pos.saturating_add(length).min(self.size());
        self.step_cursor_to(target);
        self.mark = self.cursor;
        self.mark_set = true;
        self.cursor = saved;
    }

    /// Drops the mark.
    pub fn clear_mark(&mut self) {
        self.mark_set = false;
        self.mark.invalidate();
    }

    /// Returns the mark if one is set.
    pub fn mark(&self) -> Option<Cursor> {
        self.mark_set.then_some(self.mark)
    }

    /// Returns the selection as (lower, upper), or the cursor twice when no
    /// mark is set.
    pub fn get_cursor_rect(&self) -> CursorRect {
        match self.mark() {
            Some(mark) => CursorRect::new(mark, self.cursor),
            None => CursorRect::new(self.cursor, self.cursor),
        }
    }

    /// Returns the bytes covered by `rect`.
    ///
    /// Positions past the end (a mark left behind by a deletion) are clamped
    /// to the buffer size.
    pub fn copy_range(&self, rect: CursorRect) -> &[u8] {
        let size = self.size();
        let lower = rect.lower.pos.min(size);
        let upper = rect.upper.pos.min(size);
        &self.store.as_bytes()[lower..upper]
    }

    /// Returns the bytes between the mark and the cursor.
    pub fn selected_bytes(&self) -> &[u8] {
        self.copy_range(self.get_cursor_rect())
    }

    // ==================== Bookmarks ====================

    /// Bookmarks the cursor's line with its text, leading whitespace removed.
    ///
    /// Returns false if the line already has a bookmark or the buffer keeps
    /// no line metadata.
    pub fn set_bookmark(&mut self) -> bool {
        if !self.has_meta_data {
            return false;
        }
        self.refresh_line_index();

        let line = self.current_line_text();
        let start = line
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(line.len());
        let text = String::from_utf8_lossy(&line[start..]).into_owned();

        self.meta.add_bookmark(Bookmark::new(self.cursor.line, text))
    }

    /// Returns all bookmarks ordered by line.
    pub fn bookmarks(&self) -> &[Bookmark] {
        self.meta.bookmarks()
    }

    /// Removes the bookmark on `line`.
    pub fn remove_bookmark(&mut self, line: usize) -> Option<Bookmark> {
        self.meta.remove_bookmark(line)
    }

    pub fn clear_bookmarks(&mut self) {
        self.meta.clear_bookmarks();
    }

    /// Moves the cursor to the start of the bookmarked `line`.
    ///
    /// Returns the new position, or `None` if `line` has no bookmark.
    pub fn goto_bookmark(&mut self, line: usize) -> Option<usize> {
        self.meta.bookmark_at(line)?;
        self.refresh_line_index();
        let begin = self.line_begin(line)?;
        self.step_cursor_to(begin);
        Some(begin)
    }
}
