//! The editable buffer: byte store, cursor and line index kept in sync.
//!
//! Editing lives in `editing.rs`, cursor motion in `movement.rs`, marks and
//! bookmarks in `selection.rs` and search in `search.rs`. This file holds the
//! state, construction, queries and the positioning primitives shared by all
//! of them.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::config::EngineConfig;
use crate::cursor::{Boundary, Cursor, Movement};
use crate::line_index::TextMetaData;
use crate::manager::BufferId;
use crate::store::TextStore;

/// Capabilities any buffer backend offers to the editor shell.
///
/// [`Buffer`] is the contiguous implementation. A gap buffer or rope can
/// implement this trait without changing callers.
pub trait TextBuffer {
    /// Inserts raw bytes at the cursor and moves the cursor past them.
    fn insert_bytes(&mut self, data: &[u8]);
    /// Deletes text covered by `movement` from the cursor. Returns bytes removed.
    fn remove(&mut self, movement: Movement) -> usize;
    /// Moves the cursor.
    fn move_cursor(&mut self, movement: Movement);
    /// Places the cursor at an absolute byte offset.
    fn step_cursor_to(&mut self, pos: usize);
    /// Returns the primary cursor.
    fn cursor(&self) -> Cursor;
    /// Returns the content size in bytes.
    fn size(&self) -> usize;
    /// Returns the number of lines.
    fn lines_count(&self) -> usize;
    /// Returns the raw content.
    fn text(&self) -> &[u8];
}

/// What a buffer is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferKind {
    /// A document with full line semantics.
    #[default]
    Text,
    /// A single-line input such as a search field. Keeps no line index.
    SingleLine,
}

impl BufferKind {
    /// Returns true if buffers of this kind maintain a line index.
    pub fn has_meta_data(self) -> bool {
        matches!(self, BufferKind::Text)
    }
}

/// A contiguous text buffer with cursor, mark, line index and bookmarks.
#[derive(Debug, Clone)]
pub struct Buffer {
    pub(crate) id: BufferId,
    pub(crate) kind: BufferKind,
    pub(crate) store: TextStore,
    pub(crate) cursor: Cursor,
    pub(crate) mark: Cursor,
    pub(crate) mark_set: bool,
    pub(crate) meta: TextMetaData,
    pub(crate) has_meta_data: bool,
    /// Cleared whenever the cursor or content changes; set by the renderer.
    pub(crate) state_is_pristine: bool,
    /// True while the line index matches the content.
    pub(crate) data_is_pristine: bool,
    pub(crate) modified: bool,
    pub(crate) last_search: Option<Vec<u8>>,
    pub(crate) step_scan_threshold: usize,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new(BufferKind::Text)
    }
}

impl Buffer {
    /// Creates an empty, unmanaged buffer with default settings.
    pub fn new(kind: BufferKind) -> Self {
        Self::with_config(0, kind, &EngineConfig::default())
    }

    /// Creates an empty buffer with the given identity and settings.
    pub fn with_config(id: BufferId, kind: BufferKind, config: &EngineConfig) -> Self {
        let mut mark = Cursor::new(id);
        mark.invalidate();
        Self {
            id,
            kind,
            store: TextStore::with_min_capacity(config.min_capacity),
            cursor: Cursor::new(id),
            mark,
            mark_set: false,
            meta: TextMetaData::new(),
            has_meta_data: kind.has_meta_data(),
            state_is_pristine: false,
            data_is_pristine: true,
            modified: false,
            last_search: None,
            step_scan_threshold: config.step_scan_threshold.max(1),
        }
    }

    /// Creates a text buffer holding `text`, cursor at the origin.
    pub fn from_str(text: &str) -> Self {
        let mut buffer = Self::new(BufferKind::Text);
        buffer.load(text);
        buffer
    }

    /// Re-targets a pooled buffer to a new identity and kind.
    pub(crate) fn recycle(&mut self, id: BufferId, kind: BufferKind) {
        self.id = id;
        self.kind = kind;
        self.has_meta_data = kind.has_meta_data();
        self.cursor.buffer_id = id;
        self.mark.buffer_id = id;
        self.clear();
    }

    // ==================== Content Lifecycle ====================

    /// Replaces the whole content with `content` and rebuilds the line index.
    ///
    /// The cursor returns to the origin and marks, bookmarks and the
    /// remembered search are dropped.
    pub fn load(&mut self, content: impl Into<Vec<u8>>) {
        self.store.load(content.into());
        self.meta.clear_bookmarks();
        if self.has_meta_data {
            self.meta.rebuild(self.store.as_bytes());
        }
        self.cursor.reset();
        self.clear_mark();
        self.last_search = None;
        self.data_is_pristine = true;
        self.state_is_pristine = false;
        self.modified = false;
        log::debug!(
            "buffer {}: loaded {} bytes, {} lines",
            self.id,
            self.size(),
            self.lines_count()
        );
    }

    /// Empties the buffer and forgets its file path, name and bookmarks.
    pub fn clear(&mut self) {
        self.store.clear();
        self.meta.reset();
        self.cursor.reset();
        self.clear_mark();
        self.last_search = None;
        self.data_is_pristine = true;
        self.state_is_pristine = false;
        self.modified = false;
        log::debug!("buffer {}: cleared", self.id);
    }

    // ==================== Queries ====================

    /// Returns the identity assigned by the manager.
    pub fn id(&self) -> BufferId {
        self.id
    }

    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    /// Returns true if this buffer keeps a line index and bookmarks.
    pub fn has_meta_data(&self) -> bool {
        self.has_meta_data
    }

    /// Returns the primary cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Returns the content size in bytes.
    pub fn size(&self) -> usize {
        self.store.size()
    }

    /// Returns the reserved storage capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Returns true if the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &TextStore {
        &self.store
    }

    /// Returns the raw content for rendering or tokenizing.
    pub fn text(&self) -> &[u8] {
        self.store.as_bytes()
    }

    /// Returns the content as text, replacing invalid UTF-8.
    pub fn contents(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.store.as_bytes())
    }

    /// Returns the number of lines. An empty buffer has one line.
    pub fn lines_count(&self) -> usize {
        if self.index_ready() {
            self.meta.line_count()
        } else {
            self.store.count_newlines(0..self.size()) + 1
        }
    }

    /// Returns the bytes of `line` without its newline.
    pub fn line_text(&self, line: usize) -> Option<&[u8]> {
        let begin = self.line_begin(line)?;
        let end = self.line_end_from(begin);
        Some(&self.store.as_bytes()[begin..end])
    }

    /// Returns the length of `line` in bytes, excluding its newline.
    pub fn line_len(&self, line: usize) -> Option<usize> {
        self.line_text(line).map(<[u8]>::len)
    }

    /// Returns the bytes of the line holding the cursor.
    pub fn current_line_text(&self) -> &[u8] {
        let begin = self.line_start_of(self.cursor.pos);
        let end = self.line_end_from(self.cursor.pos);
        &self.store.as_bytes()[begin..end]
    }

    /// Returns true if neither the view nor the line index need refreshing.
    pub fn is_pristine(&self) -> bool {
        self.state_is_pristine && self.data_is_pristine
    }

    /// Returns true if nothing changed since the view last acknowledged.
    pub fn is_state_pristine(&self) -> bool {
        self.state_is_pristine
    }

    /// Returns true if the line index matches the content.
    pub fn is_data_pristine(&self) -> bool {
        self.data_is_pristine
    }

    /// Called by the view once it has redrawn the current state.
    pub fn mark_state_pristine(&mut self) {
        self.state_is_pristine = true;
    }

    /// Returns true if the content changed since it was loaded or saved.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Called by the file collaborator after writing the content out.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Returns the line index and bookmark metadata.
    pub fn meta(&self) -> &TextMetaData {
        &self.meta
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        self.meta.name()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.meta.set_name(name);
    }

    /// Returns the file path this buffer was loaded from, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.meta.file_path()
    }

    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.meta.set_file_path(path);
    }

    // ==================== Line Index ====================

    /// Returns true if the line index can answer queries.
    pub(crate) fn index_ready(&self) -> bool {
        self.has_meta_data && self.data_is_pristine
    }

    /// Rebuilds a stale line index.
    pub fn refresh_line_index(&mut self) {
        if self.has_meta_data && !self.data_is_pristine {
            self.rebuild_line_index();
        }
    }

    pub(crate) fn rebuild_line_index(&mut self) {
        if self.has_meta_data {
            self.meta.rebuild(self.store.as_bytes());
            self.data_is_pristine = true;
        }
    }

    /// Returns the offset where `line` starts.
    pub(crate) fn line_begin(&self, line: usize) -> Option<usize> {
        if self.index_ready() {
            return self.meta.line_begin(line);
        }
        if line == 0 {
            return Some(0);
        }
        self.store
            .as_bytes()
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b == b'\n')
            .nth(line - 1)
            .map(|(i, _)| i + 1)
    }

    /// Returns the start of the line containing `pos`.
    pub(crate) fn line_start_of(&self, pos: usize) -> usize {
        if self.index_ready() {
            let line = self.meta.line_of(pos);
            return self.meta.line_begin(line).unwrap_or(0);
        }
        self.store.as_bytes()[..pos]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1)
    }

    /// Returns the position of the newline ending the line that contains
    /// `pos`, or the buffer size on the last line.
    pub(crate) fn line_end_from(&self, pos: usize) -> usize {
        self.store.as_bytes()[pos..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.size(), |i| pos + i)
    }

    // ==================== Positioning ====================

    /// Places the cursor at byte offset `pos`, updating line and column.
    ///
    /// Short jumps scan the bytes in between. Long jumps use the line index
    /// when it is current and fall back to scanning when it is stale or the
    /// buffer has none.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is past the end of the buffer.
    pub fn step_cursor_to(&mut self, pos: usize) {
        assert!(
            pos <= self.size(),
            "cursor position {} out of bounds (size {})",
            pos,
            self.size()
        );
        self.state_is_pristine = false;

        if pos == 0 {
            self.cursor.reset();
            return;
        }

        if pos.abs_diff(self.cursor.pos) < self.step_scan_threshold {
            self.scan_cursor_to(pos);
        } else if self.index_ready() {
            let line = self.meta.line_of(pos);
            let begin = self.meta.line_begin(line).unwrap_or(0);
            self.cursor.pos = pos;
            self.cursor.line = line;
            self.cursor.col = pos - begin;
        } else {
            log::trace!(
                "buffer {}: line index unavailable, scanning {} bytes",
                self.id,
                pos.abs_diff(self.cursor.pos)
            );
            self.scan_cursor_to(pos);
        }
    }

    /// Moves the cursor to `pos` by scanning the bytes between.
    pub(crate) fn scan_cursor_to(&mut self, pos: usize) {
        let from = self.cursor.pos;
        if pos >= from {
            let span = &self.store.as_bytes()[from..pos];
            match span.iter().rposition(|&b| b == b'\n') {
                Some(last) => {
                    self.cursor.line += span.iter().filter(|&&b| b == b'\n').count();
                    self.cursor.col = span.len() - last - 1;
                }
                None => self.cursor.col += span.len(),
            }
        } else {
            self.cursor.line -= self.store.count_newlines(pos..from);
            self.cursor.col = pos - self.line_start_of(pos);
        }
        self.cursor.pos = pos;
        self.state_is_pristine = false;
    }

    // ==================== Line Boundaries ====================

    /// Returns the start of `line` under the given boundary convention.
    ///
    /// `Inside` is the first byte of the line, `Outside` the newline ending
    /// the previous line. Line 0 has no preceding newline, so both give 0.
    pub fn find_line_start(&self, boundary: Boundary, line: usize) -> Option<usize> {
        let begin = self.line_begin(line)?;
        Some(match boundary {
            Boundary::Inside => begin,
            Boundary::Outside => begin.saturating_sub(1),
        })
    }

    /// Returns the end of `line` under the given boundary convention.
    ///
    /// `Outside` is the newline ending the line (the buffer size on the last
    /// line), `Inside` the last byte before it (the line start if empty).
    pub fn find_line_end(&self, boundary: Boundary, line: usize) -> Option<usize> {
        let begin = self.line_begin(line)?;
        let end = self.line_end_from(begin);
        Some(match boundary {
            Boundary::Outside => end,
            Boundary::Inside if end > begin => end - 1,
            Boundary::Inside => begin,
        })
    }

    /// Moves the cursor to the start of its line. Returns the new position.
    pub fn step_to_line_begin(&mut self, boundary: Boundary) -> usize {
        self.refresh_line_index();
        let target = self
            .find_line_start(boundary, self.cursor.line)
            .unwrap_or(0);
        self.step_cursor_to(target);
        target
    }

    /// Moves the cursor to the end of its line. Returns the new position.
    pub fn step_to_line_end(&mut self, boundary: Boundary) -> usize {
        self.refresh_line_index();
        let target = self
            .find_line_end(boundary, self.cursor.line)
            .unwrap_or(self.size());
        self.step_cursor_to(target);
        target
    }
}

impl TextBuffer for Buffer {
    fn insert_bytes(&mut self, data: &[u8]) {
        Buffer::insert_bytes(self, data);
    }

    fn remove(&mut self, movement: Movement) -> usize {
        Buffer::remove(self, movement)
    }

    fn move_cursor(&mut self, movement: Movement) {
        Buffer::move_cursor(self, movement);
    }

    fn step_cursor_to(&mut self, pos: usize) {
        Buffer::step_cursor_to(self, pos);
    }

    fn cursor(&self) -> Cursor {
        Buffer::cursor(self)
    }

    fn size(&self) -> usize {
        Buffer::size(self)
    }

    fn lines_count(&self) -> usize {
        Buffer::lines_count(self)
    }

    fn text(&self) -> &[u8] {
        Buffer::text(self)
    }
}
