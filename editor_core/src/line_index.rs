//! Per-buffer metadata: line start index, bookmarks and display name.
//!
//! The line index is an ascending list of byte offsets where each line starts.
//! `line_begins[0]` is always 0 and `line_begins[i]` is the offset right after
//! the i-th newline, so the number of entries equals the number of lines.

use std::path::{Path, PathBuf};

/// Name shown for buffers without a file.
pub const UNTITLED: &str = "Untitled";

/// A line-anchored reference with a snapshot of the line's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    /// Line the bookmark is attached to (0-indexed).
    pub line: usize,
    /// Text of the line when the bookmark was set, leading whitespace removed.
    pub text: String,
}

impl Bookmark {
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }
}

/// Line starts, bookmarks and naming for one buffer.
#[derive(Debug, Clone)]
pub struct TextMetaData {
    line_begins: Vec<usize>,
    bookmarks: Vec<Bookmark>,
    name: String,
    file_path: Option<PathBuf>,
}

impl Default for TextMetaData {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetaData {
    /// Creates metadata for an empty, unnamed buffer.
    pub fn new() -> Self {
        Self {
            line_begins: vec![0],
            bookmarks: Vec::new(),
            name: UNTITLED.to_string(),
            file_path: None,
        }
    }

    /// Resets to the state of a freshly created buffer.
    pub fn reset(&mut self) {
        self.line_begins.clear();
        self.line_begins.push(0);
        self.bookmarks.clear();
        self.name = UNTITLED.to_string();
        self.file_path = None;
    }

    /// Rebuilds the line index with a full newline scan of `content`.
    pub fn rebuild(&mut self, content: &[u8]) {
        self.line_begins.clear();
        self.line_begins.push(0);
        self.line_begins.extend(
            content
                .iter()
                .enumerate()
                .filter(|&(_, &b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        log::trace!("rebuilt line index: {} lines", self.line_begins.len());
    }

    /// Returns the number of lines. Always at least one.
    pub fn line_count(&self) -> usize {
        self.line_begins.len()
    }

    /// Returns the byte offset where `line` starts.
    pub fn line_begin(&self, line: usize) -> Option<usize> {
        self.line_begins.get(line).copied()
    }

    /// Returns the raw line start offsets.
    pub fn line_begins(&self) -> &[usize] {
        &self.line_begins
    }

    /// Returns the line containing byte offset `pos`.
    pub fn line_of(&self, pos: usize) -> usize {
        match self.line_begins.binary_search(&pos) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        }
    }

    /// Accounts for a non-newline byte inserted on `line`.
    pub fn insert_char(&mut self, line: usize) {
        for begin in self.line_begins.iter_mut().skip(line + 1) {
            *begin += 1;
        }
    }

    /// Accounts for a newline inserted at byte `pos` on `line`.
    ///
    /// Bookmarks on later lines move down by one.
    pub fn insert_newline(&mut self, line: usize, pos: usize) {
        self.insert_char(line);
        self.line_begins.insert(line + 1, pos + 1);
        self.shift_bookmarks_down(line, 1);
    }

    /// Accounts for `len` non-newline bytes removed from `line`.
    pub fn remove_chars(&mut self, line: usize, len: usize) {
        for begin in self.line_begins.iter_mut().skip(line + 1) {
            *begin -= len;
        }
    }

    /// Moves bookmarks after `line` down by `count` lines.
    pub fn shift_bookmarks_down(&mut self, line: usize, count: usize) {
        for bookmark in self.bookmarks.iter_mut().filter(|b| b.line > line) {
            bookmark.line += count;
        }
    }

    /// Accounts for `removed` lines after `line` being merged into `line`.
    ///
    /// Bookmarks on the merged lines are dropped, later ones move up.
    pub fn join_lines(&mut self, line: usize, removed: usize) {
        if removed == 0 {
            return;
        }
        let last_removed = line + removed;
        self.bookmarks
            .retain(|b| b.line <= line || b.line > last_removed);
        for bookmark in self.bookmarks.iter_mut().filter(|b| b.line > last_removed) {
            bookmark.line -= removed;
        }
    }

    /// Adds a bookmark unless one already exists on the same line.
    ///
    /// Returns true if the bookmark was added.
    pub fn add_bookmark(&mut self, bookmark: Bookmark) -> bool {
        if self.bookmark_at(bookmark.line).is_some() {
            return false;
        }
        self.bookmarks.push(bookmark);
        self.bookmarks.sort_by_key(|b| b.line);
        true
    }

    /// Returns the bookmark on `line`, if any.
    pub fn bookmark_at(&self, line: usize) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.line == line)
    }

    /// Removes and returns the bookmark on `line`.
    pub fn remove_bookmark(&mut self, line: usize) -> Option<Bookmark> {
        let index = self.bookmarks.iter().position(|b| b.line == line)?;
        Some(self.bookmarks.remove(index))
    }

    /// Returns all bookmarks ordered by line.
    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn clear_bookmarks(&mut self) {
        self.bookmarks.clear();
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the file path carried for this buffer.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Sets the file path and derives the display name from its file name.
    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| UNTITLED.to_string());
        self.file_path = Some(path);
    }
}
