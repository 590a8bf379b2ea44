//! Insertion and deletion at the cursor.

use crate::buffer::Buffer;
use crate::cursor::{Direction, Movement, Unit};

impl Buffer {
    // ==================== Insertion ====================

    /// Inserts a character at the cursor and advances past it.
    ///
    /// ASCII characters patch the line index in place. Other characters are
    /// encoded as UTF-8 and go through [`Buffer::insert_bytes`].
    pub fn insert_char(&mut self, ch: char) {
        if ch.is_ascii() {
            self.insert_byte(ch as u8);
        } else {
            let mut encoded = [0u8; 4];
            self.insert_bytes(ch.encode_utf8(&mut encoded).as_bytes());
        }
    }

    /// Inserts a newline at the cursor.
    pub fn insert_newline(&mut self) {
        self.insert_byte(b'\n');
    }

    /// Inserts a string at the cursor and advances past it.
    pub fn insert_str(&mut self, text: &str) {
        self.insert_bytes(text.as_bytes());
    }

    /// Inserts an owned string at the cursor and advances past it.
    pub fn insert_owned(&mut self, text: String) {
        self.insert_bytes(text.as_bytes());
    }

    /// Inserts raw bytes at the cursor in a single store operation.
    ///
    /// The line index is marked stale and rebuilt before its next use.
    pub fn insert_bytes(&mut self, data: &[u8]) {
        match data.len() {
            0 => return,
            1 => return self.insert_byte(data[0]),
            _ => {}
        }

        let line = self.cursor.line;
        self.store.insert_at(self.cursor.pos, data);

        let newlines = data.iter().filter(|&&b| b == b'\n').count();
        match data.iter().rposition(|&b| b == b'\n') {
            Some(last) => {
                self.cursor.line += newlines;
                self.cursor.col = data.len() - last - 1;
            }
            None => self.cursor.col += data.len(),
        }
        self.cursor.pos += data.len();

        if self.has_meta_data {
            self.meta.shift_bookmarks_down(line, newlines);
            self.data_is_pristine = false;
        }
        self.touch();
    }

    fn insert_byte(&mut self, byte: u8) {
        let pos = self.cursor.pos;
        let line = self.cursor.line;
        self.store.insert_at(pos, &[byte]);

        if self.has_meta_data {
            match (byte == b'\n', self.data_is_pristine) {
                (true, true) => self.meta.insert_newline(line, pos),
                (true, false) => self.meta.shift_bookmarks_down(line, 1),
                (false, true) => self.meta.insert_char(line),
                (false, false) => {}
            }
        }

        self.cursor.pos += 1;
        if byte == b'\n' {
            self.cursor.line += 1;
            self.cursor.col = 0;
        } else {
            self.cursor.col += 1;
        }
        self.touch();
    }

    // ==================== Deletion ====================

    /// Removes the byte under the cursor without moving it.
    ///
    /// Returns the removed byte, or `None` at the end of the buffer.
    pub fn erase_at_cursor(&mut self) -> Option<u8> {
        let pos = self.cursor.pos;
        let byte = self.store.byte_at(pos)?;
        self.store.erase_at(pos, 1);

        if self.has_meta_data {
            if byte == b'\n' {
                self.meta.join_lines(self.cursor.line, 1);
                self.rebuild_line_index();
            } else if self.data_is_pristine {
                self.meta.remove_chars(self.cursor.line, 1);
            }
        }
        self.touch();
        Some(byte)
    }

    /// Deletes the text between the cursor and where `movement` would take it.
    ///
    /// Forward deletion keeps the cursor in place and only rebuilds the line
    /// index if a newline was removed. Backward deletion moves the cursor to
    /// the start of the removed range and always rebuilds. Returns the number
    /// of bytes removed.
    ///
    /// # Panics
    ///
    /// Panics for line, block and file units, which are not implemented.
    pub fn remove(&mut self, movement: Movement) -> usize {
        let target = match movement.unit {
            Unit::Char => self.char_target(movement.direction, movement.count),
            Unit::Word => self.word_target(movement.direction, movement.count),
            Unit::Line => panic!("line deletion is not implemented"),
            unit => panic!("{:?} deletion is not implemented", unit),
        };

        let removed = match movement.direction {
            Direction::Forward => self.remove_forward(target),
            Direction::Backward => self.remove_backward(target),
        };
        if removed > 0 {
            self.touch();
        }
        removed
    }

    fn remove_forward(&mut self, target: usize) -> usize {
        let pos = self.cursor.pos;
        let len = target - pos;
        if len == 0 {
            return 0;
        }

        let newlines = self.store.count_newlines(pos..target);
        self.store.erase_at(pos, len);

        if self.has_meta_data {
            if newlines > 0 {
                self.meta.join_lines(self.cursor.line, newlines);
                self.rebuild_line_index();
            } else if self.data_is_pristine {
                self.meta.remove_chars(self.cursor.line, len);
            }
        }
        len
    }

    fn remove_backward(&mut self, target: usize) -> usize {
        let pos = self.cursor.pos;
        let len = pos - target;
        if len == 0 {
            return 0;
        }

        let newlines = self.store.count_newlines(target..pos);
        self.scan_cursor_to(target);
        self.store.erase_at(target, len);

        if self.has_meta_data {
            self.meta.join_lines(self.cursor.line, newlines);
            self.rebuild_line_index();
        }
        len
    }

    /// Records that content changed.
    fn touch(&mut self) {
        self.state_is_pristine = false;
        self.modified = true;
    }
}
