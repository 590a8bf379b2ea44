//! Cursor motion by character, word and line.

use crate::buffer::Buffer;
use crate::cursor::{Direction, Movement, Unit};

/// Returns true for bytes that separate words: anything that is not an ASCII
/// letter, digit or underscore.
pub fn is_delimiter(byte: u8) -> bool {
    !(byte.is_ascii_alphanumeric() || byte == b'_')
}

impl Buffer {
    /// Moves the cursor according to `movement`, clamping at buffer edges.
    ///
    /// # Panics
    ///
    /// Panics for block and file units, which are not implemented.
    pub fn move_cursor(&mut self, movement: Movement) {
        let Movement {
            unit,
            direction,
            count,
        } = movement;
        match unit {
            Unit::Char => {
                let target = self.char_target(direction, count);
                self.scan_cursor_to(target);
            }
            Unit::Word => {
                let target = self.word_target(direction, count);
                self.scan_cursor_to(target);
            }
            Unit::Line => match direction {
                Direction::Forward => self.move_lines_forward(count),
                Direction::Backward => self.move_lines_backward(count),
            },
            unit => panic!("{:?} movement is not implemented", unit),
        }
    }

    /// Returns the position `count` bytes away, clamped to the buffer.
    pub(crate) fn char_target(&self, direction: Direction, count: usize) -> usize {
        let pos = self.cursor.pos;
        match direction {
            Direction::Forward => pos.saturating_add(count).min(self.size()),
            Direction::Backward => pos.saturating_sub(count),
        }
    }

    /// Returns the position `count` word steps away.
    ///
    /// A forward step skips the rest of the current word and the delimiters
    /// after it, landing on the next word start. A backward step skips the
    /// delimiters behind the cursor and then the word before them.
    pub(crate) fn word_target(&self, direction: Direction, count: usize) -> usize {
        let bytes = self.store.as_bytes();
        let mut pos = self.cursor.pos;
        match direction {
            Direction::Forward => {
                for _ in 0..count {
                    if pos >= bytes.len() {
                        break;
                    }
                    while pos < bytes.len() && !is_delimiter(bytes[pos]) {
                        pos += 1;
                    }
                    while pos < bytes.len() && is_delimiter(bytes[pos]) {
                        pos += 1;
                    }
                }
            }
            Direction::Backward => {
                for _ in 0..count {
                    if pos == 0 {
                        break;
                    }
                    while pos > 0 && is_delimiter(bytes[pos - 1]) {
                        pos -= 1;
                    }
                    while pos > 0 && !is_delimiter(bytes[pos - 1]) {
                        pos -= 1;
                    }
                }
            }
        }
        pos
    }

    /// Crosses `count` newlines forward and restores the column, clamped to
    /// the target line's length. Stops on the last line if fewer exist.
    fn move_lines_forward(&mut self, count: usize) {
        let bytes = self.store.as_bytes();
        let mut begin = self.cursor.pos;
        let mut crossed = 0;
        while crossed < count {
            match bytes[begin..].iter().position(|&b| b == b'\n') {
                Some(offset) => {
                    begin += offset + 1;
                    crossed += 1;
                }
                None => break,
            }
        }
        if crossed == 0 {
            return;
        }

        let end = self.line_end_from(begin);
        let target = (begin + self.cursor.col).min(end);
        self.cursor.pos = target;
        self.cursor.line += crossed;
        self.cursor.col = target - begin;
        self.state_is_pristine = false;
    }

    /// Moves up `count` lines (stopping at the first) and restores the
    /// column, clamped to the target line's length.
    fn move_lines_backward(&mut self, count: usize) {
        if count == 0 || self.cursor.line == 0 {
            return;
        }
        self.refresh_line_index();

        let target_line = self.cursor.line.saturating_sub(count);
        let begin = if self.index_ready() {
            self.meta.line_begin(target_line).unwrap_or(0)
        } else {
            let mut begin = self.line_start_of(self.cursor.pos);
            for _ in target_line..self.cursor.line {
                begin = self.line_start_of(begin - 1);
            }
            begin
        };

        let end = self.line_end_from(begin);
        let target = (begin + self.cursor.col).min(end);
        self.cursor.pos = target;
        self.cursor.line = target_line;
        self.cursor.col = target - begin;
        self.state_is_pristine = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BufferKind;

    fn state(buf: &Buffer) -> (usize, usize, usize) {
        let c = buf.cursor();
        (c.pos, c.line, c.col)
    }

    #[test]
    fn test_delimiters() {
        assert!(is_delimiter(b' '));
        assert!(is_delimiter(b'.'));
        assert!(is_delimiter(b'\n'));
        assert!(!is_delimiter(b'a'));
        assert!(!is_delimiter(b'Z'));
        assert!(!is_delimiter(b'7'));
        assert!(!is_delimiter(b'_'));
    }

    #[test]
    fn test_move_chars_across_lines() {
        let mut buf = Buffer::from_str("ab\ncd\nef");
        buf.move_cursor(Movement::chars(Direction::Forward, 4));
        assert_eq!(state(&buf), (4, 1, 1));

        buf.move_cursor(Movement::chars(Direction::Forward, 3));
        assert_eq!(state(&buf), (7, 2, 1));

        buf.move_cursor(Movement::chars(Direction::Backward, 5));
        assert_eq!(state(&buf), (2, 0, 2));
    }

    #[test]
    fn test_move_chars_clamps() {
        let mut buf = Buffer::from_str("abc");
        buf.move_cursor(Movement::chars(Direction::Backward, 1));
        assert_eq!(state(&buf), (0, 0, 0));

        buf.move_cursor(Movement::chars(Direction::Forward, 100));
        assert_eq!(state(&buf), (3, 0, 3));

        buf.move_cursor(Movement::chars(Direction::Forward, 1));
        assert_eq!(state(&buf), (3, 0, 3));
    }

    #[test]
    fn test_move_words_forward() {
        let mut buf = Buffer::from_str("foo bar baz");
        buf.move_cursor(Movement::words(Direction::Forward, 2));
        assert_eq!(buf.cursor().pos, 8);

        buf.move_cursor(Movement::words(Direction::Forward, 5));
        assert_eq!(buf.cursor().pos, 11);
    }

    #[test]
    fn test_move_words_backward() {
        let mut buf = Buffer::from_str("let x_1 = foo(bar);");
        buf.step_cursor_to(buf.size());
        buf.move_cursor(Movement::words(Direction::Backward, 1));
        assert_eq!(buf.cursor().pos, 14);
        buf.move_cursor(Movement::words(Direction::Backward, 2));
        assert_eq!(buf.cursor().pos, 4);
        buf.move_cursor(Movement::words(Direction::Backward, 9));
        assert_eq!(buf.cursor().pos, 0);
    }

    #[test]
    fn test_move_words_updates_line() {
        let mut buf = Buffer::from_str("alpha\n  beta gamma");
        buf.move_cursor(Movement::words(Direction::Forward, 1));
        assert_eq!(state(&buf), (8, 1, 2));
    }

    #[test]
    fn test_move_lines_forward() {
        let mut buf = Buffer::from_str("abc\ndef\nghi");
        buf.move_cursor(Movement::lines(Direction::Forward, 2));
        assert_eq!(state(&buf), (8, 2, 0));
    }

    #[test]
    fn test_move_lines_clamps_column() {
        let mut buf = Buffer::from_str("long line\nab\nanother line");
        buf.step_cursor_to(7);
        buf.move_cursor(Movement::lines(Direction::Forward, 1));
        assert_eq!(state(&buf), (12, 1, 2));

        buf.move_cursor(Movement::lines(Direction::Forward, 1));
        assert_eq!(state(&buf), (15, 2, 2));

        buf.move_cursor(Movement::lines(Direction::Backward, 2));
        assert_eq!(state(&buf), (2, 0, 2));
    }

    #[test]
    fn test_move_lines_stops_at_edges() {
        let mut buf = Buffer::from_str("one\ntwo\nthree");
        buf.step_cursor_to(5);
        buf.move_cursor(Movement::lines(Direction::Forward, 10));
        assert_eq!(state(&buf), (9, 2, 1));

        buf.move_cursor(Movement::lines(Direction::Forward, 1));
        assert_eq!(state(&buf), (9, 2, 1));

        buf.move_cursor(Movement::lines(Direction::Backward, 10));
        assert_eq!(state(&buf), (1, 0, 1));

        buf.move_cursor(Movement::lines(Direction::Backward, 1));
        assert_eq!(state(&buf), (1, 0, 1));
    }

    #[test]
    fn test_move_lines_backward_without_index() {
        let mut buf = Buffer::new(BufferKind::SingleLine);
        buf.load("abcd\nef\nghij");
        buf.step_cursor_to(11);
        buf.move_cursor(Movement::lines(Direction::Backward, 2));
        assert_eq!(state(&buf), (3, 0, 3));
    }

    #[test]
    fn test_move_lines_after_string_insert() {
        let mut buf = Buffer::default();
        buf.insert_str("first\nsecond\nthird");
        buf.move_cursor(Movement::lines(Direction::Backward, 1));
        assert_eq!(state(&buf), (11, 1, 5));
        assert!(buf.is_data_pristine());
    }

    #[test]
    #[should_panic(expected = "Block movement is not implemented")]
    fn test_block_movement_panics() {
        let mut buf = Buffer::from_str("abc");
        buf.move_cursor(Movement::new(Unit::Block, Direction::Forward, 1));
    }
}
