//! Cursor and line index consistency through long edit sequences.
//!
//! Each step applies a pseudo-random operation and then recomputes the
//! expected cursor line/column and line starts by scanning the content.

use ember_core::{Boundary, Buffer, BufferKind, Direction, Movement};

/// Small deterministic generator so failures are reproducible.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

fn expected_line_col(text: &[u8], pos: usize) -> (usize, usize) {
    let line = text[..pos].iter().filter(|&&b| b == b'\n').count();
    let start = text[..pos]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    (line, pos - start)
}

fn expected_line_begins(text: &[u8]) -> Vec<usize> {
    std::iter::once(0)
        .chain(
            text.iter()
                .enumerate()
                .filter(|&(_, &b)| b == b'\n')
                .map(|(i, _)| i + 1),
        )
        .collect()
}

fn assert_consistent(buf: &mut Buffer, step: usize) {
    let cursor = buf.cursor();
    assert!(cursor.pos <= buf.size(), "step {}: cursor past end", step);
    assert_eq!(
        (cursor.line, cursor.col),
        expected_line_col(buf.text(), cursor.pos),
        "step {}: cursor at {} inconsistent",
        step,
        cursor.pos
    );

    let begins = expected_line_begins(buf.text());
    assert_eq!(buf.lines_count(), begins.len(), "step {}", step);

    if buf.has_meta_data() {
        buf.refresh_line_index();
        assert_eq!(buf.meta().line_begins(), &begins[..], "step {}", step);
    }
}

fn random_direction(rng: &mut XorShift) -> Direction {
    if rng.below(2) == 0 {
        Direction::Forward
    } else {
        Direction::Backward
    }
}

fn run_sequence(kind: BufferKind, seed: u64, steps: usize) {
    const SNIPPETS: [&str; 6] = ["a", "\n", "foo bar", "x\ny\n", "  indent", "_id\n\n"];

    let mut rng = XorShift(seed);
    let mut buf = Buffer::new(kind);

    for step in 0..steps {
        match rng.below(9) {
            0 => buf.insert_char(['q', '\n', ' ', '_'][rng.below(4)]),
            1 => buf.insert_str(SNIPPETS[rng.below(SNIPPETS.len())]),
            2 => {
                let count = rng.below(5);
                buf.remove(Movement::chars(random_direction(&mut rng), count));
            }
            3 => {
                let count = rng.below(3);
                buf.remove(Movement::words(random_direction(&mut rng), count));
            }
            4 => {
                buf.erase_at_cursor();
            }
            5 => {
                let count = rng.below(4);
                buf.move_cursor(Movement::lines(random_direction(&mut rng), count));
            }
            6 => {
                let count = rng.below(4);
                buf.move_cursor(Movement::words(random_direction(&mut rng), count));
            }
            7 => {
                let pos = rng.below(buf.size() + 1);
                buf.step_cursor_to(pos);
            }
            _ => {
                let boundary = if rng.below(2) == 0 {
                    Boundary::Inside
                } else {
                    Boundary::Outside
                };
                if rng.below(2) == 0 {
                    buf.step_to_line_begin(boundary);
                } else {
                    buf.step_to_line_end(boundary);
                }
            }
        }
        assert_consistent(&mut buf, step);
    }
}

#[test]
fn text_buffer_stays_consistent() {
    for seed in [1, 7, 42, 1234, 987_654_321] {
        run_sequence(BufferKind::Text, seed, 600);
    }
}

#[test]
fn single_line_buffer_stays_consistent() {
    for seed in [3, 99] {
        run_sequence(BufferKind::SingleLine, seed, 300);
    }
}

#[test]
fn insert_then_erase_round_trips() {
    let original = "alpha\nbeta gamma\n\ndelta";
    for pos in 0..=original.len() {
        for inserted in ["z", "two words", "a\nb", "\n\n"] {
            let mut buf = Buffer::from_str(original);
            buf.step_cursor_to(pos);
            let before = buf.cursor();

            buf.insert_str(inserted);
            buf.remove(Movement::chars(Direction::Backward, inserted.len()));

            assert_eq!(buf.contents(), original);
            assert_eq!(buf.cursor(), before, "pos {} insert {:?}", pos, inserted);
        }
    }
}

#[test]
fn step_cursor_to_is_idempotent_everywhere() {
    let text = "fn a() {}\n\n    let b = 1;\n".repeat(8);
    let mut buf = Buffer::from_str(&text);
    for pos in (0..=buf.size()).rev().step_by(7) {
        buf.step_cursor_to(pos);
        let first = buf.cursor();
        buf.step_cursor_to(pos);
        assert_eq!(buf.cursor(), first);
        assert_eq!(
            (first.line, first.col),
            expected_line_col(buf.text(), pos)
        );
    }
}

#[test]
fn long_jumps_with_stale_index_stay_correct() {
    let mut buf = Buffer::default();
    buf.insert_str(&"0123456789\n".repeat(40));
    assert!(!buf.is_data_pristine());

    for pos in [0, 437, 5, 300, 12, 439] {
        buf.step_cursor_to(pos);
        let c = buf.cursor();
        assert_eq!((c.line, c.col), expected_line_col(buf.text(), pos));
    }
}
