//! Applies parsed commands to a managed buffer.

use std::io::{self, Write};
use std::path::Path;

use ember_core::{Buffer, BufferId, BufferKind, BufferManager, EngineConfig, TextBuffer};

use crate::command::Command;

/// One buffer owned by a manager, driven by commands.
pub struct Session {
    manager: BufferManager,
    buffer_id: BufferId,
}

impl Session {
    /// Creates a session with a fresh, empty buffer of `kind`.
    pub fn new(config: EngineConfig, kind: BufferKind) -> Self {
        let mut manager = BufferManager::with_config(config);
        let buffer_id = manager.allocate(kind);
        Self { manager, buffer_id }
    }

    /// Hands file content to the buffer.
    pub fn load(&mut self, path: &Path, content: Vec<u8>) {
        let buffer = self.buffer_mut();
        buffer.load(content);
        buffer.set_file_path(path);
    }

    pub fn buffer(&self) -> &Buffer {
        self.manager
            .get(self.buffer_id)
            .expect("session buffer is owned by its manager")
    }

    fn buffer_mut(&mut self) -> &mut Buffer {
        self.manager
            .get_mut(self.buffer_id)
            .expect("session buffer is owned by its manager")
    }

    /// Runs one command. Returns false when the session should end.
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<bool> {
        let buffer = self.buffer_mut();
        match command {
            Command::Move(movement) => buffer.move_cursor(movement),
            Command::Goto(pos) => {
                if pos > buffer.size() {
                    writeln!(out, "offset {} is past the end ({})", pos, buffer.size())?;
                    return Ok(true);
                }
                buffer.step_cursor_to(pos);
            }
            Command::Find(needle) => report_search(out, buffer.goto_next(needle))?,
            Command::Again => report_search(out, buffer.goto_next_again())?,
            Command::Insert(text) => buffer.insert_owned(text),
            Command::Newline => buffer.insert_newline(),
            Command::Delete(movement) => {
                let removed = buffer.remove(movement);
                writeln!(out, "removed {} bytes", removed)?;
            }
            Command::Erase => match buffer.erase_at_cursor() {
                Some(byte) => writeln!(out, "erased {:?}", byte as char)?,
                None => writeln!(out, "nothing to erase")?,
            },
            Command::Mark(None) => buffer.set_mark_at_cursor(),
            Command::Mark(Some(length)) => buffer.set_mark_from_cursor(length),
            Command::Unmark => buffer.clear_mark(),
            Command::Copy => {
                let selected = String::from_utf8_lossy(buffer.selected_bytes());
                writeln!(out, "{:?}", selected)?;
            }
            Command::Bookmark => {
                if !buffer.set_bookmark() {
                    writeln!(out, "line {} not bookmarked", buffer.cursor().line + 1)?;
                }
            }
            Command::Bookmarks => {
                for bookmark in buffer.bookmarks() {
                    writeln!(out, "{:>5}: {}", bookmark.line + 1, bookmark.text)?;
                }
            }
            Command::Begin(boundary) => {
                buffer.step_to_line_begin(boundary);
            }
            Command::End(boundary) => {
                buffer.step_to_line_end(boundary);
            }
            Command::Status => {}
            Command::Print => out.write_all(buffer.text())?,
            Command::Quit => return Ok(false),
        }

        print_status(&*buffer, out)?;
        buffer.mark_state_pristine();
        Ok(true)
    }
}

fn report_search(out: &mut impl Write, found: Option<usize>) -> io::Result<()> {
    if found.is_none() {
        writeln!(out, "no match")?;
    }
    Ok(())
}

/// Prints the cursor and size summary shown after every command.
pub fn print_status(buffer: &dyn TextBuffer, out: &mut impl Write) -> io::Result<()> {
    let cursor = buffer.cursor();
    writeln!(
        out,
        "[{}:{}] pos {} / {} bytes, {} lines",
        cursor.line + 1,
        cursor.col + 1,
        cursor.pos,
        buffer.size(),
        buffer.lines_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(session: &mut Session, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            if let Some(command) = Command::parse(line).unwrap() {
                session.execute(command, &mut out).unwrap();
            }
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_status_after_commands() {
        let mut session = Session::new(EngineConfig::default(), BufferKind::Text);
        let output = run(&mut session, &["insert hello\\nworld", "move line back"]);
        assert_eq!(
            output,
            "[2:6] pos 11 / 11 bytes, 2 lines\n[1:6] pos 5 / 11 bytes, 2 lines\n"
        );
        assert!(session.buffer().is_state_pristine());
    }

    #[test]
    fn test_load_find_and_copy() {
        let mut session = Session::new(EngineConfig::default(), BufferKind::Text);
        session.load(Path::new("notes.txt"), b"todo: one\ntodo: two\n".to_vec());
        assert_eq!(session.buffer().name(), "notes.txt");

        let output = run(&mut session, &["find todo", "mark 4", "copy", "find nope"]);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "[2:1] pos 10 / 20 bytes, 3 lines");
        assert_eq!(lines[2], "\"todo\"");
        assert_eq!(lines[4], "no match");
    }

    #[test]
    fn test_bookmarks_listing() {
        let mut session = Session::new(EngineConfig::default(), BufferKind::Text);
        session.load(Path::new("a.rs"), b"fn a() {}\n    fn b() {}\n".to_vec());
        let output = run(&mut session, &["goto 12", "bookmark", "bookmark", "bookmarks"]);
        assert!(output.contains("line 2 not bookmarked"));
        assert!(output.contains("    2: fn b() {}"));
    }

    #[test]
    fn test_goto_past_end_is_reported() {
        let mut session = Session::new(EngineConfig::default(), BufferKind::SingleLine);
        let output = run(&mut session, &["goto 3"]);
        assert_eq!(output, "offset 3 is past the end (0)\n");
    }

    #[test]
    fn test_quit() {
        let mut session = Session::new(EngineConfig::default(), BufferKind::Text);
        let mut out = Vec::new();
        assert!(!session.execute(Command::Quit, &mut out).unwrap());
        assert!(out.is_empty());
    }
}
