//! Ember Core - Text buffer and cursor-motion engine.
//!
//! This crate holds the editable text of an editor together with its cursor,
//! line index, marks and bookmarks. It has no knowledge of windows, rendering
//! or files: the shell hands it bytes and reads bytes back.

pub mod buffer;
pub mod config;
pub mod cursor;
mod editing;
pub mod line_index;
pub mod manager;
pub mod movement;
mod search;
mod selection;
pub mod store;

pub use buffer::{Buffer, BufferKind, TextBuffer};
pub use config::{ConfigError, EngineConfig};
pub use cursor::{Boundary, Cursor, CursorRect, Direction, Movement, Unit};
pub use line_index::{Bookmark, TextMetaData};
pub use manager::{BufferId, BufferManager};
pub use store::TextStore;
