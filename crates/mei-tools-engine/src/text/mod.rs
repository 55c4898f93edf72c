//! Line-addressable text: positions, the rope-backed buffer, and an editor
//! that raises settle/cursor notifications.

pub mod buffer;
pub mod editor;
pub mod position;

pub use buffer::{TextBuffer, TextView};
pub use editor::SourceEditor;
pub use position::{Position, PositionParseError};
