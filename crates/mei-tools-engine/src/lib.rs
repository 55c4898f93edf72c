pub mod correlate;
pub mod events;
pub mod highlight;
pub mod render;
pub mod retry;
pub mod text;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use correlate::{IdentifierSite, identifier_at, identifiers, position_of_identifier};
pub use events::{EventDispatcher, ListenerId, TextEvent};
pub use highlight::{ColorError, HighlightColor};
pub use render::*;
pub use text::{Position, SourceEditor, TextBuffer, TextView};
