//! The services the render state machine drives: the notation engine that
//! turns markup into pages, and the surface that displays them.

use super::options::{RenderOptions, Size};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),
    #[error("Page {0} does not exist")]
    PageOutOfRange(u32),
    #[error("Rendering engine failure: {0}")]
    Engine(String),
}

/// Markup-to-notation conversion. Layout, glyph placement and pagination
/// happen behind this trait.
///
/// An instance is driven by one view at a time; hosts sharing an engine
/// between views must serialise access themselves.
pub trait RenderEngine {
    fn configure(&mut self, options: &RenderOptions) -> Result<(), RenderError>;

    /// Load new markup. Fails with [`RenderError::MalformedMarkup`] when the
    /// engine rejects it.
    fn submit(&mut self, markup: &str) -> Result<(), RenderError>;

    fn page_count(&self) -> u32;

    /// Render one 1-based page to graphical markup (SVG).
    fn render_page(&mut self, page: u32) -> Result<String, RenderError>;

    /// Recompute pagination for the loaded data under the current options.
    fn relayout(&mut self) -> Result<(), RenderError>;
}

/// Marks the rendered element matching the cursor.
pub trait HighlightConsumer {
    fn clear_highlight(&mut self);
    fn apply_highlight(&mut self, identifier: &str);
}

pub trait ContainerGeometry {
    /// Size of the notation container, or `None` while it does not exist yet.
    fn container_size(&self) -> Option<Size>;
}

/// What the container shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// A rendered page.
    Notation(String),
    /// Markup standing in for notation that could not be rendered.
    Placeholder(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationToggle {
    Enabled,
    /// The document is large enough that pagination cannot be turned off.
    Locked,
}

/// State of the controls surrounding the notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub pagination_toggle: PaginationToggle,
    pub navigation_visible: bool,
    pub page_label: String,
}

/// The UI side of a notation view.
pub trait Surface: HighlightConsumer + ContainerGeometry {
    /// Replace the container's content. Elements bound earlier are gone.
    fn show(&mut self, content: Content);

    /// Bind the click handler to every rendered element. Returns how many
    /// were bound; 0 means the render has not materialised yet.
    fn bind_click_targets(&mut self) -> usize;

    fn update_controls(&mut self, controls: &Controls);

    fn set_style(&mut self, css: &str);
}
