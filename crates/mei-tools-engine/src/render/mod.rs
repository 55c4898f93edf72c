//! Render configuration, pagination, and the state machine that drives the
//! notation engine for one open document.

pub mod engine;
pub mod options;
pub mod pagination;
pub mod view;

pub use engine::{
    ContainerGeometry, Content, Controls, HighlightConsumer, PaginationToggle, RenderEngine,
    RenderError, Surface,
};
pub use options::{OptionsDelta, RenderOptions, Size};
pub use pagination::{PageRequest, Pagination};
pub use view::{DIAGNOSTIC_MESSAGE, NotationView, ViewSettings, ViewState};
