//! Test doubles shared by the unit tests.

use crate::render::{
    ContainerGeometry, Content, Controls, HighlightConsumer, RenderEngine, RenderError,
    RenderOptions, Size, Surface,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCall {
    Configure,
    Submit,
    Relayout,
    RenderPage(u32),
}

/// Records every call. Markup that does not start with an element is
/// rejected the way a real engine rejects malformed input.
#[derive(Debug, Default)]
pub struct FakeEngine {
    pub calls: Vec<EngineCall>,
    pub configured: Option<RenderOptions>,
    /// Page count reported after the next submit or relayout.
    pub pages: u32,
    pub fail_render: bool,
    loaded_pages: u32,
}

impl FakeEngine {
    pub fn with_pages(pages: u32) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }
}

impl RenderEngine for FakeEngine {
    fn configure(&mut self, options: &RenderOptions) -> Result<(), RenderError> {
        self.calls.push(EngineCall::Configure);
        self.configured = Some(options.clone());
        Ok(())
    }

    fn submit(&mut self, markup: &str) -> Result<(), RenderError> {
        self.calls.push(EngineCall::Submit);
        if !markup.trim_start().starts_with('<') {
            return Err(RenderError::MalformedMarkup(format!(
                "content before root element: {}",
                markup.lines().next().unwrap_or_default()
            )));
        }
        self.loaded_pages = self.pages;
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.loaded_pages
    }

    fn render_page(&mut self, page: u32) -> Result<String, RenderError> {
        self.calls.push(EngineCall::RenderPage(page));
        if self.fail_render {
            return Err(RenderError::Engine("layout exploded".to_string()));
        }
        if page == 0 || page > self.loaded_pages {
            return Err(RenderError::PageOutOfRange(page));
        }
        Ok(format!("<svg><g id=\"page-{page}\"/></svg>"))
    }

    fn relayout(&mut self) -> Result<(), RenderError> {
        self.calls.push(EngineCall::Relayout);
        self.loaded_pages = self.pages;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakeSurface {
    pub size: Option<Size>,
    pub shown: Vec<Content>,
    /// Elements reported by the next `bind_click_targets`.
    pub targets: usize,
    pub bind_calls: usize,
    pub bound: usize,
    pub highlighted: Option<String>,
    pub controls: Option<Controls>,
    pub style: Option<String>,
}

impl FakeSurface {
    pub fn ready(size: Size) -> Self {
        Self {
            size: Some(size),
            targets: 8,
            ..Self::default()
        }
    }
}

impl HighlightConsumer for FakeSurface {
    fn clear_highlight(&mut self) {
        self.highlighted = None;
    }

    fn apply_highlight(&mut self, identifier: &str) {
        self.highlighted = Some(identifier.to_string());
    }
}

impl ContainerGeometry for FakeSurface {
    fn container_size(&self) -> Option<Size> {
        self.size
    }
}

impl Surface for FakeSurface {
    fn show(&mut self, content: Content) {
        self.bound = 0;
        self.shown.push(content);
    }

    fn bind_click_targets(&mut self) -> usize {
        self.bind_calls += 1;
        self.bound = self.targets;
        self.bound
    }

    fn update_controls(&mut self, controls: &Controls) {
        self.controls = Some(controls.clone());
    }

    fn set_style(&mut self, css: &str) {
        self.style = Some(css.to_string());
    }
}

/// A single-measure score with `staffs` staff elements.
pub fn staff_document(staffs: usize) -> String {
    let mut doc = String::from("<mei>\n<music>\n<measure xml:id=\"m1\">\n");
    for n in 1..=staffs {
        doc.push_str(&format!("<staff n=\"{n}\">\n<layer><note/></layer>\n</staff>\n"));
    }
    doc.push_str("</measure>\n</music>\n</mei>");
    doc
}
