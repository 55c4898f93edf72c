use std::time::{Duration, Instant};

use crate::correlate;
use crate::highlight::{ColorError, HighlightColor};
use crate::retry::Retry;
use crate::text::{Position, TextView};

use super::engine::{Content, Controls, PaginationToggle, RenderEngine, RenderError, Surface};
use super::options::{OptionsDelta, RenderOptions, Size};
use super::pagination::{PageRequest, Pagination};

/// Shown in place of the notation whenever the engine fails.
pub const DIAGNOSTIC_MESSAGE: &str = "If your notation fails to load, your markup may contain errors or it may be incompatible with the rendering engine.";

pub const DEFAULT_STAFF_THRESHOLD: usize = 100;

/// Container size assumed when a paginated layout runs before the
/// container reports one.
const FALLBACK_CONTAINER: Size = Size::new(100, 100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// No document loaded yet.
    Empty,
    Loaded,
    /// A page is being rendered.
    Rendering,
    /// The engine failed; a placeholder is shown. The next successful render
    /// recovers without an explicit reset.
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    /// Documents with more `<staff>` openings than this are always paginated.
    pub staff_threshold: usize,
    pub attach_retry: Duration,
    pub container_retry: Duration,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            staff_threshold: DEFAULT_STAFF_THRESHOLD,
            attach_retry: Duration::from_millis(50),
            container_retry: Duration::from_millis(100),
        }
    }
}

/// The render state machine for one open document.
///
/// Owns the engine, the surface, the render options and the pagination
/// state. Each trigger method runs the minimal sequence of
/// reconfigure / resubmit / relayout / repaint steps, then rebinds click
/// targets and recomputes the highlight.
#[derive(Debug)]
pub struct NotationView<E, S> {
    engine: E,
    surface: S,
    settings: ViewSettings,
    options: RenderOptions,
    /// Options as last pushed to the engine.
    pushed: Option<RenderOptions>,
    pagination: Pagination,
    state: ViewState,
    has_data: bool,
    pagination_locked: bool,
    highlighted: Option<String>,
    highlight_color: HighlightColor,
    container_retry: Retry,
    attach_retry: Retry,
}

impl<E: RenderEngine, S: Surface> NotationView<E, S> {
    pub fn new(engine: E, surface: S, options: RenderOptions, settings: ViewSettings) -> Self {
        Self {
            engine,
            surface,
            options,
            pushed: None,
            pagination: Pagination::default(),
            state: ViewState::Empty,
            has_data: false,
            pagination_locked: false,
            highlighted: None,
            highlight_color: HighlightColor::default(),
            container_retry: Retry::new(settings.container_retry),
            attach_retry: Retry::new(settings.attach_retry),
            settings,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn is_pagination_locked(&self) -> bool {
        self.pagination_locked
    }

    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_deref()
    }

    pub fn highlight_color(&self) -> &HighlightColor {
        &self.highlight_color
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// First render of a newly opened document. Waits for the container if
    /// it does not exist yet; `poll` finishes the job once it does.
    pub fn open(&mut self, text: &dyn TextView, now: Instant) {
        self.enforce_large_document(&text.text());
        self.pagination.reset();

        if self.surface.container_size().is_none() {
            log::debug!("notation container not ready, deferring first render");
            self.container_retry.arm(now);
            return;
        }
        self.container_retry.disarm();
        self.load(text);
    }

    /// New content: resubmit and repaint.
    pub fn content_settled(&mut self, text: &dyn TextView) {
        self.enforce_large_document(&text.text());
        if self.container_retry.is_armed() {
            // The pending first render will pick up the latest text.
            return;
        }
        self.load(text);
    }

    /// Zoom or layout mode changed.
    pub fn change_options(&mut self, mut delta: OptionsDelta, text: &dyn TextView) {
        if self.pagination_locked && delta.paginate == Some(false) {
            log::info!("pagination is locked on for this document, ignoring request to disable it");
            delta.paginate = None;
        }
        if self.options.merge(delta) {
            self.pagination.reset();
        }
        self.relayout(text);
    }

    /// The container changed size. Only a paginated layout depends on it.
    pub fn container_resized(&mut self, text: &dyn TextView) {
        if self.options.paginate {
            self.relayout(text);
        }
    }

    pub fn navigate(&mut self, request: PageRequest, text: &dyn TextView) {
        if !self.has_data {
            return;
        }
        let Some(target) = self.pagination.resolve(request) else {
            log::debug!("ignoring {request:?} at {}", self.pagination);
            return;
        };

        let previous = self.pagination.current();
        self.pagination.go_to(target);
        let result = self.render_current_page();
        if result.is_err() {
            self.pagination.go_to(previous);
        }
        self.finish(result, text);
    }

    /// The cursor moved without a content change.
    pub fn cursor_moved(&mut self, text: &dyn TextView) {
        self.update_highlight(text);
    }

    /// Where the cursor should go for a click on the rendered element
    /// `identifier`. The host places the cursor, which in turn comes back
    /// through [`Self::cursor_moved`].
    pub fn locate(&self, identifier: &str, text: &dyn TextView) -> Option<Position> {
        correlate::position_of_identifier(text, identifier)
    }

    pub fn set_highlight_color(&mut self, color: &str) -> Result<(), ColorError> {
        let color: HighlightColor = color.parse()?;
        self.surface.set_style(&color.css());
        self.highlight_color = color;
        Ok(())
    }

    /// Run any retry that is due. Hosts call this from their timer.
    ///
    /// `now` must come from [`Instant::now`]: click-target retries are armed
    /// from the same monotonic clock when a render finishes.
    pub fn poll(&mut self, now: Instant, text: &dyn TextView) {
        if self.container_retry.is_due(now) {
            if self.surface.container_size().is_some() {
                log::debug!(
                    "notation container ready after {} attempt(s)",
                    self.container_retry.attempts()
                );
                self.container_retry.disarm();
                self.load(text);
            } else {
                self.container_retry.arm(now);
            }
        }

        if self.attach_retry.is_due(now) && self.attach_click_targets(now) {
            // The highlight was applied before the elements existed.
            if let Some(id) = &self.highlighted {
                self.surface.apply_highlight(id);
            }
        }
    }

    fn load(&mut self, text: &dyn TextView) {
        let result = self
            .sync_options(false)
            .and_then(|()| self.submit(text))
            .and_then(|()| self.render_current_page());
        self.finish(result, text);
    }

    fn relayout(&mut self, text: &dyn TextView) {
        let result = self.sync_options(true).and_then(|()| {
            if !self.has_data {
                return Ok(());
            }
            self.engine.relayout()?;
            self.pagination.set_count(self.engine.page_count());
            self.render_current_page()
        });
        if self.has_data {
            self.finish(result, text);
        } else if let Err(err) = result {
            self.fail(&err);
        } else {
            self.publish_controls();
        }
    }

    /// Push the options to the engine, refreshing page dimensions first when
    /// paginated. Without `force`, unchanged options are not pushed again.
    fn sync_options(&mut self, force: bool) -> Result<(), RenderError> {
        if self.options.paginate {
            let size = self.surface.container_size().unwrap_or(FALLBACK_CONTAINER);
            self.options.fit_to_container(size);
        }
        if force || self.pushed.as_ref() != Some(&self.options) {
            log::debug!("configuring engine: {:?}", self.options);
            self.engine.configure(&self.options)?;
            self.pushed = Some(self.options.clone());
        }
        Ok(())
    }

    fn submit(&mut self, text: &dyn TextView) -> Result<(), RenderError> {
        self.engine.submit(&text.text())?;
        self.has_data = true;
        self.pagination.set_count(self.engine.page_count());
        Ok(())
    }

    fn render_current_page(&mut self) -> Result<(), RenderError> {
        self.state = ViewState::Rendering;
        let markup = self.engine.render_page(self.pagination.current())?;
        self.surface.show(Content::Notation(markup));
        self.state = ViewState::Loaded;
        self.publish_controls();
        Ok(())
    }

    fn finish(&mut self, result: Result<(), RenderError>, text: &dyn TextView) {
        match result {
            Ok(()) => {
                self.attach_click_targets(Instant::now());
                self.update_highlight(text);
            }
            Err(err) => self.fail(&err),
        }
    }

    fn fail(&mut self, err: &RenderError) {
        log::warn!("rendering failed: {err}");
        self.attach_retry.disarm();
        self.state = ViewState::Error {
            message: DIAGNOSTIC_MESSAGE.to_string(),
        };
        self.surface.show(Content::Placeholder(placeholder_markup(err)));
    }

    /// Returns `true` once the click targets are bound.
    fn attach_click_targets(&mut self, now: Instant) -> bool {
        let bound = self.surface.bind_click_targets();
        if bound > 0 {
            log::trace!("bound {bound} click target(s)");
            self.attach_retry.disarm();
            true
        } else {
            self.attach_retry.arm(now);
            log::debug!(
                "no rendered elements yet, retry #{} in {:?}",
                self.attach_retry.attempts(),
                self.attach_retry.interval()
            );
            false
        }
    }

    fn update_highlight(&mut self, text: &dyn TextView) {
        let id = correlate::identifier_at(text, text.cursor());
        self.surface.clear_highlight();
        if let Some(id) = &id {
            self.surface.apply_highlight(id);
        }
        self.highlighted = id;
    }

    /// Large scores are expensive to lay out as one continuous flow: past the
    /// staff threshold pagination is forced on and cannot be turned off.
    fn enforce_large_document(&mut self, markup: &str) {
        let staffs = correlate::count_staff_openings(markup);
        let locked = staffs > self.settings.staff_threshold;
        if locked && !self.options.paginate {
            log::info!(
                "{staffs} staffs exceed the threshold of {}, forcing pagination",
                self.settings.staff_threshold
            );
            self.options.paginate = true;
            self.pagination.reset();
        }
        self.pagination_locked = locked;
        self.publish_controls();
    }

    fn publish_controls(&mut self) {
        let controls = Controls {
            pagination_toggle: if self.pagination_locked {
                PaginationToggle::Locked
            } else {
                PaginationToggle::Enabled
            },
            navigation_visible: self.options.paginate,
            page_label: self.pagination.to_string(),
        };
        self.surface.update_controls(&controls);
    }
}

fn placeholder_markup(err: &RenderError) -> String {
    format!(
        "<h2>{DIAGNOSTIC_MESSAGE}</h2>\n<pre>{}</pre>",
        html_escape::encode_text(&err.to_string())
    )
}
