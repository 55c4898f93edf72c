use serde::{Deserialize, Serialize};

pub const MIN_SCALE: u32 = 20;
pub const MAX_SCALE: u32 = 200;
pub const DEFAULT_SCALE: u32 = 45;
/// Page dimensions never drop below this, whatever the container size.
pub const MIN_PAGE_DIMENSION: u32 = 100;

/// Rendered size of the notation container, in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The configuration pushed to the rendering engine.
///
/// `page_width`/`page_height` only matter when `paginate` is set, and are
/// then derived from the container size on every layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    pub border: u32,
    pub adjust_page_height: bool,
    pub ignore_layout: bool,
    pub scale: u32,
    pub paginate: bool,
    pub page_width: u32,
    pub page_height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            border: 0,
            adjust_page_height: true,
            ignore_layout: true,
            scale: DEFAULT_SCALE,
            paginate: true,
            page_width: MIN_PAGE_DIMENSION,
            page_height: MIN_PAGE_DIMENSION,
        }
    }
}

/// The option keys a single trigger may change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionsDelta {
    pub scale: Option<u32>,
    pub paginate: Option<bool>,
}

impl OptionsDelta {
    pub fn scale(scale: u32) -> Self {
        Self {
            scale: Some(scale),
            ..Self::default()
        }
    }

    pub fn paginate(paginate: bool) -> Self {
        Self {
            paginate: Some(paginate),
            ..Self::default()
        }
    }
}

impl RenderOptions {
    /// Apply `delta`, clamping the scale into range.
    ///
    /// Returns `true` if the pagination mode flipped.
    pub fn merge(&mut self, delta: OptionsDelta) -> bool {
        if let Some(scale) = delta.scale {
            self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        }
        match delta.paginate {
            Some(paginate) if paginate != self.paginate => {
                self.paginate = paginate;
                true
            }
            _ => false,
        }
    }

    /// Derive page dimensions from the container: the container size in
    /// engine units at the current scale, never below the minimum.
    pub fn fit_to_container(&mut self, size: Size) {
        self.page_width = scaled_dimension(size.width, self.scale);
        self.page_height = scaled_dimension(size.height, self.scale);
    }
}

fn scaled_dimension(pixels: u32, scale: u32) -> u32 {
    let scale = scale.clamp(MIN_SCALE, MAX_SCALE);
    let units = (f64::from(pixels) * 100.0 / f64::from(scale)).round() as u32;
    units.max(MIN_PAGE_DIMENSION)
}
