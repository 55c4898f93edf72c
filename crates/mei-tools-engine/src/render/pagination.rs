use std::fmt;

/// Current page and page count. `1 <= current <= count` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current: u32,
    count: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current: 1,
            count: 1,
        }
    }
}

impl Pagination {
    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Record a freshly computed page count; a current page that no longer
    /// exists resets to the first page.
    pub fn set_count(&mut self, count: u32) {
        self.count = count.max(1);
        if self.current > self.count {
            self.current = 1;
        }
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Move to `page` if it exists. Returns `false` and leaves the state
    /// untouched otherwise.
    pub fn go_to(&mut self, page: u32) -> bool {
        if (1..=self.count).contains(&page) {
            self.current = page;
            true
        } else {
            false
        }
    }

    /// The page a navigation request lands on, or `None` when the request is
    /// a no-op (already at the edge, or outside `1..=count`).
    pub fn resolve(&self, request: PageRequest) -> Option<u32> {
        let target = match request {
            PageRequest::First => 1,
            PageRequest::Last => self.count,
            PageRequest::Next if self.current < self.count => self.current + 1,
            PageRequest::Prev if self.current > 1 => self.current - 1,
            PageRequest::Next | PageRequest::Prev => return None,
            PageRequest::Number(n) => {
                let page = n.round().abs();
                if !page.is_finite() || page > f64::from(u32::MAX) {
                    return None;
                }
                page as u32
            }
        };
        (1..=self.count).contains(&target).then_some(target)
    }
}

impl fmt::Display for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {} of {}", self.current, self.count)
    }
}

/// A page navigation request from the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageRequest {
    First,
    Prev,
    Next,
    Last,
    /// An explicit page; the rounded absolute value is used.
    Number(f64),
}
