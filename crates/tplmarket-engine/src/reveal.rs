use chrono::{DateTime, Duration, Utc};

/// Fixed page size P for the reveal window.
pub const PAGE_SIZE: usize = 20;

/// Delay between a proximity trigger and the advance it schedules.
pub const PROXIMITY_DEBOUNCE_MS: i64 = 500;

/// Monotonically growing prefix window over the derived list.
///
/// Two advance paths: an explicit "load more" takes effect immediately; a
/// proximity trigger schedules a debounced advance and ignores further
/// triggers while one is in flight (guard, not a queue). The count is never
/// clamped to the list length; slicing past the end returns the whole list.
///
/// Time is injected so the debounce is testable without real timers.
#[derive(Debug, Clone)]
pub struct RevealWindow {
    visible_count: usize,
    page_size: usize,
    pending_advance: Option<DateTime<Utc>>,
}

impl Default for RevealWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealWindow {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            visible_count: page_size,
            page_size,
            pending_advance: None,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn in_flight(&self) -> bool {
        self.pending_advance.is_some()
    }

    /// Explicit "load more": advances by one page immediately.
    pub fn load_more(&mut self) {
        self.visible_count += self.page_size;
    }

    /// Proximity trigger: schedules a debounced advance unless one is
    /// already in flight. Returns whether a new advance was scheduled.
    pub fn sentinel_visible(&mut self, now: DateTime<Utc>) -> bool {
        if self.pending_advance.is_some() {
            return false;
        }
        self.pending_advance = Some(now + Duration::milliseconds(PROXIMITY_DEBOUNCE_MS));
        true
    }

    /// Applies a due scheduled advance. Returns whether the window grew.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        match self.pending_advance {
            Some(due) if now >= due => {
                self.pending_advance = None;
                self.visible_count += self.page_size;
                true
            }
            _ => false,
        }
    }

    /// Back to one page; any in-flight advance is dropped. Called on every
    /// filter-selection change.
    pub fn reset(&mut self) {
        self.visible_count = self.page_size;
        self.pending_advance = None;
    }

    /// The currently revealed prefix of `list`.
    pub fn visible<'a, T>(&self, list: &'a [T]) -> &'a [T] {
        &list[..list.len().min(self.visible_count)]
    }

    pub fn has_more(&self, list_len: usize) -> bool {
        self.visible_count < list_len
    }
}
