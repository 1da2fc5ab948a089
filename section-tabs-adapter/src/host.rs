use section_tabs::ScrollHost;

/// The full host list surface a [`crate::Controller`] proxies to.
///
/// `scroll_to_offset` and `is_mounted` come from [`ScrollHost`]; the rest are pass-through
/// primitives with no added semantics.
pub trait ListHost: ScrollHost {
    fn scroll_to_end(&mut self, animated: bool);

    /// Scrolls to a flat item index as the host list counts it.
    fn scroll_to_index(&mut self, index: usize, animated: bool);

    /// Scrolls to an item addressed by section and position within that section.
    fn scroll_to_location(&mut self, section_index: usize, item_index: usize, animated: bool);

    fn flash_scroll_indicators(&mut self);
}

/// Stand-in used while no host list is mounted.
pub(crate) struct Detached;

impl ScrollHost for Detached {
    fn is_mounted(&self) -> bool {
        false
    }

    fn scroll_to_offset(&mut self, _offset: f32, _animated: bool) {}
}
