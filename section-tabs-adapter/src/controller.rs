use section_tabs::{
    ScrollResolution, ScrollToSectionOptions, ScrollerOptions, SectionDescriptor, SectionScroller,
};

use crate::host::Detached;
use crate::{ActiveTab, ListHost};

/// A framework-neutral widget shell around [`SectionScroller`].
///
/// This type holds the host list once it is mounted. Adapters drive it by calling:
/// - `on_header_layout` / `on_item_layout` when the list reports realized heights
/// - `on_tab_press`, `on_viewable_items_changed`, `on_momentum_scroll_end` for tab tracking
/// - `tick(now_ms)` from the event loop (or when the deadline it returned is reached)
///
/// Every operation that would touch the host is a silent no-op while nothing is mounted.
#[derive(Clone, Debug)]
pub struct Controller<H> {
    scroller: SectionScroller,
    host: Option<H>,
    active: ActiveTab,
}

impl<H: ListHost> Controller<H> {
    pub fn new(options: ScrollerOptions) -> Self {
        Self::from_scroller(SectionScroller::new(options))
    }

    pub fn from_scroller(scroller: SectionScroller) -> Self {
        Self {
            scroller,
            host: None,
            active: ActiveTab::default(),
        }
    }

    pub fn scroller(&self) -> &SectionScroller {
        &self.scroller
    }

    pub fn scroller_mut(&mut self) -> &mut SectionScroller {
        &mut self.scroller
    }

    pub fn into_scroller(self) -> SectionScroller {
        self.scroller
    }

    /// Attaches the host list, returning the previously mounted one.
    pub fn mount(&mut self, host: H) -> Option<H> {
        adebug!("host mounted");
        self.host.replace(host)
    }

    pub fn unmount(&mut self) -> Option<H> {
        adebug!("host unmounted");
        self.host.take()
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    pub fn is_mounted(&self) -> bool {
        self.host.as_ref().is_some_and(|h| h.is_mounted())
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.active
    }

    pub fn active_index(&self) -> usize {
        self.active.index
    }

    /// Whether "sections ready" has been signalled for the current sections.
    pub fn sections_ready(&self) -> bool {
        self.scroller.is_ready()
    }

    /// Replaces the sections. The active tab falls back to the first section when its index no
    /// longer exists.
    pub fn set_sections(
        &mut self,
        sections: impl IntoIterator<Item = SectionDescriptor>,
        now_ms: u64,
    ) -> bool {
        let changed = self.scroller.set_sections(sections, now_ms);
        if self.active.index >= self.scroller.sections().len() {
            self.active = ActiveTab::default();
        }
        changed
    }

    /// Drops every measurement of the current sections and starts over, keeping the active tab.
    pub fn reset(&mut self, now_ms: u64) {
        self.scroller.reset(now_ms);
    }

    pub fn on_header_layout(&mut self, section_index: usize, height: f32, now_ms: u64) -> bool {
        self.scroller.record_header_height(section_index, height, now_ms)
    }

    pub fn on_item_layout(
        &mut self,
        section_index: usize,
        item_index: usize,
        height: f32,
        now_ms: u64,
    ) -> bool {
        self.scroller
            .record_item_height(section_index, item_index, height, now_ms)
    }

    /// Scrolls to `index` with an explicit retry policy.
    pub fn scroll_to_section(
        &mut self,
        index: usize,
        options: ScrollToSectionOptions,
        now_ms: u64,
    ) -> ScrollResolution {
        match self.host.as_mut() {
            Some(host) => self.scroller.scroll_to_section(index, options, now_ms, host),
            None => {
                awarn!(index, "scroll_to_section: no host mounted");
                ScrollResolution::Ignored
            }
        }
    }

    /// A tab press: highlights the tab immediately, suppresses viewability updates until the
    /// momentum scroll ends, and scrolls with the default retry policy.
    ///
    /// Out-of-range indices are ignored.
    pub fn on_tab_press(&mut self, index: usize, now_ms: u64) -> ScrollResolution {
        if index >= self.scroller.sections().len() {
            awarn!(
                index,
                count = self.scroller.sections().len(),
                "on_tab_press: out-of-range tab"
            );
            return ScrollResolution::Ignored;
        }
        adebug!(index, "tab pressed");
        self.active.press(index);
        self.scroll_to_section(index, ScrollToSectionOptions::default(), now_ms)
    }

    /// Viewability report carrying the section that owns the first visible item.
    ///
    /// Returns `true` if the active tab changed.
    pub fn on_viewable_items_changed(&mut self, first_visible_section: Option<usize>) -> bool {
        let Some(section_index) = first_visible_section else {
            return false;
        };
        if section_index >= self.scroller.sections().len() {
            return false;
        }
        self.active.on_viewable(section_index)
    }

    pub fn on_momentum_scroll_end(&mut self) {
        self.active.release();
    }

    /// Runs due timers. Returns the next deadline, if any.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        match self.host.as_mut() {
            Some(host) => self.scroller.tick(now_ms, host),
            None => self.scroller.tick(now_ms, &mut Detached),
        }
    }

    pub fn scroll_to_offset(&mut self, offset: f32, animated: bool) {
        if let Some(host) = self.host.as_mut().filter(|h| h.is_mounted()) {
            host.scroll_to_offset(offset, animated);
        }
    }

    pub fn scroll_to_end(&mut self, animated: bool) {
        if let Some(host) = self.host.as_mut().filter(|h| h.is_mounted()) {
            host.scroll_to_end(animated);
        }
    }

    pub fn scroll_to_index(&mut self, index: usize, animated: bool) {
        if let Some(host) = self.host.as_mut().filter(|h| h.is_mounted()) {
            host.scroll_to_index(index, animated);
        }
    }

    pub fn scroll_to_location(&mut self, section_index: usize, item_index: usize, animated: bool) {
        if let Some(host) = self.host.as_mut().filter(|h| h.is_mounted()) {
            host.scroll_to_location(section_index, item_index, animated);
        }
    }

    pub fn flash_scroll_indicators(&mut self) {
        if let Some(host) = self.host.as_mut().filter(|h| h.is_mounted()) {
            host.flash_scroll_indicators();
        }
    }
}
