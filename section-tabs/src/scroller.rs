use alloc::vec::Vec;

use crate::scroll::Layout;
use crate::{
    MeasurementCounts, MeasurementStore, OffsetTable, PendingScrollQueue, PositionCalculator,
    ScrollCoordinator, ScrollHost, ScrollResolution, ScrollToSectionOptions, ScrollerOptions,
    SectionDescriptor,
};

/// The position-resolution and scroll-coordination engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold the host list. Operations that may scroll borrow a [`ScrollHost`].
/// - It never reads a clock. Events carry `now_ms`, and the host calls [`Self::tick`] to run
///   due timers (debounced recomputation, retries, forced attempts).
///
/// Timers fire in logical time: work triggered by a timer is scheduled relative to that
/// timer's deadline, so the outcome does not depend on how often the host ticks.
#[derive(Clone, Debug)]
pub struct SectionScroller {
    options: ScrollerOptions,
    sections: Vec<SectionDescriptor>,
    generation: u64,

    store: MeasurementStore,
    calculator: PositionCalculator,
    offsets: OffsetTable,
    coordinator: ScrollCoordinator,

    /// Latched once per generation when every section is measured.
    ready: bool,
}

macro_rules! layout {
    ($self:ident) => {
        Layout {
            sections: &$self.sections,
            store: &$self.store,
            offsets: &$self.offsets,
            calculator: &$self.calculator,
        }
    };
}

impl SectionScroller {
    pub fn new(options: ScrollerOptions) -> Self {
        sdebug!(
            recompute_delay_ms = options.recompute_delay_ms,
            "SectionScroller::new"
        );
        Self {
            calculator: PositionCalculator::new(options.estimates, options.recompute_delay_ms),
            options,
            sections: Vec::new(),
            generation: 0,
            store: MeasurementStore::default(),
            offsets: OffsetTable::default(),
            coordinator: ScrollCoordinator::new(),
            ready: false,
        }
    }

    pub fn options(&self) -> &ScrollerOptions {
        &self.options
    }

    pub fn sections(&self) -> &[SectionDescriptor] {
        &self.sections
    }

    /// Incremented every time the section sequence changes or [`Self::reset`] is called.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn store(&self) -> &MeasurementStore {
        &self.store
    }

    pub fn calculator(&self) -> &PositionCalculator {
        &self.calculator
    }

    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    pub fn coordinator(&self) -> &ScrollCoordinator {
        &self.coordinator
    }

    pub fn pending(&self) -> &PendingScrollQueue {
        self.coordinator.pending()
    }

    pub fn counts(&self) -> MeasurementCounts {
        self.store.counts()
    }

    /// Whether "sections ready" has been signalled in this generation.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Readiness computed from the store as it is right now (not from the last pass).
    pub fn is_globally_ready(&self) -> bool {
        self.store.is_globally_ready(&self.sections)
    }

    pub fn is_section_fully_measured(&self, index: usize) -> bool {
        self.sections
            .get(index)
            .is_some_and(|s| self.store.is_section_fully_measured(s.index, s.item_count))
    }

    /// Replaces the section sequence.
    ///
    /// An identical sequence keeps all state. A different one starts a new generation:
    /// measurements, the offset table, readiness, pending corrections and every scheduled timer
    /// are dropped, then a recomputation is scheduled.
    ///
    /// Returns `true` when a new generation started.
    pub fn set_sections(
        &mut self,
        sections: impl IntoIterator<Item = SectionDescriptor>,
        now_ms: u64,
    ) -> bool {
        let sections: Vec<SectionDescriptor> = sections
            .into_iter()
            .enumerate()
            .map(|(position, s)| {
                if s.index != position {
                    swarn!(
                        position,
                        index = s.index,
                        "set_sections: section index does not match its position"
                    );
                }
                SectionDescriptor::new(position, s.item_count)
            })
            .collect();
        if sections == self.sections {
            return false;
        }
        self.sections = sections;
        self.start_generation(now_ms);
        true
    }

    /// Starts a new generation over the current section sequence.
    ///
    /// Use this when section content changed without changing item counts: measurements,
    /// readiness, pending corrections and scheduled timers are dropped as in
    /// [`Self::set_sections`].
    pub fn reset(&mut self, now_ms: u64) {
        self.start_generation(now_ms);
    }

    fn start_generation(&mut self, now_ms: u64) {
        self.generation = self.generation.wrapping_add(1);
        self.store.reshape(&self.sections);
        self.offsets.clear();
        self.ready = false;
        self.coordinator.reset();
        self.calculator.cancel();
        sdebug!(
            generation = self.generation,
            sections = self.sections.len(),
            "new section generation"
        );
        self.calculator.request(now_ms);
    }

    /// Header layout event. Returns `false` when the event was ignored.
    pub fn record_header_height(&mut self, section_index: usize, height: f32, now_ms: u64) -> bool {
        if !self.store.record_header_height(section_index, height) {
            return false;
        }
        self.calculator.request(now_ms);
        true
    }

    /// Item layout event. Returns `false` when the event was ignored (unknown section, item
    /// index not below the section's item count, or invalid height).
    pub fn record_item_height(
        &mut self,
        section_index: usize,
        item_index: usize,
        height: f32,
        now_ms: u64,
    ) -> bool {
        if !self.store.record_item_height(section_index, item_index, height) {
            return false;
        }
        self.calculator.request(now_ms);
        true
    }

    /// Schedules a debounced recomputation.
    pub fn request_recompute(&mut self, now_ms: u64) {
        self.calculator.request(now_ms);
    }

    /// Scrolls the host to section `index`.
    ///
    /// Fully measured sections resolve exactly (to their first item) and schedule nothing.
    /// Otherwise the host is scrolled to an estimate, the section is queued for correction, and
    /// the retry ladder plus forced timeout from `options` are scheduled.
    ///
    /// Out-of-range indices and unmounted hosts are ignored.
    pub fn scroll_to_section<H: ScrollHost + ?Sized>(
        &mut self,
        index: usize,
        options: ScrollToSectionOptions,
        now_ms: u64,
        host: &mut H,
    ) -> ScrollResolution {
        if index >= self.sections.len() {
            swarn!(
                index,
                count = self.sections.len(),
                "scroll_to_section: out-of-range section"
            );
            return ScrollResolution::Ignored;
        }
        let animated = self.options.animated;
        let layout = layout!(self);
        let step = self
            .coordinator
            .scroll_to_section(index, options, now_ms, &layout, host, animated);
        if step.request_recompute {
            self.calculator.request(now_ms);
        }
        step.resolution
    }

    /// Earliest deadline among the debounce and scroll timers.
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.calculator.deadline(), self.coordinator.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Runs every timer due at `now_ms`, in deadline order.
    ///
    /// On equal deadlines the recomputation runs before scroll attempts. Returns the next
    /// pending deadline so the host can arm a single real timer.
    pub fn tick<H: ScrollHost + ?Sized>(&mut self, now_ms: u64, host: &mut H) -> Option<u64> {
        loop {
            let recompute_at = self.calculator.deadline().filter(|&d| d <= now_ms);
            let attempt_at = self.coordinator.next_deadline().filter(|&d| d <= now_ms);
            match (recompute_at, attempt_at) {
                (None, None) => break,
                (Some(r), a) if a.is_none_or(|a| r <= a) => {
                    self.calculator.fire_if_due(now_ms);
                    self.run_pass(host);
                }
                _ => {
                    let Some((at_ms, attempt)) = self.coordinator.pop_due(now_ms) else {
                        break;
                    };
                    let animated = self.options.animated;
                    let layout = layout!(self);
                    let step = self.coordinator.fire(attempt, at_ms, &layout, host, animated);
                    if step.request_recompute {
                        self.calculator.request(at_ms);
                    }
                }
            }
        }
        self.next_deadline()
    }

    /// Rebuilds the offset table, latches readiness, and drains pending corrections.
    fn run_pass<H: ScrollHost + ?Sized>(&mut self, host: &mut H) {
        let recomputed = self.calculator.recompute(&self.sections, &self.store);
        self.offsets = recomputed.offsets;
        strace!(
            sections = self.sections.len(),
            total_height = self.offsets.total_height(),
            all_measured = recomputed.all_measured,
            "offset table recomputed"
        );

        if recomputed.all_measured && !self.ready {
            self.ready = true;
            sdebug!(generation = self.generation, "sections ready");
            if let Some(cb) = &self.options.on_sections_ready {
                cb();
            }
        }

        let animated = self.options.animated;
        let layout = layout!(self);
        self.coordinator.drain_pending(&layout, host, animated);
    }
}
