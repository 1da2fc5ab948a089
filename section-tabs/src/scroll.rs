use alloc::vec::Vec;

use crate::timer::TimerQueue;
use crate::{
    MeasurementStore, OffsetTable, PositionCalculator, ScrollHost, ScrollResolution,
    ScrollToSectionOptions, SectionDescriptor,
};

/// Borrowed view of everything needed to resolve a section to a scroll offset.
pub(crate) struct Layout<'a> {
    pub(crate) sections: &'a [SectionDescriptor],
    pub(crate) store: &'a MeasurementStore,
    pub(crate) offsets: &'a OffsetTable,
    pub(crate) calculator: &'a PositionCalculator,
}

impl Layout<'_> {
    fn is_fully_measured(&self, index: usize) -> bool {
        self.sections
            .get(index)
            .is_some_and(|s| self.store.is_section_fully_measured(s.index, s.item_count))
    }

    /// Resolves `index` to the offset of its first item (exact) or to an estimate of it.
    ///
    /// Returns `None` for out-of-range sections.
    fn resolve(&self, index: usize) -> Option<ScrollResolution> {
        let section = self.sections.get(index)?;
        if let Some(header) = self
            .store
            .section(index)
            .filter(|m| m.is_fully_measured(section.item_count))
            .and_then(|m| m.header_height())
        {
            let start = match self.offsets.get(index) {
                Some(start) if self.offsets.is_current(self.store) => start,
                _ => self.calculator.section_start(index, self.sections, self.store),
            };
            return Some(ScrollResolution::Exact(start + header));
        }
        let start = self.calculator.section_start(index, self.sections, self.store);
        Some(ScrollResolution::Estimated(
            start + self.calculator.estimates().header_height,
        ))
    }
}

/// Sections whose latest scroll used an estimate and still await a correction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingScrollQueue {
    sections: Vec<usize>,
}

impl PendingScrollQueue {
    pub fn contains(&self, section_index: usize) -> bool {
        self.sections.contains(&section_index)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Queued sections in enqueue order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.sections.iter().copied()
    }

    pub(crate) fn push(&mut self, section_index: usize) -> bool {
        if self.contains(section_index) {
            return false;
        }
        self.sections.push(section_index);
        true
    }

    pub(crate) fn remove(&mut self, section_index: usize) -> bool {
        let before = self.sections.len();
        self.sections.retain(|&s| s != section_index);
        self.sections.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.sections.clear();
    }
}

/// Identity of one scroll-to-section call that is still waiting on timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct ScrollRequestId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ScrollAttempt {
    request: ScrollRequestId,
    attempt: u32,
    forced: bool,
}

#[derive(Clone, Debug)]
struct ScrollRequest {
    id: ScrollRequestId,
    section: usize,
    max_retries: u32,
    retry_delay_ms: u64,
    /// An exact scroll has been issued for `section`; remaining timers are no-ops.
    resolved: bool,
    ladder_pending: bool,
    forced_pending: bool,
}

impl ScrollRequest {
    fn is_live(&self) -> bool {
        self.ladder_pending || self.forced_pending
    }
}

/// Outcome of a coordinator step that the engine has to act on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Step {
    pub(crate) resolution: ScrollResolution,
    /// An estimate was used; a calculator pass should be requested to speed up convergence.
    pub(crate) request_recompute: bool,
}

impl Step {
    const IGNORED: Self = Self {
        resolution: ScrollResolution::Ignored,
        request_recompute: false,
    };
}

/// Drives scroll-to-section requests: immediate resolution, the exponential-backoff retry
/// ladder, the forced final attempt, and pending-queue corrections.
#[derive(Clone, Debug, Default)]
pub struct ScrollCoordinator {
    timers: TimerQueue<ScrollAttempt>,
    requests: Vec<ScrollRequest>,
    pending: PendingScrollQueue,
    next_request: u64,
}

impl ScrollCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &PendingScrollQueue {
        &self.pending
    }

    /// Number of requests that still have a retry or forced attempt scheduled.
    pub fn in_flight(&self) -> usize {
        self.requests.len()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Drops every request, timer, and pending correction.
    pub fn reset(&mut self) {
        self.timers.clear();
        self.requests.clear();
        self.pending.clear();
    }

    pub(crate) fn pop_due(&mut self, now_ms: u64) -> Option<(u64, ScrollAttempt)> {
        self.timers.pop_due(now_ms)
    }

    fn mark_resolved(&mut self, section: usize) {
        for request in self.requests.iter_mut().filter(|r| r.section == section) {
            request.resolved = true;
        }
    }

    /// Resolves and scrolls once. Returns `None` when nothing was scrolled.
    fn perform<H: ScrollHost + ?Sized>(
        &mut self,
        section: usize,
        layout: &Layout<'_>,
        host: &mut H,
        animated: bool,
    ) -> Option<ScrollResolution> {
        if !host.is_mounted() {
            swarn!(section, "scroll skipped: host not mounted");
            return None;
        }
        let resolution = layout.resolve(section)?;
        match resolution {
            ScrollResolution::Exact(y) => {
                sdebug!(section, y, "scroll to section (exact)");
                host.scroll_to_offset(y, animated);
                self.pending.remove(section);
                self.mark_resolved(section);
            }
            ScrollResolution::Estimated(y) => {
                sdebug!(section, y, "scroll to section (estimated)");
                host.scroll_to_offset(y, animated);
                self.pending.push(section);
            }
            ScrollResolution::Ignored => {}
        }
        Some(resolution)
    }

    pub(crate) fn scroll_to_section<H: ScrollHost + ?Sized>(
        &mut self,
        section: usize,
        options: ScrollToSectionOptions,
        now_ms: u64,
        layout: &Layout<'_>,
        host: &mut H,
        animated: bool,
    ) -> Step {
        let Some(resolution) = self.perform(section, layout, host, animated) else {
            return Step::IGNORED;
        };
        if resolution.is_exact() {
            return Step {
                resolution,
                request_recompute: false,
            };
        }

        let id = ScrollRequestId(self.next_request);
        self.next_request = self.next_request.wrapping_add(1);
        let mut request = ScrollRequest {
            id,
            section,
            max_retries: options.max_retries_for(section),
            retry_delay_ms: options.retry_delay_ms,
            resolved: false,
            ladder_pending: false,
            forced_pending: false,
        };
        if request.max_retries > 0 {
            let at = now_ms.saturating_add(ScrollToSectionOptions::backoff_ms(
                request.retry_delay_ms,
                0,
            ));
            self.timers.schedule(
                at,
                ScrollAttempt {
                    request: id,
                    attempt: 1,
                    forced: false,
                },
            );
            request.ladder_pending = true;
        }
        if options.timeout_ms > 0 {
            self.timers.schedule(
                now_ms.saturating_add(options.timeout_ms),
                ScrollAttempt {
                    request: id,
                    attempt: request.max_retries,
                    forced: true,
                },
            );
            request.forced_pending = true;
        }
        strace!(
            section,
            max_retries = request.max_retries,
            timeout_ms = options.timeout_ms,
            "scroll request registered"
        );
        if request.is_live() {
            self.requests.push(request);
        }
        Step {
            resolution,
            request_recompute: true,
        }
    }

    /// Runs a due retry or forced attempt that was scheduled for `at_ms`.
    ///
    /// Follow-up retries are scheduled relative to `at_ms`.
    pub(crate) fn fire<H: ScrollHost + ?Sized>(
        &mut self,
        attempt: ScrollAttempt,
        at_ms: u64,
        layout: &Layout<'_>,
        host: &mut H,
        animated: bool,
    ) -> Step {
        let Some(pos) = self.requests.iter().position(|r| r.id == attempt.request) else {
            return Step::IGNORED;
        };
        let request = &mut self.requests[pos];
        if attempt.forced {
            request.forced_pending = false;
        } else {
            request.ladder_pending = false;
        }
        let (section, resolved) = (request.section, request.resolved);

        let mut step = Step::IGNORED;
        if resolved {
            strace!(section, attempt = attempt.attempt, "attempt skipped: already exact");
        } else if let Some(resolution) = self.perform(section, layout, host, animated) {
            step.resolution = resolution;
            if !resolution.is_exact() {
                step.request_recompute = true;
                // `perform` does not move requests, so `pos` is still valid.
                let request = &mut self.requests[pos];
                if !attempt.forced && attempt.attempt < request.max_retries {
                    let at = at_ms.saturating_add(ScrollToSectionOptions::backoff_ms(
                        request.retry_delay_ms,
                        attempt.attempt,
                    ));
                    self.timers.schedule(
                        at,
                        ScrollAttempt {
                            request: attempt.request,
                            attempt: attempt.attempt + 1,
                            forced: false,
                        },
                    );
                    request.ladder_pending = true;
                }
            }
        }

        self.requests.retain(ScrollRequest::is_live);
        step
    }

    /// Corrects every pending section that has become fully measured.
    ///
    /// Returns the number of corrective scrolls issued. Entries stay queued while the host is
    /// unmounted.
    pub(crate) fn drain_pending<H: ScrollHost + ?Sized>(
        &mut self,
        layout: &Layout<'_>,
        host: &mut H,
        animated: bool,
    ) -> usize {
        if self.pending.is_empty() || !host.is_mounted() {
            return 0;
        }
        let ready: Vec<usize> = self
            .pending
            .iter()
            .filter(|&s| layout.is_fully_measured(s))
            .collect();
        let mut issued = 0;
        for section in ready {
            if let Some(ScrollResolution::Exact(y)) = layout.resolve(section) {
                sdebug!(section, y, "pending scroll corrected");
                host.scroll_to_offset(y, animated);
                issued += 1;
            }
            self.pending.remove(section);
            self.mark_resolved(section);
        }
        issued
    }
}
