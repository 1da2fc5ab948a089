use alloc::vec::Vec;

use crate::timer::Debounce;
use crate::{Estimates, MeasurementStore, SectionDescriptor};

/// Start offset of every section's header, computed from one store snapshot.
///
/// Rebuilt wholesale by each calculator pass; never patched in place.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetTable {
    starts: Vec<f32>,
    total_height: f32,
    revision: u64,
}

impl OffsetTable {
    /// Start offset of section `index`'s header.
    pub fn get(&self, index: usize) -> Option<f32> {
        self.starts.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.starts
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Height of all sections together (measured or estimated).
    pub fn total_height(&self) -> f32 {
        self.total_height
    }

    /// Store revision this table was computed from.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// `true` when the table reflects the store's current contents.
    pub fn is_current(&self, store: &MeasurementStore) -> bool {
        self.revision == store.revision()
    }

    pub(crate) fn clear(&mut self) {
        self.starts.clear();
        self.total_height = 0.0;
    }
}

/// Result of one calculator pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recomputed {
    pub offsets: OffsetTable,
    /// `true` iff the sequence is non-empty and every section used real measurements.
    pub all_measured: bool,
}

/// Derives section offsets from (possibly incomplete) measurements.
///
/// Also owns the debounce timer that coalesces bursts of recomputation requests; the
/// [`crate::SectionScroller`] polls it and runs [`PositionCalculator::recompute`] when it fires.
#[derive(Clone, Debug)]
pub struct PositionCalculator {
    estimates: Estimates,
    debounce: Debounce,
}

impl PositionCalculator {
    pub fn new(estimates: Estimates, recompute_delay_ms: u64) -> Self {
        Self {
            estimates,
            debounce: Debounce::new(recompute_delay_ms),
        }
    }

    pub fn estimates(&self) -> Estimates {
        self.estimates
    }

    /// Height contributed by `section`, and whether it came from real measurements.
    pub fn section_extent(
        &self,
        section: SectionDescriptor,
        store: &MeasurementStore,
    ) -> (f32, bool) {
        match store
            .section(section.index)
            .and_then(|m| m.measured_extent(section.item_count, self.estimates.item_margin))
        {
            Some(extent) => (extent, true),
            None => (self.estimates.section_extent(section.item_count), false),
        }
    }

    /// Start offset of section `index`, summing measured or estimated extents of every section
    /// before it. Does not touch any table.
    pub fn section_start(
        &self,
        index: usize,
        sections: &[SectionDescriptor],
        store: &MeasurementStore,
    ) -> f32 {
        sections
            .iter()
            .take(index)
            .map(|s| self.section_extent(*s, store).0)
            .sum()
    }

    pub fn recompute(
        &self,
        sections: &[SectionDescriptor],
        store: &MeasurementStore,
    ) -> Recomputed {
        let mut starts = Vec::with_capacity(sections.len());
        let mut cumulative = 0.0f32;
        let mut all_measured = !sections.is_empty();
        for section in sections {
            starts.push(cumulative);
            let (extent, measured) = self.section_extent(*section, store);
            all_measured &= measured;
            cumulative += extent;
        }
        Recomputed {
            offsets: OffsetTable {
                starts,
                total_height: cumulative,
                revision: store.revision(),
            },
            all_measured,
        }
    }

    /// Schedules a recomputation after the quiet period, cancelling any earlier request that has
    /// not fired yet.
    pub fn request(&mut self, now_ms: u64) {
        self.debounce.schedule(now_ms);
        strace!(now_ms, deadline = ?self.debounce.deadline(), "recompute requested");
    }

    pub fn cancel(&mut self) -> bool {
        self.debounce.cancel()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.debounce.deadline()
    }

    /// Returns `true` (and disarms the debounce) when a requested recomputation is due.
    pub fn fire_if_due(&mut self, now_ms: u64) -> bool {
        self.debounce.fire_if_due(now_ms)
    }
}
