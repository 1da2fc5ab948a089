use alloc::vec::Vec;

use crate::key::SlotSet;
use crate::{MeasurementCounts, SectionDescriptor};

fn is_valid_height(height: f32) -> bool {
    height.is_finite() && height >= 0.0
}

/// Realized heights of one section's header and items.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionMeasurement {
    header_height: Option<f32>,
    item_heights: Vec<Option<f32>>,
}

impl SectionMeasurement {
    pub fn header_height(&self) -> Option<f32> {
        self.header_height
    }

    /// Item heights by item position; `None` marks a slot that has not been laid out yet.
    pub fn item_heights(&self) -> &[Option<f32>] {
        &self.item_heights
    }

    pub fn item_height(&self, item_index: usize) -> Option<f32> {
        self.item_heights.get(item_index).copied().flatten()
    }

    /// `true` iff the header height is positive and exactly `expected_item_count` items are set.
    pub fn is_fully_measured(&self, expected_item_count: usize) -> bool {
        matches!(self.header_height, Some(h) if h > 0.0)
            && self.item_heights.len() == expected_item_count
            && self.item_heights.iter().all(Option::is_some)
    }

    /// Measured height of the whole section (header plus items, each followed by
    /// `item_margin`), or `None` unless fully measured.
    pub fn measured_extent(&self, expected_item_count: usize, item_margin: f32) -> Option<f32> {
        if !self.is_fully_measured(expected_item_count) {
            return None;
        }
        let header = self.header_height?;
        Some(
            self.item_heights
                .iter()
                .flatten()
                .fold(header, |acc, h| acc + h + item_margin),
        )
    }
}

/// Per-section layout measurements for one render generation.
///
/// The store is shaped by a section sequence and rejects item slots beyond a section's item
/// count. Measurements only accumulate; the store is emptied wholesale by
/// [`MeasurementStore::reset`].
#[derive(Clone, Debug, Default)]
pub struct MeasurementStore {
    sections: Vec<SectionMeasurement>,
    item_counts: Vec<usize>,
    measured_items: SlotSet,
    measured_headers: usize,
    revision: u64,
}

impl MeasurementStore {
    pub fn new(sections: &[SectionDescriptor]) -> Self {
        let mut store = Self::default();
        store.reshape(sections);
        store
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Item count the section was shaped with.
    pub fn item_count(&self, section_index: usize) -> Option<usize> {
        self.item_counts.get(section_index).copied()
    }

    pub fn section(&self, section_index: usize) -> Option<&SectionMeasurement> {
        self.sections.get(section_index)
    }

    /// Bumped on every accepted write and on reset.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Sets a section's header height (last write wins).
    ///
    /// Returns `false` (and stores nothing) for out-of-range sections or invalid heights.
    pub fn record_header_height(&mut self, section_index: usize, height: f32) -> bool {
        if !is_valid_height(height) {
            swarn!(section_index, height, "record_header_height: invalid height");
            return false;
        }
        let Some(section) = self.sections.get_mut(section_index) else {
            swarn!(
                section_index,
                count = self.sections.len(),
                "record_header_height: out-of-range section"
            );
            return false;
        };
        if section.header_height.replace(height).is_none() {
            self.measured_headers += 1;
        }
        self.revision = self.revision.wrapping_add(1);
        strace!(section_index, height, "record_header_height");
        true
    }

    /// Sets the height of one item slot.
    ///
    /// Returns `false` for out-of-range sections, item indices not below the section's item
    /// count, or invalid heights. The first write to a `(section_index, item_index)` slot
    /// counts towards [`MeasurementCounts::items`]; re-measurements only update the value.
    pub fn record_item_height(
        &mut self,
        section_index: usize,
        item_index: usize,
        height: f32,
    ) -> bool {
        if !is_valid_height(height) {
            swarn!(
                section_index,
                item_index,
                height,
                "record_item_height: invalid height"
            );
            return false;
        }
        let Some(section) = self.sections.get_mut(section_index) else {
            swarn!(
                section_index,
                count = self.sections.len(),
                "record_item_height: out-of-range section"
            );
            return false;
        };
        let item_count = self.item_counts.get(section_index).copied().unwrap_or(0);
        if item_index >= item_count {
            swarn!(
                section_index,
                item_index,
                item_count,
                "record_item_height: out-of-range item"
            );
            return false;
        }
        if section.item_heights.len() <= item_index {
            section.item_heights.resize(item_index + 1, None);
        }
        section.item_heights[item_index] = Some(height);
        self.measured_items.insert((section_index, item_index));
        self.revision = self.revision.wrapping_add(1);
        strace!(section_index, item_index, height, "record_item_height");
        true
    }

    /// Drops every measurement and counter, keeping the section shape.
    pub fn reset(&mut self) {
        for section in &mut self.sections {
            *section = SectionMeasurement::default();
        }
        self.measured_items.clear();
        self.measured_headers = 0;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Resets the store for a new section sequence.
    pub fn reshape(&mut self, sections: &[SectionDescriptor]) {
        self.reset();
        self.sections.resize_with(sections.len(), SectionMeasurement::default);
        self.item_counts.clear();
        self.item_counts.extend(sections.iter().map(|s| s.item_count));
    }

    pub fn is_section_fully_measured(
        &self,
        section_index: usize,
        expected_item_count: usize,
    ) -> bool {
        self.sections
            .get(section_index)
            .is_some_and(|s| s.is_fully_measured(expected_item_count))
    }

    pub fn has_measurements(&self) -> bool {
        self.measured_headers > 0 || !self.measured_items.is_empty()
    }

    /// `true` iff at least one measurement exists and every section is fully measured.
    ///
    /// An empty section sequence is never ready.
    pub fn is_globally_ready(&self, sections: &[SectionDescriptor]) -> bool {
        !sections.is_empty()
            && self.has_measurements()
            && sections
                .iter()
                .all(|s| self.is_section_fully_measured(s.index, s.item_count))
    }

    pub fn counts(&self) -> MeasurementCounts {
        MeasurementCounts {
            headers: self.measured_headers,
            items: self.measured_items.len(),
        }
    }
}
