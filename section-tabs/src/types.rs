use alloc::vec::Vec;

/// Shape of one section in the current render generation.
///
/// `index` is the section's position in the sequence handed to
/// [`crate::SectionScroller::set_sections`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionDescriptor {
    pub index: usize,
    pub item_count: usize,
}

impl SectionDescriptor {
    pub fn new(index: usize, item_count: usize) -> Self {
        Self { index, item_count }
    }
}

/// Builds descriptors for sections laid out in order, one per item count.
pub fn sections_from_item_counts(
    item_counts: impl IntoIterator<Item = usize>,
) -> Vec<SectionDescriptor> {
    item_counts
        .into_iter()
        .enumerate()
        .map(|(index, item_count)| SectionDescriptor::new(index, item_count))
        .collect()
}

/// How a scroll-to-section request was resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollResolution {
    /// The section was fully measured; the offset lands on its first item.
    Exact(f32),
    /// The section was not fully measured yet; the offset is a best-effort estimate and a
    /// correction is pending.
    Estimated(f32),
    /// Nothing was scrolled (out-of-range index or no mounted host).
    Ignored,
}

impl ScrollResolution {
    pub fn offset(&self) -> Option<f32> {
        match *self {
            Self::Exact(y) | Self::Estimated(y) => Some(y),
            Self::Ignored => None,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

/// Distinct headers and item slots measured so far in the current generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurementCounts {
    pub headers: usize,
    pub items: usize,
}
