#[cfg(not(feature = "std"))]
use alloc::collections::BTreeSet;
#[cfg(feature = "std")]
use std::collections::HashSet;

/// `(section_index, item_index)` of a measured item.
pub(crate) type ItemSlot = (usize, usize);

#[cfg(feature = "std")]
pub(crate) type SlotSet = HashSet<ItemSlot>;
#[cfg(not(feature = "std"))]
pub(crate) type SlotSet = BTreeSet<ItemSlot>;
