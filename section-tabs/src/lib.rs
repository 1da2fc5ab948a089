//! A headless engine that keeps a tab bar and a sectioned, scrollable list in sync.
//!
//! For the widget-level glue (active tab, host mounting, pass-through scrolling), see the
//! `section-tabs-adapter` crate.
//!
//! The hard part of a "tabs over a section list" widget is knowing where each section starts
//! before the list has laid everything out. This crate learns section geometry incrementally
//! from layout events, derives a best-effort offset table (falling back to fixed estimates for
//! anything unmeasured), and drives scroll-to-section requests that start from an estimate and
//! get corrected once the real layout is known.
//!
//! It is UI-agnostic. A host list is expected to provide:
//! - header/item layout events (realized pixel heights)
//! - a scroll-to-offset capability (see [`ScrollHost`])
//! - a clock: every event carries `now_ms`, and the host calls [`SectionScroller::tick`] from its
//!   event loop to run debounced recomputations and retry timers.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod host;
mod key;
mod options;
mod positions;
mod scroll;
mod scroller;
mod store;
mod timer;
mod types;


pub use host::ScrollHost;
pub use options::{Estimates, OnSectionsReadyCallback, ScrollToSectionOptions, ScrollerOptions};
pub use positions::{OffsetTable, PositionCalculator, Recomputed};
pub use scroll::{PendingScrollQueue, ScrollCoordinator};
pub use scroller::SectionScroller;
pub use store::{MeasurementStore, SectionMeasurement};
pub use timer::{Debounce, TimerId, TimerQueue};
pub use types::{MeasurementCounts, ScrollResolution, SectionDescriptor, sections_from_item_counts};
