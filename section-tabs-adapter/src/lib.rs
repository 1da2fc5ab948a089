//! Widget-level glue for the `section-tabs` crate.
//!
//! The `section-tabs` crate is UI-agnostic and focuses on measurement, offsets and scroll
//! coordination. This crate wraps it in what a "tabs over a section list" widget needs:
//!
//! - Mounting/unmounting the host list (operations degrade to no-ops while unmounted)
//! - Active tab tracking, with viewability updates suppressed after a tab press
//! - Pass-through scroll primitives proxied to the host list
//!
//! This crate is intentionally framework-agnostic (no bindings to a concrete toolkit).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod active;
mod controller;
mod host;

#[cfg(test)]
mod tests;

pub use active::ActiveTab;
pub use controller::Controller;
pub use host::ListHost;
