use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, Ordering};

use section_tabs::{
    MeasurementCounts, ScrollHost, ScrollResolution, ScrollToSectionOptions, ScrollerOptions,
    sections_from_item_counts,
};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Offset(f32),
    End,
    Index(usize),
    Location(usize, usize),
    Flash,
}

#[derive(Clone, Debug, Default)]
struct FakeList {
    calls: Vec<Call>,
}

impl ScrollHost for FakeList {
    fn scroll_to_offset(&mut self, offset: f32, _animated: bool) {
        self.calls.push(Call::Offset(offset));
    }
}

impl ListHost for FakeList {
    fn scroll_to_end(&mut self, _animated: bool) {
        self.calls.push(Call::End);
    }

    fn scroll_to_index(&mut self, index: usize, _animated: bool) {
        self.calls.push(Call::Index(index));
    }

    fn scroll_to_location(&mut self, section_index: usize, item_index: usize, _animated: bool) {
        self.calls.push(Call::Location(section_index, item_index));
    }

    fn flash_scroll_indicators(&mut self) {
        self.calls.push(Call::Flash);
    }
}

fn mounted(item_counts: &[usize]) -> Controller<FakeList> {
    let mut c = Controller::new(ScrollerOptions::default());
    c.set_sections(sections_from_item_counts(item_counts.iter().copied()), 0);
    c.mount(FakeList::default());
    c
}

fn calls(c: &Controller<FakeList>) -> &[Call] {
    &c.host().unwrap().calls
}

#[test]
fn tab_press_highlights_and_suppresses_viewability_until_momentum_end() {
    let mut c = mounted(&[1, 1, 1]);
    let r = c.on_tab_press(2, 0);
    // 2 * (60 + 108) + 60
    assert_eq!(r, ScrollResolution::Estimated(396.0));
    assert_eq!(c.active_index(), 2);
    assert!(c.active_tab().suppressed);

    // The list scrolls past section 1 on its way to section 2.
    assert!(!c.on_viewable_items_changed(Some(1)));
    assert_eq!(c.active_index(), 2);

    c.on_momentum_scroll_end();
    assert!(c.on_viewable_items_changed(Some(1)));
    assert_eq!(c.active_index(), 1);
    assert!(!c.on_viewable_items_changed(Some(1)));
}

#[test]
fn viewability_ignores_missing_and_out_of_range_sections() {
    let mut c = mounted(&[1, 1]);
    assert!(!c.on_viewable_items_changed(None));
    assert!(!c.on_viewable_items_changed(Some(5)));
    assert_eq!(c.active_index(), 0);
}

#[test]
fn out_of_range_tab_press_is_ignored() {
    let mut c = mounted(&[1, 1]);
    assert!(c.on_tab_press(2, 0).is_ignored());
    assert_eq!(c.active_tab(), ActiveTab::default());
    assert!(calls(&c).is_empty());
}

#[test]
fn unmounted_controller_degrades_to_no_ops() {
    let ready = Arc::new(AtomicBool::new(false));
    let r = Arc::clone(&ready);
    let options = ScrollerOptions::default()
        .with_on_sections_ready(Some(move || r.store(true, Ordering::SeqCst)));
    let mut c: Controller<FakeList> = Controller::new(options);
    c.set_sections(sections_from_item_counts([1]), 0);
    assert!(!c.is_mounted());

    assert!(c.scroll_to_section(0, ScrollToSectionOptions::default(), 0).is_ignored());
    c.scroll_to_offset(10.0, false);
    c.scroll_to_end(false);
    c.flash_scroll_indicators();

    // Measurement and readiness keep working without a host.
    c.on_header_layout(0, 30.0, 0);
    c.on_item_layout(0, 0, 40.0, 0);
    assert_eq!(c.tick(100), None);
    assert!(c.sections_ready());
    assert!(ready.load(Ordering::SeqCst));

    c.mount(FakeList::default());
    assert!(c.is_mounted());
    assert_eq!(
        c.scroll_to_section(0, ScrollToSectionOptions::default(), 100),
        ScrollResolution::Exact(30.0)
    );
}

#[test]
fn pass_through_primitives_reach_the_host() {
    let mut c = mounted(&[1]);
    c.scroll_to_offset(12.0, true);
    c.scroll_to_end(true);
    c.scroll_to_index(4, false);
    c.scroll_to_location(0, 1, true);
    c.flash_scroll_indicators();
    assert_eq!(
        calls(&c),
        [
            Call::Offset(12.0),
            Call::End,
            Call::Index(4),
            Call::Location(0, 1),
            Call::Flash
        ]
    );

    let host = c.unmount().unwrap();
    assert_eq!(host.calls.len(), 5);
    assert!(c.host().is_none());

    // Unmounted: every primitive is a no-op.
    c.scroll_to_offset(1.0, true);
    c.scroll_to_end(true);
    c.scroll_to_index(0, true);
    c.scroll_to_location(0, 0, true);
    c.flash_scroll_indicators();
    assert!(c.host().is_none());
}

#[test]
fn reset_keeps_sections_and_active_tab_but_drops_measurements() {
    let mut c = mounted(&[1, 1]);
    c.on_header_layout(0, 30.0, 0);
    c.on_item_layout(0, 0, 40.0, 0);
    c.on_tab_press(1, 0);
    assert_eq!(c.scroller().counts().items, 1);

    c.reset(10);
    assert_eq!(c.active_index(), 1);
    assert_eq!(c.scroller().sections().len(), 2);
    assert_eq!(c.scroller().counts(), MeasurementCounts::default());
    assert_eq!(c.scroller().coordinator().in_flight(), 0);
    assert!(!c.sections_ready());
}

#[test]
fn shrinking_sections_resets_the_active_tab() {
    let mut c = mounted(&[1, 1, 1]);
    c.on_tab_press(2, 0);
    assert!(c.set_sections(sections_from_item_counts([1, 1]), 10));
    assert_eq!(c.active_tab(), ActiveTab::default());
    assert_eq!(c.scroller().coordinator().in_flight(), 0);
}

#[test]
fn tab_press_is_corrected_once_the_section_lays_out() {
    let mut c = mounted(&[2, 1]);
    c.on_header_layout(0, 50.0, 0);
    c.on_item_layout(0, 0, 80.0, 0);
    c.on_item_layout(0, 1, 90.0, 0);
    c.tick(100);

    assert_eq!(c.on_tab_press(1, 100), ScrollResolution::Estimated(296.0));
    c.on_header_layout(1, 40.0, 110);
    c.on_item_layout(1, 0, 70.0, 110);
    assert_eq!(c.tick(10_000), None);

    assert_eq!(calls(&c), [Call::Offset(296.0), Call::Offset(276.0)]);
    assert!(c.scroller().pending().is_empty());
    assert!(c.sections_ready());
}
