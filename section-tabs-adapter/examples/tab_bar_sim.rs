// Example: a simulated tab bar driving a section list through the controller.
use section_tabs::{ScrollHost, ScrollerOptions, sections_from_item_counts};
use section_tabs_adapter::{Controller, ListHost};

#[derive(Default)]
struct SimList {
    offset: f32,
}

impl ScrollHost for SimList {
    fn scroll_to_offset(&mut self, offset: f32, _animated: bool) {
        self.offset = offset;
    }
}

impl ListHost for SimList {
    fn scroll_to_end(&mut self, _animated: bool) {}

    fn scroll_to_index(&mut self, _index: usize, _animated: bool) {}

    fn scroll_to_location(&mut self, _section_index: usize, _item_index: usize, _animated: bool) {}

    fn flash_scroll_indicators(&mut self) {}
}

fn main() {
    let mut c: Controller<SimList> = Controller::new(ScrollerOptions::default());
    c.set_sections(sections_from_item_counts([4, 4, 4, 4]), 0);
    c.mount(SimList::default());

    // Lay out everything at fixed heights, as a list would on first render.
    for s in 0..4 {
        c.on_header_layout(s, 40.0, 10);
        for i in 0..4 {
            c.on_item_layout(s, i, 56.0, 10);
        }
    }

    println!("press tab 3 before the first recomputation");
    let r = c.on_tab_press(3, 20);
    println!("  {r:?}, active={}", c.active_index());

    let mut now = 20;
    while let Some(next) = c.tick(now) {
        now = next;
    }
    let offset = c.host().map(|h| h.offset).unwrap_or_default();
    println!("settled at t={now}ms: list offset={offset} ready={}", c.sections_ready());

    // Viewability is ignored until the momentum scroll ends.
    let changed = c.on_viewable_items_changed(Some(2));
    println!("viewable section 2 while suppressed: changed={changed}");
    c.on_momentum_scroll_end();
    let changed = c.on_viewable_items_changed(Some(2));
    println!("viewable section 2 after momentum end: changed={changed}");
    println!("active={}", c.active_index());
}
