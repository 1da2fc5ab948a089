// Example: scroll to a section before it has been laid out, then watch the correction.
use section_tabs::{
    ScrollHost, ScrollToSectionOptions, ScrollerOptions, SectionScroller,
    sections_from_item_counts,
};

struct PrintHost;

impl ScrollHost for PrintHost {
    fn scroll_to_offset(&mut self, offset: f32, animated: bool) {
        println!("  host: scroll_to_offset({offset}, animated={animated})");
    }
}

fn main() {
    let options = ScrollerOptions::default()
        .with_on_sections_ready(Some(|| println!("  sections ready")));
    let mut s = SectionScroller::new(options);
    let mut host = PrintHost;

    s.set_sections(sections_from_item_counts([3, 2, 4]), 0);

    // Only the first section is on screen so far.
    s.record_header_height(0, 48.0, 5);
    for (i, h) in [72.0, 64.0, 80.0].into_iter().enumerate() {
        s.record_item_height(0, i, h, 5);
    }
    s.tick(105, &mut host);
    println!("offsets after first pass: {:?}", s.offsets().as_slice());

    println!("scroll_to_section(2) at t=120");
    let r = s.scroll_to_section(2, ScrollToSectionOptions::default(), 120, &mut host);
    println!("  resolution: {r:?}, pending: {:?}", s.pending().iter().collect::<Vec<_>>());

    // The list renders the rest while scrolling.
    s.record_header_height(1, 48.0, 140);
    s.record_item_height(1, 0, 70.0, 140);
    s.record_item_height(1, 1, 70.0, 140);
    s.record_header_height(2, 48.0, 160);
    for i in 0..4 {
        s.record_item_height(2, i, 90.0, 160);
    }

    let mut now = 120;
    while let Some(next) = s.tick(now, &mut host) {
        println!("t={now}ms next deadline={next}");
        now = next;
    }
    println!(
        "done: ready={} pending={} offsets={:?}",
        s.is_ready(),
        s.pending().len(),
        s.offsets().as_slice()
    );
}
