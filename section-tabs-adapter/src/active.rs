/// The highlighted tab, fed by tab presses and by the host list's viewability reports.
///
/// A tab press is authoritative: it suppresses viewability reports (which would otherwise
/// flicker through every section the list scrolls past) until the host reports that the
/// resulting momentum scroll has ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveTab {
    pub index: usize,
    pub suppressed: bool,
}

impl ActiveTab {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            suppressed: false,
        }
    }

    pub fn press(&mut self, index: usize) {
        self.index = index;
        self.suppressed = true;
    }

    /// Applies a viewability report. Returns `true` if the active index changed.
    pub fn on_viewable(&mut self, section_index: usize) -> bool {
        if self.suppressed || self.index == section_index {
            return false;
        }
        self.index = section_index;
        true
    }

    pub fn release(&mut self) {
        self.suppressed = false;
    }
}
