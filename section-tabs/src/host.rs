/// The scroll capability a host list provides to the engine.
///
/// Implement this for the real list widget, or for a recording double in tests.
pub trait ScrollHost {
    /// Returns `false` while the underlying scrollable surface is not attached.
    ///
    /// Scroll requests and pending corrections are skipped while unmounted.
    fn is_mounted(&self) -> bool {
        true
    }

    fn scroll_to_offset(&mut self, offset: f32, animated: bool);
}
