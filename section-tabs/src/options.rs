use alloc::sync::Arc;

/// A callback fired once per render generation, when every section is fully measured.
pub type OnSectionsReadyCallback = Arc<dyn Fn() + Send + Sync>;

/// Fixed heights substituted for content that has not been measured yet.
///
/// Every estimating call site (offset table, estimated scroll targets) reads the same value, so
/// estimates stay consistent with each other.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimates {
    pub header_height: f32,
    pub item_height: f32,
    /// Space below every item. Applied to measured and estimated items alike.
    pub item_margin: f32,
}

impl Estimates {
    pub const fn new(header_height: f32, item_height: f32, item_margin: f32) -> Self {
        Self {
            header_height,
            item_height,
            item_margin,
        }
    }

    /// Estimated height of a whole section (header plus items with margins).
    pub fn section_extent(&self, item_count: usize) -> f32 {
        self.header_height + item_count as f32 * (self.item_height + self.item_margin)
    }
}

impl Default for Estimates {
    fn default() -> Self {
        Self::new(60.0, 100.0, 8.0)
    }
}

/// Configuration for [`crate::SectionScroller`].
///
/// Cheap to clone: the callback lives in an `Arc`.
#[derive(Clone)]
pub struct ScrollerOptions {
    pub estimates: Estimates,
    /// Quiet period after the last recomputation request before the offset table is rebuilt.
    pub recompute_delay_ms: u64,
    /// Forwarded with every scroll command issued to the host.
    pub animated: bool,
    pub on_sections_ready: Option<OnSectionsReadyCallback>,
}

impl Default for ScrollerOptions {
    fn default() -> Self {
        Self {
            estimates: Estimates::default(),
            recompute_delay_ms: 100,
            animated: true,
            on_sections_ready: None,
        }
    }
}

impl ScrollerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_estimates(mut self, estimates: Estimates) -> Self {
        self.estimates = estimates;
        self
    }

    pub fn with_recompute_delay_ms(mut self, delay_ms: u64) -> Self {
        self.recompute_delay_ms = delay_ms;
        self
    }

    pub fn with_animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    pub fn with_on_sections_ready(
        mut self,
        on_sections_ready: Option<impl Fn() + Send + Sync + 'static>,
    ) -> Self {
        self.on_sections_ready = on_sections_ready.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for ScrollerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollerOptions")
            .field("estimates", &self.estimates)
            .field("recompute_delay_ms", &self.recompute_delay_ms)
            .field("animated", &self.animated)
            .finish_non_exhaustive()
    }
}

/// Retry policy for a single scroll-to-section request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollToSectionOptions {
    /// Number of backoff retries after the first attempt. `None` means `index + 1`.
    pub max_retries: Option<u32>,
    /// Delay of the forced final attempt. `0` disables it.
    pub timeout_ms: u64,
    /// Base delay of the retry ladder; attempt `n` waits `retry_delay_ms * 2^n`.
    pub retry_delay_ms: u64,
}

impl Default for ScrollToSectionOptions {
    fn default() -> Self {
        Self {
            max_retries: None,
            timeout_ms: 1000,
            retry_delay_ms: 50,
        }
    }
}

impl ScrollToSectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_retry_delay_ms(mut self, retry_delay_ms: u64) -> Self {
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    pub(crate) fn max_retries_for(&self, index: usize) -> u32 {
        self.max_retries
            .unwrap_or_else(|| u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1))
    }

    /// Delay before retry `attempt + 1`, counted from attempt `attempt`.
    pub(crate) fn backoff_ms(retry_delay_ms: u64, attempt: u32) -> u64 {
        retry_delay_ms.saturating_mul(2u64.saturating_pow(attempt))
    }
}
