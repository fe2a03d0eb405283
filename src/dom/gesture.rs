use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

/// Two taps closer together than this start an edit.
pub const DOUBLE_TAP_WINDOW_MS: u64 = 500;

const TOUCH_AGENTS: &str = "Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini";

/// Recognises a double tap from successive `touchend` timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleTap {
    last_tap_ms: Option<u64>,
}

impl DoubleTap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a tap and reports whether it completes a double tap. A
    /// recognised double tap disarms the detector.
    pub fn register(&mut self, now_ms: u64) -> bool {
        let hit = self.last_tap_ms.is_some_and(|last| {
            now_ms > last && now_ms - last < DOUBLE_TAP_WINDOW_MS
        });
        self.last_tap_ms = if hit { None } else { Some(now_ms) };
        hit
    }

    pub fn is_armed(&self) -> bool {
        self.last_tap_ms.is_some()
    }

    pub fn reset(&mut self) {
        self.last_tap_ms = None;
    }
}

pub fn is_touch_user_agent(user_agent: &str) -> bool {
    static TOUCH: OnceLock<Option<Regex>> = OnceLock::new();
    TOUCH
        .get_or_init(|| {
            RegexBuilder::new(TOUCH_AGENTS)
                .case_insensitive(true)
                .build()
                .ok()
        })
        .as_ref()
        .is_some_and(|re| re.is_match(user_agent))
}

#[cfg(test)]
mod tests {
    use super::{DoubleTap, is_touch_user_agent};

    #[test]
    fn second_tap_inside_window_is_double() {
        let mut taps = DoubleTap::new();
        assert!(!taps.register(1_000));
        assert!(taps.register(1_300));
        assert!(!taps.is_armed());
    }

    #[test]
    fn slow_taps_rearm() {
        let mut taps = DoubleTap::new();
        assert!(!taps.register(1_000));
        assert!(!taps.register(1_600));
        assert!(taps.register(1_700));
    }

    #[test]
    fn same_timestamp_is_not_double() {
        let mut taps = DoubleTap::new();
        assert!(!taps.register(10));
        assert!(!taps.register(10));
    }

    #[test]
    fn touch_agents_are_detected() {
        assert!(is_touch_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"
        ));
        assert!(is_touch_user_agent("opera mini/9"));
        assert!(!is_touch_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0"
        ));
    }
}
