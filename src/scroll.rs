//! Shared forward-travel distance.

/// Cumulative scroll distance shared by the camera director and all terrain
/// layers.
///
/// The director advances it exactly once per frame; every layer reads the
/// same value within that frame, which is what keeps the parallax layers in
/// lockstep. Monotonically non-decreasing for the life of the scene.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollState {
    distance_traveled: f32,
}

impl ScrollState {
    /// Create scroll state at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `speed * dt`. Negative products are ignored so the
    /// distance never moves backward.
    pub fn advance(&mut self, speed_m_per_s: f32, dt_s: f32) {
        self.distance_traveled += (speed_m_per_s * dt_s).max(0.0);
    }

    /// Current cumulative distance (meters)
    pub fn offset(&self) -> f32 {
        self.distance_traveled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_monotonic() {
        let mut scroll = ScrollState::new();
        let mut last = scroll.offset();

        for i in 0..100 {
            scroll.advance(6.0 + (i % 7) as f32, 1.0 / 60.0);
            assert!(scroll.offset() >= last);
            last = scroll.offset();
        }
    }

    #[test]
    fn test_scroll_strictly_increasing_for_positive_dt() {
        let mut scroll = ScrollState::new();

        let before = scroll.offset();
        scroll.advance(6.0, 1.0 / 60.0);
        assert!(scroll.offset() > before);
    }

    #[test]
    fn test_scroll_ignores_negative_advance() {
        let mut scroll = ScrollState::new();
        scroll.advance(6.0, 1.0);
        let before = scroll.offset();

        scroll.advance(-5.0, 1.0);
        scroll.advance(5.0, -1.0);
        assert_eq!(scroll.offset(), before);
    }

    #[test]
    fn test_scroll_zero_dt_is_noop() {
        let mut scroll = ScrollState::new();
        scroll.advance(10.0, 0.0);
        assert_eq!(scroll.offset(), 0.0);
    }
}
