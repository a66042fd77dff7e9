use std::time::{Duration, Instant};

/// Timing for one frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick.
    pub dt: f32,
    pub frame_index: u64,
    /// Average frame rate over the window that just closed, if one closed on
    /// this tick.
    pub fps: Option<f32>,
}

/// Per-loop frame clock with a rolling frame-rate window.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    window: Duration,
    window_start: Instant,
    window_frames: u32,
}

impl FrameClock {
    /// Clock reporting the frame rate once per second.
    pub fn new() -> Self {
        Self::with_window(Duration::from_secs(1))
    }

    pub fn with_window(window: Duration) -> Self {
        let now = Instant::now();
        Self { last: now, frame_index: 0, window, window_start: now, window_frames: 0 }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        self.window_frames += 1;

        let elapsed = now.saturating_duration_since(self.window_start);
        let fps = if elapsed >= self.window {
            let fps = self.window_frames as f32 / elapsed.as_secs_f32();
            self.window_start = now;
            self.window_frames = 0;
            Some(fps)
        } else {
            None
        };

        let ft = FrameTime { dt: dt.as_secs_f32(), frame_index: self.frame_index, fps };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_increments() {
        let mut clock = FrameClock::new();
        let start = clock.last;
        assert_eq!(clock.tick_at(start).frame_index, 0);
        assert_eq!(clock.tick_at(start).frame_index, 1);
    }

    #[test]
    fn fps_reported_when_window_closes() {
        let mut clock = FrameClock::with_window(Duration::from_secs(1));
        let start = clock.window_start;

        for i in 1..=9 {
            let ft = clock.tick_at(start + Duration::from_millis(100 * i));
            assert!(ft.fps.is_none());
        }
        let ft = clock.tick_at(start + Duration::from_secs(1));
        let fps = ft.fps.unwrap();
        assert!((fps - 10.0).abs() < 1e-3, "fps = {fps}");

        let next = clock.tick_at(start + Duration::from_millis(1100));
        assert!(next.fps.is_none());
    }

    #[test]
    fn dt_measures_gap() {
        let mut clock = FrameClock::new();
        let start = clock.last;
        let ft = clock.tick_at(start + Duration::from_millis(16));
        assert!((ft.dt - 0.016).abs() < 1e-6);
    }
}
