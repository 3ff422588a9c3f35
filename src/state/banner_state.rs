//! Success banner reveal animation

use std::time::{Duration, Instant};

/// Animation phase of the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerPhase {
    /// Banner sliding in
    Appearing,
    /// Fully shown
    Shown,
}

/// Eased reveal of the success banner
#[derive(Debug)]
pub struct BannerState {
    /// When the banner was triggered
    pub start_time: Instant,
    pub phase: BannerPhase,
    /// Fraction of the banner currently revealed (0.0 to 1.0)
    pub reveal: f32,
}

impl BannerState {
    /// Duration of the reveal
    const APPEAR_DURATION: Duration = Duration::from_millis(350);

    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase: BannerPhase::Appearing,
            reveal: 0.0,
        }
    }

    /// Update animation state based on elapsed time
    pub fn update(&mut self) {
        self.update_elapsed(self.start_time.elapsed());
    }

    fn update_elapsed(&mut self, elapsed: Duration) {
        if elapsed < Self::APPEAR_DURATION {
            self.phase = BannerPhase::Appearing;
            let progress = elapsed.as_secs_f32() / Self::APPEAR_DURATION.as_secs_f32();
            // Cubic ease-out: fast start, gentle landing
            self.reveal = simple_easing::cubic_out(progress);
        } else {
            self.phase = BannerPhase::Shown;
            self.reveal = 1.0;
        }
    }

    /// Number of columns of a `width`-wide banner to draw
    pub fn visible_width(&self, width: u16) -> u16 {
        ((width as f32) * self.reveal).round().clamp(0.0, width as f32) as u16
    }

    pub fn is_animating(&self) -> bool {
        self.phase == BannerPhase::Appearing
    }
}

impl Default for BannerState {
    fn default() -> Self {
        Self::new()
    }
}
