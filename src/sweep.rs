//! Sweep phase arithmetic.

/// Frames per full left-to-right sweep.
pub const SWEEP_PERIOD_FRAMES: u64 = 120;

/// Phase of the sweep for a given frame number, in `[0, 1)`.
pub fn phase_for_frame(frame: u64) -> f32 {
    (frame % SWEEP_PERIOD_FRAMES) as f32 / SWEEP_PERIOD_FRAMES as f32
}

/// Monotone frame counter; hands out the phase for the frame about to be drawn.
pub struct FrameClock {
    frame: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { frame: 0 }
    }

    pub fn next_phase(&mut self) -> f32 {
        let phase = phase_for_frame(self.frame);
        self.frame = self.frame.wrapping_add(1);
        phase
    }
}
