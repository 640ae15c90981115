//! Elapsed round time
//!
//! Accumulates frame deltas while running and formats them as `MM:SS.mmm`.

use serde::{Deserialize, Serialize};

/// Timer display state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimerState {
    /// Counting and shown
    Active,
    /// Frozen at the last value, still shown
    Inactive,
    /// Not shown (initial state)
    #[default]
    Hidden,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timer {
    state: TimerState,
    elapsed_ms: f64,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> TimerState {
        self.state
    }

    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.state != TimerState::Hidden
    }

    /// Reset to zero and start counting
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.state = TimerState::Active;
    }

    /// Freeze the display at the current value
    pub fn stop(&mut self) {
        self.state = TimerState::Inactive;
    }

    pub fn hide(&mut self) {
        self.state = TimerState::Hidden;
    }

    pub fn advance(&mut self, dt_ms: f32) {
        if self.state != TimerState::Active {
            return;
        }
        self.elapsed_ms += f64::from(dt_ms.max(0.0));
    }

    /// `MM:SS.mmm`; minutes grow past 99 rather than wrapping
    pub fn text(&self) -> String {
        let total_ms = self.elapsed_ms.floor() as u64;
        let ms = total_ms % 1000;
        let total_secs = total_ms / 1000;
        let secs = total_secs % 60;
        let mins = total_secs / 60;
        format!("{mins:02}:{secs:02}.{ms:03}")
    }
}
