//! Countdown counters gating repeatable actions.
//!
//! Two distinct counter types exist by design and must not be merged:
//! - [`Secs`] counts wall-clock seconds down by `dt` each fixed tick
//!   (invincibility windows, the dash timer).
//! - [`Ticks`] counts whole fixed ticks down by exactly 1 each tick
//!   (the boss action/jump/dash/jump-dash cooldowns).
//!
//! Both clamp at zero and never go negative. A dependent transition fires on
//! the zero-crossing only: every decision path that observes a ready counter
//! re-arms a counter, so readiness is consumed exactly once.

/// Float-seconds countdown, clamped at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Secs(f32);

impl Secs {
    #[inline]
    pub fn new(v: f32) -> Self {
        Self(v.max(0.0))
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn tick(&mut self, dt: f32) {
        self.0 = (self.0 - dt).max(0.0);
    }

    #[inline]
    pub fn is_active(self) -> bool {
        self.0 > 0.0
    }

    /// Re-arm the counter. Overwrites any remaining time.
    #[inline]
    pub fn set(&mut self, v: f32) {
        self.0 = v.max(0.0);
    }
}

/// Whole-fixed-tick countdown, clamped at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Ticks(u32);

impl Ticks {
    #[inline]
    pub fn new(v: u32) -> Self {
        Self(v)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn tick(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    #[inline]
    pub fn is_ready(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn arm(&mut self, v: u32) {
        self.0 = v;
    }
}
