//! Animation clips, sampled by elapsed time.
//!
//! The renderer owns the actual textures; the simulation only needs clip
//! *shape*: frame count, frame duration, loop mode, and the source frame size
//! in pixels (hitboxes and body bounds derive from it). Controllers pick which
//! clip is active and at which time offset, nothing more.

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopMode {
    Loop,
    Once,
}

/// A named, ordered frame sequence with a duration and loop mode.
#[derive(Clone, Copy, Debug)]
pub struct Clip {
    pub frame_count: usize,
    pub frame_duration: f32,
    pub mode: LoopMode,
    /// Source frame size in pixels; divide by a pixels-per-unit scale for
    /// world-space bounds.
    pub frame_px: Vec2,
}

impl Clip {
    pub const fn looping(frame_count: usize, frame_duration: f32, px_w: f32, px_h: f32) -> Self {
        Self {
            frame_count,
            frame_duration,
            mode: LoopMode::Loop,
            frame_px: Vec2::new(px_w, px_h),
        }
    }

    pub const fn once(frame_count: usize, frame_duration: f32, px_w: f32, px_h: f32) -> Self {
        Self {
            frame_count,
            frame_duration,
            mode: LoopMode::Once,
            frame_px: Vec2::new(px_w, px_h),
        }
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }

    /// Frame index sampled at `t` seconds since clip start.
    #[inline]
    pub fn frame_index(&self, t: f32) -> usize {
        let raw = (t.max(0.0) / self.frame_duration) as usize;
        match self.mode {
            LoopMode::Loop => raw % self.frame_count,
            LoopMode::Once => raw.min(self.frame_count - 1),
        }
    }

    /// A looping clip never finishes.
    #[inline]
    pub fn is_finished(&self, t: f32) -> bool {
        match self.mode {
            LoopMode::Loop => false,
            LoopMode::Once => t >= self.duration(),
        }
    }

    #[inline]
    pub fn frame_size(&self, pixels_per_unit: f32) -> Vec2 {
        self.frame_px / pixels_per_unit
    }
}

/// Player clip table. Frame counts and durations mirror the shipped sheets.
#[derive(Resource, Debug, Clone)]
pub struct PlayerClips {
    pub idle: Clip,
    pub walk: Clip,
    pub jump_up: Clip,
    pub jump_loop: Clip,
    pub land: Clip,
    pub double_jump: Clip,
    pub dash: Clip,
    pub attack1: Clip,
    pub attack2: Clip,
    pub attack_down: Clip,
    /// Attack effect sprite sizes in pixels (forward slash, wide slash, slam).
    pub effect1_px: Vec2,
    pub effect2_px: Vec2,
    pub effect_down_px: Vec2,
}

impl Default for PlayerClips {
    fn default() -> Self {
        Self {
            idle: Clip::looping(1, 0.1, 100.0, 100.0),
            walk: Clip::looping(8, 0.08, 100.0, 100.0),
            jump_up: Clip::looping(9, 0.08, 100.0, 100.0),
            jump_loop: Clip::looping(3, 0.12, 100.0, 100.0),
            land: Clip::once(3, 0.05, 100.0, 100.0),
            double_jump: Clip::once(4, 0.06, 100.0, 100.0),
            dash: Clip::once(4, 0.05, 100.0, 100.0),
            attack1: Clip::once(5, 0.06, 100.0, 100.0),
            attack2: Clip::once(5, 0.06, 100.0, 100.0),
            attack_down: Clip::once(5, 0.06, 100.0, 100.0),
            effect1_px: Vec2::new(120.0, 48.0),
            effect2_px: Vec2::new(132.0, 52.0),
            effect_down_px: Vec2::new(80.0, 104.0),
        }
    }
}

/// Boss clip table. The sheets are indexed 0..=n, hence the +1 frame counts.
#[derive(Resource, Debug, Clone)]
pub struct BossClips {
    pub idle: Clip,
    pub walk: Clip,
    pub jump: Clip,
    pub land: Clip,
    pub dash: Clip,
    pub jump_dash: Clip,
}

impl Default for BossClips {
    fn default() -> Self {
        Self {
            idle: Clip::looping(2, 0.1, 180.0, 200.0),
            walk: Clip::looping(11, 0.08, 180.0, 200.0),
            jump: Clip::once(29, 0.05, 180.0, 200.0),
            land: Clip::once(6, 0.05, 180.0, 200.0),
            dash: Clip::once(12, 0.05, 180.0, 200.0),
            jump_dash: Clip::once(29, 0.05, 180.0, 200.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looping_clip_wraps_and_never_finishes() {
        let clip = Clip::looping(8, 0.08, 100.0, 100.0);
        assert_eq!(clip.frame_index(0.0), 0);
        assert_eq!(clip.frame_index(0.09), 1);
        // One full cycle later we're back on frame 1.
        assert_eq!(clip.frame_index(0.09 + clip.duration()), 1);
        assert!(!clip.is_finished(1000.0));
    }

    #[test]
    fn once_clip_freezes_on_last_frame() {
        let clip = Clip::once(5, 0.06, 100.0, 100.0);
        assert_eq!(clip.frame_index(0.0), 0);
        assert_eq!(clip.frame_index(0.07), 1);
        assert!(!clip.is_finished(0.29));
        assert!(clip.is_finished(0.30));
        assert_eq!(clip.frame_index(10.0), 4);
    }

    #[test]
    fn frame_size_scales_by_pixels_per_unit() {
        let clip = Clip::once(1, 0.1, 180.0, 200.0);
        assert_eq!(clip.frame_size(100.0), Vec2::new(1.8, 2.0));
    }
}
