//! Hitbox geometry.
//!
//! All functions are pure: body position in, world-space rectangle out. The
//! rectangles are overlap-test regions only and are distinct from the physics
//! collision shapes.

use bevy::prelude::*;

use crate::plugins::combat::Facing;

/// Fixed body-centered box (the region an incoming hit is tested against).
#[inline]
pub fn body_box(pos: Vec2, size: Vec2) -> Rect {
    Rect::from_center_size(pos, size)
}

/// Attack-effect rectangle: offset forward along the facing axis, or downward
/// for the slam attack.
pub fn effect_hitbox(pos: Vec2, facing: Facing, size: Vec2, downward: bool) -> Rect {
    let center = if downward {
        Vec2::new(pos.x, pos.y - size.y * 0.5)
    } else {
        Vec2::new(pos.x + facing.sign() * size.x * 0.3, pos.y)
    };
    Rect::from_center_size(center, size)
}

/// Full-frame sprite bounds anchored one unit below the body position.
///
/// The vertical anchor is a fixed offset, not a centered box; the boss sprite
/// sheets hang below the body origin.
pub fn frame_hitbox(pos: Vec2, size: Vec2) -> Rect {
    Rect::new(
        pos.x - size.x * 0.5,
        pos.y - 1.0,
        pos.x + size.x * 0.5,
        pos.y - 1.0 + size.y,
    )
}

/// Strict overlap: zero-area rectangles never overlap anything, and edge
/// contact does not count.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    !a.is_empty() && !b.is_empty() && !a.intersect(b).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rect_never_overlaps() {
        let empty = Rect::default();
        let solid = Rect::new(-1.0, -1.0, 1.0, 1.0);
        assert!(!overlaps(empty, solid));
        assert!(!overlaps(solid, empty));
        assert!(!overlaps(empty, empty));
    }

    #[test]
    fn edge_contact_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(1.0, 0.0, 2.0, 1.0);
        assert!(!overlaps(a, b));
        let c = Rect::new(0.5, 0.5, 2.0, 2.0);
        assert!(overlaps(a, c));
    }

    #[test]
    fn effect_hitbox_offsets_forward() {
        let size = Vec2::new(1.5, 0.6);
        let right = effect_hitbox(Vec2::ZERO, Facing::Right, size, false);
        let left = effect_hitbox(Vec2::ZERO, Facing::Left, size, false);
        assert!(right.center().x > 0.0);
        assert!(left.center().x < 0.0);
        assert_eq!(right.center().x, -left.center().x);
    }

    #[test]
    fn down_effect_hitbox_offsets_downward() {
        let size = Vec2::new(1.0, 1.3);
        let r = effect_hitbox(Vec2::new(2.0, 3.0), Facing::Right, size, true);
        assert_eq!(r.center().x, 2.0);
        assert!(r.center().y < 3.0);
        assert_eq!(r.max.y, 3.0);
    }

    #[test]
    fn frame_hitbox_anchors_below_body() {
        let r = frame_hitbox(Vec2::new(0.0, 5.0), Vec2::new(1.8, 2.0));
        assert_eq!(r.min.y, 4.0);
        assert_eq!(r.max.y, 6.0);
        assert_eq!(r.width(), 1.8);
    }
}
