use macroquad::prelude::*;

/// Rescale `v` to exactly magnitude `m`, preserving direction.
/// A zero-length vector stays zero rather than dividing by zero.
pub fn set_magnitude(v: Vec2, m: f32) -> Vec2 {
    let len = v.length();
    if len == 0.0 {
        Vec2::ZERO
    } else {
        v * (m / len)
    }
}

/// Clamp `v` to at most magnitude `max`. Shorter vectors pass through unchanged.
pub fn limit(v: Vec2, max: f32) -> Vec2 {
    if v.length() > max {
        set_magnitude(v, max)
    } else {
        v
    }
}
