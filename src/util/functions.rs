use bevy::math::Vec2;

/// A modulo that works for negative numbers, always returns a value in `[0, y)`
pub fn wrap(x: f32, y: f32) -> f32 {
    let out = x.rem_euclid(y);
    // rem_euclid can round up to y for tiny negative inputs
    if out >= y {
        0.0
    } else {
        out
    }
}

/// Linear interpolation between a and b
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Keeps a point inside a `width` x `height` box, reflecting the velocity on the axis that hit
/// Returns true if a wall was hit
pub fn bounce_inside(pos: &mut Vec2, vel: &mut Vec2, width: f32, height: f32) -> bool {
    let mut hit = false;
    if pos.x < 0.0 {
        pos.x = 0.0;
        vel.x = vel.x.abs();
        hit = true;
    } else if pos.x >= width {
        pos.x = (width - 1.0).max(0.0);
        vel.x = -vel.x.abs();
        hit = true;
    }
    if pos.y < 0.0 {
        pos.y = 0.0;
        vel.y = vel.y.abs();
        hit = true;
    } else if pos.y >= height {
        pos.y = (height - 1.0).max(0.0);
        vel.y = -vel.y.abs();
        hit = true;
    }
    hit
}
