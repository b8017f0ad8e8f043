//! Rectangle overlap and aiming geometry.

use crate::entities::{Bullet, Hitbox};

/// Strict AABB overlap: touching edges do not collide.
pub fn overlap(a: &Hitbox, b: &Hitbox) -> bool {
    a.x < b.x + b.sx && a.x + a.sx > b.x && a.y < b.y + b.sy && a.y + a.sy > b.y
}

pub fn bullet_box(b: &Bullet) -> Hitbox {
    Hitbox {
        x: b.x,
        y: b.y,
        sx: b.sx,
        sy: b.sy,
    }
}

pub fn centre(hb: &Hitbox) -> (f64, f64) {
    (hb.x + hb.sx / 2.0, hb.y + hb.sy / 2.0)
}

/// Signed angle between the downward vertical at `emitter` and the
/// `emitter → target` vector, positive toward +x.
///
/// The arguments to `atan2` are swapped on purpose: stream angles are
/// measured from the vertical, not from the x axis.
pub fn aim_line(emitter: (f64, f64), target: (f64, f64)) -> f64 {
    (target.0 - emitter.0).atan2(target.1 - emitter.1)
}

/// Rotate a direction expressed in an emitter's local "down" frame by
/// `alpha`. Both output components use the input `vx`, so unit vectors stay
/// unit.
pub fn rotate(vx: f64, vy: f64, alpha: f64) -> (f64, f64) {
    let (sin, cos) = alpha.sin_cos();
    (vx * cos + vy * sin, -vx * sin + vy * cos)
}
