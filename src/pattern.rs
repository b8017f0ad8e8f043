//! Enemy pattern emitter: fan-shaped waves fired from a stationary hitbox,
//! optionally rotated to track the player.

use tracing::trace;

use crate::collision::{aim_line, bullet_box, centre, overlap, rotate};
use crate::entities::{Hitbox, Pattern, PatternKind, PatternOpts};
use crate::error::GameError;
use crate::motion::{find_first_n_free_into, is_free, step_pool};
use crate::render::new_sprite;

/// Build a pattern with an empty pool of `capacity` slots.
pub fn new_pattern(
    kind: PatternKind,
    opts: PatternOpts,
    capacity: usize,
) -> Result<Pattern, GameError> {
    if opts.streams == 0 {
        return Err(GameError::InvalidPattern("streams must be at least 1"));
    }
    if opts.freq == 0 {
        return Err(GameError::InvalidPattern("freq must be at least 1"));
    }
    let sprite = new_sprite(opts.size, opts.size, opts.tint)?;

    Ok(Pattern {
        kind,
        opts,
        sprite,
        bullets: vec![Default::default(); capacity],
        aim_line: 0.0,
        reserved: Vec::with_capacity(opts.streams),
    })
}

/// Angle in radians of stream `i` out of `n` across a `spread_deg` arc,
/// measured from the fan's axis. A single stream always points along the
/// axis.
pub fn stream_angle(i: usize, n: usize, spread_deg: f64) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    let deg = -spread_deg / 2.0 + i as f64 * spread_deg / (n - 1) as f64;
    deg.to_radians()
}

/// Fire one wave of exactly `opts.streams` bullets from `hb`, or nothing if
/// the pool cannot hold all of them. Returns whether the wave was fired.
pub fn spawn(p: &mut Pattern, hb: &Hitbox) -> bool {
    let n = p.opts.streams;
    find_first_n_free_into(&p.bullets, n, is_free, &mut p.reserved);
    if p.reserved.len() < n {
        return false;
    }

    let (cx, cy) = centre(hb);
    let size = p.opts.size;
    let aimed = p.kind == PatternKind::Aimed;

    for (i, &slot) in p.reserved.iter().enumerate() {
        let (sin, cos) = stream_angle(i, n, p.opts.spread).sin_cos();
        let (vx, vy) = if aimed {
            rotate(sin, cos, p.aim_line)
        } else {
            (sin, cos)
        };

        let b = &mut p.bullets[slot];
        b.x = cx + p.opts.spawn_offset * sin - size / 2.0;
        b.y = cy + p.opts.spawn_offset * cos - size / 2.0;
        b.vx = vx;
        b.vy = vy;
        b.sx = size;
        b.sy = size;
        b.alive = true;
    }

    trace!(streams = n, aim_line = p.aim_line, "pattern wave");
    true
}

/// Point the pattern at the centre of `target`.
pub fn retarget(p: &mut Pattern, hb: &Hitbox, target: &Hitbox) {
    p.aim_line = aim_line(centre(hb), centre(target));
}

pub fn integrate(p: &mut Pattern) {
    step_pool(&mut p.bullets, p.opts.speed, p.opts.size);
}

/// Retire every alive bullet overlapping `hurtbox`, in pool order, and
/// return how many did. Every bullet is tested; one hit does not stop the
/// scan.
pub fn collide(p: &mut Pattern, hurtbox: &Hitbox) -> u32 {
    let mut hits = 0;
    for b in p.bullets.iter_mut().filter(|b| b.alive) {
        if overlap(&bullet_box(b), hurtbox) {
            b.alive = false;
            hits += 1;
        }
    }
    hits
}

/// One tick of the emitter's own bookkeeping: integrate, collide against
/// the hurtbox, then re-aim at it. Returns the number of hits.
pub fn update_pattern(p: &mut Pattern, hb: &Hitbox, hurtbox: &Hitbox) -> u32 {
    integrate(p);
    let hits = collide(p, hurtbox);
    retarget(p, hb, hurtbox);
    hits
}
