//! Player movement and the player's upward shot emitter.

use tracing::trace;

use crate::collision::{bullet_box, centre, overlap};
use crate::config::{
    DEAD_ZONE, HEIGHT, MAX_BULLETS, MVT_SPEED, PLAYER_HURTBOX_SIZE, PLAYER_HURTBOX_TINT,
    PLAYER_SHOT, PLAYER_SKIN_SIZE, PLAYER_SKIN_TINT, WIDTH,
};
use crate::entities::{Enemy, Hitbox, Player, ShotOpts};
use crate::error::GameError;
use crate::input::InputSnapshot;
use crate::motion::{cadence_gate, find_first_n_free_into, is_free, step_pool};
use crate::pattern::stream_angle;
use crate::render::new_sprite;

/// Build a player whose hurtbox top-left sits at `(x, y)`, with the skin
/// centred on it.
pub fn new_player(
    x: f64,
    y: f64,
    shot: ShotOpts,
    capacity: usize,
) -> Result<Player, GameError> {
    if shot.streams == 0 {
        return Err(GameError::InvalidPattern("player streams must be at least 1"));
    }
    if shot.freq == 0 {
        return Err(GameError::InvalidPattern("player freq must be at least 1"));
    }

    let hurtbox = Hitbox {
        x,
        y,
        sx: PLAYER_HURTBOX_SIZE,
        sy: PLAYER_HURTBOX_SIZE,
    };
    let offset = (PLAYER_HURTBOX_SIZE - PLAYER_SKIN_SIZE) / 2.0;
    let skin = Hitbox {
        x: x + offset,
        y: y + offset,
        sx: PLAYER_SKIN_SIZE,
        sy: PLAYER_SKIN_SIZE,
    };

    Ok(Player {
        hurtbox,
        skin,
        hurtbox_sprite: new_sprite(PLAYER_HURTBOX_SIZE, PLAYER_HURTBOX_SIZE, PLAYER_HURTBOX_TINT)?,
        skin_sprite: new_sprite(PLAYER_SKIN_SIZE, PLAYER_SKIN_SIZE, PLAYER_SKIN_TINT)?,
        bullet_sprite: new_sprite(shot.size, shot.size, shot.tint)?,
        mvt_speed: MVT_SPEED,
        is_focus: false,
        vx: 0.0,
        vy: 0.0,
        shot,
        bullets: vec![Default::default(); capacity],
        last_shot_tick: 0,
        reserved: Vec::with_capacity(shot.streams),
    })
}

/// The player centred horizontally, three quarters of the way down, with
/// the default shot table.
pub fn default_player() -> Result<Player, GameError> {
    new_player(
        (WIDTH - PLAYER_HURTBOX_SIZE) / 2.0,
        HEIGHT * 0.75 - PLAYER_HURTBOX_SIZE / 2.0,
        PLAYER_SHOT,
        MAX_BULLETS,
    )
}

/// Apply one tick of input: latch focus, then move skin and hurtbox by the
/// clamped step and record it as the player's velocity.
pub fn move_player(p: &mut Player, input: &InputSnapshot) {
    p.is_focus = input.focus;

    let speed = if p.is_focus {
        p.mvt_speed / 2.0
    } else {
        p.mvt_speed
    };

    let (mut tx, mut ty) = input.direction(DEAD_ZONE);
    let r = (tx * tx + ty * ty).sqrt();
    if r != 0.0 {
        tx = tx / r * speed;
        ty = ty / r * speed;

        let hb = &p.hurtbox;
        tx = (hb.x + tx).clamp(0.0, WIDTH - hb.sx) - hb.x;
        ty = (hb.y + ty).clamp(0.0, HEIGHT - hb.sy) - hb.y;
    }

    p.hurtbox.x += tx;
    p.hurtbox.y += ty;
    p.skin.x += tx;
    p.skin.y += ty;
    p.vx = tx;
    p.vy = ty;
}

/// Try to fire one upward wave at `current_tick`. Nothing happens until a
/// full cadence interval has passed since the last attempt; once it has,
/// the attempt consumes the interval even if the pool is too full to fire.
/// Returns whether a wave was fired.
pub fn shoot(p: &mut Player, current_tick: u64) -> bool {
    if current_tick.saturating_sub(p.last_shot_tick) < cadence_gate(p.shot.freq) {
        return false;
    }
    p.last_shot_tick = current_tick;

    let n = p.shot.streams;
    find_first_n_free_into(&p.bullets, n, is_free, &mut p.reserved);
    if p.reserved.len() < n {
        return false;
    }

    let spread = if p.is_focus {
        p.shot.focus_spread
    } else {
        p.shot.base_spread
    };
    let (cx, cy) = centre(&p.hurtbox);
    let size = p.shot.size;

    for (i, &slot) in p.reserved.iter().enumerate() {
        let (sin, cos) = stream_angle(i, n, spread).sin_cos();

        let b = &mut p.bullets[slot];
        b.x = cx + p.shot.spawn_offset * sin - size / 2.0;
        b.y = cy - p.shot.spawn_offset * cos - size / 2.0;
        (b.vx, b.vy) = if p.is_focus { (0.0, -1.0) } else { (sin, -cos) };
        b.sx = size;
        b.sy = size;
        b.alive = true;
    }

    trace!(streams = n, focus = p.is_focus, "player wave");
    true
}

pub fn integrate_bullets(p: &mut Player) {
    step_pool(&mut p.bullets, p.shot.speed, p.shot.size);
}

/// Retire every alive player bullet that overlaps an enemy and return how
/// many did.
pub fn collide_bullets(p: &mut Player, enemies: &[Enemy]) -> u32 {
    let mut hits = 0;
    for b in p.bullets.iter_mut().filter(|b| b.alive) {
        let bb = bullet_box(b);
        if enemies.iter().any(|e| overlap(&bb, &e.hitbox)) {
            b.alive = false;
            hits += 1;
        }
    }
    hits
}
