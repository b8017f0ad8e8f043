//! Scene construction and the fixed-tick update.
//!
//! `tick` owns the per-tick ordering: input, player motion, player shot,
//! enemy waves, integration, collision, then drawing. Randomness only enters
//! through the RNG handed to `init_state`, so a seeded RNG reproduces a
//! whole run.

use rand::Rng;
use tracing::{debug, info};

use crate::config::{
    AIMED_PATTERN, ENEMY_BAND, ENEMY_COUNT, ENEMY_SIZE, ENEMY_TINT, MAX_BULLETS, STATIC_PATTERN,
    WIDTH,
};
use crate::entities::{Enemy, GameState, Hitbox, PatternKind};
use crate::error::GameError;
use crate::input::InputSnapshot;
use crate::motion::cadence_gate;
use crate::pattern::{new_pattern, retarget, spawn, update_pattern};
use crate::player::{collide_bullets, default_player, integrate_bullets, move_player, shoot};
use crate::render::{draw_scene, new_sprite, DrawSink};

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub player_wave: bool,
    pub enemy_waves: u32,
    /// Enemy bullets that hit the hurtbox.
    pub player_hits: u32,
    /// Player bullets that hit an enemy.
    pub enemy_hits: u32,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a stationary enemy at `(x, y)` carrying one pattern.
pub fn new_enemy(x: f64, y: f64, kind: PatternKind) -> Result<Enemy, GameError> {
    let opts = match kind {
        PatternKind::Static => STATIC_PATTERN,
        PatternKind::Aimed => AIMED_PATTERN,
    };
    Ok(Enemy {
        hitbox: Hitbox {
            x,
            y,
            sx: ENEMY_SIZE,
            sy: ENEMY_SIZE,
        },
        sprite: new_sprite(ENEMY_SIZE, ENEMY_SIZE, ENEMY_TINT)?,
        pattern: new_pattern(kind, opts, MAX_BULLETS)?,
    })
}

/// Build the opening scene: the player near the bottom and a row of
/// enemies at random positions in the upper band, alternating static and
/// aimed patterns.
pub fn init_state(rng: &mut impl Rng) -> Result<GameState, GameError> {
    let player = default_player()?;

    let mut enemies = Vec::with_capacity(ENEMY_COUNT);
    for i in 0..ENEMY_COUNT {
        let x = rng.gen_range(0.0..=WIDTH - ENEMY_SIZE);
        let y = rng.gen_range(ENEMY_BAND.0..=ENEMY_BAND.1);
        let kind = if i % 2 == 0 {
            PatternKind::Static
        } else {
            PatternKind::Aimed
        };
        let mut enemy = new_enemy(x, y, kind)?;
        retarget(&mut enemy.pattern, &enemy.hitbox, &player.hurtbox);
        enemies.push(enemy);
    }

    info!(
        enemies = enemies.len(),
        pool_capacity = MAX_BULLETS,
        "scene ready"
    );

    Ok(GameState {
        player,
        enemies,
        tick: 0,
        score: 0,
        player_hits: 0,
    })
}

// ── Per-tick update ──────────────────────────────────────────────────────────

/// Advance the simulation by one tick and submit the resulting frame to
/// `sink`. Never fails; pool exhaustion silently drops the wave.
pub fn tick<S: DrawSink + ?Sized>(
    state: &mut GameState,
    input: &InputSnapshot,
    sink: &mut S,
) -> TickReport {
    state.tick += 1;
    let now = state.tick;
    let mut report = TickReport::default();

    // ── 1. Player motion ─────────────────────────────────────────────────────
    move_player(&mut state.player, input);

    // ── 2. Player shot ───────────────────────────────────────────────────────
    if input.shoot {
        report.player_wave = shoot(&mut state.player, now);
    }

    // ── 3. Enemy waves, each on its own cadence ──────────────────────────────
    for enemy in &mut state.enemies {
        if now % cadence_gate(enemy.pattern.opts.freq) == 0
            && spawn(&mut enemy.pattern, &enemy.hitbox)
        {
            report.enemy_waves += 1;
        }
    }

    // ── 4. Integrate & collide ───────────────────────────────────────────────
    integrate_bullets(&mut state.player);
    report.enemy_hits = collide_bullets(&mut state.player, &state.enemies);

    let hurtbox = state.player.hurtbox;
    for enemy in &mut state.enemies {
        report.player_hits += update_pattern(&mut enemy.pattern, &enemy.hitbox, &hurtbox);
    }

    state.score += report.enemy_hits;
    state.player_hits += report.player_hits;

    if report.player_hits > 0 {
        debug!(tick = now, hits = report.player_hits, "player hit");
    }
    if report.enemy_hits > 0 {
        debug!(tick = now, hits = report.enemy_hits, "enemy hit");
    }

    // ── 5. Frame ─────────────────────────────────────────────────────────────
    for _ in 0..report.player_hits {
        sink.hit();
    }
    draw_scene(state, sink);

    report
}
