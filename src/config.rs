//! Process-wide tunables. World units are screen pixels, origin top-left,
//! y pointing down.

use crate::entities::{PatternOpts, ShotOpts, Tint};

// ── Playfield & timing ────────────────────────────────────────────────────────

pub const WIDTH: f64 = 640.0;
pub const HEIGHT: f64 = 480.0;

/// Simulation ticks per second.
pub const TPS: u32 = 60;

/// Capacity of every bullet pool.
pub const MAX_BULLETS: usize = 1000;

/// Analog stick magnitude past which the axis counts as a press.
pub const DEAD_ZONE: f64 = 0.5;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_SKIN_SIZE: f64 = 32.0;
pub const PLAYER_HURTBOX_SIZE: f64 = 8.0;

/// Player movement in px/tick (halved while focused).
pub const MVT_SPEED: f64 = 8.0;

pub const PLAYER_SKIN_TINT: Tint = Tint::WHITE;
pub const PLAYER_HURTBOX_TINT: Tint = Tint::RED;

pub const PLAYER_SHOT: ShotOpts = ShotOpts {
    size: 12.0,
    speed: 20.0,
    freq: 60,
    base_spread: 100.0,
    focus_spread: 90.0,
    streams: 9,
    spawn_offset: 60.0,
    tint: Tint::WHITE,
};

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_COUNT: usize = 3;
pub const ENEMY_SIZE: f64 = 32.0;
pub const ENEMY_TINT: Tint = Tint::rgb(120, 220, 120);

/// Vertical band (top-left y) enemies are placed in.
pub const ENEMY_BAND: (f64, f64) = (40.0, 120.0);

/// Wide, slow fan fired straight down.
pub const STATIC_PATTERN: PatternOpts = PatternOpts {
    size: 8.0,
    speed: 3.0,
    freq: 6,
    spread: 120.0,
    streams: 12,
    spawn_offset: 24.0,
    tint: Tint::rgb(255, 80, 200),
};

/// Narrow, fast fan rotated toward the player.
pub const AIMED_PATTERN: PatternOpts = PatternOpts {
    size: 6.0,
    speed: 5.0,
    freq: 4,
    spread: 30.0,
    streams: 5,
    spawn_offset: 20.0,
    tint: Tint::rgb(80, 200, 255),
};

// ── Feedback ──────────────────────────────────────────────────────────────────

/// Full-screen colour a sink flashes when the hurtbox is hit.
pub const HIT_FLASH: Tint = Tint::RED;
