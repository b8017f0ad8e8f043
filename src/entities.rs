//! All game entity types — pure data, no logic.

// ── Primitives ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Tint {
    pub const WHITE: Tint = Tint::rgb(255, 255, 255);
    pub const RED: Tint = Tint::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Tint {
        Tint { r, g, b, a: 255 }
    }
}

/// A fixed-size, single-colour bitmap. Opaque to the simulation; only the
/// drawing sink looks inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub width: f64,
    pub height: f64,
    pub tint: Tint,
}

/// Axis-aligned rectangle, `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hitbox {
    pub x: f64,
    pub y: f64,
    pub sx: f64,
    pub sy: f64,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// One pool slot. `(vx, vy)` is a direction of length 0 or 1; the speed is
/// supplied by the owning emitter at integration time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub sx: f64,
    pub sy: f64,
    pub alive: bool,
}

// ── Patterns ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKind {
    /// The fan always opens straight down.
    Static,
    /// The fan is rotated to face the player.
    Aimed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatternOpts {
    /// Bullet width and height in px.
    pub size: f64,
    /// px/tick.
    pub speed: f64,
    /// Waves per second.
    pub freq: u32,
    /// Total arc of the fan in degrees.
    pub spread: f64,
    pub streams: usize,
    /// Radial distance from the emitter centre where bullets appear.
    pub spawn_offset: f64,
    pub tint: Tint,
}

#[derive(Clone, Debug)]
pub struct Pattern {
    pub kind: PatternKind,
    pub opts: PatternOpts,
    pub sprite: Sprite,
    /// Fixed-capacity pool; never grows after construction.
    pub bullets: Vec<Bullet>,
    /// Signed angle in radians between the downward vertical and the
    /// emitter→player line, positive toward +x.
    pub aim_line: f64,
    /// Scratch space for slot reservation, sized to `opts.streams`.
    pub(crate) reserved: Vec<usize>,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotOpts {
    pub size: f64,
    pub speed: f64,
    pub freq: u32,
    /// Fan arc in degrees while not focused.
    pub base_spread: f64,
    /// Fan arc in degrees while focused.
    pub focus_spread: f64,
    pub streams: usize,
    pub spawn_offset: f64,
    pub tint: Tint,
}

#[derive(Clone, Debug)]
pub struct Player {
    /// Authoritative for damage.
    pub hurtbox: Hitbox,
    /// Decorative, centred on the hurtbox.
    pub skin: Hitbox,
    pub hurtbox_sprite: Sprite,
    pub skin_sprite: Sprite,
    pub bullet_sprite: Sprite,
    pub mvt_speed: f64,
    pub is_focus: bool,
    /// Delta applied by the last movement step.
    pub vx: f64,
    pub vy: f64,
    pub shot: ShotOpts,
    pub bullets: Vec<Bullet>,
    pub last_shot_tick: u64,
    pub(crate) reserved: Vec<usize>,
}

/// A stationary emitter. Its hitbox is both the spawn origin of its pattern
/// and the target for player bullets.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub hitbox: Hitbox,
    pub sprite: Sprite,
    pub pattern: Pattern,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the tick function mutates. Player and enemies are siblings so
/// collision can borrow disjoint pools without back-pointers.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// Current tick; 0 before the first tick runs.
    pub tick: u64,
    /// Player bullets that landed on an enemy.
    pub score: u32,
    /// Enemy bullets that landed on the hurtbox.
    pub player_hits: u32,
}
