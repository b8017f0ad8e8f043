use std::f64::consts::FRAC_PI_2;

use shmup::entities::*;
use shmup::error::GameError;
use shmup::motion::alive_count;
use shmup::pattern::*;

fn opts(streams: usize, spread: f64) -> PatternOpts {
    PatternOpts {
        size: 4.0,
        speed: 3.0,
        freq: 10,
        spread,
        streams,
        spawn_offset: 0.0,
        tint: Tint::WHITE,
    }
}

/// A zero-size box so the centre is exactly `(x, y)`.
fn point(x: f64, y: f64) -> Hitbox {
    Hitbox { x, y, sx: 0.0, sy: 0.0 }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn alive(p: &Pattern) -> Vec<Bullet> {
    p.bullets.iter().copied().filter(|b| b.alive).collect()
}

// ── new_pattern ───────────────────────────────────────────────────────────────

#[test]
fn new_pattern_starts_empty() {
    let p = new_pattern(PatternKind::Static, opts(3, 90.0), 50).unwrap();
    assert_eq!(p.bullets.len(), 50);
    assert_eq!(alive_count(&p.bullets), 0);
    assert_eq!(p.aim_line, 0.0);
    assert_eq!(p.sprite.width, 4.0);
}

#[test]
fn new_pattern_rejects_zero_streams() {
    let err = new_pattern(PatternKind::Static, opts(0, 90.0), 10).unwrap_err();
    assert!(matches!(err, GameError::InvalidPattern(_)));
}

#[test]
fn new_pattern_rejects_zero_freq() {
    let mut o = opts(1, 0.0);
    o.freq = 0;
    assert!(matches!(
        new_pattern(PatternKind::Static, o, 10),
        Err(GameError::InvalidPattern(_))
    ));
}

#[test]
fn new_pattern_rejects_empty_sprite() {
    let mut o = opts(1, 0.0);
    o.size = 0.0;
    assert!(matches!(
        new_pattern(PatternKind::Aimed, o, 10),
        Err(GameError::InvalidSprite { .. })
    ));
}

// ── stream_angle ──────────────────────────────────────────────────────────────

#[test]
fn single_stream_ignores_spread() {
    assert_eq!(stream_angle(0, 1, 270.0), 0.0);
}

#[test]
fn streams_span_the_whole_arc() {
    assert!(close(stream_angle(0, 3, 180.0), -FRAC_PI_2));
    assert!(close(stream_angle(1, 3, 180.0), 0.0));
    assert!(close(stream_angle(2, 3, 180.0), FRAC_PI_2));
}

// ── spawn ─────────────────────────────────────────────────────────────────────

#[test]
fn lone_aimed_shot_below_emitter_goes_straight_down() {
    let mut p = new_pattern(PatternKind::Aimed, opts(1, 123.0), 10).unwrap();
    retarget(&mut p, &point(100.0, 0.0), &point(100.0, 300.0));
    assert_eq!(p.aim_line, 0.0);

    assert!(spawn(&mut p, &point(100.0, 0.0)));
    let b = alive(&p);
    assert_eq!(b.len(), 1);
    assert_eq!((b[0].vx, b[0].vy), (0.0, 1.0));
}

#[test]
fn aimed_shot_turns_toward_player_on_the_right() {
    let mut p = new_pattern(PatternKind::Aimed, opts(1, 0.0), 10).unwrap();
    retarget(&mut p, &point(0.0, 0.0), &point(100.0, 0.0));
    assert!(close(p.aim_line, FRAC_PI_2));

    spawn(&mut p, &point(0.0, 0.0));
    let b = alive(&p)[0];
    assert!(close(b.vx, 1.0));
    assert!(close(b.vy, 0.0));
}

#[test]
fn fan_of_three_over_half_turn() {
    let mut p = new_pattern(PatternKind::Static, opts(3, 180.0), 10).unwrap();
    assert!(spawn(&mut p, &point(320.0, 100.0)));

    let dirs: Vec<(f64, f64)> = alive(&p).iter().map(|b| (b.vx, b.vy)).collect();
    let expected = [(-1.0, 0.0), (0.0, 1.0), (1.0, 0.0)];
    assert_eq!(dirs.len(), 3);
    for ((vx, vy), (ex, ey)) in dirs.iter().zip(expected) {
        assert!(close(*vx, ex) && close(*vy, ey), "got ({vx}, {vy})");
    }
}

#[test]
fn saturated_pool_fires_nothing() {
    let mut p = new_pattern(PatternKind::Static, opts(3, 60.0), 2).unwrap();
    let before = p.bullets.clone();
    assert!(!spawn(&mut p, &point(50.0, 50.0)));
    assert_eq!(p.bullets, before);
}

#[test]
fn wave_is_all_or_nothing() {
    let mut p = new_pattern(PatternKind::Static, opts(3, 60.0), 5).unwrap();
    assert!(spawn(&mut p, &point(50.0, 50.0)));
    // Only two slots left for a three-stream wave
    assert!(!spawn(&mut p, &point(50.0, 50.0)));
    assert_eq!(alive_count(&p.bullets), 3);
}

#[test]
fn spawn_fills_lowest_free_slots() {
    let mut p = new_pattern(PatternKind::Static, opts(2, 30.0), 4).unwrap();
    p.bullets[1].alive = true;
    spawn(&mut p, &point(50.0, 50.0));
    let used: Vec<bool> = p.bullets.iter().map(|b| b.alive).collect();
    assert_eq!(used, vec![true, true, true, false]);
}

#[test]
fn zero_spread_collapses_streams() {
    let mut p = new_pattern(PatternKind::Static, opts(4, 0.0), 10).unwrap();
    assert!(spawn(&mut p, &point(50.0, 50.0)));
    let b = alive(&p);
    assert_eq!(b.len(), 4);
    assert!(b.iter().all(|x| x.vx == 0.0 && x.vy == 1.0));
    assert!(b.iter().all(|x| x.x == b[0].x && x.y == b[0].y));
}

#[test]
fn spawn_position_uses_centre_offset_and_size() {
    let mut o = opts(1, 0.0);
    o.spawn_offset = 10.0;
    let mut p = new_pattern(PatternKind::Static, o, 4).unwrap();
    spawn(&mut p, &Hitbox { x: 100.0, y: 50.0, sx: 20.0, sy: 20.0 });

    let b = alive(&p)[0];
    // Centre (110, 60), pushed 10 px down, minus half the 4 px bullet
    assert_eq!((b.x, b.y), (108.0, 68.0));
    assert_eq!((b.sx, b.sy), (4.0, 4.0));
}

#[test]
fn aimed_matches_static_when_player_is_directly_below() {
    let emitter = point(200.0, 40.0);
    let mut aimed = new_pattern(PatternKind::Aimed, opts(7, 120.0), 10).unwrap();
    let mut fixed = new_pattern(PatternKind::Static, opts(7, 120.0), 10).unwrap();

    retarget(&mut aimed, &emitter, &point(200.0, 400.0));
    spawn(&mut aimed, &emitter);
    spawn(&mut fixed, &emitter);

    for (a, s) in alive(&aimed).iter().zip(alive(&fixed)) {
        assert!(close(a.vx, s.vx) && close(a.vy, s.vy));
    }
}

#[test]
fn aimed_fan_stays_unit_length() {
    let emitter = point(300.0, 50.0);
    let mut p = new_pattern(PatternKind::Aimed, opts(9, 140.0), 20).unwrap();
    retarget(&mut p, &emitter, &point(20.0, 470.0));
    assert!(p.aim_line < 0.0);

    spawn(&mut p, &emitter);
    for b in alive(&p) {
        assert!(close(b.vx * b.vx + b.vy * b.vy, 1.0));
    }
}

#[test]
fn static_pattern_ignores_aim_line() {
    let mut p = new_pattern(PatternKind::Static, opts(1, 0.0), 4).unwrap();
    p.aim_line = 1.0;
    spawn(&mut p, &point(50.0, 50.0));
    let b = alive(&p)[0];
    assert_eq!((b.vx, b.vy), (0.0, 1.0));
}

// ── integrate / collide / update ──────────────────────────────────────────────

#[test]
fn collide_retires_every_overlapping_bullet() {
    let mut p = new_pattern(PatternKind::Static, opts(3, 0.0), 4).unwrap();
    spawn(&mut p, &point(100.0, 100.0));
    // Three co-located bullets, all inside the hurtbox
    let hurtbox = Hitbox { x: 95.0, y: 95.0, sx: 10.0, sy: 10.0 };

    assert_eq!(collide(&mut p, &hurtbox), 3);
    assert_eq!(alive_count(&p.bullets), 0);
}

#[test]
fn collide_misses_leave_bullets_alive() {
    let mut p = new_pattern(PatternKind::Static, opts(2, 0.0), 4).unwrap();
    spawn(&mut p, &point(100.0, 100.0));
    let hurtbox = Hitbox { x: 300.0, y: 300.0, sx: 8.0, sy: 8.0 };
    assert_eq!(collide(&mut p, &hurtbox), 0);
    assert_eq!(alive_count(&p.bullets), 2);
}

#[test]
fn update_moves_then_hits_then_reaims() {
    let emitter = point(100.0, 0.0);
    let mut p = new_pattern(PatternKind::Aimed, opts(1, 0.0), 4).unwrap();
    spawn(&mut p, &emitter);
    let start_y = alive(&p)[0].y;

    let far = Hitbox { x: 400.0, y: 400.0, sx: 8.0, sy: 8.0 };
    assert_eq!(update_pattern(&mut p, &emitter, &far), 0);
    assert_eq!(alive(&p)[0].y, start_y + 3.0);
    assert!(p.aim_line > 0.0);

    // Park the hurtbox on the bullet's next position
    let b = alive(&p)[0];
    let near = Hitbox { x: b.x, y: b.y + 3.0, sx: 8.0, sy: 8.0 };
    assert_eq!(update_pattern(&mut p, &emitter, &near), 1);
    assert_eq!(alive_count(&p.bullets), 0);
}

#[test]
fn integrate_retires_bullets_leaving_the_field() {
    let mut o = opts(1, 0.0);
    o.speed = 1000.0;
    let mut p = new_pattern(PatternKind::Static, o, 4).unwrap();
    spawn(&mut p, &point(100.0, 100.0));
    integrate(&mut p);
    assert_eq!(alive_count(&p.bullets), 0);
}
