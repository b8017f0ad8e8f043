//! The boundary between the simulation and whatever puts pixels on screen.

use crate::config::{HEIGHT, HIT_FLASH, WIDTH};
use crate::entities::{Bullet, GameState, Sprite, Tint};
use crate::error::GameError;

/// Consumer of one frame's draw submissions. The simulation never talks to
/// a graphics backend beyond this trait.
pub trait DrawSink {
    /// Draw `sprite` with its top-left corner at world position `(x, y)`.
    fn draw(&mut self, sprite: &Sprite, x: f64, y: f64);

    /// Fill the whole frame with `tint`.
    fn fill(&mut self, tint: Tint);

    /// The player's hurtbox was hit this tick.
    fn hit(&mut self) {
        self.fill(HIT_FLASH);
    }
}

/// Create a single-colour bitmap. Fails for empty or larger-than-playfield
/// dimensions, which is fatal at startup.
pub fn new_sprite(width: f64, height: f64, tint: Tint) -> Result<Sprite, GameError> {
    let valid = |v: f64, max: f64| v.is_finite() && v >= 1.0 && v <= max;
    if !valid(width, WIDTH) || !valid(height, HEIGHT) {
        return Err(GameError::InvalidSprite { width, height });
    }
    Ok(Sprite {
        width,
        height,
        tint,
    })
}

/// Submit the whole scene: enemies, enemy bullets, player bullets, the
/// player skin and, while focused, the hurtbox on top.
pub fn draw_scene<S: DrawSink + ?Sized>(state: &GameState, sink: &mut S) {
    for enemy in &state.enemies {
        sink.draw(&enemy.sprite, enemy.hitbox.x, enemy.hitbox.y);
    }
    for enemy in &state.enemies {
        draw_pool(sink, &enemy.pattern.sprite, &enemy.pattern.bullets);
    }

    let p = &state.player;
    draw_pool(sink, &p.bullet_sprite, &p.bullets);
    sink.draw(&p.skin_sprite, p.skin.x, p.skin.y);
    if p.is_focus {
        sink.draw(&p.hurtbox_sprite, p.hurtbox.x, p.hurtbox.y);
    }
}

fn draw_pool<S: DrawSink + ?Sized>(sink: &mut S, sprite: &Sprite, pool: &[Bullet]) {
    for b in pool.iter().filter(|b| b.alive) {
        sink.draw(sprite, b.x, b.y);
    }
}
