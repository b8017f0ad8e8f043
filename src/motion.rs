//! Bullet integration, pool slot reservation and cadence.

use crate::config::{HEIGHT, TPS, WIDTH};
use crate::entities::Bullet;

/// Advance `b` by one tick and retire it once its `size`-square lies
/// entirely outside the playfield.
pub fn step(b: &mut Bullet, speed: f64, size: f64) {
    b.x += b.vx * speed;
    b.y += b.vy * speed;

    if b.x + size < 0.0 || b.y + size < 0.0 || b.x > WIDTH || b.y > HEIGHT {
        b.alive = false;
    }
}

/// Integrate every alive bullet of a pool.
pub fn step_pool(pool: &mut [Bullet], speed: f64, size: f64) {
    for b in pool.iter_mut().filter(|b| b.alive) {
        step(b, speed, size);
    }
}

pub fn is_free(b: &Bullet) -> bool {
    !b.alive
}

/// Collect into `out` the indices of up to `n` bullets matching `pred`,
/// lowest index first. `out` is cleared first and only reallocates if its
/// capacity is below `n`.
pub fn find_first_n_free_into<F>(pool: &[Bullet], n: usize, pred: F, out: &mut Vec<usize>)
where
    F: Fn(&Bullet) -> bool,
{
    out.clear();
    if n == 0 {
        return;
    }
    for (i, b) in pool.iter().enumerate() {
        if pred(b) {
            out.push(i);
            if out.len() == n {
                break;
            }
        }
    }
}

/// Allocating variant of [`find_first_n_free_into`]. Fewer than `n`
/// indices means the pool cannot take a whole wave.
pub fn find_first_n_free<F>(pool: &[Bullet], n: usize, pred: F) -> Vec<usize>
where
    F: Fn(&Bullet) -> bool,
{
    let mut out = Vec::with_capacity(n);
    find_first_n_free_into(pool, n, pred, &mut out);
    out
}

pub fn alive_count(pool: &[Bullet]) -> usize {
    pool.iter().filter(|b| b.alive).count()
}

/// Ticks between two waves at `freq` waves per second, rounded up so the
/// emitted rate never exceeds `freq`.
pub fn cadence_gate(freq: u32) -> u64 {
    if freq == 0 {
        return u64::MAX;
    }
    u64::from(TPS.div_ceil(freq)).max(1)
}
