//! Time-based enemy spawner
//!
//! Spawn cadence ramps up with survival time; enemies appear on a ring
//! around the party focus point, outside the visible area. A boss arrives
//! on a fixed period. Full-pool spawns are silently dropped.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use super::entity::{Enemy, EnemyKind};
use super::pool::Pool;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    /// Time until the next regular spawn
    timer: f32,
    /// Time until the next boss spawn
    boss_timer: f32,
}

impl Spawner {
    pub fn new(cfg: &SimConfig) -> Self {
        Self {
            timer: cfg.spawn_interval_start,
            boss_timer: cfg.boss_period,
        }
    }

    /// Current interval between regular spawns, ramping from the start value
    /// down to the floor over `spawn_ramp_secs`.
    fn interval(&self, elapsed: f32, cfg: &SimConfig) -> f32 {
        let t = (elapsed / cfg.spawn_ramp_secs).min(1.0);
        cfg.spawn_interval_start + (cfg.spawn_interval_min - cfg.spawn_interval_start) * t
    }

    /// Pick an enemy kind for the current survival time. Later kinds only
    /// join the table once the run is old enough.
    fn roll_kind(&self, elapsed: f32, rng: &mut Pcg32) -> EnemyKind {
        let roll: f32 = rng.random();
        if elapsed > 90.0 && roll < 0.12 {
            EnemyKind::Brute
        } else if elapsed > 45.0 && roll < 0.30 {
            EnemyKind::Splitter
        } else if elapsed > 20.0 && roll < 0.55 {
            EnemyKind::Orbiter
        } else {
            EnemyKind::Chaser
        }
    }

    /// Random point on the spawn ring around `focus`.
    fn ring_position(&self, focus: Vec2, rng: &mut Pcg32, cfg: &SimConfig) -> Vec2 {
        let angle = rng.random_range(0.0..TAU);
        focus + Vec2::new(angle.cos(), angle.sin()) * cfg.spawn_ring_radius
    }

    /// Advance timers and emit any due spawns into the enemy pool.
    pub fn update(
        &mut self,
        dt: f32,
        elapsed: f32,
        focus: Vec2,
        enemies: &mut Pool<Enemy>,
        rng: &mut Pcg32,
        cfg: &SimConfig,
    ) {
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.timer = self.interval(elapsed, cfg);
            let kind = self.roll_kind(elapsed, rng);
            let pos = self.ring_position(focus, rng, cfg);
            if enemies.spawn(Enemy::new(kind, pos)).is_none() {
                log::debug!("enemy pool full, dropping {kind:?} spawn");
            }
        }

        self.boss_timer -= dt;
        if self.boss_timer <= 0.0 {
            self.boss_timer = cfg.boss_period;
            let pos = self.ring_position(focus, rng, cfg);
            if enemies.spawn(Enemy::new(EnemyKind::Boss, pos)).is_some() {
                log::debug!("boss spawned at {pos:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_spawns_accumulate_over_time() {
        let cfg = SimConfig::default();
        let mut spawner = Spawner::new(&cfg);
        let mut enemies: Pool<Enemy> = Pool::new(cfg.max_enemies);
        let mut rng = Pcg32::seed_from_u64(1);

        let mut t = 0.0;
        for _ in 0..(10.0 / DT) as u32 {
            spawner.update(DT, t, Vec2::ZERO, &mut enemies, &mut rng, &cfg);
            t += DT;
        }
        // 10 seconds at a ~2s starting interval
        assert!(enemies.count() >= 4);
    }

    #[test]
    fn test_full_pool_drops_spawns_silently() {
        let cfg = SimConfig::tiny();
        let mut spawner = Spawner::new(&cfg);
        let mut enemies: Pool<Enemy> = Pool::new(cfg.max_enemies);
        let mut rng = Pcg32::seed_from_u64(2);

        let mut t = 0.0;
        for _ in 0..(60.0 / DT) as u32 {
            spawner.update(DT, t, Vec2::ZERO, &mut enemies, &mut rng, &cfg);
            t += DT;
        }
        assert_eq!(enemies.count(), cfg.max_enemies);
    }

    #[test]
    fn test_boss_arrives_on_period() {
        let cfg = SimConfig::default();
        let mut spawner = Spawner::new(&cfg);
        let mut enemies: Pool<Enemy> = Pool::new(cfg.max_enemies);
        let mut rng = Pcg32::seed_from_u64(3);

        let mut t = 0.0;
        let frames = ((cfg.boss_period + 1.0) / DT) as u32;
        for _ in 0..frames {
            spawner.update(DT, t, Vec2::ZERO, &mut enemies, &mut rng, &cfg);
            t += DT;
        }
        let bosses = enemies
            .iter()
            .filter(|(_, e)| e.kind == EnemyKind::Boss)
            .count();
        assert_eq!(bosses, 1);
    }

    #[test]
    fn test_spawn_ring_distance() {
        let cfg = SimConfig::default();
        let spawner = Spawner::new(&cfg);
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..20 {
            let p = spawner.ring_position(Vec2::new(100.0, -50.0), &mut rng, &cfg);
            let d = p.distance(Vec2::new(100.0, -50.0));
            assert!((d - cfg.spawn_ring_radius).abs() < 1.0);
        }
    }
}
