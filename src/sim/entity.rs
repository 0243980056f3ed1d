//! Pooled entity types
//!
//! Everything here is plain data plus small per-frame advance methods. All
//! types implement `Default` so pools can pre-fill their slabs; a default
//! value is never observable outside the pool.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use super::geom::direction_to;
use super::weapon::WeaponKind;

/// A weapon shot in flight
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    /// Remaining lifetime in seconds
    pub lifetime: f32,
    pub weapon: WeaponKind,
    /// Piercing shots survive enemy hits (still one hit per frame)
    pub pierce: bool,
}

impl Projectile {
    /// Move and age; returns false once expired.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;
        self.lifetime -= dt;
        self.lifetime > 0.0
    }
}

/// Enemy behaviour archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Walks straight at the nearest player
    #[default]
    Chaser,
    /// Circles a player at a fixed distance while closing slowly
    Orbiter,
    /// Splits into smaller copies on death
    Splitter,
    /// Slow, tanky, heavy contact damage
    Brute,
    /// Periodic large spawn; counts toward boss kills
    Boss,
}

impl EnemyKind {
    pub fn base_health(self) -> f32 {
        match self {
            EnemyKind::Chaser => 20.0,
            EnemyKind::Orbiter => 14.0,
            EnemyKind::Splitter => 30.0,
            EnemyKind::Brute => 80.0,
            EnemyKind::Boss => 600.0,
        }
    }

    pub fn speed(self) -> f32 {
        match self {
            EnemyKind::Chaser => 90.0,
            EnemyKind::Orbiter => 120.0,
            EnemyKind::Splitter => 70.0,
            EnemyKind::Brute => 45.0,
            EnemyKind::Boss => 55.0,
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            EnemyKind::Chaser => 12.0,
            EnemyKind::Orbiter => 10.0,
            EnemyKind::Splitter => 14.0,
            EnemyKind::Brute => 22.0,
            EnemyKind::Boss => 42.0,
        }
    }

    pub fn contact_damage(self) -> f32 {
        match self {
            EnemyKind::Chaser => 8.0,
            EnemyKind::Orbiter => 6.0,
            EnemyKind::Splitter => 7.0,
            EnemyKind::Brute => 18.0,
            EnemyKind::Boss => 30.0,
        }
    }

    pub fn xp_value(self) -> u32 {
        match self {
            EnemyKind::Chaser => 2,
            EnemyKind::Orbiter => 3,
            EnemyKind::Splitter => 4,
            EnemyKind::Brute => 10,
            EnemyKind::Boss => 60,
        }
    }
}

/// A hostile actor
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    pub damage: f32,
    pub kind: EnemyKind,
    pub xp_value: u32,
    /// Orbiter: current angle around its target
    pub orbit_angle: f32,
    /// Orbiter: preferred distance from its target
    pub orbit_dist: f32,
    /// Splitter: generations of children left on death
    pub splits_remaining: u8,
}

impl Enemy {
    /// Fresh enemy of `kind` at `pos` with base stats.
    pub fn new(kind: EnemyKind, pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: kind.radius(),
            speed: kind.speed(),
            health: kind.base_health(),
            max_health: kind.base_health(),
            damage: kind.contact_damage(),
            kind,
            xp_value: kind.xp_value(),
            orbit_angle: 0.0,
            orbit_dist: 140.0,
            splits_remaining: if kind == EnemyKind::Splitter { 2 } else { 0 },
        }
    }

    /// Steer toward `target` according to the kind's motion model, then
    /// integrate. Knockback impulses decay through drag so a shoved enemy
    /// recovers its pursuit over a few frames.
    pub fn advance(&mut self, dt: f32, target: Vec2) {
        let steer = match self.kind {
            EnemyKind::Chaser | EnemyKind::Brute | EnemyKind::Boss | EnemyKind::Splitter => {
                direction_to(self.pos, target) * self.speed
            }
            EnemyKind::Orbiter => {
                // Circle the target while drifting inward
                self.orbit_angle += 1.4 * dt;
                self.orbit_dist = (self.orbit_dist - 12.0 * dt).max(30.0);
                let anchor =
                    target + Vec2::new(self.orbit_angle.cos(), self.orbit_angle.sin()) * self.orbit_dist;
                direction_to(self.pos, anchor) * self.speed
            }
        };
        // Blend residual knockback velocity back toward the steering velocity
        self.vel = self.vel.lerp(steer, (6.0 * dt).min(1.0));
        self.pos += self.vel * dt;
    }
}

/// A short-lived cosmetic spark
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Color tag for the renderer (enemy kind / effect id)
    pub color: u32,
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub size: f32,
}

impl Particle {
    pub fn advance(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;
        self.vel *= 0.96;
        self.lifetime -= dt;
        self.lifetime > 0.0
    }
}

/// Ground decal kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecalKind {
    #[default]
    Blood,
    Scorch,
}

/// A static, fading ground mark
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Decal {
    pub pos: Vec2,
    pub kind: DecalKind,
    /// Random rotation for visual variety
    pub rotation: f32,
    pub lifetime: f32,
    pub max_lifetime: f32,
}

impl Decal {
    pub fn advance(&mut self, dt: f32) -> bool {
        self.lifetime -= dt;
        self.lifetime > 0.0
    }
}

/// An experience pickup dropped by a dead enemy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct XpCrystal {
    pub pos: Vec2,
    pub value: u32,
    pub radius: f32,
    pub lifetime: f32,
}

impl XpCrystal {
    pub fn new(pos: Vec2, value: u32, lifetime: f32) -> Self {
        Self {
            pos,
            value,
            radius: 6.0,
            lifetime,
        }
    }

    /// Drift toward `target` when inside `magnet_radius`; the pull speeds up
    /// as the remaining distance shrinks. Returns false once expired.
    pub fn advance(&mut self, dt: f32, target: Option<Vec2>, magnet_radius: f32, cfg: &SimConfig) -> bool {
        if let Some(target) = target {
            let dist = self.pos.distance(target);
            if dist > f32::EPSILON && dist < magnet_radius {
                let speed = cfg.magnet_base_speed * (magnet_radius / dist).min(8.0);
                self.pos += direction_to(self.pos, target) * speed * dt;
            }
        }
        self.lifetime -= dt;
        self.lifetime > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projectile_expires() {
        let mut p = Projectile {
            vel: Vec2::new(100.0, 0.0),
            lifetime: 0.05,
            ..Default::default()
        };
        assert!(p.advance(1.0 / 60.0));
        assert!(p.pos.x > 0.0);
        assert!(p.advance(1.0 / 60.0));
        assert!(!p.advance(1.0 / 60.0));
    }

    #[test]
    fn test_chaser_closes_distance() {
        let mut e = Enemy::new(EnemyKind::Chaser, Vec2::new(400.0, 0.0));
        let target = Vec2::ZERO;
        let before = e.pos.distance(target);
        for _ in 0..60 {
            e.advance(1.0 / 60.0, target);
        }
        assert!(e.pos.distance(target) < before);
    }

    #[test]
    fn test_crystal_magnetizes_only_in_radius() {
        let cfg = SimConfig::default();
        let mut far = XpCrystal::new(Vec2::new(500.0, 0.0), 1, 10.0);
        far.advance(1.0 / 60.0, Some(Vec2::ZERO), cfg.magnet_radius, &cfg);
        assert_eq!(far.pos.x, 500.0);

        let mut near = XpCrystal::new(Vec2::new(50.0, 0.0), 1, 10.0);
        near.advance(1.0 / 60.0, Some(Vec2::ZERO), cfg.magnet_radius, &cfg);
        assert!(near.pos.x < 50.0);
    }

    #[test]
    fn test_crystal_pull_strengthens_when_close() {
        let cfg = SimConfig::default();
        let dt = 1.0 / 60.0;
        let mut near = XpCrystal::new(Vec2::new(20.0, 0.0), 1, 10.0);
        let mut mid = XpCrystal::new(Vec2::new(80.0, 0.0), 1, 10.0);
        near.advance(dt, Some(Vec2::ZERO), cfg.magnet_radius, &cfg);
        mid.advance(dt, Some(Vec2::ZERO), cfg.magnet_radius, &cfg);
        let near_step = 20.0 - near.pos.x;
        let mid_step = 80.0 - mid.pos.x;
        assert!(near_step > mid_step);
    }
}
