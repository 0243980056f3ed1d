//! Weapons and projectile emission
//!
//! A weapon is a cooldown state machine plus a projectile template. Base
//! stats come from a closed per-kind table; switching kinds reinitializes
//! every stat from that table, so in-run upgrades do not survive a switch
//! (a deliberate loadout policy).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Projectile;
use super::pool::Pool;

/// Weapon archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Balanced single shot
    #[default]
    Blaster,
    /// Three-shot fan, lower per-shot damage
    Spread,
    /// Slow, heavy, piercing bolt
    Lance,
    /// Very fast, low damage
    Ripper,
}

impl WeaponKind {
    /// Cycle order for the weapon-switch input.
    pub fn next(self) -> Self {
        match self {
            WeaponKind::Blaster => WeaponKind::Spread,
            WeaponKind::Spread => WeaponKind::Lance,
            WeaponKind::Lance => WeaponKind::Ripper,
            WeaponKind::Ripper => WeaponKind::Blaster,
        }
    }
}

/// Base stats for one weapon kind
struct WeaponStats {
    damage: f32,
    fire_rate: f32,
    projectile_speed: f32,
    projectile_radius: f32,
    projectile_lifetime: f32,
    projectile_count: u32,
    pierce: bool,
}

fn base_stats(kind: WeaponKind) -> WeaponStats {
    match kind {
        WeaponKind::Blaster => WeaponStats {
            damage: 10.0,
            fire_rate: 2.5,
            projectile_speed: 420.0,
            projectile_radius: 5.0,
            projectile_lifetime: 1.2,
            projectile_count: 1,
            pierce: false,
        },
        WeaponKind::Spread => WeaponStats {
            damage: 6.0,
            fire_rate: 2.0,
            projectile_speed: 380.0,
            projectile_radius: 4.0,
            projectile_lifetime: 0.9,
            projectile_count: 3,
            pierce: false,
        },
        WeaponKind::Lance => WeaponStats {
            damage: 24.0,
            fire_rate: 0.8,
            projectile_speed: 520.0,
            projectile_radius: 7.0,
            projectile_lifetime: 1.6,
            projectile_count: 1,
            pierce: true,
        },
        WeaponKind::Ripper => WeaponStats {
            damage: 4.0,
            fire_rate: 7.0,
            projectile_speed: 480.0,
            projectile_radius: 3.5,
            projectile_lifetime: 0.8,
            projectile_count: 1,
            pierce: false,
        },
    }
}

/// Angular gap between fanned projectiles (radians)
const FAN_STEP: f32 = 0.18;

/// A player's weapon
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub damage: f32,
    /// Shots per second
    pub fire_rate: f32,
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    pub projectile_lifetime: f32,
    pub projectile_count: u32,
    pub pierce: bool,
    /// Seconds until the next shot is allowed, floored at 0
    pub cooldown: f32,
    pub level: u32,
}

impl Default for Weapon {
    fn default() -> Self {
        Self::new(WeaponKind::default())
    }
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        let s = base_stats(kind);
        Self {
            kind,
            damage: s.damage,
            fire_rate: s.fire_rate,
            projectile_speed: s.projectile_speed,
            projectile_radius: s.projectile_radius,
            projectile_lifetime: s.projectile_lifetime,
            projectile_count: s.projectile_count,
            pierce: s.pierce,
            cooldown: 0.0,
            level: 1,
        }
    }

    /// Switch to a different kind, resetting all stats from the base table.
    pub fn switch(&mut self, kind: WeaponKind) {
        *self = Self::new(kind);
    }

    /// Advance the cooldown, flooring at zero.
    pub fn update(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    #[inline]
    pub fn can_fire(&self) -> bool {
        self.cooldown <= 0.0
    }

    /// Fire toward `aim` from `origin`. No-op while on cooldown. Spawns
    /// `projectile_count` shots fanned around the aim direction; a full pool
    /// silently produces fewer shots. Returns true if anything fired.
    pub fn fire(
        &mut self,
        pool: &mut Pool<Projectile>,
        origin: Vec2,
        aim: Vec2,
        damage_mult: f32,
    ) -> bool {
        if !self.can_fire() {
            return false;
        }
        let aim = aim.normalize_or_zero();
        if aim == Vec2::ZERO {
            return false;
        }

        let n = self.projectile_count.max(1);
        // Center the fan on the aim direction
        let start = -FAN_STEP * (n as f32 - 1.0) / 2.0;
        for i in 0..n {
            let dir = Vec2::from_angle(start + FAN_STEP * i as f32).rotate(aim);
            let shot = Projectile {
                pos: origin,
                vel: dir * self.projectile_speed,
                radius: self.projectile_radius,
                damage: self.damage * damage_mult,
                lifetime: self.projectile_lifetime,
                weapon: self.kind,
                pierce: self.pierce,
            };
            if pool.spawn(shot).is_none() {
                break;
            }
        }

        self.cooldown = 1.0 / self.fire_rate;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_cooldown_never_goes_negative() {
        let mut w = Weapon::new(WeaponKind::Blaster);
        w.cooldown = 0.02;
        for _ in 0..10 {
            w.update(DT);
            assert!(w.cooldown >= 0.0);
        }
        assert_eq!(w.cooldown, 0.0);
    }

    #[test]
    fn test_can_fire_once_cooldown_elapsed() {
        let mut w = Weapon::new(WeaponKind::Blaster);
        let mut pool: Pool<Projectile> = Pool::new(16);
        assert!(w.fire(&mut pool, Vec2::ZERO, Vec2::X, 1.0));
        assert!(!w.can_fire());

        let period = 1.0 / w.fire_rate;
        // Stop two steps short of the period: still cooling
        let almost = ((period / DT) as u32).saturating_sub(2);
        for _ in 0..almost {
            w.update(DT);
            assert!(!w.can_fire());
        }
        // A few more steps push accumulated dt past the period
        for _ in 0..4 {
            w.update(DT);
        }
        assert!(w.can_fire());
    }

    #[test]
    fn test_fire_is_noop_on_cooldown() {
        let mut w = Weapon::new(WeaponKind::Blaster);
        let mut pool: Pool<Projectile> = Pool::new(16);
        assert!(w.fire(&mut pool, Vec2::ZERO, Vec2::X, 1.0));
        assert!(!w.fire(&mut pool, Vec2::ZERO, Vec2::X, 1.0));
        assert_eq!(pool.count(), 1);
    }

    #[test]
    fn test_spread_fans_three_projectiles() {
        let mut w = Weapon::new(WeaponKind::Spread);
        let mut pool: Pool<Projectile> = Pool::new(16);
        assert!(w.fire(&mut pool, Vec2::ZERO, Vec2::X, 1.0));
        assert_eq!(pool.count(), 3);
        // Distinct directions
        let dirs: Vec<Vec2> = pool.iter().map(|(_, p)| p.vel.normalize()).collect();
        assert!(dirs[0].dot(dirs[1]) < 0.9999);
    }

    #[test]
    fn test_full_pool_produces_fewer_shots() {
        let mut w = Weapon::new(WeaponKind::Spread);
        let mut pool: Pool<Projectile> = Pool::new(2);
        assert!(w.fire(&mut pool, Vec2::ZERO, Vec2::X, 1.0));
        assert_eq!(pool.count(), 2);
    }

    #[test]
    fn test_switch_resets_upgrades() {
        let mut w = Weapon::new(WeaponKind::Blaster);
        w.damage *= 2.0;
        w.projectile_count += 1;
        w.switch(WeaponKind::Spread);
        let fresh = Weapon::new(WeaponKind::Spread);
        assert_eq!(w.damage, fresh.damage);
        assert_eq!(w.projectile_count, fresh.projectile_count);
        // And switching back does not restore the lost upgrades
        w.switch(WeaponKind::Blaster);
        assert_eq!(w.damage, Weapon::new(WeaponKind::Blaster).damage);
    }

    #[test]
    fn test_zero_aim_does_not_fire() {
        let mut w = Weapon::new(WeaponKind::Blaster);
        let mut pool: Pool<Projectile> = Pool::new(4);
        assert!(!w.fire(&mut pool, Vec2::ZERO, Vec2::ZERO, 1.0));
        assert_eq!(pool.count(), 0);
    }
}
