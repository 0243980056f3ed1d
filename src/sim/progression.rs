//! Experience, leveling and upgrades
//!
//! One `Progression` is shared by the whole party: experience is a single
//! monotonic counter and every level-up applies the chosen upgrade to every
//! party member. The threshold check loops, so one oversized pickup can
//! cross several levels in a single frame.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::player::Player;

/// XP required to reach the level after `level`.
#[inline]
pub fn xp_to_next(level: u32) -> u64 {
    10 * (level as u64) * (level as u64)
}

/// Shared party progression: the single source of truth for XP and level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    /// Monotonic lifetime XP for this run
    pub xp: u64,
    pub level: u32,
    pub xp_to_next: u64,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    pub fn new() -> Self {
        Self {
            xp: 0,
            level: 1,
            xp_to_next: xp_to_next(1),
        }
    }

    /// Add experience and resolve any level-ups. Returns the number of
    /// levels gained (looped check: one large award can cross several
    /// thresholds).
    pub fn award(&mut self, amount: u64) -> u32 {
        self.xp += amount;
        let mut gained = 0;
        while self.xp >= self.xp_to_next {
            self.level += 1;
            self.xp_to_next = xp_to_next(self.level);
            gained += 1;
        }
        gained
    }
}

/// The upgrade catalog. A closed set: every variant is matched exhaustively
/// where it is applied, drawn and described.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Upgrade {
    /// Weapon damage x1.25
    Damage,
    /// Fire rate x1.2
    FireRate,
    /// +1 projectile per shot
    ExtraProjectile,
    /// Move speed x1.1
    MoveSpeed,
    /// +20 max and current health
    MaxHealth,
    /// Magnet radius x1.5
    Magnet,
    /// +1 armor
    Armor,
    /// +1.5 health regenerated per second
    Regen,
}

impl Upgrade {
    pub const ALL: [Upgrade; 8] = [
        Upgrade::Damage,
        Upgrade::FireRate,
        Upgrade::ExtraProjectile,
        Upgrade::MoveSpeed,
        Upgrade::MaxHealth,
        Upgrade::Magnet,
        Upgrade::Armor,
        Upgrade::Regen,
    ];

    /// Short label for menus / logs.
    pub fn label(self) -> &'static str {
        match self {
            Upgrade::Damage => "Damage +25%",
            Upgrade::FireRate => "Fire rate +20%",
            Upgrade::ExtraProjectile => "+1 projectile",
            Upgrade::MoveSpeed => "Move speed +10%",
            Upgrade::MaxHealth => "+20 max health",
            Upgrade::Magnet => "Magnet radius +50%",
            Upgrade::Armor => "+1 armor",
            Upgrade::Regen => "+1.5 regen/s",
        }
    }

    /// Apply this upgrade's stat modifier to one player.
    pub fn apply(self, player: &mut Player) {
        match self {
            Upgrade::Damage => player.weapon.damage *= 1.25,
            Upgrade::FireRate => player.weapon.fire_rate *= 1.2,
            Upgrade::ExtraProjectile => player.weapon.projectile_count += 1,
            Upgrade::MoveSpeed => player.speed *= 1.1,
            Upgrade::MaxHealth => {
                player.max_health += 20.0;
                player.health += 20.0;
            }
            Upgrade::Magnet => player.magnet_mult *= 1.5,
            Upgrade::Armor => player.armor += 1.0,
            Upgrade::Regen => player.regen += 1.5,
        }
    }
}

/// Draw 3 distinct upgrade options (partial Fisher-Yates over the catalog).
pub fn draw_options<R: Rng>(rng: &mut R) -> [Upgrade; 3] {
    let mut deck = Upgrade::ALL;
    for i in 0..3 {
        let j = rng.random_range(i..deck.len());
        deck.swap(i, j);
    }
    [deck[0], deck[1], deck[2]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::CharacterKind;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_zero_award_never_levels() {
        let mut p = Progression::new();
        assert_eq!(p.award(0), 0);
        assert_eq!(p.level, 1);
        assert_eq!(p.xp_to_next, 10);
    }

    #[test]
    fn test_exact_threshold_levels_once() {
        let mut p = Progression::new();
        assert_eq!(p.award(xp_to_next(1)), 1);
        assert_eq!(p.level, 2);
        // New threshold recomputed from the new level
        assert_eq!(p.xp_to_next, 10 * 2 * 2);
    }

    #[test]
    fn test_large_award_crosses_multiple_thresholds() {
        let mut p = Progression::new();
        // 50 XP crosses 10 (level 2) and 40 (level 3), stops below 90
        assert_eq!(p.award(50), 2);
        assert_eq!(p.level, 3);
        assert_eq!(p.xp_to_next, 90);
    }

    #[test]
    fn test_draw_options_are_distinct() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let opts = draw_options(&mut rng);
            assert_ne!(opts[0], opts[1]);
            assert_ne!(opts[0], opts[2]);
            assert_ne!(opts[1], opts[2]);
        }
    }

    #[test]
    fn test_upgrade_application() {
        let mut player = Player::new(CharacterKind::Vanguard, Vec2::ZERO);
        let base_damage = player.weapon.damage;
        Upgrade::Damage.apply(&mut player);
        assert!((player.weapon.damage - base_damage * 1.25).abs() < 1e-4);

        let count = player.weapon.projectile_count;
        Upgrade::ExtraProjectile.apply(&mut player);
        assert_eq!(player.weapon.projectile_count, count + 1);

        let hp = player.health;
        Upgrade::MaxHealth.apply(&mut player);
        assert_eq!(player.health, hp + 20.0);
        assert_eq!(player.max_health, CharacterKind::Vanguard.max_health() + 20.0);
    }
}
