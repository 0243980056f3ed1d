//! Player actor and character archetypes

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use super::weapon::{Weapon, WeaponKind};

/// Selectable characters (unlocked through meta-progression)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CharacterKind {
    /// Balanced all-rounder
    #[default]
    Vanguard,
    /// Fast and fragile, starts with the Ripper
    Ranger,
    /// Slow and armored, starts with the Lance
    Bulwark,
}

impl CharacterKind {
    pub fn max_health(self) -> f32 {
        match self {
            CharacterKind::Vanguard => 100.0,
            CharacterKind::Ranger => 70.0,
            CharacterKind::Bulwark => 140.0,
        }
    }

    pub fn speed(self) -> f32 {
        match self {
            CharacterKind::Vanguard => 180.0,
            CharacterKind::Ranger => 230.0,
            CharacterKind::Bulwark => 140.0,
        }
    }

    pub fn armor(self) -> f32 {
        match self {
            CharacterKind::Vanguard => 0.0,
            CharacterKind::Ranger => 0.0,
            CharacterKind::Bulwark => 2.0,
        }
    }

    pub fn starting_weapon(self) -> WeaponKind {
        match self {
            CharacterKind::Vanguard => WeaponKind::Blaster,
            CharacterKind::Ranger => WeaponKind::Ripper,
            CharacterKind::Bulwark => WeaponKind::Lance,
        }
    }
}

/// Dash state machine: ready -> active (timer) -> cooling down
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DashState {
    pub active: bool,
    /// Remaining active time while dashing
    pub timer: f32,
    /// Remaining cooldown before the next dash
    pub cooldown: f32,
    pub direction: Vec2,
}

/// One player actor. Experience and level live in the party's shared
/// `Progression`, never here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub character: CharacterKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Last non-zero aim direction (normalized)
    pub aim: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    pub alive: bool,
    /// Remaining post-hit invincibility (seconds)
    pub invincibility: f32,
    pub dash: DashState,
    pub armor: f32,
    /// Health regenerated per second
    pub regen: f32,
    pub damage_mult: f32,
    pub xp_mult: f32,
    pub knockback_mult: f32,
    pub magnet_mult: f32,
    pub weapon: Weapon,
}

impl Player {
    pub fn new(character: CharacterKind, pos: Vec2) -> Self {
        Self {
            character,
            pos,
            vel: Vec2::ZERO,
            aim: Vec2::X,
            radius: 14.0,
            speed: character.speed(),
            health: character.max_health(),
            max_health: character.max_health(),
            alive: true,
            invincibility: 0.0,
            dash: DashState::default(),
            armor: character.armor(),
            regen: 0.0,
            damage_mult: 1.0,
            xp_mult: 1.0,
            knockback_mult: 1.0,
            magnet_mult: 1.0,
            weapon: Weapon::new(character.starting_weapon()),
        }
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincibility > 0.0
    }

    /// Apply movement input, advance dash timers and integrate position.
    /// The caller clamps the result to the arena.
    pub fn apply_movement(&mut self, move_dir: Vec2, dash_pressed: bool, dt: f32, cfg: &SimConfig) {
        let move_dir = move_dir.normalize_or_zero();

        self.dash.cooldown = (self.dash.cooldown - dt).max(0.0);
        if self.dash.active {
            self.dash.timer -= dt;
            if self.dash.timer <= 0.0 {
                self.dash.active = false;
                self.dash.cooldown = cfg.dash_cooldown;
            }
        } else if dash_pressed && self.dash.cooldown <= 0.0 {
            let dir = if move_dir != Vec2::ZERO { move_dir } else { self.aim };
            self.dash.active = true;
            self.dash.timer = cfg.dash_duration;
            self.dash.direction = dir;
        }

        self.vel = if self.dash.active {
            self.dash.direction * cfg.dash_speed
        } else {
            move_dir * self.speed
        };
        self.pos += self.vel * dt;
    }

    /// Per-frame housekeeping: regen and invincibility decay.
    pub fn update(&mut self, dt: f32) {
        self.invincibility = (self.invincibility - dt).max(0.0);
        if self.alive && self.regen > 0.0 {
            self.health = (self.health + self.regen * dt).min(self.max_health);
        }
    }

    /// Record the aim direction, ignoring zero vectors so the player keeps
    /// facing somewhere.
    pub fn set_aim(&mut self, aim: Vec2) {
        let aim = aim.normalize_or_zero();
        if aim != Vec2::ZERO {
            self.aim = aim;
        }
    }

    /// Apply contact damage after armor reduction (floored at 1 effective
    /// damage) and start the invincibility window. Returns true when fatal.
    /// Callers skip this entirely while the player is invincible or down.
    pub fn take_damage(&mut self, raw: f32, cfg: &SimConfig) -> bool {
        let effective = (raw - self.armor).max(1.0);
        self.health -= effective;
        self.invincibility = cfg.hit_invincibility;
        self.health <= 0.0
    }
}
