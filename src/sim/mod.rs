//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (dense pool index order)
//! - No rendering or platform dependencies

pub mod combat;
pub mod config;
pub mod coop;
pub mod entity;
pub mod geom;
pub mod player;
pub mod pool;
pub mod progression;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod weapon;

pub use config::SimConfig;
pub use coop::{Camera, InputDevice, Party, PartyPlayer, PartyStatus, ReviveState};
pub use entity::{Decal, DecalKind, Enemy, EnemyKind, Particle, Projectile, XpCrystal};
pub use geom::{circles_overlap, distance_squared};
pub use player::{CharacterKind, Player};
pub use pool::Pool;
pub use progression::{Progression, Upgrade};
pub use spawner::Spawner;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use weapon::{Weapon, WeaponKind};
