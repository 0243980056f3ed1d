//! Simulation configuration
//!
//! All capacities and tuning values are run parameters rather than hard
//! literals so tests can exercise exhaustion paths with tiny pools.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Per-run simulation parameters. `Default` is the shipped balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    // Pool capacities
    pub max_projectiles: usize,
    pub max_enemies: usize,
    pub max_particles: usize,
    pub max_decals: usize,
    pub max_crystals: usize,

    // Arena
    pub arena_half_width: f32,
    pub arena_half_height: f32,

    // Combat
    /// Invincibility window after the player takes contact damage (seconds)
    pub hit_invincibility: f32,
    /// Impulse applied to an enemy knocked back off the player
    pub knockback_impulse: f32,

    // Pickups
    /// Base radius within which XP crystals drift toward a player
    pub magnet_radius: f32,
    /// Crystal drift speed at the magnet radius edge; scales up as the
    /// remaining distance shrinks
    pub magnet_base_speed: f32,
    /// Crystal lifetime before it fades out (seconds)
    pub crystal_lifetime: f32,

    // Spawner
    /// Spawn interval at t=0 (seconds)
    pub spawn_interval_start: f32,
    /// Spawn interval floor reached late in a run
    pub spawn_interval_min: f32,
    /// Survival time over which the interval ramps down to the floor
    pub spawn_ramp_secs: f32,
    /// Distance from the party midpoint at which enemies appear
    pub spawn_ring_radius: f32,
    /// Seconds between boss spawns
    pub boss_period: f32,

    // Co-op
    /// Radius around a fallen teammate's death position that counts as
    /// "reviving"
    pub revive_radius: f32,
    /// Sustained proximity time required for a revive (seconds)
    pub revive_time: f32,
    /// Invincibility granted on respawn (seconds)
    pub revive_invincibility: f32,
    /// Grace window after all players go down before the run ends (seconds)
    pub grace_period: f32,

    // Dash
    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,

    // Camera
    /// Exponential smoothing rate (higher = snappier)
    pub camera_stiffness: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_projectiles: consts::MAX_PROJECTILES,
            max_enemies: consts::MAX_ENEMIES,
            max_particles: consts::MAX_PARTICLES,
            max_decals: consts::MAX_DECALS,
            max_crystals: consts::MAX_CRYSTALS,

            arena_half_width: consts::ARENA_HALF_WIDTH,
            arena_half_height: consts::ARENA_HALF_HEIGHT,

            hit_invincibility: 0.8,
            knockback_impulse: 260.0,

            magnet_radius: 90.0,
            magnet_base_speed: 120.0,
            crystal_lifetime: 20.0,

            spawn_interval_start: 2.0,
            spawn_interval_min: 0.35,
            spawn_ramp_secs: 120.0,
            spawn_ring_radius: 700.0,
            boss_period: 60.0,

            revive_radius: 60.0,
            revive_time: 3.0,
            revive_invincibility: 2.0,
            grace_period: 5.0,

            dash_speed: 520.0,
            dash_duration: 0.18,
            dash_cooldown: 1.5,

            camera_stiffness: 6.0,
        }
    }
}

impl SimConfig {
    /// Small-capacity variant for tests that need to hit pool exhaustion
    /// cheaply.
    pub fn tiny() -> Self {
        Self {
            max_projectiles: 4,
            max_enemies: 4,
            max_particles: 8,
            max_decals: 4,
            max_crystals: 4,
            ..Self::default()
        }
    }
}
