//! Nova Swarm - a top-down arena survival game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, combat, progression, co-op)
//! - `audio`: Event-to-cue audio service (playback is external)
//! - `meta`: Cross-run meta-progression (leaderboard, unlocks)
//!
//! Rendering, audio synthesis, input polling and file I/O live outside this
//! crate; the simulation exposes read-only pool iteration, a drainable event
//! queue and serde-serializable records at those seams.

pub mod audio;
pub mod meta;
pub mod sim;

pub use audio::AudioDirector;
pub use meta::{HighScores, RunSummary, Unlocks};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default arena half-extents (world units)
    pub const ARENA_HALF_WIDTH: f32 = 1200.0;
    pub const ARENA_HALF_HEIGHT: f32 = 900.0;
    /// Enemies drifting this far past the arena edge are reclaimed
    pub const DESPAWN_MARGIN: f32 = 400.0;

    /// Default pool capacities (tests shrink these via `SimConfig`)
    pub const MAX_PROJECTILES: usize = 256;
    pub const MAX_ENEMIES: usize = 128;
    pub const MAX_PARTICLES: usize = 512;
    pub const MAX_DECALS: usize = 128;
    pub const MAX_CRYSTALS: usize = 256;
}
