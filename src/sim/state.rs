//! Top-level game state
//!
//! `GameState` owns the entity pools, the party, the spawner and the frame
//! event queue for the lifetime of one run. Pools are cleared, never
//! reallocated, between runs.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::meta::RunSummary;

use super::config::SimConfig;
use super::coop::{InputDevice, Party};
use super::entity::{Decal, Enemy, EnemyKind, Particle, Projectile, XpCrystal};
use super::player::CharacterKind;
use super::pool::Pool;
use super::progression::Upgrade;
use super::spawner::Spawner;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Pre-run menu; simulation idle
    Menu,
    /// Active gameplay
    Playing,
    /// Gameplay halted while an upgrade is chosen
    LevelUp,
    /// Game is paused; all pool state preserved
    Paused,
    /// Run ended
    GameOver,
}

/// Discrete events raised during a frame, drained by the audio and UI
/// collaborators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Shoot { player: usize },
    Dash { player: usize },
    EnemyHit,
    EnemyKilled { kind: EnemyKind },
    BossKilled,
    PlayerHit { player: usize },
    PlayerDown { player: usize },
    PlayerRevived { player: usize },
    Pickup { value: u32 },
    LevelUp { level: u32, chooser: usize },
    GameOver,
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Survival time in seconds
    pub time: f32,
    pub score: u64,
    pub kills: u32,
    pub boss_kills: u32,

    pub party: Party,
    pub spawner: Spawner,

    pub projectiles: Pool<Projectile>,
    pub enemies: Pool<Enemy>,
    pub particles: Pool<Particle>,
    pub decals: Pool<Decal>,
    pub crystals: Pool<XpCrystal>,

    /// Offered upgrade choices while in `LevelUp`, plus the choosing seat
    pub pending_upgrades: Option<([Upgrade; 3], usize)>,
    /// Queued level-ups not yet presented (a big pickup can bank several)
    pub queued_level_ups: u32,
    /// Events raised this frame; collaborators drain them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build a fresh run. All pool memory is allocated here, once.
    pub fn new_run(seed: u64, seats: &[(CharacterKind, InputDevice)], config: SimConfig) -> Self {
        log::info!(
            "starting run: seed={seed} players={} arena={}x{}",
            seats.len(),
            config.arena_half_width * 2.0,
            config.arena_half_height * 2.0,
        );
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            time: 0.0,
            score: 0,
            kills: 0,
            boss_kills: 0,
            party: Party::new(seats),
            spawner: Spawner::new(&config),
            projectiles: Pool::new(config.max_projectiles),
            enemies: Pool::new(config.max_enemies),
            particles: Pool::new(config.max_particles),
            decals: Pool::new(config.max_decals),
            crystals: Pool::new(config.max_crystals),
            pending_upgrades: None,
            queued_level_ups: 0,
            events: Vec::new(),
            config,
        }
    }

    /// Reset for another run without reallocating any pool.
    pub fn reset(&mut self, seed: u64, seats: &[(CharacterKind, InputDevice)]) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.phase = GamePhase::Playing;
        self.time = 0.0;
        self.score = 0;
        self.kills = 0;
        self.boss_kills = 0;
        self.party = Party::new(seats);
        self.spawner = Spawner::new(&self.config);
        self.projectiles.clear();
        self.enemies.clear();
        self.particles.clear();
        self.decals.clear();
        self.crystals.clear();
        self.pending_upgrades = None;
        self.queued_level_ups = 0;
        self.events.clear();
    }

    /// Drain this frame's events for the audio/UI collaborators.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// End-of-run facts for the persistence collaborator.
    pub fn run_summary(&self) -> RunSummary {
        RunSummary {
            score: self.score,
            level: self.party.progression.level,
            kills: self.kills,
            boss_kills: self.boss_kills,
            survival_secs: self.time,
            character: self.party.players[0].player.character,
        }
    }
}
