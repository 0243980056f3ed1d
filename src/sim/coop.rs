//! Co-op orchestration: party roster, revive state machine, grace period
//! and per-player cameras.
//!
//! The same `Party` drives solo and two-player runs. Experience and level
//! live in one shared `Progression`; player structs never carry their own
//! copies.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use super::player::{CharacterKind, Player};
use super::progression::Progression;
use super::state::GameEvent;

/// Which physical device feeds a player's input (polling is external)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputDevice {
    #[default]
    Keyboard,
    Gamepad(u8),
}

/// Per-player down/revive bookkeeping
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ReviveState {
    pub needs_revive: bool,
    /// Accumulated proximity time toward the revive threshold
    pub progress: f32,
    /// Position frozen at the moment of death; revive target and camera
    /// anchor while down
    pub death_pos: Vec2,
    /// Completed revives for this player; drives diminishing respawn health
    pub revive_count: u32,
}

/// Respawn health fraction for the given prior revive count: 50% on the
/// first revive, dropping 10% per revive down to a 25% floor.
#[inline]
pub fn revive_health_fraction(revive_count: u32) -> f32 {
    (0.5 - 0.1 * revive_count as f32).max(0.25)
}

/// Smoothed per-player view center. Viewport compositing is external.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
}

impl Camera {
    /// Exponentially approach `target`; framerate-independent.
    pub fn follow(&mut self, target: Vec2, dt: f32, stiffness: f32) {
        let t = 1.0 - (-stiffness * dt).exp();
        self.pos += (target - self.pos) * t;
    }
}

/// One seat in the party
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyPlayer {
    pub player: Player,
    pub revive: ReviveState,
    pub device: InputDevice,
    pub camera: Camera,
}

/// Party-wide failure state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PartyStatus {
    /// At least one player is up
    #[default]
    Normal,
    /// Everyone is down; the grace timer is running
    Grace,
    /// Grace expired with nobody revived. Terminal.
    Wiped,
}

/// The full co-op roster plus shared progression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub players: Vec<PartyPlayer>,
    pub progression: Progression,
    /// Rotating upgrade-chooser seat for successive level-ups
    pub next_chooser: usize,
    pub status: PartyStatus,
    /// Remaining grace time while `status == Grace`
    pub grace_timer: f32,
}

impl Party {
    /// Build a party of 1 or 2 seats. Players spawn side by side at the
    /// arena center.
    pub fn new(seats: &[(CharacterKind, InputDevice)]) -> Self {
        let n = seats.len().clamp(1, 2);
        let players = seats[..n]
            .iter()
            .enumerate()
            .map(|(i, &(character, device))| {
                let offset = Vec2::new((i as f32 - (n - 1) as f32 * 0.5) * 60.0, 0.0);
                PartyPlayer {
                    player: Player::new(character, offset),
                    revive: ReviveState::default(),
                    device,
                    camera: Camera { pos: offset },
                }
            })
            .collect();
        Self {
            players,
            progression: Progression::new(),
            next_chooser: 0,
            status: PartyStatus::Normal,
            grace_timer: 0.0,
        }
    }

    #[inline]
    pub fn is_coop(&self) -> bool {
        self.players.len() > 1
    }

    /// First alive player in seat order, if any. Sources the XP multiplier
    /// and anchors spawner/magnet targeting.
    pub fn first_alive(&self) -> Option<&Player> {
        self.players
            .iter()
            .map(|s| &s.player)
            .find(|p| p.alive)
    }

    pub fn all_down(&self) -> bool {
        self.players.iter().all(|s| s.revive.needs_revive)
    }

    /// Midpoint of the alive players (falls back to the first seat).
    pub fn focus_point(&self) -> Vec2 {
        let alive: Vec<Vec2> = self
            .players
            .iter()
            .filter(|s| s.player.alive)
            .map(|s| s.player.pos)
            .collect();
        if alive.is_empty() {
            self.players[0].revive.death_pos
        } else {
            alive.iter().copied().sum::<Vec2>() / alive.len() as f32
        }
    }

    /// Mark a player down: freeze the death position, zero revive progress.
    /// Entering the all-down state starts the grace timer; a solo party
    /// wipes immediately (nobody is left to revive).
    pub fn down_player(&mut self, idx: usize, cfg: &SimConfig, events: &mut Vec<GameEvent>) {
        let seat = &mut self.players[idx];
        seat.player.alive = false;
        seat.player.health = 0.0;
        seat.revive.needs_revive = true;
        seat.revive.progress = 0.0;
        seat.revive.death_pos = seat.player.pos;
        events.push(GameEvent::PlayerDown { player: idx });

        if self.all_down() && self.status == PartyStatus::Normal {
            if self.is_coop() {
                self.status = PartyStatus::Grace;
                self.grace_timer = cfg.grace_period;
            } else {
                self.status = PartyStatus::Wiped;
                events.push(GameEvent::GameOver);
            }
        }
    }

    /// Advance revive progress for every down player. An alive teammate
    /// standing within the revive radius of the frozen death position
    /// accumulates progress; stepping out resets it to zero.
    pub fn update_revives(&mut self, dt: f32, cfg: &SimConfig, events: &mut Vec<GameEvent>) {
        let alive_positions: Vec<Vec2> = self
            .players
            .iter()
            .filter(|s| s.player.alive)
            .map(|s| s.player.pos)
            .collect();

        let radius_sq = cfg.revive_radius * cfg.revive_radius;
        for idx in 0..self.players.len() {
            if !self.players[idx].revive.needs_revive {
                continue;
            }
            let death_pos = self.players[idx].revive.death_pos;
            let teammate_near = alive_positions
                .iter()
                .any(|&p| p.distance_squared(death_pos) < radius_sq);

            let seat = &mut self.players[idx];
            if teammate_near {
                seat.revive.progress += dt;
                if seat.revive.progress >= cfg.revive_time {
                    let fraction = revive_health_fraction(seat.revive.revive_count);
                    seat.player.alive = true;
                    seat.player.health = seat.player.max_health * fraction;
                    seat.player.pos = death_pos;
                    seat.player.invincibility = cfg.revive_invincibility;
                    seat.revive.needs_revive = false;
                    seat.revive.progress = 0.0;
                    seat.revive.revive_count += 1;
                    events.push(GameEvent::PlayerRevived { player: idx });
                }
            } else {
                // No partial credit across attempts
                seat.revive.progress = 0.0;
            }
        }
    }

    /// Run the grace timer. A revive before expiry returns the party to
    /// normal; expiry raises the wipe exactly once.
    pub fn update_grace(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        if self.status != PartyStatus::Grace {
            return;
        }
        if !self.all_down() {
            self.status = PartyStatus::Normal;
            return;
        }
        self.grace_timer -= dt;
        if self.grace_timer <= 0.0 {
            self.status = PartyStatus::Wiped;
            events.push(GameEvent::GameOver);
        }
    }

    /// Seat that picks the next level-up upgrade, rotating across level-ups.
    pub fn advance_chooser(&mut self) -> usize {
        let idx = self.next_chooser % self.players.len();
        self.next_chooser = (idx + 1) % self.players.len();
        idx
    }

    /// Smooth each camera toward its player (or the frozen death position
    /// while that player is down).
    pub fn update_cameras(&mut self, dt: f32, cfg: &SimConfig) {
        for seat in &mut self.players {
            let target = if seat.revive.needs_revive {
                seat.revive.death_pos
            } else {
                seat.player.pos
            };
            seat.camera.follow(target, dt, cfg.camera_stiffness);
        }
    }
}
