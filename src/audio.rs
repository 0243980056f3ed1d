//! Audio direction
//!
//! The simulation raises `GameEvent`s; this service translates them into
//! sound cues for an external playback backend. It is an explicit object
//! with its own lifecycle, passed by reference to whoever needs it - never
//! process-wide state.

use crate::sim::GameEvent;

/// Abstract sound effects the backend maps to actual playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Shoot,
    Dash,
    EnemyHit,
    Explosion,
    BossExplosion,
    PlayerHurt,
    PlayerDown,
    Revive,
    Pickup,
    LevelUp,
    GameOver,
}

/// Maps frame events to queued sound cues
#[derive(Debug, Clone)]
pub struct AudioDirector {
    enabled: bool,
    master_volume: f32,
    muted: bool,
    queue: Vec<SoundCue>,
}

impl Default for AudioDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioDirector {
    pub fn new() -> Self {
        Self {
            enabled: true,
            master_volume: 0.8,
            muted: false,
            queue: Vec::new(),
        }
    }

    /// Stop queueing cues and drop anything pending.
    pub fn shutdown(&mut self) {
        self.enabled = false;
        self.queue.clear();
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    pub fn volume(&self) -> f32 {
        self.master_volume
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Queue the cue for a single game event, if any.
    pub fn handle_event(&mut self, event: &GameEvent) {
        if !self.enabled || self.muted {
            return;
        }
        use crate::sim::EnemyKind;
        let cue = match event {
            GameEvent::Shoot { .. } => Some(SoundCue::Shoot),
            GameEvent::Dash { .. } => Some(SoundCue::Dash),
            GameEvent::EnemyHit => Some(SoundCue::EnemyHit),
            GameEvent::EnemyKilled { kind } => Some(if *kind == EnemyKind::Boss {
                SoundCue::BossExplosion
            } else {
                SoundCue::Explosion
            }),
            // The kill event already carried the explosion
            GameEvent::BossKilled => None,
            GameEvent::PlayerHit { .. } => Some(SoundCue::PlayerHurt),
            GameEvent::PlayerDown { .. } => Some(SoundCue::PlayerDown),
            GameEvent::PlayerRevived { .. } => Some(SoundCue::Revive),
            GameEvent::Pickup { .. } => Some(SoundCue::Pickup),
            GameEvent::LevelUp { .. } => Some(SoundCue::LevelUp),
            GameEvent::GameOver => Some(SoundCue::GameOver),
        };
        if let Some(cue) = cue {
            self.queue.push(cue);
        }
    }

    /// Take everything queued this frame; the backend plays them.
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EnemyKind;

    #[test]
    fn test_events_map_to_cues() {
        let mut audio = AudioDirector::new();
        audio.handle_event(&GameEvent::Shoot { player: 0 });
        audio.handle_event(&GameEvent::EnemyKilled {
            kind: EnemyKind::Boss,
        });
        let cues = audio.drain_cues();
        assert_eq!(cues, vec![SoundCue::Shoot, SoundCue::BossExplosion]);
        assert!(audio.drain_cues().is_empty());
    }

    #[test]
    fn test_muted_director_queues_nothing() {
        let mut audio = AudioDirector::new();
        audio.set_muted(true);
        audio.handle_event(&GameEvent::GameOver);
        assert!(audio.drain_cues().is_empty());
    }

    #[test]
    fn test_shutdown_disables_queueing() {
        let mut audio = AudioDirector::new();
        audio.handle_event(&GameEvent::EnemyHit);
        audio.shutdown();
        audio.handle_event(&GameEvent::EnemyHit);
        assert!(audio.drain_cues().is_empty());
    }
}
