//! Fixed timestep simulation tick
//!
//! One `tick` pass per rendered frame, single-threaded, run to completion.
//! The phase order is load-bearing: movement before collision so positions
//! are current, pickup before the level check so the same frame's XP can
//! trigger it.

use glam::Vec2;

use super::combat;
use super::geom::{circles_overlap, clamp};
use super::progression::draw_options;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::DESPAWN_MARGIN;

/// Input commands for a single tick, one per party seat, already resolved
/// per device by the input collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Normalized movement vector
    pub move_dir: Vec2,
    /// Normalized aim vector
    pub aim: Vec2,
    /// Dash pressed this frame
    pub dash: bool,
    /// Cycle to the next weapon this frame
    pub cycle_weapon: bool,
    /// Pause toggle
    pub pause: bool,
    /// Chosen upgrade slot (0..3) while in the level-up phase
    pub select_upgrade: Option<usize>,
}

/// Advance the game state by one fixed timestep.
pub fn tick(state: &mut GameState, inputs: &[TickInput], dt: f32) {
    // Pause toggle from any seat
    if inputs.iter().any(|i| i.pause) {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::LevelUp => {
            resolve_upgrade_choice(state, inputs);
            return;
        }
        GamePhase::Menu | GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    state.time += dt;

    // --- Spawning ---
    let focus = state.party.focus_point();
    state.spawner.update(
        dt,
        state.time,
        focus,
        &mut state.enemies,
        &mut state.rng,
        &state.config,
    );

    // --- Input and movement ---
    for idx in 0..state.party.players.len() {
        let input = inputs.get(idx).copied().unwrap_or_default();
        let seat = &mut state.party.players[idx];
        if !seat.player.alive {
            continue;
        }

        let was_dashing = seat.player.dash.active;
        seat.player
            .apply_movement(input.move_dir, input.dash, dt, &state.config);
        if seat.player.dash.active && !was_dashing {
            state.events.push(GameEvent::Dash { player: idx });
        }
        seat.player.pos.x = clamp(
            seat.player.pos.x,
            -state.config.arena_half_width,
            state.config.arena_half_width,
        );
        seat.player.pos.y = clamp(
            seat.player.pos.y,
            -state.config.arena_half_height,
            state.config.arena_half_height,
        );
        seat.player.set_aim(input.aim);
        seat.player.update(dt);

        // --- Weapon cadence and fire ---
        if input.cycle_weapon {
            let next = seat.player.weapon.kind.next();
            seat.player.weapon.switch(next);
        }
        seat.player.weapon.update(dt);
        let (origin, aim, damage_mult) =
            (seat.player.pos, seat.player.aim, seat.player.damage_mult);
        let fired =
            state.party.players[idx]
                .player
                .weapon
                .fire(&mut state.projectiles, origin, aim, damage_mult);
        if fired {
            state.events.push(GameEvent::Shoot { player: idx });
        }
    }

    // --- Pool updates ---
    state.projectiles.retain_active(|_, p| p.advance(dt));

    let alive_positions: Vec<Vec2> = state
        .party
        .players
        .iter()
        .filter(|s| s.player.alive)
        .map(|s| s.player.pos)
        .collect();
    let bounds = Vec2::new(
        state.config.arena_half_width + DESPAWN_MARGIN,
        state.config.arena_half_height + DESPAWN_MARGIN,
    );
    state.enemies.retain_active(|_, e| {
        if let Some(&target) = nearest(&alive_positions, e.pos) {
            e.advance(dt, target);
        }
        // Reclaim strays far outside the arena
        e.pos.x.abs() < bounds.x && e.pos.y.abs() < bounds.y
    });

    state.particles.retain_active(|_, p| p.advance(dt));
    state.decals.retain_active(|_, d| d.advance(dt));

    let magnet_targets: Vec<(Vec2, f32)> = state
        .party
        .players
        .iter()
        .filter(|s| s.player.alive)
        .map(|s| {
            (
                s.player.pos,
                state.config.magnet_radius * s.player.magnet_mult,
            )
        })
        .collect();
    let cfg = state.config.clone();
    state.crystals.retain_active(|_, c| {
        let target = nearest_target(&magnet_targets, c.pos);
        c.advance(dt, target.map(|t| t.0), target.map_or(0.0, |t| t.1), &cfg)
    });

    // --- Combat resolution ---
    combat::resolve_projectiles(state);
    combat::resolve_enemy_contacts(state);

    // --- Pickup and leveling ---
    collect_crystals(state);
    present_level_up(state);

    // --- Revive and grace ---
    {
        let config = &state.config;
        state.party.update_revives(dt, config, &mut state.events);
    }
    state.party.update_grace(dt, &mut state.events);
    if state.party.status == super::coop::PartyStatus::Wiped && state.phase != GamePhase::GameOver {
        state.phase = GamePhase::GameOver;
        let summary = state.run_summary();
        log::info!(
            "run over: score={} level={} kills={} time={:.1}s",
            summary.score,
            summary.level,
            summary.kills,
            summary.survival_secs
        );
    }

    // --- Cameras ---
    let config = &state.config;
    state.party.update_cameras(dt, config);
}

fn nearest<'a>(points: &'a [Vec2], from: Vec2) -> Option<&'a Vec2> {
    points.iter().min_by(|a, b| {
        a.distance_squared(from)
            .partial_cmp(&b.distance_squared(from))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

fn nearest_target(targets: &[(Vec2, f32)], from: Vec2) -> Option<(Vec2, f32)> {
    targets
        .iter()
        .min_by(|a, b| {
            a.0.distance_squared(from)
                .partial_cmp(&b.0.distance_squared(from))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .copied()
}

/// Crystal pickup: proximity test against every alive player; XP lands in
/// the shared pool with the first alive player's multiplier applied.
fn collect_crystals(state: &mut GameState) {
    let pickup_zones: Vec<(Vec2, f32)> = state
        .party
        .players
        .iter()
        .filter(|s| s.player.alive)
        .map(|s| (s.player.pos, s.player.radius))
        .collect();
    let xp_mult = state
        .party
        .first_alive()
        .map_or(1.0, |p| p.xp_mult);

    let mut picked: Vec<u32> = Vec::new();
    state.crystals.retain_active(|_, c| {
        let taken = pickup_zones
            .iter()
            .any(|&(pos, radius)| circles_overlap(c.pos, c.radius, pos, radius));
        if taken {
            picked.push(c.value);
        }
        !taken
    });

    let mut gained = 0;
    for value in picked {
        state.events.push(GameEvent::Pickup { value });
        let xp = (value as f32 * xp_mult).round() as u64;
        gained += state.party.progression.award(xp);
    }
    state.queued_level_ups += gained;
}

/// Enter the level-up phase when levels are banked: draw three options and
/// hand the choice to the rotating chooser seat.
fn present_level_up(state: &mut GameState) {
    if state.queued_level_ups == 0 || state.phase != GamePhase::Playing {
        return;
    }
    state.queued_level_ups -= 1;
    let chooser = state.party.advance_chooser();
    let options = draw_options(&mut state.rng);
    state.pending_upgrades = Some((options, chooser));
    state.phase = GamePhase::LevelUp;
    state.events.push(GameEvent::LevelUp {
        level: state.party.progression.level,
        chooser,
    });
}

/// Apply the chooser's selection to every party member, then either present
/// the next banked level-up or resume play.
fn resolve_upgrade_choice(state: &mut GameState, inputs: &[TickInput]) {
    let Some((options, chooser)) = state.pending_upgrades else {
        state.phase = GamePhase::Playing;
        return;
    };
    let Some(slot) = inputs.get(chooser).and_then(|i| i.select_upgrade) else {
        return;
    };
    let Some(&upgrade) = options.get(slot) else {
        return;
    };

    for seat in &mut state.party.players {
        upgrade.apply(&mut seat.player);
    }
    log::debug!("upgrade applied: {}", upgrade.label());
    state.pending_upgrades = None;
    state.phase = GamePhase::Playing;
    present_level_up(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::config::SimConfig;
    use crate::sim::coop::InputDevice;
    use crate::sim::entity::{Enemy, EnemyKind, XpCrystal};
    use crate::sim::player::CharacterKind;

    fn solo_state() -> GameState {
        GameState::new_run(
            11,
            &[(CharacterKind::Vanguard, InputDevice::Keyboard)],
            SimConfig::default(),
        )
    }

    fn coop_state() -> GameState {
        GameState::new_run(
            11,
            &[
                (CharacterKind::Vanguard, InputDevice::Keyboard),
                (CharacterKind::Ranger, InputDevice::Gamepad(0)),
            ],
            SimConfig::default(),
        )
    }

    fn idle() -> Vec<TickInput> {
        vec![TickInput::default(); 2]
    }

    #[test]
    fn test_pause_preserves_pool_state() {
        let mut state = solo_state();
        state
            .enemies
            .spawn(Enemy::new(EnemyKind::Chaser, Vec2::new(300.0, 0.0)))
            .unwrap();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &[pause], SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        let pos_before = state.enemies.get(0).unwrap().pos;
        tick(&mut state, &[TickInput::default()], SIM_DT);
        assert_eq!(state.enemies.get(0).unwrap().pos, pos_before);

        tick(&mut state, &[pause], SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_chaser_contact_once_per_overlap_event() {
        let mut state = solo_state();
        // Stationary player, chaser closing from 400 units out
        state
            .enemies
            .spawn(Enemy::new(EnemyKind::Chaser, Vec2::new(400.0, 0.0)))
            .unwrap();

        let input = TickInput {
            aim: Vec2::Y, // shoot away from the chaser
            ..Default::default()
        };
        let start_health = state.party.players[0].player.health;

        // Enough frames for 400 units at ~90 u/s plus slack
        let mut first_hit_frame = None;
        for frame in 0..900 {
            tick(&mut state, &[input], SIM_DT);
            if state.party.players[0].player.health < start_health {
                first_hit_frame = Some(frame);
                break;
            }
        }
        assert!(first_hit_frame.is_some(), "chaser never reached the player");
        let health_after_hit = state.party.players[0].player.health;
        assert_eq!(
            start_health - health_after_hit,
            EnemyKind::Chaser.contact_damage() - CharacterKind::Vanguard.armor()
        );

        // While the invincibility window is open, continued overlap deals
        // nothing, even if the enemy stays in contact every frame
        let window_frames = (state.config.hit_invincibility / SIM_DT) as u32 - 2;
        for _ in 0..window_frames {
            tick(&mut state, &[input], SIM_DT);
            assert!(state.party.players[0].player.health >= health_after_hit - 1e-3);
        }
    }

    #[test]
    fn test_pickup_triggers_level_up_same_frame() {
        let mut state = solo_state();
        let ppos = state.party.players[0].player.pos;
        // Enough XP to cross the first threshold in one pickup
        state
            .crystals
            .spawn(XpCrystal::new(ppos, 10, 10.0))
            .unwrap();

        tick(&mut state, &[TickInput::default()], SIM_DT);
        assert_eq!(state.phase, GamePhase::LevelUp);
        assert_eq!(state.party.progression.level, 2);
        assert!(state.pending_upgrades.is_some());

        // Simulation halts during the choice
        let time = state.time;
        tick(&mut state, &[TickInput::default()], SIM_DT);
        assert_eq!(state.time, time);

        // Selecting resumes play with the upgrade applied to the player
        let select = TickInput {
            select_upgrade: Some(0),
            ..Default::default()
        };
        tick(&mut state, &[select], SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.pending_upgrades.is_none());
    }

    #[test]
    fn test_coop_shared_xp_and_chooser_rotation() {
        let mut state = coop_state();
        let p0 = state.party.players[0].player.pos;
        state.crystals.spawn(XpCrystal::new(p0, 10, 10.0)).unwrap();
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.phase, GamePhase::LevelUp);
        let (_, first_chooser) = state.pending_upgrades.unwrap();
        assert_eq!(first_chooser, 0);

        // The choice resumes play and applies to both players
        let select = TickInput {
            select_upgrade: Some(0),
            ..Default::default()
        };
        tick(&mut state, &[select, TickInput::default()], SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);

        // Next level-up rotates the chooser to seat 1
        let p0 = state.party.players[0].player.pos;
        state.crystals.spawn(XpCrystal::new(p0, 40, 10.0)).unwrap();
        tick(&mut state, &idle(), SIM_DT);
        assert_eq!(state.phase, GamePhase::LevelUp);
        let (_, chooser) = state.pending_upgrades.unwrap();
        assert_eq!(chooser, 1);
    }

    #[test]
    fn test_weapon_cycle_resets_stats() {
        let mut state = solo_state();
        state.party.players[0].player.weapon.damage *= 4.0;
        let cycle = TickInput {
            cycle_weapon: true,
            ..Default::default()
        };
        tick(&mut state, &[cycle], SIM_DT);
        let w = &state.party.players[0].player.weapon;
        assert_eq!(w.kind, CharacterKind::Vanguard.starting_weapon().next());
        assert_eq!(w.damage, crate::sim::Weapon::new(w.kind).damage);
    }

    #[test]
    fn test_solo_death_ends_run() {
        let mut state = solo_state();
        state.party.players[0].player.health = 1.0;
        let ppos = state.party.players[0].player.pos;
        state
            .enemies
            .spawn(Enemy::new(EnemyKind::Brute, ppos))
            .unwrap();
        tick(&mut state, &[TickInput::default()], SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::GameOver)));
    }

    #[test]
    fn test_far_crystal_does_not_magnetize_or_collect() {
        let mut state = solo_state();
        state
            .crystals
            .spawn(XpCrystal::new(Vec2::new(800.0, 0.0), 5, 10.0))
            .unwrap();
        tick(&mut state, &[TickInput::default()], SIM_DT);
        assert_eq!(state.crystals.count(), 1);
        assert_eq!(state.party.progression.xp, 0);
        assert_eq!(state.crystals.get(0).unwrap().pos.x, 800.0);
    }

    #[test]
    fn test_projectiles_fire_and_expire() {
        let mut state = solo_state();
        let input = TickInput {
            aim: Vec2::X,
            ..Default::default()
        };
        tick(&mut state, &[input], SIM_DT);
        assert!(state.projectiles.count() > 0);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::Shoot { .. })));

        // Lifetime runs out eventually with no enemies around
        let lifetime = state.party.players[0].player.weapon.projectile_lifetime;
        // Stop firing (zero aim) and let shots die
        let idle_in = TickInput::default();
        for _ in 0..((lifetime / SIM_DT) as u32 + 5) {
            tick(&mut state, &[idle_in], SIM_DT);
        }
        assert_eq!(state.projectiles.count(), 0);
    }
}
