//! Cross-pool combat resolution
//!
//! Two passes per frame, both on squared distances:
//! - projectile x enemy: damage, projectile consumption, enemy death and its
//!   consequences (crystal drop, death visuals, score, splitter children)
//! - enemy x player: contact damage under the invincibility window, plus a
//!   radial knockback impulse on the enemy
//!
//! A projectile strikes at most one enemy per frame; pierce lets it survive
//! across frames, not hit twice in one.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::entity::{Decal, DecalKind, Enemy, EnemyKind, Particle, XpCrystal};
use super::geom::{circles_overlap, direction_to};
use super::state::{GameEvent, GameState};

/// Projectile vs enemy pass.
pub fn resolve_projectiles(state: &mut GameState) {
    let mut pos = 0;
    while pos < state.projectiles.indices().len() {
        let pidx = state.projectiles.indices()[pos];
        let Some(&proj) = state.projectiles.get(pidx) else {
            pos += 1;
            continue;
        };

        // First overlapping enemy in dense order; stop scanning after it
        let mut hit_enemy = None;
        for epos in 0..state.enemies.indices().len() {
            let eidx = state.enemies.indices()[epos];
            let Some(enemy) = state.enemies.get(eidx) else {
                continue;
            };
            if circles_overlap(proj.pos, proj.radius, enemy.pos, enemy.radius) {
                hit_enemy = Some(eidx);
                break;
            }
        }

        let Some(eidx) = hit_enemy else {
            pos += 1;
            continue;
        };

        let mut died = false;
        if let Some(enemy) = state.enemies.get_mut(eidx) {
            enemy.health -= proj.damage;
            died = enemy.health <= 0.0;
        }
        state.events.push(GameEvent::EnemyHit);
        if died {
            kill_enemy(state, eidx);
        }

        if proj.pierce {
            pos += 1;
        } else {
            // Swap-removal drops the next projectile into this dense
            // position, so the cursor stays put
            state.projectiles.despawn(pidx);
        }
    }
}

/// Enemy vs player pass. Skipped per player while invincible or down.
pub fn resolve_enemy_contacts(state: &mut GameState) {
    for seat_idx in 0..state.party.players.len() {
        for epos in 0..state.enemies.indices().len() {
            let player = &state.party.players[seat_idx].player;
            if !player.alive || player.is_invincible() {
                break;
            }
            let (ppos, pradius) = (player.pos, player.radius);

            let eidx = state.enemies.indices()[epos];
            let Some(enemy) = state.enemies.get(eidx) else {
                continue;
            };
            if !circles_overlap(enemy.pos, enemy.radius, ppos, pradius) {
                continue;
            }
            let damage = enemy.damage;

            // Shove the enemy radially away from the player
            let away = direction_to(ppos, enemy.pos);
            let impulse =
                state.config.knockback_impulse * state.party.players[seat_idx].player.knockback_mult;
            if let Some(enemy) = state.enemies.get_mut(eidx) {
                enemy.vel += away * impulse;
            }

            let fatal = state.party.players[seat_idx]
                .player
                .take_damage(damage, &state.config);
            state.events.push(GameEvent::PlayerHit { player: seat_idx });
            if fatal {
                let config = &state.config;
                state.party.down_player(seat_idx, config, &mut state.events);
            }
        }
    }
}

/// Remove a dead enemy and spawn its consequences: XP crystal, death
/// visuals, score, splitter children.
pub fn kill_enemy(state: &mut GameState, eidx: usize) {
    let Some(&enemy) = state.enemies.get(eidx) else {
        return;
    };
    state.enemies.despawn(eidx);

    state.score += enemy.xp_value as u64 * 10;
    state.kills += 1;
    state.events.push(GameEvent::EnemyKilled { kind: enemy.kind });
    if enemy.kind == EnemyKind::Boss {
        state.boss_kills += 1;
        state.events.push(GameEvent::BossKilled);
        log::debug!("boss down at {:.1}s", state.time);
    }

    // XP drop; a full crystal pool just means lost XP
    let _ = state.crystals.spawn(XpCrystal::new(
        enemy.pos,
        enemy.xp_value,
        state.config.crystal_lifetime,
    ));

    spawn_death_visuals(state, &enemy);

    // Splitters burst into a smaller generation; pool exhaustion simply
    // yields fewer children
    if enemy.kind == EnemyKind::Splitter && enemy.splits_remaining > 0 {
        for _ in 0..2 {
            let angle = state.rng.random_range(0.0..TAU);
            let offset = Vec2::new(angle.cos(), angle.sin()) * (enemy.radius + 4.0);
            let mut child = Enemy::new(EnemyKind::Splitter, enemy.pos + offset);
            child.splits_remaining = enemy.splits_remaining - 1;
            child.max_health = enemy.max_health * 0.5;
            child.health = child.max_health;
            child.radius = enemy.radius * 0.7;
            child.xp_value = (enemy.xp_value / 2).max(1);
            if state.enemies.spawn(child).is_none() {
                break;
            }
        }
    }
}

/// Cosmetic burst plus a ground mark where an enemy died.
fn spawn_death_visuals(state: &mut GameState, enemy: &Enemy) {
    let color = match enemy.kind {
        EnemyKind::Chaser => 0,
        EnemyKind::Orbiter => 1,
        EnemyKind::Splitter => 2,
        EnemyKind::Brute => 3,
        EnemyKind::Boss => 4,
    };
    let count = if enemy.kind == EnemyKind::Boss { 24 } else { 10 };
    for _ in 0..count {
        let angle = state.rng.random_range(0.0..TAU);
        let speed = state.rng.random_range(60.0..220.0);
        let life = state.rng.random_range(0.3..0.8);
        let particle = Particle {
            pos: enemy.pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            color,
            lifetime: life,
            max_lifetime: life,
            size: state.rng.random_range(2.0..5.0),
        };
        if state.particles.spawn(particle).is_none() {
            break;
        }
    }

    let kind = if enemy.kind == EnemyKind::Boss {
        DecalKind::Scorch
    } else {
        DecalKind::Blood
    };
    let _ = state.decals.spawn(Decal {
        pos: enemy.pos,
        kind,
        rotation: state.rng.random_range(0.0..TAU),
        lifetime: 12.0,
        max_lifetime: 12.0,
    });
}
