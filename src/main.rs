//! Nova Swarm entry point
//!
//! Runs a headless demo session: a scripted pilot plays a solo run at the
//! fixed timestep until the run ends, then folds the summary into the
//! meta-progression records. Real frontends drive `sim::tick` the same way
//! and draw from the pool iterators.

use glam::Vec2;

use nova_swarm::consts::SIM_DT;
use nova_swarm::sim::{
    CharacterKind, GamePhase, GameState, InputDevice, SimConfig, TickInput, tick,
};
use nova_swarm::{AudioDirector, HighScores, Unlocks};

/// Scripted input: drift in a slow circle, aim at the nearest enemy, pick
/// the first upgrade on offer.
fn pilot(state: &GameState, t: f32) -> TickInput {
    let me = &state.party.players[0].player;
    let aim = state
        .enemies
        .iter()
        .min_by(|(_, a), (_, b)| {
            a.pos
                .distance_squared(me.pos)
                .partial_cmp(&b.pos.distance_squared(me.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(_, e)| (e.pos - me.pos).normalize_or_zero())
        .unwrap_or(Vec2::X);

    TickInput {
        move_dir: Vec2::new((t * 0.4).cos(), (t * 0.4).sin()),
        aim,
        select_upgrade: matches!(state.phase, GamePhase::LevelUp).then_some(0),
        ..Default::default()
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);

    let seats = [(CharacterKind::Vanguard, InputDevice::Keyboard)];
    let mut state = GameState::new_run(seed, &seats, SimConfig::default());
    let mut audio = AudioDirector::new();
    let mut cues_played = 0usize;

    // Cap the demo at ten simulated minutes
    let max_frames = (600.0 / SIM_DT) as u32;
    for _ in 0..max_frames {
        let input = pilot(&state, state.time);
        tick(&mut state, &[input], SIM_DT);
        for event in state.drain_events() {
            audio.handle_event(&event);
        }
        cues_played += audio.drain_cues().len();
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    let summary = state.run_summary();
    let mut highscores = HighScores::new();
    let mut unlocks = Unlocks::new();
    let rank = highscores.add_run(&summary, 0.0);
    unlocks.fold(&summary);
    audio.shutdown();

    println!("seed:       {seed}");
    println!("survived:   {:.1}s", summary.survival_secs);
    println!("score:      {}", summary.score);
    println!("level:      {}", summary.level);
    println!("kills:      {} ({} bosses)", summary.kills, summary.boss_kills);
    if let Some(rank) = rank {
        println!("rank:       #{rank}");
    }
    println!("sound cues: {cues_played}");
    if let Ok(json) = unlocks.to_json() {
        println!("unlocks:    {json}");
    }
}
