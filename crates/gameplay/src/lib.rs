// Gameplay: the per-frame simulation. Spawning, entity updates, pointer popping, cloud drift
// and pruning, each registered into its SimulationSet so the frame runs as a strict sequence.

use bevy::prelude::*;
use bp_core::{GameConfigRes, RngSeed, SimulationSet};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod auto_close;
mod clouds;
mod interactions;
mod lifecycle;
mod spawning;
#[cfg(feature = "debug")]
mod stats;

pub use auto_close::{AutoClosePlugin, AutoCloseTimer};
pub use clouds::CloudRng;
pub use interactions::{hit_test, EffectRng};
pub use spawning::{SpawnRng, SpawnScheduler};

// Domain separation so each stream differs under the same RngSeed.
const SPAWN_STREAM: u64 = 0x5BA7_0B0B;
const CLOUD_STREAM: u64 = 0xC10D_5EED;
const EFFECT_STREAM: u64 = 0xEFFE_C700;

pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfigRes>()
            .init_resource::<RngSeed>()
            .add_systems(Startup, (seed_simulation, clouds::spawn_clouds).chain())
            .add_systems(
                Update,
                (
                    (lifecycle::tick_frame_clock, lifecycle::sync_viewport)
                        .in_set(SimulationSet::Clock),
                    (interactions::collect_pointer_input, interactions::pop_bubbles)
                        .chain()
                        .in_set(SimulationSet::Input),
                    spawning::spawn_bubbles.in_set(SimulationSet::Spawn),
                    clouds::drift_clouds.in_set(SimulationSet::Clouds),
                    lifecycle::update_bubbles.in_set(SimulationSet::Bubbles),
                    lifecycle::update_pop_effects.in_set(SimulationSet::Effects),
                    lifecycle::prune_expired.in_set(SimulationSet::Prune),
                ),
            );
        #[cfg(feature = "debug")]
        app.init_resource::<stats::StatsLog>()
            .add_systems(Update, stats::log_stats.after(SimulationSet::Prune));
    }
}

/// Startup: RNG streams and the spawn scheduler (whose first interval is drawn immediately).
/// Resources already present (inserted by tests or the app) are left alone.
fn seed_simulation(
    mut commands: Commands,
    seed: Res<RngSeed>,
    cfg: Res<GameConfigRes>,
    spawn_rng: Option<Res<SpawnRng>>,
    cloud_rng: Option<Res<CloudRng>>,
    effect_rng: Option<Res<EffectRng>>,
    scheduler: Option<Res<SpawnScheduler>>,
) {
    let base = seed.0;
    if spawn_rng.is_none() || scheduler.is_none() {
        let mut rng = StdRng::seed_from_u64(base.wrapping_add(SPAWN_STREAM));
        let sched = SpawnScheduler::new(&mut rng, &cfg.0.spawn);
        debug!(target_ms = sched.target_ms(), "spawn scheduler ready");
        if scheduler.is_none() {
            commands.insert_resource(sched);
        }
        if spawn_rng.is_none() {
            commands.insert_resource(SpawnRng(rng));
        }
    }
    if cloud_rng.is_none() {
        commands.insert_resource(CloudRng(StdRng::seed_from_u64(
            base.wrapping_add(CLOUD_STREAM),
        )));
    }
    if effect_rng.is_none() {
        commands.insert_resource(EffectRng(StdRng::seed_from_u64(
            base.wrapping_add(EFFECT_STREAM),
        )));
    }
    info!(seed = base, "simulation seeded");
}
