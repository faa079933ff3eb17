//! Parallax cloud backdrop: a fixed population spawned once and drifted forever.

use bevy::prelude::*;
use bp_core::random::sample_count;
use bp_core::{Cloud, FrameClock, GameConfigRes, Viewport};
use rand::rngs::StdRng;

/// Deterministic RNG for cloud placement and wraparound, separate from bubble spawning.
#[derive(Resource)]
pub struct CloudRng(pub StdRng);

/// Startup: `per_layer` clouds on each of `layers` parallax layers.
pub fn spawn_clouds(
    mut commands: Commands,
    cfg: Res<GameConfigRes>,
    viewport: Res<Viewport>,
    mut rng: ResMut<CloudRng>,
) {
    let clouds = &cfg.0.clouds;
    if !clouds.enabled {
        info!("clouds disabled");
        return;
    }
    let mut total = 0;
    for layer in 0..clouds.layers {
        let count = sample_count(&mut rng.0, &clouds.per_layer);
        for _ in 0..count {
            commands.spawn(Cloud::spawn(&mut rng.0, layer, viewport.size(), clouds));
        }
        total += count;
    }
    info!(total, layers = clouds.layers, "spawned cloud backdrop");
}

pub fn drift_clouds(
    clock: Res<FrameClock>,
    cfg: Res<GameConfigRes>,
    viewport: Res<Viewport>,
    mut rng: ResMut<CloudRng>,
    mut clouds: Query<&mut Cloud>,
) {
    let size = viewport.size();
    for mut cloud in &mut clouds {
        if cloud.update(clock.step, &mut rng.0, size, &cfg.0.clouds) {
            trace!(layer = cloud.layer, y = cloud.y, width = cloud.width, "cloud wrapped");
        }
    }
}
