//! Bubble spawning.
//!
//! `SpawnScheduler` accumulates elapsed milliseconds and emits a bubble once the accumulator
//! passes the current target interval, then resets and draws a fresh target from
//! `spawn.interval_ms`. A fixed cadence is just a degenerate range (`min == max`).
//! Randomness comes from `SpawnRng`, a dedicated stream seeded from `RngSeed`.

use bevy::prelude::*;
use bp_config::SpawnConfig;
use bp_core::random::{pick, sample_f32};
use bp_core::{Bubble, FrameClock, GameConfigRes, Rgb, Viewport};
use rand::rngs::StdRng;
use rand::Rng;

/// Deterministic RNG dedicated to bubble spawning.
#[derive(Resource)]
pub struct SpawnRng(pub StdRng);

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SpawnScheduler {
    accum_ms: f32,
    target_ms: f32,
    next_order: u64,
}

impl SpawnScheduler {
    /// The first target interval is drawn immediately.
    pub fn new(rng: &mut impl Rng, cfg: &SpawnConfig) -> Self {
        Self {
            accum_ms: 0.0,
            target_ms: sample_f32(rng, &cfg.interval_ms),
            next_order: 0,
        }
    }

    pub fn accumulated_ms(&self) -> f32 {
        self.accum_ms
    }

    pub fn target_ms(&self) -> f32 {
        self.target_ms
    }

    /// Number of bubbles emitted so far (also the next spawn order).
    pub fn spawned(&self) -> u64 {
        self.next_order
    }

    pub fn advance(&mut self, dt_ms: f32) {
        self.accum_ms += dt_ms.max(0.0);
    }

    /// Emit at most one bubble. Returns `None` while the accumulator has not exceeded the target.
    pub fn try_spawn(
        &mut self,
        rng: &mut impl Rng,
        cfg: &SpawnConfig,
        viewport: &Viewport,
    ) -> Option<Bubble> {
        if self.accum_ms <= self.target_ms {
            return None;
        }
        let radius = sample_f32(rng, &cfg.radius_range);
        let speed = pick(rng, &cfg.speeds)?;
        let (lo, hi) = (radius, viewport.width - radius);
        let x = if hi > lo {
            rng.gen_range(lo..=hi)
        } else {
            viewport.width / 2.0
        };
        let y = viewport.height + radius;
        let color = Rgb::random(rng);

        self.accum_ms = 0.0;
        self.target_ms = sample_f32(rng, &cfg.interval_ms);
        let order = self.next_order;
        self.next_order += 1;
        Some(Bubble::new(x, y, radius, speed, color, order))
    }
}

/// System: advance the scheduler by this frame's clamped delta and spawn when due.
pub fn spawn_bubbles(
    mut commands: Commands,
    clock: Res<FrameClock>,
    cfg: Res<GameConfigRes>,
    viewport: Res<Viewport>,
    mut scheduler: ResMut<SpawnScheduler>,
    mut rng: ResMut<SpawnRng>,
) {
    scheduler.advance(clock.dt_ms);
    if let Some(bubble) = scheduler.try_spawn(&mut rng.0, &cfg.0.spawn, &viewport) {
        debug!(
            order = bubble.spawn_order,
            x = bubble.x,
            radius = bubble.radius,
            speed = bubble.speed,
            color = %bubble.color,
            "spawned bubble"
        );
        commands.spawn(bubble);
    }
}
