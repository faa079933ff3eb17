//! Periodic simulation summary in the log (`debug` feature).

use bevy::prelude::*;
use bp_core::{Bubble, Cloud, FrameClock, PopEffect, Score};

#[derive(Resource)]
pub struct StatsLog {
    pub interval: Timer,
    /// Summary lines written so far.
    pub lines: u64,
}

impl Default for StatsLog {
    fn default() -> Self {
        Self {
            interval: Timer::from_seconds(2.0, TimerMode::Repeating),
            lines: 0,
        }
    }
}

pub fn log_stats(
    time: Res<Time>,
    mut state: ResMut<StatsLog>,
    clock: Res<FrameClock>,
    score: Res<Score>,
    bubbles: Query<(), With<Bubble>>,
    effects: Query<(), With<PopEffect>>,
    clouds: Query<(), With<Cloud>>,
) {
    if !state.interval.tick(time.delta()).just_finished() {
        return;
    }
    state.lines += 1;
    let dt = time.delta_secs();
    let fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };
    info!(
        "SIM frame={} t={:.1}s fps={:.1} bubbles={} effects={} clouds={} score={}",
        clock.frame,
        time.elapsed_secs(),
        fps,
        bubbles.iter().count(),
        effects.iter().count(),
        clouds.iter().count(),
        score.value()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    #[test]
    fn summary_fires_every_two_seconds() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(500)));
        app.init_resource::<FrameClock>()
            .init_resource::<Score>()
            .init_resource::<StatsLog>()
            .add_systems(Update, log_stats);

        app.update();
        assert_eq!(app.world().resource::<StatsLog>().lines, 0);
        for _ in 0..10 {
            app.update();
        }
        let lines = app.world().resource::<StatsLog>().lines;
        assert!((2..=3).contains(&lines), "lines {lines}");
    }
}
