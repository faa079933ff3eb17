// Exits the app after `window.autoClose` seconds; 0 (default) disables it.

use bevy::prelude::*;
use bp_core::GameConfigRes;

#[derive(Resource, Deref, DerefMut)]
pub struct AutoCloseTimer(Timer);

pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_auto_close)
            .add_systems(Update, tick_auto_close);
    }
}

fn setup_auto_close(mut commands: Commands, cfg: Res<GameConfigRes>) {
    let secs = cfg.0.window.auto_close;
    if secs > 0.0 {
        info!(seconds = secs, "auto-close armed");
        commands.insert_resource(AutoCloseTimer(Timer::from_seconds(secs, TimerMode::Once)));
    }
}

fn tick_auto_close(
    time: Res<Time>,
    timer: Option<ResMut<AutoCloseTimer>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(mut timer) = timer else { return };
    if timer.tick(time.delta()).just_finished() {
        info!("auto-close timer finished, exiting");
        exit.write(AppExit::Success);
    }
}
