use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bp_core::{Bubble, FrameClock, GameConfigRes, PopEffect, Viewport};

/// System: tick the frame clock from Bevy's real delta.
pub fn tick_frame_clock(time: Res<Time>, cfg: Res<GameConfigRes>, mut clock: ResMut<FrameClock>) {
    clock.advance(time.delta_secs() * 1000.0, &cfg.0.frame);
}

/// System: mirror the primary window's logical size. Without a window (headless / tests) the
/// configured size stays in place.
pub fn sync_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<Viewport>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let (w, h) = (window.width(), window.height());
    if w > 0.0 && h > 0.0 && (viewport.width != w || viewport.height != h) {
        debug!(width = w, height = h, "viewport resized");
        viewport.width = w;
        viewport.height = h;
    }
}

pub fn update_bubbles(clock: Res<FrameClock>, mut bubbles: Query<&mut Bubble>) {
    for mut bubble in &mut bubbles {
        if !bubble.expired {
            bubble.update(clock.step);
        }
    }
}

pub fn update_pop_effects(clock: Res<FrameClock>, mut effects: Query<&mut PopEffect>) {
    for mut effect in &mut effects {
        if !effect.expired {
            effect.update(clock.step);
        }
    }
}

/// System: despawn bubbles and pop effects flagged expired this frame.
pub fn prune_expired(
    mut commands: Commands,
    bubbles: Query<(Entity, &Bubble)>,
    effects: Query<(Entity, &PopEffect)>,
) {
    for (e, _) in bubbles.iter().filter(|(_, b)| b.expired) {
        commands.entity(e).despawn();
    }
    for (e, _) in effects.iter().filter(|(_, p)| p.expired) {
        commands.entity(e).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bp_core::{CorePlugin, Rgb, SimulationSet};

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(CorePlugin);
        let mut cfg = bp_config::GameConfig::default();
        cfg.frame.fixed_step = true;
        app.insert_resource(GameConfigRes(cfg));
        app.add_systems(
            Update,
            (
                tick_frame_clock.in_set(SimulationSet::Clock),
                update_bubbles.in_set(SimulationSet::Bubbles),
                update_pop_effects.in_set(SimulationSet::Effects),
                prune_expired.in_set(SimulationSet::Prune),
            ),
        );
        app
    }

    #[test]
    fn fixed_step_clock_is_one_nominal_frame() {
        let mut app = app();
        app.update();
        app.update();
        let clock = app.world().resource::<FrameClock>();
        assert_eq!(clock.step, 1.0);
        assert_eq!(clock.frame, 2);
    }

    #[test]
    fn offscreen_bubble_is_despawned() {
        let mut app = app();
        let e = app
            .world_mut()
            .spawn(Bubble::new(100.0, 620.0, 30.0, 1.2, Rgb::default(), 0))
            .id();
        app.update();
        let y = app.world().get::<Bubble>(e).map(|b| b.y);
        assert!(y.is_some_and(|y| (y - 618.8).abs() < 1e-4));
        for _ in 1..541 {
            app.update();
        }
        assert!(app.world().get_entity(e).is_ok(), "alive after 541 updates");
        app.update();
        assert!(app.world().get_entity(e).is_err(), "despawned at update 542");
    }

    #[test]
    fn pop_effect_removed_after_twenty_updates() {
        let mut app = app();
        let e = app
            .world_mut()
            .spawn(PopEffect::new(Vec2::new(10.0, 10.0), Rgb::default(), 0.5, 0.05))
            .id();
        for _ in 0..19 {
            app.update();
        }
        let opacity = app.world().get::<PopEffect>(e).map(|p| p.opacity);
        assert!(opacity.is_some_and(|o| o > 0.0));
        app.update();
        assert!(app.world().get_entity(e).is_err());
    }

    #[test]
    fn viewport_untouched_without_window() {
        let mut app = app();
        app.insert_resource(Viewport::new(320.0, 240.0));
        app.add_systems(Update, sync_viewport.in_set(SimulationSet::Clock));
        app.update();
        assert_eq!(*app.world().resource::<Viewport>(), Viewport::new(320.0, 240.0));
    }

    #[test]
    fn viewport_follows_primary_window() {
        let mut app = app();
        let mut window = Window::default();
        window.resolution.set(1024.0, 768.0);
        app.world_mut().spawn((window, PrimaryWindow));
        app.add_systems(Update, sync_viewport.in_set(SimulationSet::Clock));
        app.update();
        assert_eq!(*app.world().resource::<Viewport>(), Viewport::new(1024.0, 768.0));
    }
}
