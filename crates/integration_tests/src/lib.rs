// Black-box scenarios across the published plugin APIs: core + gameplay always, plus the
// marker-only rendering plugins when built with `--features rendering_headless`.

use bevy::prelude::*;
use bp_core::{CorePlugin, GameConfigRes, RngSeed, Viewport};
use bp_gameplay::GameplayPlugin;

/// Core + gameplay on a fixed nominal-frame clock, seeded and sized for reproducible runs.
pub fn build_minimal_app(cfg: bp_config::GameConfig, seed: u64) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(Viewport::new(cfg.window.width, cfg.window.height))
        .insert_resource(GameConfigRes(cfg))
        .insert_resource(RngSeed(seed));
    app.add_plugins(CorePlugin);
    app.add_plugins(GameplayPlugin);
    app
}

/// Defaults with the fixed step switched on.
pub fn fixed_step_config() -> bp_config::GameConfig {
    let mut cfg = bp_config::GameConfig::default();
    cfg.frame.fixed_step = true;
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;
    use bp_config::SpawnRange;
    use bp_core::{Bubble, BubblePopped, Cloud, PointerDown, PopEffect, Rgb, Score};
    use bp_gameplay::SpawnScheduler;

    fn advance(app: &mut App, frames: u32) {
        for _ in 0..frames {
            app.update();
        }
    }

    fn count<C: Component>(app: &mut App) -> usize {
        let world = app.world_mut();
        world.query::<&C>().iter(world).count()
    }

    fn click(app: &mut App, x: f32, y: f32) {
        app.world_mut().send_event(PointerDown {
            position: Vec2::new(x, y),
        });
    }

    /// Clouds off and spawning pushed far out so hand-placed bubbles are alone on screen.
    fn quiet_config() -> bp_config::GameConfig {
        let mut cfg = fixed_step_config();
        cfg.clouds.enabled = false;
        cfg.spawn.interval_ms = SpawnRange::new(1.0e9, 1.0e9);
        cfg
    }

    #[test]
    fn click_pops_bubble_and_effect_fades() {
        let mut app = build_minimal_app(quiet_config(), 1);
        app.update();
        let e = app
            .world_mut()
            .spawn(Bubble::new(100.0, 600.0, 30.0, 0.0, Rgb::new(200, 10, 10), 0))
            .id();
        click(&mut app, 100.0, 590.0);
        app.update();

        assert!(app.world().get_entity(e).is_err(), "popped bubble pruned this frame");
        assert_eq!(app.world().resource::<Score>().value(), 2);
        let popped: Vec<BubblePopped> = app
            .world()
            .resource::<Events<BubblePopped>>()
            .iter_current_update_events()
            .copied()
            .collect();
        assert_eq!(popped.len(), 1);
        assert_eq!(popped[0].position, Vec2::new(100.0, 600.0));

        // The effect was updated once in the pop frame; 19 more frames finish it.
        assert_eq!(count::<PopEffect>(&mut app), 1);
        advance(&mut app, 18);
        assert_eq!(count::<PopEffect>(&mut app), 1);
        advance(&mut app, 1);
        assert_eq!(count::<PopEffect>(&mut app), 0);
    }

    #[test]
    fn miss_leaves_world_untouched() {
        let mut app = build_minimal_app(quiet_config(), 1);
        app.update();
        let e = app
            .world_mut()
            .spawn(Bubble::new(100.0, 300.0, 30.0, 0.0, Rgb::default(), 0))
            .id();
        click(&mut app, 130.0, 300.0);
        app.update();
        assert!(app.world().get::<Bubble>(e).is_some_and(|b| !b.expired));
        assert_eq!(app.world().resource::<Score>().value(), 0);
        assert_eq!(count::<PopEffect>(&mut app), 0);
    }

    #[test]
    fn overlapping_click_pops_newest_only() {
        let mut app = build_minimal_app(quiet_config(), 1);
        app.update();
        let old = app
            .world_mut()
            .spawn(Bubble::new(200.0, 300.0, 38.0, 0.0, Rgb::default(), 10))
            .id();
        let new = app
            .world_mut()
            .spawn(Bubble::new(210.0, 300.0, 38.0, 0.0, Rgb::default(), 11))
            .id();
        click(&mut app, 205.0, 300.0);
        app.update();
        assert!(app.world().get_entity(new).is_err());
        assert!(app.world().get_entity(old).is_ok());
        assert_eq!(app.world().resource::<Score>().value(), 1);
    }

    #[test]
    fn score_tiers_accumulate_and_never_drop() {
        let mut app = build_minimal_app(quiet_config(), 1);
        app.update();
        let radii = [22.0, 30.0, 37.0, 24.0];
        for (i, r) in radii.iter().enumerate() {
            let x = 100.0 + i as f32 * 150.0;
            app.world_mut()
                .spawn(Bubble::new(x, 300.0, *r, 0.0, Rgb::default(), i as u64));
        }
        let mut last = 0;
        for i in 0..radii.len() {
            click(&mut app, 100.0 + i as f32 * 150.0, 300.0);
            click(&mut app, 790.0, 590.0);
            app.update();
            let now = app.world().resource::<Score>().value();
            assert!(now > last);
            last = now;
        }
        assert_eq!(last, 3 + 2 + 1 + 3);
    }

    #[test]
    fn rising_bubble_leaves_after_542_frames() {
        let mut app = build_minimal_app(quiet_config(), 1);
        app.update();
        let e = app
            .world_mut()
            .spawn(Bubble::new(100.0, 620.0, 30.0, 1.2, Rgb::default(), 0))
            .id();
        advance(&mut app, 1);
        let y = app.world().get::<Bubble>(e).map(|b| b.y);
        assert!(y.is_some_and(|y| (y - 618.8).abs() < 1e-4));
        advance(&mut app, 540);
        assert!(app.world().get_entity(e).is_ok());
        advance(&mut app, 1);
        assert!(app.world().get_entity(e).is_err());
    }

    #[test]
    fn popped_bubble_cannot_be_popped_twice() {
        let mut app = build_minimal_app(quiet_config(), 1);
        app.update();
        app.world_mut()
            .spawn(Bubble::new(400.0, 300.0, 20.0, 0.0, Rgb::default(), 0));
        click(&mut app, 400.0, 300.0);
        click(&mut app, 400.0, 300.0);
        app.update();
        assert_eq!(app.world().resource::<Score>().value(), 3);
        assert_eq!(count::<PopEffect>(&mut app), 1);
    }

    #[test]
    fn default_run_spawns_within_bounds_and_keeps_clouds() {
        let mut app = build_minimal_app(fixed_step_config(), 2024);
        advance(&mut app, 1);
        let clouds = count::<Cloud>(&mut app);
        assert!((5..=15).contains(&clouds), "clouds {clouds}");
        advance(&mut app, 1200);
        assert_eq!(count::<Cloud>(&mut app), clouds, "clouds are never destroyed");
        let spawned = app.world().resource::<SpawnScheduler>().spawned();
        assert!(spawned >= 9, "spawned {spawned} in 20 s");
        let world = app.world_mut();
        for b in world.query::<&Bubble>().iter(world) {
            assert!((20.0..40.0).contains(&b.radius));
            assert!(b.x >= b.radius && b.x <= 800.0 - b.radius);
            assert!(b.y <= 600.0 + b.radius);
        }
    }

    #[test]
    fn seeded_runs_are_identical() {
        let snapshot = |seed: u64| {
            let mut app = build_minimal_app(fixed_step_config(), seed);
            advance(&mut app, 400);
            let world = app.world_mut();
            let mut bubbles: Vec<Bubble> = world.query::<&Bubble>().iter(world).copied().collect();
            bubbles.sort_by_key(|b| b.spawn_order);
            let mut clouds: Vec<Cloud> = world.query::<&Cloud>().iter(world).copied().collect();
            clouds.sort_by(|a, b| a.layer.cmp(&b.layer).then(a.y.total_cmp(&b.y)));
            (bubbles, clouds)
        };
        assert_eq!(snapshot(5), snapshot(5));
    }

    #[test]
    fn resized_viewport_moves_spawn_band() {
        let mut cfg = fixed_step_config();
        cfg.clouds.enabled = false;
        cfg.spawn.interval_ms = SpawnRange::new(100.0, 100.0);
        let mut app = build_minimal_app(cfg, 3);
        app.update();
        app.insert_resource(Viewport::new(300.0, 1000.0));
        advance(&mut app, 60);
        let world = app.world_mut();
        let mut n = 0;
        for b in world.query::<&Bubble>().iter(world) {
            assert!(b.x <= 300.0 - b.radius);
            assert!(b.y > 600.0 + b.radius, "spawned below the taller viewport");
            n += 1;
        }
        assert!(n > 0);
    }

    #[cfg(feature = "rendering_headless")]
    #[test]
    fn compose_with_headless_rendering() {
        use bp_rendering::{BubbleVisual, CloudVisual, RenderingPlugin, ScoreHud};

        let mut app = build_minimal_app(fixed_step_config(), 9);
        app.add_plugins(RenderingPlugin);
        advance(&mut app, 300);
        assert_eq!(count::<ScoreHud>(&mut app), 1);
        assert_eq!(count::<CloudVisual>(&mut app), count::<Cloud>(&mut app));
        assert_eq!(count::<BubbleVisual>(&mut app), count::<Bubble>(&mut app));
    }
}
