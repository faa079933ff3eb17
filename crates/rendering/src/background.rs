//! Background image stretched over the whole viewport, drawn behind everything else.
//! Without an image configured only the camera clear color shows.
//!
//! Test / headless variant: spawns the `BackgroundImage` marker with a transform but no sprite or
//! asset handle, so no asset server is needed.

use bevy::prelude::*;
use bp_core::{GameConfigRes, SimulationSet, Viewport};

use crate::palette::depth;

#[derive(Component)]
pub struct BackgroundImage;

pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_background)
            .add_systems(Update, fit_background.in_set(SimulationSet::Visuals));
    }
}

#[cfg(not(any(test, feature = "headless")))]
fn setup_background(
    mut commands: Commands,
    assets: Res<AssetServer>,
    cfg: Res<GameConfigRes>,
    viewport: Res<Viewport>,
) {
    let Some(path) = cfg.0.background.image.clone() else {
        info!("no background image configured, using clear color");
        return;
    };
    info!(%path, "loading background image");
    commands.spawn((
        Sprite {
            image: assets.load(path),
            custom_size: Some(viewport.size()),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, depth::BACKGROUND),
        BackgroundImage,
    ));
}

#[cfg(any(test, feature = "headless"))]
fn setup_background(mut commands: Commands, cfg: Res<GameConfigRes>) {
    if cfg.0.background.image.is_some() {
        commands.spawn((
            Transform::from_xyz(0.0, 0.0, depth::BACKGROUND),
            BackgroundImage,
        ));
    }
}

/// Keep the sprite covering the viewport after resizes.
fn fit_background(
    viewport: Res<Viewport>,
    mut q: Query<Option<&mut Sprite>, With<BackgroundImage>>,
) {
    if !viewport.is_changed() {
        return;
    }
    for sprite in &mut q {
        if let Some(mut sprite) = sprite {
            sprite.custom_size = Some(viewport.size());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(image: Option<&str>) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bp_core::CorePlugin);
        let mut cfg = bp_config::GameConfig::default();
        cfg.background.image = image.map(str::to_string);
        app.insert_resource(GameConfigRes(cfg));
        app.add_plugins(BackgroundPlugin);
        app
    }

    #[test]
    fn spawns_behind_everything() {
        let mut app = app(Some("images/background.png"));
        app.update();
        let world = app.world_mut();
        let z: Vec<f32> = world
            .query_filtered::<&Transform, With<BackgroundImage>>()
            .iter(world)
            .map(|t| t.translation.z)
            .collect();
        assert_eq!(z, vec![depth::BACKGROUND]);
    }

    #[test]
    fn no_image_no_entity() {
        let mut app = app(None);
        app.update();
        let world = app.world_mut();
        assert_eq!(world.query::<&BackgroundImage>().iter(world).count(), 0);
    }
}
