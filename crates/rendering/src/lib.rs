// Rendering: mirrors settled simulation state to the screen. Every visual system runs in
// SimulationSet::Visuals and never writes simulation components.
// Draw order (back to front): background image, clouds by layer, bubbles (newest on top),
// pop effects, score HUD.

use bevy::prelude::*;
use bp_core::GameConfigRes;

mod palette;
pub use palette::{bubble_z, clear_color, cloud_z, depth, outline_color};

pub mod background;
pub use background::{BackgroundImage, BackgroundPlugin};

mod circles;
pub use circles::{
    bubble_transform, pop_effect_transform, BubbleOutline, BubbleVisual, CirclesPlugin,
    PopEffectVisual,
};

mod clouds;
pub use clouds::{cloud_transform, CloudSprite, CloudSpritesPlugin, CloudVisual};

mod hud;
pub use hud::{score_label, HudPlugin, ScoreHud};

pub struct RenderingPlugin;

#[derive(Component)]
pub struct GameCamera;

fn setup_camera(mut commands: Commands, cfg: Res<GameConfigRes>) {
    commands.insert_resource(ClearColor(clear_color(&cfg.0.background)));
    commands.spawn((Camera2d, GameCamera));
}

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfigRes>()
            .add_plugins((BackgroundPlugin, CloudSpritesPlugin, CirclesPlugin, HudPlugin))
            .add_systems(Startup, setup_camera);
    }
}
