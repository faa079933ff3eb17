//! Cloud sprites. Unlike bubbles, a cloud's visual is its own persistent entity, linked from the
//! simulation entity through `CloudVisual` and mutated in place (transform, size, alpha).

use bevy::prelude::*;
use bp_core::{Cloud, SimulationSet, Viewport};
#[cfg(not(any(test, feature = "headless")))]
use bp_core::GameConfigRes;

use crate::palette::cloud_z;

/// On a `Cloud` entity: the sprite entity that draws it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloudVisual(pub Entity);

/// On the sprite entity.
#[derive(Component)]
pub struct CloudSprite;

/// Sprites are center-anchored; cloud coordinates name the top-left corner in screen space.
pub fn cloud_transform(cloud: &Cloud, viewport: &Viewport) -> Transform {
    let center = Vec2::new(cloud.x + cloud.width / 2.0, cloud.y + cloud.height / 2.0);
    Transform::from_translation(viewport.to_world(center).extend(cloud_z(cloud.layer)))
}

pub struct CloudSpritesPlugin;

impl Plugin for CloudSpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (link_cloud_sprites, sync_cloud_sprites)
                .chain()
                .in_set(SimulationSet::Visuals),
        );
    }
}

#[cfg(not(any(test, feature = "headless")))]
fn link_cloud_sprites(
    mut commands: Commands,
    assets: Res<AssetServer>,
    cfg: Res<GameConfigRes>,
    viewport: Res<Viewport>,
    q_new: Query<(Entity, &Cloud), Without<CloudVisual>>,
) {
    if q_new.is_empty() {
        return;
    }
    let image: Handle<Image> = assets.load(cfg.0.clouds.image.clone());
    for (entity, cloud) in &q_new {
        let sprite = commands
            .spawn((
                Sprite {
                    image: image.clone(),
                    custom_size: Some(Vec2::new(cloud.width, cloud.height)),
                    color: Color::srgba(1.0, 1.0, 1.0, cloud.opacity),
                    ..default()
                },
                cloud_transform(cloud, &viewport),
                CloudSprite,
            ))
            .id();
        commands.entity(entity).insert(CloudVisual(sprite));
    }
}

#[cfg(any(test, feature = "headless"))]
fn link_cloud_sprites(
    mut commands: Commands,
    viewport: Res<Viewport>,
    q_new: Query<(Entity, &Cloud), Without<CloudVisual>>,
) {
    for (entity, cloud) in &q_new {
        let sprite = commands
            .spawn((cloud_transform(cloud, &viewport), CloudSprite))
            .id();
        commands.entity(entity).insert(CloudVisual(sprite));
    }
}

fn sync_cloud_sprites(
    viewport: Res<Viewport>,
    clouds: Query<(&Cloud, &CloudVisual)>,
    mut sprites: Query<(&mut Transform, Option<&mut Sprite>), With<CloudSprite>>,
) {
    for (cloud, link) in &clouds {
        let Ok((mut tf, sprite)) = sprites.get_mut(link.0) else {
            continue;
        };
        *tf = cloud_transform(cloud, &viewport);
        if let Some(mut sprite) = sprite {
            let size = Vec2::new(cloud.width, cloud.height);
            if sprite.custom_size != Some(size) {
                sprite.custom_size = Some(size);
            }
            if sprite.color.alpha() != cloud.opacity {
                sprite.color.set_alpha(cloud.opacity);
            }
        }
    }
}
