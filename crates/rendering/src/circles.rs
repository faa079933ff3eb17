//! Bubble and pop-effect visuals.
//!
//! Each simulation entity gets its mesh attached on the frame it appears; afterwards the
//! transform (and, for pop effects, the material alpha) is re-derived from component state every
//! frame. Bubbles carry two children: a unit disc scaled to the radius and a rim ring built for
//! that radius (radius never changes after spawn).
//! Headless builds attach only the marker and transform.

#[cfg(not(any(test, feature = "headless")))]
use bevy::math::primitives::{Annulus, Circle};
#[cfg(not(any(test, feature = "headless")))]
use bevy::prelude::Mesh2d;
use bevy::prelude::*;
#[cfg(not(any(test, feature = "headless")))]
use bevy::sprite::{AlphaMode2d, ColorMaterial, MeshMaterial2d};
#[cfg(not(any(test, feature = "headless")))]
use bp_core::GameConfigRes;
use bp_core::{Bubble, PopEffect, SimulationSet, Viewport};

use crate::palette::{bubble_z, depth};

#[derive(Component)]
pub struct BubbleVisual;

#[derive(Component)]
pub struct BubbleOutline;

#[derive(Component)]
pub struct PopEffectVisual;

#[cfg(not(any(test, feature = "headless")))]
#[derive(Resource)]
struct UnitCircle(Handle<Mesh>);

pub fn bubble_transform(bubble: &Bubble, viewport: &Viewport) -> Transform {
    Transform::from_translation(
        viewport
            .to_world(bubble.center())
            .extend(bubble_z(bubble.spawn_order)),
    )
}

pub fn pop_effect_transform(effect: &PopEffect, viewport: &Viewport) -> Transform {
    Transform::from_translation(viewport.to_world(effect.center()).extend(depth::POP_EFFECTS))
        .with_scale(Vec3::new(effect.radius.max(1e-3), effect.radius.max(1e-3), 1.0))
}

pub struct CirclesPlugin;

#[cfg(not(any(test, feature = "headless")))]
impl Plugin for CirclesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, prepare_unit_circle).add_systems(
            Update,
            (
                (attach_bubble_visuals, attach_pop_effect_visuals),
                (sync_bubble_transforms, sync_pop_effects, fade_pop_effect_materials),
            )
                .chain()
                .in_set(SimulationSet::Visuals),
        );
    }
}

#[cfg(any(test, feature = "headless"))]
impl Plugin for CirclesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                (attach_bubble_markers, attach_pop_effect_markers),
                (sync_bubble_transforms, sync_pop_effects),
            )
                .chain()
                .in_set(SimulationSet::Visuals),
        );
    }
}

#[cfg(not(any(test, feature = "headless")))]
fn prepare_unit_circle(mut meshes: ResMut<Assets<Mesh>>, mut commands: Commands) {
    commands.insert_resource(UnitCircle(meshes.add(Circle::new(1.0))));
}

#[cfg(not(any(test, feature = "headless")))]
fn attach_bubble_visuals(
    mut commands: Commands,
    unit: Option<Res<UnitCircle>>,
    cfg: Res<GameConfigRes>,
    viewport: Res<Viewport>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    q_new: Query<(Entity, &Bubble), Added<Bubble>>,
) {
    let Some(unit) = unit else { return };
    if q_new.is_empty() {
        return;
    }
    let style = &cfg.0.bubble;
    let rim = materials.add(ColorMaterial {
        color: crate::palette::outline_color(style),
        alpha_mode: AlphaMode2d::Blend,
        ..default()
    });
    for (entity, bubble) in &q_new {
        let half = style.outline_width.max(0.0) / 2.0;
        let ring = meshes.add(Annulus::new((bubble.radius - half).max(0.0), bubble.radius + half));
        let fill = materials.add(ColorMaterial::from(Color::from(bubble.color)));
        commands
            .entity(entity)
            .insert((
                BubbleVisual,
                bubble_transform(bubble, &viewport),
                Visibility::Visible,
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh2d(unit.0.clone()),
                    MeshMaterial2d(fill),
                    Transform::from_scale(Vec3::new(bubble.radius, bubble.radius, 1.0)),
                ));
                parent.spawn((
                    Mesh2d(ring),
                    MeshMaterial2d(rim.clone()),
                    Transform::from_xyz(0.0, 0.0, depth::OUTLINE_OFFSET),
                    BubbleOutline,
                ));
            });
    }
}

#[cfg(not(any(test, feature = "headless")))]
fn attach_pop_effect_visuals(
    mut commands: Commands,
    unit: Option<Res<UnitCircle>>,
    viewport: Res<Viewport>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    q_new: Query<(Entity, &PopEffect), Added<PopEffect>>,
) {
    let Some(unit) = unit else { return };
    for (entity, effect) in &q_new {
        let material = materials.add(ColorMaterial {
            color: effect.color.with_alpha(effect.opacity),
            alpha_mode: AlphaMode2d::Blend,
            ..default()
        });
        commands.entity(entity).insert((
            PopEffectVisual,
            Mesh2d(unit.0.clone()),
            MeshMaterial2d(material),
            pop_effect_transform(effect, &viewport),
            Visibility::Visible,
        ));
    }
}

#[cfg(any(test, feature = "headless"))]
fn attach_bubble_markers(
    mut commands: Commands,
    viewport: Res<Viewport>,
    q_new: Query<(Entity, &Bubble), Added<Bubble>>,
) {
    for (entity, bubble) in &q_new {
        commands
            .entity(entity)
            .insert((BubbleVisual, bubble_transform(bubble, &viewport)))
            .with_children(|parent| {
                parent.spawn((BubbleOutline, Transform::default()));
            });
    }
}

#[cfg(any(test, feature = "headless"))]
fn attach_pop_effect_markers(
    mut commands: Commands,
    viewport: Res<Viewport>,
    q_new: Query<(Entity, &PopEffect), Added<PopEffect>>,
) {
    for (entity, effect) in &q_new {
        commands
            .entity(entity)
            .insert((PopEffectVisual, pop_effect_transform(effect, &viewport)));
    }
}

fn sync_bubble_transforms(
    viewport: Res<Viewport>,
    mut q: Query<(&Bubble, &mut Transform), With<BubbleVisual>>,
) {
    for (bubble, mut tf) in &mut q {
        *tf = bubble_transform(bubble, &viewport);
    }
}

fn sync_pop_effects(
    viewport: Res<Viewport>,
    mut q: Query<(&PopEffect, &mut Transform), With<PopEffectVisual>>,
) {
    for (effect, mut tf) in &mut q {
        *tf = pop_effect_transform(effect, &viewport);
    }
}

#[cfg(not(any(test, feature = "headless")))]
fn fade_pop_effect_materials(
    q: Query<(&PopEffect, &MeshMaterial2d<ColorMaterial>), With<PopEffectVisual>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (effect, handle) in &q {
        if let Some(mat) = materials.get_mut(&handle.0) {
            mat.color = effect.color.with_alpha(effect.opacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bp_core::{CorePlugin, Rgb};

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(CorePlugin);
        app.add_plugins(CirclesPlugin);
        app
    }

    #[test]
    fn bubble_gets_visual_and_outline() {
        let mut app = app();
        let e = app
            .world_mut()
            .spawn(Bubble::new(100.0, 600.0, 30.0, 1.0, Rgb::new(9, 9, 9), 3))
            .id();
        app.update();
        assert!(app.world().get::<BubbleVisual>(e).is_some());
        let tf = app.world().get::<Transform>(e).copied();
        let expected = Vec3::new(-300.0, -300.0, bubble_z(3));
        assert!(tf.is_some_and(|t| t.translation.abs_diff_eq(expected, 1e-4)));
        let world = app.world_mut();
        assert_eq!(world.query::<&BubbleOutline>().iter(world).count(), 1);
    }

    #[test]
    fn transforms_follow_state_every_frame() {
        let mut app = app();
        let e = app
            .world_mut()
            .spawn(Bubble::new(400.0, 300.0, 25.0, 1.0, Rgb::default(), 0))
            .id();
        app.update();
        if let Some(mut b) = app.world_mut().get_mut::<Bubble>(e) {
            b.y = 100.0;
        }
        app.update();
        let y = app.world().get::<Transform>(e).map(|t| t.translation.y);
        assert_eq!(y, Some(200.0));
    }

    #[test]
    fn pop_effect_scaled_by_radius() {
        let mut app = app();
        let mut effect = PopEffect::new(Vec2::new(0.0, 0.0), Rgb::default(), 1.0, 0.05);
        effect.radius = 4.0;
        let e = app.world_mut().spawn(effect).id();
        app.update();
        let tf = app.world().get::<Transform>(e).copied();
        assert!(tf.is_some_and(|t| t.scale.x == 4.0
            && t.translation.truncate() == Vec2::new(-400.0, 300.0)
            && t.translation.z == depth::POP_EFFECTS));
        assert!(app.world().get::<PopEffectVisual>(e).is_some());
    }

    #[test]
    fn newer_bubbles_draw_on_top() {
        let vp = Viewport::default();
        let old = Bubble::new(10.0, 10.0, 20.0, 1.0, Rgb::default(), 5);
        let new = Bubble::new(10.0, 10.0, 20.0, 1.0, Rgb::default(), 6);
        let z = |b: &Bubble| bubble_transform(b, &vp).translation.z;
        assert!(z(&new) > z(&old));
    }
}
