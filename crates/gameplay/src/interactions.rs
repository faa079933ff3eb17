// Pointer handling: mouse left presses and touch starts become `PointerDown` events in viewport
// coordinates, then each event pops at most one bubble.
// Both systems run in SimulationSet::Input, ahead of every entity update in the frame, so the
// hit test, expiry mark, score bump and pop-effect spawn land as one unit.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bp_core::random::sample_f32;
use bp_core::{Bubble, BubblePopped, GameConfigRes, PointerDown, PopEffect, Score};
use rand::rngs::StdRng;

/// Deterministic RNG for pop-effect expansion speeds.
#[derive(Resource)]
pub struct EffectRng(pub StdRng);

/// Topmost live bubble under `point`: newest spawn order wins among those whose disc strictly
/// contains the point.
pub fn hit_test<'a, I>(bubbles: I, point: Vec2) -> Option<Entity>
where
    I: IntoIterator<Item = (Entity, &'a Bubble)>,
{
    bubbles
        .into_iter()
        .filter(|(_, b)| !b.expired && b.contains(point))
        .max_by_key(|(_, b)| b.spawn_order)
        .map(|(e, _)| e)
}

/// System: translate raw input into `PointerDown`. Input resources are optional so headless
/// apps without `InputPlugin` still run.
pub fn collect_pointer_input(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    touches: Option<Res<Touches>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut out: EventWriter<PointerDown>,
) {
    if let Some(buttons) = buttons {
        if buttons.just_pressed(MouseButton::Left) {
            if let Some(position) = windows.single().ok().and_then(|w| w.cursor_position()) {
                out.write(PointerDown { position });
            }
        }
    }
    if let Some(touches) = touches {
        for touch in touches.iter_just_pressed() {
            out.write(PointerDown {
                position: touch.position(),
            });
        }
    }
}

/// System: resolve queued pointer presses against live bubbles.
pub fn pop_bubbles(
    mut commands: Commands,
    mut presses: EventReader<PointerDown>,
    mut bubbles: Query<(Entity, &mut Bubble)>,
    mut score: ResMut<Score>,
    mut rng: ResMut<EffectRng>,
    cfg: Res<GameConfigRes>,
    mut popped: EventWriter<BubblePopped>,
) {
    for press in presses.read() {
        let Some(hit) = hit_test(bubbles.iter(), press.position) else {
            trace!(x = press.position.x, y = press.position.y, "pointer missed");
            continue;
        };
        let Ok((entity, mut bubble)) = bubbles.get_mut(hit) else {
            continue;
        };
        bubble.expired = true;
        let center = bubble.center();
        let expansion = sample_f32(&mut rng.0, &cfg.0.pop_effect.expansion_range);
        commands.spawn(PopEffect::new(
            center,
            bubble.color,
            expansion,
            cfg.0.pop_effect.fade_step,
        ));
        let points = bubble.points(&cfg.0.scoring);
        let total = score.add(points);
        debug!(
            order = bubble.spawn_order,
            radius = bubble.radius,
            points,
            score = total,
            "bubble popped"
        );
        popped.write(BubblePopped {
            entity,
            position: center,
            radius: bubble.radius,
            points,
            score: total,
        });
    }
}
