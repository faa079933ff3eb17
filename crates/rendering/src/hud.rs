use bevy::prelude::*;
use bp_core::{Score, SimulationSet};

/// Marker for the score text node.
#[derive(Component)]
pub struct ScoreHud;

pub fn score_label(score: &Score) -> String {
    format!("Score: {}", score.value())
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_score_hud)
            .add_systems(Update, refresh_score_hud.in_set(SimulationSet::Visuals));
    }
}

fn spawn_score_hud(mut commands: Commands, score: Res<Score>) {
    commands.spawn((
        Name::new("ScoreHUD"),
        Text::new(score_label(&score)),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(16.0),
            ..default()
        },
        ScoreHud,
    ));
}

/// Rewrites the label only on frames where the score changed.
fn refresh_score_hud(score: Res<Score>, mut q: Query<&mut Text, With<ScoreHud>>) {
    if !score.is_changed() {
        return;
    }
    for mut text in &mut q {
        text.0 = score_label(&score);
    }
}
