//! Draw order and config-derived colors shared by the visual plugins.

use bevy::prelude::*;
use bp_config::{BackgroundConfig, BubbleStyleConfig};

/// Z bands, back to front: background, clouds, bubbles, pop effects.
pub mod depth {
    pub const BACKGROUND: f32 = -100.0;
    pub const CLOUDS: f32 = -50.0;
    /// Added per cloud layer so nearer layers draw over farther ones.
    pub const CLOUD_LAYER_STEP: f32 = 1.0;
    pub const BUBBLES: f32 = 0.0;
    /// Added per spawn order so newer bubbles draw on top.
    pub const BUBBLE_ORDER_STEP: f32 = 0.001;
    /// Spawn orders wrap after this many bubbles to keep bubble z below the pop band.
    pub const BUBBLE_ORDER_WRAP: u64 = 100_000;
    pub const OUTLINE_OFFSET: f32 = 0.0005;
    pub const POP_EFFECTS: f32 = 200.0;
}

pub fn bubble_z(spawn_order: u64) -> f32 {
    depth::BUBBLES + (spawn_order % depth::BUBBLE_ORDER_WRAP) as f32 * depth::BUBBLE_ORDER_STEP
}

pub fn cloud_z(layer: u32) -> f32 {
    depth::CLOUDS + layer as f32 * depth::CLOUD_LAYER_STEP
}

pub fn clear_color(bg: &BackgroundConfig) -> Color {
    let (r, g, b) = bg.clear_color;
    Color::srgb(r, g, b)
}

/// White bubble rim at the configured alpha.
pub fn outline_color(style: &BubbleStyleConfig) -> Color {
    Color::srgba(1.0, 1.0, 1.0, style.outline_alpha.clamp(0.0, 1.0))
}
