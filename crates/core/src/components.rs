//! Simulation components. Positions are screen-space (origin top-left, y down); the rendering
//! crate maps them into world space. Per-frame motion is scaled by `step`, the number of
//! nominal frames the current update covers (1.0 at a steady 60 Hz).

use bevy::prelude::*;
use bp_config::{CloudConfig, ScoringConfig};
use rand::Rng;

use crate::color::Rgb;
use crate::random::sample_f32;

/// Rising bubble. Radius and speed are fixed at creation.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Bubble {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Upward distance per nominal frame.
    pub speed: f32,
    pub color: Rgb,
    pub expired: bool,
    /// Monotonic creation index; higher means newer (drawn on top, hit first).
    pub spawn_order: u64,
}

impl Bubble {
    pub fn new(x: f32, y: f32, radius: f32, speed: f32, color: Rgb, spawn_order: u64) -> Self {
        Self {
            x,
            y,
            radius,
            speed,
            color,
            expired: false,
            spawn_order,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Rise by `speed * step`; expire once fully above the top edge. No-op when expired.
    pub fn update(&mut self, step: f32) {
        if self.expired {
            return;
        }
        self.y -= self.speed * step;
        if self.y + self.radius < 0.0 {
            self.expired = true;
        }
    }

    /// Strict containment: a point exactly on the rim misses.
    pub fn contains(&self, point: Vec2) -> bool {
        self.center().distance(point) < self.radius
    }

    /// Size-tiered score: smaller bubbles are worth more.
    pub fn points(&self, scoring: &ScoringConfig) -> u32 {
        if self.radius < scoring.small_below {
            scoring.small_points
        } else if self.radius < scoring.medium_below {
            scoring.medium_points
        } else {
            scoring.large_points
        }
    }
}

/// Expanding, fading disc left behind by a popped bubble.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PopEffect {
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
    pub radius: f32,
    pub expansion: f32,
    pub opacity: f32,
    pub fade_step: f32,
    pub expired: bool,
}

impl PopEffect {
    pub fn new(center: Vec2, color: Rgb, expansion: f32, fade_step: f32) -> Self {
        Self {
            x: center.x,
            y: center.y,
            color,
            radius: 0.0,
            expansion,
            opacity: 1.0,
            fade_step,
            expired: false,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn update(&mut self, step: f32) {
        if self.expired {
            return;
        }
        self.radius += self.expansion * step;
        self.opacity -= self.fade_step * step;
        if self.opacity <= 0.0 {
            self.opacity = 0.0;
            self.expired = true;
        }
    }
}

/// Decorative backdrop cloud bound to one parallax layer. Never expires.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub layer: u32,
    pub opacity: f32,
}

impl Cloud {
    /// Initial placement: scattered across the full viewport width so the sky is not empty on
    /// the first frame; all other values follow the wraparound sampling.
    pub fn spawn(rng: &mut impl Rng, layer: u32, viewport: Vec2, cfg: &CloudConfig) -> Self {
        let mut cloud = Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            speed: 0.0,
            layer,
            opacity: 0.0,
        };
        cloud.resample(rng, viewport, cfg);
        let right = viewport.x.max(0.0);
        cloud.x = if right > 0.0 {
            rng.gen_range(0.0..right)
        } else {
            0.0
        };
        cloud
    }

    /// Re-randomize everything except the layer and park just off the left edge.
    pub fn resample(&mut self, rng: &mut impl Rng, viewport: Vec2, cfg: &CloudConfig) {
        let layers = cfg.layers.max(1) as f32;
        let depth = (self.layer + 1) as f32;
        self.width = sample_f32(rng, &cfg.width_range);
        self.height = self.width * cfg.aspect;
        self.x = -self.width;
        let band = (viewport.y / layers * depth).max(0.0);
        let band_y = if band > 0.0 {
            rng.gen_range(0.0..band)
        } else {
            0.0
        };
        self.y = band_y - self.height / 2.0;
        self.speed = sample_f32(rng, &cfg.speed_range) * depth / 10.0;
        self.opacity = Self::layer_opacity(self.layer, cfg);
    }

    pub fn layer_opacity(layer: u32, cfg: &CloudConfig) -> f32 {
        (cfg.base_opacity + layer as f32 * cfg.opacity_step).clamp(0.0, 1.0)
    }

    /// Drift right; past the right edge the cloud wraps and resamples. Returns whether it wrapped.
    pub fn update(
        &mut self,
        step: f32,
        rng: &mut impl Rng,
        viewport: Vec2,
        cfg: &CloudConfig,
    ) -> bool {
        self.x += self.speed * step;
        if self.x > viewport.x {
            self.resample(rng, viewport, cfg);
            true
        } else {
            false
        }
    }
}
