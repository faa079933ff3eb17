use bevy::prelude::*;
use bp_config::FrameConfig;

/// Player score. Only ever grows; mutated by the pop system alone.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    value: u64,
}

impl Score {
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn add(&mut self, points: u32) -> u64 {
        self.value = self.value.saturating_add(points as u64);
        self.value
    }
}

/// Logical size of the drawing surface, mirrored from the primary window.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Screen space (top-left origin, y down) to 2D world space (centered, y up).
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x - self.width / 2.0, self.height / 2.0 - screen.y)
    }
}

/// Per-update timing in nominal-frame units.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameClock {
    /// Milliseconds this update covers after clamping.
    pub dt_ms: f32,
    /// `dt_ms` expressed in nominal frames; per-frame constants are multiplied by this.
    pub step: f32,
    pub frame: u64,
}

impl FrameClock {
    pub fn advance(&mut self, real_dt_ms: f32, cfg: &FrameConfig) {
        let nominal = if cfg.nominal_frame_ms > 0.0 {
            cfg.nominal_frame_ms
        } else {
            FrameConfig::default().nominal_frame_ms
        };
        self.dt_ms = if cfg.fixed_step {
            nominal
        } else {
            real_dt_ms.clamp(0.0, cfg.max_frame_ms.max(nominal))
        };
        self.step = self.dt_ms / nominal;
        self.frame += 1;
    }
}
