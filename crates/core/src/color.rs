//! Opaque RGB colors for bubbles and pop effects.

use bevy::prelude::Color;
use rand::Rng;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uniformly random opaque color (every 24-bit value equally likely).
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            r: rng.gen(),
            g: rng.gen(),
            b: rng.gen(),
        }
    }

    /// `#RRGGBB`, upper-case hex.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Same color at the given alpha, for faded draws.
    pub fn with_alpha(self, alpha: f32) -> Color {
        Color::srgba_u8(self.r, self.g, self.b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::srgb_u8(c.r, c.g, c.b)
    }
}
