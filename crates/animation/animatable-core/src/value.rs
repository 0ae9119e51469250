//! Public value representations handed to the rendering layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 2D point in composition units.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Scale factors (1.0 == 100%).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScaleXY {
    pub x: f32,
    pub y: f32,
}

impl Default for ScaleXY {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

/// Documents author scale in percent.
impl From<[f32; 2]> for ScaleXY {
    fn from([x, y]: [f32; 2]) -> Self {
        Self {
            x: x / 100.0,
            y: y / 100.0,
        }
    }
}

/// RGBA color, components in 0..1.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Pack into 0xAARRGGBB.
    pub fn to_argb(&self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.a) << 24) | (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_converts_percent_to_factor() {
        assert_eq!(ScaleXY::from([50.0, 200.0]), ScaleXY { x: 0.5, y: 2.0 });
    }

    #[test]
    fn color_packs_argb() {
        assert_eq!(Color::rgba(1.0, 0.0, 0.0, 1.0).to_argb(), 0xFFFF_0000);
        assert_eq!(Color::rgba(0.0, 0.0, 1.0, 0.0).to_argb(), 0x0000_00FF);
    }
}
