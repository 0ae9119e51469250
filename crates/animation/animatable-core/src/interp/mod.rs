//! Easing curves attached to keyframes, and value blending between keyframes.

pub mod functions;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::{Color, Point, ScaleXY};
use functions::{bezier_ease, lerp, lerp_each};

/// Maps linear segment progress in [0,1] to eased progress.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Interpolator {
    #[default]
    Linear,
    /// Keep the segment's start value until the next keyframe.
    Hold,
    /// Cubic-bezier timing with control points (x1, y1) and (x2, y2).
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Interpolator {
    pub fn ease(&self, t: f32) -> f32 {
        match *self {
            Interpolator::Linear => t.clamp(0.0, 1.0),
            Interpolator::Hold => 0.0,
            Interpolator::CubicBezier { x1, y1, x2, y2 } => bezier_ease(t, x1, y1, x2, y2),
        }
    }

    pub fn is_hold(&self) -> bool {
        matches!(self, Interpolator::Hold)
    }
}

impl fmt::Display for Interpolator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interpolator::Linear => f.write_str("linear"),
            Interpolator::Hold => f.write_str("hold"),
            Interpolator::CubicBezier { x1, y1, x2, y2 } => {
                write!(f, "bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

/// Blend between two values of the same kind.
pub trait Interpolate: Sized {
    fn interpolate(&self, to: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        lerp(*self, *to, t)
    }
}

impl Interpolate for i32 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        lerp(*self as f32, *to as f32, t).round() as i32
    }
}

impl Interpolate for [f32; 2] {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        lerp_each(*self, *to, t)
    }
}

impl Interpolate for [f32; 4] {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        lerp_each(*self, *to, t)
    }
}

impl Interpolate for Point {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        Point::new(lerp(self.x, to.x, t), lerp(self.y, to.y, t))
    }
}

impl Interpolate for ScaleXY {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        ScaleXY {
            x: lerp(self.x, to.x, t),
            y: lerp(self.y, to.y, t),
        }
    }
}

impl Interpolate for Color {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        let [r, g, b, a] = lerp_each(
            [self.r, self.g, self.b, self.a],
            [to.r, to.g, to.b, to.a],
            t,
        );
        Color::rgba(r, g, b, a)
    }
}
