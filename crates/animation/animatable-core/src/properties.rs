//! Stock property kinds.
//!
//! | property | decoded | public | density scale |
//! |---|---|---|---|
//! | [`FloatProperty`] | `f32` | `f32` | yes |
//! | [`IntegerProperty`] | `i32` | `i32` | yes, then rounded |
//! | [`PointProperty`] | `[f32; 2]` | [`Point`] | per component |
//! | [`ScaleProperty`] | `[f32; 2]` (percent) | [`ScaleXY`] | no |
//! | [`ColorProperty`] | `[f32; 4]` | [`Color`] | no |
//!
//! Whether the scale is applied at all is decided by the `density_scaled`
//! flag given to [`AnimatableValue::parse`]; with it off every property
//! decodes with a scale of 1.

use crate::animatable::{AnimatableProperty, AnimatableValue};
use crate::animation::KeyframeAnimation;
use crate::error::StreamError;
use crate::reader::JsonReader;
use crate::value::{Color, Point, ScaleXY};

pub type AnimatableFloatValue = AnimatableValue<FloatProperty>;
pub type AnimatableIntegerValue = AnimatableValue<IntegerProperty>;
pub type AnimatablePointValue = AnimatableValue<PointProperty>;
pub type AnimatableScaleValue = AnimatableValue<ScaleProperty>;
pub type AnimatableColorValue = AnimatableValue<ColorProperty>;

fn invalid(reader: &JsonReader, reason: impl Into<String>) -> StreamError {
    StreamError::InvalidValue {
        reason: reason.into(),
        path: reader.path(),
    }
}

fn read_pair(reader: &mut JsonReader) -> Result<[f32; 2], StreamError> {
    match reader.next_number_list()?.as_slice() {
        [x, y, ..] => Ok([*x, *y]),
        other => Err(invalid(
            reader,
            format!("expected at least 2 components, got {}", other.len()),
        )),
    }
}

/// Plain number (rotation, stroke width, trim offsets, ...).
#[derive(Clone, Copy, Debug, Default)]
pub struct FloatProperty;

impl AnimatableProperty for FloatProperty {
    type Value = f32;
    type Output = f32;
    type Animation = KeyframeAnimation<f32>;

    fn decode_value(&self, reader: &mut JsonReader, scale: f32) -> Result<f32, StreamError> {
        Ok(reader.next_scalar()? * scale)
    }

    fn create_animation(&self, source: &AnimatableValue<Self>) -> Self::Animation {
        KeyframeAnimation::from_source(source)
    }
}

/// Whole number, e.g. opacity in percent.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntegerProperty;

impl AnimatableProperty for IntegerProperty {
    type Value = i32;
    type Output = i32;
    type Animation = KeyframeAnimation<i32>;

    fn decode_value(&self, reader: &mut JsonReader, scale: f32) -> Result<i32, StreamError> {
        Ok((reader.next_scalar()? * scale).round() as i32)
    }

    fn create_animation(&self, source: &AnimatableValue<Self>) -> Self::Animation {
        KeyframeAnimation::from_source(source)
    }
}

/// 2D position or anchor; a third component, if present, is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointProperty;

impl AnimatableProperty for PointProperty {
    type Value = [f32; 2];
    type Output = Point;
    type Animation = KeyframeAnimation<Point>;

    fn decode_value(&self, reader: &mut JsonReader, scale: f32) -> Result<[f32; 2], StreamError> {
        let [x, y] = read_pair(reader)?;
        Ok([x * scale, y * scale])
    }

    fn create_animation(&self, source: &AnimatableValue<Self>) -> Self::Animation {
        KeyframeAnimation::from_source(source)
    }
}

/// Scale in percent, exposed as factors.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScaleProperty;

impl AnimatableProperty for ScaleProperty {
    type Value = [f32; 2];
    type Output = ScaleXY;
    type Animation = KeyframeAnimation<ScaleXY>;

    fn decode_value(&self, reader: &mut JsonReader, _scale: f32) -> Result<[f32; 2], StreamError> {
        read_pair(reader)
    }

    fn create_animation(&self, source: &AnimatableValue<Self>) -> Self::Animation {
        KeyframeAnimation::from_source(source)
    }
}

/// RGB(A) color. Components above 1 mark a 0..255 encoding; alpha defaults to 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorProperty;

impl AnimatableProperty for ColorProperty {
    type Value = [f32; 4];
    type Output = Color;
    type Animation = KeyframeAnimation<Color>;

    fn decode_value(&self, reader: &mut JsonReader, _scale: f32) -> Result<[f32; 4], StreamError> {
        let mut channels = reader.next_number_list()?;
        if channels.len() < 3 {
            return Err(invalid(
                reader,
                format!("expected 3 or 4 color components, got {}", channels.len()),
            ));
        }
        channels.truncate(4);
        // The 0..255 check only sees decoded channels; a defaulted alpha stays 1.
        if channels.iter().any(|c| *c > 1.0) {
            for c in &mut channels {
                *c /= 255.0;
            }
        }
        let alpha = channels.get(3).copied().unwrap_or(1.0);
        Ok([channels[0], channels[1], channels[2], alpha])
    }

    fn create_animation(&self, source: &AnimatableValue<Self>) -> Self::Animation {
        KeyframeAnimation::from_source(source)
    }
}
