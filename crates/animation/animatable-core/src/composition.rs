//! Composition context: document-wide frame rate, density scale and frame window.

use serde::{Deserialize, Serialize};

use crate::error::AnimatableError;

/// Read-only context shared by every animatable value of one document.
///
/// `scale` is the host's device-density factor and is never read from the
/// document itself.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Composition {
    /// Frames per second (> 0).
    pub frame_rate: f32,
    /// Unit conversion applied to density-dependent values.
    pub scale: f32,
    pub start_frame: f32,
    pub end_frame: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for Composition {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            scale: 1.0,
            start_frame: 0.0,
            end_frame: 0.0,
            width: 0,
            height: 0,
        }
    }
}

impl Composition {
    /// Unchecked; [`AnimatableValue::parse`](crate::AnimatableValue::parse)
    /// runs [`validate`](Self::validate) before using it.
    pub fn new(frame_rate: f32, scale: f32) -> Self {
        Self {
            frame_rate,
            scale,
            ..Self::default()
        }
    }

    /// Build a composition from a document header (`fr`, `ip`, `op`, `w`, `h`).
    /// Unknown fields, including the layer list, are ignored.
    pub fn from_json(s: &str, scale: f32) -> Result<Self, AnimatableError> {
        let header: RawHeader = serde_json::from_str(s)?;
        let composition = Self {
            frame_rate: header.frame_rate,
            scale,
            start_frame: header.in_point,
            end_frame: header.out_point,
            width: header.width,
            height: header.height,
        };
        composition.validate()?;
        Ok(composition)
    }

    pub fn validate(&self) -> Result<(), AnimatableError> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(AnimatableError::InvalidComposition {
                reason: format!("frame rate must be > 0, got {}", self.frame_rate),
            });
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(AnimatableError::InvalidComposition {
                reason: format!("scale must be > 0, got {}", self.scale),
            });
        }
        Ok(())
    }

    /// Convert a frame count to whole milliseconds, truncating toward zero.
    /// Negative spans saturate to 0.
    pub fn frames_to_ms(&self, frames: f32) -> u64 {
        (f64::from(frames) / f64::from(self.frame_rate) * 1000.0) as u64
    }

    pub fn ms_to_frames(&self, ms: f64) -> f32 {
        (ms / 1000.0 * f64::from(self.frame_rate)) as f32
    }

    /// Length of the composition's frame window in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.frames_to_ms(self.end_frame - self.start_frame)
    }
}

#[derive(Debug, Deserialize)]
struct RawHeader {
    #[serde(rename = "fr")]
    frame_rate: f32,
    #[serde(rename = "ip", default)]
    in_point: f32,
    #[serde(rename = "op", default)]
    out_point: f32,
    #[serde(rename = "w", default)]
    width: u32,
    #[serde(rename = "h", default)]
    height: u32,
}
