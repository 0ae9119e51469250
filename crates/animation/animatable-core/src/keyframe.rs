//! Keyframes and the keyframe-array builder.
//!
//! A keyframe object in the description looks like:
//!
//! ```json
//! { "t": 15, "s": [0], "e": [100], "o": { "x": [0.33], "y": [0] }, "i": { "x": [0.67], "y": [1] } }
//! ```
//!
//! - `t` frame index, `s`/`e` start/end values (decoded by the property),
//! - `o`/`i` out/in tangents of a cubic-bezier easing, `h: 1` for hold.
//!
//! Missing pieces are filled while building the sequence: a keyframe without
//! `s` starts where the previous one ended (the trailing `{ "t": N }` form),
//! and a keyframe without `e` ends on the next keyframe's start value.

use std::fmt;

use log::{debug, warn};

use crate::animatable::AnimatableProperty;
use crate::error::{AnimatableError, StreamError};
use crate::interp::Interpolator;
use crate::reader::{JsonReader, JsonToken};
use crate::Result;

/// One segment of a timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe<V> {
    /// Frame at which `start_value` is the pivot.
    pub frame: f32,
    /// Frame of the following keyframe; `None` on the last keyframe.
    pub end_frame: Option<f32>,
    pub start_value: V,
    /// `None` only on the last keyframe (hold past the end).
    pub end_value: Option<V>,
    pub interpolator: Interpolator,
}

impl<V> Keyframe<V> {
    pub fn new(frame: f32, start_value: V, end_value: Option<V>, interpolator: Interpolator) -> Self {
        Self {
            frame,
            end_frame: None,
            start_value,
            end_value,
            interpolator,
        }
    }

    /// Length of the segment in frames, if it has an end.
    pub fn duration_frames(&self) -> Option<f32> {
        self.end_frame.map(|end| end - self.frame)
    }

    pub fn contains_frame(&self, frame: f32) -> bool {
        frame >= self.frame && self.end_frame.map_or(true, |end| frame < end)
    }

    /// Convert the value representation, keeping timing and easing.
    pub fn map<U>(&self, mut f: impl FnMut(&V) -> U) -> Keyframe<U> {
        Keyframe {
            frame: self.frame,
            end_frame: self.end_frame,
            start_value: f(&self.start_value),
            end_value: self.end_value.as_ref().map(f),
            interpolator: self.interpolator,
        }
    }
}

impl<V: fmt::Debug> fmt::Display for Keyframe<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Keyframe{{frame={}, start={:?}, end={:?}, interpolator={}}}",
            self.frame, self.start_value, self.end_value, self.interpolator
        )
    }
}

/// A keyframe as written in the description, before neighbours fill the gaps.
#[derive(Debug)]
struct RawKeyframe<V> {
    frame: f32,
    start: Option<V>,
    end: Option<V>,
    interpolator: Interpolator,
}

/// Decode a keyframe array. The reader must be positioned on `[` and is left
/// just past the matching `]`.
pub fn parse_keyframes<P: AnimatableProperty>(
    reader: &mut JsonReader,
    property: &P,
    scale: f32,
) -> Result<Vec<Keyframe<P::Value>>> {
    reader.begin_array()?;
    let mut raw = Vec::new();
    while reader.has_next() {
        raw.push(parse_keyframe(reader, property, scale)?);
    }
    reader.end_array()?;

    let keyframes = link_keyframes(raw)?;
    if let (Some(first), Some(last)) = (keyframes.first(), keyframes.last()) {
        debug!(
            "built {} keyframes spanning frames {}..{}",
            keyframes.len(),
            first.frame,
            last.frame
        );
    }
    Ok(keyframes)
}

fn parse_keyframe<P: AnimatableProperty>(
    reader: &mut JsonReader,
    property: &P,
    scale: f32,
) -> Result<RawKeyframe<P::Value>> {
    let mut frame = 0.0;
    let mut start = None;
    let mut end = None;
    let mut hold = false;
    let mut in_tangent = None;
    let mut out_tangent = None;

    reader.begin_object()?;
    while reader.has_next() {
        match reader.next_name()?.as_str() {
            "t" => frame = reader.next_f32()?,
            "s" => start = Some(property.decode_value(reader, scale)?),
            "e" => end = Some(property.decode_value(reader, scale)?),
            "h" => hold = read_flag(reader)?,
            "i" => in_tangent = Some(read_tangent(reader)?),
            "o" => out_tangent = Some(read_tangent(reader)?),
            _ => reader.skip_value()?,
        }
    }
    reader.end_object()?;

    let interpolator = match (hold, out_tangent, in_tangent) {
        (true, _, _) => Interpolator::Hold,
        (false, Some([x1, y1]), Some([x2, y2])) => Interpolator::CubicBezier { x1, y1, x2, y2 },
        _ => Interpolator::Linear,
    };
    Ok(RawKeyframe {
        frame,
        start,
        end,
        interpolator,
    })
}

fn link_keyframes<V: Clone>(raw: Vec<RawKeyframe<V>>) -> Result<Vec<Keyframe<V>>> {
    let mut keyframes: Vec<Keyframe<V>> = Vec::with_capacity(raw.len());
    let mut carried: Option<V> = None;
    for (index, kf) in raw.into_iter().enumerate() {
        let start_value = kf.start.or_else(|| carried.take()).ok_or_else(|| {
            AnimatableError::malformed(format!(
                "keyframe {index} at frame {} has no start value",
                kf.frame
            ))
        })?;
        carried = Some(kf.end.clone().unwrap_or_else(|| start_value.clone()));
        keyframes.push(Keyframe::new(kf.frame, start_value, kf.end, kf.interpolator));
    }

    for i in 1..keyframes.len() {
        let next_frame = keyframes[i].frame;
        if next_frame < keyframes[i - 1].frame {
            warn!(
                "keyframe {i} at frame {next_frame} precedes frame {}; keeping document order",
                keyframes[i - 1].frame
            );
        }
        let next_start = keyframes[i].start_value.clone();
        let previous = &mut keyframes[i - 1];
        previous.end_frame = Some(next_frame);
        if previous.end_value.is_none() {
            previous.end_value = Some(next_start);
        }
    }
    Ok(keyframes)
}

fn read_flag(reader: &mut JsonReader) -> std::result::Result<bool, StreamError> {
    match reader.peek() {
        JsonToken::Bool => reader.next_bool(),
        JsonToken::Number => Ok(reader.next_f64()? != 0.0),
        _ => reader.skip_value().map(|_| false),
    }
}

/// `{ "x": 0.5, "y": [1] }` -> `[x, y]`; missing coordinates read as 0.
fn read_tangent(reader: &mut JsonReader) -> std::result::Result<[f32; 2], StreamError> {
    let mut point = [0.0, 0.0];
    reader.begin_object()?;
    while reader.has_next() {
        match reader.next_name()?.as_str() {
            "x" => point[0] = reader.next_scalar()?,
            "y" => point[1] = reader.next_scalar()?,
            _ => reader.skip_value()?,
        }
    }
    reader.end_object()?;
    Ok(point)
}
