//! Animatable value engine.
//!
//! An [`AnimatableValue`] owns the parsed form of one property: either a single
//! static value or a timeline of [`Keyframe`]s read from the property object's
//! `"k"` field. What a value *is* (a number, a point, a color) and how it is
//! animated at runtime is supplied by an [`AnimatableProperty`] implementation;
//! the engine only handles parsing, timing and wiring.
//!
//! ```json
//! { "a": 0, "k": 100 }                                  // static
//! { "a": 0, "k": [120, 80, 0] }                          // static, array encoded
//! { "a": 1, "k": [ { "t": 0, "s": [0] }, { "t": 30, "s": [100] } ] }  // keyframed
//! ```

use std::fmt;
use std::sync::Arc;

use log::trace;
use serde_json::Value as JsonValue;

use crate::composition::Composition;
use crate::error::{AnimatableError, StreamError};
use crate::interp::Interpolator;
use crate::keyframe::{parse_keyframes, Keyframe};
use crate::reader::{JsonReader, JsonToken};
use crate::Result;

/// Capabilities a concrete property type supplies to the engine.
pub trait AnimatableProperty: Sized {
    /// Decoded, internal representation.
    type Value: Clone + fmt::Debug;
    /// Representation handed to callers.
    type Output: From<Self::Value>;
    /// Runtime object produced by [`AnimatableProperty::create_animation`].
    type Animation;

    /// Decode exactly one value at the reader's position, applying `scale`
    /// where the value is density dependent.
    fn decode_value(
        &self,
        reader: &mut JsonReader,
        scale: f32,
    ) -> std::result::Result<Self::Value, StreamError>;

    /// Build the runtime interpolation object for a parsed value.
    fn create_animation(&self, source: &AnimatableValue<Self>) -> Self::Animation;

    /// Convert a decoded value to the public representation.
    fn convert(&self, value: &Self::Value) -> Self::Output {
        Self::Output::from(value.clone())
    }
}

/// Parsed property value: static, or a timeline of keyframes.
#[derive(Clone, Debug)]
pub struct AnimatableValue<P: AnimatableProperty> {
    property: P,
    composition: Arc<Composition>,
    density_scaled: bool,
    initial_value: Option<P::Value>,
    keyframes: Vec<Keyframe<P::Value>>,
    interpolators: Vec<Interpolator>,
}

impl<P: AnimatableProperty> AnimatableValue<P> {
    /// Static value known up front; nothing is parsed or scaled.
    pub fn with_value(property: P, composition: Arc<Composition>, value: P::Value) -> Self {
        Self {
            property,
            composition,
            density_scaled: false,
            initial_value: Some(value),
            keyframes: Vec::new(),
            interpolators: Vec::new(),
        }
    }

    /// Parse a property object. The reader must be positioned on `{`; the whole
    /// object is consumed so the caller can continue with sibling fields.
    ///
    /// Only `"k"` is interpreted. An array of keyframe objects (or an empty
    /// array) starts a timeline; anything else, including a bare number array
    /// such as `[120, 80]`, is a single static value.
    pub fn parse(
        reader: &mut JsonReader,
        property: P,
        composition: Arc<Composition>,
        density_scaled: bool,
    ) -> Result<Self> {
        composition.validate()?;
        let scale = if density_scaled { composition.scale } else { 1.0 };
        let mut content = None;

        reader.begin_object()?;
        while reader.has_next() {
            let name = reader.next_name()?;
            match name.as_str() {
                "k" => content = Some(read_content(reader, &property, scale)?),
                _ => {
                    trace!("skipping field '{name}' at {}", reader.path());
                    reader.skip_value()?;
                }
            }
        }
        reader.end_object()?;

        let Some((initial_value, keyframes)) = content else {
            return Err(AnimatableError::malformed(format!(
                "Unable to parse animatable value at {}: no \"k\" field",
                reader.path()
            )));
        };

        let interpolators = keyframes.iter().map(|kf| kf.interpolator).collect();
        Ok(Self {
            property,
            composition,
            density_scaled,
            initial_value,
            keyframes,
            interpolators,
        })
    }

    /// Parse a property object held as a JSON value.
    pub fn from_value(
        value: JsonValue,
        property: P,
        composition: Arc<Composition>,
        density_scaled: bool,
    ) -> Result<Self> {
        let mut reader = JsonReader::new(value);
        Self::parse(&mut reader, property, composition, density_scaled)
    }

    /// Parse a property object from JSON text.
    pub fn from_json(
        s: &str,
        property: P,
        composition: Arc<Composition>,
        density_scaled: bool,
    ) -> Result<Self> {
        let mut reader: JsonReader = s.parse()?;
        Self::parse(&mut reader, property, composition, density_scaled)
    }

    pub fn has_animation(&self) -> bool {
        !self.keyframes.is_empty()
    }

    /// Initial value in the public representation; `None` only for an empty
    /// keyframe array. Converted on every call.
    pub fn initial_value(&self) -> Option<P::Output> {
        self.initial_value.as_ref().map(|v| self.property.convert(v))
    }

    /// Initial value in the decoded representation.
    pub fn raw_initial_value(&self) -> Option<&P::Value> {
        self.initial_value.as_ref()
    }

    pub fn duration_frames(&self) -> Result<f32> {
        match (self.keyframes.first(), self.keyframes.last()) {
            (Some(first), Some(last)) => Ok(last.frame - first.frame),
            _ => Err(AnimatableError::NoKeyframes),
        }
    }

    /// Milliseconds spanned by the timeline, truncated toward zero.
    /// Fails with [`AnimatableError::NoKeyframes`] for static values.
    pub fn duration_ms(&self) -> Result<u64> {
        Ok(self.composition.frames_to_ms(self.duration_frames()?))
    }

    /// Milliseconds before the first keyframe; 0 for static values.
    pub fn delay_ms(&self) -> u64 {
        self.keyframes
            .first()
            .map_or(0, |first| self.composition.frames_to_ms(first.frame))
    }

    pub fn keyframes(&self) -> &[Keyframe<P::Value>] {
        &self.keyframes
    }

    /// Easing of each keyframe, in timeline order.
    pub fn interpolators(&self) -> &[Interpolator] {
        &self.interpolators
    }

    pub fn is_density_scaled(&self) -> bool {
        self.density_scaled
    }

    pub fn composition(&self) -> &Arc<Composition> {
        &self.composition
    }

    pub fn property(&self) -> &P {
        &self.property
    }

    pub fn create_animation(&self) -> P::Animation {
        self.property.create_animation(self)
    }
}

/// Decoded content of one `"k"` field: the initial value plus the timeline,
/// which is empty for static values.
type Content<V> = (Option<V>, Vec<Keyframe<V>>);

fn read_content<P: AnimatableProperty>(
    reader: &mut JsonReader,
    property: &P,
    scale: f32,
) -> Result<Content<P::Value>> {
    match reader.peek_first_element() {
        Some(JsonToken::BeginObject | JsonToken::EndArray) => {
            let keyframes = parse_keyframes(reader, property, scale)?;
            let initial_value = keyframes.first().map(|kf| kf.start_value.clone());
            Ok((initial_value, keyframes))
        }
        _ => Ok((Some(property.decode_value(reader, scale)?), Vec::new())),
    }
}

impl<P: AnimatableProperty> fmt::Display for AnimatableValue<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.initial_value {
            Some(value) => write!(f, "initial_value={value:?}")?,
            None => f.write_str("initial_value=None")?,
        }
        if !self.keyframes.is_empty() {
            f.write_str(", values=[")?;
            for (i, kf) in self.keyframes.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{kf}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}
