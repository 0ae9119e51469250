//! Animatable value core.
//!
//! Parses the `"k"` field of a property object into either a static value or a
//! keyframe timeline, derives timing from the composition frame rate, and
//! builds runtime interpolation objects through per-property capabilities.

pub mod animatable;
pub mod animation;
pub mod composition;
pub mod error;
pub mod interp;
pub mod keyframe;
pub mod properties;
pub mod reader;
pub mod value;

// Re-exports for consumers
pub use animatable::{AnimatableProperty, AnimatableValue};
pub use animation::KeyframeAnimation;
pub use composition::Composition;
pub use error::{AnimatableError, StreamError};
pub use interp::{Interpolate, Interpolator};
pub use keyframe::Keyframe;
pub use properties::{
    AnimatableColorValue, AnimatableFloatValue, AnimatableIntegerValue, AnimatablePointValue,
    AnimatableScaleValue, ColorProperty, FloatProperty, IntegerProperty, PointProperty,
    ScaleProperty,
};
pub use reader::{JsonReader, JsonToken};
pub use value::{Color, Point, ScaleXY};

pub type Result<T> = std::result::Result<T, AnimatableError>;
