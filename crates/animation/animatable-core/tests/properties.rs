use std::sync::Arc;

use animatable_core::{
    AnimatableColorValue, AnimatableError, AnimatableFloatValue, AnimatableIntegerValue,
    AnimatablePointValue, AnimatableProperty, AnimatableScaleValue, AnimatableValue, Color,
    ColorProperty, Composition, FloatProperty, IntegerProperty, JsonReader, KeyframeAnimation,
    Point, PointProperty, ScaleProperty, ScaleXY, StreamError,
};
use approx::assert_abs_diff_eq;
use serde_json::json;

fn comp(scale: f32) -> Arc<Composition> {
    Arc::new(Composition::new(30.0, scale))
}

#[test]
fn density_scaled_static_value_is_multiplied() {
    let value =
        AnimatableFloatValue::from_value(json!({ "k": 10 }), FloatProperty, comp(2.0), true).unwrap();
    assert_eq!(value.initial_value(), Some(20.0));
    assert!(!value.has_animation());
    assert!(value.is_density_scaled());
}

#[test]
fn scale_is_ignored_unless_density_scaled() {
    let value =
        AnimatableFloatValue::from_value(json!({ "k": 10 }), FloatProperty, comp(3.0), false).unwrap();
    assert_eq!(value.initial_value(), Some(10.0));
}

#[test]
fn density_scale_applies_to_every_keyframe_value() {
    let doc = json!({ "k": [
        { "t": 0, "s": [10, 20], "e": [30, 40] },
        { "t": 10, "s": [30, 40] }
    ] });
    let unscaled = AnimatablePointValue::from_value(doc.clone(), PointProperty, comp(1.5), false).unwrap();
    let scaled = AnimatablePointValue::from_value(doc, PointProperty, comp(1.5), true).unwrap();
    for (a, b) in unscaled.keyframes().iter().zip(scaled.keyframes()) {
        assert_eq!(b.start_value, [a.start_value[0] * 1.5, a.start_value[1] * 1.5]);
        assert_eq!(
            b.end_value,
            a.end_value.map(|[x, y]| [x * 1.5, y * 1.5])
        );
    }
}

#[test]
fn integers_round_after_scaling() {
    let value =
        AnimatableIntegerValue::from_value(json!({ "k": [33.4] }), IntegerProperty, comp(1.0), false)
            .unwrap();
    assert_eq!(value.initial_value(), Some(33));
}

#[test]
fn point_converts_and_drops_z() {
    let value =
        AnimatablePointValue::from_value(json!({ "k": [120, 80, 0] }), PointProperty, comp(1.0), false)
            .unwrap();
    assert_eq!(value.raw_initial_value(), Some(&[120.0, 80.0]));
    assert_eq!(value.initial_value(), Some(Point::new(120.0, 80.0)));
}

#[test]
fn point_needs_two_components() {
    let err = AnimatablePointValue::from_value(json!({ "k": [1] }), PointProperty, comp(1.0), false)
        .unwrap_err();
    assert!(matches!(
        err,
        AnimatableError::Stream(StreamError::InvalidValue { .. })
    ));
}

#[test]
fn scale_is_exposed_as_factor_and_never_density_scaled() {
    let value =
        AnimatableScaleValue::from_value(json!({ "k": [50, 200, 100] }), ScaleProperty, comp(4.0), true)
            .unwrap();
    assert_eq!(value.initial_value(), Some(ScaleXY { x: 0.5, y: 2.0 }));
}

#[test]
fn color_accepts_rgb_rgba_and_byte_ranges() {
    let rgb = AnimatableColorValue::from_value(json!({ "k": [1, 0, 0] }), ColorProperty, comp(1.0), false)
        .unwrap();
    assert_eq!(rgb.initial_value(), Some(Color::rgba(1.0, 0.0, 0.0, 1.0)));

    let bytes = AnimatableColorValue::from_value(
        json!({ "k": [255, 0, 51, 255] }),
        ColorProperty,
        comp(1.0),
        false,
    )
    .unwrap();
    let c = bytes.initial_value().unwrap();
    assert_abs_diff_eq!(c.r, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(c.b, 0.2, epsilon = 1e-6);
    assert_abs_diff_eq!(c.a, 1.0, epsilon = 1e-6);

    let err = AnimatableColorValue::from_value(json!({ "k": [1, 0] }), ColorProperty, comp(1.0), false)
        .unwrap_err();
    assert!(matches!(err, AnimatableError::Stream(StreamError::InvalidValue { .. })));
}

#[test]
fn float_animation_follows_keyframes() {
    let value = AnimatableFloatValue::from_value(
        json!({ "k": [
            { "t": 0, "s": [0] },
            { "t": 15, "s": [0], "e": [100] },
            { "t": 30, "s": [100] }
        ] }),
        FloatProperty,
        comp(1.0),
        false,
    )
    .unwrap();
    let anim = value.create_animation();
    assert!(!anim.is_static());
    assert_eq!(anim.value_at_frame(10.0), Some(0.0));
    assert_abs_diff_eq!(anim.value_at_frame(22.5).unwrap(), 50.0, epsilon = 1e-4);
    assert_eq!(anim.value_at_frame(30.0), Some(100.0));
    assert_abs_diff_eq!(anim.value_at_progress(0.75).unwrap(), 50.0, epsilon = 1e-4);
    assert_abs_diff_eq!(anim.value_at_time_ms(750.0).unwrap(), 50.0, epsilon = 1e-4);
}

#[test]
fn point_animation_interpolates_in_public_representation() {
    let value = AnimatablePointValue::from_value(
        json!({ "k": [
            { "t": 0, "s": [0, 0], "e": [100, 50] },
            { "t": 10 }
        ] }),
        PointProperty,
        comp(2.0),
        true,
    )
    .unwrap();
    let anim: KeyframeAnimation<Point> = value.create_animation();
    let mid = anim.value_at_frame(5.0).unwrap();
    assert_abs_diff_eq!(mid.x, 100.0, epsilon = 1e-4);
    assert_abs_diff_eq!(mid.y, 50.0, epsilon = 1e-4);
    assert_eq!(anim.value_at_frame(10.0), Some(Point::new(200.0, 100.0)));
}

#[test]
fn static_animation_returns_the_converted_constant() {
    let value =
        AnimatableScaleValue::from_value(json!({ "k": [100, 100] }), ScaleProperty, comp(1.0), false)
            .unwrap();
    let anim = value.create_animation();
    assert!(anim.is_static());
    assert_eq!(anim.value_at_frame(12.0), Some(ScaleXY::default()));
}

/// A property whose public form is a formatted label, to exercise a custom
/// conversion and animation type.
#[derive(Clone, Debug)]
struct DegreesLabel;

struct Label(String);

impl From<f32> for Label {
    fn from(v: f32) -> Self {
        Label(format!("{v}"))
    }
}

impl AnimatableProperty for DegreesLabel {
    type Value = f32;
    type Output = Label;
    type Animation = Vec<String>;

    fn decode_value(&self, reader: &mut JsonReader, scale: f32) -> Result<f32, StreamError> {
        Ok(reader.next_scalar()? * scale)
    }

    fn create_animation(&self, source: &AnimatableValue<Self>) -> Vec<String> {
        source
            .keyframes()
            .iter()
            .map(|kf| self.convert(&kf.start_value).0)
            .collect()
    }

    fn convert(&self, value: &f32) -> Label {
        Label(format!("{value}°"))
    }
}

#[test]
fn custom_conversion_overrides_the_default() {
    let value = AnimatableValue::from_value(
        json!({ "k": [{ "t": 0, "s": 90 }, { "t": 5, "s": 180 }] }),
        DegreesLabel,
        comp(1.0),
        false,
    )
    .unwrap();
    assert_eq!(value.initial_value().map(|l| l.0), Some("90°".to_string()));
    assert_eq!(value.create_animation(), vec!["90°".to_string(), "180°".to_string()]);
}

#[test]
fn static_arrays_decode_for_every_property() {
    let float =
        AnimatableFloatValue::from_value(json!({ "k": [12.5] }), FloatProperty, comp(2.0), true).unwrap();
    assert!(!float.has_animation());
    assert_eq!(float.initial_value(), Some(25.0));

    let integer =
        AnimatableIntegerValue::from_value(json!({ "k": [80] }), IntegerProperty, comp(1.0), false)
            .unwrap();
    assert!(!integer.has_animation());
    assert_eq!(integer.initial_value(), Some(80));

    let point =
        AnimatablePointValue::from_value(json!({ "k": [10, 20, 0] }), PointProperty, comp(2.0), true)
            .unwrap();
    assert!(!point.has_animation());
    assert_eq!(point.initial_value(), Some(Point::new(20.0, 40.0)));

    let scale =
        AnimatableScaleValue::from_value(json!({ "k": [150, 50] }), ScaleProperty, comp(1.0), false)
            .unwrap();
    assert!(!scale.has_animation());
    assert_eq!(scale.initial_value(), Some(ScaleXY { x: 1.5, y: 0.5 }));

    let color = AnimatableColorValue::from_value(
        json!({ "k": [0.2, 0.4, 0.6, 1] }),
        ColorProperty,
        comp(1.0),
        false,
    )
    .unwrap();
    assert!(!color.has_animation());
    let c = color.initial_value().unwrap();
    assert_abs_diff_eq!(c.g, 0.4, epsilon = 1e-6);
    assert_abs_diff_eq!(c.a, 1.0, epsilon = 1e-6);
}

#[test]
fn byte_encoded_rgb_keeps_an_opaque_alpha() {
    let value =
        AnimatableColorValue::from_value(json!({ "k": [255, 0, 0] }), ColorProperty, comp(1.0), false)
            .unwrap();
    assert_eq!(value.raw_initial_value(), Some(&[1.0, 0.0, 0.0, 1.0]));
    assert_eq!(value.initial_value(), Some(Color::rgba(1.0, 0.0, 0.0, 1.0)));

    let mut reader = JsonReader::new(json!([0, 128, 255]));
    let rgba = ColorProperty.decode_value(&mut reader, 1.0).unwrap();
    assert_abs_diff_eq!(rgba[1], 128.0 / 255.0, epsilon = 1e-6);
    assert_eq!(rgba[3], 1.0);
}

#[test]
fn out_of_range_numbers_are_rejected() {
    let err = AnimatableFloatValue::from_value(json!({ "k": 1e39 }), FloatProperty, comp(1.0), false)
        .unwrap_err();
    assert!(matches!(
        err,
        AnimatableError::Stream(StreamError::InvalidNumber { .. })
    ));
}
