//! Runtime interpolation object: answers "what is the value at frame F".

use crate::animatable::{AnimatableProperty, AnimatableValue};
use crate::interp::Interpolate;
use crate::keyframe::Keyframe;

/// Timeline converted to the public representation, ready to be sampled.
///
/// Before the first keyframe the first start value is held; from the last
/// keyframe on, the last start value is held. A static value samples to the
/// same constant everywhere.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeAnimation<T> {
    keyframes: Vec<Keyframe<T>>,
    initial_value: Option<T>,
    frame_rate: f32,
}

impl<T: Interpolate + Clone> KeyframeAnimation<T> {
    pub fn new(keyframes: Vec<Keyframe<T>>, frame_rate: f32) -> Self {
        let initial_value = keyframes.first().map(|kf| kf.start_value.clone());
        Self {
            keyframes,
            initial_value,
            frame_rate,
        }
    }

    pub fn constant(value: T) -> Self {
        Self {
            keyframes: Vec::new(),
            initial_value: Some(value),
            frame_rate: 1.0,
        }
    }

    /// Convert a parsed value's timeline through its property's conversion.
    pub fn from_source<P>(source: &AnimatableValue<P>) -> Self
    where
        P: AnimatableProperty<Output = T>,
    {
        let property = source.property();
        Self {
            keyframes: source
                .keyframes()
                .iter()
                .map(|kf| kf.map(|v| property.convert(v)))
                .collect(),
            initial_value: source.initial_value(),
            frame_rate: source.composition().frame_rate,
        }
    }

    pub fn is_static(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    pub fn start_frame(&self) -> Option<f32> {
        self.keyframes.first().map(|kf| kf.frame)
    }

    pub fn end_frame(&self) -> Option<f32> {
        self.keyframes.last().map(|kf| kf.frame)
    }

    /// Value at an absolute frame. `None` only when there is nothing to sample.
    pub fn value_at_frame(&self, frame: f32) -> Option<T> {
        let (first, last) = match (self.keyframes.first(), self.keyframes.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return self.initial_value.clone(),
        };
        if frame <= first.frame {
            return Some(first.start_value.clone());
        }
        if frame >= last.frame {
            return Some(last.start_value.clone());
        }

        let Some(kf) = self.keyframes.iter().find(|kf| kf.contains_frame(frame)) else {
            return Some(last.start_value.clone());
        };
        let Some(end_value) = kf.end_value.as_ref() else {
            return Some(kf.start_value.clone());
        };
        let span = kf.duration_frames().unwrap_or(0.0);
        let local = if span > 0.0 {
            (frame - kf.frame) / span
        } else {
            1.0
        };
        let eased = kf.interpolator.ease(local);
        Some(kf.start_value.interpolate(end_value, eased))
    }

    /// Value at `progress` in [0,1] across the keyframe span (clamped).
    pub fn value_at_progress(&self, progress: f32) -> Option<T> {
        match (self.start_frame(), self.end_frame()) {
            (Some(start), Some(end)) => {
                let progress = progress.clamp(0.0, 1.0);
                self.value_at_frame(start + (end - start) * progress)
            }
            _ => self.initial_value.clone(),
        }
    }

    /// Value at an absolute time in milliseconds, using the composition frame rate.
    pub fn value_at_time_ms(&self, ms: f64) -> Option<T> {
        let frame = (ms / 1000.0 * f64::from(self.frame_rate)) as f32;
        self.value_at_frame(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::Interpolator;

    fn linked(frames: &[(f32, f32)], interpolator: Interpolator) -> Vec<Keyframe<f32>> {
        let mut out: Vec<Keyframe<f32>> = frames
            .iter()
            .map(|&(frame, value)| Keyframe::new(frame, value, None, interpolator))
            .collect();
        for i in 1..out.len() {
            let (frame, value) = (out[i].frame, out[i].start_value);
            out[i - 1].end_frame = Some(frame);
            out[i - 1].end_value = Some(value);
        }
        out
    }

    #[test]
    fn samples_linear_segments() {
        let anim = KeyframeAnimation::new(linked(&[(0.0, 0.0), (10.0, 100.0)], Interpolator::Linear), 30.0);
        assert_eq!(anim.value_at_frame(5.0), Some(50.0));
        assert_eq!(anim.value_at_frame(-1.0), Some(0.0));
        assert_eq!(anim.value_at_frame(12.0), Some(100.0));
        assert_eq!(anim.value_at_progress(0.25), Some(25.0));
    }

    #[test]
    fn hold_segments_keep_their_start() {
        let anim = KeyframeAnimation::new(linked(&[(0.0, 1.0), (10.0, 2.0)], Interpolator::Hold), 30.0);
        assert_eq!(anim.value_at_frame(9.9), Some(1.0));
        assert_eq!(anim.value_at_frame(10.0), Some(2.0));
    }

    #[test]
    fn time_maps_through_frame_rate() {
        let anim = KeyframeAnimation::new(linked(&[(0.0, 0.0), (30.0, 30.0)], Interpolator::Linear), 30.0);
        assert_eq!(anim.value_at_time_ms(500.0), Some(15.0));
    }

    #[test]
    fn constant_is_static_everywhere() {
        let anim = KeyframeAnimation::constant(7.0f32);
        assert!(anim.is_static());
        assert_eq!(anim.value_at_frame(100.0), Some(7.0));
        assert_eq!(anim.value_at_progress(0.5), Some(7.0));
        assert_eq!(anim.start_frame(), None);
    }
}
