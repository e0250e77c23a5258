use serde::{Deserialize, Serialize};

/// Per-shape interpolation used by the resampler.
///
/// Each sample shape decides how it blends towards the next sample, so the resampler never has
/// to inspect field names at runtime.
pub trait Interpolate: Clone {
    /// Blend `self` towards `next` by `t` in `[0, 1)`.
    fn interpolate(&self, next: &Self, t: f64) -> Self;

    /// True when `interpolate` would return `self` unchanged because the pair cannot be blended.
    fn passes_through(&self, _next: &Self) -> bool {
        false
    }
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// A 2D force or displacement vector measured at a hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldVector {
    pub x: f64,
    pub y: f64,
}

impl HoldVector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Interpolate for HoldVector {
    fn interpolate(&self, next: &Self, t: f64) -> Self {
        Self {
            x: lerp(self.x, next.x, t),
            y: lerp(self.y, next.y, t),
        }
    }
}

/// A scalar label shown next to a hold (load share, stability score, hold number).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldAnnotation {
    pub annotation: f64,
}

impl HoldAnnotation {
    pub fn new(annotation: f64) -> Self {
        Self { annotation }
    }
}

impl Interpolate for HoldAnnotation {
    fn interpolate(&self, next: &Self, t: f64) -> Self {
        Self {
            annotation: lerp(self.annotation, next.annotation, t),
        }
    }
}

/// A sample whose shape is only known once the payload is decoded.
///
/// Decoding tries a vector first (numeric `x` and `y`), then an annotation (numeric
/// `annotation`), and keeps anything else as raw JSON. Pairs that do not share a known shape
/// are not blended: the earlier sample is repeated instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sample {
    Vector(HoldVector),
    Annotation(HoldAnnotation),
    Opaque(serde_json::Value),
}

impl Sample {
    /// Short name of the decoded shape, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Sample::Vector(_) => "vector",
            Sample::Annotation(_) => "annotation",
            Sample::Opaque(_) => "opaque",
        }
    }

    pub fn as_vector(&self) -> Option<&HoldVector> {
        match self {
            Sample::Vector(vector) => Some(vector),
            _ => None,
        }
    }

    pub fn as_annotation(&self) -> Option<&HoldAnnotation> {
        match self {
            Sample::Annotation(annotation) => Some(annotation),
            _ => None,
        }
    }
}

impl From<HoldVector> for Sample {
    fn from(vector: HoldVector) -> Self {
        Sample::Vector(vector)
    }
}

impl From<HoldAnnotation> for Sample {
    fn from(annotation: HoldAnnotation) -> Self {
        Sample::Annotation(annotation)
    }
}

impl Interpolate for Sample {
    fn interpolate(&self, next: &Self, t: f64) -> Self {
        match (self, next) {
            (Sample::Vector(a), Sample::Vector(b)) => Sample::Vector(a.interpolate(b, t)),
            (Sample::Annotation(a), Sample::Annotation(b)) => {
                Sample::Annotation(a.interpolate(b, t))
            }
            _ => self.clone(),
        }
    }

    fn passes_through(&self, next: &Self) -> bool {
        !matches!(
            (self, next),
            (Sample::Vector(_), Sample::Vector(_)) | (Sample::Annotation(_), Sample::Annotation(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vector_midpoint_is_exact() {
        let a = HoldVector::new(0.0, 0.0);
        let b = HoldVector::new(10.0, 20.0);
        assert_eq!(a.interpolate(&b, 0.5), HoldVector::new(5.0, 10.0));
    }

    #[test]
    fn annotation_interpolates_linearly() {
        let a = HoldAnnotation::new(1.0);
        let b = HoldAnnotation::new(3.0);
        assert_eq!(a.interpolate(&b, 0.25), HoldAnnotation::new(1.5));
    }

    #[test]
    fn sample_decodes_by_shape() {
        let vector: Sample = serde_json::from_value(json!({"x": 1, "y": 2.5})).unwrap();
        let annotation: Sample = serde_json::from_value(json!({"annotation": 4})).unwrap();
        let opaque: Sample = serde_json::from_value(json!({"torque": 9})).unwrap();
        assert_eq!(vector, Sample::Vector(HoldVector::new(1.0, 2.5)));
        assert_eq!(annotation, Sample::Annotation(HoldAnnotation::new(4.0)));
        assert_eq!(opaque.kind(), "opaque");
    }

    #[test]
    fn vector_shape_wins_over_annotation() {
        let sample: Sample =
            serde_json::from_value(json!({"x": 1, "y": 2, "annotation": 3})).unwrap();
        assert_eq!(sample.kind(), "vector");
    }

    #[test]
    fn non_numeric_fields_decode_as_opaque() {
        let sample: Sample = serde_json::from_value(json!({"x": "left", "y": 2})).unwrap();
        assert_eq!(sample.kind(), "opaque");
    }

    #[test]
    fn mismatched_shapes_repeat_first_sample() {
        let a = Sample::Vector(HoldVector::new(1.0, 1.0));
        let b = Sample::Annotation(HoldAnnotation::new(5.0));
        assert!(a.passes_through(&b));
        assert_eq!(a.interpolate(&b, 0.5), a);

        let opaque = Sample::Opaque(json!({"torque": 1}));
        assert!(opaque.passes_through(&opaque.clone()));
        assert_eq!(opaque.interpolate(&opaque.clone(), 0.5), opaque);
    }
}
