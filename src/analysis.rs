//! Per-frame feature record.

use serde::Serialize;
use tracing::debug;

use crate::classify::{
    classify_age, classify_eye_color, classify_face_shape, classify_forehead, classify_hair_color,
    classify_jaw, classify_symmetry, AgeBracket, EyeColor, FaceShape, ForeheadHeight, HairColor,
    JawWidth, Symmetry,
};
use crate::color::Rgb;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::features::{average_color, PixelAccess, Region};
use crate::metrics::FaceMetrics;
use crate::suggest::Suggestion;
use crate::templates;
use crate::types::{landmark, Detection};

/// One classified feature: its label, a human-readable detail, and the
/// measurement behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature<L, M> {
    pub label: L,
    pub detail: String,
    pub metric: M,
}

impl<L, M> Feature<L, M> {
    pub fn new(label: L, metric: M) -> Self {
        Self {
            label,
            detail: String::new(),
            metric,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }
}

/// Everything derived from one frame. Built fresh for every analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    /// Mean color of the padded eye region
    pub eye_color: Feature<EyeColor, Option<Rgb>>,
    /// Mean color of the band above the face box
    pub hair_color: Feature<HairColor, Option<Rgb>>,
    pub forehead: Feature<ForeheadHeight, f32>,
    pub jaw: Feature<JawWidth, f32>,
    pub symmetry: Feature<Symmetry, f32>,
    /// Metric is the length ratio
    pub face_shape: Feature<FaceShape, f32>,
    /// Metric is the estimated age in years
    pub age_profile: Feature<AgeBracket, Option<f32>>,
}

/// A row of the feature summary: heading, value, detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub heading: &'static str,
    pub value: String,
    pub detail: String,
}

impl FeatureRecord {
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let color_value = |label: &dyn std::fmt::Display, rgb: &Option<Rgb>| match rgb {
            Some(rgb) => format!("{label} ({rgb})"),
            None => label.to_string(),
        };
        let row = |heading, value, detail: &String| SummaryRow {
            heading,
            value,
            detail: detail.clone(),
        };

        vec![
            row("Face shape", format!("{} (length ratio {:.2})", self.face_shape.label, self.face_shape.metric), &self.face_shape.detail),
            row("Eye color", color_value(&self.eye_color.label, &self.eye_color.metric), &self.eye_color.detail),
            row("Hair color", color_value(&self.hair_color.label, &self.hair_color.metric), &self.hair_color.detail),
            row("Forehead", format!("{} (ratio {:.2})", self.forehead.label, self.forehead.metric), &self.forehead.detail),
            row("Jaw", format!("{} (ratio {:.2})", self.jaw.label, self.jaw.metric), &self.jaw.detail),
            row("Symmetry", format!("{} (score {:.2})", self.symmetry.label, self.symmetry.metric), &self.symmetry.detail),
            row("Age", self.age_profile.label.to_string(), &self.age_profile.detail),
        ]
    }
}

/// Feature record plus the suggestion composed from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub features: FeatureRecord,
    pub suggestion: Suggestion,
}

/// Turns a detection and its frame into a [`FeatureRecord`].
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: Config,
}

impl Analyzer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze one detected face.
    ///
    /// Fails with [`Error::InvalidDetection`] if the box is degenerate or the
    /// landmark set is incomplete. Sampling problems (a region outside the
    /// frame) only turn the affected color feature into `Unknown`.
    pub fn analyze<I: PixelAccess>(&self, detection: &Detection, frame: &I) -> Result<FeatureRecord> {
        detection.validate()?;

        let bbox = &detection.bbox;
        let shape = &detection.landmarks;
        let t = &self.config.thresholds;
        let sampling = &self.config.sampling;

        let metrics = FaceMetrics::from_shape(bbox, shape)
            .ok_or_else(|| Error::InvalidDetection("incomplete landmark set".into()))?;
        debug!(?metrics, "face metrics");

        let (w, h) = (frame.width(), frame.height());

        let eye_region = Region::around_points(shape.region(landmark::RIGHT_EYE), w, h).union_padded(
            &Region::around_points(shape.region(landmark::LEFT_EYE), w, h),
            sampling.eye_padding,
            w,
            h,
        );
        let eye_rgb = average_color(frame, &eye_region);
        let eye_label = eye_rgb.map_or(EyeColor::Unknown, |rgb| classify_eye_color(&rgb, &t.eye_color));

        let hair_region = Region::band_above(bbox, sampling.hair_band_height, sampling.hair_band_inset, w, h);
        let hair_rgb = average_color(frame, &hair_region);
        let hair_label = hair_rgb.map_or(HairColor::Unknown, |rgb| classify_hair_color(&rgb, &t.hair_color));

        let forehead = classify_forehead(metrics.forehead_ratio, &t.forehead);
        let jaw = classify_jaw(metrics.jaw_ratio, &t.jaw);
        let symmetry = classify_symmetry(metrics.symmetry_score, &t.symmetry);
        let face_shape = classify_face_shape(&metrics, &t.face_shape);
        let age = classify_age(detection.age, &t.age);

        let record = FeatureRecord {
            eye_color: Feature::new(eye_label, eye_rgb).with_detail(templates::eye_detail(eye_label)),
            hair_color: Feature::new(hair_label, hair_rgb).with_detail(templates::hair_detail(hair_label)),
            forehead: Feature::new(forehead, metrics.forehead_ratio)
                .with_detail(templates::forehead_detail(forehead)),
            jaw: Feature::new(jaw, metrics.jaw_ratio).with_detail(templates::jaw_detail(jaw)),
            symmetry: Feature::new(symmetry, metrics.symmetry_score)
                .with_detail(templates::symmetry_detail(symmetry)),
            face_shape: Feature::new(face_shape, metrics.length_ratio)
                .with_detail(templates::shape_styles(face_shape).description),
            age_profile: Feature::new(age, detection.age.filter(|a| a.is_finite() && *a >= 0.0))
                .with_detail(age_detail(detection, age)),
        };
        debug!(
            eye = %record.eye_color.label,
            hair = %record.hair_color.label,
            forehead = %record.forehead.label,
            jaw = %record.jaw.label,
            symmetry = %record.symmetry.label,
            shape = %record.face_shape.label,
            age = %record.age_profile.label,
            "classified features"
        );
        Ok(record)
    }
}

fn age_detail(detection: &Detection, bracket: AgeBracket) -> String {
    let text = templates::age_detail(bracket);
    match (bracket, detection.age, detection.gender) {
        (AgeBracket::Unknown, _, _) => text.to_string(),
        (_, Some(age), Some(gender)) => format!("Estimated {age:.0} years, {gender}. {text}"),
        (_, Some(age), None) => format!("Estimated {age:.0} years. {text}"),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Frame;
    use crate::types::{BoundingBox, Gender, Point, Shape, NUM_LANDMARKS};

    /// Face box at (100, 100) 200x200 with all landmarks parked at the center.
    fn detection() -> Detection {
        let bbox = BoundingBox::new(100.0, 100.0, 200.0, 200.0);
        let shape = Shape::new(vec![Point::new(200.0, 200.0); NUM_LANDMARKS]);
        Detection::new(bbox, shape)
    }

    #[test]
    fn rejects_incomplete_landmarks() {
        let mut det = detection();
        det.landmarks = Shape::zeros(10);
        let frame = Frame::solid(400, 400, [0, 0, 0]);
        assert!(matches!(Analyzer::default().analyze(&det, &frame), Err(Error::InvalidDetection(_))));
    }

    #[test]
    fn colors_come_from_their_regions() {
        // Blue-ish eyes around y = 200, blond band above the box
        let frame = Frame::from_fn(400, 400, |_, y| if y < 100 { [220, 190, 120] } else { [60, 90, 110] });
        let record = Analyzer::default().analyze(&detection(), &frame).unwrap();
        assert_eq!(record.eye_color.label, EyeColor::Blue);
        assert_eq!(record.hair_color.label, HairColor::Blond);
        assert!(record.eye_color.metric.is_some());
    }

    #[test]
    fn hair_unknown_when_face_at_frame_top() {
        let mut det = detection();
        det.bbox.y = 0.0;
        let frame = Frame::solid(400, 400, [100, 100, 100]);
        let record = Analyzer::default().analyze(&det, &frame).unwrap();
        assert_eq!(record.hair_color.label, HairColor::Unknown);
        assert_eq!(record.hair_color.metric, None);
    }

    #[test]
    fn age_profile_detail() {
        let det = detection().with_age(31.4).with_gender(Gender::Female);
        let frame = Frame::solid(400, 400, [100, 100, 100]);
        let record = Analyzer::default().analyze(&det, &frame).unwrap();
        assert_eq!(record.age_profile.label, AgeBracket::From25To39);
        assert!(record.age_profile.detail.starts_with("Estimated 31 years, female."));

        let det = detection().with_age(f32::NAN);
        let record = Analyzer::default().analyze(&det, &frame).unwrap();
        assert_eq!(record.age_profile.label, AgeBracket::Unknown);
        assert_eq!(record.age_profile.metric, None);

        let det = detection().with_age(-3.0);
        let record = Analyzer::default().analyze(&det, &frame).unwrap();
        assert_eq!(record.age_profile.label, AgeBracket::Unknown);
        assert_eq!(record.age_profile.metric, None);
    }

    #[test]
    fn summary_has_a_row_per_feature() {
        let frame = Frame::solid(400, 400, [100, 100, 100]);
        let record = Analyzer::default().analyze(&detection(), &frame).unwrap();
        let rows = record.summary_rows();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[1].heading, "Eye color");
        assert!(rows[1].value.contains("RGB 100, 100, 100"));
    }
}
