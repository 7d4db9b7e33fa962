use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of landmarks in the iBUG annotation scheme.
pub const NUM_LANDMARKS: usize = 68;

/// Landmark indices used by the feature extractor (iBUG 68-point order).
pub mod landmark {
    use std::ops::RangeInclusive;

    pub const CHIN: usize = 8;
    pub const BROWS: RangeInclusive<usize> = 17..=26;
    pub const RIGHT_EYE: RangeInclusive<usize> = 36..=41;
    pub const LEFT_EYE: RangeInclusive<usize> = 42..=47;

    pub const CHEEK_LEFT: usize = 1;
    pub const CHEEK_RIGHT: usize = 15;
    pub const JAW_LEFT: usize = 4;
    pub const JAW_RIGHT: usize = 12;
    pub const BROW_OUTER_LEFT: usize = 17;
    pub const BROW_OUTER_RIGHT: usize = 26;

    /// Mirror pairs (left, right) compared for symmetry:
    /// outer eye corners, inner eye corners, nostrils, mouth corners, jaw.
    pub const SYMMETRY_PAIRS: [(usize, usize); 5] = [(36, 45), (39, 42), (31, 35), (48, 54), (3, 13)];
}

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A bounding box defined by top-left corner, width, and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// True if the box has a positive, finite extent.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// A facial shape represented as a collection of landmark points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shape {
    pub points: Vec<Point>,
}

impl Shape {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn num_landmarks(&self) -> usize {
        self.points.len()
    }

    /// Create a zeroed shape with n landmarks.
    pub fn zeros(n: usize) -> Self {
        Self {
            points: vec![Point::zero(); n],
        }
    }

    /// Landmarks in an index range, e.g. [`landmark::BROWS`].
    pub fn region(&self, range: std::ops::RangeInclusive<usize>) -> &[Point] {
        &self.points[range]
    }

    /// Mean Y coordinate of a set of landmarks.
    pub fn mean_y(points: &[Point]) -> f32 {
        if points.is_empty() {
            return f32::NAN;
        }
        points.iter().map(|p| p.y).sum::<f32>() / points.len() as f32
    }
}

impl std::ops::Index<usize> for Shape {
    type Output = Point;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.points[idx]
    }
}

impl std::ops::IndexMut<usize> for Shape {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.points[idx]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Female => write!(f, "female"),
            Gender::Male => write!(f, "male"),
        }
    }
}

/// One face as reported by the external detector for a single frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
    pub landmarks: Shape,
    #[serde(default = "default_score")]
    pub score: f32,
    #[serde(default)]
    pub age: Option<f32>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

fn default_score() -> f32 {
    1.0
}

impl Detection {
    pub fn new(bbox: BoundingBox, landmarks: Shape) -> Self {
        Self {
            bbox,
            landmarks,
            score: 1.0,
            age: None,
            gender: None,
        }
    }

    pub fn with_age(mut self, age: f32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Check that the box is usable and the landmark set is complete.
    pub fn validate(&self) -> Result<()> {
        if !self.bbox.is_valid() {
            return Err(Error::InvalidDetection(format!(
                "degenerate box {}x{} at ({}, {})",
                self.bbox.width, self.bbox.height, self.bbox.x, self.bbox.y
            )));
        }
        if self.landmarks.num_landmarks() != NUM_LANDMARKS {
            return Err(Error::InvalidDetection(format!(
                "expected {} landmarks, got {}",
                NUM_LANDMARKS,
                self.landmarks.num_landmarks()
            )));
        }
        if let Some(i) = self.landmarks.points.iter().position(|p| !p.is_finite()) {
            return Err(Error::InvalidDetection(format!("landmark {i} is not finite")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_distance() {
        assert!((Point::new(0.0, 0.0).distance(&Point::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
        assert!(!Point::new(f32::NAN, 1.0).is_finite());
    }

    #[test]
    fn bounding_box_edges() {
        let bbox = BoundingBox::new(100.0, 50.0, 200.0, 100.0);
        assert_eq!(bbox.right(), 300.0);
        assert_eq!(bbox.center_x(), 200.0);

        assert!(bbox.is_valid());
        assert!(!BoundingBox::new(0.0, 0.0, 0.0, 10.0).is_valid());
        assert!(!BoundingBox::new(f32::NAN, 0.0, 10.0, 10.0).is_valid());
    }

    #[test]
    fn mean_y_of_region() {
        let shape = Shape::new(vec![Point::new(0.0, 2.0), Point::new(0.0, 4.0), Point::new(0.0, 9.0)]);
        assert!((Shape::mean_y(shape.region(0..=1)) - 3.0).abs() < 1e-6);
        assert!(Shape::mean_y(&[]).is_nan());
    }

    #[test]
    fn detection_validation() {
        let bbox = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        assert!(Detection::new(bbox, Shape::zeros(68)).validate().is_ok());

        let short = Detection::new(bbox, Shape::zeros(5));
        assert!(matches!(short.validate(), Err(Error::InvalidDetection(_))));

        let flat = Detection::new(BoundingBox::new(0.0, 0.0, 0.0, 100.0), Shape::zeros(68));
        assert!(flat.validate().is_err());

        let mut shape = Shape::zeros(68);
        shape[10] = Point::new(f32::INFINITY, 0.0);
        assert!(Detection::new(bbox, shape).validate().is_err());
    }

    #[test]
    fn detection_json_defaults() {
        let json = serde_json::json!({
            "box": { "x": 1.0, "y": 2.0, "width": 3.0, "height": 4.0 },
            "landmarks": vec![serde_json::json!({ "x": 1.0, "y": 1.0 }); 68],
            "gender": "female"
        });
        let det: Detection = serde_json::from_value(json).unwrap();
        assert_eq!(det.score, 1.0);
        assert_eq!(det.age, None);
        assert_eq!(det.gender, Some(Gender::Female));
        assert_eq!(det.landmarks.num_landmarks(), 68);
    }
}
