//! Geometric facial measurements.
//!
//! Every measurement is taken from one frame's landmark set and face box.
//! Ratios are relative to the box, so they are independent of how far the
//! face is from the camera.

use serde::Serialize;

use crate::types::{landmark, BoundingBox, Shape, NUM_LANDMARKS};

/// Raw geometric measurements for one detected face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FaceMetrics {
    /// (brow line − box top) / box height
    pub forehead_ratio: f32,

    /// Jaw width (points 4-12) / box width
    pub jaw_ratio: f32,

    /// 1.0 = mirror symmetric about the box center, clamped to [0, 1]
    pub symmetry_score: f32,

    /// (chin − box top) / box width
    pub length_ratio: f32,

    /// Outer brow span (points 17-26), pixels
    pub forehead_width: f32,

    /// Cheekbone span (points 1-15), pixels
    pub cheekbone_width: f32,

    /// Jaw span (points 4-12), pixels
    pub jaw_width: f32,
}

impl FaceMetrics {
    /// Measure a face.
    ///
    /// Returns `None` if the shape doesn't have 68 points.
    pub fn from_shape(bbox: &BoundingBox, shape: &Shape) -> Option<Self> {
        if shape.num_landmarks() < NUM_LANDMARKS {
            return None;
        }

        let p = &shape.points;
        Some(Self {
            forehead_ratio: forehead_ratio(bbox, shape),
            jaw_ratio: jaw_ratio(bbox, shape),
            symmetry_score: symmetry_score(bbox, shape),
            length_ratio: ratio(p[landmark::CHIN].y - bbox.y, bbox.width),
            forehead_width: p[landmark::BROW_OUTER_LEFT].distance(&p[landmark::BROW_OUTER_RIGHT]),
            cheekbone_width: p[landmark::CHEEK_LEFT].distance(&p[landmark::CHEEK_RIGHT]),
            jaw_width: p[landmark::JAW_LEFT].distance(&p[landmark::JAW_RIGHT]),
        })
    }

    pub fn cheek_to_forehead(&self) -> f32 {
        ratio(self.cheekbone_width, self.forehead_width)
    }

    pub fn cheek_to_jaw(&self) -> f32 {
        ratio(self.cheekbone_width, self.jaw_width)
    }

    pub fn forehead_to_jaw(&self) -> f32 {
        ratio(self.forehead_width, self.jaw_width)
    }

    pub fn jaw_to_cheek(&self) -> f32 {
        ratio(self.jaw_width, self.cheekbone_width)
    }
}

/// Share of the box height above the brow line. NaN for a partial shape.
pub fn forehead_ratio(bbox: &BoundingBox, shape: &Shape) -> f32 {
    if shape.num_landmarks() < NUM_LANDMARKS {
        return f32::NAN;
    }
    let brow_line = Shape::mean_y(shape.region(landmark::BROWS));
    ratio(brow_line - bbox.y, bbox.height)
}

/// Jaw width relative to the box width. NaN for a partial shape.
pub fn jaw_ratio(bbox: &BoundingBox, shape: &Shape) -> f32 {
    if shape.num_landmarks() < NUM_LANDMARKS {
        return f32::NAN;
    }
    let width = shape[landmark::JAW_LEFT].distance(&shape[landmark::JAW_RIGHT]);
    ratio(width, bbox.width)
}

/// Symmetry of mirrored landmark pairs about the vertical box center.
///
/// Sums how much each pair's distances to the center differ, normalizes by
/// half the box width per pair, and subtracts from 1. Always in [0, 1] for
/// a full shape. A partial shape can't be measured and gives NaN.
pub fn symmetry_score(bbox: &BoundingBox, shape: &Shape) -> f32 {
    if shape.num_landmarks() < NUM_LANDMARKS {
        return f32::NAN;
    }
    let center_x = bbox.center_x();

    let difference: f32 = landmark::SYMMETRY_PAIRS
        .iter()
        .map(|&(l, r)| {
            let left_distance = center_x - shape[l].x;
            let right_distance = shape[r].x - center_x;
            (left_distance - right_distance).abs()
        })
        .sum();

    let normalized = difference / (landmark::SYMMETRY_PAIRS.len() as f32 * bbox.width * 0.5);
    let score = 1.0 - normalized;
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Plain ratio; NaN when the denominator is not positive, so the
/// classifier reports the value as unknown.
fn ratio(numerator: f32, denominator: f32) -> f32 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        f32::NAN
    }
}
