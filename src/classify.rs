//! Threshold rules mapping measurements to category labels.
//!
//! Every function here is total: any input, including NaN, maps to exactly
//! one label. Non-finite measurements map to the `Unknown` label.

use serde::Serialize;

use crate::color::Rgb;
use crate::config::{AgeThresholds, Band, EyeColorThresholds, FaceShapeThresholds, HairColorThresholds, Level};
use crate::metrics::FaceMetrics;

macro_rules! display_as_str {
    ($($t:ty),+) => {
        $(impl std::fmt::Display for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        })+
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForeheadHeight {
    High,
    Balanced,
    Low,
    Unknown,
}

impl ForeheadHeight {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForeheadHeight::High => "high",
            ForeheadHeight::Balanced => "balanced",
            ForeheadHeight::Low => "low",
            ForeheadHeight::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JawWidth {
    Wide,
    Medium,
    Narrow,
    Unknown,
}

impl JawWidth {
    pub fn as_str(&self) -> &'static str {
        match self {
            JawWidth::Wide => "wide",
            JawWidth::Medium => "medium",
            JawWidth::Narrow => "narrow",
            JawWidth::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Symmetry {
    VerySymmetric,
    Balanced,
    SlightlyAsymmetric,
    Unknown,
}

impl Symmetry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Symmetry::VerySymmetric => "very symmetric",
            Symmetry::Balanced => "balanced",
            Symmetry::SlightlyAsymmetric => "slightly asymmetric",
            Symmetry::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceShape {
    Diamond,
    Heart,
    Square,
    Round,
    Oval,
    Unknown,
}

impl FaceShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaceShape::Diamond => "diamond",
            FaceShape::Heart => "heart",
            FaceShape::Square => "square",
            FaceShape::Round => "round",
            FaceShape::Oval => "oval",
            FaceShape::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EyeColor {
    Blue,
    Green,
    HazelBrown,
    Gray,
    Unknown,
}

impl EyeColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            EyeColor::Blue => "blue",
            EyeColor::Green => "green",
            EyeColor::HazelBrown => "hazel/brown",
            EyeColor::Gray => "gray",
            EyeColor::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HairColor {
    Black,
    DarkBrown,
    Brown,
    Blond,
    Red,
    GrayWhite,
    Unknown,
}

impl HairColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            HairColor::Black => "black",
            HairColor::DarkBrown => "dark brown",
            HairColor::Brown => "brown",
            HairColor::Blond => "blond",
            HairColor::Red => "red",
            HairColor::GrayWhite => "gray/white",
            HairColor::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBracket {
    Under25,
    From25To39,
    From40To54,
    From55,
    Unknown,
}

impl AgeBracket {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBracket::Under25 => "under 25",
            AgeBracket::From25To39 => "25-39",
            AgeBracket::From40To54 => "40-54",
            AgeBracket::From55 => "55+",
            AgeBracket::Unknown => "unknown",
        }
    }
}

display_as_str!(ForeheadHeight, JawWidth, Symmetry, FaceShape, EyeColor, HairColor, AgeBracket);

pub fn classify_forehead(ratio: f32, band: &Band) -> ForeheadHeight {
    if !ratio.is_finite() {
        return ForeheadHeight::Unknown;
    }
    match band.level(ratio) {
        Level::High => ForeheadHeight::High,
        Level::Low => ForeheadHeight::Low,
        Level::Mid => ForeheadHeight::Balanced,
    }
}

pub fn classify_jaw(ratio: f32, band: &Band) -> JawWidth {
    if !ratio.is_finite() {
        return JawWidth::Unknown;
    }
    match band.level(ratio) {
        Level::High => JawWidth::Wide,
        Level::Low => JawWidth::Narrow,
        Level::Mid => JawWidth::Medium,
    }
}

pub fn classify_symmetry(score: f32, band: &Band) -> Symmetry {
    if !score.is_finite() {
        return Symmetry::Unknown;
    }
    match band.level(score) {
        Level::High => Symmetry::VerySymmetric,
        Level::Low => Symmetry::SlightlyAsymmetric,
        Level::Mid => Symmetry::Balanced,
    }
}

/// Ordered rules: diamond, heart, square, round, then oval as the fallback.
pub fn classify_face_shape(m: &FaceMetrics, t: &FaceShapeThresholds) -> FaceShape {
    let cheek_forehead = m.cheek_to_forehead();
    let cheek_jaw = m.cheek_to_jaw();
    let forehead_jaw = m.forehead_to_jaw();
    let jaw_cheek = m.jaw_to_cheek();
    let length = m.length_ratio;

    if ![cheek_forehead, cheek_jaw, forehead_jaw, jaw_cheek, length]
        .iter()
        .all(|v| v.is_finite())
    {
        return FaceShape::Unknown;
    }

    if cheek_forehead >= t.diamond_cheek_to_forehead && cheek_jaw >= t.diamond_cheek_to_jaw {
        FaceShape::Diamond
    } else if forehead_jaw >= t.heart_forehead_to_jaw {
        FaceShape::Heart
    } else if jaw_cheek >= t.square_jaw_to_cheek && length < t.square_max_length {
        FaceShape::Square
    } else if length < t.round_max_length {
        FaceShape::Round
    } else {
        FaceShape::Oval
    }
}

/// Classify an averaged eye-region color by channel shares.
pub fn classify_eye_color(rgb: &Rgb, t: &EyeColorThresholds) -> EyeColor {
    let (r, g, b) = rgb.normalized();

    if b > t.blue_min_b && g > t.blue_min_g {
        EyeColor::Blue
    } else if g > t.green_min_g && b < t.green_max_b {
        EyeColor::Green
    } else if r > t.hazel_min_r && g > t.hazel_min_g && b < t.hazel_max_b {
        EyeColor::HazelBrown
    } else {
        EyeColor::Gray
    }
}

/// Classify an averaged hair-band color by hue and brightness.
pub fn classify_hair_color(rgb: &Rgb, t: &HairColorThresholds) -> HairColor {
    let hsv = rgb.to_hsv();

    if hsv.v < t.black_max_value {
        HairColor::Black
    } else if hsv.s < t.gray_max_saturation && hsv.v > t.gray_min_value {
        HairColor::GrayWhite
    } else if (hsv.h < t.red_max_hue || hsv.h >= t.red_min_hue)
        && hsv.s > t.red_min_saturation
        && hsv.v > t.red_min_value
    {
        HairColor::Red
    } else if (t.blond_min_hue..=t.blond_max_hue).contains(&hsv.h) && hsv.v > t.blond_min_value {
        HairColor::Blond
    } else if hsv.v < t.dark_brown_max_value {
        HairColor::DarkBrown
    } else {
        HairColor::Brown
    }
}

pub fn classify_age(age: Option<f32>, t: &AgeThresholds) -> AgeBracket {
    match age {
        Some(a) if a.is_finite() && a >= 0.0 => {
            if a < t.young_below {
                AgeBracket::Under25
            } else if a < t.adult_below {
                AgeBracket::From25To39
            } else if a < t.mature_below {
                AgeBracket::From40To54
            } else {
                AgeBracket::From55
            }
        }
        _ => AgeBracket::Unknown,
    }
}
