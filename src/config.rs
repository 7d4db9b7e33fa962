//! Runtime configuration.
//!
//! Every cut-off the classifier uses lives here so it can be tuned without a
//! rebuild. All sections default field by field, so a JSON file only needs to
//! name what it overrides:
//!
//! ```json
//! { "capture": { "poll_interval_ms": 500 },
//!   "thresholds": { "jaw": { "low": 0.6 } } }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub capture: CaptureConfig,
    pub sampling: SamplingConfig,
    pub thresholds: Thresholds,
}

impl Config {
    /// Load and validate a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.capture.poll_interval_ms == 0 {
            return Err(Error::Config("capture.poll_interval_ms must be positive".into()));
        }
        check_unit("capture.score_threshold", self.capture.score_threshold)?;
        check_unit("sampling.hair_band_height", self.sampling.hair_band_height)?;
        if !(0.0..0.5).contains(&self.sampling.hair_band_inset) {
            return Err(Error::Config("sampling.hair_band_inset must be in [0, 0.5)".into()));
        }
        self.thresholds.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Delay between detection attempts.
    pub poll_interval_ms: u64,
    /// Minimum detector score for a face to count.
    pub score_threshold: f32,
}

impl CaptureConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 700,
            score_threshold: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Pixels added around the combined eye box.
    pub eye_padding: u32,
    /// Hair band height as a fraction of the face box height.
    pub hair_band_height: f32,
    /// Horizontal inset of the hair band on each side, as a fraction of box width.
    pub hair_band_inset: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            eye_padding: 6,
            hair_band_height: 0.15,
            hair_band_inset: 0.2,
        }
    }
}

/// A low/high cut-off pair. Values strictly below `low` or strictly above
/// `high` fall outside the middle band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub low: f32,
    pub high: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    Mid,
    High,
}

impl Band {
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    pub fn level(&self, value: f32) -> Level {
        if value > self.high {
            Level::High
        } else if value < self.low {
            Level::Low
        } else {
            Level::Mid
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        check_unit(&format!("{name}.low"), self.low)?;
        check_unit(&format!("{name}.high"), self.high)?;
        if self.low > self.high {
            return Err(Error::Config(format!("{name}: low {} exceeds high {}", self.low, self.high)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ThresholdsFile")]
pub struct Thresholds {
    pub forehead: Band,
    pub jaw: Band,
    pub symmetry: Band,
    pub face_shape: FaceShapeThresholds,
    pub eye_color: EyeColorThresholds,
    pub hair_color: HairColorThresholds,
    pub age: AgeThresholds,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            forehead: Band::new(0.23, 0.30),
            jaw: Band::new(0.64, 0.78),
            symmetry: Band::new(0.78, 0.90),
            face_shape: FaceShapeThresholds::default(),
            eye_color: EyeColorThresholds::default(),
            hair_color: HairColorThresholds::default(),
            age: AgeThresholds::default(),
        }
    }
}

impl Thresholds {
    fn validate(&self) -> Result<()> {
        self.forehead.validate("thresholds.forehead")?;
        self.jaw.validate("thresholds.jaw")?;
        self.symmetry.validate("thresholds.symmetry")?;

        let f = &self.face_shape;
        for (name, value) in [
            ("diamond_cheek_to_forehead", f.diamond_cheek_to_forehead),
            ("diamond_cheek_to_jaw", f.diamond_cheek_to_jaw),
            ("heart_forehead_to_jaw", f.heart_forehead_to_jaw),
            ("square_jaw_to_cheek", f.square_jaw_to_cheek),
            ("square_max_length", f.square_max_length),
            ("round_max_length", f.round_max_length),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!("thresholds.face_shape.{name} must be positive, got {value}")));
            }
        }

        let e = &self.eye_color;
        for (name, value) in [
            ("blue_min_b", e.blue_min_b),
            ("blue_min_g", e.blue_min_g),
            ("green_min_g", e.green_min_g),
            ("green_max_b", e.green_max_b),
            ("hazel_min_r", e.hazel_min_r),
            ("hazel_min_g", e.hazel_min_g),
            ("hazel_max_b", e.hazel_max_b),
        ] {
            check_unit(&format!("thresholds.eye_color.{name}"), value)?;
        }

        let h = &self.hair_color;
        for (name, value) in [
            ("black_max_value", h.black_max_value),
            ("gray_max_saturation", h.gray_max_saturation),
            ("gray_min_value", h.gray_min_value),
            ("red_min_saturation", h.red_min_saturation),
            ("red_min_value", h.red_min_value),
            ("blond_min_value", h.blond_min_value),
            ("dark_brown_max_value", h.dark_brown_max_value),
        ] {
            check_unit(&format!("thresholds.hair_color.{name}"), value)?;
        }
        for (name, value) in [
            ("red_max_hue", h.red_max_hue),
            ("red_min_hue", h.red_min_hue),
            ("blond_min_hue", h.blond_min_hue),
            ("blond_max_hue", h.blond_max_hue),
        ] {
            if !(0.0..360.0).contains(&value) {
                return Err(Error::Config(format!(
                    "thresholds.hair_color.{name} must be in [0, 360), got {value}"
                )));
            }
        }
        if h.blond_min_hue > h.blond_max_hue {
            return Err(Error::Config("thresholds.hair_color blond hue range is inverted".into()));
        }

        let a = &self.age;
        if !(a.young_below >= 0.0 && a.young_below < a.adult_below && a.adult_below < a.mature_below) {
            return Err(Error::Config("thresholds.age bounds must be non-negative and strictly increasing".into()));
        }
        Ok(())
    }
}

/// On-disk form of [`Thresholds`]. Band overrides may name only one edge;
/// the other keeps its default.
#[derive(Deserialize, Default)]
#[serde(default)]
struct ThresholdsFile {
    forehead: BandOverride,
    jaw: BandOverride,
    symmetry: BandOverride,
    face_shape: FaceShapeThresholds,
    eye_color: EyeColorThresholds,
    hair_color: HairColorThresholds,
    age: AgeThresholds,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct BandOverride {
    low: Option<f32>,
    high: Option<f32>,
}

impl BandOverride {
    fn over(self, base: Band) -> Band {
        Band::new(self.low.unwrap_or(base.low), self.high.unwrap_or(base.high))
    }
}

impl From<ThresholdsFile> for Thresholds {
    fn from(file: ThresholdsFile) -> Self {
        let base = Thresholds::default();
        Self {
            forehead: file.forehead.over(base.forehead),
            jaw: file.jaw.over(base.jaw),
            symmetry: file.symmetry.over(base.symmetry),
            face_shape: file.face_shape,
            eye_color: file.eye_color,
            hair_color: file.hair_color,
            age: file.age,
        }
    }
}

/// Width/length ratios for the ordered face-shape rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceShapeThresholds {
    pub diamond_cheek_to_forehead: f32,
    pub diamond_cheek_to_jaw: f32,
    pub heart_forehead_to_jaw: f32,
    pub square_jaw_to_cheek: f32,
    pub square_max_length: f32,
    pub round_max_length: f32,
}

impl Default for FaceShapeThresholds {
    fn default() -> Self {
        Self {
            diamond_cheek_to_forehead: 1.40,
            diamond_cheek_to_jaw: 1.30,
            heart_forehead_to_jaw: 1.05,
            square_jaw_to_cheek: 0.90,
            square_max_length: 1.15,
            round_max_length: 0.95,
        }
    }
}

/// Cut-offs on channel shares (each channel divided by r+g+b).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EyeColorThresholds {
    pub blue_min_b: f32,
    pub blue_min_g: f32,
    pub green_min_g: f32,
    pub green_max_b: f32,
    pub hazel_min_r: f32,
    pub hazel_min_g: f32,
    pub hazel_max_b: f32,
}

impl Default for EyeColorThresholds {
    fn default() -> Self {
        Self {
            blue_min_b: 0.38,
            blue_min_g: 0.32,
            green_min_g: 0.37,
            green_max_b: 0.34,
            hazel_min_r: 0.38,
            hazel_min_g: 0.33,
            hazel_max_b: 0.29,
        }
    }
}

/// Cut-offs on HSV (hue in degrees, saturation/value in [0, 1]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HairColorThresholds {
    pub black_max_value: f32,
    pub gray_max_saturation: f32,
    pub gray_min_value: f32,
    pub red_max_hue: f32,
    pub red_min_hue: f32,
    pub red_min_saturation: f32,
    pub red_min_value: f32,
    pub blond_min_hue: f32,
    pub blond_max_hue: f32,
    pub blond_min_value: f32,
    pub dark_brown_max_value: f32,
}

impl Default for HairColorThresholds {
    fn default() -> Self {
        Self {
            black_max_value: 0.18,
            gray_max_saturation: 0.12,
            gray_min_value: 0.55,
            red_max_hue: 25.0,
            red_min_hue: 345.0,
            red_min_saturation: 0.45,
            red_min_value: 0.25,
            blond_min_hue: 25.0,
            blond_max_hue: 60.0,
            blond_min_value: 0.55,
            dark_brown_max_value: 0.35,
        }
    }
}

/// Upper bounds (exclusive) in years of the first three age brackets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeThresholds {
    pub young_below: f32,
    pub adult_below: f32,
    pub mature_below: f32,
}

impl Default for AgeThresholds {
    fn default() -> Self {
        Self {
            young_below: 25.0,
            adult_below: 40.0,
            mature_below: 55.0,
        }
    }
}

fn check_unit(name: &str, value: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::Config(format!("{name} must be in [0, 1], got {value}")));
    }
    Ok(())
}
