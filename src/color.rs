//! Color-space helpers for sampled regions.

use serde::Serialize;

/// Average color of a sampled region, channels in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Channels divided by their sum. An all-black sample counts as neutral.
    pub fn normalized(&self) -> (f32, f32, f32) {
        let total = self.r + self.g + self.b;
        if total <= 0.0 || !total.is_finite() {
            return (1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0);
        }
        (self.r / total, self.g / total, self.b / total)
    }

    pub fn to_hsv(&self) -> Hsv {
        let r = self.r / 255.0;
        let g = self.g / 255.0;
        let b = self.b / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta <= f32::EPSILON {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let s = if max <= 0.0 { 0.0 } else { delta / max };

        Hsv { h, s, v: max }
    }

    /// Channels rounded for display.
    pub fn rounded(&self) -> [u8; 3] {
        let q = |c: f32| c.round().clamp(0.0, 255.0) as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.rounded();
        write!(f, "RGB {r}, {g}, {b}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn normalized_sums_to_one() {
        let (r, g, b) = Rgb::new(50.0, 100.0, 50.0).normalized();
        assert!(close(r, 0.25) && close(g, 0.5) && close(b, 0.25));

        let (r, g, b) = Rgb::new(0.0, 0.0, 0.0).normalized();
        assert!(close(r + g + b, 1.0));
    }

    #[test]
    fn hsv_primaries() {
        let red = Rgb::new(255.0, 0.0, 0.0).to_hsv();
        assert!(close(red.h, 0.0) && close(red.s, 1.0) && close(red.v, 1.0));

        let green = Rgb::new(0.0, 255.0, 0.0).to_hsv();
        assert!(close(green.h, 120.0));

        let blue = Rgb::new(0.0, 0.0, 255.0).to_hsv();
        assert!(close(blue.h, 240.0));

        let magenta_ish = Rgb::new(255.0, 0.0, 128.0).to_hsv();
        assert!(magenta_ish.h > 300.0 && magenta_ish.h < 360.0);

        let gray = Rgb::new(128.0, 128.0, 128.0).to_hsv();
        assert!(close(gray.s, 0.0) && close(gray.h, 0.0));
    }

    #[test]
    fn display_rounds() {
        assert_eq!(Rgb::new(10.4, 10.6, 300.0).to_string(), "RGB 10, 11, 255");
    }
}
