use crate::color::Rgb;
use crate::types::{BoundingBox, Point};

/// Trait for reading RGB pixels from a frame.
pub trait PixelAccess {
    /// Get the RGB value at (x, y). Returns `None` for out-of-bounds pixels.
    fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]>;

    /// Frame dimensions.
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// A simple interleaved RGB frame buffer implementing [`PixelAccess`].
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), (width * height * 3) as usize);
        Self {
            data,
            width,
            height,
        }
    }

    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: Fn(u32, u32) -> [u8; 3],
    {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self { data, width, height }
    }

    /// A frame filled with one color.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        Self::from_fn(width, height, |_, _| rgb)
    }
}

impl From<image::RgbImage> for Frame {
    fn from(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(img.into_raw(), width, height)
    }
}

impl PixelAccess for Frame {
    fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 3) as usize;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl PixelAccess for image::RgbImage {
    fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.get_pixel_checked(x, y).map(|p| p.0)
    }

    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }
}

/// An integer pixel rectangle, already clamped to the frame it samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Build a region from float edges, clamping to `[0, frame_w] x [0, frame_h]`
    /// and rounding to whole pixels. Inverted edges give an empty region.
    pub fn from_edges(min_x: f32, min_y: f32, max_x: f32, max_y: f32, frame_w: u32, frame_h: u32) -> Self {
        let clamp = |v: f32, hi: u32| {
            if v.is_finite() {
                v.clamp(0.0, hi as f32).round() as u32
            } else {
                0
            }
        };
        let x0 = clamp(min_x, frame_w);
        let y0 = clamp(min_y, frame_h);
        let x1 = clamp(max_x, frame_w);
        let y1 = clamp(max_y, frame_h);
        Self {
            x: x0,
            y: y0,
            width: x1.saturating_sub(x0),
            height: y1.saturating_sub(y0),
        }
    }

    /// Tight box around a set of landmarks.
    pub fn around_points(points: &[Point], frame_w: u32, frame_h: u32) -> Self {
        let min_x = points.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_x = points.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        Self::from_edges(min_x, min_y, max_x, max_y, frame_w, frame_h)
    }

    /// Union of two regions grown by `padding` pixels on every side.
    pub fn union_padded(&self, other: &Region, padding: u32, frame_w: u32, frame_h: u32) -> Self {
        let pad = padding as f32;
        let min_x = self.x.min(other.x) as f32 - pad;
        let min_y = self.y.min(other.y) as f32 - pad;
        let max_x = (self.x + self.width).max(other.x + other.width) as f32 + pad;
        let max_y = (self.y + self.height).max(other.y + other.height) as f32 + pad;
        Self::from_edges(min_x, min_y, max_x, max_y, frame_w, frame_h)
    }

    /// Band of height `height_frac * box.height` directly above the box,
    /// spanning the box horizontally minus `inset_frac` on each side.
    pub fn band_above(bbox: &BoundingBox, height_frac: f32, inset_frac: f32, frame_w: u32, frame_h: u32) -> Self {
        let inset = bbox.width * inset_frac;
        Self::from_edges(
            bbox.x + inset,
            bbox.y - bbox.height * height_frac,
            bbox.right() - inset,
            bbox.y,
            frame_w,
            frame_h,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Average color over a region. `None` if the region holds no pixels.
pub fn average_color<I: PixelAccess>(image: &I, region: &Region) -> Option<Rgb> {
    if region.is_empty() {
        return None;
    }

    let mut sum = [0u64; 3];
    let mut count = 0u64;
    for y in region.y..region.y + region.height {
        for x in region.x..region.x + region.width {
            if let Some(px) = image.get_pixel(x, y) {
                for (s, c) in sum.iter_mut().zip(px) {
                    *s += c as u64;
                }
                count += 1;
            }
        }
    }

    if count == 0 {
        return None;
    }
    let n = count as f32;
    Some(Rgb::new(sum[0] as f32 / n, sum[1] as f32 / n, sum[2] as f32 / n))
}
