//! # face-stylist
//!
//! Facial feature heuristics and hairstyle suggestions from 68-point
//! landmarks.
//!
//! This crate provides:
//! - **Feature Metrics**: forehead height, jaw width, symmetry and face
//!   proportions measured from landmarks and the detection box
//! - **Color Sampling**: mean eye and hair color from regions of the frame
//! - **Classification**: threshold rules mapping metrics to labels
//! - **Suggestions**: template-based hairstyle text with a seedable style pick
//! - **Capture Sessions**: an async polling loop over a camera and a detector
//!
//! Landmarks, boxes and age/gender estimates come from an external detector
//! through the [`FaceDetector`] trait.
//!
//! ## Quick Start
//!
//! ```rust
//! use face_stylist::{Analyzer, BoundingBox, Composer, Detection, Frame, Point, Shape};
//!
//! let frame = Frame::solid(640, 480, [120, 100, 80]);
//!
//! // Landmarks and box from your detector
//! let landmarks = Shape::new(vec![Point::new(320.0, 240.0); 68]);
//! let detection = Detection::new(BoundingBox::new(220.0, 140.0, 200.0, 200.0), landmarks);
//!
//! let features = Analyzer::default().analyze(&detection, &frame)?;
//! for row in features.summary_rows() {
//!     println!("{}: {}", row.heading, row.value);
//! }
//!
//! let suggestion = Composer::seeded(42).compose(&features);
//! println!("{}", suggestion);
//! # Ok::<(), face_stylist::Error>(())
//! ```
//!
//! ## Custom Frame Types
//!
//! Implement the [`PixelAccess`] trait for your own frame types:
//!
//! ```rust
//! use face_stylist::PixelAccess;
//!
//! struct MyFrame { /* ... */ }
//!
//! impl PixelAccess for MyFrame {
//!     fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
//!         // Return None for out-of-bounds
//!         Some([0, 0, 0])
//!     }
//!     fn width(&self) -> u32 { 640 }
//!     fn height(&self) -> u32 { 480 }
//! }
//! ```

mod analysis;
mod camera;
pub mod classify;
mod color;
pub mod config;
mod detector;
mod error;
mod features;
mod metrics;
mod session;
mod suggest;
pub mod templates;
mod types;

pub use analysis::{Analysis, Analyzer, Feature, FeatureRecord, SummaryRow};
pub use camera::{Camera, ImageSequenceCamera, StreamGuard};
pub use classify::{AgeBracket, EyeColor, FaceShape, ForeheadHeight, HairColor, JawWidth, Symmetry};
pub use color::{Hsv, Rgb};
pub use config::Config;
pub use detector::{FaceDetector, ReplayDetector};
pub use error::{Error, Result};
pub use features::{average_color, Frame, PixelAccess, Region};
pub use metrics::{forehead_ratio, jaw_ratio, symmetry_score, FaceMetrics};
pub use session::{CaptureSession, SessionEvent, Status, StopHandle};
pub use suggest::{Composer, Suggestion};
pub use types::{landmark, BoundingBox, Detection, Gender, Point, Shape, NUM_LANDMARKS};
