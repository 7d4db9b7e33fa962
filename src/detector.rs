//! Detector adapter.
//!
//! Face boxes, landmarks and age/gender estimates come from an external
//! model. [`FaceDetector`] is the seam it plugs into. [`ReplayDetector`]
//! plays back results that a detector exported as JSON, one entry per
//! frame:
//!
//! ```json
//! [
//!   null,
//!   { "box": { "x": 210, "y": 120, "width": 220, "height": 240 },
//!     "landmarks": [ { "x": 215.0, "y": 190.0 }, ... ],
//!     "score": 0.93, "age": 29.5, "gender": "female" }
//! ]
//! ```

use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::features::Frame;
use crate::types::Detection;

pub trait FaceDetector {
    /// Detect the single most prominent face in `frame`.
    ///
    /// Returns `Ok(None)` when no face scores at least `score_threshold`.
    fn detect(&mut self, frame: &Frame, score_threshold: f32) -> Result<Option<Detection>>;
}

impl<D: FaceDetector + ?Sized> FaceDetector for Box<D> {
    fn detect(&mut self, frame: &Frame, score_threshold: f32) -> Result<Option<Detection>> {
        (**self).detect(frame, score_threshold)
    }
}

/// Plays back pre-computed detections in order, one per call.
///
/// Once the recording is exhausted every further call reports no face.
#[derive(Debug, Clone, Default)]
pub struct ReplayDetector {
    results: VecDeque<Option<Detection>>,
    calls: usize,
}

impl ReplayDetector {
    pub fn new(results: Vec<Option<Detection>>) -> Self {
        Self {
            results: results.into(),
            calls: 0,
        }
    }

    /// Load a recording. Any I/O or parse failure is a model-load error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            error!("Failed to open detections {}: {}", path.display(), e);
            Error::ModelLoad(format!("{}: {}", path.display(), e))
        })?;
        let results: Vec<Option<Detection>> = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            error!("Failed to parse detections {}: {}", path.display(), e);
            Error::ModelLoad(format!("{}: {}", path.display(), e))
        })?;
        info!("Loaded {} recorded frame(s) from {}", results.len(), path.display());
        Ok(Self::new(results))
    }

    /// Number of `detect` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn remaining(&self) -> usize {
        self.results.len()
    }
}

impl FaceDetector for ReplayDetector {
    fn detect(&mut self, _frame: &Frame, score_threshold: f32) -> Result<Option<Detection>> {
        self.calls += 1;
        let next = self.results.pop_front().flatten();
        Ok(next.filter(|d| {
            let keep = d.score >= score_threshold;
            if !keep {
                debug!(score = d.score, threshold = score_threshold, "detection below threshold");
            }
            keep
        }))
    }
}
