//! Capture session: polls a camera and a detector until one frame yields
//! a complete analysis.

use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::analysis::{Analysis, Analyzer};
use crate::camera::{Camera, StreamGuard};
use crate::config::Config;
use crate::detector::FaceDetector;
use crate::error::{Error, Result};
use crate::suggest::Composer;

/// User-facing progress messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ready,
    CameraActive,
    Captured,
    Stopped,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Ready => "Ready. Start the camera and look straight into it.",
            Status::CameraActive => "Camera active. Collecting data on your facial features.",
            Status::Captured => "Analysis complete.",
            Status::Stopped => "Capture stopped.",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Status(Status),
    /// A tick found no usable face.
    NoFace,
    Analysis(Box<Analysis>),
}

/// Requests that a running (or about to run) session stop.
///
/// A stop is consumed by the `run` call that observes it, so the session
/// can be started again afterwards.
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_stop_requested(&self) -> bool {
        *self.tx.borrow()
    }
}

pub struct CaptureSession<C, D, R = StdRng> {
    analyzer: Analyzer,
    camera: C,
    detector: D,
    composer: Composer<R>,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
    stop_tx: Arc<watch::Sender<bool>>,
    stop_rx: watch::Receiver<bool>,
}

impl<C: Camera, D: FaceDetector> CaptureSession<C, D, StdRng> {
    /// New session with an entropy-seeded composer. Rejects invalid configs.
    pub fn new(config: Config, camera: C, detector: D) -> Result<Self> {
        config.validate()?;
        let (stop_tx, stop_rx) = watch::channel(false);
        Ok(Self {
            analyzer: Analyzer::new(config),
            camera,
            detector,
            composer: Composer::new(),
            events: None,
            stop_tx: Arc::new(stop_tx),
            stop_rx,
        })
    }
}

impl<C: Camera, D: FaceDetector, R: Rng> CaptureSession<C, D, R> {
    pub fn with_composer<R2: Rng>(self, composer: Composer<R2>) -> CaptureSession<C, D, R2> {
        CaptureSession {
            analyzer: self.analyzer,
            camera: self.camera,
            detector: self.detector,
            composer,
            events: self.events,
            stop_tx: self.stop_tx,
            stop_rx: self.stop_rx,
        }
    }

    /// Send progress events to `tx`. The session never blocks on it.
    pub fn with_events(mut self, tx: mpsc::UnboundedSender<SessionEvent>) -> Self {
        self.events = Some(tx);
        emit(&self.events, SessionEvent::Status(Status::Ready));
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            tx: Arc::clone(&self.stop_tx),
        }
    }

    pub fn config(&self) -> &Config {
        self.analyzer.config()
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Poll until the first successful analysis or a stop request.
    ///
    /// Returns `Ok(None)` when stopped. Camera and detector failures other
    /// than "no face" end the run with an error. The camera is released on
    /// every path out of this function.
    pub async fn run(&mut self) -> Result<Option<Analysis>> {
        if *self.stop_rx.borrow_and_update() {
            info!("Stop requested before capture started");
            self.stop_tx.send_replace(false);
            self.stop_rx.borrow_and_update();
            emit(&self.events, SessionEvent::Status(Status::Stopped));
            return Ok(None);
        }

        let capture = self.config().capture.clone();
        let mut stream = StreamGuard::acquire(&mut self.camera)?;
        emit(&self.events, SessionEvent::Status(Status::CameraActive));
        info!(interval_ms = capture.poll_interval_ms, "Capture started");

        let mut ticker = interval(capture.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut ticks = 0u64;
        loop {
            tokio::select! {
                biased;
                changed = self.stop_rx.changed() => {
                    if changed.is_ok() && !*self.stop_rx.borrow_and_update() {
                        continue;
                    }
                    info!(ticks, "Capture stopped");
                    self.stop_tx.send_replace(false);
                    self.stop_rx.borrow_and_update();
                    emit(&self.events, SessionEvent::Status(Status::Stopped));
                    return Ok(None);
                }
                _ = ticker.tick() => {}
            }
            ticks += 1;

            let frame = match stream.frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    debug!(ticks, "No frame available, skipping tick");
                    continue;
                }
                Err(e) => {
                    error!("Camera failure: {}", e);
                    return Err(e);
                }
            };

            let outcome = self
                .detector
                .detect(&frame, capture.score_threshold)
                .and_then(|found| found.ok_or(Error::NoFace))
                .and_then(|detection| self.analyzer.analyze(&detection, &frame));

            match outcome {
                Ok(features) => {
                    let suggestion = self.composer.compose(&features);
                    info!(ticks, shape = %features.face_shape.label, style = suggestion.style, "Face captured");
                    let analysis = Analysis { features, suggestion };
                    emit(&self.events, SessionEvent::Analysis(Box::new(analysis.clone())));
                    emit(&self.events, SessionEvent::Status(Status::Captured));
                    return Ok(Some(analysis));
                }
                Err(e) if e.is_transient() => {
                    warn!(ticks, "{}", e);
                    emit(&self.events, SessionEvent::NoFace);
                }
                Err(e) => {
                    error!("Detection failed: {}", e);
                    return Err(e);
                }
            }
        }
    }
}

fn emit(events: &Option<mpsc::UnboundedSender<SessionEvent>>, event: SessionEvent) {
    if let Some(tx) = events {
        // A dropped receiver only means nobody is listening
        let _ = tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ImageSequenceCamera;
    use crate::detector::ReplayDetector;
    use crate::features::Frame;
    use crate::types::{BoundingBox, Detection, Point, Shape, NUM_LANDMARKS};
    use std::time::Duration;

    fn detection() -> Detection {
        let bbox = BoundingBox::new(100.0, 100.0, 200.0, 200.0);
        Detection::new(bbox, Shape::new(vec![Point::new(200.0, 200.0); NUM_LANDMARKS]))
    }

    fn camera() -> ImageSequenceCamera {
        ImageSequenceCamera::from_frames(vec![Frame::solid(400, 400, [90, 80, 70])]).looping(true)
    }

    fn session(results: Vec<Option<Detection>>) -> CaptureSession<ImageSequenceCamera, ReplayDetector> {
        CaptureSession::new(Config::default(), camera(), ReplayDetector::new(results))
            .unwrap()
            .with_composer(Composer::seeded(1))
    }

    #[tokio::test(start_paused = true)]
    async fn stops_on_first_success() {
        let mut s = session(vec![None, None, Some(detection()), Some(detection())]);
        let analysis = s.run().await.unwrap();

        assert!(analysis.is_some());
        assert_eq!(s.detector().calls(), 3);
        assert!(!s.camera().is_active());
        assert_eq!(s.camera().stops(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_before_run_skips_detector() {
        let mut s = session(vec![Some(detection())]);
        s.stop_handle().stop();

        assert_eq!(s.run().await.unwrap(), None);
        assert_eq!(s.detector().calls(), 0);
        assert_eq!(s.camera().starts(), 0);
        assert!(!s.stop_handle().is_stop_requested());
    }

    #[tokio::test(start_paused = true)]
    async fn no_face_ticks_until_stopped() {
        let mut s = session(Vec::new());
        let handle = s.stop_handle();

        let (result, _) = tokio::join!(s.run(), async move {
            tokio::time::sleep(Duration::from_millis(1000)).await;
            handle.stop();
        });

        assert_eq!(result.unwrap(), None);
        // Ticks at 0 ms and 700 ms
        assert_eq!(s.detector().calls(), 2);
        assert!(!s.camera().is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_reacquires_camera() {
        let mut s = session(vec![Some(detection()), Some(detection())]);
        assert!(s.run().await.unwrap().is_some());
        assert!(s.run().await.unwrap().is_some());
        assert_eq!((s.camera().starts(), s.camera().stops()), (2, 2));
    }

    #[tokio::test(start_paused = true)]
    async fn ended_stream_skips_ticks() {
        let cam = ImageSequenceCamera::from_frames(vec![Frame::solid(400, 400, [0, 0, 0])]);
        let mut s = CaptureSession::new(Config::default(), cam, ReplayDetector::new(Vec::new())).unwrap();
        let handle = s.stop_handle();

        let (result, _) = tokio::join!(s.run(), async move {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            handle.stop();
        });

        assert_eq!(result.unwrap(), None);
        // Only the first tick had a frame
        assert_eq!(s.detector().calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn events_trace_the_run() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut s = session(vec![None, Some(detection())]).with_events(tx);
        s.run().await.unwrap();

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(events.len(), 5);
        assert_eq!(events[0], SessionEvent::Status(Status::Ready));
        assert_eq!(events[1], SessionEvent::Status(Status::CameraActive));
        assert_eq!(events[2], SessionEvent::NoFace);
        assert!(matches!(events[3], SessionEvent::Analysis(_)));
        assert_eq!(events[4], SessionEvent::Status(Status::Captured));
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = Config::default();
        config.capture.poll_interval_ms = 0;
        let result = CaptureSession::new(config, camera(), ReplayDetector::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
