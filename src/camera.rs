//! Camera sources and scoped stream ownership.

use std::path::PathBuf;

use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::features::Frame;

/// A video source the capture session can poll.
pub trait Camera {
    /// Acquire the device and begin streaming.
    fn start(&mut self) -> Result<()>;

    /// Current frame. `Ok(None)` means the stream is paused or has ended,
    /// and the caller should skip this tick.
    fn frame(&mut self) -> Result<Option<Frame>>;

    /// Release the device. Must be safe to call when not started.
    fn stop(&mut self);

    fn is_active(&self) -> bool;
}

impl<C: Camera + ?Sized> Camera for Box<C> {
    fn start(&mut self) -> Result<()> {
        (**self).start()
    }

    fn frame(&mut self) -> Result<Option<Frame>> {
        (**self).frame()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}

/// A started camera. Dropping the guard stops the stream, so every exit
/// path out of the scope that acquired it releases the device.
pub struct StreamGuard<'a, C: Camera + ?Sized> {
    camera: &'a mut C,
}

impl<'a, C: Camera + ?Sized> StreamGuard<'a, C> {
    pub fn acquire(camera: &'a mut C) -> Result<Self> {
        if let Err(e) = camera.start() {
            error!("Failed to start camera: {}", e);
            camera.stop();
            return Err(e);
        }
        info!("Camera stream started");
        Ok(Self { camera })
    }

    pub fn frame(&mut self) -> Result<Option<Frame>> {
        self.camera.frame()
    }
}

impl<C: Camera + ?Sized> Drop for StreamGuard<'_, C> {
    fn drop(&mut self) {
        self.camera.stop();
        info!("Camera stream released");
    }
}

enum Slot {
    Loaded(Frame),
    File(PathBuf),
}

/// Plays a fixed list of frames, in memory or as image files on disk.
///
/// Image files are decoded lazily when their turn comes. Without looping
/// the stream reports "ended" after the last frame.
pub struct ImageSequenceCamera {
    slots: Vec<Slot>,
    position: usize,
    looping: bool,
    active: bool,
    starts: usize,
    stops: usize,
}

impl ImageSequenceCamera {
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self::with_slots(frames.into_iter().map(Slot::Loaded).collect())
    }

    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::with_slots(paths.into_iter().map(|p| Slot::File(p.into())).collect())
    }

    fn with_slots(slots: Vec<Slot>) -> Self {
        Self {
            slots,
            position: 0,
            looping: false,
            active: false,
            starts: 0,
            stops: 0,
        }
    }

    /// Restart from the first frame after the last one.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Times the stream was started.
    pub fn starts(&self) -> usize {
        self.starts
    }

    /// Times an active stream was stopped.
    pub fn stops(&self) -> usize {
        self.stops
    }
}

impl Camera for ImageSequenceCamera {
    fn start(&mut self) -> Result<()> {
        if self.slots.is_empty() {
            return Err(Error::Camera("no frames to play".into()));
        }
        self.position = 0;
        self.active = true;
        self.starts += 1;
        Ok(())
    }

    fn frame(&mut self) -> Result<Option<Frame>> {
        if !self.active {
            return Err(Error::Camera("stream is not started".into()));
        }
        if self.position >= self.slots.len() {
            if !self.looping {
                return Ok(None);
            }
            self.position = 0;
        }

        let index = self.position;
        self.position += 1;
        match &self.slots[index] {
            Slot::Loaded(frame) => Ok(Some(frame.clone())),
            Slot::File(path) => {
                debug!("Decoding frame {}", path.display());
                let img = image::open(path)
                    .map_err(|e| Error::Camera(format!("{}: {}", path.display(), e)))?;
                Ok(Some(Frame::from(img.to_rgb8())))
            }
        }
    }

    fn stop(&mut self) {
        if self.active {
            self.active = false;
            self.stops += 1;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
