use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Face detection assets could not be loaded. Reload or check the asset path: {0}")]
    ModelLoad(String),

    #[error("Camera could not be started. Allow access or choose another device: {0}")]
    Camera(String),

    #[error("No face found. Face the camera directly and use soft light.")]
    NoFace,

    #[error("Invalid detection: {0}")]
    InvalidDetection(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    /// Transient failures are retried by the next poll tick.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::NoFace | Error::InvalidDetection(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
