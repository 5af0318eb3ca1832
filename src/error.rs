use crate::stripes::StripeConfigError;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("The specified file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Cannot open image {}.", .path.display())]
    CannotOpen {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("The image must be square (got {width}x{height}).")]
    NotSquare { width: u32, height: u32 },

    #[error("Images must share dimensions: {0:?} vs {1:?}")]
    DimensionMismatch((u32, u32), (u32, u32)),

    #[error(transparent)]
    Stripes(#[from] StripeConfigError),

    #[error("Failed to save image: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("Input ended before all parameters were collected")]
    UnexpectedEof,

    #[error("Configuration error")]
    Config(#[from] config::ConfigError),

    #[error("Invalid value '{value}' for setting '{key}'")]
    InvalidSetting { key: &'static str, value: String },
}
