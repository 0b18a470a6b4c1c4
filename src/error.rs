use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TexpackError {
    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to save image '{path}': {source}")]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("No valid images found in input")]
    NoImages,

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to compress PNG '{path}': {message}")]
    PngCompress { path: PathBuf, message: String },

    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("Invalid input pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Canvas cannot grow beyond {width}x{height}")]
    CanvasOverflow { width: u32, height: u32 },

    #[error("'{name}' ({width}x{height}, border {border}) is too large to pack")]
    RectangleTooLarge {
        name: String,
        width: u32,
        height: u32,
        border: u32,
    },

    #[error("Packed layout is inconsistent: {0}")]
    LayoutViolation(String),
}
