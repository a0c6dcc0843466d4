// One error type for the whole crate.
// Every variant states *where* things went wrong.
// The paint path never produces these: out-of-bounds writes, unknown sprites
// and unclassified geometry are silent no-ops.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A label buffer cannot have a zero-sized side.
    #[error("Label buffer resolution must be non-zero, got {width}x{height}")]
    ZeroResolution { width: u32, height: u32 },

    /// Creating the debug window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Pushing the palette image to the debug window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// Encoding or writing the PNG label image failed
    #[error("Export error: {0}")]
    Export(#[from] image::ImageError),

    /// The buffer bytes did not fit the image dimensions
    #[error("Export error: buffer of {len} bytes does not match {width}x{height}")]
    ExportShape { width: u32, height: u32, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// labels.toml could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// A config override carried a value of the wrong type
    #[error("Config override {key}={value} is invalid")]
    ConfigOverride { key: String, value: String },

    /// Frame report could not be encoded
    #[error("Report encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
