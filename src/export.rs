// Save the label image as an 8-bit grayscale PNG (pixel value = label value).

use crate::buffer::LabelBuffer;
use crate::error::{Error, Result};
use image::GrayImage;
use std::path::Path;
use tracing::info;

/// Copy the buffer into an image; dimensions always match.
pub fn to_gray_image(buffer: &LabelBuffer) -> Result<GrayImage> {
    GrayImage::from_raw(buffer.width(), buffer.height(), buffer.as_bytes().to_vec()).ok_or(
        Error::ExportShape {
            width: buffer.width(),
            height: buffer.height(),
            len: buffer.len(),
        },
    )
}

pub fn save_png(buffer: &LabelBuffer, path: &Path) -> Result<()> {
    to_gray_image(buffer)?.save(path)?;
    info!(path = %path.display(), "label image written");
    Ok(())
}
