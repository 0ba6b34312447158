use std::path::Path;

use crate::error::Error;
use crate::model::{EmbeddedImage, ImageFormat};

pub const POINTS_PER_INCH: f32 = 72.0;

pub fn inches(value: f32) -> f32 {
    value * POINTS_PER_INCH
}

fn sniff_format(data: &[u8]) -> Result<ImageFormat, Error> {
    match image::guess_format(data) {
        Ok(image::ImageFormat::Png) => Ok(ImageFormat::Png),
        Ok(image::ImageFormat::Jpeg) => Ok(ImageFormat::Jpeg),
        Ok(other) => Err(Error::Asset(format!("unsupported image format {other:?}"))),
        Err(e) => Err(Error::Asset(format!("unrecognized image data: {e}"))),
    }
}

/// Decode `data` fully and size it to `width_pt`, keeping the aspect ratio.
/// Decoding (rather than header sniffing alone) rejects truncated files
/// before they are embedded in the package.
pub fn load_image_bytes(data: Vec<u8>, width_pt: f32) -> Result<EmbeddedImage, Error> {
    let format = sniff_format(&data)?;
    let decoded = image::load_from_memory(&data)
        .map_err(|e| Error::Asset(format!("cannot decode image: {e}")))?;
    let (pixel_width, pixel_height) = (decoded.width(), decoded.height());
    if pixel_width == 0 || pixel_height == 0 {
        return Err(Error::Asset("image has zero size".into()));
    }
    let display_height = width_pt * pixel_height as f32 / pixel_width as f32;
    Ok(EmbeddedImage {
        data,
        format,
        pixel_width,
        pixel_height,
        display_width: width_pt,
        display_height,
    })
}

pub fn load_image_file(path: &Path, width_pt: f32) -> Result<EmbeddedImage, Error> {
    let data = std::fs::read(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", e, path.display()),
        ))
    })?;
    load_image_bytes(data, width_pt)
}

/// Like [`load_image_file`], but a missing or unreadable asset is logged and
/// dropped instead of failing the caller.
pub fn try_load_image(path: &Path, width_pt: f32) -> Option<EmbeddedImage> {
    match load_image_file(path, width_pt) {
        Ok(img) => Some(img),
        Err(e) => {
            log::warn!("Skipping image asset {}: {e}", path.display());
            None
        }
    }
}
