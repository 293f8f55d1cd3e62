//! Image file decode/encode for the pipeline.
//!
//! Decoding keeps the file's native channel count (grayscale stays 1
//! channel, RGB stays 3) because the network trains and infers per channel;
//! 16-bit and other exotic layouts are converted to 8-bit RGB.

use std::path::Path;

use image::{ColorType, DynamicImage};

use crate::error::{Error, Result};
use crate::raster::buffer::PixelBuffer;

/// Decodes an image file into a `PixelBuffer`. Failure is fatal to the run
/// and the error names the file.
pub fn load(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let buffer = match img {
        DynamicImage::ImageLuma8(b) => {
            let (w, h) = b.dimensions();
            PixelBuffer::from_raw(w, h, 1, b.into_raw())
        }
        DynamicImage::ImageLumaA8(b) => {
            let (w, h) = b.dimensions();
            PixelBuffer::from_raw(w, h, 2, b.into_raw())
        }
        DynamicImage::ImageRgb8(b) => {
            let (w, h) = b.dimensions();
            PixelBuffer::from_raw(w, h, 3, b.into_raw())
        }
        DynamicImage::ImageRgba8(b) => {
            let (w, h) = b.dimensions();
            PixelBuffer::from_raw(w, h, 4, b.into_raw())
        }
        other => {
            let rgb = other.to_rgb8();
            let (w, h) = rgb.dimensions();
            PixelBuffer::from_raw(w, h, 3, rgb.into_raw())
        }
    };

    Ok(buffer)
}

/// Encodes a `PixelBuffer` to the format implied by the path's extension.
pub fn save(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let color = match buffer.channels() {
        1 => ColorType::L8,
        2 => ColorType::La8,
        3 => ColorType::Rgb8,
        4 => ColorType::Rgba8,
        n => return Err(Error::UnsupportedChannels(n)),
    };

    image::save_buffer(
        path,
        buffer.as_bytes(),
        buffer.width(),
        buffer.height(),
        color,
    )
    .map_err(|source| Error::Encode {
        path: path.to_path_buf(),
        source,
    })
}
