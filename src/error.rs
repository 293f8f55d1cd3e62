use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the upscaling pipeline.
///
/// Image decode and encode failures are fatal and carry the path of the
/// offending file. There is no partial-success mode: either a complete
/// output image is produced or the run aborts before producing one.
#[derive(Error, Debug)]
pub enum Error {
    /// A source image could not be decoded.
    #[error("failed to decode image '{}': {}", path.display(), source)]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// The output image could not be encoded or written.
    #[error("failed to encode image '{}': {}", path.display(), source)]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Pixel buffers map to L8/La8/Rgb8/Rgba8 on the encode side.
    #[error("unsupported channel count {0}: expected 1 to 4")]
    UnsupportedChannels(u32),

    /// Requested buffer dimensions overflow the addressable size.
    #[error("image dimensions {width}x{height}x{channels} overflow the buffer size")]
    BufferTooLarge {
        width: u32,
        height: u32,
        channels: u32,
    },

    /// I/O failure while writing a weight dump or model file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_names_the_file() {
        let err = Error::Decode {
            path: PathBuf::from("missing.png"),
            source: image::ImageError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such file",
            )),
        };
        let msg = err.to_string();
        assert!(msg.contains("missing.png"));
        assert!(msg.contains("decode"));
    }

    #[test]
    fn unsupported_channels_reports_count() {
        assert!(Error::UnsupportedChannels(7).to_string().contains('7'));
    }
}
