use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, ImageError};

use crate::canvas::PixImage;

/// Error taxonomy for the Open/Save actions. Each variant is terminal to the
/// one action that raised it; the open canvas is never touched on failure.
#[derive(Debug)]
pub enum IoError {
    /// The file could not be decoded as an image.
    Decode(String),
    /// The canvas could not be encoded.
    Encode(String),
    /// Reading or writing the file itself failed.
    Io(std::io::Error),
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoError::Decode(e) => write!(f, "Decode error: {}", e),
            IoError::Encode(e) => write!(f, "Encode error: {}", e),
            IoError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for IoError {}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Io(e)
    }
}

/// Decode any image format the generic `image` reader understands and convert
/// it to the canvas's native RGBA8 before it becomes the active canvas.
pub fn open_image(path: &Path) -> Result<PixImage, IoError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let decoded = image::io::Reader::new(reader)
        .with_guessed_format()
        .map_err(IoError::Io)?
        .decode()
        .map_err(|e| match e {
            ImageError::IoError(io) => IoError::Io(io),
            other => IoError::Decode(other.to_string()),
        })?;
    Ok(PixImage::from_rgba_image(decoded.into_rgba8()))
}

/// Encode the canvas as PNG (lossless) and write it to `path`.
pub fn save_png(image: &PixImage, path: &Path) -> Result<(), IoError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let raster = image.as_rgba_image();
    PngEncoder::new(writer)
        .write_image(
            raster.as_raw(),
            raster.width(),
            raster.height(),
            ColorType::Rgba8,
        )
        .map_err(|e| match e {
            ImageError::IoError(io) => IoError::Io(io),
            other => IoError::Encode(other.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{BLACK, WHITE};
    use image::Rgba;

    #[test]
    fn png_round_trip_is_pixel_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.png");

        let mut original = PixImage::new();
        original.set_pixel(5, 9, Rgba([12, 34, 56, 78]));
        save_png(&original, &path).unwrap();

        let reloaded = open_image(&path).unwrap();
        assert_eq!(reloaded.width(), original.width());
        assert_eq!(reloaded.height(), original.height());
        for y in 0..original.height() {
            for x in 0..original.width() {
                assert_eq!(
                    reloaded.get_pixel(x, y),
                    original.get_pixel(x, y),
                    "pixel ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn open_rejects_non_image_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_an_image.png");
        std::fs::write(&path, b"definitely not a PNG").unwrap();

        match open_image(&path) {
            Err(IoError::Decode(_)) => {}
            other => panic!("expected decode error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn open_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        match open_image(&dir.path().join("missing.png")) {
            Err(IoError::Io(_)) => {}
            other => panic!("expected I/O error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn save_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("canvas.png");
        assert!(matches!(
            save_png(&PixImage::new(), &path),
            Err(IoError::Io(_))
        ));
    }

    #[test]
    fn session_save_open_round_trip() {
        use crate::session::EditorSession;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.png");

        let mut s = EditorSession::new();
        s.image.set_pixel(0, 0, Rgba([1, 2, 3, 255]));
        s.save(&path).unwrap();

        let mut other = EditorSession::new();
        other.image = PixImage::blank(2, 2, WHITE);
        other.open(&path).unwrap();
        assert_eq!(other.image.width(), 64);
        assert_eq!(other.image.get_pixel(0, 0), Rgba([1, 2, 3, 255]));
        assert_eq!(other.image.get_pixel(8, 0), BLACK);
    }

    #[test]
    fn failed_open_leaves_canvas_untouched() {
        use crate::session::EditorSession;

        let dir = tempfile::tempdir().unwrap();
        let mut s = EditorSession::new();
        s.image.set_pixel(0, 0, Rgba([9, 9, 9, 255]));
        assert!(s.open(&dir.path().join("missing.png")).is_err());
        assert_eq!(s.image.get_pixel(0, 0), Rgba([9, 9, 9, 255]));
    }
}
