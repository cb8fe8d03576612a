use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to produce pixel data from an image asset.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: image::ImageError,
    },

    #[error("{what} has zero size")]
    Empty { what: String },
}

/// Decoded RGBA8 image, rows top to bottom, ready for a texture upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

impl ImageData {
    /// Reads and decodes an image file, converting to 4-channel RGBA.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let image = Self::decode(&bytes, &path.display().to_string())?;
        log::info!("loaded {} ({}x{})", path.display(), image.width, image.height);
        Ok(image)
    }

    /// Decodes an in-memory encoded image (format sniffed from the header).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        Self::decode(bytes, "in-memory image")
    }

    fn decode(bytes: &[u8], what: &str) -> Result<Self, AssetError> {
        let decoded = image::load_from_memory(bytes).map_err(|source| AssetError::Decode {
            what: what.to_string(),
            source,
        })?;

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::Empty { what: what.to_string() });
        }

        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    /// Solid-color image; handy as a placeholder texture.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            width,
            height,
            rgba: rgba.repeat(pixels),
        }
    }

    /// Bytes per row of tightly packed RGBA8 data.
    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn encode_png(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_fn(width, height, |x, y| image::Rgba(f(x, y)));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png_to_rgba8() {
        let png = encode_png(3, 2, |x, y| [x as u8 * 10, y as u8 * 20, 7, 255 - x as u8]);
        let img = ImageData::from_bytes(&png).unwrap();

        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(img.rgba.len(), 3 * 2 * 4);
        assert_eq!(img.bytes_per_row(), 12);
        // Pixel (2, 1): last row, last column.
        assert_eq!(&img.rgba[20..24], &[20, 20, 7, 253]);
    }

    #[test]
    fn rgb_png_gains_opaque_alpha() {
        let rgb = image::RgbImage::from_pixel(2, 2, image::Rgb([9, 8, 7]));
        let mut out = Cursor::new(Vec::new());
        rgb.write_to(&mut out, image::ImageFormat::Png).unwrap();

        let img = ImageData::from_bytes(&out.into_inner()).unwrap();
        assert_eq!(&img.rgba[..4], &[9, 8, 7, 255]);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = ImageData::from_bytes(b"definitely not a png").unwrap_err();
        assert!(matches!(err, AssetError::Decode { .. }), "{err}");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ImageData::from_file("does/not/exist.png").unwrap_err();
        match err {
            AssetError::Io { path, .. } => assert_eq!(path, PathBuf::from("does/not/exist.png")),
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn solid_fills_every_pixel() {
        let img = ImageData::solid(2, 3, [1, 2, 3, 4]);
        assert_eq!(img.rgba.len(), 24);
        assert!(img.rgba.chunks(4).all(|p| p == [1, 2, 3, 4]));
    }
}
