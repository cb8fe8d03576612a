//! Asset loading.
//!
//! Only what the renderer needs: decoding an image file into RGBA8 pixels.

mod image;

pub use self::image::{AssetError, ImageData};
