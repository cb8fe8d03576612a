use thiserror::Error;

use crate::assets::AssetError;

/// Failure to create renderer resources.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("sprite texture unavailable")]
    Texture(#[from] AssetError),

    #[error("texture {width}x{height} exceeds device limit {max}")]
    TextureTooLarge { width: u32, height: u32, max: u32 },

    #[error("sprite capacity must be at least 1")]
    ZeroCapacity,

    #[error("instance buffer of {bytes} bytes exceeds device limit {max}")]
    InstanceBufferTooLarge { bytes: u64, max: u64 },
}
