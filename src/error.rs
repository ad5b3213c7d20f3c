//! Error types shared by the registries and the configuration layer.
//!
//! Tag misses are not errors in this crate: lookups return `Option` or the
//! `-1` slot sentinel. Only loading and configuration can fail.

/// Failure to register a texture.
///
/// None of these are fatal. The scene logs them and carries on with the tag
/// absent, so later draws that reference it fall back to "no texture".
#[derive(thiserror::Error, Debug)]
pub enum TextureError {
    /// The file could not be read or is not a valid image.
    #[error("could not decode texture '{source_name}': {source}")]
    Decode {
        source_name: String,
        #[source]
        source: image::ImageError,
    },

    /// Decoded fine, but only 3 or 4 channel images are accepted.
    #[error("texture '{tag}' has {channels} channels, expected 3 or 4")]
    UnsupportedFormat { tag: String, channels: u8 },

    /// Every texture unit is taken.
    #[error("cannot register texture '{tag}': all {limit} texture units are in use")]
    RegistryFull { tag: String, limit: usize },
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
