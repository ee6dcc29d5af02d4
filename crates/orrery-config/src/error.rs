//! Failures while persisting or decoding `config.ron`.

/// Everything that can go wrong between disk and [`Config`](crate::Config).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `config.ron` exists but could not be read.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// The directory or `config.ron` could not be written.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// The file is not valid RON for this config schema.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// The config could not be rendered as RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),
}
