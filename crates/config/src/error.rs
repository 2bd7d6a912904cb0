//! Error types for configuration loading and flag parsing.

/// Errors produced while reading, writing or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{key}`: expected a scalar, found {found}")]
    InvalidValue { key: String, found: &'static str },

    #[error("flag error: {0}")]
    Flags(#[from] clap::Error),

    #[error("-{0} only takes effect at startup")]
    StartupOnly(&'static str),
}
