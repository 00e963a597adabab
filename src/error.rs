// file: src/error.rs
// version: 2.1.0
// guid: 57b83a63-07b6-4534-aa6c-51e8797254e0

use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, KetoError>;

/// Error types for keto
#[derive(Error, Debug)]
pub enum KetoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A render context could not be assembled from the supplied inputs.
    #[error("Context error: {0}")]
    Context(String),

    /// An embedded skeleton failed to compile.
    #[error("Skeleton '{name}' is malformed: {source}")]
    Skeleton {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// A skeleton references something the render context does not provide.
    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl KetoError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new context error
    pub fn context(msg: impl Into<String>) -> Self {
        Self::Context(msg.into())
    }

    /// Create a new not implemented error
    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Self::NotImplemented(msg.into())
    }

    /// Whether the error came out of user data generation rather than the
    /// surrounding configuration or I/O.
    pub fn is_generation_error(&self) -> bool {
        matches!(
            self,
            Self::Context(_) | Self::Skeleton { .. } | Self::Render(_)
        )
    }
}
