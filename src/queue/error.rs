//! Queue Error Types

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// Required connection settings are absent; fatal at startup
    #[error("missing required environment variable {variable}")]
    ConfigurationMissing { variable: &'static str },

    #[error("invalid value for {variable}: {message}")]
    ConfigurationInvalid {
        variable: &'static str,
        message: String,
    },

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
