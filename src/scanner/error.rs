//! Scanner Error Types

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Clone failed (network, authentication, nonexistent repository);
    /// the repository is skipped with zero contribution
    #[error("acquisition of {name} failed: {message}")]
    Acquisition { name: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("queue error: {0}")]
    Queue(#[from] crate::queue::error::QueueError),
}

pub type ScanResult<T> = Result<T, ScanError>;
