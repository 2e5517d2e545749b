//! Error types for the input hook library.

use thiserror::Error;

/// Result type alias for pollhook operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up or tearing down a backend.
///
/// Query methods never return errors; a backend that fails to acquire its
/// OS event source keeps running with empty state tables and the failure is
/// surfaced once through the log.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to start the hook.
    #[error("failed to start hook: {0}")]
    HookStartFailed(String),

    /// The operation requires elevated permissions.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Thread-related error.
    #[error("thread error: {0}")]
    ThreadError(String),

    /// The requested backend is not available on this platform or build.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Platform-specific error.
    #[error("platform error: {0}")]
    Platform(String),
}
