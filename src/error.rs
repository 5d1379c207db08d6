//! Error taxonomy for classifier operations.
//!
//! Operations return `anyhow::Result`; these variants travel inside the
//! `anyhow::Error` and can be recovered with `downcast_ref::<ClassifierError>()`.

/// Failures surfaced by the classifier and its transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// Missing or invalid connection options
    Configuration(String),
    /// Connection, TLS or timeout failure, or an unexpected status on a read
    Transport(String),
    /// Response body did not have the expected JSON shape
    Protocol(String),
    /// Registry rejected a create request
    CreationConflict { status: u16, body: String },
    /// Caller supplied an unusable request
    InvalidRequest(String),
}

impl std::fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierError::Configuration(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
            ClassifierError::Transport(msg) => {
                write!(f, "Transport error: {}", msg)
            }
            ClassifierError::Protocol(msg) => {
                write!(f, "Protocol error: {}", msg)
            }
            ClassifierError::CreationConflict { status, body } => {
                write!(
                    f,
                    "Registry rejected creation (HTTP {}, expected 201): {}",
                    status, body
                )
            }
            ClassifierError::InvalidRequest(msg) => {
                write!(f, "Invalid request: {}", msg)
            }
        }
    }
}

impl std::error::Error for ClassifierError {}

/// Returns the classifier error carried by `err`, if any.
pub fn classify(err: &anyhow::Error) -> Option<&ClassifierError> {
    err.chain().find_map(|cause| cause.downcast_ref::<ClassifierError>())
}
