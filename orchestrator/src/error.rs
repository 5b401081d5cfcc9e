use std::{fmt, io};

use fractal_core::FractalError;

/// All errors that can occur in the orchestrator.
#[derive(Debug)]
pub enum OrchestratorError {
    /// Invalid render configuration — caught before connecting.
    InvalidConfig(String),
    /// Failed to connect to a worker.
    ConnectionFailed { addr: String, source: io::Error },
    /// A worker reported an unrecoverable error instead of its data.
    WorkerFailed { worker_id: usize, detail: String },
    /// The gather protocol was violated: wrong sizes, duplicate ranks or an
    /// incomplete frame.
    Protocol(FractalError),
    /// A message arrived that the protocol does not allow at that point.
    UnexpectedMessage { got: &'static str },
    /// An underlying I/O error not covered by the above variants.
    Io(io::Error),
}

impl fmt::Display for OrchestratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::ConnectionFailed { addr, source } => {
                write!(f, "connection failed to {addr}: {source}")
            }
            Self::WorkerFailed { worker_id, detail } => {
                write!(f, "worker {worker_id} failed: {detail}")
            }
            Self::Protocol(e) => write!(f, "gather protocol violation: {e}"),
            Self::UnexpectedMessage { got } => write!(f, "unexpected message: got {got}"),
            Self::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl std::error::Error for OrchestratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConnectionFailed { source, .. } => Some(source),
            Self::Protocol(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for OrchestratorError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<FractalError> for OrchestratorError {
    fn from(e: FractalError) -> Self {
        Self::Protocol(e)
    }
}
