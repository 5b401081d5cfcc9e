use std::fmt;

/// Errors produced when frame, partition or assembly inputs are invalid.
#[derive(Debug, PartialEq, Eq)]
pub enum FractalError {
    /// An input is invalid for semantic or domain reasons.
    InvalidInput(&'static str),

    /// A rank outside the fixed worker group was referenced.
    RankOutOfRange {
        /// The offending rank.
        worker_id: usize,
        /// Size of the worker group.
        workers: usize,
    },

    /// A primary slice arrived with the wrong number of cells.
    SliceLengthMismatch {
        worker_id: usize,
        got: usize,
        expected: usize,
    },

    /// A remainder transfer arrived with the wrong number of cells.
    RemainderLengthMismatch {
        worker_id: usize,
        got: usize,
        expected: usize,
    },

    /// A rank tried to place its slice twice.
    DuplicateSlice { worker_id: usize },

    /// A remainder transfer from a rank that must not send one, or a second
    /// remainder for an already complete tail.
    RemainderRejected { worker_id: usize },

    /// The frame was finished with transfers still outstanding.
    IncompleteImage { missing: usize },
}

impl fmt::Display for FractalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FractalError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            FractalError::RankOutOfRange { worker_id, workers } => {
                write!(f, "rank {worker_id} out of range for {workers} worker(s)")
            }
            FractalError::SliceLengthMismatch {
                worker_id,
                got,
                expected,
            } => write!(
                f,
                "slice length mismatch for rank {worker_id}: got {got}, expected {expected}"
            ),
            FractalError::RemainderLengthMismatch {
                worker_id,
                got,
                expected,
            } => write!(
                f,
                "remainder length mismatch for rank {worker_id}: got {got}, expected {expected}"
            ),
            FractalError::DuplicateSlice { worker_id } => {
                write!(f, "duplicate slice for rank {worker_id}")
            }
            FractalError::RemainderRejected { worker_id } => {
                write!(f, "remainder rejected from rank {worker_id}")
            }
            FractalError::IncompleteImage { missing } => {
                write!(f, "image incomplete: {missing} transfer(s) outstanding")
            }
        }
    }
}

impl std::error::Error for FractalError {}
