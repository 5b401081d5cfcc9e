use std::num::NonZeroUsize;
use std::ops::Range;

use crate::FractalError;

/// A rank's share of the frame rows.
///
/// The plan is a pure function of the shared totals and the rank, so every
/// worker computes its own copy independently and they all agree without any
/// negotiation. Every rank owns a contiguous primary band of
/// `height / workers` rows; the rows left over when the division is uneven
/// all belong to the last rank as a separate tail band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    worker_id: usize,
    workers: NonZeroUsize,
    height: u32,
    rows_per_worker: u32,
    start_row: u32,
}

impl Partition {
    /// Plans the row share for one rank.
    ///
    /// # Args
    /// * `height` - Total frame rows.
    /// * `workers` - Size of the fixed worker group.
    /// * `worker_id` - This rank, in `[0, workers)`.
    ///
    /// # Errors
    /// Returns `FractalError::RankOutOfRange` when `worker_id` does not fit
    /// the group. A group larger than the row count is legal; it yields
    /// empty primary bands.
    pub fn plan(
        height: u32,
        workers: NonZeroUsize,
        worker_id: usize,
    ) -> Result<Self, FractalError> {
        if worker_id >= workers.get() {
            return Err(FractalError::RankOutOfRange {
                worker_id,
                workers: workers.get(),
            });
        }

        let rows_per_worker = (height as usize / workers.get()) as u32;
        let start_row = (worker_id * rows_per_worker as usize) as u32;

        Ok(Self {
            worker_id,
            workers,
            height,
            rows_per_worker,
            start_row,
        })
    }

    pub fn worker_id(&self) -> usize {
        self.worker_id
    }

    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    pub fn rows_per_worker(&self) -> u32 {
        self.rows_per_worker
    }

    /// This rank's primary band of global rows. Empty when the group
    /// outnumbers the rows.
    pub fn rows(&self) -> Range<u32> {
        self.start_row..self.start_row + self.rows_per_worker
    }

    /// Whether this rank is the highest-ranked one, the owner of the tail.
    pub fn is_last(&self) -> bool {
        self.worker_id + 1 == self.workers.get()
    }

    /// The leftover tail rows. Non-empty only on the last rank when the
    /// division is uneven.
    pub fn remainder_rows(&self) -> Range<u32> {
        if self.is_last() {
            self.rows_per_worker * self.workers.get() as u32..self.height
        } else {
            self.height..self.height
        }
    }

    /// Cell count of the primary band.
    pub fn slice_cells(&self, width: u32) -> usize {
        width as usize * self.rows_per_worker as usize
    }

    /// Flat offset of the primary band in the assembled frame.
    pub fn cell_offset(&self, width: u32) -> usize {
        width as usize * self.start_row as usize
    }
}
