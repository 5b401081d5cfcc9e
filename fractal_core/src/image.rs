use std::num::NonZeroUsize;

use crate::{FractalError, ImagePlane, Partition};

/// Full-frame assembly buffer, allocated only on the coordinating side.
///
/// Slices land at the flat offset dictated by their rank, independent of
/// arrival order, and the uneven tail lands past the evenly divided region.
/// Placement is tracked per rank so the finished frame provably has every
/// cell written exactly once.
#[derive(Debug)]
pub struct ImageBuffer {
    plane: ImagePlane,
    workers: NonZeroUsize,
    cells: Vec<u32>,
    placed: Vec<bool>,
    tail_placed: bool,
}

impl ImageBuffer {
    /// Allocates an empty frame for the given plane and worker group.
    pub fn new(plane: ImagePlane, workers: NonZeroUsize) -> Self {
        // An even split has no tail transfer to wait for.
        let tail_placed = plane.height() as usize % workers.get() == 0;

        Self {
            cells: vec![0; plane.cell_count()],
            placed: vec![false; workers.get()],
            plane,
            workers,
            tail_placed,
        }
    }

    pub fn plane(&self) -> &ImagePlane {
        &self.plane
    }

    /// Places one rank's primary slice at its rank-derived offset.
    ///
    /// # Errors
    /// Rejects unknown ranks, repeated ranks, and slices whose cell count
    /// does not match the partition plan exactly.
    pub fn place_slice(&mut self, worker_id: usize, cells: &[u32]) -> Result<(), FractalError> {
        let part = Partition::plan(self.plane.height(), self.workers, worker_id)?;

        let expected = part.slice_cells(self.plane.width());
        if cells.len() != expected {
            return Err(FractalError::SliceLengthMismatch {
                worker_id,
                got: cells.len(),
                expected,
            });
        }
        if self.placed[worker_id] {
            return Err(FractalError::DuplicateSlice { worker_id });
        }

        let offset = part.cell_offset(self.plane.width());
        self.cells[offset..offset + expected].copy_from_slice(cells);
        self.placed[worker_id] = true;
        Ok(())
    }

    /// Places the leftover tail rows past the evenly divided region.
    ///
    /// # Errors
    /// Only the last rank may send a tail, exactly once, and only when the
    /// split is uneven; the cell count must match the tail band exactly.
    pub fn place_remainder(&mut self, worker_id: usize, cells: &[u32]) -> Result<(), FractalError> {
        let part = Partition::plan(self.plane.height(), self.workers, worker_id)?;

        if !part.is_last() || self.tail_placed {
            return Err(FractalError::RemainderRejected { worker_id });
        }

        let tail = part.remainder_rows();
        let expected = self.plane.width() as usize * tail.len();
        if cells.len() != expected {
            return Err(FractalError::RemainderLengthMismatch {
                worker_id,
                got: cells.len(),
                expected,
            });
        }

        let offset = self.plane.width() as usize * tail.start as usize;
        self.cells[offset..offset + expected].copy_from_slice(cells);
        self.tail_placed = true;
        Ok(())
    }

    /// Hands back the assembled frame.
    ///
    /// # Errors
    /// Refuses while any rank's slice or the tail is still outstanding.
    pub fn finish(self) -> Result<Vec<u32>, FractalError> {
        let missing = self.placed.iter().filter(|&&placed| !placed).count()
            + usize::from(!self.tail_placed);
        if missing > 0 {
            return Err(FractalError::IncompleteImage { missing });
        }

        Ok(self.cells)
    }
}
