use std::ops::Range;

use rayon::prelude::*;

use crate::{escape_time, ImagePlane};

/// Renders a band of global rows into a flat row-major buffer of iteration
/// counts, index `(local_row * width + col)`.
///
/// Rows render in parallel; every cell is written by exactly one closure, so
/// no synchronization is needed and the output is byte-identical across runs
/// regardless of scheduling.
pub fn render_rows(plane: &ImagePlane, rows: Range<u32>) -> Vec<u32> {
    let width = plane.width() as usize;
    let start = rows.start;
    let mut cells = vec![0u32; width * rows.len()];

    cells
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(local_row, band)| {
            let y = start + local_row as u32;
            for (x, cell) in band.iter_mut().enumerate() {
                *cell = escape_time(plane.coord(x as u32, y), plane.max_iters());
            }
        });

    cells
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::Partition;

    fn plane() -> ImagePlane {
        ImagePlane::new(64, 48, 100, -2.5, 1.5, -2.0, 2.0).unwrap()
    }

    #[test]
    fn renders_the_expected_cell_count() {
        assert_eq!(render_rows(&plane(), 0..48).len(), 64 * 48);
        assert_eq!(render_rows(&plane(), 10..13).len(), 64 * 3);
    }

    #[test]
    fn empty_band_renders_no_cells() {
        assert!(render_rows(&plane(), 48..48).is_empty());
    }

    #[test]
    fn rendering_is_deterministic() {
        let plane = plane();
        assert_eq!(render_rows(&plane, 0..48), render_rows(&plane, 0..48));
    }

    #[test]
    fn every_cell_is_within_the_iteration_cap() {
        let plane = plane();
        assert!(render_rows(&plane, 0..48).iter().all(|&c| c <= 100));
    }

    #[test]
    fn partitioned_bands_concatenate_to_the_full_frame() {
        // Rendering by rank must not change the computed values, only the
        // order in which bands are produced.
        let plane = plane();
        let full = render_rows(&plane, 0..48);
        let workers = NonZeroUsize::new(7).unwrap();

        let mut stitched = Vec::new();
        for worker_id in 0..workers.get() {
            let part = Partition::plan(plane.height(), workers, worker_id).unwrap();
            stitched.extend(render_rows(&plane, part.rows()));
        }
        let tail = Partition::plan(plane.height(), workers, workers.get() - 1)
            .unwrap()
            .remainder_rows();
        stitched.extend(render_rows(&plane, tail));

        assert_eq!(stitched, full);
    }
}
