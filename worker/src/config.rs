use fractal_core::{ImagePlane, Partition};

/// Immutable execution bounds for a worker instance.
#[derive(Debug, Clone, Copy)]
pub struct WorkerConfig {
    plane: ImagePlane,
    partition: Partition,
}

impl WorkerConfig {
    /// Creates a new worker configuration.
    ///
    /// # Args
    /// * `plane` - The frame constants every rank agrees on.
    /// * `partition` - This rank's row share.
    ///
    /// # Returns
    /// A `WorkerConfig` instance.
    pub fn new(plane: ImagePlane, partition: Partition) -> Self {
        Self { plane, partition }
    }

    /// Returns this rank's identity within the group.
    pub fn worker_id(&self) -> usize {
        self.partition.worker_id()
    }

    pub fn plane(&self) -> &ImagePlane {
        &self.plane
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }
}
