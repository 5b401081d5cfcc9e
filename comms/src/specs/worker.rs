use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Wire-level bootstrap specification for a worker instance.
///
/// This type is exchanged over the network during worker bootstrap. Each
/// rank receives its own identity plus the totals the whole group agrees on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerSpec {
    pub worker_id: usize,
    pub workers: NonZeroUsize,
    pub plane: PlaneSpec,
}

/// Raw render-frame constants as they travel on the wire.
///
/// Deliberately unvalidated; both ends validate into their own domain types,
/// since the redesigned topology shares no startup state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneSpec {
    pub width: u32,
    pub height: u32,
    pub max_iters: u32,
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}
