use fractal_core::ImagePlane;

use crate::OrchestratorError;

/// Orchestrator-side render configuration: the worker fleet plus the frame
/// constants every rank must agree on.
///
/// The viewport and iteration parameters are passed explicitly to every
/// worker at bootstrap; nothing is shared as ambient state.
#[derive(Debug, Clone)]
pub struct RenderConfig<A> {
    pub worker_addrs: Vec<A>,
    pub width: u32,
    pub height: u32,
    pub max_iters: u32,
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl<A> RenderConfig<A> {
    /// Validates the frame constants into an `ImagePlane`.
    ///
    /// # Errors
    /// Returns `InvalidConfig` when the totals or bounds are degenerate.
    /// Nothing is connected before this check passes.
    pub fn plane(&self) -> Result<ImagePlane, OrchestratorError> {
        ImagePlane::new(
            self.width,
            self.height,
            self.max_iters,
            self.xmin,
            self.xmax,
            self.ymin,
            self.ymax,
        )
        .map_err(|e| OrchestratorError::InvalidConfig(e.to_string()))
    }
}
