use comms::{
    MrfReceiver,
    msg::{Command, Msg},
    specs::worker::WorkerSpec,
};
use fractal_core::{ImagePlane, Partition};
use log::warn;
use tokio::io::AsyncRead;

use crate::{Result, Worker, WorkerConfig};

pub struct WorkerBuilder;

impl WorkerBuilder {
    /// Waits for the orchestrator's `CreateWorker` command.
    ///
    /// Unexpected messages before bootstrap are logged and skipped.
    ///
    /// # Args
    /// * `rx` - Receiving end of the orchestrator channel.
    ///
    /// # Returns
    /// The bootstrap spec, or `None` when the orchestrator disconnects
    /// before sending one.
    pub async fn handshake<R>(rx: &mut MrfReceiver<R>) -> Result<Option<WorkerSpec>>
    where
        R: AsyncRead + Unpin,
    {
        let mut buf: Vec<u32> = Vec::new();

        loop {
            match rx.recv_into(&mut buf).await? {
                Msg::Control(Command::CreateWorker(spec)) => break Ok(Some(spec)),
                Msg::Control(Command::Disconnect) => break Ok(None),
                msg => warn!("expected create_worker, got {msg:?}"),
            }
        }
    }

    /// Builds a `Worker` from a `WorkerSpec`, validating the frame constants
    /// and this rank's place in the group.
    ///
    /// # Errors
    /// Returns `WorkerErr::Config` when the spec is degenerate. Nothing is
    /// rendered before this check passes.
    pub fn build(spec: &WorkerSpec) -> Result<Worker> {
        let p = &spec.plane;
        let plane = ImagePlane::new(
            p.width, p.height, p.max_iters, p.xmin, p.xmax, p.ymin, p.ymax,
        )?;
        let partition = Partition::plan(plane.height(), spec.workers, spec.worker_id)?;

        Ok(Worker::new(WorkerConfig::new(plane, partition)))
    }
}
