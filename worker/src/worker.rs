use comms::{
    MrfReceiver, MrfSender,
    msg::{Command, Msg, Payload},
};
use fractal_core::render_rows;
use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::{Result, WorkerConfig, WorkerErr};

/// Infrastructure worker runtime: renders this rank's share of the frame
/// and ships it to the orchestrator.
#[derive(Debug)]
pub struct Worker {
    config: WorkerConfig,
}

impl Worker {
    /// Creates a worker from a validated configuration.
    pub fn new(config: WorkerConfig) -> Self {
        Self { config }
    }

    /// Runs the render-and-ship protocol over the orchestrator channel.
    ///
    /// The primary slice always goes first. When this rank is the last one
    /// and the split is uneven, the tail rows follow as a separate transfer
    /// on the same ordered stream, so the orchestrator can await it strictly
    /// after the gather.
    ///
    /// # Args
    /// * `rx` - Receiving end of the orchestrator channel.
    /// * `tx` - Sending end of the orchestrator channel.
    ///
    /// # Returns
    /// Returns `Ok(())` on graceful completion.
    ///
    /// # Errors
    /// Returns `WorkerErr` on I/O failures or protocol violations.
    pub async fn run<R, W>(self, mut rx: MrfReceiver<R>, mut tx: MrfSender<W>) -> Result<()>
    where
        R: AsyncRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
    {
        let plane = self.config.plane();
        let partition = self.config.partition();
        let worker_id = partition.worker_id();

        let rows = partition.rows();
        debug!(worker_id = worker_id; "rendering rows {}..{}", rows.start, rows.end);
        let cells = render_rows(plane, rows);

        let msg = Msg::Data(Payload::Slice {
            worker_id: worker_id as u32,
            cells: &cells,
        });
        tx.send(&msg).await?;
        info!("slice sent: worker_id={worker_id} cells={}", cells.len());

        let tail = partition.remainder_rows();
        if !tail.is_empty() {
            debug!(worker_id = worker_id; "rendering tail rows {}..{}", tail.start, tail.end);
            let cells = render_rows(plane, tail);

            let msg = Msg::Data(Payload::Remainder {
                worker_id: worker_id as u32,
                cells: &cells,
            });
            tx.send(&msg).await?;
            info!("remainder sent: worker_id={worker_id} cells={}", cells.len());
        }

        tx.send(&Msg::Control(Command::Disconnect)).await?;

        // The orchestrator acks once the whole frame is assembled.
        let mut buf: Vec<u32> = Vec::new();
        match rx.recv_into(&mut buf).await? {
            Msg::Control(Command::Disconnect) => {}
            msg => {
                let got = msg_kind(&msg);
                warn!("unexpected message while waiting for ack: got {got}");
                return Err(WorkerErr::UnexpectedMessage { got });
            }
        }

        info!("worker finished: worker_id={worker_id}");
        Ok(())
    }
}

fn msg_kind(msg: &Msg<'_>) -> &'static str {
    match msg {
        Msg::Control(_) => "control",
        Msg::Err(_) => "err",
        Msg::Data(Payload::Slice { .. }) => "data/slice",
        Msg::Data(Payload::Remainder { .. }) => "data/remainder",
    }
}
