use std::num::NonZeroUsize;

use comms::{
    MrfReceiver, MrfSender,
    msg::{Command, Msg, Payload},
    specs::worker::{PlaneSpec, WorkerSpec},
};
use fractal_core::{ImageBuffer, ImagePlane};
use futures::future::try_join_all;
use log::{debug, info};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::OrchestratorError;

type Channel<R, W> = (MrfReceiver<R>, MrfSender<W>);

/// One render round against a fixed fleet of connected workers.
///
/// The session owns one ordered channel per rank. Dispatch tells every rank
/// who it is and what to render; the gather fans the results back in and
/// assembles the frame. There is no retry and no timeout anywhere: a stalled
/// worker stalls the whole round.
pub struct Session<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    channels: Vec<Channel<R, W>>,
    plane: ImagePlane,
    workers: NonZeroUsize,
}

impl<R, W> Session<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a session over one established channel per worker.
    ///
    /// # Errors
    /// Returns `InvalidConfig` when the fleet is empty.
    pub fn new(channels: Vec<Channel<R, W>>, plane: ImagePlane) -> Result<Self, OrchestratorError> {
        let workers = NonZeroUsize::new(channels.len()).ok_or_else(|| {
            OrchestratorError::InvalidConfig("at least one worker is required".to_string())
        })?;

        Ok(Self {
            channels,
            plane,
            workers,
        })
    }

    /// Sends every rank its bootstrap spec.
    ///
    /// Each spec carries the rank, the group size and the full frame
    /// constants; workers derive everything else themselves.
    pub async fn dispatch(&mut self) -> Result<(), OrchestratorError> {
        let plane = plane_spec(&self.plane);

        for (worker_id, (_, tx)) in self.channels.iter_mut().enumerate() {
            let spec = WorkerSpec {
                worker_id,
                workers: self.workers,
                plane: plane.clone(),
            };
            tx.send(&Msg::Control(Command::CreateWorker(spec))).await?;
            debug!("bootstrap spec dispatched: worker_id={worker_id}");
        }

        Ok(())
    }

    /// Collects every rank's slice, then the tail, and assembles the frame.
    ///
    /// The fan-in is a barrier: assembly starts only once all ranks have
    /// reported, though slices land at rank-derived offsets so arrival order
    /// never matters. The tail transfer is awaited as a distinct step after
    /// the barrier; it writes a disjoint region of the frame.
    ///
    /// # Errors
    /// Any protocol violation (a worker error report, a wrong-sized or
    /// duplicate slice, a misdirected tail, an unexpected message) is fatal
    /// for the round.
    pub async fn gather(self) -> Result<Vec<u32>, OrchestratorError> {
        let Self {
            channels,
            plane,
            workers,
        } = self;
        let expected = workers.get();
        let mut image = ImageBuffer::new(plane, workers);

        let futs = channels
            .into_iter()
            .enumerate()
            .map(|(slot, (mut rx, tx))| async move {
                let mut buf: Vec<u32> = Vec::new();
                let report = match rx.recv_into(&mut buf).await? {
                    Msg::Data(Payload::Slice { worker_id, cells }) => {
                        (worker_id as usize, cells.to_vec())
                    }
                    Msg::Err(detail) => {
                        return Err(OrchestratorError::WorkerFailed {
                            worker_id: slot,
                            detail: detail.into_owned(),
                        });
                    }
                    msg => {
                        return Err(OrchestratorError::UnexpectedMessage {
                            got: msg_kind(&msg),
                        });
                    }
                };
                Ok((report, rx, tx))
            });

        let reports = try_join_all(futs).await?;
        info!("gather complete: {expected}/{expected} slices received");

        let last_rank = expected - 1;
        let mut last_channel = None;
        let mut rest = Vec::with_capacity(expected);

        for ((worker_id, cells), rx, tx) in reports {
            image.place_slice(worker_id, &cells)?;
            debug!("slice placed: worker_id={worker_id} cells={}", cells.len());

            if worker_id == last_rank {
                last_channel = Some((rx, tx));
            } else {
                rest.push((rx, tx));
            }
        }

        // `place_slice` admits each rank exactly once, and there are exactly
        // `workers` reports, so the last rank's channel is always here.
        let Some((mut last_rx, last_tx)) = last_channel else {
            unreachable!("last rank missing after a complete fan-in");
        };

        if plane.height() as usize % expected != 0 {
            let mut buf: Vec<u32> = Vec::new();
            match last_rx.recv_into(&mut buf).await? {
                Msg::Data(Payload::Remainder { worker_id, cells }) => {
                    image.place_remainder(worker_id as usize, cells)?;
                    debug!("remainder placed: worker_id={worker_id} cells={}", cells.len());
                }
                Msg::Err(detail) => {
                    return Err(OrchestratorError::WorkerFailed {
                        worker_id: last_rank,
                        detail: detail.into_owned(),
                    });
                }
                msg => {
                    return Err(OrchestratorError::UnexpectedMessage {
                        got: msg_kind(&msg),
                    });
                }
            }
        }

        rest.push((last_rx, last_tx));

        // Drain each worker's disconnect and ack it now that the frame is
        // whole.
        for (mut rx, mut tx) in rest {
            let mut buf: Vec<u32> = Vec::new();
            match rx.recv_into(&mut buf).await? {
                Msg::Control(Command::Disconnect) => {}
                msg => {
                    return Err(OrchestratorError::UnexpectedMessage {
                        got: msg_kind(&msg),
                    });
                }
            }
            tx.send(&Msg::Control(Command::Disconnect)).await?;
        }

        info!("frame assembled: {} cells", plane.cell_count());
        image.finish().map_err(Into::into)
    }
}

fn plane_spec(plane: &ImagePlane) -> PlaneSpec {
    PlaneSpec {
        width: plane.width(),
        height: plane.height(),
        max_iters: plane.max_iters(),
        xmin: plane.xmin(),
        xmax: plane.xmax(),
        ymin: plane.ymin(),
        ymax: plane.ymax(),
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
