use std::{io, num::NonZeroUsize};

use tokio::io::{self as tokio_io, DuplexStream, ReadHalf, WriteHalf};

use comms::msg::{Command, Msg, Payload};
use comms::specs::worker::{PlaneSpec, WorkerSpec};
use comms::{MrfReceiver, MrfSender};
use fractal_core::{ImagePlane, Partition, render_rows};
use worker::WorkerBuilder;

const BUF_SIZE: usize = 64 * 1024;

type Channel = (
    MrfReceiver<ReadHalf<DuplexStream>>,
    MrfSender<WriteHalf<DuplexStream>>,
);

fn channel_pair() -> (Channel, Channel) {
    let (one, two) = tokio_io::duplex(BUF_SIZE);
    let (rx1, tx1) = tokio_io::split(one);
    let (rx2, tx2) = tokio_io::split(two);
    (comms::channel(rx1, tx1), comms::channel(rx2, tx2))
}

fn mk_spec(worker_id: usize, workers: usize) -> WorkerSpec {
    WorkerSpec {
        worker_id,
        workers: NonZeroUsize::new(workers).unwrap(),
        plane: PlaneSpec {
            width: 8,
            height: 6,
            max_iters: 50,
            xmin: -2.5,
            xmax: 1.5,
            ymin: -2.0,
            ymax: 2.0,
        },
    }
}

fn mk_plane() -> ImagePlane {
    ImagePlane::new(8, 6, 50, -2.5, 1.5, -2.0, 2.0).unwrap()
}

fn spawn_worker(
    mut rx: MrfReceiver<ReadHalf<DuplexStream>>,
    tx: MrfSender<WriteHalf<DuplexStream>>,
) -> tokio::task::JoinHandle<worker::Result<()>> {
    tokio::spawn(async move {
        let Some(spec) = WorkerBuilder::handshake(&mut rx).await? else {
            return Ok(());
        };

        let worker = WorkerBuilder::build(&spec)?;
        worker.run(rx, tx).await
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn worker_sends_the_slice_for_its_rank() -> io::Result<()> {
    let ((mut orch_rx, mut orch_tx), (wk_rx, wk_tx)) = channel_pair();
    let worker_task = spawn_worker(wk_rx, wk_tx);

    let spec = mk_spec(0, 2);
    orch_tx
        .send(&Msg::Control(Command::CreateWorker(spec)))
        .await?;

    let expected = render_rows(&mk_plane(), 0..3);

    let mut buf: Vec<u32> = Vec::new();
    match orch_rx.recv_into(&mut buf).await? {
        Msg::Data(Payload::Slice { worker_id, cells }) => {
            assert_eq!(worker_id, 0);
            assert_eq!(cells, expected);
        }
        other => panic!("unexpected msg: {other:?}"),
    }

    // Rank 0 of 2 owns no tail; the next frame is the disconnect.
    let msg: Msg = orch_rx.recv_into(&mut buf).await?;
    assert_eq!(msg, Msg::Control(Command::Disconnect));

    orch_tx.send(&Msg::Control(Command::Disconnect)).await?;
    worker_task.await.unwrap()?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn last_rank_sends_the_remainder_after_its_slice() -> io::Result<()> {
    let ((mut orch_rx, mut orch_tx), (wk_rx, wk_tx)) = channel_pair();
    let worker_task = spawn_worker(wk_rx, wk_tx);

    // 6 rows over 4 workers: one row each, rows 4..6 left for rank 3.
    let spec = mk_spec(3, 4);
    orch_tx
        .send(&Msg::Control(Command::CreateWorker(spec)))
        .await?;

    let plane = mk_plane();
    let part = Partition::plan(6, NonZeroUsize::new(4).unwrap(), 3).unwrap();
    let expected_slice = render_rows(&plane, part.rows());
    let expected_tail = render_rows(&plane, part.remainder_rows());

    let mut buf: Vec<u32> = Vec::new();
    match orch_rx.recv_into(&mut buf).await? {
        Msg::Data(Payload::Slice { worker_id, cells }) => {
            assert_eq!(worker_id, 3);
            assert_eq!(cells, expected_slice);
        }
        other => panic!("unexpected msg: {other:?}"),
    }

    match orch_rx.recv_into(&mut buf).await? {
        Msg::Data(Payload::Remainder { worker_id, cells }) => {
            assert_eq!(worker_id, 3);
            assert_eq!(cells, expected_tail);
        }
        other => panic!("unexpected msg: {other:?}"),
    }

    let msg: Msg = orch_rx.recv_into(&mut buf).await?;
    assert_eq!(msg, Msg::Control(Command::Disconnect));

    orch_tx.send(&Msg::Control(Command::Disconnect)).await?;
    worker_task.await.unwrap()?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn zero_row_rank_sends_an_empty_slice() -> io::Result<()> {
    let ((mut orch_rx, mut orch_tx), (wk_rx, wk_tx)) = channel_pair();
    let worker_task = spawn_worker(wk_rx, wk_tx);

    // 10 workers for 6 rows: every primary band is empty.
    let spec = mk_spec(2, 10);
    orch_tx
        .send(&Msg::Control(Command::CreateWorker(spec)))
        .await?;

    let mut buf: Vec<u32> = Vec::new();
    match orch_rx.recv_into(&mut buf).await? {
        Msg::Data(Payload::Slice { worker_id, cells }) => {
            assert_eq!(worker_id, 2);
            assert!(cells.is_empty());
        }
        other => panic!("unexpected msg: {other:?}"),
    }

    let msg: Msg = orch_rx.recv_into(&mut buf).await?;
    assert_eq!(msg, Msg::Control(Command::Disconnect));

    orch_tx.send(&Msg::Control(Command::Disconnect)).await?;
    worker_task.await.unwrap()?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn zero_row_last_rank_still_owns_the_whole_tail() -> io::Result<()> {
    let ((mut orch_rx, mut orch_tx), (wk_rx, wk_tx)) = channel_pair();
    let worker_task = spawn_worker(wk_rx, wk_tx);

    let spec = mk_spec(9, 10);
    orch_tx
        .send(&Msg::Control(Command::CreateWorker(spec)))
        .await?;

    let expected_tail = render_rows(&mk_plane(), 0..6);

    let mut buf: Vec<u32> = Vec::new();
    match orch_rx.recv_into(&mut buf).await? {
        Msg::Data(Payload::Slice { worker_id, cells }) => {
            assert_eq!(worker_id, 9);
            assert!(cells.is_empty());
        }
        other => panic!("unexpected msg: {other:?}"),
    }

    match orch_rx.recv_into(&mut buf).await? {
        Msg::Data(Payload::Remainder { worker_id, cells }) => {
            assert_eq!(worker_id, 9);
            assert_eq!(cells, expected_tail);
        }
        other => panic!("unexpected msg: {other:?}"),
    }

    let msg: Msg = orch_rx.recv_into(&mut buf).await?;
    assert_eq!(msg, Msg::Control(Command::Disconnect));

    orch_tx.send(&Msg::Control(Command::Disconnect)).await?;
    worker_task.await.unwrap()?;
    Ok(())
}
