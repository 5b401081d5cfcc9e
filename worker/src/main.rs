use std::{borrow::Cow, env, io};

use comms::msg::Msg;
use log::{error, info};
use tokio::{net::TcpListener, signal};

use worker::WorkerBuilder;

const DEFAULT_HOST: &str = "127.0.0.1";

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let addr = format!(
        "{}:{}",
        env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
        env::var("PORT").map_err(io::Error::other)?,
    );

    let list = TcpListener::bind(&addr).await?;
    info!("listening at {addr}");

    let (stream, addr) = list.accept().await?;
    let (rx, tx) = stream.into_split();
    let (mut rx, mut tx) = comms::channel(rx, tx);
    info!("orchestrator connected from {addr}");

    let Some(spec) = WorkerBuilder::handshake(&mut rx).await? else {
        info!("orchestrator disconnected before bootstrap");
        return Ok(());
    };

    let worker = match WorkerBuilder::build(&spec) {
        Ok(worker) => worker,
        Err(e) => {
            error!("rejected bootstrap spec: {e}");
            tx.send(&Msg::Err(Cow::Owned(e.to_string()))).await?;
            return Err(e.into());
        }
    };

    tokio::select! {
        ret = worker.run(rx, tx) => {
            ret?;
            info!("wrapping up, disconnecting...");
        }
        _ = signal::ctrl_c() => {
            info!("received SIGTERM");
        }
    }

    Ok(())
}
