pub mod configs;
pub mod error;
pub mod session;

use std::fmt::Display;

use tokio::{
    net::{TcpStream, ToSocketAddrs},
    runtime::Runtime,
};

pub use configs::RenderConfig;
pub use error::OrchestratorError;
pub use session::Session;

/// Renders the configured frame across the worker fleet and returns the
/// assembled row-major iteration counts.
///
/// Synchronous entrypoint: owns the runtime the session runs on. The config
/// is validated before anything is connected.
///
/// # Errors
/// Returns an `OrchestratorError` if the config is degenerate, connecting to
/// any worker fails, or the gather protocol is violated.
pub fn render<A>(config: RenderConfig<A>) -> Result<Vec<u32>, OrchestratorError>
where
    A: ToSocketAddrs + Display,
{
    let plane = config.plane()?;
    log::info!("connecting to {} worker(s)", config.worker_addrs.len());

    let runtime = Runtime::new()?;
    runtime.block_on(async move {
        let mut channels = Vec::with_capacity(config.worker_addrs.len());

        for addr in &config.worker_addrs {
            let stream = TcpStream::connect(addr).await.map_err(|source| {
                OrchestratorError::ConnectionFailed {
                    addr: addr.to_string(),
                    source,
                }
            })?;
            let (rx, tx) = stream.into_split();
            channels.push(comms::channel(rx, tx));
        }

        let mut session = Session::new(channels, plane)?;
        session.dispatch().await?;
        session.gather().await
    })
}
