use std::{env, str::FromStr};

use orchestrator::{OrchestratorError, RenderConfig};

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;
const DEFAULT_MAX_ITERS: u32 = 1000;
const DEFAULT_VIEWPORT: (f64, f64, f64, f64) = (-2.5, 1.5, -2.0, 2.0);

fn main() -> Result<(), OrchestratorError> {
    env_logger::init();

    let worker_addrs: Vec<String> = env::var("WORKERS")
        .map_err(|_| {
            OrchestratorError::InvalidConfig(
                "WORKERS must list the worker addresses, comma separated".to_string(),
            )
        })?
        .split(',')
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .map(str::to_string)
        .collect();

    let (xmin, xmax, ymin, ymax) = DEFAULT_VIEWPORT;
    let config = RenderConfig {
        worker_addrs,
        width: env_or("WIDTH", DEFAULT_WIDTH)?,
        height: env_or("HEIGHT", DEFAULT_HEIGHT)?,
        max_iters: env_or("MAX_ITERS", DEFAULT_MAX_ITERS)?,
        xmin: env_or("XMIN", xmin)?,
        xmax: env_or("XMAX", xmax)?,
        ymin: env_or("YMIN", ymin)?,
        ymax: env_or("YMAX", ymax)?,
    };

    let (width, height, max_iters) = (config.width, config.height, config.max_iters);
    let cells = orchestrator::render(config)?;

    let interior = cells.iter().filter(|&&c| c == max_iters).count();
    println!(
        "rendered {width}x{height} frame: {} cells, {interior} interior",
        cells.len()
    );

    Ok(())
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T, OrchestratorError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| OrchestratorError::InvalidConfig(format!("{key} must be numeric"))),
        Err(_) => Ok(default),
    }
}
