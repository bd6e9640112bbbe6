//! `pushwire` binary: feeds hex-encoded chunks to a [`PushReceiver`].
//!
//! Each non-empty line of input that does not start with `#` is one chunk, as
//! the transport would have delivered it.

mod cli;

use std::{error::Error, num::NonZeroUsize, time::Duration};

use clap::Parser;
use pushwire::{
    CommandDispatcher,
    Dispatch,
    DispatchConfig,
    PushReceiver,
    ReassemblyConfig,
    SizeRedeclaration,
    StdoutDispatcher,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Log records from the library are bridged into the subscriber; stdout is
    // reserved for dispatched messages.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    install_metrics(&cli)?;

    let dispatch_config = DispatchConfig {
        service_base: cli.service_base.clone(),
        object_path: cli.object_path.clone(),
        interface: cli.interface.clone(),
        method: cli.method.clone(),
    };
    let dispatcher: Box<dyn Dispatch> = match &cli.exec {
        Some(program) => Box::new(CommandDispatcher::new(program, dispatch_config)),
        None => Box::new(StdoutDispatcher::new(dispatch_config)),
    };
    let mut receiver = PushReceiver::with_config(reassembly_config(&cli), dispatcher);

    match &cli.input {
        Some(path) => {
            let file = tokio::fs::File::open(path).await?;
            feed(BufReader::new(file), &mut receiver).await?;
        }
        None => feed(BufReader::new(tokio::io::stdin()), &mut receiver).await?,
    }
    Ok(())
}

fn reassembly_config(cli: &cli::Cli) -> ReassemblyConfig {
    let mut config = ReassemblyConfig::default();
    if let Some(limit) = usize::try_from(cli.max_message_size)
        .ok()
        .and_then(NonZeroUsize::new)
    {
        config = config.with_max_message_size(limit);
    }
    if let Some(seconds) = cli.idle_timeout {
        config = config.with_idle_timeout(Duration::from_secs(seconds));
    }
    if cli.allow_resize {
        config = config.with_size_redeclaration(SizeRedeclaration::Resize);
    }
    config
}

async fn feed<R, D>(reader: R, receiver: &mut PushReceiver<D>) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    D: Dispatch,
{
    let mut lines = reader.lines();
    let mut line_number = 0_usize;
    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match hex::decode(line) {
            Ok(chunk) => receiver.on_chunk(chunk),
            Err(err) => tracing::warn!(line = line_number, error = %err, "skipping non-hex input line"),
        }
    }
    tracing::debug!(lines = line_number, "input exhausted");
    Ok(())
}

#[cfg(feature = "metrics")]
fn install_metrics(cli: &cli::Cli) -> Result<(), Box<dyn Error>> {
    if let Some(addr) = cli.metrics_listen {
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()?;
        tracing::info!(%addr, "serving prometheus metrics");
    }
    Ok(())
}

#[cfg(not(feature = "metrics"))]
fn install_metrics(cli: &cli::Cli) -> Result<(), Box<dyn Error>> {
    if cli.metrics_listen.is_some() {
        tracing::warn!("--metrics-listen ignored: built without the metrics feature");
    }
    Ok(())
}
