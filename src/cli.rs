//! Command line interface for the `pushwire` binary.
//!
//! Kept free of crate imports so the build script can render a man page from
//! it.

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Command line arguments for the `pushwire` binary.
#[derive(Debug, Parser)]
#[command(
    name = "pushwire",
    version,
    about = "Reassemble hex-encoded message chunks and forward complete messages"
)]
pub struct Cli {
    /// File of hex-encoded chunks, one per line. Reads standard input when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Program run once per message; messages are printed when omitted.
    #[arg(short, long, value_name = "PROGRAM")]
    pub exec: Option<PathBuf>,

    /// Prefix joined with each destination to form the target service name.
    #[arg(long, default_value = "io.pushwire.ExtAppMsg")]
    pub service_base: String,

    /// Object path messages are delivered to.
    #[arg(long, default_value = "/io/pushwire/ExtAppMsg")]
    pub object_path: String,

    /// Interface exposing the delivery method.
    #[arg(long, default_value = "io.pushwire.ExtAppMsg")]
    pub interface: String,

    /// Delivery method name.
    #[arg(long, default_value = "pushMessage")]
    pub method: String,

    /// Discard partial messages that receive no chunk for this many seconds.
    #[arg(long, value_name = "SECONDS")]
    pub idle_timeout: Option<u64>,

    /// Largest declared message size to buffer, in bytes.
    #[arg(
        long,
        default_value_t = 65_536,
        value_parser = clap::value_parser!(u32).range(1..=65_536)
    )]
    pub max_message_size: u32,

    /// Resize the buffer when a chunk changes its message's declared size,
    /// instead of discarding the message.
    #[arg(long)]
    pub allow_resize: bool,

    /// Serve Prometheus metrics on this address.
    #[arg(long, value_name = "ADDR")]
    pub metrics_listen: Option<SocketAddr>,
}
