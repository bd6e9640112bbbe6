#![doc(html_root_url = "https://docs.rs/pushwire/latest")]
//! Reassembly of chunked push messages.
//!
//! Messages larger than a transport's MTU arrive as a sequence of chunks, each
//! carrying a small header (see [`chunk`]). A [`ChunkReassembler`] stitches
//! them back together, [`frame::parse`] splits the body into source,
//! destination, and payload, and a [`Dispatch`] implementation forwards the
//! result. [`PushReceiver`] wires the three together behind a single
//! `on_chunk` entry point.

pub mod byte_order;
pub mod chunk;
pub mod dispatch;
pub mod frame;
pub mod metrics;
pub mod panic;
pub mod reassembler;
pub mod receiver;

pub use chunk::{Chunk, ChunkError, ChunkHeader, Chunker, SessionTag};
pub use dispatch::{CommandDispatcher, Dispatch, DispatchConfig, DispatchError, StdoutDispatcher};
pub use frame::{FrameError, ParsedMessage};
pub use reassembler::{
    ChunkReassembler,
    ReassembledMessage,
    ReassemblyConfig,
    ReassemblyError,
    SizeRedeclaration,
};
pub use receiver::{ChunkOutcome, PushReceiver};
