//! Test support for `pushwire`.
//!
//! Provides dispatchers that record or fail deliveries, helpers that build
//! raw chunks without going through [`Chunker`](pushwire::Chunker), and a
//! serialised [`logtest`] capture fixture.
//!
//! ```rust
//! use pushwire::PushReceiver;
//! use pushwire_testing::{RecordingDispatcher, message_chunks};
//!
//! let mut receiver = PushReceiver::new(RecordingDispatcher::default());
//! for chunk in message_chunks(1, b"app\nsink\nhi", 4) {
//!     receiver.on_chunk(chunk);
//! }
//! assert_eq!(receiver.dispatcher().messages().len(), 1);
//! ```

pub mod chunks;
pub mod dispatch;
pub mod logging;

pub use chunks::{chunk, message_chunks, split_at};
pub use dispatch::{FailingDispatcher, PanickingDispatcher, RecordingDispatcher};
pub use logging::{LoggerHandle, logger};
