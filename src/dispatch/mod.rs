//! Delivery of validated messages to their destination.
//!
//! The [`Dispatch`] trait is the only seam between the receiver and whatever
//! ultimately consumes a message. Dispatchers are passed in explicitly and
//! resolve their target per message through [`DispatchConfig`], so a single
//! receiver can serve any number of destinations.

mod command;
mod error;
mod stdout;
mod target;

use std::{rc::Rc, sync::Arc};

pub use self::{
    command::CommandDispatcher,
    error::DispatchError,
    stdout::StdoutDispatcher,
    target::{DispatchConfig, DispatchTarget},
};
use crate::frame::ParsedMessage;

/// Forwards validated messages to their destination.
///
/// The receiver invokes `forward` at most once per reassembled message and
/// never retries. Failures are logged by the caller and otherwise dropped;
/// there is no channel back to the sender.
///
/// # Examples
///
/// ```
/// use pushwire::{
///     dispatch::{Dispatch, DispatchError},
///     frame::ParsedMessage,
/// };
///
/// struct Discard;
///
/// impl Dispatch for Discard {
///     fn forward(&self, _message: &ParsedMessage) -> Result<(), DispatchError> { Ok(()) }
/// }
/// ```
pub trait Dispatch {
    /// Deliver `message` to the target named by its destination.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] when the target cannot be reached or
    /// refuses the message.
    fn forward(&self, message: &ParsedMessage) -> Result<(), DispatchError>;
}

impl<T: Dispatch + ?Sized> Dispatch for &T {
    fn forward(&self, message: &ParsedMessage) -> Result<(), DispatchError> {
        (**self).forward(message)
    }
}

impl<T: Dispatch + ?Sized> Dispatch for Box<T> {
    fn forward(&self, message: &ParsedMessage) -> Result<(), DispatchError> {
        (**self).forward(message)
    }
}

impl<T: Dispatch + ?Sized> Dispatch for Rc<T> {
    fn forward(&self, message: &ParsedMessage) -> Result<(), DispatchError> {
        (**self).forward(message)
    }
}

impl<T: Dispatch + ?Sized> Dispatch for Arc<T> {
    fn forward(&self, message: &ParsedMessage) -> Result<(), DispatchError> {
        (**self).forward(message)
    }
}
