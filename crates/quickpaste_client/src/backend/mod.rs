//! Background worker that performs network I/O for a page session.
//!
//! The session sends [`ClientCmd`] values and polls [`ClientEvent`] values, so
//! the caller's loop never blocks on the network.

mod protocol;
mod worker;

pub use protocol::{ClientCmd, ClientEvent};
pub use worker::{spawn_backend, BackendHandle};
