//! Line-protocol request dispatch.
//!
//! Clients send a decimal command code on one line. Commands that carry data
//! are followed by a second, pipe-delimited payload line:
//!
//! ```text
//! 200
//! Engineer|Acme|Remote|Build things|Go,SQL|100k-120k
//! ```
//!
//! Every request is answered with the response body, one wire line per body
//! line, followed by the `END_RESPONSE` sentinel:
//!
//! ```text
//! Job posted successfully with ID: JOB1
//! END_RESPONSE
//! ```
//!
//! Failures never change the frame shape; they are reported as an
//! `Error: ...` body line and the connection stays open.

mod errors;
mod format;
mod handler;
mod processor;
mod session;

pub use self::errors::{CommandError, DispatchError};
pub use self::handler::DispatchConnectionHandler;
pub use self::processor::CommandProcessor;

pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");
