//! Wire contract shared by the job board server and its clients.
//!
//! A client sends one line holding a decimal command code. Commands that
//! mutate state with attached data are followed by exactly one payload line.
//! The server answers with one or more body lines terminated by the
//! [`RESPONSE_SENTINEL`] line.
//!
//! - [`codes`] holds the command code table and its classification.
//! - [`payload`] encodes and decodes the `|`-separated payload fields.
//! - [`frame`] writes and reads sentinel-terminated response frames.

pub mod codes;
pub mod frame;
pub mod payload;

pub use codes::{ApplicationStatus, Command, CommandClass, Role, classify, name};
pub use frame::{RESPONSE_SENTINEL, read_response, write_request, write_response};
pub use payload::{ApplicationPayload, JobPostingPayload, PayloadError};
