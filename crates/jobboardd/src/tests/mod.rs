//! Test suites for the job board server.

mod protocol_behaviour;
mod support;
