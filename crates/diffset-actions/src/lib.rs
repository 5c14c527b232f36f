//! GitHub Actions runtime glue.
//!
//! Reads the runner's event context into the change-event model and writes
//! results back out through the step-output protocol.

pub mod context;
pub mod outputs;
