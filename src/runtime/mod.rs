//! Runtime adapters for driving the scheduler from synchronous code.

pub mod cooperative;

pub use cooperative::{run_blocking, CooperativeRuntime};
