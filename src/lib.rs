pub mod input;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod session;
pub mod tracing;

#[cfg(test)]
#[path = "../tests/src_inline/testkit.rs"]
pub(crate) mod testkit;
