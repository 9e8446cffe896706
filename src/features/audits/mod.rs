//! Audit execution and reporting feature.

pub(crate) mod client;
pub(crate) mod types;
