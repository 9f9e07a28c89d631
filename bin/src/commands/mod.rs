//! CLI command implementations.

pub(crate) mod contracts;
pub(crate) mod fetch;
pub(crate) mod info;
pub(crate) mod plan;
