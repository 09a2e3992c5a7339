//! Renderer-facing projections of sanitized data.

pub(crate) mod slim;
