pub(crate) mod error;
pub(crate) mod json;
pub(crate) mod rng;
