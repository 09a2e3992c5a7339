pub(crate) mod canonical;
pub(crate) mod data;
pub(crate) mod step;
