//! Fallback instances, error categorization and canonical format fixtures.

pub(crate) mod category;
pub(crate) mod fixtures;
pub(crate) mod resolver;
