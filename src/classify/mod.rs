//! Canonical type classification of raw visualization payloads.
//!
//! An explicit hint wins only when the payload actually carries the hint's required
//! marker; otherwise the structural heuristics decide.

pub(crate) mod classifier;
pub(crate) mod flags;
