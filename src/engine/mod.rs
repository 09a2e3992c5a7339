//! Step-sequence pipeline: classification, validation, normalization and layout per
//! step, memoized per engine instance, plus graph animation driving.

pub(crate) mod bundle;
pub(crate) mod cache;
pub(crate) mod config;
pub(crate) mod sequence;
pub(crate) mod session;

pub use bundle::{FallbackNotice, RenderBundle, StepBundle};
pub use cache::StepCache;
pub use config::PipelineConfig;
pub use session::VisualizationEngine;
