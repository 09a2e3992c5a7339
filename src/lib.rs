//! `stepviz` turns loosely-typed algorithm step payloads into canonical, validated,
//! laid-out visualization data.
//!
//! The pipeline per step is: classify the payload into a [`CanonicalType`], validate
//! and sanitize it into [`SanitizedData`] while collecting edge cases and pitfalls,
//! project it onto the renderer's slim shape, and lay out trees and graphs. A payload
//! that cannot be used is replaced by a minimal instance from the fallback resolver,
//! so every step always has something renderable.
//!
//! [`VisualizationEngine`] runs the pipeline over a step sequence with per-step
//! memoization and drives force-layout animation one frame at a time.
#![forbid(unsafe_code)]

pub(crate) mod classify;
pub(crate) mod engine;
pub(crate) mod fallback;
pub(crate) mod foundation;
pub(crate) mod layout;
pub(crate) mod model;
pub(crate) mod normalize;
pub(crate) mod validate;

pub use classify::classifier::{Classification, ClassifierConfig, TypeClassifier};
pub use classify::flags::{Presence, StructureFlags};
pub use engine::{
    FallbackNotice, PipelineConfig, RenderBundle, StepBundle, StepCache, VisualizationEngine,
};
pub use fallback::category::ErrorCategory;
pub use fallback::fixtures::expected_format;
pub use fallback::resolver::{
    Explanation, FallbackResolution, fallback_instance, resolve, resolve_hint,
};
pub use foundation::error::{StepvizError, StepvizResult};
pub use foundation::rng::{JitterSource, NoJitter, Rng64};
pub use layout::{
    ForceLayoutConfig, ForceSimulation, FrameScheduler, FrameUpdate, LayoutResult,
    PositionedNode, SimulationState, TaskId, TreeLayoutConfig, layout_tree,
};
pub use model::canonical::CanonicalType;
pub use model::data::{
    ArrayData, ArrayEntity, ArrayOperation, CallFrame, Cell, ChildSide, DpData, GraphData,
    GraphEdge, GraphVertex, HashMapData, HighlightCategory, Highlights, HybridData,
    LinkedListData, ListNode, Operation, OperationKind, Pointer, RecursionData, ResultsData,
    SanitizedData, SequenceData, SequenceKind, StringData, TreeData, TreeEdge, TreeNode, Window,
};
pub use model::step::{Step, Visualization, steps_from_value};
pub use normalize::slim::{operation_label, slim};
pub use validate::{ValidationLimits, ValidationResult, validate, validate_with};
