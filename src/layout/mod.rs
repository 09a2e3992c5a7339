//! Spatial layout for trees and graphs.
//!
//! Tree layout is a pure recursive placement. Graph layout is a force simulation
//! advanced one iteration at a time, either by the [`FrameScheduler`] or run to
//! completion.

use kurbo::Point;

pub(crate) mod force;
pub(crate) mod scheduler;
pub(crate) mod tree;

pub use force::{ForceLayoutConfig, ForceSimulation, SimulationState};
pub use scheduler::{FrameScheduler, FrameUpdate, TaskId};
pub use tree::{TreeLayoutConfig, layout_tree};

/// One node or vertex with its computed position.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    pub id: String,
    pub position: Point,
}

/// Layout output: every input node positioned, plus the content extent.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub positions: Vec<PositionedNode>,
    pub content_width: f64,
    pub content_height: f64,
}

impl LayoutResult {
    pub fn position_of(&self, id: &str) -> Option<Point> {
        self.positions
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.position)
    }
}
