use serde_json::Value;

use crate::classify::classifier::TypeClassifier;
use crate::engine::bundle::{StepBundle, compute_bundle, graph_of, graph_simulation};
use crate::engine::cache::StepCache;
use crate::engine::config::PipelineConfig;
use crate::engine::sequence::sequence_warnings;
use crate::foundation::error::{StepvizError, StepvizResult};
use crate::layout::{ForceSimulation, FrameScheduler, FrameUpdate, LayoutResult, TaskId};
use crate::model::step::{Step, steps_from_value};

/// Owns one step sequence for the life of a visualization session.
///
/// Bundles are computed lazily on first access and cached; a graph step can be
/// animated one force iteration per [`tick_frame`](Self::tick_frame). Switching steps
/// or dropping the engine cancels any running animation.
#[derive(Debug)]
pub struct VisualizationEngine {
    steps: Vec<Step>,
    config: PipelineConfig,
    classifier: TypeClassifier,
    cache: StepCache,
    scheduler: FrameScheduler,
    animation: Option<(usize, TaskId)>,
    current: Option<usize>,
}

impl VisualizationEngine {
    pub fn new(steps: Vec<Step>, config: PipelineConfig) -> StepvizResult<Self> {
        config.validate()?;
        Ok(Self {
            cache: StepCache::with_len(steps.len()),
            classifier: TypeClassifier::new(config.classifier.clone()),
            steps,
            config,
            scheduler: FrameScheduler::new(),
            animation: None,
            current: None,
        })
    }

    /// Load steps from JSON: an array of steps or `{ "steps": [...] }`.
    pub fn from_json_str(s: &str, config: PipelineConfig) -> StepvizResult<Self> {
        let v: Value = serde_json::from_str(s)?;
        let well_formed = match &v {
            Value::Array(_) => true,
            Value::Object(map) => map.get("steps").is_some_and(Value::is_array),
            _ => false,
        };
        if !well_formed {
            return Err(StepvizError::validation(
                "expected a JSON array of steps or an object with a `steps` array",
            ));
        }
        Self::new(steps_from_value(v), config)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn cache(&self) -> &StepCache {
        &self.cache
    }

    /// Index last passed to [`select_step`](Self::select_step).
    pub fn current_step(&self) -> Option<usize> {
        self.current
    }

    /// Bundle for step `index`, computed on first access.
    pub fn bundle(&mut self, index: usize) -> StepvizResult<&StepBundle> {
        let len = self.steps.len();
        let step = self
            .steps
            .get(index)
            .ok_or(StepvizError::StepOutOfRange { index, len })?;
        let (classifier, config) = (&self.classifier, &self.config);
        self.cache
            .get_or_compute(index, || compute_bundle(index, step, classifier, config))
            .ok_or(StepvizError::StepOutOfRange { index, len })
    }

    /// Make `index` the current step. Any running animation is cancelled first.
    pub fn select_step(&mut self, index: usize) -> StepvizResult<&StepBundle> {
        if index >= self.steps.len() {
            return Err(StepvizError::StepOutOfRange {
                index,
                len: self.steps.len(),
            });
        }
        self.cancel_animation();
        self.current = Some(index);
        self.bundle(index)
    }

    /// Start animating the force layout of graph step `index`, replacing any running
    /// animation. The first frame matches the bundle's cached layout.
    pub fn animate_graph(&mut self, index: usize) -> StepvizResult<TaskId> {
        self.cancel_animation();
        let sim = self.simulation_for(index)?;
        let id = self.scheduler.schedule(sim);
        self.animation = Some((index, id));
        tracing::debug!(index, task = id.0, "graph animation scheduled");
        Ok(id)
    }

    /// Advance the running animation by one frame.
    pub fn tick_frame(&mut self) -> Vec<FrameUpdate> {
        self.scheduler.tick()
    }

    /// Positions of the running (or just finished) animation.
    pub fn animation_layout(&self) -> Option<LayoutResult> {
        let (_, id) = self.animation?;
        self.scheduler.get(id).map(|sim| sim.layout())
    }

    pub fn is_animating(&self) -> bool {
        !self.scheduler.is_idle()
    }

    /// Stop the running animation, if any. Idempotent.
    pub fn cancel_animation(&mut self) -> bool {
        match self.animation.take() {
            Some((_, id)) => self.scheduler.cancel(id),
            None => false,
        }
    }

    /// Run the force layout of graph step `index` to completion without animating.
    pub fn settle_graph(&mut self, index: usize) -> StepvizResult<LayoutResult> {
        let mut sim = self.simulation_for(index)?;
        let iterations = sim.run_to_end();
        tracing::debug!(index, iterations, state = ?sim.state(), "graph layout settled");
        Ok(sim.layout())
    }

    /// Ordering problems in the loaded sequence (empty, duplicate or out-of-order
    /// step numbers).
    pub fn sequence_warnings(&self) -> Vec<String> {
        sequence_warnings(&self.steps)
    }

    fn simulation_for(&mut self, index: usize) -> StepvizResult<ForceSimulation> {
        self.bundle(index)?;
        let len = self.steps.len();
        let bundle = self
            .cache
            .get(index)
            .ok_or(StepvizError::StepOutOfRange { index, len })?;
        let graph = graph_of(&bundle.validation.sanitized_data).ok_or_else(|| {
            StepvizError::layout(format!(
                "step {index} has no graph to lay out (type '{}')",
                bundle.canonical_type
            ))
        })?;
        Ok(graph_simulation(graph, index, &self.config))
    }
}

impl Drop for VisualizationEngine {
    fn drop(&mut self) {
        self.animation = None;
        self.scheduler.cancel_all();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/session.rs"]
mod tests;
