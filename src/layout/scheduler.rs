use std::collections::BTreeMap;

use crate::layout::force::{ForceSimulation, SimulationState};

/// Handle for a simulation owned by a [`FrameScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct TaskId(pub u64);

/// Progress of one task during a single [`FrameScheduler::tick`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameUpdate {
    pub task: TaskId,
    pub iteration: usize,
    pub max_velocity: f64,
    pub state: SimulationState,
}

/// Cooperative per-frame driver for force simulations.
///
/// Each `tick` is one animation frame: every running task advances by exactly one
/// iteration, in ascending `TaskId` order. Finished tasks stay available for reading
/// until taken; cancelled tasks are dropped immediately and never stepped again.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    tasks: BTreeMap<TaskId, ForceSimulation>,
    next_id: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, sim: ForceSimulation) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(id, sim);
        id
    }

    /// Advance every running task by one iteration.
    pub fn tick(&mut self) -> Vec<FrameUpdate> {
        let mut out = Vec::new();
        for (&task, sim) in self.tasks.iter_mut() {
            if sim.is_finished() {
                continue;
            }
            let state = sim.step();
            out.push(FrameUpdate {
                task,
                iteration: sim.iteration(),
                max_velocity: sim.max_velocity(),
                state,
            });
        }
        out
    }

    /// Cancel and drop a task. Returns `false` when the id is unknown or already gone.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.tasks.remove(&id) {
            Some(mut sim) => {
                sim.cancel();
                tracing::debug!(task = id.0, iteration = sim.iteration(), "animation cancelled");
                true
            }
            None => false,
        }
    }

    /// Cancel and drop every task. Returns how many were removed.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.tasks.len();
        for (_, mut sim) in std::mem::take(&mut self.tasks) {
            sim.cancel();
        }
        if n > 0 {
            tracing::debug!(count = n, "all animations cancelled");
        }
        n
    }

    pub fn get(&self, id: TaskId) -> Option<&ForceSimulation> {
        self.tasks.get(&id)
    }

    /// Remove a task, finished or not, handing its simulation back.
    pub fn take(&mut self, id: TaskId) -> Option<ForceSimulation> {
        self.tasks.remove(&id)
    }

    /// Number of tasks that will advance on the next tick.
    pub fn running(&self) -> usize {
        self.tasks.values().filter(|s| !s.is_finished()).count()
    }

    pub fn is_idle(&self) -> bool {
        self.running() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/scheduler.rs"]
mod tests;
