use std::collections::HashMap;

use kurbo::{Point, Vec2};

use crate::foundation::rng::JitterSource;
use crate::layout::{LayoutResult, PositionedNode};
use crate::model::data::GraphData;

/// Physics coefficients and canvas for the force-directed graph layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceLayoutConfig {
    pub width: f64,
    pub height: f64,
    /// Coulomb coefficient applied to every vertex pair.
    pub repulsion: f64,
    /// Hooke coefficient applied along edges.
    pub spring: f64,
    /// Edges shorter than this exert no attraction.
    pub rest_length: f64,
    pub damping: f64,
    /// Hard cap on iterations.
    pub max_iterations: usize,
    /// Simulation converges once the fastest vertex moves slower than this.
    pub stability_threshold: f64,
    /// Half-width of the initial placement square around the canvas centre.
    pub jitter_radius: f64,
    /// Vertices are clamped this far inside the canvas edges.
    pub padding: f64,
}

impl Default for ForceLayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            repulsion: 5000.0,
            spring: 0.05,
            rest_length: 100.0,
            damping: 0.85,
            max_iterations: 300,
            stability_threshold: 0.1,
            jitter_radius: 50.0,
            padding: 30.0,
        }
    }
}

/// Lifecycle of a [`ForceSimulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimulationState {
    Running,
    /// Max velocity dropped below the stability threshold.
    Converged,
    /// Hit `max_iterations`.
    Exhausted,
    Cancelled,
}

impl SimulationState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

// Repulsion is evaluated at no less than unit distance.
const MIN_DISTANCE_SQ: f64 = 1.0;
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Iterative force-directed layout, advanced one iteration per [`ForceSimulation::step`].
///
/// Vertex order follows `GraphData::vertices`. Given the same graph, config and jitter
/// sequence, every run produces identical positions.
#[derive(Clone, Debug)]
pub struct ForceSimulation {
    ids: Vec<String>,
    positions: Vec<Point>,
    velocities: Vec<Vec2>,
    edges: Vec<(usize, usize)>,
    config: ForceLayoutConfig,
    state: SimulationState,
    iteration: usize,
    max_velocity: f64,
}

impl ForceSimulation {
    /// Place vertices and prepare the simulation.
    ///
    /// Vertices with both coordinates keep them; the rest start at a jittered point
    /// around the canvas centre. A graph whose vertices are all placed explicitly, or
    /// that has no vertices, starts out converged.
    pub fn new(graph: &GraphData, config: ForceLayoutConfig, jitter: &mut dyn JitterSource) -> Self {
        let centre = Point::new(config.width / 2.0, config.height / 2.0);
        let mut all_explicit = true;
        let positions: Vec<Point> = graph
            .vertices
            .iter()
            .map(|v| match (v.x, v.y) {
                (Some(x), Some(y)) => Point::new(x, y),
                _ => {
                    all_explicit = false;
                    let dx = jitter.next_jitter() * config.jitter_radius;
                    let dy = jitter.next_jitter() * config.jitter_radius;
                    centre + Vec2::new(dx, dy)
                }
            })
            .collect();

        let index: HashMap<&str, usize> = graph
            .vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (v.id.as_str(), i))
            .collect();
        let edges = graph
            .edges
            .iter()
            .filter_map(|e| {
                let a = *index.get(e.from.as_str())?;
                let b = *index.get(e.to.as_str())?;
                (a != b).then_some((a, b))
            })
            .collect();

        let state = if all_explicit {
            SimulationState::Converged
        } else {
            SimulationState::Running
        };

        Self {
            ids: graph.vertices.iter().map(|v| v.id.clone()).collect(),
            velocities: vec![Vec2::ZERO; positions.len()],
            positions,
            edges,
            config,
            state,
            iteration: 0,
            max_velocity: 0.0,
        }
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Fastest vertex speed observed in the last iteration.
    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Advance one iteration. A finished or cancelled simulation is left untouched.
    pub fn step(&mut self) -> SimulationState {
        if self.state.is_terminal() {
            return self.state;
        }

        let forces = self.forces();
        let cfg = &self.config;
        let (min_x, max_x) = (cfg.padding, (cfg.width - cfg.padding).max(cfg.padding));
        let (min_y, max_y) = (cfg.padding, (cfg.height - cfg.padding).max(cfg.padding));

        let mut max_velocity = 0.0f64;
        for ((pos, vel), force) in self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(forces)
        {
            *vel = (*vel + force) * cfg.damping;
            *pos += *vel;
            pos.x = pos.x.clamp(min_x, max_x);
            pos.y = pos.y.clamp(min_y, max_y);
            max_velocity = max_velocity.max(vel.x.hypot(vel.y));
        }
        self.max_velocity = max_velocity;
        self.iteration += 1;

        if max_velocity < cfg.stability_threshold {
            self.state = SimulationState::Converged;
        } else if self.iteration >= cfg.max_iterations {
            self.state = SimulationState::Exhausted;
        }
        if self.state.is_terminal() {
            tracing::debug!(
                state = ?self.state,
                iteration = self.iteration,
                max_velocity,
                "force simulation finished"
            );
        }
        self.state
    }

    /// Stop the simulation. Idempotent; a simulation that already finished keeps its
    /// terminal state.
    pub fn cancel(&mut self) {
        if self.state == SimulationState::Running {
            self.state = SimulationState::Cancelled;
        }
    }

    /// Step until a terminal state. Returns the number of iterations taken.
    pub fn run_to_end(&mut self) -> usize {
        let start = self.iteration;
        while !self.step().is_terminal() {}
        self.iteration - start
    }

    /// Current positions over the configured canvas.
    pub fn layout(&self) -> LayoutResult {
        LayoutResult {
            positions: self
                .ids
                .iter()
                .zip(&self.positions)
                .map(|(id, p)| PositionedNode {
                    id: id.clone(),
                    position: *p,
                })
                .collect(),
            content_width: self.config.width,
            content_height: self.config.height,
        }
    }

    fn forces(&self) -> Vec<Vec2> {
        let n = self.positions.len();
        let mut forces = vec![Vec2::ZERO; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let mut delta = self.positions[i] - self.positions[j];
                let mut dist_sq = delta.x * delta.x + delta.y * delta.y;
                if dist_sq < MIN_DISTANCE_SQ {
                    // Near-coincident vertices: push apart along a pair-specific direction.
                    let angle = (i * n + j) as f64 * GOLDEN_ANGLE;
                    delta = Vec2::new(angle.cos(), angle.sin());
                    dist_sq = MIN_DISTANCE_SQ;
                }
                let dist = dist_sq.sqrt();
                let push = delta * (self.config.repulsion / (dist_sq * dist));
                forces[i] += push;
                forces[j] -= push;
            }
        }

        for &(a, b) in &self.edges {
            let delta = self.positions[b] - self.positions[a];
            let dist = delta.x.hypot(delta.y);
            if dist <= self.config.rest_length {
                continue;
            }
            let pull = delta * (self.config.spring * (dist - self.config.rest_length) / dist);
            forces[a] += pull;
            forces[b] -= pull;
        }

        forces
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/force.rs"]
mod tests;
