use serde_json::Value;

use crate::classify::classifier::{Classification, TypeClassifier};
use crate::engine::config::PipelineConfig;
use crate::fallback::category::ErrorCategory;
use crate::fallback::resolver::{Explanation, resolve};
use crate::foundation::rng::Rng64;
use crate::layout::{ForceSimulation, LayoutResult, layout_tree};
use crate::model::canonical::CanonicalType;
use crate::model::data::{GraphData, SanitizedData};
use crate::model::step::Step;
use crate::normalize::slim::slim;
use crate::validate::{ValidationResult, validate_with};

/// Shown in place of (or next to) a step whose payload failed validation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackNotice {
    pub category: ErrorCategory,
    pub explanation: Explanation,
}

/// Everything the pipeline computed for one step.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepBundle {
    pub index: usize,
    pub step_number: u64,
    pub canonical_type: CanonicalType,
    pub classification: Classification,
    pub validation: ValidationResult,
    pub slim_data: Value,
    /// Tree layout, or the initial placement of a graph's force simulation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutResult>,
    /// Producer-reported and detected edge cases, de-duplicated.
    pub edge_cases: Vec<String>,
    pub pitfalls: Vec<String>,
    /// Producer warnings, classifier notes, validator errors and warnings.
    pub validation_warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackNotice>,
}

/// Renderer-facing view over a [`StepBundle`].
#[derive(Clone, Copy, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderBundle<'a> {
    pub canonical_type: CanonicalType,
    pub sanitized_data: &'a SanitizedData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<&'a LayoutResult>,
    pub edge_cases: &'a [String],
    pub pitfalls: &'a [String],
    pub validation_warnings: &'a [String],
}

impl StepBundle {
    pub fn render(&self) -> RenderBundle<'_> {
        RenderBundle {
            canonical_type: self.canonical_type,
            sanitized_data: &self.validation.sanitized_data,
            layout: self.layout.as_ref(),
            edge_cases: &self.edge_cases,
            pitfalls: &self.pitfalls,
            validation_warnings: &self.validation_warnings,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_valid
    }

    /// The graph behind [`layout`](Self::layout), when the laid-out structure is a
    /// graph (directly or as the first spatial part of a hybrid).
    pub fn laid_out_graph(&self) -> Option<&GraphData> {
        graph_of(&self.validation.sanitized_data)
    }
}

/// Run one step through classify, validate, slim and layout.
#[tracing::instrument(skip_all, fields(index = index, step = step.step_number))]
pub(crate) fn compute_bundle(
    index: usize,
    step: &Step,
    classifier: &TypeClassifier,
    config: &PipelineConfig,
) -> StepBundle {
    let classification = classifier.classify(&step.visualization);
    let ty = classification.canonical;
    let validation = validate_with(ty, &step.visualization.data, &config.limits);
    let slim_data = slim(ty, &validation.sanitized_data);
    let layout = spatial_layout(&validation.sanitized_data, index, config);

    let mut edge_cases = step.edge_cases.clone();
    extend_unique(&mut edge_cases, &validation.edge_cases);
    let mut pitfalls = step.pitfalls.clone();
    extend_unique(&mut pitfalls, &validation.pitfalls);
    let mut validation_warnings = step.validation_warnings.clone();
    extend_unique(&mut validation_warnings, classification.mismatch.as_slice());
    extend_unique(&mut validation_warnings, &validation.errors);
    extend_unique(&mut validation_warnings, &validation.warnings);

    let fallback = (!validation.is_valid).then(|| {
        let r = resolve(ty, validation.errors.first().map(String::as_str));
        FallbackNotice {
            category: r.category,
            explanation: r.explanation,
        }
    });

    StepBundle {
        index,
        step_number: step.step_number,
        canonical_type: ty,
        classification,
        validation,
        slim_data,
        layout,
        edge_cases,
        pitfalls,
        validation_warnings,
        fallback,
    }
}

/// The part of a payload that gets laid out: the payload itself when spatial, or the
/// first spatial part of a hybrid.
fn spatial_part(data: &SanitizedData) -> Option<&SanitizedData> {
    match data {
        SanitizedData::Tree(_) | SanitizedData::Graph(_) => Some(data),
        SanitizedData::Hybrid(h) => h.parts.iter().find_map(spatial_part),
        _ => None,
    }
}

/// The graph whose placement a bundle's layout holds, if that layout is a graph's.
pub(crate) fn graph_of(data: &SanitizedData) -> Option<&GraphData> {
    match spatial_part(data)? {
        SanitizedData::Graph(g) => Some(g),
        _ => None,
    }
}

/// Force simulation for step `index`, seeded from the pipeline seed.
pub(crate) fn graph_simulation(graph: &GraphData, index: usize, config: &PipelineConfig) -> ForceSimulation {
    let mut rng = Rng64::derive(config.seed, index as u64);
    ForceSimulation::new(graph, config.force_layout.clone(), &mut rng)
}

fn spatial_layout(data: &SanitizedData, index: usize, config: &PipelineConfig) -> Option<LayoutResult> {
    match spatial_part(data)? {
        SanitizedData::Tree(t) => Some(layout_tree(t, &config.tree_layout)),
        SanitizedData::Graph(g) => Some(graph_simulation(g, index, config).layout()),
        _ => None,
    }
}

fn extend_unique(into: &mut Vec<String>, items: &[String]) {
    for item in items {
        if !into.contains(item) {
            into.push(item.clone());
        }
    }
}
