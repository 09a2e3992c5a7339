use crate::classify::classifier::ClassifierConfig;
use crate::foundation::error::{StepvizError, StepvizResult};
use crate::layout::{ForceLayoutConfig, TreeLayoutConfig};
use crate::validate::ValidationLimits;

/// Every tunable of the pipeline in one place.
///
/// All sections default, so a partial JSON document only overrides what it names:
///
/// ```json
/// { "seed": 7, "forceLayout": { "maxIterations": 120 } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineConfig {
    pub classifier: ClassifierConfig,
    pub limits: ValidationLimits,
    pub tree_layout: TreeLayoutConfig,
    pub force_layout: ForceLayoutConfig,
    /// Base seed for layout jitter. Each step derives its own stream from it.
    pub seed: u64,
}

impl PipelineConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(s: &str) -> StepvizResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the layout and validation stages cannot work with.
    pub fn validate(&self) -> StepvizResult<()> {
        let f = &self.force_layout;
        if f.max_iterations == 0 {
            return Err(StepvizError::config(
                "forceLayout.maxIterations must be at least 1",
            ));
        }
        if !(f.damping > 0.0 && f.damping <= 1.0) {
            return Err(StepvizError::config(format!(
                "forceLayout.damping must be in (0, 1], got {}",
                f.damping
            )));
        }
        if !(f.width.is_finite() && f.width > 0.0 && f.height.is_finite() && f.height > 0.0) {
            return Err(StepvizError::config(format!(
                "forceLayout canvas must be positive, got {}x{}",
                f.width, f.height
            )));
        }
        if f.stability_threshold.is_nan() || f.stability_threshold < 0.0 {
            return Err(StepvizError::config(
                "forceLayout.stabilityThreshold must be non-negative",
            ));
        }
        if f.padding < 0.0 || f.jitter_radius < 0.0 {
            return Err(StepvizError::config(
                "forceLayout.padding and forceLayout.jitterRadius must be non-negative",
            ));
        }

        let t = &self.tree_layout;
        if !(t.level_height > 0.0 && t.min_subtree_width > 0.0) {
            return Err(StepvizError::config(
                "treeLayout.levelHeight and treeLayout.minSubtreeWidth must be positive",
            ));
        }

        let ratio = self.limits.high_degree_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(StepvizError::config(format!(
                "limits.highDegreeRatio must be in (0, 1], got {ratio}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;
