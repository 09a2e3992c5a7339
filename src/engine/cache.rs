use crate::engine::bundle::StepBundle;

/// Per-step memo of computed bundles, one slot per step index.
///
/// A slot is written at most once; there is no invalidation. A new step sequence
/// gets a new engine and therefore a new cache.
#[derive(Debug, Default)]
pub struct StepCache {
    slots: Vec<Option<StepBundle>>,
    hits: u64,
    misses: u64,
}

impl StepCache {
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(len).collect(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&self, index: usize) -> Option<&StepBundle> {
        self.slots.get(index)?.as_ref()
    }

    /// Return the cached bundle for `index`, computing it on first access.
    /// `None` when `index` has no slot.
    pub fn get_or_compute(
        &mut self,
        index: usize,
        compute: impl FnOnce() -> StepBundle,
    ) -> Option<&StepBundle> {
        let slot = self.slots.get_mut(index)?;
        if slot.is_some() {
            self.hits += 1;
            tracing::debug!(index, "step cache hit");
        } else {
            self.misses += 1;
            tracing::debug!(index, "step cache miss");
            *slot = Some(compute());
        }
        slot.as_ref()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots already computed.
    pub fn computed(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
