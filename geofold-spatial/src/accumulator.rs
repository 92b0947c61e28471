//! Streaming union accumulator.
//!
//! Holds a running union value across repeated small-batch calls that
//! share one grouping key. The external engine owns instance-per-key
//! isolation: one accumulator serves exactly one logical aggregation
//! lifetime at a time, and `reset` must be called between keys.

use crate::codec::{empty_geom, encode, parse_batch, Geom};
use crate::config::UnionConfig;
use crate::error::{GeofoldError, Result};
use crate::union::union_all;
use geofold_tabular::RowBatch;

/// Accumulator lifecycle state.
#[derive(Debug, Clone)]
enum AccState {
    /// No batch with a geometry contribution has been seen.
    Fresh,
    /// Running union of everything folded in so far.
    Accumulating(Geom),
    /// `finalize` has been called; awaiting `reset`.
    Finalized,
}

/// Stateful wrapper computing a running union over batches for one key.
///
/// # Contract
///
/// The engine must call `reset` after `finalize` and before the first
/// `accumulate` of the next key. That is a precondition, not a guard:
/// accumulating into a finalized instance simply begins a new
/// aggregation and will not observe the previous key's state.
#[derive(Debug)]
pub struct UnionAccumulator {
    config: UnionConfig,
    state: AccState,
}

impl UnionAccumulator {
    /// Create an accumulator with the given configuration.
    pub fn new(config: UnionConfig) -> Self {
        Self {
            config,
            state: AccState::Fresh,
        }
    }

    /// Whether a running union value is present.
    pub fn is_accumulating(&self) -> bool {
        matches!(self.state, AccState::Accumulating(_))
    }

    /// Fold one batch into the running union.
    ///
    /// An empty batch, or a batch whose rows all lack a geometry field,
    /// is a no-op in any state and never collapses existing state. A
    /// failed call (parse error, reference mismatch) leaves the running
    /// state exactly as it was: the new value is computed into a
    /// temporary and committed only on success.
    pub fn accumulate(&mut self, batch: &RowBatch) -> Result<()> {
        let geoms = parse_batch(batch, &self.config)
            .map_err(|e| GeofoldError::in_phase("accumulate", e))?;

        if geoms.is_empty() {
            tracing::trace!(rows = batch.len(), "empty contribution, state unchanged");
            return Ok(());
        }

        let mut inputs = Vec::with_capacity(geoms.len() + 1);
        match &self.state {
            AccState::Accumulating(running) => inputs.push(running.clone()),
            AccState::Fresh | AccState::Finalized => {
                tracing::debug!(srid = geoms[0].srid, "initializing running union state");
                inputs.push(empty_geom(geoms[0].srid));
            }
        }
        inputs.extend(geoms);

        let merged =
            union_all(&inputs).map_err(|e| GeofoldError::in_phase("accumulate", e))?;

        tracing::trace!(inputs = inputs.len(), "folded batch into running union");
        self.state = AccState::Accumulating(merged);
        Ok(())
    }

    /// Read out the running union as its canonical binary encoding.
    ///
    /// Finalizing a fresh accumulator is permitted and yields the
    /// empty-geometry encoding; distinguishing "no groups at all" is the
    /// caller's concern. Transitions to the finalized state.
    pub fn finalize(&mut self) -> Vec<u8> {
        let state = std::mem::replace(&mut self.state, AccState::Finalized);
        match state {
            AccState::Accumulating(running) => encode(&running),
            AccState::Fresh | AccState::Finalized => {
                encode(&empty_geom(self.config.default_srid))
            }
        }
    }

    /// Clear all state, returning to fresh for the next grouping key.
    pub fn reset(&mut self) {
        self.state = AccState::Fresh;
    }
}

impl Default for UnionAccumulator {
    fn default() -> Self {
        Self::new(UnionConfig::default())
    }
}
