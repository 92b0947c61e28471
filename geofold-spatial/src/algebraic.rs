//! Three-phase algebraic adapter.
//!
//! Stateless entry points satisfying the partial/combine/final contract
//! combiner-capable engines expect. Each phase is a free function
//! delegating to the union engine; they differ only in input/output
//! shape:
//!
//! - [`partial`] folds one co-located batch into a single encoded
//!   geometry, or a no-contribution marker for an empty batch
//! - [`combine`] merges encoded partials and re-encodes, with output
//!   shaped exactly like `partial` so combines nest arbitrarily in a
//!   tree-reduction topology
//! - [`finish`] merges the combined partials delivered to the reduce
//!   side into the terminal result for the key
//!
//! Because set union is associative and commutative and the union
//! engine is order-insensitive with respect to covered area, any
//! partition of a key's geometries across partial/combine calls yields
//! the same final region as a single monolithic union.
//!
//! Phases may run in different processes; every inter-phase value is
//! the canonical binary frame from [`crate::codec`].

use crate::codec::{decode, encode, parse_batch};
use crate::config::UnionConfig;
use crate::error::{GeofoldError, Result};
use crate::union::union_all;
use geofold_tabular::RowBatch;

/// The three independently addressable phases.
///
/// Engines building a combiner-capable plan resolve entry points by
/// name; these are the stable identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Partial,
    Combine,
    Final,
}

impl Phase {
    /// Stable name for plan-builder resolution.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Partial => "partial",
            Phase::Combine => "combine",
            Phase::Final => "final",
        }
    }

    /// Resolve a phase from its stable name.
    pub fn resolve(name: &str) -> Option<Phase> {
        match name {
            "partial" => Some(Phase::Partial),
            "combine" => Some(Phase::Combine),
            "final" => Some(Phase::Final),
            _ => None,
        }
    }
}

/// Partial phase: union one locally co-located batch for a key.
///
/// Returns `None` (no contribution) for a batch without geometry
/// contributions, so downstream combines can skip it without decoding
/// an empty geometry.
pub fn partial(batch: &RowBatch, config: &UnionConfig) -> Result<Option<Vec<u8>>> {
    let geoms =
        parse_batch(batch, config).map_err(|e| GeofoldError::in_phase("partial", e))?;
    if geoms.is_empty() {
        return Ok(None);
    }

    let merged = union_all(&geoms).map_err(|e| GeofoldError::in_phase("partial", e))?;
    tracing::trace!(inputs = geoms.len(), "partial union computed");
    Ok(Some(encode(&merged)))
}

/// Decode, union, and re-encode a set of partial results.
///
/// No-contribution markers are skipped; if nothing remains the result
/// is itself a no-contribution marker.
fn merge_encoded(parts: &[Option<Vec<u8>>], phase: &'static str) -> Result<Option<Vec<u8>>> {
    let mut geoms = Vec::with_capacity(parts.len());
    for part in parts.iter().flatten() {
        geoms.push(decode(part).map_err(|e| GeofoldError::in_phase(phase, e))?);
    }
    if geoms.is_empty() {
        return Ok(None);
    }

    let merged = union_all(&geoms).map_err(|e| GeofoldError::in_phase(phase, e))?;
    tracing::trace!(phase, inputs = geoms.len(), "merged partial results");
    Ok(Some(encode(&merged)))
}

/// Combine phase: merge partial results for one key.
///
/// May be invoked repeatedly over its own output; the shape matches
/// [`partial`] exactly so combines nest.
pub fn combine(parts: &[Option<Vec<u8>>]) -> Result<Option<Vec<u8>>> {
    merge_encoded(parts, "combine")
}

/// Final phase: merge all combined partials into the terminal result.
///
/// `None` means the key saw no geometry contributions at all.
pub fn finish(parts: &[Option<Vec<u8>>]) -> Result<Option<Vec<u8>>> {
    merge_encoded(parts, "final")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use geo::Area;

    fn area_of(encoded: &Option<Vec<u8>>) -> f64 {
        decode(encoded.as_ref().unwrap()).unwrap().shape.unsigned_area()
    }

    #[test]
    fn test_phase_resolution() {
        assert_eq!(Phase::resolve("partial"), Some(Phase::Partial));
        assert_eq!(Phase::resolve("combine"), Some(Phase::Combine));
        assert_eq!(Phase::resolve("final"), Some(Phase::Final));
        assert_eq!(Phase::resolve("reduce"), None);
        assert_eq!(Phase::Combine.name(), "combine");
    }

    #[test]
    fn test_partial_empty_batch_is_no_contribution() {
        let batch = RowBatch::from_texts(Vec::<String>::new());
        assert!(partial(&batch, &UnionConfig::default()).unwrap().is_none());
    }

    #[test]
    fn test_partial_combine_finish_pipeline() {
        let config = UnionConfig::default();
        let p1 = partial(
            &RowBatch::from_texts(["POLYGON((0 0, 4 0, 4 4, 0 4, 0 0))"]),
            &config,
        )
        .unwrap();
        let p2 = partial(
            &RowBatch::from_texts(["POLYGON((2 2, 6 2, 6 6, 2 6, 2 2))"]),
            &config,
        )
        .unwrap();

        let combined = combine(&[p1, p2]).unwrap();
        let result = finish(&[combined]).unwrap();
        assert!((area_of(&result) - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_combine_skips_markers_and_nests() {
        let config = UnionConfig::default();
        let p = partial(
            &RowBatch::from_texts(["POLYGON((0 0, 2 0, 2 2, 0 2, 0 0))"]),
            &config,
        )
        .unwrap();

        let inner = combine(&[None, p, None]).unwrap();
        assert!(inner.is_some());
        let outer = combine(&[inner, None]).unwrap();
        let result = finish(&[outer]).unwrap();
        assert!((area_of(&result) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_finish_of_no_contributions_is_absent() {
        assert!(finish(&[None, None]).unwrap().is_none());
        assert!(finish(&[]).unwrap().is_none());
    }

    #[test]
    fn test_phase_errors_carry_phase_name() {
        let err = combine(&[Some(b"garbage".to_vec())]).unwrap_err();
        assert!(matches!(
            err,
            GeofoldError::Aggregation { phase: "combine", .. }
        ));

        let err = partial(
            &RowBatch::from_texts(["nope"]),
            &UnionConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GeofoldError::Aggregation { phase: "partial", .. }
        ));
    }
}
