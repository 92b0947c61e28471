//! Monolithic entry point.
//!
//! Single-call union over one full batch, for engines that support
//! neither streaming accumulation nor combiner splitting. Equivalent to
//! one `partial` followed by `finish` with no intermediate combine, and
//! to a single accumulate-then-finalize pass.

use crate::codec::{encode, parse_batch};
use crate::config::UnionConfig;
use crate::error::{GeofoldError, Result};
use crate::union::union_all;
use geofold_tabular::RowBatch;

/// Union an entire batch in one call.
///
/// Returns `None` (the absent-result marker) when the batch carries no
/// geometry contributions; otherwise the canonical binary encoding of
/// the union.
pub fn execute(batch: &RowBatch, config: &UnionConfig) -> Result<Option<Vec<u8>>> {
    let geoms =
        parse_batch(batch, config).map_err(|e| GeofoldError::in_phase("execute", e))?;
    if geoms.is_empty() {
        return Ok(None);
    }

    let merged = union_all(&geoms).map_err(|e| GeofoldError::in_phase("execute", e))?;
    Ok(Some(encode(&merged)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use geo::Area;

    #[test]
    fn test_empty_batch_yields_absent_result() {
        let batch = RowBatch::from_texts(Vec::<String>::new());
        assert!(execute(&batch, &UnionConfig::default()).unwrap().is_none());
    }

    #[test]
    fn test_single_polygon_identity() {
        let batch = RowBatch::from_texts(["POLYGON((0 0, 3 0, 3 3, 0 3, 0 0))"]);
        let result = execute(&batch, &UnionConfig::default()).unwrap().unwrap();
        let geom = decode(&result).unwrap();
        assert!((geom.shape.unsigned_area() - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_failure_is_wrapped() {
        let batch = RowBatch::from_texts(["POLYGON((0 0"]);
        assert!(matches!(
            execute(&batch, &UnionConfig::default()).unwrap_err(),
            GeofoldError::Aggregation { phase: "execute", .. }
        ));
    }
}
