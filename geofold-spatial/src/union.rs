//! Union engine.
//!
//! Pure n-way geometric union over polygonal geometries. All stateful
//! entry points (accumulator, algebraic phases, one-shot) delegate here,
//! so the merge logic is single-sourced.
//!
//! The union is computed by flattening every input into its polygon
//! parts and coalescing them in one pass with `geo`'s `unary_union`,
//! the numerically robust collection-union formulation. Overlapping and
//! boundary-sharing inputs merge into shared boundaries; disjoint inputs
//! come back as a multi-part result.

use crate::codec::{empty_geom, Geom};
use crate::error::{GeofoldError, Result};
use geo_types::{Geometry, MultiPolygon, Polygon};

/// Human-readable geometry kind, for error messages.
fn kind_name(shape: &Geometry<f64>) -> &'static str {
    match shape {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

/// Collect the non-empty polygon parts of one geometry.
///
/// Empty polygons (the empty-geometry sentinel) contribute no parts.
/// Non-polygonal geometries are rejected.
fn polygonal_parts(geom: &Geom, parts: &mut Vec<Polygon<f64>>) -> Result<()> {
    match &geom.shape {
        Geometry::Polygon(p) => {
            if !p.exterior().0.is_empty() {
                parts.push(p.clone());
            }
            Ok(())
        }
        Geometry::MultiPolygon(mp) => {
            for p in &mp.0 {
                if !p.exterior().0.is_empty() {
                    parts.push(p.clone());
                }
            }
            Ok(())
        }
        other => Err(GeofoldError::InvalidGeometry(format!(
            "union accepts polygonal geometries, got {}",
            kind_name(other)
        ))),
    }
}

/// Compute the geometric union of a non-empty sequence of geometries.
///
/// All inputs must share one spatial reference; a mismatch fails with
/// `ReferenceMismatch` and never silently picks a side. Callers are
/// responsible for short-circuiting empty input.
///
/// Returns a single geometry covering the set union of all inputs'
/// area: a `Polygon` when the union is one part, a `MultiPolygon` when
/// disjoint parts remain, or the empty-geometry sentinel when every
/// input was empty.
pub fn union_all(geoms: &[Geom]) -> Result<Geom> {
    let first = geoms.first().ok_or_else(|| {
        GeofoldError::InvalidGeometry("union requires at least one geometry".into())
    })?;
    let srid = first.srid;

    for geom in geoms {
        if geom.srid != srid {
            return Err(GeofoldError::ReferenceMismatch {
                left: srid,
                right: geom.srid,
            });
        }
    }

    let mut parts: Vec<Polygon<f64>> = Vec::with_capacity(geoms.len());
    for geom in geoms {
        polygonal_parts(geom, &mut parts)?;
    }

    if parts.is_empty() {
        return Ok(empty_geom(srid));
    }

    let merged: MultiPolygon<f64> = geo::unary_union(parts.iter());
    let mut polys = merged.0;

    let shape = match polys.len() {
        0 => return Ok(empty_geom(srid)),
        1 => Geometry::Polygon(polys.remove(0)),
        _ => Geometry::MultiPolygon(MultiPolygon(polys)),
    };

    Ok(Geom::new(srid, shape))
}
