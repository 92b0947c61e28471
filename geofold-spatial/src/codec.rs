//! Geometry codec boundary.
//!
//! This module is the only place raw geometry representations are turned
//! into in-memory geometry values and back:
//!
//! - WKT parsing for text representations (non-geometry text is rejected)
//! - A canonical binary frame for values crossing phase boundaries
//! - Batch parsing with fail-fast semantics
//!
//! # Design
//!
//! The binary frame stores WKT bytes as the payload, avoiding a second
//! geometry serialization format. The frame adds what WKT lacks: the
//! spatial reference id, plus magic/version for corruption detection.
//! Phases may run in different processes, so every inter-phase value is
//! required to round-trip through this frame.

use crate::config::UnionConfig;
use crate::error::{GeofoldError, Result};
use geo_types::{Geometry, LineString, Polygon};
use geofold_tabular::{FieldValue, RowBatch};
use wkt::ToWkt;

/// Magic bytes for encoded geometry frames.
pub const FRAME_MAGIC: &[u8; 4] = b"GFU1";

/// Current frame format version.
pub const FRAME_VERSION: u8 = 1;

/// A geometry tied to a spatial reference.
///
/// Union always produces a new `Geom`; values are never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Geom {
    /// Spatial reference id.
    pub srid: i32,
    /// The planar shape.
    pub shape: Geometry<f64>,
}

impl Geom {
    /// Create a geometry with the given spatial reference.
    pub fn new(srid: i32, shape: Geometry<f64>) -> Self {
        Self { srid, shape }
    }

    /// Render as WKT text.
    pub fn to_wkt(&self) -> String {
        self.shape.wkt_string()
    }

    /// Whether this is the empty-geometry sentinel (no covered area parts).
    pub fn is_empty(&self) -> bool {
        match &self.shape {
            Geometry::Polygon(p) => p.exterior().0.is_empty(),
            Geometry::MultiPolygon(mp) => mp.0.iter().all(|p| p.exterior().0.is_empty()),
            _ => false,
        }
    }
}

/// The canonical empty-geometry sentinel (an empty polygon).
pub fn empty_geom(srid: i32) -> Geom {
    Geom {
        srid,
        shape: Geometry::Polygon(Polygon::new(LineString::new(vec![]), vec![])),
    }
}

/// Parse WKT text into a geo-types Geometry.
fn wkt_to_geometry(text: &str) -> Result<Geometry<f64>> {
    use std::str::FromStr;
    wkt::Wkt::from_str(text)
        .map_err(|e| GeofoldError::WktParse(format!("{:?}", e)))
        .and_then(|w| {
            w.try_into()
                .map_err(|e: wkt::conversion::Error| GeofoldError::WktParse(format!("{:?}", e)))
        })
}

/// Parse a WKT text representation.
///
/// WKT carries no spatial reference, so the caller supplies the srid
/// (normally `UnionConfig::default_srid`).
pub fn parse_wkt(text: &str, srid: i32) -> Result<Geom> {
    Ok(Geom {
        srid,
        shape: wkt_to_geometry(text)?,
    })
}

/// Flag bit: the frame encodes the empty-geometry sentinel (no payload).
const FLAG_EMPTY: u8 = 0x01;

/// Encode a geometry into the canonical binary frame.
///
/// Format:
/// ```text
/// Header (8 bytes):
///   magic: "GFU1" (4B)
///   version: u8
///   flags: u8 (0x01 = empty sentinel, zero-length payload)
///   _reserved: u16
///
/// Body:
///   srid: i32 (LE)
///   wkt_len: u32 (LE)
///   wkt_bytes: [u8; wkt_len]
/// ```
pub fn encode(geom: &Geom) -> Vec<u8> {
    let (flags, wkt) = if geom.is_empty() {
        (FLAG_EMPTY, String::new())
    } else {
        (0, geom.to_wkt())
    };
    let mut buf = Vec::with_capacity(16 + wkt.len());
    buf.extend_from_slice(FRAME_MAGIC);
    buf.push(FRAME_VERSION);
    buf.push(flags);
    buf.extend_from_slice(&[0u8; 2]); // reserved
    buf.extend_from_slice(&geom.srid.to_le_bytes());
    buf.extend_from_slice(&(wkt.len() as u32).to_le_bytes());
    buf.extend_from_slice(wkt.as_bytes());
    buf
}

/// Decode a geometry from the canonical binary frame.
pub fn decode(data: &[u8]) -> Result<Geom> {
    if data.len() < 16 {
        return Err(GeofoldError::Format("frame too short".into()));
    }

    if &data[0..4] != FRAME_MAGIC {
        return Err(GeofoldError::Format("invalid frame magic".into()));
    }

    let version = data[4];
    if version != FRAME_VERSION {
        return Err(GeofoldError::Format(format!(
            "unsupported frame version: {}",
            version
        )));
    }

    let flags = data[5];
    let srid = i32::from_le_bytes(data[8..12].try_into().unwrap());
    let wkt_len = u32::from_le_bytes(data[12..16].try_into().unwrap()) as usize;

    if 16 + wkt_len != data.len() {
        return Err(GeofoldError::Format("truncated wkt payload".into()));
    }

    if flags & FLAG_EMPTY != 0 {
        return Ok(empty_geom(srid));
    }

    let text = std::str::from_utf8(&data[16..16 + wkt_len])
        .map_err(|e| GeofoldError::Format(format!("invalid UTF-8 payload: {}", e)))?;

    Ok(Geom {
        srid,
        shape: wkt_to_geometry(text)?,
    })
}

/// Parse every present geometry field in a batch.
///
/// Rows whose geometry field is absent contribute nothing. Any present
/// field that fails to parse fails the whole call (fail-fast, not
/// best-effort). The returned vector may legitimately be empty.
pub fn parse_batch(batch: &RowBatch, config: &UnionConfig) -> Result<Vec<Geom>> {
    let mut geoms = Vec::with_capacity(batch.len());
    for value in batch.geom_values() {
        match value {
            Some(FieldValue::Text(text)) => geoms.push(parse_wkt(text, config.default_srid)?),
            Some(FieldValue::Bytes(bytes)) => geoms.push(decode(bytes)?),
            None => {}
        }
    }
    Ok(geoms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Area;

    #[test]
    fn test_parse_polygon() {
        let geom = parse_wkt("POLYGON((0 0, 1 0, 1 1, 0 1, 0 0))", 4326).unwrap();
        assert_eq!(geom.srid, 4326);
        assert!(matches!(geom.shape, Geometry::Polygon(_)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_wkt("POLYGON((0 0", 4326).unwrap_err();
        assert!(matches!(err, GeofoldError::WktParse(_)));
    }

    #[test]
    fn test_frame_roundtrip() {
        let geom = parse_wkt("POLYGON((0 0, 4 0, 4 4, 0 4, 0 0))", 3857).unwrap();
        let encoded = encode(&geom);
        let decoded = decode(&encoded).unwrap();

        assert_eq!(decoded.srid, 3857);
        assert_eq!(
            decoded.shape.unsigned_area(),
            geom.shape.unsigned_area()
        );
    }

    #[test]
    fn test_decode_rejects_bad_magic() {
        let geom = parse_wkt("POINT(1 2)", 4326).unwrap();
        let mut encoded = encode(&geom);
        encoded[0] = b'X';
        assert!(matches!(
            decode(&encoded).unwrap_err(),
            GeofoldError::Format(_)
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let geom = parse_wkt("POINT(1 2)", 4326).unwrap();
        let mut encoded = encode(&geom);
        encoded[4] = FRAME_VERSION + 1;
        assert!(matches!(
            decode(&encoded).unwrap_err(),
            GeofoldError::Format(_)
        ));
    }

    #[test]
    fn test_decode_rejects_truncation() {
        let geom = parse_wkt("POLYGON((0 0, 1 0, 1 1, 0 0))", 4326).unwrap();
        let encoded = encode(&geom);
        assert!(matches!(
            decode(&encoded[..encoded.len() - 3]).unwrap_err(),
            GeofoldError::Format(_)
        ));
        assert!(matches!(
            decode(&encoded[..10]).unwrap_err(),
            GeofoldError::Format(_)
        ));
    }

    #[test]
    fn test_empty_geom_roundtrip() {
        let geom = empty_geom(4326);
        let decoded = decode(&encode(&geom)).unwrap();
        assert_eq!(decoded.shape.unsigned_area(), 0.0);
    }

    #[test]
    fn test_parse_batch_skips_absent_rows() {
        use geofold_tabular::Row;

        let mut batch = RowBatch::new(1, 0).unwrap();
        batch.push_row(Row::from_text("POLYGON((0 0, 1 0, 1 1, 0 0))")).unwrap();
        batch.push_row(Row::new(vec![None])).unwrap();

        let geoms = parse_batch(&batch, &UnionConfig::default()).unwrap();
        assert_eq!(geoms.len(), 1);
    }

    #[test]
    fn test_parse_batch_fails_fast() {
        let batch = RowBatch::from_texts(["POLYGON((0 0, 1 0, 1 1, 0 0))", "not a geometry"]);
        assert!(parse_batch(&batch, &UnionConfig::default()).is_err());
    }
}
