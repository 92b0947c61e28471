//! Aggregation configuration types.

use serde::{Deserialize, Serialize};

/// Default spatial reference id assigned to text geometries (WGS 84).
pub const DEFAULT_SRID: i32 = 4326;

/// Configuration for union aggregation.
///
/// Text representations carry no spatial reference, so the codec assigns
/// `default_srid` when parsing WKT. Binary frames carry their own srid
/// and ignore this setting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnionConfig {
    /// Spatial reference id for geometries parsed from text.
    pub default_srid: i32,
}

impl Default for UnionConfig {
    fn default() -> Self {
        Self {
            default_srid: DEFAULT_SRID,
        }
    }
}

impl UnionConfig {
    /// Create a config with the default spatial reference.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spatial reference id assigned to text geometries.
    pub fn with_default_srid(mut self, srid: i32) -> Self {
        self.default_srid = srid;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_srid() {
        assert_eq!(UnionConfig::default().default_srid, 4326);
        assert_eq!(UnionConfig::new().with_default_srid(3857).default_srid, 3857);
    }
}
