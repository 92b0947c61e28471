//! Row batch format for geometry-bearing tuples.
//!
//! A `RowBatch` is one delivered chunk of rows for a single grouping key.
//! The batch declares how many fields each row carries and which field
//! index holds the geometry representation. Rows are appended through
//! [`RowBatch::push_row`], which validates arity so downstream consumers
//! never see ragged rows.

use crate::error::{Result, TabularError};

/// A single field value in a row.
///
/// Geometry representations arrive either as text (WKT) or as an opaque
/// byte sequence (the canonical binary encoding produced by a prior
/// aggregation phase).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Textual representation.
    Text(String),
    /// Binary representation.
    Bytes(Vec<u8>),
}

/// One row: a fixed-arity vector of optional field values.
///
/// `None` means the field is absent for this row, which is a legitimate
/// "no contribution" state, not malformed input.
#[derive(Debug, Clone, Default)]
pub struct Row {
    fields: Vec<Option<FieldValue>>,
}

impl Row {
    /// Create a row from its field values.
    pub fn new(fields: Vec<Option<FieldValue>>) -> Self {
        Self { fields }
    }

    /// Convenience: a single-field row holding one text value.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            fields: vec![Some(FieldValue::Text(text.into()))],
        }
    }

    /// Convenience: a single-field row holding one binary value.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            fields: vec![Some(FieldValue::Bytes(bytes))],
        }
    }

    /// Number of fields in this row.
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Get a field by index, flattening absence.
    pub fn field(&self, index: usize) -> Option<&FieldValue> {
        self.fields.get(index).and_then(|f| f.as_ref())
    }
}

/// An ordered batch of rows for one grouping key.
#[derive(Debug, Clone)]
pub struct RowBatch {
    /// Declared number of fields per row.
    field_count: usize,
    /// Index of the field holding the geometry representation.
    geom_field: usize,
    /// Rows in delivery order.
    rows: Vec<Row>,
}

impl RowBatch {
    /// Create an empty batch.
    ///
    /// `field_count` is the arity every pushed row must match;
    /// `geom_field` is the index of the geometry field.
    pub fn new(field_count: usize, geom_field: usize) -> Result<Self> {
        if geom_field >= field_count {
            return Err(TabularError::Schema(format!(
                "geometry field {} out of range for {} fields",
                geom_field, field_count
            )));
        }
        Ok(Self {
            field_count,
            geom_field,
            rows: Vec::new(),
        })
    }

    /// Create a single-field batch from text geometry representations.
    ///
    /// The common shape for engines that deliver one geometry per row.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_count: 1,
            geom_field: 0,
            rows: texts.into_iter().map(Row::from_text).collect(),
        }
    }

    /// Create a single-field batch from binary geometry representations.
    pub fn from_bytes<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        Self {
            field_count: 1,
            geom_field: 0,
            rows: values.into_iter().map(Row::from_bytes).collect(),
        }
    }

    /// Append a row, validating arity against the declared field count.
    pub fn push_row(&mut self, row: Row) -> Result<()> {
        if row.arity() != self.field_count {
            return Err(TabularError::Schema(format!(
                "row arity {} does not match declared field count {}",
                row.arity(),
                self.field_count
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of rows in the batch.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the batch holds no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the geometry field.
    pub fn geom_field(&self) -> usize {
        self.geom_field
    }

    /// Iterate over rows in delivery order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Iterate over the geometry field of every row.
    ///
    /// Yields `None` for rows whose geometry field is absent.
    pub fn geom_values(&self) -> impl Iterator<Item = Option<&FieldValue>> {
        self.rows.iter().map(|r| r.field(self.geom_field))
    }
}
