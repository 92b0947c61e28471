//! Row batch carrier types for geofold aggregation.
//!
//! This crate provides the format-agnostic row batch the execution engine
//! hands to the aggregation entry points: an ordered sequence of rows for
//! one grouping key, each row holding at most one geometry representation
//! at a fixed field position.
//!
//! # Design
//!
//! - **Row-oriented**: aggregation consumes rows for one key in delivery
//!   order, so rows are the unit, not columns
//! - **Strongly typed**: field access goes through the `FieldValue` enum,
//!   no `dyn Any`
//! - **Absent-friendly**: a row whose geometry field is absent contributes
//!   nothing; only structural violations (arity, bad field index) error

pub mod batch;
pub mod error;

pub use batch::{FieldValue, Row, RowBatch};
pub use error::{Result, TabularError};
