//! Incremental spatial-union aggregation.
//!
//! This crate computes the geometric union of a partitioned stream of
//! polygonal geometries without materializing all of them at once, and
//! can serve as the pre-aggregation (combiner) step of a distributed
//! group-by pipeline. One pure union engine backs three execution
//! contracts, which are equivalent for the same input multiset:
//!
//! - **Streaming accumulation**: repeated small batches sharing a
//!   grouping key, via [`UnionAccumulator`]
//! - **Three-phase algebraic protocol**: `partial` / `combine` /
//!   `finish` entry points for map/combine/reduce execution, via
//!   [`algebraic`]
//! - **One-shot**: a single monolithic call, via [`oneshot::execute`]
//!
//! # Architecture
//!
//! ```text
//!   row batches (one grouping key)
//!        │
//!        ▼
//!   codec: WKT / binary frame ──► Geom (srid + shape)
//!        │
//!        ▼
//!   union engine (pure, stateless)
//!        ▲              ▲              ▲
//!   accumulator     algebraic       oneshot
//!   (running state) (stateless)    (stateless)
//!        │              │              │
//!        ▼              ▼              ▼
//!   canonical binary encoding, or absent-result marker
//! ```
//!
//! The crate has no internal concurrency: every call is a blocking,
//! synchronous computation. The algebraic phases and the one-shot entry
//! point are stateless and reusable across threads; an accumulator is
//! exclusively owned by one grouping-key lifetime at a time.
//!
//! # Modules
//!
//! - [`config`]: aggregation configuration
//! - [`codec`]: geometry parsing and the canonical binary frame
//! - [`union`]: the pure union engine
//! - [`accumulator`]: streaming accumulation lifecycle
//! - [`algebraic`]: partial/combine/final phases and phase-name lookup
//! - [`oneshot`]: monolithic entry point
//! - [`error`]: error types

pub mod accumulator;
pub mod algebraic;
pub mod codec;
pub mod config;
pub mod error;
pub mod oneshot;
pub mod union;

pub use accumulator::UnionAccumulator;
pub use algebraic::{combine, finish, partial, Phase};
pub use codec::{decode, empty_geom, encode, parse_batch, parse_wkt, Geom};
pub use config::{UnionConfig, DEFAULT_SRID};
pub use error::{GeofoldError, Result};
pub use union::union_all;
