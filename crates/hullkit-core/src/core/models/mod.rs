//! Data models consumed by the engine.
//!
//! - [`composition`] - Points in the compositional simplex of a k-element system
//! - [`phase`] - Reference phases (hull vertex candidates) and query points
//! - [`report`] - Ranked stability results produced by batch classification

pub mod composition;
pub mod phase;
pub mod report;
