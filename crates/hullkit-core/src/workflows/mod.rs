//! # Workflows Module
//!
//! High-level entry points that combine the `core` and `engine` layers into complete
//! stability runs.
//!
//! - **Classification** ([`classify`]) - evaluate a batch of candidate structures against
//!   a reference set, rank them by energy above hull and mark the promising ones
//! - **Validation** ([`validate`]) - check that a reference set is itself a convex hull
//! - **Compilation** ([`compile`]) - collapse raw energy records into one lowest-energy
//!   entry per reduced formula

pub mod classify;
pub mod compile;
pub mod validate;
