//! # Engine Module
//!
//! The stability engine: everything needed to turn a reference set of stable phases
//! and a query composition into an energy above hull.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - tolerances, the promising-candidate policy and the
//!   [`config::ClassifyConfigBuilder`]
//! - **Reference Set** ([`reference`]) - filtering raw phase records to one chemical system
//! - **Facet Evaluation** ([`facet`]) - degeneracy check, barycentric solve and membership
//!   test for a single k-phase facet
//! - **Hull Search** ([`search`]) - brute-force enumeration of all facets for one query
//! - **Progress Monitoring** ([`progress`]) - callback-based progress reporting
//! - **Error Handling** ([`error`]) - engine-level failures
//!
//! The engine holds no global state; reference sets, tolerances and policy are always
//! passed in explicitly, so independent queries may be evaluated on any thread.

pub mod config;
pub mod error;
pub mod facet;
pub mod progress;
pub mod reference;
pub mod search;
