//! # HullKit Core Library
//!
//! A compositional convex-hull stability engine. Given the known-stable phases of a
//! k-element chemical system, it decides whether candidate compositions lie on the
//! convex hull and, if not, how far above it they sit (the energy above hull, Ehull).
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture with a clear separation of concerns.
//!
//! - **[`core`]: The Foundation.** Stateless data types (`Element`, `Formula`,
//!   `CompositionVector`, `ReferencePhase`) and I/O for phase files, query batches
//!   and stability reports.
//!
//! - **[`engine`]: The Logic Core.** The reference set builder, the generic facet
//!   evaluator (barycentric membership over any arity k), the brute-force hull
//!   distance search, and the configuration, error and progress types they share.
//!
//! - **[`workflows`]: The Public API.** Batch classification of candidate structures,
//!   reference-set validation and energy table compilation, built on top of the
//!   `engine` and `core` layers.

pub mod core;
pub mod engine;
pub mod workflows;
