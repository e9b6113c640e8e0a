//! # Core Module
//!
//! Fundamental building blocks of the stability engine.
//!
//! ## Architecture
//!
//! - **Chemistry** ([`chemistry`]) - Element symbols, chemical formula parsing and
//!   ordered chemical systems
//! - **Data Models** ([`models`]) - Composition vectors and the reference/query phase records
//! - **File I/O** ([`io`]) - Reading phase files and query batches, writing stability reports
//!
//! Everything in this layer is free of global state; the engine threads these types
//! through its operations explicitly.

pub mod chemistry;
pub mod io;
pub mod models;
