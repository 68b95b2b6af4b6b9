//! Domain model for software update artifacts.
//!
//! Pure logic only: validation, dependency indexing, the persisted document
//! shape, and release grouping. Nothing in this crate performs I/O.

pub mod artifact;
pub mod dependency;
pub mod error;
pub mod image;
pub mod release;
pub mod types;
pub mod validation;
