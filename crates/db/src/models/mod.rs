//! Row types for the persistence layer.
//!
//! Each row converts into the stored document type from `deployments_core`.

pub mod image;
