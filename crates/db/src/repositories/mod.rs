//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod image_repo;
pub mod release_repo;

pub use image_repo::ImageRepo;
pub use release_repo::ReleaseRepo;
