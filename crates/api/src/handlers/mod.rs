pub mod artifacts;
pub mod releases;
