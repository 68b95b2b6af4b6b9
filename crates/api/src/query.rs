//! Query parameter types for API handlers.

use deployments_core::image::ImageFilter;
use deployments_core::release::ReleaseFilter;
use serde::Deserialize;

/// `GET /releases?name=`
#[derive(Debug, Default, Deserialize)]
pub struct ReleaseQuery {
    pub name: Option<String>,
}

impl ReleaseQuery {
    /// An empty `name` means no filter.
    pub fn into_filter(self) -> ReleaseFilter {
        ReleaseFilter { name: self.name }.normalized()
    }
}

/// `GET /artifacts?device_type=`
#[derive(Debug, Default, Deserialize)]
pub struct ArtifactQuery {
    pub device_type: Option<String>,
}

impl ArtifactQuery {
    pub fn into_filter(self) -> ImageFilter {
        ImageFilter {
            device_type: self.device_type.filter(|d| !d.is_empty()),
        }
    }
}
