use serde::{Deserialize, Serialize};

/// Release reported when the collector could not determine one
pub const UNKNOWN_RELEASE: &str = "unknown";

/// What the collector knows about the cluster the keys came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub release: String,

    /// Left out of published datasets unless explicitly requested
    pub host: Option<String>,
}

impl ClusterInfo {
    #[must_use]
    pub fn new(release: Option<&str>, host: Option<&str>) -> Self {
        Self {
            release: release.unwrap_or(UNKNOWN_RELEASE).to_string(),
            host: host.map(ToString::to_string),
        }
    }
}

impl Default for ClusterInfo {
    fn default() -> Self {
        Self::new(None, None)
    }
}
