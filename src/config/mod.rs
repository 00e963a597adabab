// file: src/config/mod.rs
// version: 2.0.0
// guid: a1b2c3d4-e5f6-7a8b-9c0d-1e2f3a4b5c6d

//! Cluster configuration for keto
//!
//! Handles the identity every render call needs and the cluster spec files
//! the CLI reads it from.

pub mod cluster;
pub mod loader;

pub use cluster::{ClusterSpec, MasterSpec};

use serde::{Deserialize, Serialize};

/// Cloud providers the bootstrap image supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudProvider {
    #[serde(rename = "aws")]
    Aws,
}

impl CloudProvider {
    /// Get the provider name as passed to `--cloud-provider`
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
        }
    }
}

impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CloudProvider {
    type Err = crate::error::KetoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aws" => Ok(CloudProvider::Aws),
            _ => Err(crate::error::KetoError::validation(format!(
                "Unsupported cloud provider: {}",
                s
            ))),
        }
    }
}

/// Identity of the cluster a node is joining
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterIdentity {
    pub cluster_name: String,
    pub cloud_provider_name: String,
    pub kubernetes_version: String,
}

impl ClusterIdentity {
    pub fn new(
        cloud_provider_name: impl Into<String>,
        cluster_name: impl Into<String>,
        kubernetes_version: impl Into<String>,
    ) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            cloud_provider_name: cloud_provider_name.into(),
            kubernetes_version: kubernetes_version.into(),
        }
    }
}
