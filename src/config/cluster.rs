// file: src/config/cluster.rs
// version: 1.0.0
// guid: 12b2eed0-7239-4d48-bbfe-04a0c8f1bfbd

//! Cluster spec file structures

use super::{CloudProvider, ClusterIdentity};
use crate::error::KetoError;
use crate::userdata::{MasterRegistry, NodeId};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

/// Cluster description the CLI renders user data from
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClusterSpec {
    /// Cluster name, also used as the cloud resource tag
    #[validate(length(min = 1, max = 63))]
    pub name: String,
    /// Cloud provider hosting the cluster
    pub cloud_provider: CloudProvider,
    /// Kubernetes version (e.g., v1.6.4)
    #[validate(length(min = 1))]
    pub kubernetes_version: String,
    /// Master nodes already provisioned; empty when bootstrapping the first one
    #[serde(default)]
    #[validate(nested)]
    pub masters: Vec<MasterSpec>,
}

/// A provisioned master node
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MasterSpec {
    /// Stable node identity
    pub node_id: NodeId,
    /// Private IP address
    #[validate(ip)]
    pub address: String,
}

impl ClusterSpec {
    /// Validate field rules, the cluster name format and node id uniqueness
    pub fn validate_spec(&self) -> crate::Result<()> {
        self.validate()
            .map_err(|e| KetoError::validation(e.to_string()))?;

        validate_cluster_name(&self.name)?;

        let mut seen = BTreeSet::new();
        for master in &self.masters {
            if !seen.insert(master.node_id) {
                return Err(KetoError::validation(format!(
                    "Duplicate master node id: {}",
                    master.node_id
                )));
            }
        }

        Ok(())
    }

    pub fn identity(&self) -> ClusterIdentity {
        ClusterIdentity::new(
            self.cloud_provider.as_str(),
            self.name.clone(),
            self.kubernetes_version.clone(),
        )
    }

    pub fn registry(&self) -> MasterRegistry {
        self.masters
            .iter()
            .map(|m| (m.node_id, m.address.clone()))
            .collect()
    }
}

/// Cluster names end up in tags and DNS labels, so hold them to RFC 1123 label rules
fn validate_cluster_name(name: &str) -> crate::Result<()> {
    let re = Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?$")
        .map_err(|e| KetoError::config(format!("Invalid regex pattern: {}", e)))?;

    if !re.is_match(name) {
        return Err(KetoError::validation(format!(
            "Cluster name '{}' must be lowercase alphanumerics and hyphens",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_spec() -> ClusterSpec {
        ClusterSpec {
            name: "prod-1".to_string(),
            cloud_provider: CloudProvider::Aws,
            kubernetes_version: "v1.6.4".to_string(),
            masters: vec![
                MasterSpec { node_id: 1, address: "10.0.0.2".to_string() },
                MasterSpec { node_id: 0, address: "10.0.0.1".to_string() },
            ],
        }
    }

    #[test]
    fn test_spec_validate_ok() {
        assert!(valid_spec().validate_spec().is_ok());
    }

    #[test]
    fn test_spec_validate_bad_name() {
        let mut spec = valid_spec();
        spec.name = "Prod_1".to_string();
        assert!(spec.validate_spec().is_err());

        spec.name = "-prod".to_string();
        assert!(spec.validate_spec().is_err());

        spec.name = String::new();
        assert!(spec.validate_spec().is_err());
    }

    #[test]
    fn test_spec_validate_bad_address() {
        let mut spec = valid_spec();
        spec.masters[0].address = "not-an-ip".to_string();
        assert!(spec.validate_spec().is_err());
    }

    #[test]
    fn test_spec_validate_duplicate_node_id() {
        let mut spec = valid_spec();
        spec.masters[1].node_id = 1;
        let err = spec.validate_spec().unwrap_err();
        assert!(err.to_string().contains("Duplicate master node id: 1"));
    }

    #[test]
    fn test_spec_validate_no_masters() {
        let mut spec = valid_spec();
        spec.masters.clear();
        assert!(spec.validate_spec().is_ok());
        assert!(spec.registry().is_empty());
    }

    #[test]
    fn test_spec_projections() {
        let spec = valid_spec();
        let identity = spec.identity();
        assert_eq!(identity.cluster_name, "prod-1");
        assert_eq!(identity.cloud_provider_name, "aws");

        let registry = spec.registry();
        assert_eq!(registry.iter().next(), Some((0, "10.0.0.1")));
    }
}
