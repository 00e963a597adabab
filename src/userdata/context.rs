// file: src/userdata/context.rs
// version: 1.0.0
// guid: 61d78e6f-a6f0-4b5c-9b90-090b1622ce77

//! Render contexts for the cloud-config skeletons

use serde::Serialize;

use super::registry::{MasterMember, MasterRegistry};
use super::skeleton::Role;
use crate::config::ClusterIdentity;
use crate::constants::{
    DEFAULT_KETO_K8_IMAGE, DEFAULT_NETWORK_PROVIDER, ETCD_CLIENT_PORT, ETCD_PEER_PORT,
    KETO_K8_IMAGE_URI_ENV,
};
use crate::error::KetoError;
use crate::Result;

/// Fields available to the master skeleton
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MasterContext {
    pub cloud_provider_name: String,
    pub cluster_name: String,
    pub kube_version: String,
    pub keto_k8_image: String,
    pub network_provider: String,
    pub masters: Vec<MasterMember>,
    pub etcd_peer_port: u16,
    pub etcd_client_port: u16,
}

/// Fields available to the compute skeleton.
///
/// Compute nodes take no part in etcd bootstrap, so nothing here is derived
/// from the master registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComputeContext {
    pub cloud_provider_name: String,
    pub cluster_name: String,
    pub kube_version: String,
    pub keto_k8_image: String,
}

/// Role specific substitution context, built fresh for every render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RenderContext {
    Master(MasterContext),
    Compute(ComputeContext),
}

impl RenderContext {
    pub fn role(&self) -> Role {
        match self {
            RenderContext::Master(_) => Role::Master,
            RenderContext::Compute(_) => Role::Compute,
        }
    }

    /// Bootstrap image the document will run
    pub fn keto_k8_image(&self) -> &str {
        match self {
            RenderContext::Master(ctx) => &ctx.keto_k8_image,
            RenderContext::Compute(ctx) => &ctx.keto_k8_image,
        }
    }
}

/// Builds render contexts from caller input and build-time defaults
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    image_override: Option<String>,
}

impl ContextBuilder {
    /// Builder with no image override
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that honours `KETO_K8_IMAGE_URI`
    pub fn from_env() -> Self {
        Self {
            image_override: std::env::var(KETO_K8_IMAGE_URI_ENV).ok(),
        }
    }

    /// Pin the compute bootstrap image, as `KETO_K8_IMAGE_URI` would
    pub fn with_image_override(mut self, uri: impl Into<String>) -> Self {
        self.image_override = Some(uri.into());
        self
    }

    pub fn build_master_context(
        &self,
        identity: &ClusterIdentity,
        registry: &MasterRegistry,
    ) -> Result<RenderContext> {
        check_identity(identity)?;

        Ok(RenderContext::Master(MasterContext {
            cloud_provider_name: identity.cloud_provider_name.clone(),
            cluster_name: identity.cluster_name.clone(),
            kube_version: identity.kubernetes_version.clone(),
            keto_k8_image: DEFAULT_KETO_K8_IMAGE.to_string(),
            network_provider: DEFAULT_NETWORK_PROVIDER.to_string(),
            masters: registry.members(),
            etcd_peer_port: ETCD_PEER_PORT,
            etcd_client_port: ETCD_CLIENT_PORT,
        }))
    }

    pub fn build_compute_context(&self, identity: &ClusterIdentity) -> Result<RenderContext> {
        check_identity(identity)?;

        Ok(RenderContext::Compute(ComputeContext {
            cloud_provider_name: identity.cloud_provider_name.clone(),
            cluster_name: identity.cluster_name.clone(),
            kube_version: identity.kubernetes_version.clone(),
            keto_k8_image: self.compute_image().to_string(),
        }))
    }

    // An empty override means "not set".
    fn compute_image(&self) -> &str {
        match self.image_override.as_deref() {
            Some(uri) if !uri.is_empty() => uri,
            _ => DEFAULT_KETO_K8_IMAGE,
        }
    }
}

/// Structural completeness only; values are the caller's responsibility.
fn check_identity(identity: &ClusterIdentity) -> Result<()> {
    let required = [
        ("cluster name", &identity.cluster_name),
        ("cloud provider name", &identity.cloud_provider_name),
        ("kubernetes version", &identity.kubernetes_version),
    ];

    for (field, value) in required {
        if value.is_empty() {
            return Err(KetoError::context(format!("{} is required", field)));
        }
    }

    Ok(())
}
