// file: src/userdata/mod.rs
// version: 1.0.0
// guid: 62efdd74-ecbf-44d5-8ebf-5eab4e6ae6af

//! Node bootstrap (cloud-config user data) generation
//!
//! A render call flows renderer → [`ContextBuilder`] → [`TemplateEngine`]
//! and returns a complete [`BootDocument`] or an error, never a partial
//! document. Nothing is retained between calls apart from the compiled
//! skeleton set.

pub mod context;
pub mod document;
pub mod engine;
pub mod registry;
pub mod skeleton;

pub use context::{ComputeContext, ContextBuilder, MasterContext, RenderContext};
pub use document::{BootDocument, CloudConfig, DropIn, Unit, WriteFile};
pub use engine::TemplateEngine;
pub use registry::{MasterMember, MasterRegistry, NodeAddress, NodeId};
pub use skeleton::{Role, SkeletonKey, TemplateVersion};

use crate::config::ClusterIdentity;
use crate::Result;

/// Renders user data for each node role.
///
/// Orchestration code depends on this trait so tests can substitute a fake.
pub trait UserDater {
    fn render_master_cloud_config(
        &self,
        cloud_provider_name: &str,
        cluster_name: &str,
        kube_version: &str,
        masters: &MasterRegistry,
    ) -> Result<BootDocument>;

    fn render_compute_cloud_config(
        &self,
        cloud_provider_name: &str,
        cluster_name: &str,
        kube_version: &str,
    ) -> Result<BootDocument>;
}

/// User data renderer over the embedded skeletons
#[derive(Clone, Copy)]
pub struct UserData {
    engine: &'static TemplateEngine,
    version: TemplateVersion,
}

impl UserData {
    /// Renderer for the current skeleton generation.
    ///
    /// Compiles the skeleton set on first use, so call this at startup to
    /// surface a broken skeleton before any provisioning work.
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::shared()?,
            version: TemplateVersion::default(),
        })
    }

    /// Select the skeleton generation
    pub fn with_version(mut self, version: TemplateVersion) -> Self {
        self.version = version;
        self
    }

    pub fn version(&self) -> TemplateVersion {
        self.version
    }

    /// Render a compute document with an explicit context builder instead of
    /// reading `KETO_K8_IMAGE_URI`
    pub fn render_compute_with(
        &self,
        builder: &ContextBuilder,
        identity: &ClusterIdentity,
    ) -> Result<BootDocument> {
        let ctx = builder.build_compute_context(identity)?;
        self.render(&ctx)
    }

    /// Render a master document for a resolved identity
    pub fn render_master(
        &self,
        identity: &ClusterIdentity,
        masters: &MasterRegistry,
    ) -> Result<BootDocument> {
        let ctx = ContextBuilder::new().build_master_context(identity, masters)?;
        self.render(&ctx)
    }

    /// Render a compute document for a resolved identity, honouring
    /// `KETO_K8_IMAGE_URI`
    pub fn render_compute(&self, identity: &ClusterIdentity) -> Result<BootDocument> {
        self.render_compute_with(&ContextBuilder::from_env(), identity)
    }

    fn render(&self, ctx: &RenderContext) -> Result<BootDocument> {
        let key = SkeletonKey::new(ctx.role(), self.version);
        let text = self.engine.render(key, ctx)?;
        Ok(BootDocument::new(text))
    }
}

impl UserDater for UserData {
    fn render_master_cloud_config(
        &self,
        cloud_provider_name: &str,
        cluster_name: &str,
        kube_version: &str,
        masters: &MasterRegistry,
    ) -> Result<BootDocument> {
        let identity = ClusterIdentity::new(cloud_provider_name, cluster_name, kube_version);
        self.render_master(&identity, masters)
    }

    fn render_compute_cloud_config(
        &self,
        cloud_provider_name: &str,
        cluster_name: &str,
        kube_version: &str,
    ) -> Result<BootDocument> {
        let identity = ClusterIdentity::new(cloud_provider_name, cluster_name, kube_version);
        self.render_compute(&identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_KETO_K8_IMAGE;

    fn identity() -> ClusterIdentity {
        ClusterIdentity::new("aws", "prod-1", "v1.6.4")
    }

    fn initial_cluster(doc: &BootDocument) -> String {
        let config = doc.cloud_config().unwrap();
        let env = &config.file("/etc/etcd.env").unwrap().content;
        env.lines()
            .find_map(|l| l.strip_prefix("ETCD_INITIAL_CLUSTER="))
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_member_list_two_masters() {
        let userdata = UserData::new().unwrap();
        let registry = MasterRegistry::from([(0, "10.0.0.1"), (1, "10.0.0.2")]);

        let doc = userdata.render_master(&identity(), &registry).unwrap();
        assert_eq!(
            initial_cluster(&doc),
            "Node0=https://10.0.0.1:2380,Node1=https://10.0.0.2:2380"
        );
    }

    #[test]
    fn test_member_list_ignores_insertion_order() {
        let userdata = UserData::new().unwrap();
        let mut registry = MasterRegistry::new();
        for (id, addr) in [(11, "10.0.0.12"), (2, "10.0.0.3"), (0, "10.0.0.1")] {
            registry.insert(id, addr);
        }

        let doc = userdata.render_master(&identity(), &registry).unwrap();
        assert_eq!(
            initial_cluster(&doc),
            "Node0=https://10.0.0.1:2380,Node2=https://10.0.0.3:2380,Node11=https://10.0.0.12:2380"
        );
    }

    #[test]
    fn test_member_list_empty_registry() {
        let userdata = UserData::new().unwrap();
        let doc = userdata.render_master(&identity(), &MasterRegistry::new()).unwrap();

        assert_eq!(initial_cluster(&doc), "");
        assert!(doc.as_str().contains("ETCD_INITIAL_CLUSTER=\n"));
    }

    #[test]
    fn test_member_list_single_master() {
        let userdata = UserData::new().unwrap();
        let registry = MasterRegistry::from([(3, "172.16.0.4")]);

        let doc = userdata.render_master(&identity(), &registry).unwrap();
        assert_eq!(initial_cluster(&doc), "Node3=https://172.16.0.4:2380");
    }

    #[test]
    fn test_compute_with_explicit_builder() {
        let userdata = UserData::new().unwrap();
        let builder = ContextBuilder::new().with_image_override("registry.local/keto-k8:rc1");

        let doc = userdata.render_compute_with(&builder, &identity()).unwrap();
        assert!(doc.as_str().contains("registry.local/keto-k8:rc1 \\\n"));
        assert!(!doc.as_str().contains(DEFAULT_KETO_K8_IMAGE));
    }

    #[test]
    fn test_trait_object() {
        let userdata: Box<dyn UserDater> = Box::new(UserData::new().unwrap());
        let doc = userdata
            .render_master_cloud_config("aws", "prod-1", "v1.6.4", &MasterRegistry::new())
            .unwrap();
        assert!(doc.as_str().starts_with("#cloud-config\n"));
    }

    #[test]
    fn test_concurrent_renders_agree() {
        let userdata = UserData::new().unwrap();
        let registry = MasterRegistry::from([(0, "10.0.0.1"), (1, "10.0.0.2"), (2, "10.0.0.3")]);
        let expected = userdata.render_master(&identity(), &registry).unwrap();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| userdata.render_master(&identity(), &registry).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_context_error_propagates() {
        let userdata = UserData::new().unwrap();
        let err = userdata
            .render_master_cloud_config("aws", "", "v1.6.4", &MasterRegistry::new())
            .unwrap_err();
        assert!(err.is_generation_error());
    }
}
