// file: src/userdata/skeleton.rs
// version: 1.0.0
// guid: e3a9d8b5-ef31-410a-a8d4-536d162fc137

//! Embedded cloud-config skeletons.
//!
//! Skeletons are compiled into the binary with `include_str!` and registered
//! by name with the template engine. Each role has one skeleton per
//! [`TemplateVersion`]; older versions extend the current one and override
//! its blocks (`overlay_units`, `auto_update`, `kernel_tuning`), so adding a
//! version never duplicates the shared boot sequence.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Master skeleton, current generation
pub const MASTER_V2: &str = include_str!("templates/master.cloud-config.j2");
/// Master skeleton, legacy generation (masks flanneld)
pub const MASTER_V1: &str = include_str!("templates/master-v1.cloud-config.j2");
/// Compute skeleton, current generation
pub const COMPUTE_V2: &str = include_str!("templates/compute.cloud-config.j2");
/// Compute skeleton, legacy generation (masks flanneld)
pub const COMPUTE_V1: &str = include_str!("templates/compute-v1.cloud-config.j2");

/// Shared fragments
pub const CLOUD_PROVIDER_CONFIG: &str = include_str!("templates/partials/cloud-provider-config.j2");
pub const KERNEL_TUNING: &str = include_str!("templates/partials/kernel-tuning.j2");
/// Kernel tuning files with the legacy unquoted permissions
pub const KERNEL_TUNING_V1: &str = include_str!("templates/partials/kernel-tuning-v1.j2");

/// All embedded templates as (name, content) pairs for registration with the engine.
pub const ALL_TEMPLATES: &[(&str, &str)] = &[
    ("partials/cloud-provider-config", CLOUD_PROVIDER_CONFIG),
    ("partials/kernel-tuning", KERNEL_TUNING),
    ("partials/kernel-tuning-v1", KERNEL_TUNING_V1),
    ("master/v2", MASTER_V2),
    ("master/v1", MASTER_V1),
    ("compute/v2", COMPUTE_V2),
    ("compute/v1", COMPUTE_V1),
];

/// Node role a boot document is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Control plane node running etcd
    Master,
    /// Worker node
    Compute,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Master => "master",
            Role::Compute => "compute",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skeleton generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVersion {
    /// Legacy generation: masks flanneld, leaves compute auto-update alone
    /// and writes sysctl permissions unquoted
    #[value(alias = "1")]
    V1,
    /// Current images; the overlay comes from the network provider
    #[default]
    #[value(alias = "2")]
    V2,
}

impl TemplateVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateVersion::V1 => "v1",
            TemplateVersion::V2 => "v2",
        }
    }
}

impl fmt::Display for TemplateVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects exactly one skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkeletonKey {
    pub role: Role,
    pub version: TemplateVersion,
}

impl SkeletonKey {
    pub fn new(role: Role, version: TemplateVersion) -> Self {
        Self { role, version }
    }

    /// Name the skeleton is registered under
    pub fn template_name(&self) -> &'static str {
        match (self.role, self.version) {
            (Role::Master, TemplateVersion::V2) => "master/v2",
            (Role::Master, TemplateVersion::V1) => "master/v1",
            (Role::Compute, TemplateVersion::V2) => "compute/v2",
            (Role::Compute, TemplateVersion::V1) => "compute/v1",
        }
    }

    /// Every role/version combination
    pub fn all() -> [SkeletonKey; 4] {
        [
            SkeletonKey::new(Role::Master, TemplateVersion::V2),
            SkeletonKey::new(Role::Master, TemplateVersion::V1),
            SkeletonKey::new(Role::Compute, TemplateVersion::V2),
            SkeletonKey::new(Role::Compute, TemplateVersion::V1),
        ]
    }
}

impl fmt::Display for SkeletonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_is_registered() {
        for key in SkeletonKey::all() {
            assert!(
                ALL_TEMPLATES.iter().any(|(name, _)| *name == key.template_name()),
                "{} has no embedded template",
                key
            );
        }
    }

    #[test]
    fn test_template_version_values() {
        let parse = |s| <TemplateVersion as ValueEnum>::from_str(s, true);
        assert_eq!(parse("v1").unwrap(), TemplateVersion::V1);
        assert_eq!(parse("V2").unwrap(), TemplateVersion::V2);
        assert_eq!(parse("2").unwrap(), TemplateVersion::V2);
        assert!(parse("v3").is_err());
        assert_eq!(TemplateVersion::default(), TemplateVersion::V2);

        for version in TemplateVersion::value_variants() {
            let value = version.to_possible_value().unwrap();
            assert_eq!(value.get_name(), version.as_str());
        }
    }

    #[test]
    fn test_skeletons_start_with_cloud_config_marker() {
        assert!(MASTER_V2.starts_with("#cloud-config\n"));
        assert!(COMPUTE_V2.starts_with("#cloud-config\n"));
    }

    #[test]
    fn test_legacy_skeletons_extend_current() {
        assert!(MASTER_V1.contains(r#"{% extends "master/v2" %}"#));
        assert!(COMPUTE_V1.contains(r#"{% extends "compute/v2" %}"#));
    }
}
