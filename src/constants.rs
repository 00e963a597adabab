// file: src/constants.rs
// version: 1.0.0
// guid: 6958fd38-e65c-4292-9f11-009c269727c5

//! Build-time defaults shared by the user data generator and the CLI

/// Bootstrap image run by `keto-k8.service` on every node.
pub const DEFAULT_KETO_K8_IMAGE: &str = "quay.io/ukhomeofficedigital/keto-k8:v0.1.0";

/// Network overlay installed by the control plane bootstrap.
pub const DEFAULT_NETWORK_PROVIDER: &str = "canal";

/// Environment variable that pins a non-default bootstrap image for compute nodes.
pub const KETO_K8_IMAGE_URI_ENV: &str = "KETO_K8_IMAGE_URI";

/// etcd peer port advertised in the initial cluster member list.
pub const ETCD_PEER_PORT: u16 = 2380;

/// etcd client port.
pub const ETCD_CLIENT_PORT: u16 = 2379;
