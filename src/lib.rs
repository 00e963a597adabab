// file: src/lib.rs
// version: 3.0.0
// guid: d82472d1-7f0f-4eb4-b0a3-6e1547103eb4

//! # keto
//!
//! Builds the cloud-config user data that CoreOS nodes consume on first boot
//! to join a Kubernetes cluster as a master (etcd + control plane) or a
//! compute node.
//!
//! ```no_run
//! use keto::userdata::{MasterRegistry, UserData, UserDater};
//!
//! # fn main() -> keto::Result<()> {
//! let userdata = UserData::new()?;
//! let masters = MasterRegistry::from([(0, "10.0.0.1"), (1, "10.0.0.2")]);
//! let document = userdata.render_master_cloud_config("aws", "prod-1", "v1.6.4", &masters)?;
//! assert!(document.as_str().starts_with("#cloud-config"));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod userdata;

pub use error::{KetoError, Result};

/// Version information for the utility
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
