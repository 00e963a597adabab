// file: src/userdata/document.rs
// version: 1.0.0
// guid: b4ae93c4-bd05-4f18-bd92-7cb00e956871

//! Rendered boot documents

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::Result;

/// A complete cloud-config document, ready to hand to an instance launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootDocument {
    text: String,
}

impl BootDocument {
    pub(crate) fn new(text: String) -> Self {
        Self { text }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.text.into_bytes()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// SHA-256 of the payload, hex encoded
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(self.as_bytes()))
    }

    /// Base64 payload, as EC2 style launch APIs expect user data
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.as_bytes())
    }

    /// Parse the document into its unit and file lists
    pub fn cloud_config(&self) -> Result<CloudConfig> {
        Ok(serde_yaml::from_str(&self.text)?)
    }
}

impl AsRef<[u8]> for BootDocument {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Read-only view of a rendered document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    pub coreos: CoreOs,
    #[serde(default)]
    pub write_files: Vec<WriteFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreOs {
    #[serde(default)]
    pub update: Option<UpdateConfig>,
    #[serde(default)]
    pub units: Vec<Unit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateConfig {
    #[serde(rename = "reboot-strategy")]
    pub reboot_strategy: Option<String>,
}

/// systemd unit descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "drop-ins", default, skip_serializing_if = "Vec::is_empty")]
    pub drop_ins: Vec<DropIn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropIn {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteFile {
    pub path: String,
    pub permissions: String,
    pub owner: String,
    pub content: String,
}

impl CloudConfig {
    /// Unit names in startup order
    pub fn unit_names(&self) -> Vec<&str> {
        self.coreos.units.iter().map(|u| u.name.as_str()).collect()
    }

    pub fn unit(&self, name: &str) -> Option<&Unit> {
        self.coreos.units.iter().find(|u| u.name == name)
    }

    /// File paths in write order
    pub fn file_paths(&self) -> Vec<&str> {
        self.write_files.iter().map(|f| f.path.as_str()).collect()
    }

    pub fn file(&self, path: &str) -> Option<&WriteFile> {
        self.write_files.iter().find(|f| f.path == path)
    }
}
