// file: src/config/loader.rs
// version: 2.0.0
// guid: d4e5f6g7-h8i9-0123-4567-890123defghi

//! Cluster spec loading and environment variable substitution

use super::ClusterSpec;
use crate::error::KetoError;
use crate::Result;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Spec file formats, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Yaml,
    Toml,
}

impl SpecFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(SpecFormat::Yaml),
            Some("toml") => Ok(SpecFormat::Toml),
            _ => Err(KetoError::config(format!(
                "Unsupported spec file format: {} (expected .yaml, .yml or .toml)",
                path.display()
            ))),
        }
    }
}

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
    env_vars: HashMap<String, String>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            env_vars: std::env::vars().collect(),
        }
    }

    /// Load and validate a cluster spec file
    pub fn load_cluster_spec<P: AsRef<Path>>(&self, path: P) -> Result<ClusterSpec> {
        let path = path.as_ref();
        let format = SpecFormat::from_path(path)?;
        let content = fs::read_to_string(path).map_err(|e| {
            KetoError::config(format!(
                "Failed to read cluster spec file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loading cluster spec from {}", path.display());
        self.parse_cluster_spec(&content, format)
    }

    /// Parse and validate cluster spec content
    pub fn parse_cluster_spec(&self, content: &str, format: SpecFormat) -> Result<ClusterSpec> {
        let expanded = self.expand_env_vars(content)?;
        let spec: ClusterSpec = match format {
            SpecFormat::Yaml => serde_yaml::from_str(&expanded)?,
            SpecFormat::Toml => toml::from_str(&expanded)?,
        };

        spec.validate_spec()?;

        Ok(spec)
    }

    /// Expand environment variables in configuration content
    fn expand_env_vars(&self, content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| KetoError::config(format!("Invalid regex pattern: {}", e)))?;

        let mut result = content.to_string();
        let mut missing_vars = Vec::new();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];

            if let Some(value) = self.env_vars.get(var_name) {
                result = result.replace(placeholder, value);
            } else if !missing_vars.iter().any(|v| v == var_name) {
                missing_vars.push(var_name.to_string());
            }
        }

        if !missing_vars.is_empty() {
            return Err(KetoError::config(format!(
                "Missing environment variables: {}",
                missing_vars.join(", ")
            )));
        }

        Ok(result)
    }

    /// Set environment variable for substitution
    pub fn set_env_var(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
