// file: src/userdata/engine.rs
// version: 1.0.0
// guid: e63483bc-a31b-48ea-b1fe-f1da8bbda1ff

//! Template engine for the embedded cloud-config skeletons
//!
//! Uses minijinja with:
//! - Strict undefined handling, so a skeleton referencing a field the context
//!   lacks fails instead of rendering an empty string
//! - No auto-escaping (the output is YAML carrying shell, not HTML)
//! - Trailing newlines kept, so partials splice in line by line
//!
//! The skeleton set is compiled and verified once per process and shared
//! read-only afterwards.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use std::sync::OnceLock;
use tracing::debug;

use super::context::{ContextBuilder, RenderContext};
use super::registry::MasterRegistry;
use super::skeleton::{Role, SkeletonKey, ALL_TEMPLATES};
use crate::config::ClusterIdentity;
use crate::error::KetoError;
use crate::Result;

static SHARED: OnceLock<TemplateEngine> = OnceLock::new();

/// Compiled skeleton set
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Compile the embedded skeletons and check that every role/version
    /// renders against a context of its role.
    pub fn compile() -> Result<Self> {
        let engine = Self::from_templates(ALL_TEMPLATES)?;
        engine.verify()?;
        debug!("Compiled {} embedded skeletons", ALL_TEMPLATES.len());
        Ok(engine)
    }

    /// Register templates, failing on the first one that does not parse
    pub fn from_templates(templates: &[(&'static str, &'static str)]) -> Result<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);

        for &(name, source) in templates {
            env.add_template(name, source)
                .map_err(|source| KetoError::Skeleton {
                    name: name.to_string(),
                    source,
                })?;
        }

        Ok(Self { env })
    }

    /// Process-wide engine over the embedded skeletons.
    ///
    /// A compile failure is returned to every caller; nothing is cached
    /// until compilation succeeds.
    pub fn shared() -> Result<&'static TemplateEngine> {
        if let Some(engine) = SHARED.get() {
            return Ok(engine);
        }
        let engine = Self::compile()?;
        Ok(SHARED.get_or_init(|| engine))
    }

    /// Render the skeleton selected by `key`
    pub fn render(&self, key: SkeletonKey, ctx: &RenderContext) -> Result<String> {
        self.render_named(key.template_name(), ctx)
    }

    /// Render any registered template by name
    pub fn render_named<S: Serialize>(&self, name: &str, ctx: &S) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }

    // Includes and extends resolve lazily, so a missing partial or a field
    // the context lacks only shows up when a skeleton is rendered.
    fn verify(&self) -> Result<()> {
        let identity = ClusterIdentity::new("aws", "verify", "v0.0.0");
        let registry = MasterRegistry::from([(0, "127.0.0.1")]);
        let builder = ContextBuilder::new();

        for key in SkeletonKey::all() {
            let ctx = match key.role {
                Role::Master => builder.build_master_context(&identity, &registry)?,
                Role::Compute => builder.build_compute_context(&identity)?,
            };
            self.render(key, &ctx).map_err(|e| match e {
                KetoError::Render(source) => KetoError::Skeleton {
                    name: key.template_name().to_string(),
                    source,
                },
                other => other,
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::userdata::skeleton::TemplateVersion;

    fn identity() -> ClusterIdentity {
        ClusterIdentity::new("aws", "prod-1", "v1.6.4")
    }

    #[test]
    fn test_embedded_skeletons_compile() {
        assert!(TemplateEngine::compile().is_ok());
    }

    #[test]
    fn test_shared_engine_is_reused() {
        let a = TemplateEngine::shared().unwrap() as *const TemplateEngine;
        let b = TemplateEngine::shared().unwrap() as *const TemplateEngine;
        assert_eq!(a, b);
    }

    #[test]
    fn test_malformed_skeleton_is_rejected() {
        let result = TemplateEngine::from_templates(&[("broken", "{% for m in masters %}Node")]);
        match result {
            Err(KetoError::Skeleton { name, .. }) => assert_eq!(name, "broken"),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("unbalanced for loop compiled"),
        }
    }

    #[test]
    fn test_undefined_field_is_a_render_error() {
        let engine = TemplateEngine::from_templates(&[("t", "{{ keto_k8_image }} {{ nope }}")]).unwrap();
        let ctx = ContextBuilder::new().build_compute_context(&identity()).unwrap();

        let err = engine.render_named("t", &ctx).unwrap_err();
        assert!(matches!(err, KetoError::Render(_)));
    }

    #[test]
    fn test_compute_context_cannot_render_master_skeleton() {
        let engine = TemplateEngine::shared().unwrap();
        let ctx = ContextBuilder::new().build_compute_context(&identity()).unwrap();

        let err = engine
            .render(SkeletonKey::new(Role::Master, TemplateVersion::V2), &ctx)
            .unwrap_err();
        assert!(matches!(err, KetoError::Render(_)));
    }

    #[test]
    fn test_scalar_substitution() {
        let engine = TemplateEngine::from_templates(&[(
            "t",
            "{{ cloud_provider_name }}/{{ cluster_name }}/{{ kube_version }}\n",
        )])
        .unwrap();
        let ctx = ContextBuilder::new().build_compute_context(&identity()).unwrap();

        assert_eq!(engine.render_named("t", &ctx).unwrap(), "aws/prod-1/v1.6.4\n");
    }
}
