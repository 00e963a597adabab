// file: src/cli/commands.rs
// version: 2.0.0
// guid: g7h8i9j0-k1l2-3456-7890-123456ghijkl

//! Command implementations for the CLI

use serde::Serialize;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, trace};

use super::args::{OutputFormat, Resource, UserdataCommand};
use crate::{
    config::{loader::ConfigLoader, ClusterSpec},
    error::KetoError,
    logging::logger::{with_async_operation_span, with_operation_span},
    userdata::{BootDocument, Role, TemplateVersion, UserData, UserDater},
    Result,
};

/// Render user data for a node role and write it out
pub async fn userdata_command(cmd: &UserdataCommand) -> Result<()> {
    let role = cmd.role();
    let args = cmd.args();
    let version = args.template_version;

    let spec = ConfigLoader::new().load_cluster_spec(&args.spec)?;
    info!(
        "Rendering {} user data ({}) for cluster {}",
        role, version, spec.name
    );

    // Render completely before touching any output.
    let document = with_operation_span("render_userdata", || {
        render_userdata(role, &spec, version)
    })?;
    debug!(
        "Rendered {} bytes of {} user data, sha256 {}",
        document.len(),
        role,
        document.fingerprint()
    );
    trace!("cloud-config for {}: {}", role, document.as_str());

    let payload = format_output(&document, role, version, args.format)?;

    with_async_operation_span("write_userdata", || async {
        match &args.output {
            Some(path) => write_file(path, &payload).await,
            None => write_stdout(&payload).await,
        }
    })
    .await
}

/// Render the document for `role` from a loaded cluster spec
pub fn render_userdata(
    role: Role,
    spec: &ClusterSpec,
    version: TemplateVersion,
) -> Result<BootDocument> {
    let userdata = UserData::new()?.with_version(version);
    let identity = spec.identity();

    match role {
        Role::Master => userdata.render_master_cloud_config(
            &identity.cloud_provider_name,
            &identity.cluster_name,
            &identity.kubernetes_version,
            &spec.registry(),
        ),
        Role::Compute => userdata.render_compute_cloud_config(
            &identity.cloud_provider_name,
            &identity.cluster_name,
            &identity.kubernetes_version,
        ),
    }
}

#[derive(Serialize)]
struct RenderSummary<'a> {
    role: Role,
    version: TemplateVersion,
    fingerprint: String,
    bytes: usize,
    units: Vec<&'a str>,
    files: Vec<&'a str>,
    user_data: String,
}

/// Encode a rendered document in the requested output format
pub fn format_output(
    document: &BootDocument,
    role: Role,
    version: TemplateVersion,
    format: OutputFormat,
) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Raw => Ok(document.as_bytes().to_vec()),
        OutputFormat::Base64 => Ok(format!("{}\n", document.to_base64()).into_bytes()),
        OutputFormat::Json => {
            let config = document.cloud_config()?;
            let summary = RenderSummary {
                role,
                version,
                fingerprint: document.fingerprint(),
                bytes: document.len(),
                units: config.unit_names(),
                files: config.file_paths(),
                user_data: document.to_base64(),
            };
            let mut json = serde_json::to_vec_pretty(&summary)?;
            json.push(b'\n');
            Ok(json)
        }
    }
}

async fn write_file(path: &Path, payload: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, payload).await?;
    info!("Wrote user data to {}", path.display());
    Ok(())
}

async fn write_stdout(payload: &[u8]) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(payload).await?;
    stdout.flush().await?;
    Ok(())
}

/// Headline for a failed `userdata` command.
///
/// Generation errors point at the skeletons or the render inputs; anything
/// else came from reading the spec or writing the output.
pub fn userdata_failure(role: Role, err: &KetoError) -> String {
    if err.is_generation_error() {
        format!("failed to render {} user data", role)
    } else {
        format!("{} user data was not written", role)
    }
}

/// Resource management verbs; none of them is implemented yet
pub async fn resource_command(verb: &str, resource: &Resource) -> Result<()> {
    Err(KetoError::not_implemented(format!(
        "{} {} {}",
        verb,
        resource.kind(),
        resource.name()
    )))
}
