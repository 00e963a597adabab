// file: src/cli/args.rs
// version: 2.0.0
// guid: f6g7h8i9-j0k1-2345-6789-012345fghijk

//! Command line argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::logging::LogFormat;
use crate::userdata::{Role, TemplateVersion};

#[derive(Parser)]
#[command(name = "keto")]
#[command(about = "Kubernetes clusters on CoreOS, bootstrapped from cloud-config user data")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl Cli {
    pub fn log_format(&self) -> LogFormat {
        if self.log_json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render node user data from a cluster spec
    #[command(subcommand)]
    Userdata(UserdataCommand),

    /// Create resources
    Create {
        #[command(subcommand)]
        resource: Resource,
    },

    /// Update resources
    Update {
        #[command(subcommand)]
        resource: Resource,
    },

    /// Delete resources
    Delete {
        #[command(subcommand)]
        resource: Resource,
    },

    /// Get resources
    Get {
        #[command(subcommand)]
        resource: Resource,
    },
}

#[derive(Subcommand)]
pub enum UserdataCommand {
    /// Render user data for a master (control plane) node
    Master(RenderArgs),

    /// Render user data for a compute (worker) node
    Compute(RenderArgs),
}

impl UserdataCommand {
    pub fn role(&self) -> Role {
        match self {
            UserdataCommand::Master(_) => Role::Master,
            UserdataCommand::Compute(_) => Role::Compute,
        }
    }

    pub fn args(&self) -> &RenderArgs {
        match self {
            UserdataCommand::Master(args) | UserdataCommand::Compute(args) => args,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[arg(short, long, help = "Cluster spec file (.yaml, .yml or .toml)")]
    pub spec: PathBuf,

    #[arg(long, value_enum, default_value_t = TemplateVersion::V2)]
    pub template_version: TemplateVersion,

    #[arg(short, long, value_enum, default_value = "raw")]
    pub format: OutputFormat,

    #[arg(short, long, help = "Write to this file instead of stdout")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Resource {
    /// A cluster
    #[command(aliases = ["clusters"])]
    Cluster { name: String },

    /// A pool of master nodes
    #[command(aliases = ["masterpools", "mp"])]
    Masterpool { name: String },

    /// A pool of compute nodes
    #[command(aliases = ["computepools", "cp"])]
    Computepool { name: String },
}

impl Resource {
    pub fn kind(&self) -> &'static str {
        match self {
            Resource::Cluster { .. } => "cluster",
            Resource::Masterpool { .. } => "masterpool",
            Resource::Computepool { .. } => "computepool",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Resource::Cluster { name }
            | Resource::Masterpool { name }
            | Resource::Computepool { name } => name,
        }
    }
}

/// How rendered user data is written
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// The cloud-config document as is
    Raw,
    /// Base64 of the document
    Base64,
    /// JSON summary with the base64 payload
    Json,
}
