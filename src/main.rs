// file: src/main.rs
// version: 2.0.0
// guid: h8i9j0k1-l2m3-4567-8901-234567hijklm

//! keto - main entry point

use anyhow::Context;
use clap::Parser;
use keto::{
    cli::{args::Cli, args::Commands, commands::*},
    logging::logger,
    userdata::UserData,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    logger::init_logger(cli.verbose, cli.quiet, cli.log_format())?;

    // A broken skeleton is a build defect; refuse to start rather than fail mid-provisioning.
    UserData::new().context("embedded cloud-config skeletons failed to compile")?;

    match &cli.command {
        Commands::Userdata(cmd) => userdata_command(cmd).await.map_err(|err| {
            let headline = userdata_failure(cmd.role(), &err);
            anyhow::Error::new(err).context(headline)
        }),
        Commands::Create { resource } => Ok(resource_command("create", resource).await?),
        Commands::Update { resource } => Ok(resource_command("update", resource).await?),
        Commands::Delete { resource } => Ok(resource_command("delete", resource).await?),
        Commands::Get { resource } => Ok(resource_command("get", resource).await?),
    }
}
