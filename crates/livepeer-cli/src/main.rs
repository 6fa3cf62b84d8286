//! Livepeer CLI — upload videos, inspect assets and export them to IPFS.
//!
//! Set LIVEPEER_API_KEY (and optionally LIVEPEER_API_URL). Uses Bearer auth by default.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use livepeer_api_client::{AssetClient, WaitOptions};
use livepeer_cli::{check_video_file, exit_code, init_environment};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "livepeer", about = "Livepeer asset CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request an upload URL and upload a video file
    Upload {
        /// Path to the video file
        file: PathBuf,
    },
    /// Get an asset's current metadata
    Get {
        /// Asset ID
        id: String,
    },
    /// Export a ready asset to IPFS
    Export {
        /// Asset ID
        id: String,
    },
    /// Wait until an asset has a playback URL
    Wait {
        /// Asset ID
        id: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Upload a video, wait for processing, optionally export to IPFS
    Process {
        /// Path to the video file
        file: PathBuf,
        /// Export the asset to IPFS once it is playable
        #[arg(long)]
        export: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Args)]
struct WaitArgs {
    /// Give up after this many seconds
    #[arg(long, default_value = "600")]
    timeout_secs: u64,
    /// Seconds between polls
    #[arg(long, default_value = "20")]
    interval_secs: u64,
}

impl From<&WaitArgs> for WaitOptions {
    fn from(args: &WaitArgs) -> Self {
        WaitOptions {
            timeout: Duration::from_secs(args.timeout_secs),
            interval: Duration::from_secs(args.interval_secs),
        }
    }
}

#[derive(Serialize)]
struct ProcessSummary {
    asset_id: String,
    playback_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    export_task_id: Option<String>,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_environment();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:?}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = AssetClient::from_env().context(
        "Failed to create API client. Set LIVEPEER_API_KEY (and optionally LIVEPEER_API_URL)",
    )?;

    match cli.command {
        Commands::Upload { file } => {
            check_video_file(&file)?;
            let target = client
                .request_upload_url_and_upload_content(&file)
                .await
                .context("Failed to upload file")?;
            print_json(&target)?;
        }
        Commands::Get { id } => {
            let asset = client
                .retrieve_asset(&id)
                .await
                .with_context(|| format!("Failed to retrieve asset {}", id))?;
            print_json(&asset)?;
        }
        Commands::Export { id } => {
            let task_id = client
                .export_asset_to_ipfs(&id)
                .await
                .with_context(|| format!("Failed to export asset {}", id))?;
            print_json(&serde_json::json!({ "asset_id": id, "task_id": task_id }))?;
        }
        Commands::Wait { id, wait } => {
            let playback_url = client
                .wait_for_playback_url(&id, (&wait).into())
                .await
                .with_context(|| format!("Failed waiting for playback URL of asset {}", id))?;
            print_json(&serde_json::json!({ "asset_id": id, "playback_url": playback_url }))?;
        }
        Commands::Process { file, export, wait } => {
            check_video_file(&file)?;
            tracing::info!(file = %file.display(), "Uploading file to Livepeer");

            let target = client
                .request_upload_url_and_upload_content(&file)
                .await
                .context("Failed to upload file")?;
            let playback_url = client
                .wait_for_playback_url(&target.asset_id, (&wait).into())
                .await
                .with_context(|| {
                    format!("Failed waiting for playback URL of asset {}", target.asset_id)
                })?;

            let export_task_id = if export {
                Some(
                    client
                        .export_asset_to_ipfs(&target.asset_id)
                        .await
                        .context("Failed to export asset to IPFS")?,
                )
            } else {
                None
            };

            print_json(&ProcessSummary {
                asset_id: target.asset_id,
                playback_url,
                export_task_id,
            })?;
        }
    }

    Ok(())
}
