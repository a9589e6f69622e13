use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crop_advisor::server::{self, AppState};
use crop_advisor::{ArtifactManager, CropAdvisor, ModelSignature, RuntimeConfig};
use log::{info, warn};

/// Crop recommendation web service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Host to bind to
    #[arg(long, env = "CROP_ADVISOR_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "CROP_ADVISOR_PORT", default_value_t = 5000)]
    port: u16,

    /// Directory holding the scalers and the model (defaults to $CROP_ADVISOR_ARTIFACTS or the user data dir)
    #[arg(long)]
    artifacts_dir: Option<PathBuf>,

    /// Download missing artifacts from this base URL before starting
    #[arg(long)]
    fetch_from: Option<String>,

    /// Remove existing artifacts before fetching
    #[arg(short, long, requires = "fetch_from")]
    fresh: bool,

    /// Name of the model's float input tensor
    #[arg(long, default_value = crop_advisor::advisor::DEFAULT_INPUT_NAME)]
    input_name: String,

    /// Name of the model's label output tensor
    #[arg(long, default_value = crop_advisor::advisor::DEFAULT_OUTPUT_NAME)]
    output_name: String,

    /// Threads used to run independent graph nodes in parallel (0 lets ONNX Runtime decide)
    #[arg(long, default_value_t = 0)]
    inter_threads: usize,

    /// Threads used within a single inference (0 lets ONNX Runtime decide)
    #[arg(long, default_value_t = 0)]
    intra_threads: usize,
}

async fn prepare_artifacts(args: &Args) -> anyhow::Result<ArtifactManager> {
    let manager = match &args.artifacts_dir {
        Some(dir) => ArtifactManager::new(dir),
        None => ArtifactManager::new_default(),
    }
    .context("Failed to open artifacts directory")?;
    info!("Artifacts dir: {:?}", manager.dir());

    if let Some(base_url) = &args.fetch_from {
        manager.fetch(base_url, args.fresh).await?;
    } else if !manager.is_complete() {
        warn!("Missing artifacts {:?}; pass --fetch-from to download them", manager.missing());
    }

    manager.verify()?;
    Ok(manager)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    crop_advisor::init_logger();
    let args = Args::parse();

    info!("=== Starting Crop Advisor v{} ===", env!("CARGO_PKG_VERSION"));

    let manager = prepare_artifacts(&args).await?;

    let runtime_config = RuntimeConfig::with_threads(args.inter_threads, args.intra_threads);
    let advisor = CropAdvisor::builder()
        .with_runtime_config(runtime_config)
        .with_signature(ModelSignature {
            input_name: args.input_name.clone(),
            output_name: args.output_name.clone(),
        })
        .with_artifacts(&manager.paths())?
        .build()?;
    info!("Advisor ready");

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", args.host, args.port))?;
    server::serve(addr, AppState::new(advisor)).await?;

    Ok(())
}
