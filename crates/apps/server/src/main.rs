use blendcube_server::{logging, Config};
use clap::Parser;
use cube::{CubeModels, CubeService};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "blendcube")]
#[command(about = "Serve 3x3x3 puzzle cubes as glTF", long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long = "conf", default_value = "./config.toml")]
    conf: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load(&args.conf)?;
    let log_file = logging::init(&config.log)?;
    tracing::info!(path = %args.conf.display(), "server configure: success");

    let service = CubeService::new();
    service.publish(CubeModels::load(
        &config.model.file_path,
        &config.model.binary_file_path,
    )?)?;
    tracing::info!(
        gltf = %config.model.file_path.display(),
        glb = %config.model.binary_file_path.display(),
        "loading model: success"
    );

    blendcube_server::run(&config, Arc::new(service), log_file).await
}
