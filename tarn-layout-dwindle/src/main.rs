use anyhow::{Context, Result};
use tarn_layout_dwindle::{Args, Config, Controller};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args: Args = argh::from_env();
    if args.version {
        println!("tarn-dwindle {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::resolve(&args).context("Invalid configuration")?;
    tracing::info!("tarn-dwindle starting with {:?}", config);

    let mut controller = Controller::connect(config)?;
    controller
        .discover()
        .context("Failed to set up the layout generator")?;
    controller.activate_outputs();

    controller.run().context("Layout generator stopped")
}
