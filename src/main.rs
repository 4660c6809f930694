use anyhow::Result;
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Classic grid Snake in the terminal")]
struct Cli {
    /// Grid width in cells
    #[arg(long, default_value = "20")]
    width: u32,

    /// Grid height in cells
    #[arg(long, default_value = "15")]
    height: u32,

    /// Seconds between simulation ticks
    #[arg(long, default_value = "0.5")]
    tick_interval: f32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = GameConfig::new(cli.width, cli.height);
    config.tick_interval = cli.tick_interval;

    let mut mode = HumanMode::new(config)?;
    mode.run().await?;

    Ok(())
}
