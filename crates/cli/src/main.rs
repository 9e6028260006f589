use anyhow::Result;
use clap::Parser;
use ra_cli::{logging::init_logging, render, run, CliArgs, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = Config::load(&args).await?;
    init_logging(&config.logging)?;

    // Failures travel inside the envelope; the exit status stays 0.
    let envelope = run(config, args.user_data.as_deref()).await;
    println!("{}", render(&envelope)?);
    Ok(())
}
