use clap::Parser;
use faxc_drv::{run, verbosity_filter, Cli};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(cli.verbose)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    run(&cli)?;
    Ok(())
}
