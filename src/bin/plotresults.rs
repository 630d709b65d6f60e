use anyhow::{Context, Result};
use plotresults::plot::{parse_cli, run, PlotArgs};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn plot(args: &PlotArgs) -> Result<()> {
    run(args).with_context(|| format!("could not plot {}", args.data.display()))
}

fn main() {
    let args = parse_cli();

    // quiet turns every message off, errors included
    let filter = if args.quiet {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(e) = plot(&args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
