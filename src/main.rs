use adsplit::{cli::Cli, config::RunConfig, pipeline};
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = RunConfig::resolve(&args)?;
    let outcome = pipeline::run(&config)?;

    if args.summary {
        print!("{}", outcome.summary.to_report_string());
    }

    Ok(())
}
