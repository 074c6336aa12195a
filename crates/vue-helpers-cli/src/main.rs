//! vue-helpers - preview inline Vue component output.

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;
mod config;
mod preview;

use cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_level());

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))
    .ok();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: Args) -> Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = config::load(&cwd, &args)?;
    let preview = preview::run(config, &args).into_diagnostic()?;

    for (_, html) in &preview.components {
        println!("{html}");
    }
    print!("{}", preview.app);

    for (path, js) in &preview.bundles {
        eprintln!("// {path}");
        eprintln!("{js}");
    }
    Ok(())
}
