use clap::Parser;
use tracing_subscriber::EnvFilter;

use ext_restorer::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("ext_restorer=debug,info")
    } else {
        EnvFilter::new("ext_restorer=warn")
    };

    // Logs go to stderr so shell and report output on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        None => {
            cli::shell::run(cli::shell::ShellArgs::default())?;
        }
        Some(cli::Commands::Shell(args)) => {
            cli::shell::run(args)?;
        }
        Some(cli::Commands::Detect(args)) => {
            cli::detect::run(args, cli.format, cli.verbose)?;
        }
        Some(cli::Commands::Rename(args)) => {
            cli::rename::run(args, cli.format, cli.verbose)?;
        }
        Some(cli::Commands::Signatures) => {
            cli::signatures::run(cli.format)?;
        }
    }

    Ok(())
}
