use std::io;
use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_table, DetectionArgs};
use crate::detection::resolver::TypeResolver;
use crate::session::Session;
use crate::shell::console::WriterConsole;
use crate::shell::Shell;

#[derive(Args, Default)]
pub struct ShellArgs {
    /// Directory to start in (defaults to the working directory)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    #[command(flatten)]
    pub detection: DetectionArgs,
}

/// Execute shell subcommand
///
/// # Errors
///
/// Returns an error if the start directory is invalid or stdin cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ShellArgs) -> anyhow::Result<()> {
    let table = load_table()?;
    let resolver = TypeResolver::with_options(table, args.detection.resolver_options());

    let session = match &args.dir {
        Some(dir) => Session::new(dir)?,
        None => Session::from_current_dir()?,
    };

    let mut shell = Shell::new(session, resolver, WriterConsole::new(io::stdout()));
    shell.run(io::stdin().lock())?;

    Ok(())
}
