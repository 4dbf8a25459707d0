use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::{load_table, DetectionArgs, OutputFormat};
use crate::detection::resolver::TypeResolver;
use crate::restore::{plan_rename, rename_selected};
use crate::session::Session;

#[derive(Args)]
pub struct RenameArgs {
    /// File whose extension should be restored
    #[arg(required = true)]
    pub file: PathBuf,

    /// Print the new name without renaming
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub detection: DetectionArgs,
}

#[derive(Serialize)]
struct RenameReport {
    from: PathBuf,
    to: PathBuf,
    type_id: String,
    renamed: bool,
}

/// Execute rename subcommand
///
/// # Errors
///
/// Returns an error if the file cannot be selected, its type is unknown, or
/// the rename fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RenameArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let table = load_table()?;
    let resolver = TypeResolver::with_options(table, args.detection.resolver_options());

    // Select the file from its own directory so the rename stays alongside it
    let parent = match args.file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = args
        .file
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("{} does not name a file", args.file.display()))?
        .to_string_lossy()
        .into_owned();

    let mut session = Session::new(&parent)?;
    session.select_file(&name)?;

    let plan = plan_rename(&session, &resolver)?;
    if verbose {
        eprintln!(
            "Detected {} as {}",
            plan.from.display(),
            plan.type_id
        );
    }

    let renamed = if args.dry_run || plan.is_noop() {
        false
    } else {
        // Console output is rendered below in the requested format
        let mut notices: Vec<String> = Vec::new();
        rename_selected(&mut session, &resolver, &mut notices)?;
        true
    };

    match format {
        OutputFormat::Text => {
            if renamed {
                println!("file renamed to: {}", plan.new_name());
            } else if plan.is_noop() {
                println!("file already named: {}", plan.new_name());
            } else {
                println!("would rename to: {}", plan.new_name());
            }
        }
        OutputFormat::Json => {
            let report = RenameReport {
                from: plan.from.clone(),
                to: plan.to.clone(),
                type_id: plan.type_id.to_string(),
                renamed,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Tsv => {
            println!("from\tto\ttype\trenamed");
            println!(
                "{}\t{}\t{}\t{renamed}",
                plan.from.display(),
                plan.to.display(),
                plan.type_id
            );
        }
    }

    Ok(())
}
