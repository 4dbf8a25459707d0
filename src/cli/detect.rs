use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_table, DetectionArgs, OutputFormat};
use crate::detection::resolver::{Detection, TypeResolver};

#[derive(Args)]
pub struct DetectArgs {
    /// Files to inspect
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub detection: DetectionArgs,
}

/// Execute detect subcommand
///
/// Every file is inspected even if an earlier one cannot be read; failures are
/// reported on stderr as they happen.
///
/// # Errors
///
/// Returns an error if any file could not be inspected.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: DetectArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let table = load_table()?;
    let resolver = TypeResolver::with_options(table, args.detection.resolver_options());

    let mut detections = Vec::with_capacity(args.files.len());
    let mut failed = 0usize;
    for path in &args.files {
        match resolver.detect(path) {
            Ok(detection) => detections.push(detection),
            Err(e) => {
                eprintln!("Warning: {}: {e}", path.display());
                failed += 1;
            }
        }
    }

    match format {
        OutputFormat::Text => print_text_results(&detections, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&detections)?),
        OutputFormat::Tsv => print_tsv_results(&detections),
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} files could not be inspected", args.files.len());
    }

    Ok(())
}

fn print_text_results(detections: &[Detection], verbose: bool) {
    for detection in detections {
        let type_name = detection
            .type_id
            .as_ref()
            .map_or_else(|| "unknown".to_string(), ToString::to_string);

        println!(
            "{}: {type_name} [{}]",
            detection.path.display(),
            detection.prefix.to_trimmed_string()
        );

        if verbose {
            if let (Some(signature), Some(container)) = (&detection.signature, detection.container)
            {
                println!("   Signature: {signature}, refined by archive entries to {container}");
            }
        }
        if let Some(error) = &detection.archive_error {
            println!("   Warning: {error}");
        }
    }
}

fn print_tsv_results(detections: &[Detection]) {
    println!("path\tprefix\ttype");
    for detection in detections {
        println!(
            "{}\t{}\t{}",
            detection.path.display(),
            detection.prefix.to_trimmed_string(),
            detection
                .type_id
                .as_ref()
                .map_or("unknown", |id| id.as_str())
        );
    }
}
