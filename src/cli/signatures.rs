use crate::cli::{load_table, OutputFormat};

/// Execute signatures subcommand
///
/// # Errors
///
/// Returns an error if the embedded table is invalid or JSON output fails.
pub fn run(format: OutputFormat) -> anyhow::Result<()> {
    let table = load_table()?;

    match format {
        OutputFormat::Text => {
            for entry in table.all_entries() {
                let patterns: Vec<String> = entry
                    .patterns
                    .iter()
                    .map(|p| p.to_trimmed_string())
                    .collect();
                println!("{:<6}{}", entry.type_id.as_str(), patterns.join(" | "));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(table.all_entries())?);
        }
        OutputFormat::Tsv => {
            println!("type\tpattern");
            for entry in table.all_entries() {
                for pattern in &entry.patterns {
                    println!("{}\t{}", entry.type_id, pattern.to_trimmed_string());
                }
            }
        }
    }

    Ok(())
}
