//! Output formatting for review results.

use anyhow::Result;
use role_review_core::ReviewResult;

use crate::OutputFormat;

/// Print review results in the specified format.
pub fn print(result: &ReviewResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", result.format_report()),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print!("{}", compact(result)),
    }
    Ok(())
}

fn print_json(result: &ReviewResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

/// One `file:line: [role] message` line per issue.
fn compact(result: &ReviewResult) -> String {
    result
        .issues
        .iter()
        .map(|issue| format!("{issue}\n"))
        .collect()
}
