//! CLI command for the monthly profit summary

use std::io::{BufReader, Write};
use std::path::PathBuf;

use clap::Args;
use log::info;
use serde_json::json;

use super::{create_output, open_input, record_run};
use crate::config::{GstrPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::journal::{JournalEntry, Operation};
use crate::reports::ProfitReport;
use crate::services::read_profit_csv;

/// Arguments of `gstr summary`
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// CSV with Purchase Month, Sale Month, Purchase Amount, Whole Sale Amount columns
    pub file: PathBuf,

    /// Export the summary to a CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle `gstr summary`
pub fn handle_summary_command(
    paths: &GstrPaths,
    settings: &Settings,
    args: SummaryArgs,
) -> LedgerResult<()> {
    let file = open_input(&args.file, "profit file")?;
    let import = read_profit_csv(BufReader::new(file))?;

    for skipped in &import.skipped {
        eprintln!("Skipped row {}: {}", skipped.row_number, skipped.reason);
    }

    if import.rows.is_empty() {
        let reason = if import.has_errors() {
            format!("{} row(s) skipped", import.skipped.len())
        } else {
            "the file has no data rows".to_string()
        };
        return Err(LedgerError::Import(format!(
            "No valid rows in {} ({})",
            args.file.display(),
            reason
        )));
    }

    let skipped = import.skipped.len();
    let report = ProfitReport::generate(import.rows)?;
    info!("summarized {} month(s) from {}", report.lines.len(), args.file.display());

    if let Some(path) = &args.output {
        let mut writer = create_output(path)?;
        report.export_csv(&mut writer)?;
        writer.flush()?;
        println!("Profit summary exported to: {}", path.display());
    } else {
        println!("{}", report.format_terminal(&settings.currency_symbol));
    }

    record_run(
        paths,
        settings,
        JournalEntry::new(
            Operation::Summary,
            format!("{} month(s), retail {}", report.lines.len(), report.total_retail),
            json!({
                "file": args.file.display().to_string(),
                "months": report.lines.len(),
                "skipped": skipped,
                "total_purchase": report.total_purchase.to_string(),
                "total_wholesale": report.total_wholesale.to_string(),
                "total_retail": report.total_retail.to_string(),
            }),
        ),
    );

    Ok(())
}
