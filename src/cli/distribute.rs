//! CLI command for distributing a sale amount

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use log::{debug, info};
use serde_json::json;

use super::{create_output, record_run};
use crate::config::{GstrPaths, Settings};
use crate::error::LedgerResult;
use crate::export::{
    export_distribution_csv, export_distribution_json, export_distribution_yaml, ExportFormat,
};
use crate::journal::{JournalEntry, Operation};
use crate::models::{DistributionInput, Precision, RangePolicy};
use crate::reports::DistributionReport;
use crate::services::{Distributor, RandomSource};

/// Arguments of `gstr distribute`
#[derive(Args, Debug)]
pub struct DistributeArgs {
    /// Total sale amount (e.g. 10000, 10,000.50, ₹2500)
    #[arg(short, long)]
    pub amount: Option<String>,

    /// First day of the range (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(short, long)]
    pub from: Option<String>,

    /// Last day of the range, inclusive
    #[arg(short, long)]
    pub to: Option<String>,

    /// Decimal places of each part: 0 or 2 (defaults to the configured value)
    #[arg(short, long)]
    pub precision: Option<Precision>,

    /// Reject ranges longer than 30 days instead of using the first 30
    #[arg(long)]
    pub exact_range: bool,

    /// Seed for a reproducible split
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the distribution to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output file format (defaults to the file extension, then csv)
    #[arg(long, requires = "output")]
    pub format: Option<ExportFormat>,

    /// Show only the per-day totals
    #[arg(long)]
    pub days_only: bool,

    /// Print nothing to the terminal
    #[arg(short, long)]
    pub quiet: bool,
}

/// Handle `gstr distribute`
pub fn handle_distribute_command(
    paths: &GstrPaths,
    settings: &Settings,
    args: DistributeArgs,
) -> LedgerResult<()> {
    let input = DistributionInput {
        amount: args.amount,
        from: args.from,
        to: args.to,
    };
    let request = input.validate()?;

    let mut config = settings.distribution_config();
    if let Some(precision) = args.precision {
        config.precision = precision;
    }
    if args.exact_range {
        config.range_policy = RangePolicy::Exact;
    }
    debug!("distribution config: {:?}", config);

    let distributor = Distributor::new(config);
    let result = match args.seed {
        Some(seed) => distributor.distribute(&request, &mut RandomSource::seeded(seed))?,
        None => distributor.distribute(&request, &mut RandomSource::from_entropy())?,
    };
    info!(
        "distributed {} as {} across {}",
        request.total_amount(),
        result.adjusted_total,
        result.span
    );

    if let Some(path) = &args.output {
        let format = args
            .format
            .or_else(|| ExportFormat::from_path(path))
            .unwrap_or_default();

        let mut writer = create_output(path)?;
        match format {
            ExportFormat::Csv => export_distribution_csv(&result, &mut writer)?,
            ExportFormat::Json => export_distribution_json(&result, &mut writer, true)?,
            ExportFormat::Yaml => export_distribution_yaml(&result, &mut writer)?,
        }
        writer.flush()?;

        if !args.quiet {
            println!("Distribution exported to: {} ({})", path.display(), format);
        }
    }

    if !args.quiet {
        let report = DistributionReport::from_result(&result);
        if args.days_only {
            println!("{}", report.format_day_totals(&settings.currency_symbol));
        } else {
            println!("{}", report.format_terminal(&settings.currency_symbol));
        }
    }

    record_run(
        paths,
        settings,
        JournalEntry::new(
            Operation::Distribute,
            format!("{} over {}", request.total_amount(), result.span),
            json!({
                "total_amount": request.total_amount().to_string(),
                "adjusted_total": result.adjusted_total.to_string(),
                "from": request.from_date(),
                "to": request.to_date(),
                "precision": result.precision,
                "range_policy": config.range_policy,
                "seed": args.seed,
                "output": args.output.as_ref().map(|p| p.display().to_string()),
            }),
        ),
    );

    Ok(())
}
