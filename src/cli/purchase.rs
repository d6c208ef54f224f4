//! CLI commands for purchase invoices

use std::io::{BufReader, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;
use log::{debug, info};
use serde_json::json;

use super::{create_output, open_input, record_run};
use crate::config::{GstrPaths, Settings};
use crate::display::{format_purchase_list, format_rejected_draft};
use crate::error::{LedgerError, LedgerResult};
use crate::export::export_purchases_csv;
use crate::journal::{JournalEntry, Operation};
use crate::models::purchase::parse_invoice_date;
use crate::models::{InMemoryFirmDirectory, PurchaseDraft, ValidationError};
use crate::services::{
    read_firms, read_purchase_drafts, InMemoryPurchaseRepository, PurchaseService,
};

/// Purchase subcommands
#[derive(Subcommand, Debug)]
pub enum PurchaseCommands {
    /// Validate purchase drafts from a JSON file and total the accepted ones
    Check {
        /// JSON file holding one draft or an array of drafts
        file: PathBuf,

        /// JSON firm list used to fill in missing GSTINs
        #[arg(long)]
        firms: Option<PathBuf>,

        /// Only total invoices dated on or after this day
        #[arg(short, long)]
        from: Option<String>,

        /// Only total invoices dated on or before this day
        #[arg(short, long)]
        to: Option<String>,

        /// Export the accepted invoices to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle purchase commands
pub fn handle_purchase_command(
    paths: &GstrPaths,
    settings: &Settings,
    cmd: PurchaseCommands,
) -> LedgerResult<()> {
    match cmd {
        PurchaseCommands::Check {
            file,
            firms,
            from,
            to,
            output,
        } => handle_check(paths, settings, file, firms, from, to, output),
    }
}

fn handle_check(
    paths: &GstrPaths,
    settings: &Settings,
    file: PathBuf,
    firms: Option<PathBuf>,
    from: Option<String>,
    to: Option<String>,
    output: Option<PathBuf>,
) -> LedgerResult<()> {
    let from = parse_bound(from.as_deref(), "from date")?;
    let to = parse_bound(to.as_deref(), "to date")?;

    let directory = match &firms {
        Some(path) => {
            let firms = read_firms(BufReader::new(open_input(path, "firm file")?))?;
            debug!("loaded {} firm(s) from {}", firms.len(), path.display());
            Some(InMemoryFirmDirectory::new(firms))
        }
        None => None,
    };

    let drafts = read_purchase_drafts(BufReader::new(open_input(&file, "purchase file")?))?;
    let mut service = PurchaseService::new(InMemoryPurchaseRepository::new());
    let mut rejected = 0;

    for (idx, mut draft) in drafts.into_iter().enumerate() {
        complete_draft(&mut draft, directory.as_ref());

        match service.record(&draft) {
            Ok(invoice) => debug!("accepted invoice {}", invoice.invoice_number),
            Err(LedgerError::Purchase(err)) => {
                rejected += 1;
                print!("{}", format_rejected_draft(idx + 1, &draft, &err));
            }
            Err(other) => return Err(other),
        }
    }

    let invoices = service.list_between(from, to);
    let totals = service.totals_between(from, to)?;
    info!(
        "{} invoice(s) accepted, {} rejected, {} in window",
        service.list().len(),
        rejected,
        totals.count
    );

    if let Some(path) = &output {
        let mut writer = create_output(path)?;
        export_purchases_csv(&invoices, &mut writer)?;
        writer.flush()?;
        println!("Purchases exported to: {}", path.display());
    } else {
        if rejected > 0 {
            println!();
        }
        println!("{}", format_purchase_list(&invoices, &totals, settings.date_format()));
    }

    let accepted = service.list().len();
    record_run(
        paths,
        settings,
        JournalEntry::new(
            Operation::PurchaseCheck,
            format!("{} accepted, {} rejected", accepted, rejected),
            json!({
                "file": file.display().to_string(),
                "accepted": accepted,
                "rejected": rejected,
                "from": from,
                "to": to,
                "total_amount": totals.amount.to_string(),
                "total_cgst": totals.cgst.to_string(),
                "total_sgst": totals.sgst.to_string(),
            }),
        ),
    );

    if rejected > 0 {
        return Err(LedgerError::Import(format!(
            "{} of {} purchase draft(s) rejected",
            rejected,
            accepted + rejected
        )));
    }

    Ok(())
}

/// Fill in what a form would have filled in: the firm's GSTIN and SGST
fn complete_draft(draft: &mut PurchaseDraft, directory: Option<&InMemoryFirmDirectory>) {
    if let Some(directory) = directory {
        if draft.gstin.trim().is_empty() && !draft.firm_name.trim().is_empty() {
            let name = draft.firm_name.clone();
            draft.select_firm(directory, &name);
        }
    }

    if draft.sgst.trim().is_empty() && !draft.cgst.trim().is_empty() {
        let cgst = draft.cgst.clone();
        draft.set_cgst(cgst);
    }
}

fn parse_bound(raw: Option<&str>, field: &'static str) -> LedgerResult<Option<NaiveDate>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => parse_invoice_date(value)
            .map(Some)
            .ok_or_else(|| {
                ValidationError::InvalidDate {
                    field,
                    value: value.to_string(),
                }
                .into()
            }),
    }
}
