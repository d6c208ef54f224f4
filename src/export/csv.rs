//! CSV Export functionality
//!
//! Exports distributions, profit summaries, and purchase invoices to CSV.

use crate::error::LedgerResult;
use crate::models::{DistributionResult, ProfitRow, PurchaseInvoice};
use crate::reports::{DistributionReport, ProfitReport};
use crate::services::PurchaseTotals;
use std::io::Write;

/// Export a distribution: entries, day totals, and the grand total
pub fn export_distribution_csv<W: Write>(
    result: &DistributionResult,
    writer: &mut W,
) -> LedgerResult<()> {
    DistributionReport::from_result(result).export_csv(writer)
}

/// Export a profit summary with the derived retail column and a total row
pub fn export_profit_csv<W: Write>(rows: Vec<ProfitRow>, writer: &mut W) -> LedgerResult<()> {
    ProfitReport::generate(rows)?.export_csv(writer)
}

/// Export purchase invoices followed by a total row
pub fn export_purchases_csv<W: Write>(
    invoices: &[PurchaseInvoice],
    writer: &mut W,
) -> LedgerResult<()> {
    let totals = PurchaseTotals::from_invoices(invoices)?;
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "ID",
        "Invoice Number",
        "Date",
        "Firm",
        "GSTIN",
        "Amount",
        "Taxable Amount",
        "CGST",
        "SGST",
    ])?;

    for invoice in invoices {
        csv_writer.write_record([
            invoice.id.as_uuid().to_string(),
            invoice.invoice_number.clone(),
            invoice.date.to_string(),
            invoice.firm_name.clone(),
            invoice.gstin.clone(),
            invoice.amount.to_string(),
            invoice.taxable_amount.to_string(),
            invoice.cgst.to_string(),
            invoice.sgst.to_string(),
        ])?;
    }

    csv_writer.write_record([
        String::new(),
        "Total".to_string(),
        String::new(),
        String::new(),
        String::new(),
        totals.amount.to_string(),
        totals.taxable_amount.to_string(),
        totals.cgst.to_string(),
        totals.sgst.to_string(),
    ])?;

    csv_writer.flush()?;
    Ok(())
}
