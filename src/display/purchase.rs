//! Purchase invoice display formatting
//!
//! Formats the purchase register and rejected drafts for terminal output.

use crate::models::{PurchaseDraft, PurchaseInvoice, PurchaseValidationError};
use crate::services::PurchaseTotals;

use super::report::truncate;

const FIRM_MAX: usize = 28;

/// Format accepted invoices as a table with a total row
pub fn format_purchase_list(
    invoices: &[PurchaseInvoice],
    totals: &PurchaseTotals,
    date_format: &str,
) -> String {
    if invoices.is_empty() {
        return "No purchase invoices.".to_string();
    }

    let number_width = invoices
        .iter()
        .map(|i| i.invoice_number.len())
        .max()
        .unwrap_or(7)
        .max(7);

    let firm_width = invoices
        .iter()
        .map(|i| i.firm_name.chars().count().min(FIRM_MAX))
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<number_width$}  {:<10}  {:<firm_width$}  {:<15}  {:>12}  {:>12}  {:>10}  {:>10}\n",
        "Invoice",
        "Date",
        "Firm",
        "GSTIN",
        "Amount",
        "Taxable",
        "CGST",
        "SGST",
        number_width = number_width,
        firm_width = firm_width,
    ));
    output.push_str(&rule(number_width, firm_width));

    for invoice in invoices {
        output.push_str(&format!(
            "{:<number_width$}  {:<10}  {:<firm_width$}  {:<15}  {:>12}  {:>12}  {:>10}  {:>10}\n",
            invoice.invoice_number,
            invoice.date.format(date_format).to_string(),
            truncate(&invoice.firm_name, FIRM_MAX),
            invoice.gstin,
            invoice.amount.to_string(),
            invoice.taxable_amount.to_string(),
            invoice.cgst.to_string(),
            invoice.sgst.to_string(),
            number_width = number_width,
            firm_width = firm_width,
        ));
    }

    output.push_str(&rule(number_width, firm_width));
    output.push_str(&format!(
        "{:<number_width$}  {:<10}  {:<firm_width$}  {:<15}  {:>12}  {:>12}  {:>10}  {:>10}\n",
        "TOTAL",
        "",
        format!("{} invoice(s)", totals.count),
        "",
        totals.amount.to_string(),
        totals.taxable_amount.to_string(),
        totals.cgst.to_string(),
        totals.sgst.to_string(),
        number_width = number_width,
        firm_width = firm_width,
    ));

    output
}

fn rule(number_width: usize, firm_width: usize) -> String {
    format!(
        "{:-<number_width$}  {:-<10}  {:-<firm_width$}  {:-<15}  {:->12}  {:->12}  {:->10}  {:->10}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        number_width = number_width,
        firm_width = firm_width,
    )
}

/// Format a rejected draft with one line per issue
///
/// `position` is the 1-based position of the draft in its input file.
pub fn format_rejected_draft(
    position: usize,
    draft: &PurchaseDraft,
    error: &PurchaseValidationError,
) -> String {
    let mut output = String::new();

    let name = if draft.invoice_number.trim().is_empty() {
        "(no invoice number)"
    } else {
        draft.invoice_number.trim()
    };
    output.push_str(&format!("Draft #{} {}:\n", position, name));

    for issue in &error.issues {
        output.push_str(&format!("  - {}\n", issue));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PurchaseDraft {
        let mut draft = PurchaseDraft {
            invoice_number: "INV-42".into(),
            date: "2024-07-01".into(),
            firm_name: "Gupta Hardware Suppliers Private Limited".into(),
            gstin: "07AAACG1234A1Z5".into(),
            amount: "1180".into(),
            taxable_amount: "1000".into(),
            ..Default::default()
        };
        draft.set_cgst("90");
        draft
    }

    #[test]
    fn test_format_purchase_list() {
        let invoices = vec![draft().validate().unwrap()];
        let totals = PurchaseTotals::from_invoices(&invoices).unwrap();
        let output = format_purchase_list(&invoices, &totals, "%d/%m/%Y");

        assert!(output.contains("INV-42"));
        assert!(output.contains("01/07/2024"));
        assert!(output.contains("Gupta Hardware Suppliers ..."));
        assert!(output.contains("1180.00"));
        assert!(output.contains("1 invoice(s)"));
    }

    #[test]
    fn test_format_empty_list() {
        let output = format_purchase_list(&[], &PurchaseTotals::default(), "%d/%m/%Y");
        assert_eq!(output, "No purchase invoices.");
    }

    #[test]
    fn test_format_rejected_draft() {
        let mut bad = draft();
        bad.invoice_number.clear();
        bad.taxable_amount = "5000".into();
        let err = bad.validate().unwrap_err();

        let output = format_rejected_draft(3, &bad, &err);
        assert!(output.starts_with("Draft #3 (no invoice number):"));
        assert!(output.contains("  - Invoice Number is required"));
        assert!(output.contains("  - Taxable Amount cannot be greater than Total Amount"));
    }
}
