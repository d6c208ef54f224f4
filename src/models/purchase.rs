//! Purchase invoice model
//!
//! A `PurchaseDraft` holds the fields exactly as entered. Validation turns it
//! into a `PurchaseInvoice`, reporting every problem in one pass so a form can
//! flag all offending fields together.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::firm::FirmDirectory;
use super::ids::InvoiceId;
use super::money::Money;

/// Earliest accepted invoice year
pub const MIN_INVOICE_YEAR: i32 = 2000;

/// Fields of a purchase invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseField {
    InvoiceNumber,
    Date,
    FirmName,
    Gstin,
    Amount,
    TaxableAmount,
    Cgst,
    Sgst,
}

impl PurchaseField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::InvoiceNumber => "Invoice Number",
            Self::Date => "Date",
            Self::FirmName => "Firm Name",
            Self::Gstin => "GSTIN",
            Self::Amount => "Amount",
            Self::TaxableAmount => "Taxable Amount",
            Self::Cgst => "CGST",
            Self::Sgst => "SGST",
        }
    }
}

impl fmt::Display for PurchaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single problem found while validating a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseIssue {
    Missing(PurchaseField),
    Invalid { field: PurchaseField, value: String },
    TaxableExceedsAmount,
}

impl PurchaseIssue {
    /// The field a form should highlight for this issue
    pub fn field(&self) -> PurchaseField {
        match self {
            Self::Missing(field) | Self::Invalid { field, .. } => *field,
            Self::TaxableExceedsAmount => PurchaseField::TaxableAmount,
        }
    }
}

impl fmt::Display for PurchaseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "{} is required", field),
            Self::Invalid { field, value } => write!(f, "{} is invalid: '{}'", field, value),
            Self::TaxableExceedsAmount => {
                write!(f, "Taxable Amount cannot be greater than Total Amount")
            }
        }
    }
}

/// Validation errors for purchase drafts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseValidationError {
    pub issues: Vec<PurchaseIssue>,
}

impl PurchaseValidationError {
    /// Whether the given field has at least one issue
    pub fn has_issue_with(&self, field: PurchaseField) -> bool {
        self.issues.iter().any(|issue| issue.field() == field)
    }
}

impl fmt::Display for PurchaseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.issues.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for PurchaseValidationError {}

/// Purchase invoice fields as entered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseDraft {
    #[serde(alias = "invoice_number", deserialize_with = "loose_string")]
    pub invoice_number: String,
    #[serde(deserialize_with = "loose_string")]
    pub date: String,
    #[serde(alias = "firm_name", deserialize_with = "loose_string")]
    pub firm_name: String,
    #[serde(deserialize_with = "loose_string")]
    pub gstin: String,
    #[serde(deserialize_with = "loose_string")]
    pub amount: String,
    #[serde(alias = "taxable_amount", deserialize_with = "loose_string")]
    pub taxable_amount: String,
    #[serde(deserialize_with = "loose_string")]
    pub cgst: String,
    #[serde(deserialize_with = "loose_string")]
    pub sgst: String,
}

/// Accept JSON strings, numbers, or null for a text field
fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(serde_json::Number),
        Nothing(()),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(text) => text,
        Loose::Number(number) => number.to_string(),
        Loose::Nothing(()) => String::new(),
    })
}

impl PurchaseDraft {
    /// Pick a firm; the GSTIN follows the directory entry, or clears if unknown
    pub fn select_firm(&mut self, directory: &dyn FirmDirectory, name: &str) {
        self.firm_name = name.to_string();
        self.gstin = directory
            .lookup(name)
            .map(|firm| firm.gstin)
            .unwrap_or_default();
    }

    /// Set CGST; SGST is always charged at the same amount
    pub fn set_cgst(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.sgst = value.clone();
        self.cgst = value;
    }

    /// Validate every field, collecting all issues
    pub fn validate(&self) -> Result<PurchaseInvoice, PurchaseValidationError> {
        let mut issues = Vec::new();

        let invoice_number =
            required_text(&self.invoice_number, PurchaseField::InvoiceNumber, &mut issues);
        let firm_name = required_text(&self.firm_name, PurchaseField::FirmName, &mut issues);
        let gstin = required_text(&self.gstin, PurchaseField::Gstin, &mut issues)
            .map(|g| g.to_ascii_uppercase());

        let date = match self.date.trim() {
            "" => {
                issues.push(PurchaseIssue::Missing(PurchaseField::Date));
                None
            }
            raw => {
                let parsed = parse_invoice_date(raw);
                if parsed.is_none() {
                    issues.push(PurchaseIssue::Invalid {
                        field: PurchaseField::Date,
                        value: raw.to_string(),
                    });
                }
                parsed
            }
        };

        let amount = required_money(&self.amount, PurchaseField::Amount, &mut issues);
        let taxable_amount =
            required_money(&self.taxable_amount, PurchaseField::TaxableAmount, &mut issues);
        let cgst = required_money(&self.cgst, PurchaseField::Cgst, &mut issues);
        let sgst = required_money(&self.sgst, PurchaseField::Sgst, &mut issues);

        if let (Some(amount), Some(taxable)) = (amount, taxable_amount) {
            if taxable > amount {
                issues.push(PurchaseIssue::TaxableExceedsAmount);
            }
        }

        match (invoice_number, date, firm_name, gstin, amount, taxable_amount, cgst, sgst) {
            (
                Some(invoice_number),
                Some(date),
                Some(firm_name),
                Some(gstin),
                Some(amount),
                Some(taxable_amount),
                Some(cgst),
                Some(sgst),
            ) if issues.is_empty() => Ok(PurchaseInvoice {
                id: InvoiceId::new(),
                invoice_number,
                date,
                firm_name,
                gstin,
                amount,
                taxable_amount,
                cgst,
                sgst,
            }),
            _ => Err(PurchaseValidationError { issues }),
        }
    }
}

fn required_text(
    value: &str,
    field: PurchaseField,
    issues: &mut Vec<PurchaseIssue>,
) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        issues.push(PurchaseIssue::Missing(field));
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn required_money(
    value: &str,
    field: PurchaseField,
    issues: &mut Vec<PurchaseIssue>,
) -> Option<Money> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        issues.push(PurchaseIssue::Missing(field));
        return None;
    }
    match Money::parse(trimmed) {
        Ok(money) if !money.is_negative() => Some(money),
        _ => {
            issues.push(PurchaseIssue::Invalid {
                field,
                value: trimmed.to_string(),
            });
            None
        }
    }
}

/// Parse an invoice date as `DD/MM/YYYY` or ISO `YYYY-MM-DD`
///
/// Day and month may be written without padding. Years before
/// `MIN_INVOICE_YEAR` are rejected.
pub fn parse_invoice_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date = if raw.contains('/') {
        let mut parts = raw.split('/').map(|p| p.trim().parse::<u32>());
        let (day, month, year) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(d)), Some(Ok(m)), Some(Ok(y)), None) => (d, m, y),
            _ => return None,
        };
        if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
            return None;
        }
        NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?
    } else {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?
    };

    (date.year() >= MIN_INVOICE_YEAR).then_some(date)
}

/// Format a date the way invoices are entered (`DD/MM/YYYY`)
pub fn format_invoice_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// A validated purchase invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseInvoice {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub date: NaiveDate,
    pub firm_name: String,
    pub gstin: String,
    pub amount: Money,
    pub taxable_amount: Money,
    pub cgst: Money,
    pub sgst: Money,
}
