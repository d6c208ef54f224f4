//! Import service
//!
//! Reads the files the command line works from: monthly profit rows from a
//! spreadsheet-style CSV, purchase drafts and firm lists from JSON.

use std::io::Read;

use serde::Deserialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Firm, ProfitRecord, ProfitRow, PurchaseDraft};

/// A CSV row that could not be turned into a profit row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based data row number (the header is not counted)
    pub row_number: usize,
    pub reason: String,
}

/// Result of reading a profit CSV
#[derive(Debug, Clone, Default)]
pub struct ProfitImport {
    pub rows: Vec<ProfitRow>,
    pub skipped: Vec<SkippedRow>,
}

impl ProfitImport {
    pub fn has_errors(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Read profit rows from CSV with a header row
///
/// Headers may use either the exported names ("Purchase Month") or the
/// camelCase keys ("purchaseMonth"). Blank lines and a trailing "Total" row
/// are ignored, so an exported summary can be read back in.
pub fn read_profit_csv<R: Read>(reader: R) -> LedgerResult<ProfitImport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut import = ProfitImport::default();

    for (idx, result) in csv_reader.deserialize::<ProfitRecord>().enumerate() {
        let row_number = idx + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                import.skipped.push(SkippedRow {
                    row_number,
                    reason: format!("Error reading CSV record: {}", e),
                });
                continue;
            }
        };

        if is_blank(&record) || record.purchase_month.eq_ignore_ascii_case("total") {
            continue;
        }

        match record.into_row() {
            Ok(row) => import.rows.push(row),
            Err(e) => import.skipped.push(SkippedRow {
                row_number,
                reason: e.to_string(),
            }),
        }
    }

    Ok(import)
}

fn is_blank(record: &ProfitRecord) -> bool {
    record.purchase_month.is_empty()
        && record.sale_month.is_empty()
        && record.purchase_amount.is_empty()
        && record.wholesale_amount.is_empty()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Read purchase drafts from JSON: either one object or an array of them
pub fn read_purchase_drafts<R: Read>(reader: R) -> LedgerResult<Vec<PurchaseDraft>> {
    let drafts: OneOrMany<PurchaseDraft> = serde_json::from_reader(reader)
        .map_err(|e| LedgerError::Import(format!("Invalid purchase file: {}", e)))?;
    Ok(drafts.into())
}

/// Read a firm list from a JSON array
pub fn read_firms<R: Read>(reader: R) -> LedgerResult<Vec<Firm>> {
    let firms: OneOrMany<Firm> = serde_json::from_reader(reader)
        .map_err(|e| LedgerError::Import(format!("Invalid firm file: {}", e)))?;
    Ok(firms.into())
}
