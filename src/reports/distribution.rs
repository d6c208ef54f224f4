//! Sale Distribution Report
//!
//! Lays a distribution out the way it is shown and exported: each day's
//! entries followed by a "Total for <date>" row, then a final grand total.

use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::error::LedgerResult;
use crate::models::{DateRange, DayTotal, DistributionResult, Money};

/// Label of the closing row
pub const GRAND_TOTAL_LABEL: &str = "Final Grand Total";

/// One display row of a distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistributionRow {
    /// A single bucket; `index` counts from 1
    Entry {
        index: usize,
        date: NaiveDate,
        amount: Money,
    },
    /// Subtotal closing one day's buckets
    DayTotal { date: NaiveDate, amount: Money },
    /// Sum of all buckets
    GrandTotal { amount: Money },
}

impl DistributionRow {
    /// Text for the date/label column
    pub fn label(&self) -> String {
        match self {
            Self::Entry { date, .. } => date.to_string(),
            Self::DayTotal { date, .. } => format!("Total for {}", date),
            Self::GrandTotal { .. } => GRAND_TOTAL_LABEL.to_string(),
        }
    }

    pub fn amount(&self) -> Money {
        match self {
            Self::Entry { amount, .. }
            | Self::DayTotal { amount, .. }
            | Self::GrandTotal { amount } => *amount,
        }
    }

    pub fn is_total(&self) -> bool {
        !matches!(self, Self::Entry { .. })
    }
}

/// Distribution report
#[derive(Debug, Clone, Serialize)]
pub struct DistributionReport {
    /// Days holding buckets
    pub span: DateRange,
    /// Amount entered before adjustment
    pub total_amount: Money,
    /// Amount distributed
    pub adjusted_total: Money,
    /// Subtotal per day, in date order
    pub day_totals: Vec<DayTotal>,
    /// Sum of every bucket
    pub grand_total: Money,
    /// Display rows in order
    pub rows: Vec<DistributionRow>,
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "#")]
    index: String,
    #[tabled(rename = "Date")]
    label: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl DistributionReport {
    /// Derive the report rows from a distribution result
    pub fn from_result(result: &DistributionResult) -> Self {
        let mut rows = Vec::with_capacity(result.len() + result.len() / 10 + 1);
        let mut index = 0;

        for group in result.entries.chunk_by(|a, b| a.date == b.date) {
            for entry in group {
                index += 1;
                rows.push(DistributionRow::Entry {
                    index,
                    date: entry.date,
                    amount: entry.amount,
                });
            }
            rows.push(DistributionRow::DayTotal {
                date: group[0].date,
                amount: group.iter().map(|e| e.amount).sum(),
            });
        }

        let grand_total = result.grand_total();
        rows.push(DistributionRow::GrandTotal {
            amount: grand_total,
        });

        Self {
            span: result.span,
            total_amount: result.total_amount,
            adjusted_total: result.adjusted_total,
            day_totals: result.day_totals(),
            grand_total,
            rows,
        }
    }

    /// Number of bucket rows (excluding totals)
    pub fn entry_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.is_total()).count()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Sale Distribution - {}\n", self.span));
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "Entered amount:   {}\n",
            self.total_amount.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!(
            "Distributed (+12% -4%): {}\n\n",
            self.adjusted_total.format_with_symbol(currency_symbol)
        ));

        let table_rows = self.rows.iter().map(|row| TableRow {
            index: match row {
                DistributionRow::Entry { index, .. } => index.to_string(),
                _ => String::new(),
            },
            label: row.label(),
            amount: row.amount().to_string(),
        });

        let mut table = Table::new(table_rows);
        table.with(Style::rounded());
        table.modify(Columns::single(2), Alignment::right());
        output.push_str(&table.to_string());
        output.push('\n');

        output
    }

    /// Format only the per-day subtotals
    pub fn format_day_totals(&self, currency_symbol: &str) -> String {
        let table_rows = self
            .day_totals
            .iter()
            .enumerate()
            .map(|(i, day)| TableRow {
                index: (i + 1).to_string(),
                label: day.date.to_string(),
                amount: day.amount.format_with_symbol(currency_symbol),
            })
            .chain(std::iter::once(TableRow {
                index: String::new(),
                label: GRAND_TOTAL_LABEL.to_string(),
                amount: self.grand_total.format_with_symbol(currency_symbol),
            }));

        let mut table = Table::new(table_rows);
        table.with(Style::rounded());
        table.modify(Columns::single(2), Alignment::right());
        table.to_string()
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["Date", "Amount"])?;

        for row in &self.rows {
            csv_writer.write_record([row.label(), row.amount().to_string()])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
