//! Profit Summary Report
//!
//! Adds the derived retail column to monthly purchase/wholesale rows and
//! totals every column.

use serde::Serialize;
use std::io::Write;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, ProfitRow};

/// CSV header of the exported summary
pub const PROFIT_CSV_HEADER: [&str; 5] = [
    "Purchase Month",
    "Sale Month",
    "Purchase Amount",
    "Whole Sale Amount",
    "Retail Sale Amount",
];

/// A profit row with its derived retail amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfitLine {
    pub purchase_month: String,
    pub sale_month: String,
    pub purchase_amount: Money,
    pub wholesale_amount: Money,
    pub retail_amount: Money,
}

/// Profit summary over a set of months
#[derive(Debug, Clone, Serialize)]
pub struct ProfitReport {
    pub lines: Vec<ProfitLine>,
    pub total_purchase: Money,
    pub total_wholesale: Money,
    pub total_retail: Money,
    pub total_sale: Money,
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Purchase Month")]
    purchase_month: String,
    #[tabled(rename = "Sale Month")]
    sale_month: String,
    #[tabled(rename = "Purchase")]
    purchase: String,
    #[tabled(rename = "Whole Sale")]
    wholesale: String,
    #[tabled(rename = "Retail Sale")]
    retail: String,
}

impl ProfitReport {
    /// Generate the summary, keeping row order
    ///
    /// Fails when a derived amount or a column total does not fit in `Money`.
    pub fn generate(rows: impl IntoIterator<Item = ProfitRow>) -> LedgerResult<Self> {
        let lines = rows
            .into_iter()
            .map(|row| {
                let retail_amount = row.retail_amount().ok_or_else(|| {
                    LedgerError::AmountOutOfRange(format!(
                        "retail amount for {} / {}",
                        row.purchase_month, row.sale_month
                    ))
                })?;
                Ok(ProfitLine {
                    purchase_month: row.purchase_month,
                    sale_month: row.sale_month,
                    purchase_amount: row.purchase_amount,
                    wholesale_amount: row.wholesale_amount,
                    retail_amount,
                })
            })
            .collect::<LedgerResult<Vec<ProfitLine>>>()?;

        let total = |name: &str, column: fn(&ProfitLine) -> Money| {
            Money::checked_sum(lines.iter().map(column))
                .ok_or_else(|| LedgerError::AmountOutOfRange(format!("total {}", name)))
        };
        let total_purchase = total("purchase amount", |l| l.purchase_amount)?;
        let total_wholesale = total("wholesale amount", |l| l.wholesale_amount)?;
        let total_retail = total("retail amount", |l| l.retail_amount)?;
        let total_sale = total_wholesale
            .checked_add(total_retail)
            .ok_or_else(|| LedgerError::AmountOutOfRange("total sales".to_string()))?;

        Ok(Self {
            lines,
            total_purchase,
            total_wholesale,
            total_retail,
            total_sale,
        })
    }

    /// Wholesale plus retail over every month
    pub fn sale_total(&self) -> Money {
        self.total_sale
    }

    /// Months whose wholesale sales exceeded the marked-up purchases
    pub fn negative_retail_months(&self) -> impl Iterator<Item = &ProfitLine> {
        self.lines.iter().filter(|l| l.retail_amount.is_negative())
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Profit Summary\n");
        output.push_str(&"=".repeat(50));
        output.push('\n');

        if self.lines.is_empty() {
            output.push_str("No rows to summarize.\n");
            return output;
        }

        let fmt = |m: Money| m.format_with_symbol(currency_symbol);
        let table_rows = self
            .lines
            .iter()
            .map(|line| TableRow {
                purchase_month: line.purchase_month.clone(),
                sale_month: line.sale_month.clone(),
                purchase: fmt(line.purchase_amount),
                wholesale: fmt(line.wholesale_amount),
                retail: fmt(line.retail_amount),
            })
            .chain(std::iter::once(TableRow {
                purchase_month: "Total".to_string(),
                sale_month: String::new(),
                purchase: fmt(self.total_purchase),
                wholesale: fmt(self.total_wholesale),
                retail: fmt(self.total_retail),
            }));

        let mut table = Table::new(table_rows);
        table.with(Style::rounded());
        table.modify(Columns::new(2..), Alignment::right());
        output.push_str(&table.to_string());
        output.push('\n');

        output.push_str(&format!("\nTotal sales: {}\n", fmt(self.sale_total())));

        let negative = self.negative_retail_months().count();
        if negative > 0 {
            output.push_str(&format!(
                "Warning: {} month(s) sold more at wholesale than the marked-up purchases\n",
                negative
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(PROFIT_CSV_HEADER)?;

        for line in &self.lines {
            csv_writer.write_record([
                line.purchase_month.clone(),
                line.sale_month.clone(),
                line.purchase_amount.to_string(),
                line.wholesale_amount.to_string(),
                line.retail_amount.to_string(),
            ])?;
        }

        csv_writer.write_record([
            "Total".to_string(),
            String::new(),
            self.total_purchase.to_string(),
            self.total_wholesale.to_string(),
            self.total_retail.to_string(),
        ])?;

        csv_writer.flush()?;
        Ok(())
    }
}
