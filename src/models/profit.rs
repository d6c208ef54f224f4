//! Monthly profit rows
//!
//! Each row pairs a purchase month with the month its goods were sold. The
//! retail amount is derived: purchases marked up by 12% minus what went out
//! at wholesale.

use serde::{Deserialize, Serialize};

use super::distribution::{ValidationError, MARKUP_BPS};
use super::money::Money;

/// One month of purchases and wholesale sales
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitRow {
    pub purchase_month: String,
    pub sale_month: String,
    pub purchase_amount: Money,
    pub wholesale_amount: Money,
}

impl ProfitRow {
    pub fn new(
        purchase_month: impl Into<String>,
        sale_month: impl Into<String>,
        purchase_amount: Money,
        wholesale_amount: Money,
    ) -> Self {
        Self {
            purchase_month: purchase_month.into(),
            sale_month: sale_month.into(),
            purchase_amount,
            wholesale_amount,
        }
    }

    /// `purchase * 1.12 - wholesale`; negative when wholesale outran the markup
    ///
    /// `None` if the amounts are too large to compute it.
    pub fn retail_amount(&self) -> Option<Money> {
        retail_amount(self.purchase_amount, self.wholesale_amount)
    }

    /// Wholesale plus retail
    pub fn sale_amount(&self) -> Option<Money> {
        self.retail_amount()?.checked_add(self.wholesale_amount)
    }
}

/// Retail sale amount for a purchase and wholesale pair
pub fn retail_amount(purchase: Money, wholesale: Money) -> Option<Money> {
    purchase
        .checked_scale(10_000 + MARKUP_BPS, 10_000)?
        .checked_sub(wholesale)
}

/// A profit row as read from a spreadsheet-style CSV file
///
/// Amounts stay as text until `into_row`; blank amounts count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProfitRecord {
    #[serde(alias = "Purchase Month", alias = "purchaseMonth")]
    pub purchase_month: String,
    #[serde(alias = "Sale Month", alias = "saleMonth")]
    pub sale_month: String,
    #[serde(alias = "Purchase Amount", alias = "purchaseAmount")]
    pub purchase_amount: String,
    #[serde(alias = "Whole Sale Amount", alias = "wholeSaleAmount")]
    pub wholesale_amount: String,
}

impl ProfitRecord {
    pub fn into_row(self) -> Result<ProfitRow, ValidationError> {
        let purchase_amount = amount_or_zero(&self.purchase_amount, "purchase amount")?;
        let wholesale_amount = amount_or_zero(&self.wholesale_amount, "wholesale amount")?;
        Ok(ProfitRow {
            purchase_month: self.purchase_month.trim().to_string(),
            sale_month: self.sale_month.trim().to_string(),
            purchase_amount,
            wholesale_amount,
        })
    }
}

fn amount_or_zero(raw: &str, field: &'static str) -> Result<Money, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Money::zero());
    }
    Money::parse(trimmed).map_err(|_| ValidationError::InvalidAmount {
        field,
        value: trimmed.to_string(),
    })
}
