//! Purchase service
//!
//! Provides business logic for recording purchase invoices on top of an
//! injected repository, plus totals over all invoices or a date window.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{InvoiceId, Money, PurchaseDraft, PurchaseInvoice};

/// Storage seam for purchase invoices
pub trait PurchaseRepository {
    fn insert(&mut self, invoice: PurchaseInvoice);

    /// Replace an existing invoice; returns false if the ID is unknown
    fn replace(&mut self, invoice: PurchaseInvoice) -> bool;

    fn remove(&mut self, id: InvoiceId) -> Option<PurchaseInvoice>;

    fn get(&self, id: InvoiceId) -> Option<PurchaseInvoice>;

    /// Invoices in insertion order
    fn list(&self) -> Vec<PurchaseInvoice>;
}

/// Repository that keeps invoices in memory for the life of the process
#[derive(Debug, Clone, Default)]
pub struct InMemoryPurchaseRepository {
    invoices: Vec<PurchaseInvoice>,
}

impl InMemoryPurchaseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PurchaseRepository for InMemoryPurchaseRepository {
    fn insert(&mut self, invoice: PurchaseInvoice) {
        self.invoices.push(invoice);
    }

    fn replace(&mut self, invoice: PurchaseInvoice) -> bool {
        match self.invoices.iter_mut().find(|i| i.id == invoice.id) {
            Some(slot) => {
                *slot = invoice;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: InvoiceId) -> Option<PurchaseInvoice> {
        let index = self.invoices.iter().position(|i| i.id == id)?;
        Some(self.invoices.remove(index))
    }

    fn get(&self, id: InvoiceId) -> Option<PurchaseInvoice> {
        self.invoices.iter().find(|i| i.id == id).cloned()
    }

    fn list(&self) -> Vec<PurchaseInvoice> {
        self.invoices.clone()
    }
}

/// Column totals over a set of invoices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PurchaseTotals {
    pub count: usize,
    pub amount: Money,
    pub taxable_amount: Money,
    pub cgst: Money,
    pub sgst: Money,
}

impl PurchaseTotals {
    /// Sum every column; fails if a column total does not fit in `Money`
    pub fn from_invoices<'a>(
        invoices: impl IntoIterator<Item = &'a PurchaseInvoice>,
    ) -> LedgerResult<Self> {
        invoices
            .into_iter()
            .try_fold(Self::default(), |totals, invoice| {
                let column = |total: Money, value: Money, name: &str| {
                    total.checked_add(value).ok_or_else(|| {
                        LedgerError::AmountOutOfRange(format!("total {} of purchases", name))
                    })
                };
                Ok(Self {
                    count: totals.count + 1,
                    amount: column(totals.amount, invoice.amount, "amount")?,
                    taxable_amount: column(
                        totals.taxable_amount,
                        invoice.taxable_amount,
                        "taxable amount",
                    )?,
                    cgst: column(totals.cgst, invoice.cgst, "CGST")?,
                    sgst: column(totals.sgst, invoice.sgst, "SGST")?,
                })
            })
    }
}

/// Service for purchase invoice management
pub struct PurchaseService<R: PurchaseRepository> {
    repository: R,
}

impl<R: PurchaseRepository> PurchaseService<R> {
    /// Create a new purchase service
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Validate a draft and record it
    pub fn record(&mut self, draft: &PurchaseDraft) -> LedgerResult<PurchaseInvoice> {
        let invoice = draft.validate()?;
        self.repository.insert(invoice.clone());
        Ok(invoice)
    }

    /// Replace an existing invoice with a corrected draft, keeping its ID
    pub fn amend(&mut self, id: InvoiceId, draft: &PurchaseDraft) -> LedgerResult<PurchaseInvoice> {
        if self.repository.get(id).is_none() {
            return Err(LedgerError::invoice_not_found(id.to_string()));
        }

        let mut invoice = draft.validate()?;
        invoice.id = id;
        self.repository.replace(invoice.clone());
        Ok(invoice)
    }

    /// Delete an invoice
    pub fn remove(&mut self, id: InvoiceId) -> LedgerResult<PurchaseInvoice> {
        self.repository
            .remove(id)
            .ok_or_else(|| LedgerError::invoice_not_found(id.to_string()))
    }

    pub fn get(&self, id: InvoiceId) -> Option<PurchaseInvoice> {
        self.repository.get(id)
    }

    pub fn list(&self) -> Vec<PurchaseInvoice> {
        self.repository.list()
    }

    /// Invoices dated within `[from, to]`; a missing bound is open
    pub fn list_between(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Vec<PurchaseInvoice> {
        self.repository
            .list()
            .into_iter()
            .filter(|i| from.map_or(true, |from| i.date >= from))
            .filter(|i| to.map_or(true, |to| i.date <= to))
            .collect()
    }

    /// Totals over every recorded invoice
    pub fn totals(&self) -> LedgerResult<PurchaseTotals> {
        PurchaseTotals::from_invoices(&self.repository.list())
    }

    /// Totals over invoices dated within `[from, to]`
    pub fn totals_between(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerResult<PurchaseTotals> {
        PurchaseTotals::from_invoices(&self.list_between(from, to))
    }
}
