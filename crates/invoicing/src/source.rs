//! Invoice source capability and an in-memory implementation.

use std::convert::Infallible;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use tally_core::Entity;

use crate::filter::InvoiceFilter;
use crate::invoice::{Invoice, InvoiceId};

/// Something invoices can be filtered and enumerated from.
///
/// `select` is one enumeration pass: the returned invoices are whatever the
/// source considered current while answering that call. Implementations
/// backed by an external store translate [`InvoiceFilter`] into their own
/// query; errors are surfaced to callers untouched.
pub trait InvoiceSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn select(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, Self::Error>;
}

impl InvoiceSource for [Invoice] {
    type Error = Infallible;

    fn select(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, Self::Error> {
        Ok(self.iter().filter(|i| filter.matches(i)).cloned().collect())
    }
}

impl InvoiceSource for Vec<Invoice> {
    type Error = Infallible;

    fn select(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, Self::Error> {
        self.as_slice().select(filter)
    }
}

impl<S> InvoiceSource for &S
where
    S: InvoiceSource + ?Sized,
{
    type Error = S::Error;

    fn select(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, Self::Error> {
        (**self).select(filter)
    }
}

impl<S> InvoiceSource for Arc<S>
where
    S: InvoiceSource + ?Sized,
{
    type Error = S::Error;

    fn select(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, Self::Error> {
        (**self).select(filter)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("invoice store lock poisoned")]
    Poisoned,
}

/// Shared, mutable in-memory invoice collection for tests/dev.
///
/// Writers may run concurrently with readers; each `select` observes one
/// consistent snapshot taken under the read lock.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceStore {
    inner: RwLock<Vec<Invoice>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_invoices(invoices: impl IntoIterator<Item = Invoice>) -> Self {
        Self {
            inner: RwLock::new(invoices.into_iter().collect()),
        }
    }

    /// Append an invoice. Identifiers are not checked for uniqueness.
    pub fn insert(&self, invoice: Invoice) -> Result<(), StoreError> {
        let mut invoices = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        invoices.push(invoice);
        Ok(())
    }

    /// Remove every invoice carrying `id`; returns how many were removed.
    pub fn remove(&self, id: &InvoiceId) -> Result<usize, StoreError> {
        let mut invoices = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let before = invoices.len();
        invoices.retain(|invoice| !invoice.has_id(id));
        Ok(before - invoices.len())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.inner.write().map_err(|_| StoreError::Poisoned)?.clear();
        Ok(())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.inner.read().map_err(|_| StoreError::Poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl InvoiceSource for InMemoryInvoiceStore {
    type Error = StoreError;

    fn select(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, Self::Error> {
        let invoices = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(invoices.as_slice().select(filter).unwrap_or_else(|never| match never {}))
    }
}
