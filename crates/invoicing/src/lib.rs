//! Invoicing aggregates.
//!
//! Read-only queries over a collection of invoices: the value of one invoice,
//! the value of everything still unpaid, and a per-item quantity report over
//! an acceptance-date range. Storage stays behind the [`InvoiceSource`]
//! capability; nothing here does IO of its own.

pub mod aggregator;
pub mod error;
pub mod filter;
pub mod invoice;
pub mod report;
pub mod source;

pub use aggregator::InvoiceAggregator;
pub use error::QueryError;
pub use filter::{AcceptanceFilter, DateRange, InvoiceFilter};
pub use invoice::{Invoice, InvoiceId, InvoiceItem};
pub use report::ItemsReport;
pub use source::{InMemoryInvoiceStore, InvoiceSource, StoreError};
