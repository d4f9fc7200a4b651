//! Invoice aggregates over an injected [`InvoiceSource`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use tally_core::{DomainError, DomainResult};

use crate::error::QueryError;
use crate::filter::{DateRange, InvoiceFilter};
use crate::invoice::{Invoice, InvoiceId};
use crate::report::ItemsReport;
use crate::source::InvoiceSource;

/// Computes totals and item reports over an invoice source.
///
/// Holds nothing but the source: every call runs a fresh `select` against it,
/// never mutates what it reads, and returns the same answer for the same
/// source contents.
#[derive(Debug, Clone)]
pub struct InvoiceAggregator<S> {
    source: S,
}

impl<S> InvoiceAggregator<S>
where
    S: InvoiceSource,
{
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Build from a source that may be missing (e.g. an unset dependency slot).
    pub fn from_optional(source: Option<S>) -> DomainResult<Self> {
        source
            .map(Self::new)
            .ok_or_else(|| DomainError::invalid_argument("invoice source is required"))
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Total value of the invoice with `invoice_id`, or `None` if there is none.
    ///
    /// Should several invoices share the id, their totals are summed.
    pub fn total(&self, invoice_id: InvoiceId) -> Result<Option<Decimal>, QueryError<S::Error>> {
        let invoices = self.select(&InvoiceFilter::by_id(invoice_id))?;

        match invoices.len() {
            0 => {
                tracing::debug!(%invoice_id, "invoice not found");
                return Ok(None);
            }
            1 => {}
            n => tracing::warn!(%invoice_id, matches = n, "duplicate invoice id; summing all matches"),
        }

        let total = sum_totals(&invoices)?;
        tracing::debug!(%invoice_id, %total, "computed invoice total");
        Ok(Some(total))
    }

    /// Total value of all invoices without an acceptance date. Zero when there are none.
    pub fn total_of_unpaid(&self) -> Result<Decimal, QueryError<S::Error>> {
        let invoices = self.select(&InvoiceFilter::unpaid())?;
        let total = sum_totals(&invoices)?;
        tracing::debug!(invoices = invoices.len(), %total, "computed unpaid total");
        Ok(total)
    }

    /// Item name -> purchased count over accepted invoices in `[from, to]`.
    ///
    /// Either bound may be absent. Unaccepted invoices never contribute.
    pub fn items_report(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<ItemsReport, QueryError<S::Error>> {
        self.items_report_in(DateRange::new(from, to))
    }

    pub fn items_report_in(&self, range: DateRange) -> Result<ItemsReport, QueryError<S::Error>> {
        if range.is_inverted() {
            tracing::warn!(from = ?range.from, to = ?range.to, "items report range is inverted; no invoice can match");
        }

        let invoices = self.select(&InvoiceFilter::accepted_within(range))?;

        let mut report = ItemsReport::new();
        for item in invoices.iter().flat_map(Invoice::items) {
            report.record(item)?;
        }

        tracing::debug!(
            from = ?range.from,
            to = ?range.to,
            invoices = invoices.len(),
            items = report.len(),
            "computed items report"
        );
        Ok(report)
    }

    fn select(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, QueryError<S::Error>> {
        self.source.select(filter).map_err(QueryError::Source)
    }
}

fn sum_totals(invoices: &[Invoice]) -> DomainResult<Decimal> {
    invoices.iter().try_fold(Decimal::ZERO, |acc, invoice| {
        acc.checked_add(invoice.total()?)
            .ok_or_else(|| DomainError::invariant("invoice total overflow"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    use crate::invoice::InvoiceItem;
    use crate::source::{InMemoryInvoiceStore, StoreError};

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn missing_source_is_invalid_argument() {
        let err = InvoiceAggregator::<Vec<Invoice>>::from_optional(None).unwrap_err();
        match err {
            DomainError::InvalidArgument(msg) if msg.contains("source") => {}
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }

        assert!(InvoiceAggregator::from_optional(Some(Vec::<Invoice>::new())).is_ok());
    }

    #[test]
    fn missing_invoice_differs_from_zero_value_invoice() {
        let aggregator = InvoiceAggregator::new(vec![Invoice::new(9)]);

        assert_eq!(aggregator.total(InvoiceId(9)).unwrap(), Some(Decimal::ZERO));
        assert_eq!(aggregator.total(InvoiceId(10)).unwrap(), None);
    }

    #[test]
    fn duplicate_ids_are_summed() {
        let aggregator = InvoiceAggregator::new(vec![
            Invoice::new(5).with_item(InvoiceItem::new("a", dec!(2), 3)),
            Invoice::new(6).with_item(InvoiceItem::new("a", dec!(100), 1)),
            Invoice::new(5)
                .accepted_on(day(2022, 1, 1))
                .with_item(InvoiceItem::new("b", dec!(1.5), 4)),
        ]);

        assert_eq!(aggregator.total(InvoiceId(5)).unwrap(), Some(dec!(12)));
    }

    #[test]
    fn unpaid_total_is_zero_without_unpaid_invoices() {
        let aggregator = InvoiceAggregator::new(vec![
            Invoice::new(1)
                .accepted_on(day(2022, 1, 1))
                .with_item(InvoiceItem::new("a", dec!(20), 20)),
        ]);

        assert_eq!(aggregator.total_of_unpaid().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn report_skips_unaccepted_invoices_whatever_the_bounds() {
        let aggregator = InvoiceAggregator::new(vec![
            Invoice::new(4).with_item(InvoiceItem::new("a", dec!(10), 10)),
        ]);

        assert!(aggregator.items_report(None, None).unwrap().is_empty());
        assert!(aggregator.items_report(Some(day(2000, 1, 1)), Some(day(2100, 1, 1))).unwrap().is_empty());
    }

    #[test]
    fn inverted_range_yields_empty_report() {
        let aggregator = InvoiceAggregator::new(vec![
            Invoice::new(1)
                .accepted_on(day(2022, 5, 1))
                .with_item(InvoiceItem::new("a", dec!(1), 1)),
        ]);

        let report = aggregator.items_report(Some(day(2022, 6, 1)), Some(day(2022, 4, 1))).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn source_errors_propagate_unchanged() {
        let err = InvoiceAggregator::new(FailingSource).total_of_unpaid().unwrap_err();
        assert_eq!(err.source_error(), Some(&StoreError::Poisoned));
        assert_eq!(err.into_source(), Some(StoreError::Poisoned));

        let err = InvoiceAggregator::new(FailingSource).items_report(None, None).unwrap_err();
        assert!(matches!(err, QueryError::Source(StoreError::Poisoned)));
    }

    #[test]
    fn reads_through_shared_store() {
        let store = std::sync::Arc::new(InMemoryInvoiceStore::new());
        let aggregator = InvoiceAggregator::new(std::sync::Arc::clone(&store));
        assert_eq!(aggregator.total(InvoiceId(1)).unwrap(), None);

        store
            .insert(Invoice::new(1).with_item(InvoiceItem::new("a", dec!(3), 3)))
            .unwrap();
        assert_eq!(aggregator.total(InvoiceId(1)).unwrap(), Some(dec!(9)));
        assert_eq!(aggregator.total_of_unpaid().unwrap(), dec!(9));
    }

    #[test]
    fn overflow_surfaces_as_domain_error() {
        let aggregator = InvoiceAggregator::new(vec![
            Invoice::new(1).with_item(InvoiceItem::new("a", Decimal::MAX, 1)),
            Invoice::new(1).with_item(InvoiceItem::new("b", Decimal::MAX, 1)),
        ]);

        match aggregator.total(InvoiceId(1)).unwrap_err() {
            QueryError::Domain(DomainError::InvariantViolation(_)) => {}
            other => panic!("Expected overflow, got {other:?}"),
        }
    }

    struct FailingSource;

    impl InvoiceSource for FailingSource {
        type Error = StoreError;

        fn select(&self, _filter: &InvoiceFilter) -> Result<Vec<Invoice>, Self::Error> {
            Err(StoreError::Poisoned)
        }
    }
}
