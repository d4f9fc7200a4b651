//! Invoice selection criteria.
//!
//! Filters are plain data: in-memory sources evaluate them with
//! [`InvoiceFilter::matches`], queryable stores can translate them into their
//! own query language instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::invoice::{Invoice, InvoiceId};

/// Inclusive timestamp range. An absent bound is unbounded on that side.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    /// Both bounds absent.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// `from > to`: nothing can match.
    pub fn is_inverted(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if from > to)
    }

    /// `from <= ts <= to`, treating a missing bound as -inf / +inf.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| ts >= from) && self.to.is_none_or(|to| ts <= to)
    }
}

/// Constraint on an invoice's acceptance date.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AcceptanceFilter {
    /// No constraint.
    #[default]
    Any,
    /// Acceptance date absent.
    Unpaid,
    /// Acceptance date present and inside the range.
    AcceptedWithin(DateRange),
}

impl AcceptanceFilter {
    pub fn matches(&self, acceptance_date: Option<DateTime<Utc>>) -> bool {
        match self {
            AcceptanceFilter::Any => true,
            AcceptanceFilter::Unpaid => acceptance_date.is_none(),
            AcceptanceFilter::AcceptedWithin(range) => {
                acceptance_date.is_some_and(|date| range.contains(date))
            }
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFilter {
    pub id: Option<InvoiceId>,
    pub acceptance: AcceptanceFilter,
}

impl InvoiceFilter {
    /// Every invoice.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: InvoiceId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn unpaid() -> Self {
        Self {
            id: None,
            acceptance: AcceptanceFilter::Unpaid,
        }
    }

    pub fn accepted_within(range: DateRange) -> Self {
        Self {
            id: None,
            acceptance: AcceptanceFilter::AcceptedWithin(range),
        }
    }

    pub fn matches(&self, invoice: &Invoice) -> bool {
        self.id.is_none_or(|id| invoice.id == id) && self.acceptance.matches(invoice.acceptance_date)
    }
}
