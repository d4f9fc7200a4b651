use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tally_core::{DomainError, DomainResult, Entity};

/// Invoice identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub i32);

impl InvoiceId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl core::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i32> for InvoiceId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// A purchased line: `count` units of `name` at `price` each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub name: String,
    pub price: Decimal,
    pub count: u32,
}

impl InvoiceItem {
    pub fn new(name: impl Into<String>, price: Decimal, count: u32) -> Self {
        Self {
            name: name.into(),
            price,
            count,
        }
    }

    /// `price × count`.
    pub fn line_total(&self) -> DomainResult<Decimal> {
        self.price
            .checked_mul(Decimal::from(self.count))
            .ok_or_else(|| DomainError::invariant("invoice line amount overflow"))
    }
}

/// An invoice as supplied by an [`InvoiceSource`](crate::InvoiceSource).
///
/// `acceptance_date == None` means the invoice has not been accepted, i.e. it
/// is unpaid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    #[serde(default)]
    pub acceptance_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
}

impl Invoice {
    /// Create an unaccepted invoice without items.
    pub fn new(id: impl Into<InvoiceId>) -> Self {
        Self {
            id: id.into(),
            acceptance_date: None,
            items: Vec::new(),
        }
    }

    pub fn accepted_on(mut self, date: DateTime<Utc>) -> Self {
        self.acceptance_date = Some(date);
        self
    }

    pub fn with_item(mut self, item: InvoiceItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn acceptance_date(&self) -> Option<DateTime<Utc>> {
        self.acceptance_date
    }

    pub fn items(&self) -> &[InvoiceItem] {
        &self.items
    }

    pub fn is_unpaid(&self) -> bool {
        self.acceptance_date.is_none()
    }

    /// Sum of `price × count` over all items. An invoice without items is worth zero.
    pub fn total(&self) -> DomainResult<Decimal> {
        self.items.iter().try_fold(Decimal::ZERO, |acc, item| {
            acc.checked_add(item.line_total()?)
                .ok_or_else(|| DomainError::invariant("invoice total overflow"))
        })
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
