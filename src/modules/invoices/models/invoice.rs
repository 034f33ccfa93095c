// Invoice model
//
// An invoice bills a client for an ordered list of line items. Amounts are
// computed once at creation time and never recomputed afterwards; only the
// status (and the payment fields that follow it) change later.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Currency, Result};
use crate::modules::clients::Client;
use crate::modules::documents::{CreateLineItemRequest, DocumentItem};

/// Invoice status lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    /// Created, not yet sent to the client
    Draft,

    /// Sent and awaiting payment
    Sent,

    /// Settled in full
    Paid,

    /// Past its due date without payment
    Overdue,

    /// Voided
    Cancelled,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Draft
    }
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "DRAFT",
            InvoiceStatus::Sent => "SENT",
            InvoiceStatus::Paid => "PAID",
            InvoiceStatus::Overdue => "OVERDUE",
            InvoiceStatus::Cancelled => "CANCELLED",
        }
    }

    /// Whether an invoice may move from `self` to `next`
    pub fn can_transition_to(&self, next: InvoiceStatus) -> bool {
        use InvoiceStatus::*;

        matches!(
            (*self, next),
            (Draft, Sent)
                | (Draft, Cancelled)
                | (Sent, Paid)
                | (Sent, Overdue)
                | (Sent, Cancelled)
                | (Overdue, Paid)
                | (Overdue, Cancelled)
        )
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Ok(InvoiceStatus::Draft),
            "SENT" => Ok(InvoiceStatus::Sent),
            "PAID" => Ok(InvoiceStatus::Paid),
            "OVERDUE" => Ok(InvoiceStatus::Overdue),
            "CANCELLED" => Ok(InvoiceStatus::Cancelled),
            _ => Err(format!("Invalid invoice status: {}", s)),
        }
    }
}

/// Invoice header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,

    /// Human-readable number, e.g. INV-2024-0001
    pub invoice_number: String,

    #[serde(skip_serializing)]
    pub user_id: String,

    pub client_id: String,
    pub status: InvoiceStatus,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub currency: Currency,

    /// Sum of pre-discount line amounts
    pub subtotal: Decimal,

    /// Sum of line taxes (taxed on discounted bases)
    pub tax_amount: Decimal,

    /// subtotal + tax_amount
    pub total_amount: Decimal,

    pub paid_amount: Decimal,
    pub payment_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Apply a status change, enforcing the lifecycle
    pub fn transition_to(&mut self, next: InvoiceStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::validation(format!(
                "Invalid status transition from {} to {}",
                self.status, next
            )));
        }

        let now = Utc::now();
        if next == InvoiceStatus::Paid {
            self.paid_amount = self.total_amount;
            self.payment_date = Some(now);
        }

        self.status = next;
        self.updated_at = now;
        Ok(())
    }
}

/// Body of POST /api/invoices
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateInvoiceRequest {
    pub client_id: String,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,

    /// Defaults to the client's currency
    pub currency: Option<Currency>,

    pub notes: Option<String>,
    pub terms: Option<String>,
    pub items: Vec<CreateLineItemRequest>,
}

/// Body of PATCH /api/invoices/{id}/status
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvoiceStatusRequest {
    pub status: InvoiceStatus,
}

/// Invoice with its client and lines, as returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceResponse {
    #[serde(flatten)]
    pub invoice: Invoice,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,

    pub items: Vec<DocumentItem>,
}
