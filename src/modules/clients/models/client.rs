use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Currency, Result};

/// A customer of the tenant, billed through invoices and quotes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,

    /// Owning tenant
    #[serde(skip_serializing)]
    pub user_id: String,

    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub tax_id: Option<String>,

    /// Default currency for documents issued to this client
    pub currency: Currency,

    /// Payment terms in days
    pub payment_terms: i32,

    /// Standing discount percentage (0-100)
    pub discount: Decimal,

    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of POST /api/clients and PUT /api/clients/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub tax_id: Option<String>,
    pub currency: Option<Currency>,
    pub payment_terms: Option<i32>,
    pub discount: Option<Decimal>,
    pub notes: Option<String>,
}

impl ClientRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Client name cannot be empty"));
        }

        if self.name.len() > 255 {
            return Err(AppError::validation(
                "Client name cannot exceed 255 characters",
            ));
        }

        if let Some(email) = &self.email {
            if !email.is_empty() && !email.contains('@') {
                return Err(AppError::validation(format!("Invalid email: {}", email)));
            }
        }

        if let Some(terms) = self.payment_terms {
            if terms < 0 {
                return Err(AppError::validation(format!(
                    "Payment terms must be non-negative, got: {}",
                    terms
                )));
            }
        }

        if let Some(discount) = self.discount {
            if discount < Decimal::ZERO || discount > Decimal::ONE_HUNDRED {
                return Err(AppError::validation(format!(
                    "Discount must be between 0 and 100, got: {}",
                    discount
                )));
            }
        }

        Ok(())
    }
}

impl Client {
    /// Build a new client for `tenant_id` from a validated request
    pub fn new(request: ClientRequest, tenant_id: &str, default_currency: Currency) -> Result<Self> {
        request.validate()?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            user_id: tenant_id.to_string(),
            name: request.name.trim().to_string(),
            email: request.email,
            phone: request.phone,
            address: request.address,
            city: request.city,
            country: request.country,
            tax_id: request.tax_id,
            currency: request.currency.unwrap_or(default_currency),
            payment_terms: request.payment_terms.unwrap_or(30),
            discount: request.discount.unwrap_or(Decimal::ZERO),
            notes: request.notes,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace every editable field with the request's values
    pub fn apply(&mut self, request: ClientRequest) -> Result<()> {
        request.validate()?;

        self.name = request.name.trim().to_string();
        self.email = request.email;
        self.phone = request.phone;
        self.address = request.address;
        self.city = request.city;
        self.country = request.country;
        self.tax_id = request.tax_id;
        if let Some(currency) = request.currency {
            self.currency = currency;
        }
        self.payment_terms = request.payment_terms.unwrap_or(self.payment_terms);
        self.discount = request.discount.unwrap_or(self.discount);
        self.notes = request.notes;
        self.updated_at = Utc::now();

        Ok(())
    }
}
