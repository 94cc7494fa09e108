use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::text::{fold, same_name};
use crate::domain::user::value_objects::RepresentativeId;

/// One sale or visit row
///
/// Rows are append-only from the application's point of view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRecord {
    pub representative_id: RepresentativeId,
    pub client_name: String,
    pub city: Option<String>,
    pub collection: String,
    pub brand: Option<String>,
    pub quantity: Decimal,
    pub amount: Decimal,
    pub discount: Decimal,
    pub term: Option<String>,
    /// Absent when the cell was blank or not a date
    pub date: Option<NaiveDate>,
}

impl SaleRecord {
    /// True when the row belongs to the representative and collection
    pub fn belongs_to(&self, representative_id: &RepresentativeId, collection: &str) -> bool {
        self.representative_id == *representative_id && same_name(&self.collection, collection)
    }

    /// True when the row is dated within `[start, end]`; undated rows never are
    pub fn dated_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date.map_or(false, |date| start <= date && date <= end)
    }

    /// Key used to count distinct clients
    pub fn client_key(&self) -> String {
        fold(&self.client_name)
    }
}

/// A sale typed into the visit form, before validation
#[derive(Debug, Clone, Deserialize)]
pub struct NewSaleRecord {
    pub client_name: String,
    #[serde(default)]
    pub city: Option<String>,
    pub collection: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub quantity: Option<Decimal>,
    pub amount: Decimal,
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl NewSaleRecord {
    /// Validates the form and attributes it to the session's representative
    ///
    /// # Business Rules Enforced
    /// - Client and collection must not be blank
    /// - Amount, quantity and discount must not be negative
    /// - A missing date defaults to `today`
    pub fn validate(
        self,
        representative_id: RepresentativeId,
        today: NaiveDate,
    ) -> Result<SaleRecord, String> {
        let client_name = self.client_name.trim().to_string();
        if client_name.is_empty() {
            return Err("Client name cannot be empty".to_string());
        }

        let collection = self.collection.trim().to_string();
        if collection.is_empty() {
            return Err("Collection cannot be empty".to_string());
        }

        if self.amount < Decimal::ZERO {
            return Err("Amount cannot be negative".to_string());
        }

        let quantity = self.quantity.unwrap_or(Decimal::ZERO);
        if quantity < Decimal::ZERO {
            return Err("Quantity cannot be negative".to_string());
        }

        let discount = self.discount.unwrap_or(Decimal::ZERO);
        if discount < Decimal::ZERO {
            return Err("Discount cannot be negative".to_string());
        }

        Ok(SaleRecord {
            representative_id,
            client_name,
            city: non_blank(self.city),
            collection,
            brand: non_blank(self.brand),
            quantity,
            amount: self.amount,
            discount,
            term: non_blank(self.term),
            date: Some(self.date.unwrap_or(today)),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
