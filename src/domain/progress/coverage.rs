use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::calculator::sales_for;
use crate::domain::sales::SaleRecord;
use crate::domain::user::value_objects::RepresentativeId;

/// What one client bought from a representative within a collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientCoverage {
    /// Name as first written in the sales sheet
    pub client_name: String,
    pub city: Option<String>,
    pub total_amount: Decimal,
    pub orders: usize,
    pub last_sale: Option<NaiveDate>,
}

/// Groups the representative's sales by client, biggest buyers first
pub fn client_coverage(
    representative_id: &RepresentativeId,
    collection: &str,
    sales: &[SaleRecord],
) -> Vec<ClientCoverage> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut clients: Vec<ClientCoverage> = Vec::new();

    for sale in sales_for(sales, representative_id, collection) {
        let slot = *index.entry(sale.client_key()).or_insert_with(|| {
            clients.push(ClientCoverage {
                client_name: sale.client_name.trim().to_string(),
                city: None,
                total_amount: Decimal::ZERO,
                orders: 0,
                last_sale: None,
            });
            clients.len() - 1
        });

        let client = &mut clients[slot];
        client.total_amount += sale.amount;
        client.orders += 1;
        if client.city.is_none() {
            client.city = sale.city.clone();
        }
        client.last_sale = client.last_sale.max(sale.date);
    }

    clients.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then_with(|| a.client_name.cmp(&b.client_name))
    });
    clients
}
