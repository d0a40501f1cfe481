//! Source table records and the joined sale record
//!
//! Fields are deserialized by CSV header name; columns not listed here
//! (prices, geolocation, review text...) are ignored on load.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::time::{deserialize_optional_timestamp, deserialize_timestamp};

/// One purchase transaction (`olist_orders_dataset.csv`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub order_purchase_timestamp: NaiveDateTime,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub order_delivered_customer_date: Option<NaiveDateTime>,
}

/// `olist_customers_dataset.csv`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Customer {
    pub customer_id: String,
    pub customer_state: String,
}

/// One line item of an order (`olist_order_items_dataset.csv`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OrderItem {
    pub order_id: String,
    pub product_id: String,
    pub seller_id: String,
}

/// `olist_products_dataset.csv`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Product {
    pub product_id: String,
    #[serde(default)]
    pub product_category_name: Option<String>,
}

/// `olist_order_reviews_dataset.csv`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Review {
    pub order_id: String,
    pub review_score: u8,
}

/// `olist_sellers_dataset.csv`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Seller {
    pub seller_id: String,
}

/// The six raw tables, immutable once loaded
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub orders: Vec<Order>,
    pub customers: Vec<Customer>,
    pub items: Vec<OrderItem>,
    pub products: Vec<Product>,
    pub reviews: Vec<Review>,
    pub sellers: Vec<Seller>,
}

/// Per-table row counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub orders: usize,
    pub customers: usize,
    pub items: usize,
    pub products: usize,
    pub reviews: usize,
    pub sellers: usize,
}

impl Dataset {
    pub fn counts(&self) -> TableCounts {
        TableCounts {
            orders: self.orders.len(),
            customers: self.customers.len(),
            items: self.items.len(),
            products: self.products.len(),
            reviews: self.reviews.len(),
            sellers: self.sellers.len(),
        }
    }
}

/// One row of the denormalized table: an (order, item, review) combination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRecord {
    pub order_id: String,
    pub customer_id: String,
    pub customer_state: String,
    pub purchased_at: NaiveDateTime,
    pub delivered_at: Option<NaiveDateTime>,
    pub product_id: String,
    pub product_category_name: Option<String>,
    pub seller_id: String,
    pub review_score: Option<u8>,
}

impl SaleRecord {
    /// Purchase month as `YYYY-MM`
    pub fn month(&self) -> String {
        crate::time::month_key(&self.purchased_at)
    }

    /// Delivery time in whole days, `None` when not delivered
    pub fn delivery_days(&self) -> Option<i64> {
        self.delivered_at
            .as_ref()
            .map(|delivered| crate::time::delivery_days(&self.purchased_at, delivered))
    }
}
