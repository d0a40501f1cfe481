//! Relational join of the six source tables
//!
//! Order ⋈ Customer → ⋈ OrderItem → ⋈ Product → ⟕ Review → ⋈ Seller.
//! Every step except reviews is an inner join, so an item whose customer,
//! product or seller cannot be resolved is dropped along with its review.

use std::collections::HashMap;
use tracing::debug;

use crate::model::{Dataset, SaleRecord};

/// Multimap from a key column to the rows carrying it
fn index_by<'a, T>(rows: &'a [T], key: impl Fn(&'a T) -> &'a str) -> HashMap<&'a str, Vec<&'a T>> {
    let mut index: HashMap<&str, Vec<&T>> = HashMap::with_capacity(rows.len());
    for row in rows {
        index.entry(key(row)).or_default().push(row);
    }
    index
}

/// Build the denormalized sale table
///
/// Duplicate keys fan out (two reviews for one order give two rows per
/// item). Rows come out in orders-table order, then item order, then
/// review order.
pub fn join_tables(dataset: &Dataset) -> Vec<SaleRecord> {
    let customers = index_by(&dataset.customers, |c| c.customer_id.as_str());
    let items = index_by(&dataset.items, |i| i.order_id.as_str());
    let products = index_by(&dataset.products, |p| p.product_id.as_str());
    let reviews = index_by(&dataset.reviews, |r| r.order_id.as_str());
    let sellers = index_by(&dataset.sellers, |s| s.seller_id.as_str());

    let mut joined = Vec::with_capacity(dataset.items.len());

    for order in &dataset.orders {
        let Some(order_customers) = customers.get(order.customer_id.as_str()) else {
            continue;
        };
        let Some(order_items) = items.get(order.order_id.as_str()) else {
            continue;
        };
        let order_reviews = reviews.get(order.order_id.as_str());

        for customer in order_customers {
            for item in order_items {
                let Some(item_products) = products.get(item.product_id.as_str()) else {
                    continue;
                };
                let Some(item_sellers) = sellers.get(item.seller_id.as_str()) else {
                    continue;
                };

                for product in item_products {
                    let scores: Vec<Option<u8>> = match order_reviews {
                        Some(found) => found.iter().map(|r| Some(r.review_score)).collect(),
                        None => vec![None],
                    };

                    for review_score in scores {
                        for seller in item_sellers {
                            joined.push(SaleRecord {
                                order_id: order.order_id.clone(),
                                customer_id: customer.customer_id.clone(),
                                customer_state: customer.customer_state.clone(),
                                purchased_at: order.order_purchase_timestamp,
                                delivered_at: order.order_delivered_customer_date,
                                product_id: product.product_id.clone(),
                                product_category_name: product.product_category_name.clone(),
                                seller_id: seller.seller_id.clone(),
                                review_score,
                            });
                        }
                    }
                }
            }
        }
    }

    debug!(
        "Joined {} orders / {} items into {} rows",
        dataset.orders.len(),
        dataset.items.len(),
        joined.len()
    );
    joined
}
