//! The three dashboard summaries
//!
//! All grouping goes through `BTreeMap`, so output order never depends
//! on hashing and repeated runs are identical.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::model::SaleRecord;

/// Number of sellers shown in the ranking chart
pub const TOP_SELLERS: usize = 10;

/// Distinct orders purchased in one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyVolume {
    /// `YYYY-MM`
    pub month: String,
    pub orders: usize,
}

/// A row that was both delivered and reviewed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReview {
    pub order_id: String,
    pub seller_id: String,
    pub review_score: u8,
    pub delivery_days: i64,
}

/// Per-seller ranking entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerSummary {
    pub seller_id: String,
    pub orders: usize,
    pub avg_review_score: f64,
    pub avg_delivery_days: f64,
}

/// Distinct order count per purchase month, oldest first
pub fn monthly_volume(rows: &[SaleRecord]) -> Vec<MonthlyVolume> {
    let mut by_month: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    for row in rows {
        by_month
            .entry(row.month())
            .or_default()
            .insert(row.order_id.as_str());
    }

    by_month
        .into_iter()
        .map(|(month, orders)| MonthlyVolume {
            month,
            orders: orders.len(),
        })
        .collect()
}

/// Rows with both a delivery time and a review score
///
/// Undelivered or unreviewed rows are dropped here, not reported.
pub fn delivered_reviewed(rows: &[SaleRecord]) -> Vec<DeliveryReview> {
    rows.iter()
        .filter_map(|row| {
            let delivery_days = row.delivery_days()?;
            let review_score = row.review_score?;
            Some(DeliveryReview {
                order_id: row.order_id.clone(),
                seller_id: row.seller_id.clone(),
                review_score,
                delivery_days,
            })
        })
        .collect()
}

/// Raw (review score, delivery days) pairs for the distribution chart
pub fn delivery_vs_review(pairs: &[DeliveryReview]) -> Vec<(u8, i64)> {
    pairs
        .iter()
        .map(|p| (p.review_score, p.delivery_days))
        .collect()
}

#[derive(Default)]
struct SellerAccumulator<'a> {
    orders: BTreeSet<&'a str>,
    rows: usize,
    review_sum: f64,
    delivery_sum: f64,
}

/// Sellers ranked by distinct order count, at most `limit` entries
///
/// Means are taken over rows, so an order with two items from the same
/// seller weighs twice. The sort is stable over seller-id order, which
/// fixes the order of ties.
pub fn top_sellers(pairs: &[DeliveryReview], limit: usize) -> Vec<SellerSummary> {
    let mut by_seller: BTreeMap<&str, SellerAccumulator> = BTreeMap::new();
    for pair in pairs {
        let acc = by_seller.entry(pair.seller_id.as_str()).or_default();
        acc.orders.insert(pair.order_id.as_str());
        acc.rows += 1;
        acc.review_sum += f64::from(pair.review_score);
        acc.delivery_sum += pair.delivery_days as f64;
    }

    let mut summaries: Vec<SellerSummary> = by_seller
        .into_iter()
        .map(|(seller_id, acc)| SellerSummary {
            seller_id: seller_id.to_string(),
            orders: acc.orders.len(),
            avg_review_score: acc.review_sum / acc.rows as f64,
            avg_delivery_days: acc.delivery_sum / acc.rows as f64,
        })
        .collect();

    summaries.sort_by(|a, b| b.orders.cmp(&a.orders));
    summaries.truncate(limit);
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_timestamp;

    fn sale(order: &str, seller: &str, purchased: &str, delivered: Option<&str>, score: Option<u8>) -> SaleRecord {
        SaleRecord {
            order_id: order.to_string(),
            customer_id: "c".to_string(),
            customer_state: "SP".to_string(),
            purchased_at: parse_timestamp(purchased).unwrap(),
            delivered_at: delivered.map(|d| parse_timestamp(d).unwrap()),
            product_id: "p".to_string(),
            product_category_name: Some("cool_stuff".to_string()),
            seller_id: seller.to_string(),
            review_score: score,
        }
    }

    #[test]
    fn test_monthly_volume_counts_distinct_orders() {
        let rows = vec![
            sale("o1", "s1", "2017-02-03 10:00:00", None, None),
            sale("o1", "s2", "2017-02-03 10:00:00", None, None),
            sale("o2", "s1", "2017-01-20 10:00:00", None, None),
            sale("o3", "s1", "2017-02-28 23:59:59", None, None),
        ];

        let monthly = monthly_volume(&rows);
        assert_eq!(
            monthly,
            vec![
                MonthlyVolume {
                    month: "2017-01".to_string(),
                    orders: 1
                },
                MonthlyVolume {
                    month: "2017-02".to_string(),
                    orders: 2
                },
            ]
        );
    }

    #[test]
    fn test_monthly_volume_sorted_across_years() {
        let rows = vec![
            sale("o1", "s1", "2018-01-01 00:00:00", None, None),
            sale("o2", "s1", "2016-12-31 00:00:00", None, None),
            sale("o3", "s1", "2017-10-05 00:00:00", None, None),
        ];
        let months: Vec<_> = monthly_volume(&rows).into_iter().map(|m| m.month).collect();
        assert_eq!(months, vec!["2016-12", "2017-10", "2018-01"]);
    }

    #[test]
    fn test_delivered_reviewed_drops_incomplete_rows() {
        let rows = vec![
            sale("o1", "s1", "2017-03-01 00:00:00", Some("2017-03-11 12:00:00"), Some(5)),
            sale("o2", "s1", "2017-03-01 00:00:00", None, Some(1)),
            sale("o3", "s1", "2017-03-01 00:00:00", Some("2017-03-02 00:00:00"), None),
        ];

        let pairs = delivered_reviewed(&rows);
        assert_eq!(pairs.len(), 1);
        assert_eq!(delivery_vs_review(&pairs), vec![(5, 10)]);
    }

    #[test]
    fn test_top_sellers_means_and_order() {
        let rows = vec![
            sale("o1", "s1", "2017-03-01 00:00:00", Some("2017-03-05 00:00:00"), Some(4)),
            sale("o2", "s1", "2017-03-01 00:00:00", Some("2017-03-09 00:00:00"), Some(2)),
            sale("o3", "s2", "2017-03-01 00:00:00", Some("2017-03-02 00:00:00"), Some(5)),
        ];

        let top = top_sellers(&delivered_reviewed(&rows), TOP_SELLERS);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].seller_id, "s1");
        assert_eq!(top[0].orders, 2);
        assert!((top[0].avg_review_score - 3.0).abs() < 1e-9);
        assert!((top[0].avg_delivery_days - 6.0).abs() < 1e-9);
        assert_eq!(top[1].seller_id, "s2");
        assert_eq!(top[1].orders, 1);
    }

    #[test]
    fn test_top_sellers_truncates_and_sorts_descending() {
        let mut rows = Vec::new();
        for seller in 0..15 {
            for order in 0..=seller {
                rows.push(sale(
                    &format!("o{seller}-{order}"),
                    &format!("s{seller:02}"),
                    "2017-06-01 00:00:00",
                    Some("2017-06-04 00:00:00"),
                    Some(3),
                ));
            }
        }

        let top = top_sellers(&delivered_reviewed(&rows), TOP_SELLERS);
        assert_eq!(top.len(), TOP_SELLERS);
        assert_eq!(top[0].seller_id, "s14");
        assert!(top.windows(2).all(|w| w[0].orders >= w[1].orders));
    }

    #[test]
    fn test_top_sellers_ties_in_seller_order() {
        let rows = vec![
            sale("o1", "sb", "2017-03-01 00:00:00", Some("2017-03-02 00:00:00"), Some(5)),
            sale("o2", "sa", "2017-03-01 00:00:00", Some("2017-03-02 00:00:00"), Some(5)),
        ];
        let ids: Vec<_> = top_sellers(&delivered_reviewed(&rows), TOP_SELLERS)
            .into_iter()
            .map(|s| s.seller_id)
            .collect();
        assert_eq!(ids, vec!["sa", "sb"]);
    }

    #[test]
    fn test_empty_input_gives_empty_summaries() {
        assert!(monthly_volume(&[]).is_empty());
        assert!(delivered_reviewed(&[]).is_empty());
        assert!(top_sellers(&[], TOP_SELLERS).is_empty());
    }
}
