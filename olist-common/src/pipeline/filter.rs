//! Sidebar inclusion-set filters (customer state, product category)

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::model::SaleRecord;
use crate::{Error, Result};

/// Values offered by the two multi-selects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Distinct customer states, sorted
    pub states: Vec<String>,
    /// Distinct non-null product categories, sorted
    pub categories: Vec<String>,
    /// Rows whose category is null; these never pass the category filter
    pub uncategorized_rows: usize,
}

impl FilterOptions {
    pub fn from_rows(rows: &[SaleRecord]) -> Self {
        let mut states = BTreeSet::new();
        let mut categories = BTreeSet::new();
        let mut uncategorized_rows = 0;

        for row in rows {
            states.insert(row.customer_state.as_str());
            match row.product_category_name.as_deref() {
                Some(category) => {
                    categories.insert(category);
                }
                None => uncategorized_rows += 1,
            }
        }

        Self {
            states: states.into_iter().map(str::to_string).collect(),
            categories: categories.into_iter().map(str::to_string).collect(),
            uncategorized_rows,
        }
    }
}

/// The user's choice in each multi-select
///
/// `None` means the default (every observed value). An empty list means
/// nothing is selected and matches no rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub states: Option<Vec<String>>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

impl Selection {
    /// Default selection: all states, all categories
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(states: Vec<String>, categories: Vec<String>) -> Self {
        Self {
            states: Some(states),
            categories: Some(categories),
        }
    }

    /// Every selected value must be one of the offered options
    ///
    /// Options come straight from the joined table, so whatever the sidebar
    /// offers (an empty state cell included) is accepted back.
    pub fn validate(&self, options: &FilterOptions) -> Result<()> {
        let checks = [
            ("state", &self.states, &options.states),
            ("category", &self.categories, &options.categories),
        ];
        for (field, chosen, offered) in checks {
            let Some(chosen) = chosen else {
                continue;
            };
            if let Some(unknown) = chosen.iter().find(|v| !offered.contains(*v)) {
                return Err(Error::InvalidInput(format!("unknown {field} '{unknown}'")));
            }
        }
        Ok(())
    }
}

/// Inclusion set resolved against the available options
enum Allowed<'a> {
    Any,
    Only(HashSet<&'a str>),
}

impl<'a> Allowed<'a> {
    fn new(choice: &'a Option<Vec<String>>) -> Self {
        match choice {
            None => Allowed::Any,
            Some(values) => Allowed::Only(values.iter().map(String::as_str).collect()),
        }
    }

    fn contains(&self, value: &str) -> bool {
        match self {
            Allowed::Any => true,
            Allowed::Only(set) => set.contains(value),
        }
    }
}

/// Rows whose state AND category are both selected
///
/// A null category is absent from the option list, so it is outside
/// every category selection, the default one included.
pub fn apply_filters(rows: &[SaleRecord], selection: &Selection) -> Vec<SaleRecord> {
    let states = Allowed::new(&selection.states);
    let categories = Allowed::new(&selection.categories);

    rows.iter()
        .filter(|row| states.contains(&row.customer_state))
        .filter(|row| match row.product_category_name.as_deref() {
            Some(category) => categories.contains(category),
            None => false,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_timestamp;

    fn row(order: &str, state: &str, category: Option<&str>) -> SaleRecord {
        SaleRecord {
            order_id: order.to_string(),
            customer_id: format!("c-{order}"),
            customer_state: state.to_string(),
            purchased_at: parse_timestamp("2018-05-10 09:00:00").unwrap(),
            delivered_at: None,
            product_id: "p".to_string(),
            product_category_name: category.map(str::to_string),
            seller_id: "s".to_string(),
            review_score: None,
        }
    }

    fn sample() -> Vec<SaleRecord> {
        vec![
            row("o1", "SP", Some("beleza_saude")),
            row("o2", "RJ", Some("informatica_acessorios")),
            row("o3", "SP", None),
            row("o4", "MG", Some("beleza_saude")),
        ]
    }

    #[test]
    fn test_options_sorted_and_null_category_flagged() {
        let options = FilterOptions::from_rows(&sample());
        assert_eq!(options.states, vec!["MG", "RJ", "SP"]);
        assert_eq!(
            options.categories,
            vec!["beleza_saude", "informatica_acessorios"]
        );
        assert_eq!(options.uncategorized_rows, 1);
    }

    #[test]
    fn test_default_selection_drops_only_null_categories() {
        let rows = sample();
        let filtered = apply_filters(&rows, &Selection::all());
        let options = FilterOptions::from_rows(&rows);
        assert_eq!(filtered.len(), rows.len() - options.uncategorized_rows);
    }

    #[test]
    fn test_explicit_full_option_lists_match_default() {
        let rows = sample();
        let options = FilterOptions::from_rows(&rows);
        let explicit = Selection::new(options.states.clone(), options.categories.clone());
        assert_eq!(
            apply_filters(&rows, &explicit),
            apply_filters(&rows, &Selection::all())
        );
    }

    #[test]
    fn test_state_and_category_combine_with_and() {
        let selection = Selection::new(
            vec!["SP".to_string()],
            vec!["beleza_saude".to_string()],
        );
        let filtered = apply_filters(&sample(), &selection);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].order_id, "o1");
    }

    #[test]
    fn test_empty_selection_matches_nothing() {
        let selection = Selection {
            states: Some(vec![]),
            categories: None,
        };
        assert!(apply_filters(&sample(), &selection).is_empty());
    }

    #[test]
    fn test_unknown_value_matches_nothing() {
        let selection = Selection {
            states: Some(vec!["XX".to_string()]),
            categories: None,
        };
        assert!(apply_filters(&sample(), &selection).is_empty());
    }

    #[test]
    fn test_options_round_trip_as_selection() {
        let mut rows = sample();
        rows.push(row("o5", "", Some("  ")));
        let options = FilterOptions::from_rows(&rows);
        assert_eq!(options.states, vec!["", "MG", "RJ", "SP"]);
        assert!(options.categories.contains(&"  ".to_string()));

        let selection = Selection::new(options.states.clone(), options.categories.clone());
        assert!(selection.validate(&options).is_ok());
        assert_eq!(apply_filters(&rows, &selection).len(), 4);
    }

    #[test]
    fn test_value_outside_options_rejected() {
        let options = FilterOptions::from_rows(&sample());
        let selection = Selection::new(vec!["XX".to_string()], vec![]);
        match selection.validate(&options) {
            Err(Error::InvalidInput(msg)) => assert!(msg.contains("XX")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
        assert!(Selection::all().validate(&options).is_ok());
    }

    #[test]
    fn test_selection_deserializes_missing_fields_as_default() {
        let selection: Selection = serde_json::from_str(r#"{"states":["SP"]}"#).unwrap();
        assert_eq!(selection.states, Some(vec!["SP".to_string()]));
        assert_eq!(selection.categories, None);
    }
}
