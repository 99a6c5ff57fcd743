//! Filter-option aggregation over an already-filtered product set.
//!
//! Facets are computed from the rows the current filters produced, not the
//! unfiltered catalog: narrowing a filter narrows the remaining options.

use std::collections::BTreeMap;

use serde::Serialize;
use voltcart_core::filters::{FilterField, ListingMode};

use crate::categories::CategoryRow;
use crate::products::ProductRow;

/// Distinct values per facet attribute, plus the full category list.
///
/// Serializes flat: one key per attribute's parameter name alongside a
/// `categories` key, matching what the storefront's facet renderer expects.
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    #[serde(flatten)]
    pub values: BTreeMap<&'static str, Vec<f64>>,
    pub categories: Vec<CategoryRow>,
}

/// Collects the distinct non-null values of every facet attribute for the
/// mode across `rows`. Values are sorted ascending for deterministic
/// output; the category list is passed through unfiltered.
#[must_use]
pub fn collect_filter_options(
    mode: ListingMode,
    rows: &[ProductRow],
    categories: Vec<CategoryRow>,
) -> FilterOptions {
    let mut values = BTreeMap::new();
    for field in FilterField::facets(mode) {
        values.insert(field.param_name(), distinct_values(*field, rows));
    }
    FilterOptions { values, categories }
}

fn distinct_values(field: FilterField, rows: &[ProductRow]) -> Vec<f64> {
    let mut out: Vec<f64> = rows.iter().filter_map(|row| facet_value(field, row)).collect();
    out.sort_by(f64::total_cmp);
    out.dedup_by(|a, b| a.to_bits() == b.to_bits());
    out
}

// Category ids are small enough that the f64 facet representation is exact.
#[allow(clippy::cast_precision_loss)]
fn facet_value(field: FilterField, row: &ProductRow) -> Option<f64> {
    match field {
        FilterField::RetailPrice => row.retail_price,
        FilterField::WholesalePrice => row.wholesale_price,
        FilterField::CapacityAh => row.capacity_ah,
        FilterField::LengthMm => row.length_mm,
        FilterField::WidthMm => row.width_mm,
        FilterField::HeightMm => row.height_mm,
        FilterField::WeightKg => row.weight_kg,
        FilterField::CategoryId => row.category_id.map(|id| id as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, retail: Option<f64>, capacity: Option<f64>, category: Option<i64>) -> ProductRow {
        ProductRow {
            id,
            model: format!("VX-{id}"),
            capacity_ah: capacity,
            cold_cranking_amps_en: None,
            length_mm: None,
            width_mm: None,
            height_mm: None,
            weight_kg: None,
            wholesale_price: None,
            retail_price: retail,
            category_id: category,
            photo: None,
            views: 0,
        }
    }

    fn category(id: i64, name: &str) -> CategoryRow {
        CategoryRow {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn values_are_distinct_and_sorted() {
        let rows = vec![
            product(1, Some(72.0), Some(60.0), Some(1)),
            product(2, Some(55.0), Some(60.0), Some(2)),
            product(3, Some(72.0), Some(75.0), Some(1)),
        ];
        let options = collect_filter_options(ListingMode::Retail, &rows, vec![]);

        assert_eq!(options.values["retail_price"], vec![55.0, 72.0]);
        assert_eq!(options.values["capacity_ah"], vec![60.0, 75.0]);
        assert_eq!(options.values["category_id"], vec![1.0, 2.0]);
    }

    #[test]
    fn null_attribute_values_are_excluded() {
        let rows = vec![
            product(1, Some(72.0), None, None),
            product(2, Some(55.0), Some(60.0), Some(1)),
        ];
        let options = collect_filter_options(ListingMode::Retail, &rows, vec![]);

        assert_eq!(options.values["capacity_ah"], vec![60.0]);
        assert_eq!(options.values["category_id"], vec![1.0]);
    }

    #[test]
    fn mode_selects_which_price_attribute_is_reported() {
        let rows = vec![product(1, Some(72.0), None, None)];

        let retail = collect_filter_options(ListingMode::Retail, &rows, vec![]);
        assert!(retail.values.contains_key("retail_price"));
        assert!(!retail.values.contains_key("wholesale_price"));

        let wholesale = collect_filter_options(ListingMode::Wholesale, &rows, vec![]);
        assert!(wholesale.values.contains_key("wholesale_price"));
        assert!(!wholesale.values.contains_key("retail_price"));
    }

    #[test]
    fn categories_pass_through_unfiltered() {
        let cats = vec![category(1, "Car batteries"), category(2, "Truck batteries")];
        let options = collect_filter_options(ListingMode::Retail, &[], cats.clone());
        assert_eq!(options.categories, cats);
    }

    #[test]
    fn serializes_flat_with_categories_key() {
        let rows = vec![product(1, Some(72.0), Some(60.0), Some(1))];
        let options = collect_filter_options(
            ListingMode::Retail,
            &rows,
            vec![category(1, "Car batteries")],
        );
        let json = serde_json::to_value(&options).expect("serialize");

        assert_eq!(json["retail_price"], serde_json::json!([72.0]));
        assert_eq!(json["categories"][0]["name"], "Car batteries");
    }
}
