//! CSV bulk-import records for the product catalog.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// One parsed row of a product import file.
///
/// Column names match the `products` table. Optional columns left blank in
/// the file become `None` and persist as NULL.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewProduct {
    pub model: String,
    pub capacity_ah: Option<f64>,
    pub cold_cranking_amps_en: Option<String>,
    pub length_mm: Option<f64>,
    pub width_mm: Option<f64>,
    pub height_mm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub wholesale_price: Option<f64>,
    pub retail_price: Option<f64>,
    pub category_id: Option<i64>,
    pub photo: Option<String>,
}

/// Parses a headered CSV stream into product records.
///
/// # Errors
///
/// Returns [`ImportError::Csv`] on the first row that fails to parse; rows
/// before it are discarded with it (import is all-or-nothing at parse time).
pub fn parse_products_csv<R: std::io::Read>(reader: R) -> Result<Vec<NewProduct>, ImportError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "model,capacity_ah,cold_cranking_amps_en,length_mm,width_mm,height_mm,weight_kg,wholesale_price,retail_price,category_id,photo";

    #[test]
    fn parses_complete_rows() {
        let data = format!(
            "{HEADER}\nVX-60,60,540,242,175,190,14.2,55.5,72,1,/uploads/vx-60.jpg\n"
        );
        let rows = parse_products_csv(data.as_bytes()).expect("should parse");
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.model, "VX-60");
        assert_eq!(row.capacity_ah, Some(60.0));
        assert_eq!(row.cold_cranking_amps_en.as_deref(), Some("540"));
        assert_eq!(row.retail_price, Some(72.0));
        assert_eq!(row.category_id, Some(1));
        assert_eq!(row.photo.as_deref(), Some("/uploads/vx-60.jpg"));
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let data = format!("{HEADER}\nVX-75,,,,,,,,,,\n");
        let rows = parse_products_csv(data.as_bytes()).expect("should parse");
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.model, "VX-75");
        assert_eq!(row.capacity_ah, None);
        assert_eq!(row.wholesale_price, None);
        assert_eq!(row.retail_price, None);
        assert_eq!(row.category_id, None);
        assert_eq!(row.photo, None);
    }

    #[test]
    fn malformed_numeric_field_is_an_error() {
        let data = format!("{HEADER}\nVX-90,heavy,,,,,,,,,\n");
        let result = parse_products_csv(data.as_bytes());
        assert!(matches!(result, Err(ImportError::Csv(_))));
    }

    #[test]
    fn parses_multiple_rows_in_order() {
        let data = format!(
            "{HEADER}\nVX-60,60,,,,,,,72,,\nVX-75,75,,,,,,,88,,\n"
        );
        let rows = parse_products_csv(data.as_bytes()).expect("should parse");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].model, "VX-60");
        assert_eq!(rows[1].model, "VX-75");
    }
}
