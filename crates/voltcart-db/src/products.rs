//! Database operations for the `products` table.

use serde::Serialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use voltcart_core::filters::ProductQuerySpec;
use voltcart_core::NewProduct;

use crate::DbError;

/// A row from the `products` table.
///
/// All dimensional and price attributes are nullable; a listing mode's
/// price column is forced non-null by the listing query itself.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
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
    pub views: i64,
}

const PRODUCT_COLUMNS: &str = "id, model, capacity_ah, cold_cranking_amps_en, length_mm, \
     width_mm, height_mm, weight_kg, wholesale_price, retail_price, category_id, photo, views";

/// Executes a listing query for the given typed spec.
///
/// The WHERE clause is assembled from the spec's closed enums only — column
/// names and operators come from compile-time mappings, filter values are
/// always bound parameters.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_products(
    pool: &PgPool,
    spec: &ProductQuerySpec,
) -> Result<Vec<ProductRow>, DbError> {
    let mut builder = listing_query(spec);
    let rows = builder
        .build_query_as::<ProductRow>()
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

fn listing_query(spec: &ProductQuerySpec) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE {} IS NOT NULL",
        spec.mode.price_column()
    ));

    for predicate in &spec.predicates {
        builder.push(" AND ");
        builder.push(predicate.field.column());
        builder.push(" ");
        builder.push(predicate.comparison.operator());
        builder.push(" ");
        builder.push_bind(predicate.value);
    }

    if let Some((key, direction)) = spec.sort {
        builder.push(" ORDER BY ");
        builder.push(key.column(spec.mode));
        builder.push(" ");
        builder.push(direction.sql());
    }

    builder
}

/// Fetches a single product by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_product(pool: &PgPool, id: i64) -> Result<Option<ProductRow>, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(
        "SELECT id, model, capacity_ah, cold_cranking_amps_en, length_mm, \
                width_mm, height_mm, weight_kg, wholesale_price, retail_price, \
                category_id, photo, views \
         FROM products \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Bumps a product's view counter by one.
///
/// The increment happens inside the statement (`views = views + 1`), so
/// concurrent detail views never lose updates. A missing id touches zero
/// rows and is not an error.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the update fails.
pub async fn increment_views(pool: &PgPool, id: i64) -> Result<(), DbError> {
    sqlx::query("UPDATE products SET views = views + 1 WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Returns the most-viewed products, views descending.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_best_products(pool: &PgPool, limit: i64) -> Result<Vec<ProductRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT id, model, capacity_ah, cold_cranking_amps_en, length_mm, \
                width_mm, height_mm, weight_kg, wholesale_price, retail_price, \
                category_id, photo, views \
         FROM products \
         ORDER BY views DESC, id ASC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Case-insensitive substring search on the model name.
///
/// The pattern is a bound value; `%` wrapping happens here, never in the
/// query text.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn search_by_model(pool: &PgPool, term: &str) -> Result<Vec<ProductRow>, DbError> {
    let pattern = format!("%{term}%");
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT id, model, capacity_ah, cold_cranking_amps_en, length_mm, \
                width_mm, height_mm, weight_kg, wholesale_price, retail_price, \
                category_id, photo, views \
         FROM products \
         WHERE model ILIKE $1 \
         ORDER BY id",
    )
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Inserts one imported product row and returns its id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_product(pool: &PgPool, product: &NewProduct) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar::<_, i64>(
        "INSERT INTO products \
             (model, capacity_ah, cold_cranking_amps_en, length_mm, width_mm, \
              height_mm, weight_kg, wholesale_price, retail_price, category_id, photo) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         RETURNING id",
    )
    .bind(&product.model)
    .bind(product.capacity_ah)
    .bind(&product.cold_cranking_amps_en)
    .bind(product.length_mm)
    .bind(product.width_mm)
    .bind(product.height_mm)
    .bind(product.weight_kg)
    .bind(product.wholesale_price)
    .bind(product.retail_price)
    .bind(product.category_id)
    .bind(&product.photo)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltcart_core::filters::{
        Comparison, FilterField, ListingMode, Predicate, SortDirection, SortKey,
    };

    fn spec(
        mode: ListingMode,
        predicates: Vec<Predicate>,
        sort: Option<(SortKey, SortDirection)>,
    ) -> ProductQuerySpec {
        ProductQuerySpec {
            mode,
            predicates,
            sort,
        }
    }

    #[test]
    fn listing_query_starts_from_mode_base_predicate() {
        let builder = listing_query(&spec(ListingMode::Retail, vec![], None));
        assert!(builder.sql().contains("WHERE retail_price IS NOT NULL"));

        let builder = listing_query(&spec(ListingMode::Wholesale, vec![], None));
        assert!(builder.sql().contains("WHERE wholesale_price IS NOT NULL"));
    }

    #[test]
    fn listing_query_emits_placeholders_not_values() {
        let builder = listing_query(&spec(
            ListingMode::Retail,
            vec![
                Predicate {
                    field: FilterField::RetailPrice,
                    comparison: Comparison::Gte,
                    value: 50.0,
                },
                Predicate {
                    field: FilterField::CategoryId,
                    comparison: Comparison::Eq,
                    value: 3.0,
                },
            ],
            None,
        ));
        let sql = builder.sql();
        assert!(sql.contains("AND retail_price >= $1"), "sql: {sql}");
        assert!(sql.contains("AND category_id = $2"), "sql: {sql}");
        assert!(!sql.contains("50"), "value leaked into query text: {sql}");
    }

    #[test]
    fn listing_query_appends_order_by_from_sort_spec() {
        let builder = listing_query(&spec(
            ListingMode::Retail,
            vec![],
            Some((SortKey::Model, SortDirection::Descending)),
        ));
        assert!(builder.sql().ends_with("ORDER BY model DESC"));
    }

    #[test]
    fn listing_query_without_sort_has_no_order_by() {
        let builder = listing_query(&spec(ListingMode::Retail, vec![], None));
        assert!(!builder.sql().contains("ORDER BY"));
    }
}
