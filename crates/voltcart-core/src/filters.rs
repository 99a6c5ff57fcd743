//! Typed filter model for catalog listing queries.
//!
//! Filterable and sortable attributes are closed enums mapped to column
//! identifiers at compile time; nothing in a SQL identifier position ever
//! derives from request text. Values stay out of the query string entirely
//! and are bound by the query layer.

use std::collections::HashMap;

use thiserror::Error;

/// Which price column a listing requires, and which parameter set it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingMode {
    Retail,
    Wholesale,
}

impl ListingMode {
    #[must_use]
    pub fn price_column(self) -> &'static str {
        match self {
            ListingMode::Retail => "retail_price",
            ListingMode::Wholesale => "wholesale_price",
        }
    }
}

/// The closed set of filterable product attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    RetailPrice,
    WholesalePrice,
    CapacityAh,
    LengthMm,
    WidthMm,
    HeightMm,
    WeightKg,
    CategoryId,
}

impl FilterField {
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            FilterField::RetailPrice => "retail_price",
            FilterField::WholesalePrice => "wholesale_price",
            FilterField::CapacityAh => "capacity_ah",
            FilterField::LengthMm => "length_mm",
            FilterField::WidthMm => "width_mm",
            FilterField::HeightMm => "height_mm",
            FilterField::WeightKg => "weight_kg",
            FilterField::CategoryId => "category_id",
        }
    }

    /// The query-parameter name for the plain equality form; also the key
    /// under which facet values for this attribute are reported.
    #[must_use]
    pub fn param_name(self) -> &'static str {
        self.column()
    }

    /// Facet attributes offered for a listing mode, in report order.
    #[must_use]
    pub fn facets(mode: ListingMode) -> &'static [FilterField] {
        match mode {
            ListingMode::Retail => &[
                FilterField::RetailPrice,
                FilterField::CapacityAh,
                FilterField::LengthMm,
                FilterField::WidthMm,
                FilterField::HeightMm,
                FilterField::WeightKg,
                FilterField::CategoryId,
            ],
            ListingMode::Wholesale => &[
                FilterField::WholesalePrice,
                FilterField::CapacityAh,
                FilterField::LengthMm,
                FilterField::WidthMm,
                FilterField::HeightMm,
                FilterField::WeightKg,
                FilterField::CategoryId,
            ],
        }
    }

    /// Maps a query-parameter name to a field and comparison for the given
    /// mode. Range forms (`min_*`/`max_*`) exist only for the mode's price
    /// column; everything else is plain equality. Unknown names are `None`.
    fn recognize(mode: ListingMode, name: &str) -> Option<(Self, Comparison)> {
        let eq = |field| Some((field, Comparison::Eq));
        match (mode, name) {
            (_, "capacity_ah") => eq(FilterField::CapacityAh),
            (_, "length_mm") => eq(FilterField::LengthMm),
            (_, "width_mm") => eq(FilterField::WidthMm),
            (_, "height_mm") => eq(FilterField::HeightMm),
            (_, "weight_kg") => eq(FilterField::WeightKg),
            (_, "category_id") => eq(FilterField::CategoryId),
            (ListingMode::Retail, "retail_price") => eq(FilterField::RetailPrice),
            (ListingMode::Retail, "min_retail_price") => {
                Some((FilterField::RetailPrice, Comparison::Gte))
            }
            (ListingMode::Retail, "max_retail_price") => {
                Some((FilterField::RetailPrice, Comparison::Lte))
            }
            (ListingMode::Wholesale, "wholesale_price") => eq(FilterField::WholesalePrice),
            (ListingMode::Wholesale, "min_wholesale_price") => {
                Some((FilterField::WholesalePrice, Comparison::Gte))
            }
            (ListingMode::Wholesale, "max_wholesale_price") => {
                Some((FilterField::WholesalePrice, Comparison::Lte))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Gte,
    Lte,
}

impl Comparison {
    #[must_use]
    pub fn operator(self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Gte => ">=",
            Comparison::Lte => "<=",
        }
    }
}

/// One comparison against a filterable attribute, with its bound value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Predicate {
    pub field: FilterField,
    pub comparison: Comparison,
    pub value: f64,
}

/// The closed set of sortable attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Price,
    Model,
    Views,
}

impl SortKey {
    #[must_use]
    pub fn column(self, mode: ListingMode) -> &'static str {
        match self {
            SortKey::Price => mode.price_column(),
            SortKey::Model => "model",
            SortKey::Views => "views",
        }
    }

    fn recognize(mode: ListingMode, name: &str) -> Option<Self> {
        match name {
            "model" => Some(SortKey::Model),
            "views" => Some(SortKey::Views),
            _ if name == mode.price_column() => Some(SortKey::Price),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn sql(self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid value '{value}' for filter '{param}'")]
    InvalidFilterValue { param: String, value: String },
}

/// A fully parsed listing request: mode, predicates, optional sort.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuerySpec {
    pub mode: ListingMode,
    pub predicates: Vec<Predicate>,
    pub sort: Option<(SortKey, SortDirection)>,
}

impl ProductQuerySpec {
    /// Parses a raw query-parameter map into a typed query spec.
    ///
    /// Unknown parameter names and empty values are ignored. A recognized
    /// parameter with a non-numeric value is rejected; silently matching
    /// nothing would be worse than a 400. An unrecognized `sort_by` falls
    /// back to unsorted.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidFilterValue`] if a recognized filter
    /// carries a value that does not parse as a finite number.
    pub fn from_params(
        mode: ListingMode,
        params: &HashMap<String, String>,
    ) -> Result<Self, FilterError> {
        let mut predicates = Vec::new();
        for (name, raw) in params {
            if raw.is_empty() {
                continue;
            }
            let Some((field, comparison)) = FilterField::recognize(mode, name) else {
                continue;
            };
            let value = raw.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| {
                FilterError::InvalidFilterValue {
                    param: name.clone(),
                    value: raw.clone(),
                }
            })?;
            predicates.push(Predicate {
                field,
                comparison,
                value,
            });
        }

        // Map iteration order is arbitrary; fix the predicate order so the
        // generated SQL is stable for identical requests.
        predicates.sort_by_key(|p| (p.field as u8, p.comparison as u8));

        let sort = params
            .get("sort_by")
            .and_then(|name| SortKey::recognize(mode, name))
            .map(|key| {
                let direction = if params.get("order").is_some_and(|o| o == "desc") {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                (key, direction)
            });

        Ok(Self {
            mode,
            predicates,
            sort,
        })
    }
}
