//! Row types for the product star schema.
//!
//! Dimension rows are wrapped in [`Keyed`], which pairs the natural value with
//! its surrogate key. Keys are `1..=N` in first-occurrence order.

use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use sha2::{Digest, Sha256};

pub const DIM_PRODUCTO: &str = "dim_producto";
pub const DIM_MARCA: &str = "dim_marca";
pub const DIM_CATEGORIA: &str = "dim_categoria";
pub const DIM_TIEMPO: &str = "dim_tiempo";
pub const DIM_CALIFICACIONES: &str = "dim_calificaciones";
pub const HECHOS_PRODUCTOS: &str = "hechos_productos";

/// All six tables, dimensions before the fact table.
pub const TABLE_NAMES: [&str; 6] = [
    DIM_PRODUCTO,
    DIM_MARCA,
    DIM_CATEGORIA,
    DIM_TIEMPO,
    DIM_CALIFICACIONES,
    HECHOS_PRODUCTOS,
];

/// A dimension value together with its surrogate key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keyed<T> {
    pub id: i64,
    pub value: T,
}

/// Descriptive product attributes. The whole tuple is the natural key, so a
/// SKU observed with two different descriptions yields two rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Product {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub specifications: Option<String>,
    pub image_urls: Option<String>,
    pub unit: Option<String>,
    pub sizes: Option<String>,
    pub colors: Option<String>,
    pub ingredients: Option<String>,
    pub ingredients_full: Option<String>,
    pub other_attributes: Option<String>,
    pub main_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Brand {
    pub name: Option<String>,
}

/// Category identity as exported. Each field is stored under its own column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Category {
    pub category_ids: Option<String>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub url: Option<String>,
    pub root_url: Option<String>,
    pub root_name: Option<String>,
    pub breadcrumbs: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: i32,
    pub month: i32,
    pub year: i32,
}

impl CalendarDay {
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        // day() and month() are at most 31 and 12.
        #[allow(clippy::cast_possible_wrap)]
        let (day, month) = (date.day() as i32, date.month() as i32);
        Self {
            date,
            day,
            month,
            year: date.year(),
        }
    }
}

/// Star-count buckets and flattened review text for one observation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Rating {
    pub five_stars: i64,
    pub four_stars: i64,
    pub three_stars: i64,
    pub two_stars: i64,
    pub one_star: i64,
    pub positive_review: String,
    pub negative_review: String,
    pub customer_reviews: String,
}

impl Rating {
    /// Hex SHA-256 over every field, length-prefixed so that adjacent text
    /// fields cannot collide by shifting characters between them.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for count in [
            self.five_stars,
            self.four_stars,
            self.three_stars,
            self.two_stars,
            self.one_star,
        ] {
            hasher.update(count.to_be_bytes());
        }
        for text in [
            &self.positive_review,
            &self.negative_review,
            &self.customer_reviews,
        ] {
            hasher.update((text.len() as u64).to_be_bytes());
            hasher.update(text.as_bytes());
        }

        let digest = hasher.finalize();
        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest {
            let _ = write!(hex, "{byte:02x}");
        }
        hex
    }
}

/// One fact row per surviving input observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductFact {
    pub id: i64,
    pub product_id: i64,
    pub brand_id: i64,
    pub category_id: i64,
    pub time_id: i64,
    pub rating_id: i64,
    pub final_price: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub initial_price: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub review_count: Option<i64>,
    pub available_for_delivery: Option<bool>,
    pub available_for_pickup: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StarSchema {
    pub products: Vec<Keyed<Product>>,
    pub brands: Vec<Keyed<Brand>>,
    pub categories: Vec<Keyed<Category>>,
    pub calendar: Vec<Keyed<CalendarDay>>,
    pub ratings: Vec<Keyed<Rating>>,
    pub facts: Vec<ProductFact>,
}

impl StarSchema {
    /// Row count per table, in [`TABLE_NAMES`] order.
    #[must_use]
    pub fn table_sizes(&self) -> [(&'static str, usize); 6] {
        [
            (DIM_PRODUCTO, self.products.len()),
            (DIM_MARCA, self.brands.len()),
            (DIM_CATEGORIA, self.categories.len()),
            (DIM_TIEMPO, self.calendar.len()),
            (DIM_CALIFICACIONES, self.ratings.len()),
            (HECHOS_PRODUCTOS, self.facts.len()),
        ]
    }

    /// Look up the rating row a fact points at.
    #[must_use]
    pub fn rating_for(&self, fact: &ProductFact) -> Option<&Rating> {
        self.ratings
            .iter()
            .find(|r| r.id == fact.rating_id)
            .map(|r| &r.value)
    }
}
