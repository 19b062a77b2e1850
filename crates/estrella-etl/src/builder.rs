//! Star-schema construction from the expanded product table.
//!
//! One pass over the rows: rows whose timestamp does not parse are dropped
//! from every table, every other row becomes exactly one fact. Dimension
//! keys are resolved by value as each row is visited, so the fact table
//! never fans out and never depends on row order beyond key numbering.

use std::collections::BTreeMap;

use estrella_core::columns::{
    CANTIDAD_COMENTARIOS, COLORES, COMENTARIOS_CLIENTES, DESCRIPCION, DESCUENTO,
    DISPONIBLE_PARA_ENTREGA, DISPONIBLE_PARA_RECOGIDA, ESPECIFICACIONES, ESTRELLAS_CALIFICACION,
    IDS_CATEGORIA, IMAGEN_PRINCIPAL, INGREDIENTES, INGREDIENTES_COMPLETO, MARCA, MARCA_DE_TIEMPO,
    MEJORES_COMENTARIOS, MIGAJAS_PAN, NOMBRE_CATEGORIA, NOMBRE_CATEGORIA_RAIZ, NOMBRE_PRODUCTO,
    OTROS_ATRIBUTOS, PRECIO_FINAL, PRECIO_INICIAL, PRECIO_UNITARIO, RUTA_CATEGORIA, SKU, TALLAS,
    UNIDAD, URLS_IMAGENES, URL_CATEGORIA, URL_CATEGORIA_RAIZ,
};
use estrella_core::{Brand, CalendarDay, Category, Product, ProductFact, StarSchema};
use serde::Serialize;

use crate::dimension::DimensionBuilder;
use crate::error::EtlError;
use crate::reviews::extract_rating;
use crate::scalar::{self, text, InvalidScalar};
use crate::semi_structured::{parse_semi_structured, SemiStructured};
use crate::table::CsvTable;
use crate::timestamp::parse_timestamp_date;

/// Data-quality counters gathered while building.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub rows_read: usize,
    /// Zero-based data-row indices dropped for an unparseable timestamp.
    pub dropped_rows: Vec<usize>,
    /// Malformed semi-structured cells per column. Counted, then read as empty.
    pub malformed_fields: BTreeMap<String, usize>,
    /// Scalar cells that held non-empty text of the wrong type, per column.
    pub invalid_scalars: BTreeMap<String, usize>,
    pub table_sizes: BTreeMap<String, usize>,
}

impl BuildReport {
    #[must_use]
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.dropped_rows.len()
    }

    fn note_semi(&mut self, cell: SemiStructured, column: &str, row: usize) -> SemiStructured {
        if let SemiStructured::Malformed(reason) = &cell {
            tracing::debug!(row, column, %reason, "malformed semi-structured cell read as empty");
            *self.malformed_fields.entry(column.to_string()).or_default() += 1;
        }
        cell
    }

    fn note_scalar<T>(
        &mut self,
        parsed: Result<Option<T>, InvalidScalar>,
        column: &str,
        row: usize,
    ) -> Option<T> {
        match parsed {
            Ok(value) => value,
            Err(InvalidScalar) => {
                tracing::debug!(row, column, "unparseable scalar stored as NULL");
                *self.invalid_scalars.entry(column.to_string()).or_default() += 1;
                None
            }
        }
    }
}

#[derive(Debug)]
pub struct BuildOutput {
    pub schema: StarSchema,
    pub report: BuildReport,
}

/// Column positions of every input the builder reads.
#[derive(Debug, Clone, Copy)]
struct Columns {
    timestamp: usize,
    rating_stars: usize,
    top_reviews: usize,
    customer_reviews: usize,
    sku: usize,
    product_name: usize,
    brand: usize,
    description: usize,
    specifications: usize,
    image_urls: usize,
    unit: usize,
    sizes: usize,
    colors: usize,
    ingredients: usize,
    ingredients_full: usize,
    other_attributes: usize,
    main_image: usize,
    category_ids: usize,
    category_name: usize,
    breadcrumbs: usize,
    category_url: usize,
    category_path: usize,
    root_category_url: usize,
    root_category_name: usize,
    final_price: usize,
    unit_price: usize,
    initial_price: usize,
    discount: usize,
    review_count: usize,
    available_for_delivery: usize,
    available_for_pickup: usize,
}

impl Columns {
    fn resolve(table: &CsvTable) -> Result<Self, EtlError> {
        let mut missing = Vec::new();
        let mut find = |name: &str| {
            table.column_index(name).unwrap_or_else(|| {
                missing.push(name.to_string());
                0
            })
        };

        let columns = Columns {
            timestamp: find(MARCA_DE_TIEMPO),
            rating_stars: find(ESTRELLAS_CALIFICACION),
            top_reviews: find(MEJORES_COMENTARIOS),
            customer_reviews: find(COMENTARIOS_CLIENTES),
            sku: find(SKU),
            product_name: find(NOMBRE_PRODUCTO),
            brand: find(MARCA),
            description: find(DESCRIPCION),
            specifications: find(ESPECIFICACIONES),
            image_urls: find(URLS_IMAGENES),
            unit: find(UNIDAD),
            sizes: find(TALLAS),
            colors: find(COLORES),
            ingredients: find(INGREDIENTES),
            ingredients_full: find(INGREDIENTES_COMPLETO),
            other_attributes: find(OTROS_ATRIBUTOS),
            main_image: find(IMAGEN_PRINCIPAL),
            category_ids: find(IDS_CATEGORIA),
            category_name: find(NOMBRE_CATEGORIA),
            breadcrumbs: find(MIGAJAS_PAN),
            category_url: find(URL_CATEGORIA),
            category_path: find(RUTA_CATEGORIA),
            root_category_url: find(URL_CATEGORIA_RAIZ),
            root_category_name: find(NOMBRE_CATEGORIA_RAIZ),
            final_price: find(PRECIO_FINAL),
            unit_price: find(PRECIO_UNITARIO),
            initial_price: find(PRECIO_INICIAL),
            discount: find(DESCUENTO),
            review_count: find(CANTIDAD_COMENTARIOS),
            available_for_delivery: find(DISPONIBLE_PARA_ENTREGA),
            available_for_pickup: find(DISPONIBLE_PARA_RECOGIDA),
        };

        if missing.is_empty() {
            Ok(columns)
        } else {
            Err(EtlError::MissingColumns(missing))
        }
    }
}

/// Build the five dimensions and the fact table from an expanded table.
///
/// # Errors
///
/// Returns [`EtlError::MissingColumns`] if any input column is absent. Bad
/// cell values never fail the build; they are counted in the report.
pub fn build_star_schema(table: &CsvTable) -> Result<BuildOutput, EtlError> {
    let cols = Columns::resolve(table)?;

    let mut report = BuildReport {
        rows_read: table.len(),
        ..BuildReport::default()
    };
    let mut products = DimensionBuilder::new();
    let mut brands = DimensionBuilder::new();
    let mut categories = DimensionBuilder::new();
    let mut calendar = DimensionBuilder::new();
    let mut ratings = DimensionBuilder::new();
    let mut facts: Vec<ProductFact> = Vec::with_capacity(table.len());

    for (index, row) in table.rows.iter().enumerate() {
        let cell = |idx: usize| row[idx].as_str();

        let Some(date) = parse_timestamp_date(cell(cols.timestamp)) else {
            tracing::debug!(
                row = index,
                value = cell(cols.timestamp),
                "dropping row with unparseable timestamp"
            );
            report.dropped_rows.push(index);
            continue;
        };

        let stars = report.note_semi(
            parse_semi_structured(cell(cols.rating_stars)),
            ESTRELLAS_CALIFICACION,
            index,
        );
        let top = report.note_semi(
            parse_semi_structured(cell(cols.top_reviews)),
            MEJORES_COMENTARIOS,
            index,
        );
        let customers = report.note_semi(
            parse_semi_structured(cell(cols.customer_reviews)),
            COMENTARIOS_CLIENTES,
            index,
        );

        let product = Product {
            sku: text(cell(cols.sku)),
            name: text(cell(cols.product_name)),
            brand: text(cell(cols.brand)),
            description: text(cell(cols.description)),
            specifications: text(cell(cols.specifications)),
            image_urls: text(cell(cols.image_urls)),
            unit: text(cell(cols.unit)),
            sizes: text(cell(cols.sizes)),
            colors: text(cell(cols.colors)),
            ingredients: text(cell(cols.ingredients)),
            ingredients_full: text(cell(cols.ingredients_full)),
            other_attributes: text(cell(cols.other_attributes)),
            main_image: text(cell(cols.main_image)),
        };
        let brand = Brand {
            name: text(cell(cols.brand)),
        };
        let category = Category {
            category_ids: text(cell(cols.category_ids)),
            name: text(cell(cols.category_name)),
            path: text(cell(cols.category_path)),
            url: text(cell(cols.category_url)),
            root_url: text(cell(cols.root_category_url)),
            root_name: text(cell(cols.root_category_name)),
            breadcrumbs: text(cell(cols.breadcrumbs)),
        };

        let final_price = report.note_scalar(
            scalar::decimal(cell(cols.final_price)),
            PRECIO_FINAL,
            index,
        );
        let unit_price = report.note_scalar(
            scalar::decimal(cell(cols.unit_price)),
            PRECIO_UNITARIO,
            index,
        );
        let initial_price = report.note_scalar(
            scalar::decimal(cell(cols.initial_price)),
            PRECIO_INICIAL,
            index,
        );
        let discount =
            report.note_scalar(scalar::decimal(cell(cols.discount)), DESCUENTO, index);
        let review_count = report.note_scalar(
            scalar::count(cell(cols.review_count)),
            CANTIDAD_COMENTARIOS,
            index,
        );
        let available_for_delivery = report.note_scalar(
            scalar::flag(cell(cols.available_for_delivery)),
            DISPONIBLE_PARA_ENTREGA,
            index,
        );
        let available_for_pickup = report.note_scalar(
            scalar::flag(cell(cols.available_for_pickup)),
            DISPONIBLE_PARA_RECOGIDA,
            index,
        );

        let id = i64::try_from(facts.len()).map_or(i64::MAX, |n| n + 1);
        facts.push(ProductFact {
            id,
            product_id: products.key_for(product),
            brand_id: brands.key_for(brand),
            category_id: categories.key_for(category),
            time_id: calendar.key_for(CalendarDay::from_date(date)),
            rating_id: ratings.key_for(extract_rating(&stars, &top, &customers)),
            final_price,
            unit_price,
            initial_price,
            discount,
            review_count,
            available_for_delivery,
            available_for_pickup,
        });
    }

    let schema = StarSchema {
        products: products.into_rows(),
        brands: brands.into_rows(),
        categories: categories.into_rows(),
        calendar: calendar.into_rows(),
        ratings: ratings.into_rows(),
        facts,
    };
    report.table_sizes = schema
        .table_sizes()
        .iter()
        .map(|(name, size)| ((*name).to_string(), *size))
        .collect();

    log_report(&report);
    Ok(BuildOutput { schema, report })
}

fn log_report(report: &BuildReport) {
    if !report.dropped_rows.is_empty() {
        tracing::warn!(
            dropped = report.dropped_rows.len(),
            rows_read = report.rows_read,
            "rows dropped for unparseable {MARCA_DE_TIEMPO}"
        );
    }
    for (column, count) in &report.malformed_fields {
        tracing::warn!(column = %column, count, "malformed semi-structured cells read as empty");
    }
    for (column, count) in &report.invalid_scalars {
        tracing::warn!(column = %column, count, "unparseable scalar cells stored as NULL");
    }
    tracing::info!(
        rows_read = report.rows_read,
        rows_kept = report.rows_kept(),
        tables = ?report.table_sizes,
        "star schema built"
    );
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
