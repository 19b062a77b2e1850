use estrella_core::star::{
    DIM_CALIFICACIONES, DIM_CATEGORIA, DIM_MARCA, DIM_PRODUCTO, DIM_TIEMPO, HECHOS_PRODUCTOS,
};
use estrella_core::{
    Brand, CalendarDay, Category, Keyed, Product, ProductFact, Rating, StarSchema, TABLE_NAMES,
};
use sqlx::query_builder::Separated;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use crate::schema::{CREATE_STATEMENTS, DROP_STATEMENTS};
use crate::DbError;

/// Postgres caps a single statement at 65535 bind parameters.
const MAX_BIND_PARAMS: usize = 65_535;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLoad {
    pub table: &'static str,
    pub rows: u64,
}

/// Rows written per table by one [`replace_star_schema`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub tables: Vec<TableLoad>,
}

impl LoadSummary {
    #[must_use]
    pub fn rows_for(&self, table: &str) -> Option<u64> {
        self.tables.iter().find(|t| t.table == table).map(|t| t.rows)
    }

    #[must_use]
    pub fn total_rows(&self) -> u64 {
        self.tables.iter().map(|t| t.rows).sum()
    }
}

/// A row type that knows its table and how to bind its columns, in order.
trait InsertRow {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn push_binds<'args>(&'args self, row: &mut Separated<'_, 'args, Postgres, &'static str>);
}

impl InsertRow for Keyed<Product> {
    const TABLE: &'static str = DIM_PRODUCTO;
    const COLUMNS: &'static [&'static str] = &[
        "id_producto_dim",
        "id_producto",
        "nombre_producto",
        "marca",
        "descripcion",
        "especificaciones",
        "urls_imagenes",
        "unidad",
        "tallas",
        "colores",
        "ingredientes",
        "ingredientes_completo",
        "otros_atributos",
        "imagen_principal",
    ];

    fn push_binds<'args>(&'args self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        let p = &self.value;
        row.push_bind(self.id)
            .push_bind(&p.sku)
            .push_bind(&p.name)
            .push_bind(&p.brand)
            .push_bind(&p.description)
            .push_bind(&p.specifications)
            .push_bind(&p.image_urls)
            .push_bind(&p.unit)
            .push_bind(&p.sizes)
            .push_bind(&p.colors)
            .push_bind(&p.ingredients)
            .push_bind(&p.ingredients_full)
            .push_bind(&p.other_attributes)
            .push_bind(&p.main_image);
    }
}

impl InsertRow for Keyed<Brand> {
    const TABLE: &'static str = DIM_MARCA;
    const COLUMNS: &'static [&'static str] = &["id_marca", "nombre_marca"];

    fn push_binds<'args>(&'args self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.id).push_bind(&self.value.name);
    }
}

impl InsertRow for Keyed<Category> {
    const TABLE: &'static str = DIM_CATEGORIA;
    const COLUMNS: &'static [&'static str] = &[
        "id_categoria_dim",
        "id_categoria",
        "nombre_categoria",
        "ruta_categoria",
        "url_categoria",
        "url_categoria_raiz",
        "nombre_categoria_raiz",
        "migajas_pan",
    ];

    fn push_binds<'args>(&'args self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        let c = &self.value;
        row.push_bind(self.id)
            .push_bind(&c.category_ids)
            .push_bind(&c.name)
            .push_bind(&c.path)
            .push_bind(&c.url)
            .push_bind(&c.root_url)
            .push_bind(&c.root_name)
            .push_bind(&c.breadcrumbs);
    }
}

impl InsertRow for Keyed<CalendarDay> {
    const TABLE: &'static str = DIM_TIEMPO;
    const COLUMNS: &'static [&'static str] = &["id_tiempo_dim", "fecha", "dia", "mes", "anio"];

    fn push_binds<'args>(&'args self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        let d = &self.value;
        row.push_bind(self.id)
            .push_bind(d.date)
            .push_bind(d.day)
            .push_bind(d.month)
            .push_bind(d.year);
    }
}

impl InsertRow for Keyed<Rating> {
    const TABLE: &'static str = DIM_CALIFICACIONES;
    const COLUMNS: &'static [&'static str] = &[
        "id_calificaciones_dim",
        "huella",
        "cinco_estrellas",
        "cuatro_estrellas",
        "tres_estrellas",
        "dos_estrellas",
        "una_estrella",
        "comentarios_positivos",
        "comentarios_negativos",
        "comentarios_de_clientes",
    ];

    fn push_binds<'args>(&'args self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        let r = &self.value;
        row.push_bind(self.id)
            .push_bind(r.fingerprint())
            .push_bind(r.five_stars)
            .push_bind(r.four_stars)
            .push_bind(r.three_stars)
            .push_bind(r.two_stars)
            .push_bind(r.one_star)
            .push_bind(&r.positive_review)
            .push_bind(&r.negative_review)
            .push_bind(&r.customer_reviews);
    }
}

impl InsertRow for ProductFact {
    const TABLE: &'static str = HECHOS_PRODUCTOS;
    const COLUMNS: &'static [&'static str] = &[
        "id_hecho_producto",
        "id_producto_dim",
        "id_marca_dim",
        "id_categoria_dim",
        "id_tiempo_dim",
        "id_calificaciones_dim",
        "precio_final",
        "precio_unitario",
        "precio_inicial",
        "descuento",
        "cantidad_comentarios",
        "disponible_para_entrega",
        "disponible_para_recogida",
    ];

    fn push_binds<'args>(&'args self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.id)
            .push_bind(self.product_id)
            .push_bind(self.brand_id)
            .push_bind(self.category_id)
            .push_bind(self.time_id)
            .push_bind(self.rating_id)
            .push_bind(self.final_price)
            .push_bind(self.unit_price)
            .push_bind(self.initial_price)
            .push_bind(self.discount)
            .push_bind(self.review_count)
            .push_bind(self.available_for_delivery)
            .push_bind(self.available_for_pickup);
    }
}

/// Replace all six star-schema tables with the contents of `schema`.
///
/// Drops, creates and inserts run in one transaction: on any failure the
/// transaction is rolled back and the previous tables are left as they were.
/// Rows are written with multi-row `INSERT`s of at most `batch_rows` rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails.
pub async fn replace_star_schema(
    pool: &PgPool,
    schema: &StarSchema,
    batch_rows: usize,
) -> Result<LoadSummary, DbError> {
    let mut tx = pool.begin().await?;

    for statement in DROP_STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    for statement in CREATE_STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    let mut summary = LoadSummary::default();
    summary
        .tables
        .push(insert_rows(&mut tx, &schema.products, batch_rows).await?);
    summary
        .tables
        .push(insert_rows(&mut tx, &schema.brands, batch_rows).await?);
    summary
        .tables
        .push(insert_rows(&mut tx, &schema.categories, batch_rows).await?);
    summary
        .tables
        .push(insert_rows(&mut tx, &schema.calendar, batch_rows).await?);
    summary
        .tables
        .push(insert_rows(&mut tx, &schema.ratings, batch_rows).await?);
    summary
        .tables
        .push(insert_rows(&mut tx, &schema.facts, batch_rows).await?);

    tx.commit().await?;
    tracing::info!(
        tables = summary.tables.len(),
        rows = summary.total_rows(),
        "star schema replaced"
    );
    Ok(summary)
}

async fn insert_rows<T: InsertRow>(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[T],
    batch_rows: usize,
) -> Result<TableLoad, DbError> {
    let per_statement = batch_rows.clamp(1, MAX_BIND_PARAMS / T::COLUMNS.len());
    let header = format!("INSERT INTO {} ({}) ", T::TABLE, T::COLUMNS.join(", "));

    let mut inserted = 0u64;
    for chunk in rows.chunks(per_statement) {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(&header);
        builder.push_values(chunk, |mut row, value| value.push_binds(&mut row));
        inserted += builder.build().execute(&mut **tx).await?.rows_affected();
    }

    tracing::debug!(table = T::TABLE, rows = inserted, "table written");
    Ok(TableLoad {
        table: T::TABLE,
        rows: inserted,
    })
}

/// `SELECT COUNT(*)` on one of the six star-schema tables.
///
/// # Errors
///
/// Returns [`DbError::UnknownTable`] for any name outside the star schema,
/// or [`DbError::Sqlx`] if the query fails.
pub async fn count_rows(pool: &PgPool, table: &str) -> Result<i64, DbError> {
    if !TABLE_NAMES.contains(&table) {
        return Err(DbError::UnknownTable(table.to_string()));
    }
    let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    Ok(count)
}
