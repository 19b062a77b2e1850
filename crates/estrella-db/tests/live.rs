//! Live integration tests for estrella-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, empty Postgres database from the sqlx test
//! harness (requires `DATABASE_URL` at test time). No migrations are run;
//! the load creates its own tables.

use chrono::NaiveDate;
use estrella_core::columns::{
    BUILDER_REQUIRED, DESCRIPCION, ESTRELLAS_CALIFICACION, MARCA, MARCA_DE_TIEMPO, PRECIO_FINAL,
    SKU,
};
use estrella_core::{StarSchema, TABLE_NAMES};
use estrella_db::{count_rows, replace_star_schema, DbError};
use estrella_etl::{build_star_schema, CsvTable};
use rust_decimal::Decimal;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// One flat row with every builder column; unspecified cells are empty.
fn flat_row(cells: &[(&str, &str)]) -> Vec<String> {
    BUILDER_REQUIRED
        .iter()
        .map(|column| {
            cells
                .iter()
                .find(|(name, _)| name == column)
                .map_or_else(String::new, |(_, value)| (*value).to_string())
        })
        .collect()
}

fn schema_from(rows: Vec<Vec<String>>) -> StarSchema {
    let table = CsvTable {
        headers: BUILDER_REQUIRED.iter().map(|h| (*h).to_string()).collect(),
        rows,
    };
    build_star_schema(&table).expect("build").schema
}

fn sample_schema() -> StarSchema {
    schema_from(vec![
        flat_row(&[
            (MARCA_DE_TIEMPO, "2024-02-29 00:00:00.000"),
            (SKU, "100"),
            (MARCA, "Jif"),
            (DESCRIPCION, "Creamy"),
            (PRECIO_FINAL, "2.97"),
            (ESTRELLAS_CALIFICACION, "{'five_stars': 120, 'four_stars': 30}"),
        ]),
        flat_row(&[
            (MARCA_DE_TIEMPO, "2024-03-01 00:00:00.000"),
            (SKU, "100"),
            (MARCA, "Jif"),
            (DESCRIPCION, "Crunchy"),
            (PRECIO_FINAL, "3.10"),
        ]),
        flat_row(&[
            (MARCA_DE_TIEMPO, "2024-02-29 00:00:00.000"),
            (SKU, "200"),
            (MARCA, "Skippy"),
            (PRECIO_FINAL, "not a price"),
        ]),
        flat_row(&[(MARCA_DE_TIEMPO, "bogus"), (SKU, "300")]),
    ])
}

async fn table_counts(pool: &PgPool) -> Vec<i64> {
    let mut counts = Vec::new();
    for table in TABLE_NAMES {
        counts.push(count_rows(pool, table).await.expect("count_rows failed"));
    }
    counts
}

// ---------------------------------------------------------------------------
// Replace load
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn load_writes_every_table(pool: PgPool) {
    let schema = sample_schema();
    let summary = replace_star_schema(&pool, &schema, 1_000)
        .await
        .expect("replace_star_schema failed");

    let expected: Vec<i64> = schema
        .table_sizes()
        .iter()
        .map(|(_, n)| i64::try_from(*n).unwrap())
        .collect();
    assert_eq!(table_counts(&pool).await, expected);
    assert_eq!(expected, vec![3, 2, 1, 2, 2, 3]);

    assert_eq!(summary.tables.len(), 6);
    assert_eq!(summary.rows_for("hechos_productos"), Some(3));
    assert_eq!(summary.total_rows(), 13);
}

#[sqlx::test(migrations = false)]
async fn replacing_twice_yields_identical_tables(pool: PgPool) {
    let schema = sample_schema();
    replace_star_schema(&pool, &schema, 1_000).await.unwrap();
    let first = table_counts(&pool).await;
    let first_keys: Vec<(i64, i64, i64)> = sqlx::query_as(
        "SELECT id_hecho_producto, id_producto_dim, id_calificaciones_dim \
         FROM hechos_productos ORDER BY id_hecho_producto",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    replace_star_schema(&pool, &schema, 1_000).await.unwrap();
    let second_keys: Vec<(i64, i64, i64)> = sqlx::query_as(
        "SELECT id_hecho_producto, id_producto_dim, id_calificaciones_dim \
         FROM hechos_productos ORDER BY id_hecho_producto",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(table_counts(&pool).await, first);
    assert_eq!(first_keys, second_keys);
}

#[sqlx::test(migrations = false)]
async fn replace_discards_previous_contents(pool: PgPool) {
    replace_star_schema(&pool, &sample_schema(), 1_000)
        .await
        .unwrap();

    let smaller = schema_from(vec![flat_row(&[
        (MARCA_DE_TIEMPO, "2024-06-01 00:00:00.000"),
        (SKU, "900"),
    ])]);
    replace_star_schema(&pool, &smaller, 1_000).await.unwrap();

    assert_eq!(table_counts(&pool).await, vec![1, 1, 1, 1, 1, 1]);
}

#[sqlx::test(migrations = false)]
async fn failed_load_leaves_previous_tables_intact(pool: PgPool) {
    replace_star_schema(&pool, &sample_schema(), 1_000)
        .await
        .unwrap();
    let before = table_counts(&pool).await;

    let mut broken = sample_schema();
    // Duplicate primary key in the fact table.
    let duplicate = broken.facts[0].clone();
    broken.facts.push(duplicate);

    let err = replace_star_schema(&pool, &broken, 1_000)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Sqlx(_)));
    assert_eq!(table_counts(&pool).await, before);
}

#[sqlx::test(migrations = false)]
async fn single_row_batches_write_everything(pool: PgPool) {
    let schema = sample_schema();
    let summary = replace_star_schema(&pool, &schema, 1).await.unwrap();
    assert_eq!(summary.rows_for("hechos_productos"), Some(3));
    assert_eq!(count_rows(&pool, "dim_producto").await.unwrap(), 3);
}

// ---------------------------------------------------------------------------
// Stored values
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn every_fact_joins_to_all_dimensions(pool: PgPool) {
    replace_star_schema(&pool, &sample_schema(), 1_000)
        .await
        .unwrap();

    let joined: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM hechos_productos h \
         JOIN dim_producto p ON p.id_producto_dim = h.id_producto_dim \
         JOIN dim_marca m ON m.id_marca = h.id_marca_dim \
         JOIN dim_categoria c ON c.id_categoria_dim = h.id_categoria_dim \
         JOIN dim_tiempo t ON t.id_tiempo_dim = h.id_tiempo_dim \
         JOIN dim_calificaciones r ON r.id_calificaciones_dim = h.id_calificaciones_dim",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(joined, 3);
}

#[sqlx::test(migrations = false)]
async fn time_and_price_values_round_trip(pool: PgPool) {
    replace_star_schema(&pool, &sample_schema(), 1_000)
        .await
        .unwrap();

    let (fecha, dia, mes, anio): (NaiveDate, i32, i32, i32) =
        sqlx::query_as("SELECT fecha, dia, mes, anio FROM dim_tiempo WHERE id_tiempo_dim = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(fecha, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    assert_eq!((dia, mes, anio), (29, 2, 2024));

    let prices: Vec<Option<Decimal>> = sqlx::query_scalar(
        "SELECT precio_final FROM hechos_productos ORDER BY id_hecho_producto",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(
        prices,
        vec![Some(Decimal::new(297, 2)), Some(Decimal::new(310, 2)), None]
    );
}

#[sqlx::test(migrations = false)]
async fn ratings_are_stored_with_their_fingerprint(pool: PgPool) {
    let schema = sample_schema();
    replace_star_schema(&pool, &schema, 1_000).await.unwrap();

    let stored: Vec<(i64, String, i64, i64)> = sqlx::query_as(
        "SELECT id_calificaciones_dim, huella, cinco_estrellas, cuatro_estrellas \
         FROM dim_calificaciones ORDER BY id_calificaciones_dim",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(stored.len(), schema.ratings.len());
    for ((id, huella, five, four), expected) in stored.iter().zip(&schema.ratings) {
        assert_eq!(*id, expected.id);
        assert_eq!(huella, &expected.value.fingerprint());
        assert_eq!((*five, *four), (expected.value.five_stars, expected.value.four_stars));
    }
    assert_eq!((stored[0].2, stored[0].3), (120, 30));
}

#[sqlx::test(migrations = false)]
async fn count_rows_rejects_foreign_tables(pool: PgPool) {
    let err = count_rows(&pool, "pg_class").await.unwrap_err();
    assert!(matches!(err, DbError::UnknownTable(name) if name == "pg_class"));
}
