//! DDL for the six star-schema tables.
//!
//! The tables are rebuilt from scratch on every load, so there is no
//! migration history; these statements are the whole schema.

/// Drop order: the fact table first, it holds the foreign keys.
pub const DROP_STATEMENTS: [&str; 6] = [
    "DROP TABLE IF EXISTS hechos_productos",
    "DROP TABLE IF EXISTS dim_producto",
    "DROP TABLE IF EXISTS dim_marca",
    "DROP TABLE IF EXISTS dim_categoria",
    "DROP TABLE IF EXISTS dim_tiempo",
    "DROP TABLE IF EXISTS dim_calificaciones",
];

/// Create order: dimensions before the fact table.
pub const CREATE_STATEMENTS: [&str; 6] = [
    "CREATE TABLE dim_producto (\
        id_producto_dim BIGINT PRIMARY KEY, \
        id_producto TEXT, \
        nombre_producto TEXT, \
        marca TEXT, \
        descripcion TEXT, \
        especificaciones TEXT, \
        urls_imagenes TEXT, \
        unidad TEXT, \
        tallas TEXT, \
        colores TEXT, \
        ingredientes TEXT, \
        ingredientes_completo TEXT, \
        otros_atributos TEXT, \
        imagen_principal TEXT\
    )",
    "CREATE TABLE dim_marca (\
        id_marca BIGINT PRIMARY KEY, \
        nombre_marca TEXT\
    )",
    "CREATE TABLE dim_categoria (\
        id_categoria_dim BIGINT PRIMARY KEY, \
        id_categoria TEXT, \
        nombre_categoria TEXT, \
        ruta_categoria TEXT, \
        url_categoria TEXT, \
        url_categoria_raiz TEXT, \
        nombre_categoria_raiz TEXT, \
        migajas_pan TEXT\
    )",
    "CREATE TABLE dim_tiempo (\
        id_tiempo_dim BIGINT PRIMARY KEY, \
        fecha DATE NOT NULL UNIQUE, \
        dia INTEGER NOT NULL, \
        mes INTEGER NOT NULL, \
        anio INTEGER NOT NULL\
    )",
    "CREATE TABLE dim_calificaciones (\
        id_calificaciones_dim BIGINT PRIMARY KEY, \
        huella TEXT NOT NULL UNIQUE, \
        cinco_estrellas BIGINT NOT NULL, \
        cuatro_estrellas BIGINT NOT NULL, \
        tres_estrellas BIGINT NOT NULL, \
        dos_estrellas BIGINT NOT NULL, \
        una_estrella BIGINT NOT NULL, \
        comentarios_positivos TEXT NOT NULL, \
        comentarios_negativos TEXT NOT NULL, \
        comentarios_de_clientes TEXT NOT NULL\
    )",
    "CREATE TABLE hechos_productos (\
        id_hecho_producto BIGINT PRIMARY KEY, \
        id_producto_dim BIGINT NOT NULL REFERENCES dim_producto (id_producto_dim), \
        id_marca_dim BIGINT NOT NULL REFERENCES dim_marca (id_marca), \
        id_categoria_dim BIGINT NOT NULL REFERENCES dim_categoria (id_categoria_dim), \
        id_tiempo_dim BIGINT NOT NULL REFERENCES dim_tiempo (id_tiempo_dim), \
        id_calificaciones_dim BIGINT NOT NULL \
            REFERENCES dim_calificaciones (id_calificaciones_dim), \
        precio_final NUMERIC, \
        precio_unitario NUMERIC, \
        precio_inicial NUMERIC, \
        descuento NUMERIC, \
        cantidad_comentarios BIGINT, \
        disponible_para_entrega BOOLEAN, \
        disponible_para_recogida BOOLEAN\
    )",
];
