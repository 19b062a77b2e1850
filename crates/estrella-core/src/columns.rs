//! Column names of the product export, before and after translation.
//!
//! [`COLUMN_MAPPING`] is the fixed English→Spanish dictionary applied by the
//! expander. The `pub const` names below are the Spanish headers the
//! star-schema builder reads.

/// English export header → Spanish header.
pub const COLUMN_MAPPING: &[(&str, &str)] = &[
    ("timestamp", "marca_de_tiempo"),
    ("url", "url"),
    ("final_price", "precio_final"),
    ("sku", "sku"),
    ("currency", "moneda"),
    ("gtin", "gtin"),
    ("specifications", "especificaciones"),
    ("image_urls", "urls_imagenes"),
    ("top_reviews", "mejores_comentarios"),
    ("rating_stars", "estrellas_calificacion"),
    ("related_pages", "paginas_relacionadas"),
    ("available_for_delivery", "disponible_para_entrega"),
    ("available_for_pickup", "disponible_para_recogida"),
    ("brand", "marca"),
    ("breadcrumbs", "migajas_pan"),
    ("category_ids", "ids_categoria"),
    ("review_count", "cantidad_comentarios"),
    ("description", "descripcion"),
    ("product_id", "id_producto"),
    ("product_name", "nombre_producto"),
    ("review_tags", "etiquetas_de_revision"),
    ("category_url", "url_categoria"),
    ("category_name", "nombre_categoria"),
    ("category_path", "ruta_categoria"),
    ("root_category_url", "url_categoria_raiz"),
    ("root_category_name", "nombre_categoria_raiz"),
    ("upc", "upc"),
    ("tags", "etiquetas"),
    ("main_image", "imagen_principal"),
    ("rating", "calificacion"),
    ("unit_price", "precio_unitario"),
    ("unit", "unidad"),
    ("aisle", "pasillo"),
    ("free_returns", "devoluciones_gratuitas"),
    ("sizes", "tallas"),
    ("colors", "colores"),
    ("seller", "vendedor"),
    ("other_attributes", "otros_atributos"),
    ("customer_reviews", "comentarios_clientes"),
    ("ingredients", "ingredientes"),
    ("initial_price", "precio_inicial"),
    ("discount", "descuento"),
    ("ingredients_full", "ingredientes_completo"),
    ("categories", "categorias"),
];

/// Translate a single header. Names outside the dictionary pass through.
#[must_use]
pub fn translate_column(name: &str) -> &str {
    COLUMN_MAPPING
        .iter()
        .find(|(source, _)| *source == name)
        .map_or(name, |(_, target)| *target)
}

pub const MARCA_DE_TIEMPO: &str = "marca_de_tiempo";
pub const ESTRELLAS_CALIFICACION: &str = "estrellas_calificacion";
pub const MEJORES_COMENTARIOS: &str = "mejores_comentarios";
pub const COMENTARIOS_CLIENTES: &str = "comentarios_clientes";

pub const SKU: &str = "sku";
pub const NOMBRE_PRODUCTO: &str = "nombre_producto";
pub const MARCA: &str = "marca";
pub const DESCRIPCION: &str = "descripcion";
pub const ESPECIFICACIONES: &str = "especificaciones";
pub const URLS_IMAGENES: &str = "urls_imagenes";
pub const UNIDAD: &str = "unidad";
pub const TALLAS: &str = "tallas";
pub const COLORES: &str = "colores";
pub const INGREDIENTES: &str = "ingredientes";
pub const INGREDIENTES_COMPLETO: &str = "ingredientes_completo";
pub const OTROS_ATRIBUTOS: &str = "otros_atributos";
pub const IMAGEN_PRINCIPAL: &str = "imagen_principal";

pub const IDS_CATEGORIA: &str = "ids_categoria";
pub const NOMBRE_CATEGORIA: &str = "nombre_categoria";
pub const MIGAJAS_PAN: &str = "migajas_pan";
pub const URL_CATEGORIA: &str = "url_categoria";
pub const RUTA_CATEGORIA: &str = "ruta_categoria";
pub const URL_CATEGORIA_RAIZ: &str = "url_categoria_raiz";
pub const NOMBRE_CATEGORIA_RAIZ: &str = "nombre_categoria_raiz";

pub const PRECIO_FINAL: &str = "precio_final";
pub const PRECIO_UNITARIO: &str = "precio_unitario";
pub const PRECIO_INICIAL: &str = "precio_inicial";
pub const DESCUENTO: &str = "descuento";
pub const CANTIDAD_COMENTARIOS: &str = "cantidad_comentarios";
pub const DISPONIBLE_PARA_ENTREGA: &str = "disponible_para_entrega";
pub const DISPONIBLE_PARA_RECOGIDA: &str = "disponible_para_recogida";

/// Every column the star-schema builder reads from its input.
pub const BUILDER_REQUIRED: &[&str] = &[
    MARCA_DE_TIEMPO,
    ESTRELLAS_CALIFICACION,
    MEJORES_COMENTARIOS,
    COMENTARIOS_CLIENTES,
    SKU,
    NOMBRE_PRODUCTO,
    MARCA,
    DESCRIPCION,
    ESPECIFICACIONES,
    URLS_IMAGENES,
    UNIDAD,
    TALLAS,
    COLORES,
    INGREDIENTES,
    INGREDIENTES_COMPLETO,
    OTROS_ATRIBUTOS,
    IMAGEN_PRINCIPAL,
    IDS_CATEGORIA,
    NOMBRE_CATEGORIA,
    MIGAJAS_PAN,
    URL_CATEGORIA,
    RUTA_CATEGORIA,
    URL_CATEGORIA_RAIZ,
    NOMBRE_CATEGORIA_RAIZ,
    PRECIO_FINAL,
    PRECIO_UNITARIO,
    PRECIO_INICIAL,
    DESCUENTO,
    CANTIDAD_COMENTARIOS,
    DISPONIBLE_PARA_ENTREGA,
    DISPONIBLE_PARA_RECOGIDA,
];
