//! Sample catalog inserted into an empty store

use pricecheck_core::{Barcode, NewProduct};
use sqlx::AnyPool;

use super::repos::{products::insert_product, DbError, ProductRepo};

/// (codigo, nombre, [walmart, chedraui, soriana], predicted price)
type Sample = (&'static str, &'static str, [f64; 3], f64);

const SAMPLES: &[Sample] = &[
    ("75007614", "Coca-Cola 600ml", [20.00, 18.00, 19.50], 20.00),
    ("7501020565935", "Leche Lala 1L Entera", [37.00, 31.00, 32.90], 35.00),
    ("7500810029183", "Pan Blanco Bimbo 620g", [55.00, 44.00, 49.50], 51.50),
    ("7501071301698", "Arroz Verde Valle 900g", [32.00, 37.00, 32.90], 35.00),
    ("7501039120149", "Aceite Nutrioli 946ml", [45.00, 43.00, 40.90], 44.50),
    ("7501101525025", "Huevos blancos Bachoco 12 pzas", [45.00, 39.00, 46.90], 45.00),
    ("7501071301049", "Frijol peruano Valle Verde 900g", [50.00, 52.00, 53.20], 54.00),
    ("7501018314507", "Spaghetti La Moderna 220g", [10.00, 11.40, 12.50], 11.50),
    ("7501045403144", "Atún Dolores En Agua 140g", [20.00, 20.50, 20.90], 21.50),
    ("7501045400860", "Atún Dolores En Agua 295g", [43.00, 42.00, 41.90], 44.00),
    ("7501020510614", "Lala Yogurt Natural De 1kg", [45.00, 42.00, 40.00], 44.00),
    ("7501008023136", "Kellogg's Corn Flakes Original 540g", [71.00, 53.50, 70.90], 67.50),
    ("7501040005831", "FUD Jamón Virginia De Pavo 290g", [52.00, 43.00, 64.90], 55.50),
    ("7501055304745", "Coca-Cola Refresco Original 3Lt", [43.00, 44.00, 47.90], 46.50),
    ("7501020515350", "Lala Leche Light 1Lt", [37.00, 37.00, 39.50], 39.50),
    ("7501052474076", "Clemente Jacques Mermelada de Fresa 470g", [25.00, 35.00, 29.90], 31.00),
    ("7501059224827", "Café soluble Nescafé Clásico 200g", [150.00, 150.00, 149.00], 155.50),
    ("0034587020021", "Sal La Fina refinada 1kg", [29.00, 24.00, 24.90], 27.00),
    ("7500810022061", "Pan Bimbo integral 620g", [51.00, 59.00, 57.90], 58.00),
    ("7501000111800", "Pan tostado Bimbo clásico 210g", [39.00, 39.00, 39.80], 41.00),
];

/// The built-in sample catalog
pub fn sample_products() -> Vec<NewProduct> {
    SAMPLES
        .iter()
        .filter_map(|&(codigo, nombre, [walmart, chedraui, soriana], predicted)| {
            Some(NewProduct {
                codigo: Barcode::new(codigo).ok()?,
                nombre: nombre.to_owned(),
                precio_walmart: walmart,
                precio_chedraui: chedraui,
                precio_soriana: soriana,
                predicted_price_next_year: Some(predicted),
            })
        })
        .collect()
}

/// Insert the sample catalog when the products table is empty.
///
/// A failing count is logged and treated as an empty table so a first run
/// still gets seeded. Returns the number of rows inserted.
pub async fn seed_if_empty(pool: &AnyPool) -> Result<usize, DbError> {
    let existing = match ProductRepo::new(pool).count().await {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!(error = %e, "could not count products, assuming empty store");
            0
        }
    };

    if existing > 0 {
        tracing::debug!(existing, "store already populated, skipping sample data");
        return Ok(0);
    }

    let products = sample_products();
    let mut tx = pool.begin().await?;
    for product in &products {
        insert_product(&mut tx, product).await?;
    }
    tx.commit().await?;

    tracing::info!(inserted = products.len(), "seeded sample products");
    Ok(products.len())
}
