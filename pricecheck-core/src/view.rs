//! JSON view of a product as returned by the search endpoint

use serde::Serialize;

use crate::forecast::Forecast;
use crate::product::Retailer;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceEntry {
    pub tienda: Retailer,
    pub precio: f64,
}

/// Public product shape; `forecast` is `null` when no prediction is stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    pub codigo: String,
    pub nombre: String,
    pub precios: Vec<PriceEntry>,
    pub forecast: Option<Forecast>,
}
