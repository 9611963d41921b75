//! Product records and the barcode key

use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::forecast::Forecast;
use crate::view::{PriceEntry, ProductView};

/// Retailers with a tracked price column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Retailer {
    Walmart,
    Chedraui,
    Soriana,
}

impl Retailer {
    /// All retailers in display order
    pub const ALL: [Retailer; 3] = [Retailer::Walmart, Retailer::Chedraui, Retailer::Soriana];
}

/// Validated product barcode (`codigo`).
///
/// Any non-blank string is accepted as-is; the value is not trimmed so it
/// matches the stored key byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Barcode(String);

impl Barcode {
    /// # Example
    /// ```
    /// use pricecheck_core::Barcode;
    ///
    /// assert!(Barcode::new("75007614").is_ok());
    /// assert!(Barcode::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(CoreError::missing_field("codigo"));
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Barcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Barcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored product row
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Surrogate key assigned by storage; never serialized
    pub id: i64,
    pub codigo: String,
    pub nombre: String,
    pub precio_walmart: f64,
    pub precio_chedraui: f64,
    pub precio_soriana: f64,
    pub predicted_price_next_year: Option<f64>,
}

impl Product {
    pub fn price(&self, retailer: Retailer) -> f64 {
        match retailer {
            Retailer::Walmart => self.precio_walmart,
            Retailer::Chedraui => self.precio_chedraui,
            Retailer::Soriana => self.precio_soriana,
        }
    }

    /// Mean of the three retailer prices
    pub fn average_price(&self) -> f64 {
        (self.precio_walmart + self.precio_chedraui + self.precio_soriana) / 3.0
    }

    /// Project the row into its public JSON shape
    pub fn view(&self) -> ProductView {
        let precios = Retailer::ALL
            .iter()
            .map(|&tienda| PriceEntry {
                tienda,
                precio: self.price(tienda),
            })
            .collect();

        let forecast = self
            .predicted_price_next_year
            .map(|predicted| Forecast::project(predicted, self.average_price()));

        ProductView {
            codigo: self.codigo.clone(),
            nombre: self.nombre.clone(),
            precios,
            forecast,
        }
    }
}

/// Fully specified product ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub codigo: Barcode,
    pub nombre: String,
    pub precio_walmart: f64,
    pub precio_chedraui: f64,
    pub precio_soriana: f64,
    pub predicted_price_next_year: Option<f64>,
}
