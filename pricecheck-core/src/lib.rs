//! pricecheck-core: domain types for the price comparison backend
//!
//! Products carry one price per tracked retailer and an optional forecast
//! price. This crate owns the arithmetic that turns a stored row into its
//! JSON view and the typed coercion applied to incoming product payloads.
//! It does no I/O.

pub mod error;
pub mod forecast;
pub mod patch;
pub mod product;
pub mod view;

pub use error::{CoreError, Result};
pub use forecast::{ChangePct, Forecast};
pub use patch::{ProductPatch, ProductPayload};
pub use product::{Barcode, NewProduct, Product, Retailer};
pub use view::{PriceEntry, ProductView};
