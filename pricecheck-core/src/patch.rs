//! Product payload parsing and typed per-field coercion
//!
//! Incoming product bodies are loosely typed JSON. Only an explicit
//! allow-list of fields is ever read; `id` and unknown keys are ignored.
//! Each field goes through its own coercion function, and a value that
//! cannot be coerced is skipped rather than failing the whole payload.

use serde_json::{Map, Value};

use crate::error::{CoreError, Result};
use crate::product::{Barcode, NewProduct};

/// Partial set of updatable product fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub nombre: Option<String>,
    pub precio_walmart: Option<f64>,
    pub precio_chedraui: Option<f64>,
    pub precio_soriana: Option<f64>,
    pub predicted_price_next_year: Option<f64>,
}

type Setter = fn(&mut ProductPatch, &Value) -> bool;

/// Updatable fields and how each one is coerced
const UPDATABLE_FIELDS: &[(&str, Setter)] = &[
    ("nombre", set_nombre),
    ("precio_walmart", set_precio_walmart),
    ("precio_chedraui", set_precio_chedraui),
    ("precio_soriana", set_precio_soriana),
    ("predicted_price_next_year", set_predicted_price),
];

fn set_nombre(p: &mut ProductPatch, v: &Value) -> bool {
    set(&mut p.nombre, coerce_text(v))
}

fn set_precio_walmart(p: &mut ProductPatch, v: &Value) -> bool {
    set(&mut p.precio_walmart, coerce_price(v))
}

fn set_precio_chedraui(p: &mut ProductPatch, v: &Value) -> bool {
    set(&mut p.precio_chedraui, coerce_price(v))
}

fn set_precio_soriana(p: &mut ProductPatch, v: &Value) -> bool {
    set(&mut p.precio_soriana, coerce_price(v))
}

fn set_predicted_price(p: &mut ProductPatch, v: &Value) -> bool {
    set(&mut p.predicted_price_next_year, coerce_price(v))
}

fn set<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    let present = value.is_some();
    if present {
        *slot = value;
    }
    present
}

/// Coerce a JSON value to a price.
///
/// Numbers and numeric strings are accepted; `null`, booleans, and anything
/// non-finite are not.
pub fn coerce_price(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Coerce a JSON value to display text. Only strings qualify.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

impl ProductPatch {
    /// Collect every allow-listed field from `fields` that coerces cleanly
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let mut patch = Self::default();
        for (name, setter) in UPDATABLE_FIELDS {
            if let Some(value) = fields.get(*name) {
                if !value.is_null() && !setter(&mut patch, value) {
                    tracing::debug!(field = *name, %value, "skipping field that failed coercion");
                }
            }
        }
        patch
    }

    /// Turn the patch into a complete record for a new product.
    ///
    /// Name and all three retailer prices are required on creation; the
    /// forecast price stays optional.
    pub fn into_new(self, codigo: Barcode) -> Result<NewProduct> {
        Ok(NewProduct {
            codigo,
            nombre: self.nombre.ok_or(CoreError::missing_field("nombre"))?,
            precio_walmart: self
                .precio_walmart
                .ok_or(CoreError::missing_field("precio_walmart"))?,
            precio_chedraui: self
                .precio_chedraui
                .ok_or(CoreError::missing_field("precio_chedraui"))?,
            precio_soriana: self
                .precio_soriana
                .ok_or(CoreError::missing_field("precio_soriana"))?,
            predicted_price_next_year: self.predicted_price_next_year,
        })
    }
}

/// A validated `POST /api/product` body: the barcode key plus the patch
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPayload {
    pub codigo: Barcode,
    pub patch: ProductPatch,
}

impl ProductPayload {
    /// Validate a parsed JSON body.
    ///
    /// The body must be a non-empty object with a non-blank string `codigo`.
    pub fn from_value(value: Value) -> Result<Self> {
        let fields = match value {
            Value::Object(map) => map,
            Value::Null => return Err(CoreError::EmptyPayload),
            other => {
                return Err(CoreError::NotAnObject {
                    kind: json_kind(&other),
                })
            }
        };
        Self::from_fields(&fields)
    }

    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self> {
        if fields.is_empty() {
            return Err(CoreError::EmptyPayload);
        }

        let codigo = match fields.get("codigo") {
            None | Some(Value::Null) => return Err(CoreError::missing_field("codigo")),
            Some(Value::String(s)) => Barcode::new(s)?,
            Some(_) => {
                return Err(CoreError::InvalidField {
                    field: "codigo",
                    reason: "must be a string",
                })
            }
        };

        Ok(Self {
            codigo,
            patch: ProductPatch::from_fields(fields),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
