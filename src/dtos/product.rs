// src/dtos/product.rs
use std::collections::BTreeMap;

use serde::Serialize;
use validator::Validate;

use crate::models::product::Product;

/// Messages keyed by form field name, rendered next to the matching input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut errors = FieldErrors::new();
        for (field, field_errors) in err.field_errors() {
            let field = field.to_string();
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"));
                errors.reject(&field, message);
            }
        }
        errors
    }
}

/// Product as posted by (and rendered back into) the add/edit forms.
///
/// Numeric fields stay as the raw submitted text so a rejected form shows
/// exactly what the user typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct ProductForm {
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    pub name: String,
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: String,
    pub price: String,
    pub category_id: String,
    pub image_url: Option<String>,
}

/// A form that passed validation, ready for the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: Option<i64>,
    pub image_url: Option<String>,
}

impl ProductForm {
    pub fn validate_input(&self) -> Result<ProductInput, FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        let name = self.name.trim();
        if name.is_empty() && errors.get("name").is_none() {
            errors.reject("name", "Name is required");
        }

        let price = match parse_price(&self.price) {
            Ok(price) => Some(price),
            Err(message) => {
                errors.reject("price", message);
                None
            }
        };

        let category_id = match self.category_id.trim() {
            "" => None,
            raw => match raw.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.reject("category_id", "Category must be a valid id");
                    None
                }
            },
        };

        match price {
            Some(price) if errors.is_empty() => Ok(ProductInput {
                name: name.to_string(),
                description: Some(self.description.trim())
                    .filter(|d| !d.is_empty())
                    .map(str::to_owned),
                price,
                category_id,
                image_url: self.image_url.clone().filter(|url| !url.is_empty()),
            }),
            _ => Err(errors),
        }
    }
}

/// Prices are stored as NUMERIC(12, 2).
const MAX_PRICE: f64 = 1e10;
const PRICE_SCALE: i64 = 2;

fn parse_price(raw: &str) -> Result<f64, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Price is required");
    }
    match raw.parse::<f64>() {
        Ok(price) if !price.is_finite() => Err("Price must be a number"),
        Ok(price) if price < 0.0 => Err("Price must not be negative"),
        Ok(price) if price >= MAX_PRICE => Err("Price must be less than 10000000000"),
        Ok(_) if fraction_digits(raw) > PRICE_SCALE => Err("Price must have at most 2 decimal places"),
        Ok(price) => Ok(price),
        Err(_) => Err("Price must be a number"),
    }
}

/// Significant digits after the decimal point of an already-parsed number,
/// accounting for an exponent (`1.25e1` has one).
fn fraction_digits(raw: &str) -> i64 {
    let (mantissa, exponent) = match raw.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().unwrap_or(0)),
        None => (raw, 0),
    };
    let fraction = mantissa
        .split_once('.')
        .map(|(_, fraction)| fraction.trim_end_matches('0'))
        .unwrap_or("");
    fraction.len() as i64 - exponent
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
            category_id: product
                .category_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            image_url: product.image_url.clone(),
        }
    }
}
