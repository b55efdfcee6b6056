//! # Request Validation
//!
//! Pure functions that turn untyped request input into typed values.
//!
//! Request bodies arrive as a [`FieldBag`] (a JSON object; anything else counts as an
//! empty bag). [`validate_new_product`] and [`validate_patch`] convert the bag into a
//! [`NewProduct`] or [`ProductPatch`], or return the first rule violation as a
//! [`ValidationError`]. Nothing untyped gets past this module.
//!
//! ## Coercion rules
//!
//! - Text fields must be JSON strings. They are trimmed and must not be empty afterwards.
//! - `price` accepts a JSON number, or a string that [`parse_number`] accepts. Booleans,
//!   `null`, arrays and objects are rejected.
//! - `inStock` must be a JSON boolean. `1`, `"true"` and friends are rejected.

use crate::model::{NewProduct, ProductId, ProductPatch};
use serde_json::{Map, Value};
use thiserror::Error;

/// Untyped request body.
pub type FieldBag = Map<String, Value>;

/// A field-level rule violation. The message is what the caller sees.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Name must be a non-empty string")]
    NameNotNonEmptyString,

    #[error("Price must be a positive number")]
    PriceNotPositive,

    #[error("Category is required")]
    CategoryRequired,

    #[error("Category must be a non-empty string")]
    CategoryNotNonEmptyString,

    #[error("inStock must be boolean")]
    InStockNotBoolean,

    #[error("No valid fields to update")]
    EmptyPatch,
}

/// An id path segment that is not a number at all.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Invalid id")]
pub struct InvalidId;

/// Converts a request body into a field bag. Non-object bodies yield an empty bag.
pub fn field_bag(body: Value) -> FieldBag {
    match body {
        Value::Object(fields) => fields,
        _ => FieldBag::new(),
    }
}

/// Parses a number from text.
///
/// Surrounding whitespace is ignored and blank text reads as `0`. Besides decimal and
/// exponent notation, unsigned `0x`, `0o` and `0b` literals are accepted. Returns `None`
/// when the text is not a number or is not finite.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    if let Some(n) = radix_literal(trimmed) {
        return n;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `Some(parsed)` when `text` carries a radix prefix, `None` when it does not.
fn radix_literal(text: &str) -> Option<Option<f64>> {
    let prefix = text.get(..2)?;
    let digits = &text[2..];
    let radix = match prefix {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    if digits.is_empty() {
        return Some(None);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc * f64::from(radix) + f64::from(digit))
    });
    Some(value.filter(|n| n.is_finite()))
}

/// Parses an id path segment.
///
/// Text that is not a finite number is malformed. A finite number that is not a
/// positive whole number cannot name any product, so it yields `Ok(None)`.
pub fn parse_id(raw: &str) -> Result<Option<ProductId>, InvalidId> {
    let n = parse_number(raw).ok_or(InvalidId)?;
    if n < 1.0 || n.fract() != 0.0 || n > u64::MAX as f64 {
        return Ok(None);
    }
    Ok(Some(ProductId(n as u64)))
}

/// Validates a complete product. Rules run in field order and the first failure wins.
pub fn validate_new_product(fields: &FieldBag) -> Result<NewProduct, ValidationError> {
    let name = fields
        .get("name")
        .and_then(non_empty_text)
        .ok_or(ValidationError::NameRequired)?;
    let price = fields
        .get("price")
        .and_then(positive_price)
        .ok_or(ValidationError::PriceNotPositive)?;
    let category = fields
        .get("category")
        .and_then(non_empty_text)
        .ok_or(ValidationError::CategoryRequired)?;
    let in_stock = fields
        .get("inStock")
        .and_then(Value::as_bool)
        .ok_or(ValidationError::InStockNotBoolean)?;

    Ok(NewProduct {
        name,
        price,
        category,
        in_stock,
    })
}

/// Validates a sparse update. Each present key (including an explicit `null`) must pass
/// its field rule; absent keys are left alone; unknown keys are ignored.
pub fn validate_patch(fields: &FieldBag) -> Result<ProductPatch, ValidationError> {
    let mut patch = ProductPatch::default();

    if let Some(value) = fields.get("name") {
        patch.name = Some(non_empty_text(value).ok_or(ValidationError::NameNotNonEmptyString)?);
    }
    if let Some(value) = fields.get("price") {
        patch.price = Some(positive_price(value).ok_or(ValidationError::PriceNotPositive)?);
    }
    if let Some(value) = fields.get("category") {
        patch.category =
            Some(non_empty_text(value).ok_or(ValidationError::CategoryNotNonEmptyString)?);
    }
    if let Some(value) = fields.get("inStock") {
        patch.in_stock = Some(value.as_bool().ok_or(ValidationError::InStockNotBoolean)?);
    }

    if patch.is_empty() {
        return Err(ValidationError::EmptyPatch);
    }
    Ok(patch)
}

fn non_empty_text(value: &Value) -> Option<String> {
    let trimmed = value.as_str()?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn positive_price(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }?;
    (n.is_finite() && n > 0.0).then_some(n)
}
