use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use validator::{Validate, ValidationError};

use crate::models::{Category, NewProduct, Product};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw form field state, exactly as entered. Numeric and date fields stay
/// strings until validation passes; `parsed` turns them into a typed
/// [`NewProduct`].
#[derive(Debug, Clone, Validate)]
pub struct ProductForm {
    #[validate(custom = "name_rule")]
    pub name: String,
    #[validate(custom = "description_rule")]
    pub description: String,
    #[validate(custom = "price_rule")]
    pub price: String,
    #[validate(custom = "category_rule")]
    pub category: String,
    #[validate(custom = "release_date_rule")]
    pub release_date: String,
    #[validate(custom = "stock_rule")]
    pub stock: String,
    pub active: bool,
}

impl Default for ProductForm {
    fn default() -> Self {
        ProductForm {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: String::new(),
            release_date: String::new(),
            stock: "0".to_string(),
            active: true,
        }
    }
}

impl ProductForm {
    /// Loads an existing record back into editable field state.
    pub fn from_product(product: &Product) -> Self {
        ProductForm {
            name: product.name.clone(),
            description: product.description.clone(),
            price: format_price_input(product.price),
            category: product.category.to_string(),
            release_date: product.release_date.format(DATE_FORMAT).to_string(),
            stock: product.stock.to_string(),
            active: product.active,
        }
    }

    /// Applies every field rule independently and returns field name to
    /// error message. Empty when the record is acceptable.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        match self.validate() {
            Ok(()) => BTreeMap::new(),
            Err(errors) => errors
                .field_errors()
                .into_iter()
                .map(|(field, field_errors)| {
                    let message = field_errors
                        .first()
                        .and_then(|e| e.message.as_deref())
                        .unwrap_or("Invalid value.");
                    (field.to_string(), message.to_string())
                })
                .collect(),
        }
    }

    /// The typed field set, or `None` while any field is still unparseable.
    pub fn parsed(&self) -> Option<NewProduct> {
        Some(NewProduct {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: parse_price(&self.price)?,
            category: self.category.parse().ok()?,
            release_date: parse_release_date(&self.release_date)?,
            stock: parse_stock(&self.stock)?,
            active: self.active,
        })
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite() && *p > 0.0)
}

fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

fn parse_stock(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse::<u32>().ok().filter(|s| *s <= 1000)
}

fn format_price_input(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{}", price as i64)
    } else {
        price.to_string()
    }
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn name_rule(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(field_error("required", "Product name is required."));
    }
    if trimmed.chars().count() > 100 {
        return Err(field_error(
            "length",
            "Product name must be at most 100 characters.",
        ));
    }
    Ok(())
}

fn description_rule(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() < 20 {
        return Err(field_error(
            "length",
            "Description must be at least 20 characters.",
        ));
    }
    Ok(())
}

fn price_rule(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("required", "Price is required."));
    }
    if parse_price(value).is_none() {
        return Err(field_error(
            "range",
            "Price must be a number greater than 0.",
        ));
    }
    Ok(())
}

fn category_rule(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("required", "Category is required."));
    }
    if value.parse::<Category>().is_err() {
        return Err(field_error(
            "enum",
            "Category must be Electronics, Clothing, Food, Beverage or Other.",
        ));
    }
    Ok(())
}

fn release_date_rule(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("required", "Release date is required."));
    }
    let date = match parse_release_date(value) {
        Some(date) => date,
        None => {
            return Err(field_error(
                "format",
                "Release date must be a valid YYYY-MM-DD date.",
            ))
        }
    };
    if date > Local::now().date_naive() {
        return Err(field_error(
            "future",
            "Release date must not be in the future.",
        ));
    }
    Ok(())
}

fn stock_rule(value: &str) -> Result<(), ValidationError> {
    if parse_stock(value).is_none() {
        return Err(field_error(
            "range",
            "Stock must be a whole number between 0 and 1000.",
        ));
    }
    Ok(())
}
