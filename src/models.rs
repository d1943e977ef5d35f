use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Electronics,
    Clothing,
    Food,
    Beverage,
    Other,
}

pub const CATEGORY_OPTIONS: [Category; 5] = [
    Category::Electronics,
    Category::Clothing,
    Category::Food,
    Category::Beverage,
    Category::Other,
];

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Food => "Food",
            Category::Beverage => "Beverage",
            Category::Other => "Other",
        };
        f.write_str(label)
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "electronics" => Ok(Category::Electronics),
            "clothing" => Ok(Category::Clothing),
            "food" => Ok(Category::Food),
            "beverage" => Ok(Category::Beverage),
            "other" => Ok(Category::Other),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub release_date: NaiveDate,
    pub stock: u32,
    pub active: bool,
}

/// The validated field set of a product, without an id. Applied to the
/// store either as a new record or as a full in-place replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub release_date: NaiveDate,
    pub stock: u32,
    pub active: bool,
}

impl NewProduct {
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            release_date: self.release_date,
            stock: self.stock,
            active: self.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_round_trip() {
        for category in CATEGORY_OPTIONS {
            let parsed: Category = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!("electronics".parse::<Category>(), Ok(Category::Electronics));
        assert_eq!(" BEVERAGE ".parse::<Category>(), Ok(Category::Beverage));
        assert_eq!("books".parse::<Category>(), Err(()));
        assert_eq!("".parse::<Category>(), Err(()));
    }
}
