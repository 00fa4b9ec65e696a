//! Dish Model

use super::category::Category;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category reference as sent by the API: either a bare id or the nested record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(i64),
    Nested(Category),
}

impl CategoryRef {
    pub fn id(&self) -> i64 {
        match self {
            Self::Id(id) => *id,
            Self::Nested(c) => c.id,
        }
    }
}

/// Menu dish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    pub category: CategoryRef,
}

impl Dish {
    /// Case-insensitive name match used by the dish grid search box
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }

    pub fn in_category(&self, category_id: Option<i64>) -> bool {
        category_id.is_none_or(|id| self.category.id() == id)
    }
}

/// Create dish payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishCreate {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: i64,
}

/// Filter a dish list by category and name, the way the dish grid does
pub fn filter_dishes<'a>(
    dishes: &'a [Dish],
    category_id: Option<i64>,
    query: &str,
) -> Vec<&'a Dish> {
    dishes
        .iter()
        .filter(|d| d.in_category(category_id) && d.matches(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: i64, name: &str, category: i64) -> Dish {
        Dish {
            id,
            name: name.to_string(),
            description: String::new(),
            price: Decimal::new(1500, 2),
            image: None,
            category: CategoryRef::Id(category),
        }
    }

    #[test]
    fn test_category_ref_accepts_both_shapes() {
        let d: Dish = serde_json::from_str(
            r#"{"id":1,"name":"Biryani","description":"","price":"18.50","image":null,"category":3}"#,
        )
        .unwrap();
        assert_eq!(d.category.id(), 3);
        assert_eq!(d.price, Decimal::new(1850, 2));

        let d: Dish = serde_json::from_str(
            r#"{"id":1,"name":"Biryani","price":18.5,"category":{"id":4,"name":"Rice"}}"#,
        )
        .unwrap();
        assert_eq!(d.category.id(), 4);
    }

    #[test]
    fn test_filter_by_category_and_name() {
        let dishes = vec![
            dish(1, "Chicken Biryani", 1),
            dish(2, "Mutton Biryani", 1),
            dish(3, "Karak Tea", 2),
        ];
        assert_eq!(filter_dishes(&dishes, None, "").len(), 3);
        assert_eq!(filter_dishes(&dishes, Some(1), "").len(), 2);
        let hits = filter_dishes(&dishes, None, "BIRYANI");
        assert_eq!(hits.len(), 2);
        let hits = filter_dishes(&dishes, Some(2), "biryani");
        assert!(hits.is_empty());
    }
}
