//! Mess menu Model

use super::dish::Dish;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mess plan type (e.g. veg, non-veg)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessType {
    pub id: i64,
    pub name: String,
}

/// Mess type reference: bare id on most endpoints, nested in reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessTypeRef {
    Id(i64),
    Nested(MessType),
}

impl MessTypeRef {
    pub fn id(&self) -> i64 {
        match self {
            Self::Id(id) => *id,
            Self::Nested(t) => t.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Nested(t) => Some(&t.name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Parse a day name case-insensitively ("Monday", "mon")
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s || (s.len() >= 3 && d.as_str().starts_with(&s)))
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dish served at a given meal of a menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    #[serde(default)]
    pub menu: Option<i64>,
    pub dish: Dish,
    pub meal_type: MealType,
}

/// Day menu of a mess plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub day_of_week: Option<DayOfWeek>,
    pub sub_total: Decimal,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub mess_type: Option<i64>,
    /// Mobile number of the member a custom menu belongs to
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,
}

impl Menu {
    pub fn items_for(&self, meal: MealType) -> impl Iterator<Item = &MenuItem> {
        self.menu_items.iter().filter(move |i| i.meal_type == meal)
    }
}

/// Query filter for the menus endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mess_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_custom: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Create menu payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCreate {
    pub name: String,
    pub day_of_week: DayOfWeek,
    pub mess_type: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    pub is_custom: bool,
}

impl MenuCreate {
    /// Custom menu owned by a member, named after the weekday
    pub fn custom(day: DayOfWeek, mess_type: i64, mobile_number: &str) -> Self {
        let name = day.as_str();
        let mut title = name[..1].to_uppercase();
        title.push_str(&name[1..]);
        Self {
            name: title,
            day_of_week: day,
            mess_type,
            created_by: Some(mobile_number.to_string()),
            is_custom: true,
        }
    }
}

/// Add a dish to a menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub meal_type: MealType,
    pub menu: i64,
    pub dish_id: i64,
}
