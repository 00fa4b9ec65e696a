//! Report and dashboard Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Reporting window accepted by the report endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "today" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(format!("unknown time range: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: String,
    pub total_sales: Decimal,
    #[serde(default)]
    pub order_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopDish {
    #[serde(rename = "dish__name")]
    pub name: String,
    #[serde(rename = "dish__image", default)]
    pub image: Option<String>,
    pub orders: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySales {
    #[serde(rename = "dish__category__name")]
    pub category: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub hour: String,
    pub order_count: u32,
}

impl TimeSlot {
    pub fn formatted_hour(&self) -> String {
        format_hour(&self.hour)
    }
}

/// Dashboard figures: `dashboard_data` merged with `sales_trends`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardData {
    pub daily_sales: Vec<DailySales>,
    pub total_income: Decimal,
    pub popular_time_slots: Vec<TimeSlot>,
    pub top_dishes: Vec<TopDish>,
    pub category_sales: Vec<CategorySales>,
    pub total_orders: u32,
    pub avg_order_value: Decimal,
    pub total_income_trend: Decimal,
    pub total_orders_trend: Decimal,
    pub avg_order_value_trend: Decimal,
}

impl DashboardData {
    /// Merge both payloads; keys from `trends` win over `dashboard`
    pub fn merge(dashboard: Value, trends: Value) -> serde_json::Result<Self> {
        let mut merged = match dashboard {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        if let Value::Object(extra) = trends {
            merged.extend(extra);
        }
        serde_json::from_value(Value::Object(merged))
    }

    /// Busiest hour label, `N/A` without data
    pub fn peak_hour(&self) -> String {
        self.popular_time_slots
            .first()
            .map(TimeSlot::formatted_hour)
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// Income analytics from `orders/analytics/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderAnalytics {
    pub daily_sales: Vec<DailySales>,
    pub total_income: Decimal,
    pub new_customers: u32,
}

/// Render an hour (`"14"`, `"14:00"` or a timestamp) as `2 PM`
pub fn format_hour(raw: &str) -> String {
    let hour_part = raw
        .split('T')
        .nth(1)
        .unwrap_or(raw)
        .split(':')
        .next()
        .unwrap_or_default();
    match hour_part.trim().parse::<u32>() {
        Ok(h) if h < 24 => {
            let suffix = if h < 12 { "AM" } else { "PM" };
            let twelve = match h % 12 {
                0 => 12,
                n => n,
            };
            format!("{} {}", twelve, suffix)
        }
        _ => "N/A".to_string(),
    }
}
