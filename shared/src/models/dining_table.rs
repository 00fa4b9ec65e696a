//! Dining Table Model

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Floor of the restaurant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

/// Dining table entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: i64,
    pub table_name: String,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    pub seats_count: u32,
    pub capacity: u32,
    pub floor: i64,
    #[serde(default)]
    pub is_ready: bool,
}

impl DiningTable {
    /// Seats not yet taken
    pub fn free_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.seats_count)
    }

    /// Table is taken by a sitting
    pub fn is_occupied(&self) -> bool {
        !self.is_ready
    }
}

/// Update dining table payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "hm_opt")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "hm_opt")]
    pub end_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_ready: Option<bool>,
}

/// `HH:MM` wire format for time pickers
mod hm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => s.serialize_str(&t.format("%H:%M").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        raw.map(|s| {
            NaiveTime::parse_from_str(&s, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M"))
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}
