//! Data models
//!
//! Plain records mirrored from the restaurant API. Field names follow the
//! API's snake_case JSON; money is `rust_decimal::Decimal`.

pub mod bill;
pub mod category;
pub mod coupon;
pub mod credit_user;
pub mod delivery;
pub mod dining_table;
pub mod dish;
pub mod menu;
pub mod mess;
pub mod notification;
pub mod order;
pub mod report;

// Re-exports
pub use bill::*;
pub use category::*;
pub use coupon::*;
pub use credit_user::*;
pub use delivery::*;
pub use dining_table::*;
pub use dish::*;
pub use menu::*;
pub use mess::*;
pub use notification::*;
pub use order::*;
pub use report::*;
