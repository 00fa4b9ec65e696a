//! Page controllers
//!
//! Screen state and the call sequences behind each screen's actions. The
//! terminal front end drives these; nothing here reads input directly.

mod bills;
mod confirm;
mod dashboard;
mod guard;
mod notifications;
mod orders;

pub use bills::BillsBoard;
pub use confirm::{AutoConfirm, Confirm, DELETE_CONFIRMATION};
pub use dashboard::Dashboard;
pub use guard::{GENERIC_ERROR, guard, user_message};
pub use notifications::{NotificationCenter, POLL_INTERVAL};
pub use orders::{BoardOutcome, OrderBoard};
