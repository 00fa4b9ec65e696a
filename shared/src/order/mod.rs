//! Client-side order orchestration
//!
//! The server owns pricing and the actual state transition. This module
//! covers what happens before a request leaves: building carts, merging
//! added products, splitting payments and planning status changes.

mod cart;
mod draft;
mod flow;
mod payment;

pub use cart::{Cart, CartLine, CheckoutForm};
pub use draft::AddProductsDraft;
pub use flow::{BillKind, Confirmation, StatusAction, StatusFlow, TransitionPlan};
pub use payment::PaymentSelection;
