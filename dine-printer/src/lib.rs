//! # dine-printer
//!
//! ESC/POS receipt printing for the restaurant terminal.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building
//! - Code page encoding (plain ASCII or Windows-1256 for Arabic dish names)
//! - Network printing (TCP port 9100)
//! - Plain-text previews for terminals without a printer
//!
//! Which receipt to print (kitchen ticket, sales bill, report) is decided by
//! `dine-client`.
//!
//! ## Example
//!
//! ```ignore
//! use dine_printer::{EscPosBuilder, NetworkPrinter, Printer};
//!
//! let mut builder = EscPosBuilder::new(48);
//! builder.center();
//! builder.double_size();
//! builder.line("KITCHEN");
//! builder.reset_size();
//! builder.sep_double();
//! builder.left();
//! builder.line_lr("Order", "#42");
//! builder.cut();
//!
//! let printer = NetworkPrinter::new("192.168.1.100", 9100)?;
//! printer.print(&builder.build()).await?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;

// Re-exports
pub use encoding::{Encoding, display_width, pad_width, truncate_width};
pub use error::{PrintError, PrintResult};
pub use escpos::{EscPosBuilder, Ticket};
pub use printer::{AnyPrinter, NetworkPrinter, Printer, TextPrinter};

/// Characters per line on 80mm paper
pub const WIDTH_80MM: usize = 48;
/// Characters per line on 58mm paper
pub const WIDTH_58MM: usize = 32;
