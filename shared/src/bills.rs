//! Bill list filtering
//!
//! The bills page loads the list once and narrows it in memory: an inclusive
//! calendar-day range on `billed_at` and an id substring search.

use crate::models::Bill;
use crate::response::{Pager, paginate};
use chrono::{FixedOffset, NaiveDate, Offset, Utc};

/// Bills per page on the bills screen
pub const BILLS_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct BillFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub search: Option<String>,
    /// Offset used to turn `billed_at` into a calendar day
    pub utc_offset: FixedOffset,
}

impl Default for BillFilter {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            search: None,
            utc_offset: Utc.fix(),
        }
    }
}

impl BillFilter {
    /// Date range only applies once both ends are picked
    pub fn matches(&self, bill: &Bill) -> bool {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            let day = bill.billed_at.with_timezone(&self.utc_offset).date_naive();
            if day < from || day > to {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => bill.id.to_string().contains(term),
            _ => true,
        }
    }

    pub fn apply<'a>(&self, bills: &'a [Bill]) -> Vec<&'a Bill> {
        bills.iter().filter(|b| self.matches(b)).collect()
    }

    /// Drop every criterion
    pub fn reset(&mut self) {
        let offset = self.utc_offset;
        *self = Self {
            utc_offset: offset,
            ..Self::default()
        };
    }
}

/// Filtered bills with the page currently shown
#[derive(Debug, Clone)]
pub struct BillPage<'a> {
    pub bills: Vec<&'a Bill>,
    pub pager: Pager,
}

impl<'a> BillPage<'a> {
    pub fn new(all: &'a [Bill], filter: &BillFilter, page: u32) -> Self {
        let filtered = filter.apply(all);
        let pager = Pager::new(page, BILLS_PER_PAGE, filtered.len() as u64);
        let bills = paginate(&filtered, pager.page, BILLS_PER_PAGE).to_vec();
        Self { bills, pager }
    }
}
