//! Command-line interface definition

use crate::error::CliError;
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dine_client::pages::POLL_INTERVAL;
use dine_printer::Encoding;
use rust_decimal::Decimal;
use shared::models::{DeliveryStatus, MealType, MenuType, OrderType, PaymentMethod, TimeRange};
use shared::order::{BillKind, StatusAction};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "dine", version, about = "Restaurant point-of-sale terminal")]
pub struct Cli {
    /// Restaurant API base URL
    #[arg(long, global = true, env = "DINE_API_URL")]
    pub api_url: Option<String>,

    /// Session and log directory
    #[arg(long, global = true, env = "DINE_DATA_DIR", default_value = ".dine")]
    pub data_dir: PathBuf,

    /// Receipt printer: stdout, file:<path> or <host>:<port>
    #[arg(long, global = true, env = "DINE_PRINTER", default_value = "stdout")]
    pub printer: String,

    #[arg(long, global = true, env = "DINE_PRINTER_ENCODING", default_value = "ascii")]
    pub printer_encoding: Encoding,

    /// Characters per receipt line (48 for 80mm paper, 32 for 58mm)
    #[arg(long, global = true, env = "DINE_PAPER_WIDTH", default_value_t = dine_printer::WIDTH_80MM)]
    pub paper_width: usize,

    /// Restaurant name on top of receipts
    #[arg(long, global = true, env = "DINE_RECEIPT_HEADER", default_value = "RESTAURANT")]
    pub receipt_header: String,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with username and password
    Login {
        username: String,
        /// Read from stdin when omitted
        #[arg(long, env = "DINE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Log in with a 6-digit staff passcode
    LoginPasscode { passcode: String },
    Logout,
    /// Show the logged-in user
    Whoami,
    Dishes(DishesCommand),
    Categories(CategoriesCommand),
    /// Build an order from dishes and check it out
    Cart(CartArgs),
    Orders(OrdersCommand),
    Bills(BillsCommand),
    Tables(TablesCommand),
    Mess(MessCommand),
    Coupons(CouponsCommand),
    Credit(CreditCommand),
    Reports(ReportsCommand),
    /// Sales figures for a period
    Dashboard {
        #[arg(default_value = "day")]
        range: TimeRange,
    },
    Notifications(NotificationsCommand),
    Drivers(DriversCommand),
    /// Deliveries assigned to the logged-in driver
    Deliveries(DeliveriesCommand),
}

// =============================================================================
// Shared argument types
// =============================================================================

/// `<dish-id>:<quantity>`, quantity defaults to 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemArg {
    pub dish: i64,
    pub quantity: u32,
}

impl FromStr for ItemArg {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CliError::InvalidItem(s.to_string());
        let (dish, quantity) = match s.split_once(':') {
            Some((dish, quantity)) => (dish, quantity.parse().map_err(|_| invalid())?),
            None => (s, 1),
        };
        let dish = dish.trim().parse().map_err(|_| invalid())?;
        if quantity == 0 {
            return Err(invalid());
        }
        Ok(Self { dish, quantity })
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentArg {
    Cash,
    Bank,
    CashBank,
    Credit,
}

impl From<PaymentArg> for PaymentMethod {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Cash => Self::Cash,
            PaymentArg::Bank => Self::Bank,
            PaymentArg::CashBank => Self::CashBank,
            PaymentArg::Credit => Self::Credit,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderTypeArg {
    Dining,
    Takeaway,
    Delivery,
}

impl From<OrderTypeArg> for OrderType {
    fn from(arg: OrderTypeArg) -> Self {
        match arg {
            OrderTypeArg::Dining => Self::Dining,
            OrderTypeArg::Takeaway => Self::Takeaway,
            OrderTypeArg::Delivery => Self::Delivery,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTypeArg {
    Own,
    Custom,
}

impl From<MenuTypeArg> for MenuType {
    fn from(arg: MenuTypeArg) -> Self {
        match arg {
            MenuTypeArg::Own => Self::OwnMenu,
            MenuTypeArg::Custom => Self::CustomMenu,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealArg {
    Breakfast,
    Lunch,
    Dinner,
}

impl From<MealArg> for MealType {
    fn from(arg: MealArg) -> Self {
        match arg {
            MealArg::Breakfast => Self::Breakfast,
            MealArg::Lunch => Self::Lunch,
            MealArg::Dinner => Self::Dinner,
        }
    }
}

/// `HH:MM`, as typed into the table time pickers
fn parse_clock(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("expected HH:MM, got `{s}`"))
}

fn parse_delivery_status(s: &str) -> Result<DeliveryStatus, String> {
    DeliveryStatus::parse(s).ok_or_else(|| format!("unknown delivery status: {s}"))
}

/// Payment flags shared by checkout, status and pay commands
#[derive(Args, Debug, Clone, Default)]
pub struct PaymentArgs {
    #[arg(long, value_enum)]
    pub payment: Option<PaymentArg>,
    /// Cash part of a cash-bank payment (even split when omitted)
    #[arg(long, requires = "bank")]
    pub cash: Option<Decimal>,
    #[arg(long, requires = "cash")]
    pub bank: Option<Decimal>,
    /// Credit account charged by a credit payment
    #[arg(long)]
    pub credit_user: Option<i64>,
}

// =============================================================================
// Subcommand groups
// =============================================================================

#[derive(Args, Debug)]
pub struct DishesCommand {
    #[command(subcommand)]
    pub command: DishesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DishesSubcommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Name search, needs at least two characters
    Search { query: String },
    Show { id: i64 },
}

#[derive(Args, Debug)]
pub struct CategoriesCommand {
    #[command(subcommand)]
    pub command: CategoriesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CategoriesSubcommand {
    List,
    Add { name: String },
}

#[derive(Args, Debug)]
pub struct CartArgs {
    /// Dish and quantity, repeatable: --item 12:2 --item 7
    #[arg(long = "item", required = true)]
    pub items: Vec<ItemArg>,
    #[arg(long = "type", value_enum, default_value = "dining")]
    pub order_type: OrderTypeArg,
    #[arg(long, default_value = "")]
    pub customer: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub delivery_charge: Decimal,
    #[arg(long)]
    pub driver: Option<i64>,
    #[arg(long)]
    pub note: Option<String>,
    #[command(flatten)]
    pub payment: PaymentArgs,
}

#[derive(Args, Debug)]
pub struct OrdersCommand {
    #[command(subcommand)]
    pub command: OrdersSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum OrdersSubcommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Show { id: i64 },
    /// Change status: pending, approved, delivered, without-bill, cancelled
    Status {
        id: i64,
        status: StatusAction,
        /// Receipt printed on delivery
        #[arg(long, default_value = "sales")]
        bill: BillKind,
        #[command(flatten)]
        payment: PaymentArgs,
    },
    /// Append dishes to an open order
    Add {
        id: i64,
        #[arg(long = "item", required = true)]
        items: Vec<ItemArg>,
    },
    /// Record or correct the payment
    Pay {
        id: i64,
        #[command(flatten)]
        payment: PaymentArgs,
    },
    ChangeType {
        id: i64,
        #[arg(value_enum)]
        order_type: OrderTypeArg,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        customer: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        driver: Option<i64>,
        #[arg(long)]
        delivery_charge: Option<Decimal>,
    },
    /// Reprint a receipt
    Print {
        id: i64,
        #[arg(long, default_value = "sales")]
        bill: BillKind,
    },
    Delete { id: i64 },
}

#[derive(Args, Debug)]
pub struct BillsCommand {
    #[command(subcommand)]
    pub command: BillsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BillsSubcommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// First day, used together with --to
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
        /// Bill number contains
        #[arg(long)]
        search: Option<String>,
    },
    Cancel { id: i64 },
    Create { order: i64, total: Decimal },
}

#[derive(Args, Debug)]
pub struct TablesCommand {
    #[command(subcommand)]
    pub command: TablesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TablesSubcommand {
    Floors,
    List { floor: String },
    Show { id: i64 },
    Update {
        id: i64,
        /// HH:MM
        #[arg(long, value_parser = parse_clock)]
        start: Option<NaiveTime>,
        #[arg(long, value_parser = parse_clock)]
        end: Option<NaiveTime>,
        #[arg(long)]
        seats: Option<u32>,
        #[arg(long)]
        ready: Option<bool>,
    },
}

#[derive(Args, Debug)]
pub struct MessCommand {
    #[command(subcommand)]
    pub command: MessSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum MessSubcommand {
    Members,
    Show { id: i64 },
    Enroll(EnrollArgs),
    /// Correct a member's details or balance
    Update(MessUpdateArgs),
    Delete { id: i64 },
    /// Mess types offered
    Types,
    Menus(MenusCommand),
    Transactions { mess_id: i64 },
    /// Record a payment from a member
    Receive {
        mess_id: i64,
        amount: Decimal,
        #[arg(long, value_enum, default_value = "cash")]
        payment: PaymentArg,
        #[arg(long)]
        cash: Option<Decimal>,
        #[arg(long)]
        bank: Option<Decimal>,
    },
    Report {
        #[arg(default_value = "month")]
        range: TimeRange,
        #[arg(long)]
        print: bool,
    },
}

#[derive(Args, Debug)]
pub struct MessUpdateArgs {
    pub id: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub mobile: Option<String>,
    #[arg(long)]
    pub start: Option<NaiveDate>,
    #[arg(long)]
    pub end: Option<NaiveDate>,
    #[arg(long, value_enum)]
    pub payment: Option<PaymentArg>,
    #[arg(long)]
    pub paid: Option<Decimal>,
    #[arg(long)]
    pub pending: Option<Decimal>,
}

#[derive(Args, Debug)]
pub struct MenusCommand {
    #[command(subcommand)]
    pub command: MenusSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum MenusSubcommand {
    /// Menus a member would follow
    List {
        mess_type: i64,
        #[arg(long, value_enum, default_value = "own")]
        menu_type: MenuTypeArg,
        #[arg(long, default_value = "")]
        mobile: String,
    },
    /// Custom menu for the member's next free weekday (seven at most)
    Add { mess_type: i64, mobile: String },
    AddItem {
        menu: i64,
        #[arg(value_enum)]
        meal: MealArg,
        dish: i64,
    },
    RemoveItem { id: i64 },
}

#[derive(Args, Debug)]
pub struct EnrollArgs {
    pub name: String,
    pub mobile: String,
    #[arg(long)]
    pub mess_type: i64,
    #[arg(long, value_enum, default_value = "own")]
    pub menu_type: MenuTypeArg,
    /// Defaults to today
    #[arg(long)]
    pub start: Option<NaiveDate>,
    #[arg(long, default_value_t = 1)]
    pub weeks: u32,
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub discount: Decimal,
    #[arg(long, value_enum, default_value = "cash")]
    pub payment: PaymentArg,
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub paid: Decimal,
    #[arg(long)]
    pub cash: Option<Decimal>,
    #[arg(long)]
    pub bank: Option<Decimal>,
}

#[derive(Args, Debug)]
pub struct CouponsCommand {
    #[command(subcommand)]
    pub command: CouponsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CouponsSubcommand {
    List,
    Show {
        id: i64,
        /// Order total to price with the coupon
        #[arg(long)]
        amount: Option<Decimal>,
    },
    Create(CouponArgs),
    Delete { id: i64 },
}

#[derive(Args, Debug)]
pub struct CouponArgs {
    pub code: String,
    /// Percentage off, wins over --amount
    #[arg(long)]
    pub percent: Option<Decimal>,
    /// Fixed amount off
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub amount: Decimal,
    /// First valid day, defaults to today
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last valid day
    #[arg(long)]
    pub to: NaiveDate,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub min_purchase: Option<Decimal>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub inactive: bool,
}

#[derive(Args, Debug)]
pub struct CreditCommand {
    #[command(subcommand)]
    pub command: CreditSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CreditSubcommand {
    List,
    Active,
    Create {
        username: String,
        #[arg(long)]
        mobile: Option<String>,
        /// End of the credit period
        #[arg(long)]
        until: Option<NaiveDate>,
        #[arg(long)]
        limit: Option<Decimal>,
        #[arg(long)]
        inactive: bool,
    },
    Update {
        id: i64,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
        #[arg(long)]
        until: Option<NaiveDate>,
        #[arg(long)]
        limit: Option<Decimal>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete { id: i64 },
    /// Settle part of an account's balance
    Pay { id: i64, amount: Decimal },
}

#[derive(Args, Debug)]
pub struct ReportsCommand {
    #[command(subcommand)]
    pub command: ReportsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ReportsSubcommand {
    Sales {
        #[arg(default_value = "day")]
        range: TimeRange,
        #[arg(long)]
        print: bool,
    },
    Mess {
        #[arg(default_value = "month")]
        range: TimeRange,
        #[arg(long)]
        print: bool,
    },
    /// Correct the customer on a reported order
    EditOrder {
        id: i64,
        #[arg(long)]
        customer: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Daily sales and new customers
    Analytics,
}

#[derive(Args, Debug)]
pub struct NotificationsCommand {
    #[command(subcommand)]
    pub command: NotificationsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum NotificationsSubcommand {
    List,
    Unread,
    Read { id: i64 },
    Delete { id: i64 },
    /// Print the unread count until interrupted
    Watch {
        /// Seconds between polls
        #[arg(long, default_value_t = POLL_INTERVAL.as_secs())]
        interval: u64,
    },
}

#[derive(Args, Debug)]
pub struct DriversCommand {
    #[command(subcommand)]
    pub command: DriversSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DriversSubcommand {
    List,
    ToggleActive { id: i64 },
    ToggleAvailable { id: i64 },
}

#[derive(Args, Debug)]
pub struct DeliveriesCommand {
    #[command(subcommand)]
    pub command: DeliveriesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DeliveriesSubcommand {
    List,
    /// pending, accepted, in-progress, delivered, cancelled
    Status {
        id: i64,
        #[arg(value_parser = parse_delivery_status)]
        status: DeliveryStatus,
    },
    Delete { id: i64 },
}
