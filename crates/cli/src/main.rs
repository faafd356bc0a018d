//! Rosebud CLI - drive a cart session from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a catalog item to the shopping cart
//! rosebud add --sku RB-1042 --name "Noritake Dinner Set" --price 450 --qty 1
//!
//! # Add a wholesale item to the inquiry cart
//! rosebud inquire --sku RB-2001 --name "Custom Terry Towels" --category "Custom Gift Items"
//!
//! # Adjust, remove, inspect
//! rosebud qty cart 0 -1
//! rosebud remove cart 0
//! rosebud show --shipping express
//!
//! # Coupons and checkout
//! rosebud coupon apply SAVE10
//! rosebud checkout --shipping express
//! ```
//!
//! # Environment Variables
//!
//! - `ROSEBUD_STORE` - Session store file (default: `.rosebud-session.json`)
//! - `ROSEBUD_CART_EXPIRY_DAYS` - Expiry window in days (default: 5)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rosebud_core::ListKind;
use rosebud_session::{CartSession, FileStore, SessionConfig, ShippingMethod};
use rust_decimal::Decimal;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "rosebud")]
#[command(author, version, about = "Rosebud cart session tools")]
struct Cli {
    /// Session store file
    #[arg(long, env = "ROSEBUD_STORE", default_value = ".rosebud-session.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an item to the shopping cart
    Add {
        #[command(flatten)]
        item: ItemArgs,
    },
    /// Add an item to the inquiry cart
    Inquire {
        #[command(flatten)]
        item: ItemArgs,
    },
    /// Adjust a line's quantity by a delta
    Qty {
        /// Which list to mutate
        list: ListArg,
        /// Zero-based line index
        index: usize,
        /// Quantity change (negative to decrement)
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Remove a line
    Remove {
        /// Which list to mutate
        list: ListArg,
        /// Zero-based line index
        index: usize,
    },
    /// Manage the applied coupon
    Coupon {
        #[command(subcommand)]
        action: CouponAction,
    },
    /// Show the sidebar, badge, and totals
    Show {
        /// Shipping method for the totals (free, express, pickup)
        #[arg(long, default_value = "free", value_parser = parse_shipping)]
        shipping: ShippingMethod,
    },
    /// Place an order for the shopping cart
    Checkout {
        /// Shipping method (free, express, pickup)
        #[arg(long, default_value = "free", value_parser = parse_shipping)]
        shipping: ShippingMethod,
    },
    /// Clear session state
    Clear {
        /// What to clear
        target: ClearTarget,
    },
}

/// Item fields shared by `add` and `inquire`.
#[derive(clap::Args)]
struct ItemArgs {
    /// Stock-keeping unit (also the merge identifier)
    #[arg(long)]
    sku: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Unit price in USD
    #[arg(long, default_value = "0", value_parser = parse_price)]
    price: Decimal,

    /// Quantity
    #[arg(long, default_value_t = 1)]
    qty: u32,

    /// Color variant
    #[arg(long)]
    color: Option<String>,

    /// Category tag
    #[arg(long)]
    category: Option<String>,

    /// Mark as a custom order
    #[arg(long)]
    custom: bool,
}

#[derive(Subcommand)]
enum CouponAction {
    /// Apply a coupon code
    Apply {
        /// Coupon code (case-insensitive)
        code: String,
    },
    /// Remove the applied coupon
    Remove,
}

#[derive(Clone, Copy, ValueEnum)]
enum ListArg {
    Cart,
    Inquiry,
}

impl From<ListArg> for ListKind {
    fn from(list: ListArg) -> Self {
        match list {
            ListArg::Cart => Self::Cart,
            ListArg::Inquiry => Self::Inquiry,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ClearTarget {
    /// Empty the shopping cart (drops the coupon too)
    Cart,
    /// Empty the inquiry cart
    Inquiry,
    /// Reset everything: lists, timestamp, coupon
    All,
}

fn parse_shipping(raw: &str) -> Result<ShippingMethod, String> {
    raw.parse()
}

fn parse_price(raw: &str) -> Result<Decimal, String> {
    let price: Decimal = raw.parse().map_err(|e| format!("invalid price: {e}"))?;
    if price < Decimal::ZERO {
        return Err("price cannot be negative".to_owned());
    }
    Ok(price)
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open(&cli.store)?;
    let config = SessionConfig::from_env()?;
    let mut session = CartSession::load(store, config)?;
    session.subscribe(Box::new(render::TermRenderer));

    match cli.command {
        Commands::Add { item } => commands::cart::add(&mut session, item.into_item())?,
        Commands::Inquire { item } => commands::cart::inquire(&mut session, item.into_item())?,
        Commands::Qty { list, index, delta } => {
            commands::cart::update_quantity(&mut session, list.into(), index, delta)?;
        }
        Commands::Remove { list, index } => {
            commands::cart::remove(&mut session, list.into(), index)?;
        }
        Commands::Coupon { action } => match action {
            CouponAction::Apply { code } => commands::coupon::apply(&mut session, &code)?,
            CouponAction::Remove => commands::coupon::remove(&mut session)?,
        },
        Commands::Show { shipping } => commands::show::state(&session, shipping),
        Commands::Checkout { shipping } => commands::checkout::place(&mut session, shipping)?,
        Commands::Clear { target } => match target {
            ClearTarget::Cart => session.clear_cart()?,
            ClearTarget::Inquiry => session.clear_inquiry()?,
            ClearTarget::All => session.reset_all()?,
        },
    }
    Ok(())
}

impl ItemArgs {
    fn into_item(self) -> rosebud_core::CartItem {
        let mut item = rosebud_core::CartItem::new(self.sku.as_str(), self.name, self.price)
            .with_sku(self.sku)
            .with_quantity(self.qty);
        if let Some(color) = self.color {
            item = item.with_color(color);
        }
        if let Some(category) = self.category {
            item = item.with_category(category);
        }
        if self.custom {
            item = item.custom();
        }
        item
    }
}
