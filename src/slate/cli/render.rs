//! Terminal rendering. Every `render_*` function builds a plain `String` so the
//! layout can be tested without a terminal; color is applied through `colored`,
//! which the tests switch off.

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use slate::api::DetailView;
use slate::app::Dashboard;
use slate::commands::{CmdMessage, MessageLevel};
use slate::ledger::{format_amount, BalanceStanding};
use slate::model::{Product, TransactionKind};
use rust_decimal::Decimal;
use std::fmt::Write;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 24;
const PHONE_WIDTH: usize = 16;
const AMOUNT_WIDTH: usize = 12;
const DESCRIPTION_WIDTH: usize = 36;
const TIME_WIDTH: usize = 16;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn render_dashboard(dashboard: &Dashboard, currency: &str) -> String {
    let mut out = String::new();
    let totals = &dashboard.totals;

    let _ = writeln!(
        out,
        "{} {}   {}",
        "Outstanding".bold(),
        money(totals.outstanding(), currency).bold(),
        format!(
            "(debt {}, payments {})",
            money(totals.total_debt, currency),
            money(totals.total_payments, currency)
        )
        .dimmed()
    );
    out.push('\n');

    if dashboard.customers.is_empty() {
        if dashboard.query.trim().is_empty() {
            out.push_str("No customers yet.\n");
        } else {
            let _ = writeln!(out, "No customers match \"{}\".", dashboard.query.trim());
        }
        return out;
    }

    for entry in &dashboard.customers {
        let customer = &entry.customer;
        let _ = writeln!(
            out,
            "  {}  {}{}{}",
            customer.id.dimmed(),
            pad_to_width(&customer.name, NAME_WIDTH),
            pad_to_width(&customer.phone, PHONE_WIDTH),
            balance_colored(entry.balance, currency)
        );
    }
    out
}

pub(super) fn render_detail(detail: &DetailView, currency: &str, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let customer = &detail.customer;

    let _ = writeln!(out, "{}  {}", customer.name.bold(), customer.id.dimmed());
    if !customer.phone.is_empty() {
        let _ = writeln!(out, "Phone: {}", customer.phone);
    }
    if !customer.notes.is_empty() {
        let _ = writeln!(out, "Notes: {}", customer.notes);
    }
    let standing = match BalanceStanding::of(detail.balance) {
        BalanceStanding::Owes => "owes",
        BalanceStanding::Credit => "in credit",
        BalanceStanding::Settled => "settled",
    };
    let _ = writeln!(
        out,
        "Balance: {} {}",
        tinted(money(detail.balance, currency), detail.balance),
        standing.dimmed()
    );
    out.push('\n');

    if detail.history.is_empty() {
        out.push_str("No transactions yet.\n");
        return out;
    }

    for tx in &detail.history {
        let cell = format!("{:>width$}", money(tx.amount, currency), width = AMOUNT_WIDTH);
        let (sign, amount_cell) = match tx.kind {
            TransactionKind::Debt => ("+", cell.red()),
            TransactionKind::Payment => ("-", cell.green()),
        };
        let _ = writeln!(
            out,
            "  {} {}   {}{}",
            sign,
            amount_cell,
            pad_to_width(&tx.description, DESCRIPTION_WIDTH),
            format_time_ago(tx.date, now).dimmed()
        );
    }
    out
}

pub(super) fn render_products(products: &[Product], currency: &str) -> String {
    if products.is_empty() {
        return "No products yet.\n".to_string();
    }

    let mut out = String::new();
    for product in products {
        let _ = writeln!(
            out,
            "  {}  {}{:>width$}",
            product.id.dimmed(),
            pad_to_width(&product.name, NAME_WIDTH),
            money(product.price, currency),
            width = AMOUNT_WIDTH
        );
    }
    out
}

/// `$4.50`, `-$1.00`.
fn money(amount: Decimal, currency: &str) -> String {
    if amount.is_sign_negative() && !amount.is_zero() {
        format!("-{}{}", currency, format_amount(amount.abs()))
    } else {
        format!("{}{}", currency, format_amount(amount))
    }
}

/// Right-aligned balance, red while the customer owes and green while in credit.
fn balance_colored(balance: Decimal, currency: &str) -> ColoredString {
    let cell = format!("{:>width$}", money(balance, currency), width = AMOUNT_WIDTH);
    tinted(cell, balance)
}

fn tinted(text: String, balance: Decimal) -> ColoredString {
    match BalanceStanding::of(balance) {
        BalanceStanding::Owes => text.red(),
        BalanceStanding::Credit => text.green(),
        BalanceStanding::Settled => text.dimmed(),
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width.saturating_sub(1));
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
