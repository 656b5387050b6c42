//! # CLI Layer
//!
//! One possible view over the ledger. This is the only place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Parses arguments
//! - Installs the tracing subscriber
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: parse, set up logging, build the context, dispatch
//! - `init_context()`: data dir, config and the `LedgerApi` over an `FsBackend`
//! - `handle_*()`: per-command handlers that call the API and print the result
//!
//! A declined action is not a failure: its warning is printed and the process exits 0.

use super::args::{Cli, Commands, TransactionArgs};
use super::render::{print_messages, render_dashboard, render_detail, render_products};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use rust_decimal::Decimal;
use slate::api::LedgerApi;
use slate::config::{SlateConfig, KEYS};
use slate::error::{Result, SlateError};
use slate::model::{CustomerDraft, ProductDraft, TransactionDraft, TransactionKind};
use slate::store::fs_backend::FsBackend;
use slate::store::LedgerStore;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const HOME_ENV: &str = "SLATE_HOME";

struct AppContext {
    api: LedgerApi<FsBackend>,
    config: SlateConfig,
    data_dir: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(cli.data_dir)?;

    match cli.command {
        None => handle_list(&mut ctx, None),
        Some(Commands::List { search }) => handle_list(&mut ctx, search),
        Some(Commands::AddCustomer { name, phone, notes }) => {
            handle_add_customer(&mut ctx, name, phone, notes)
        }
        Some(Commands::Show { id }) => handle_show(&mut ctx, &id),
        Some(Commands::Debt(args)) => handle_transaction(&mut ctx, TransactionKind::Debt, args),
        Some(Commands::Pay(args)) => handle_transaction(&mut ctx, TransactionKind::Payment, args),
        Some(Commands::Products) => handle_products(&ctx),
        Some(Commands::AddProduct { name, price }) => handle_add_product(&mut ctx, name, &price),
        Some(Commands::DeleteProduct { id }) => handle_delete_product(&mut ctx, &id),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// `--data-dir`, then `$SLATE_HOME`, then the platform data directory.
fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "slate", "slate")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SlateError::Config("Could not determine a data directory".into()))
}

fn init_context(flag: Option<PathBuf>) -> Result<AppContext> {
    let data_dir = resolve_data_dir(flag)?;
    debug!(data_dir = %data_dir.display(), "using data directory");

    let config = SlateConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "could not read config, using defaults");
        SlateConfig::default()
    });

    let store = LedgerStore::with_backend(FsBackend::new(&data_dir));
    let api = LedgerApi::new(store).with_placeholder(config.placeholder_description.clone());

    Ok(AppContext {
        api,
        config,
        data_dir,
    })
}

fn handle_list(ctx: &mut AppContext, search: Option<String>) -> Result<()> {
    if let Some(query) = search {
        ctx.api.on_search(&query)?;
    }
    print!(
        "{}",
        render_dashboard(&ctx.api.dashboard(), &ctx.config.currency_symbol)
    );
    Ok(())
}

fn handle_add_customer(
    ctx: &mut AppContext,
    name: String,
    phone: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let mut draft = CustomerDraft::new(name);
    if let Some(phone) = phone {
        draft = draft.with_phone(phone);
    }
    if let Some(notes) = notes {
        draft = draft.with_notes(notes);
    }

    let result = ctx.api.on_add_customer(draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.on_select_customer(id)?;
    if result.is_declined() {
        print_messages(&result.messages);
        return Ok(());
    }

    if let Some(detail) = ctx.api.detail() {
        print!(
            "{}",
            render_detail(&detail, &ctx.config.currency_symbol, Utc::now())
        );
    }
    Ok(())
}

fn handle_transaction(
    ctx: &mut AppContext,
    kind: TransactionKind,
    args: TransactionArgs,
) -> Result<()> {
    let description = args.desc.unwrap_or_default();

    let result = match (args.product, args.amount) {
        (Some(product_id), _) => ctx.api.on_add_product_transaction(
            &args.customer_id,
            &product_id,
            kind,
            &description,
        )?,
        (None, Some(raw)) => {
            let draft =
                TransactionDraft::custom(kind, parse_amount(&raw)?).with_description(description);
            ctx.api.on_add_transaction(&args.customer_id, draft)?
        }
        (None, None) => {
            return Err(SlateError::Api(
                "Give an amount or a product with --product".into(),
            ))
        }
    };

    print_messages(&result.messages);
    Ok(())
}

fn handle_products(ctx: &AppContext) -> Result<()> {
    print!(
        "{}",
        render_products(&ctx.api.products(), &ctx.config.currency_symbol)
    );
    Ok(())
}

fn handle_add_product(ctx: &mut AppContext, name: String, price: &str) -> Result<()> {
    let draft = ProductDraft::new(name, parse_amount(price)?);
    let result = ctx.api.on_add_product(draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete_product(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.on_delete_product(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for key in KEYS {
                println!("{} = {}", key, ctx.config.get(key)?);
            }
        }
        (Some(key), None) => println!("{} = {}", key, ctx.config.get(&key)?),
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.data_dir)?;
            println!(
                "{}",
                format!("{} set to {}", key, ctx.config.get(&key)?).green()
            );
        }
    }
    Ok(())
}

fn parse_amount(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|_| SlateError::InvalidAmount(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("4.50").unwrap(), Decimal::new(450, 2));
        assert_eq!(parse_amount(" 3 ").unwrap(), Decimal::new(3, 0));
        assert!(matches!(
            parse_amount("four"),
            Err(SlateError::InvalidAmount(_))
        ));
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_data_dir_flag_wins() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/ledger"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/ledger"));
    }
}
