use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slate", bin_name = "slate", version)]
#[command(about = "Keep a shop's tab: customers, debts, payments and a price list", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the ledger files (defaults to $SLATE_HOME, then the user data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show totals and every customer's balance
    #[command(alias = "ls")]
    List {
        /// Only customers whose name or phone contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Add a customer
    AddCustomer {
        name: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Show a customer's balance and history
    Show {
        /// Customer id (e.g. C3f2a...)
        id: String,
    },

    /// Put an amount or a product on a customer's tab
    Debt(TransactionArgs),

    /// Record a payment from a customer
    Pay(TransactionArgs),

    /// List the price list
    Products,

    /// Add an item to the price list
    AddProduct { name: String, price: String },

    /// Remove an item from the price list
    DeleteProduct { id: String },

    /// Get or set configuration (keys: currency-symbol, placeholder)
    Config {
        key: Option<String>,
        value: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct TransactionArgs {
    pub customer_id: String,

    /// Amount, e.g. 4.50
    #[arg(required_unless_present = "product", conflicts_with = "product")]
    pub amount: Option<String>,

    /// Use a product's price and name instead of an amount
    #[arg(long, value_name = "PID")]
    pub product: Option<String>,

    /// Description (defaults to the product name, or the configured placeholder)
    #[arg(long)]
    pub desc: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_is_the_dashboard() {
        let cli = Cli::try_parse_from(["slate"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["slate", "ls", "--data-dir", "/tmp/x", "-v"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(cli.verbose);
    }

    #[test]
    fn debt_takes_amount_or_product() {
        let cli = Cli::try_parse_from(["slate", "debt", "C1", "4.50", "--desc", "bread"]).unwrap();
        match cli.command {
            Some(Commands::Debt(args)) => {
                assert_eq!(args.amount.as_deref(), Some("4.50"));
                assert_eq!(args.desc.as_deref(), Some("bread"));
            }
            other => panic!("unexpected {:?}", other),
        }

        let cli = Cli::try_parse_from(["slate", "pay", "C1", "--product", "P1"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Pay(ref a)) if a.product.as_deref() == Some("P1")));
    }

    #[test]
    fn debt_needs_exactly_one_source() {
        assert!(Cli::try_parse_from(["slate", "debt", "C1"]).is_err());
        assert!(Cli::try_parse_from(["slate", "debt", "C1", "2", "--product", "P1"]).is_err());
    }
}
