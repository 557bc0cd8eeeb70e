// market - demo driver for the escrow marketplace ledger
// Runs scripted buyer/seller/admin flows against an in-memory ledger

use clap::{Parser, Subcommand};
use escrowmarket::identity::AccountId;
use escrowmarket::ledger::{Ledger, LedgerError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "market", about = "Escrow marketplace ledger demo")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the happy path: list, purchase, ship, confirm
    HappyPath,
    /// Run a buyer cancellation before shipping
    Cancel,
    /// Run a shipped order through dispute resolution
    Dispute {
        /// Resolve in the buyer's favor (refund) instead of the seller's
        #[arg(long)]
        favor_buyer: bool,
    },
}

fn main() -> Result<(), LedgerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let admin = AccountId::from_label("admin");
    let seller = AccountId::from_label("seller");
    let buyer = AccountId::from_label("buyer");
    let mut ledger = Ledger::new(admin.clone());

    let item_id = ledger.list_item("Widget", "A widget", 1000, &seller)?;
    let order_id = ledger.purchase_item(item_id, 1000, &buyer)?;

    match cli.command {
        Command::HappyPath => {
            ledger.mark_as_shipped(order_id, &seller)?;
            ledger.confirm_receipt(order_id, &buyer)?;
        }
        Command::Cancel => {
            ledger.cancel_order(order_id, &buyer)?;
        }
        Command::Dispute { favor_buyer } => {
            ledger.mark_as_shipped(order_id, &seller)?;
            ledger.raise_dispute(order_id, &buyer)?;
            ledger.resolve_dispute(order_id, favor_buyer, &admin)?;
        }
    }

    println!("order status:   {:?}", ledger.get_order(order_id)?.status());
    println!("item status:    {:?}", ledger.get_item(item_id)?.status());
    println!("escrow held:    {}", ledger.custodied_balance());
    println!("seller balance: {}", ledger.balance_of(&seller));
    println!("buyer balance:  {}", ledger.balance_of(&buyer));
    println!("audit trail:");
    for event in ledger.events() {
        println!("  {:?}", event);
    }

    Ok(())
}
