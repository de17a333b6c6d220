use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use paywatch::application::monitor::PaymentMonitor;
use paywatch::domain::transaction::MonitoringCriteria;
use paywatch::infrastructure::coingecko::PriceFeed;
use paywatch::infrastructure::toncenter::TonCenterSource;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Wait for an expected payment to arrive at an address
    Watch {
        /// Ledger to monitor (e.g. ton)
        ledger: String,
        /// Address to watch
        address: String,
        /// Expected amount in display form (e.g. 1.5)
        amount: String,
        /// Expected memo, matched exactly when given
        #[arg(long)]
        memo: Option<String>,
        /// Total monitoring window in seconds
        #[arg(long, default_value_t = 3600)]
        budget_secs: u64,
        /// Pause between polls in seconds
        #[arg(long, default_value_t = 5)]
        interval_secs: u64,
        /// Subject identifier, used to cancel the session
        #[arg(long, default_value = "cli")]
        subject: String,
    },
    /// Show a TON wallet's balance and its USD value
    Balance {
        /// Wallet address
        address: String,
    },
    /// Quote the USD value of an amount of a coin
    Price {
        /// Ledger identifier (e.g. btc, ton)
        ledger: String,
        /// Amount in display form
        amount: Decimal,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Watch {
            ledger,
            address,
            amount,
            memo,
            budget_secs,
            interval_secs,
            subject,
        } => {
            let mut monitor = PaymentMonitor::new();
            monitor.register_source("ton", Box::new(TonCenterSource::new()));
            let monitor = Arc::new(monitor);

            let mut criteria = MonitoringCriteria::new(ledger, address, amount);
            criteria.expected_memo = memo;
            criteria.time_budget = Duration::from_secs(budget_secs);
            criteria.poll_interval = Duration::from_secs(interval_secs);

            // Ctrl-C cancels the session through the registry; the loop
            // notices at its next cycle boundary.
            let stopper = Arc::clone(&monitor);
            let stop_subject = subject.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    stopper.stop_monitoring(&stop_subject);
                }
            });

            let found = monitor
                .start_monitoring(&subject, criteria)
                .await
                .into_diagnostic()?;
            if found {
                println!("Payment received");
            } else {
                println!("No matching payment");
                std::process::exit(1);
            }
        }
        Command::Balance { address } => {
            let source = TonCenterSource::new();
            let balance = source.wallet_balance(&address).await.into_diagnostic()?;
            let amount = Decimal::from_str(&balance).into_diagnostic()?;
            let usd = PriceFeed::new()
                .quote_usd("ton", amount)
                .await
                .into_diagnostic()?;
            println!("{}", serde_json::json!({ "ton": balance, "usd": usd }));
        }
        Command::Price { ledger, amount } => {
            let usd = PriceFeed::new()
                .quote_usd(&ledger, amount)
                .await
                .into_diagnostic()?;
            println!("{usd}");
        }
    }

    Ok(())
}
