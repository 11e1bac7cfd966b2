use clap::Parser;
use donation_engine::application::engine::DonationEngine;
use donation_engine::domain::charity::MinorUnits;
use donation_engine::domain::policy::DonationPolicy;
use donation_engine::domain::ports::{CharityStore, CharityStoreBox, CreditLedgerBox};
use donation_engine::infrastructure::gateway::SimulatedGateway;
use donation_engine::infrastructure::in_memory::InMemoryCharityStore;
#[cfg(feature = "storage-rocksdb")]
use donation_engine::infrastructure::rocksdb::RocksDbCharityStore;
use donation_engine::interfaces::csv::charity_reader::CharityReader;
use donation_engine::interfaces::csv::charity_writer::CharityWriter;
use donation_engine::interfaces::csv::donation_reader::DonationReader;
use miette::{IntoDiagnostic, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Charity seed CSV file (id, name[, total])
    charities: PathBuf,

    /// Donation requests CSV file (amount, token, charity)
    donations: PathBuf,

    /// Donations must exceed this many minor currency units
    #[arg(long, default_value_t = 2000)]
    minimum: u64,

    /// ISO currency code used for charges
    #[arg(long, default_value = "THB")]
    currency: String,

    /// Seed for random charity selection; defaults to entropy
    #[arg(long)]
    seed: Option<u64>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[cfg(feature = "storage-rocksdb")]
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn in_memory_stores() -> (CharityStoreBox, CreditLedgerBox, CharityStoreBox) {
    let store = InMemoryCharityStore::new();
    (
        Box::new(store.clone()),
        Box::new(store.clone()),
        Box::new(store),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // One clone each for selection, crediting and the final report; they all
    // share the same underlying state.
    #[cfg(feature = "storage-rocksdb")]
    let (charities, ledger, report) = match &cli.db_path {
        Some(path) => {
            let store = RocksDbCharityStore::open(path).into_diagnostic()?;
            (
                Box::new(store.clone()) as CharityStoreBox,
                Box::new(store.clone()) as CreditLedgerBox,
                Box::new(store) as CharityStoreBox,
            )
        }
        None => in_memory_stores(),
    };
    #[cfg(not(feature = "storage-rocksdb"))]
    let (charities, ledger, report) = in_memory_stores();

    // Administrative seeding; the donation flow itself never inserts.
    let file = File::open(&cli.charities).into_diagnostic()?;
    for charity in CharityReader::new(file).charities() {
        let charity = charity.into_diagnostic()?;
        report.insert(charity).await.into_diagnostic()?;
    }

    let policy = DonationPolicy {
        currency: cli.currency,
        minimum: MinorUnits::new(cli.minimum),
        ..DonationPolicy::default()
    };
    let gateway = Box::new(SimulatedGateway::new());
    let engine = match cli.seed {
        Some(seed) => {
            DonationEngine::with_rng(charities, ledger, gateway, policy, StdRng::seed_from_u64(seed))
        }
        None => DonationEngine::new(charities, ledger, gateway, policy),
    };

    // Process donations
    let file = File::open(&cli.donations).into_diagnostic()?;
    for request in DonationReader::new(file).requests() {
        match request {
            Ok(request) => match engine.donate(request).await {
                Ok(receipt) => eprintln!(
                    "Donated {} to {} [{}], total now {}",
                    receipt.amount, receipt.charity_name, receipt.charity_id, receipt.new_total
                ),
                Err(failure) => eprintln!("Donation failed: {failure}"),
            },
            Err(e) => eprintln!("Error reading donation: {e}"),
        }
    }

    // Output final state
    let charities = report.all().await.into_diagnostic()?;
    let stdout = io::stdout();
    let mut writer = CharityWriter::new(stdout.lock());
    writer.write_charities(charities).into_diagnostic()?;

    Ok(())
}
