use clap::Parser;
use miette::{IntoDiagnostic, Result};
use pocketbank::domain::ports::LedgerStoreRef;
use pocketbank::infrastructure::in_memory::InMemoryLedger;
#[cfg(feature = "storage-rocksdb")]
use pocketbank::infrastructure::rocksdb::RocksDbLedger;
use pocketbank::interfaces::csv::operation_reader::OperationReader;
use pocketbank::interfaces::csv::report_writer::ReportWriter;
use pocketbank::interfaces::driver::OperationDriver;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input operations CSV file
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn open_store(db_path: Option<PathBuf>) -> Result<LedgerStoreRef> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = RocksDbLedger::open(path).into_diagnostic()?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Arc::new(InMemoryLedger::new()))
        }
        None => Ok(Arc::new(InMemoryLedger::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let store = open_store(cli.db_path)?;
    let mut driver = OperationDriver::new(store);

    // Apply operations
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = OperationReader::new(file);
    for record in reader.operations() {
        match record {
            Ok(record) => {
                if let Err(e) = driver.apply(record).await {
                    eprintln!("Error applying operation: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading operation: {}", e);
            }
        }
    }

    // Output final state
    let rows = driver.report().await.into_diagnostic()?;

    let stdout = io::stdout();
    let writer = ReportWriter::new(stdout.lock());
    writer.write_report(rows).into_diagnostic()?;

    Ok(())
}
