//! Command-line probe for the parcel core.
//!
//! Registers a parcel, walks it through the workflow and prints every step
//! as JSON, which exercises the store end to end against a real database.

use clap::Parser;
use log::error;
use parcel_core::db::open_db;
use parcel_core::{
    default_log_level, init_logging, Parcel, ParcelService, ParcelStore, ServiceResult,
    SqliteParcelStore,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "parcel", version, about = "Parcel tracker lifecycle demo")]
struct Cli {
    /// SQLite database file; created when missing.
    #[arg(long, default_value = "tracker.db")]
    db: PathBuf,
    /// Client id the demo parcel is registered for.
    #[arg(long, default_value_t = 1)]
    client: i64,
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_ref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("parcel: {err}");
            return ExitCode::FAILURE;
        }
    }

    let conn = match open_db(&cli.db) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("parcel: cannot open `{}`: {err}", cli.db.display());
            return ExitCode::FAILURE;
        }
    };

    let service = ParcelService::new(SqliteParcelStore::new(&conn));
    match run_demo(&service, cli.client) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_demo module=cli status=error error={err}");
            eprintln!("parcel: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_demo<S: ParcelStore>(service: &ParcelService<S>, client: i64) -> ServiceResult<()> {
    let parcel = service.register(client, "Pskov, Voennaya 15-375")?;
    print_step("registered", &parcel);

    service.change_address(parcel.number, "Saratov, Vesnyanaya 42-38")?;
    print_step("address changed", &service.parcel(parcel.number)?);

    let status = service.next_status(parcel.number)?;
    println!("parcel {} moved to `{status}`", parcel.number);

    if let Err(err) = service.change_address(parcel.number, "too late") {
        println!("address change refused: {err}");
    }

    for parcel in service.client_parcels(client)? {
        print_step("client parcel", &parcel);
    }

    let extra = service.register(client, "Moscow, Arbat 1")?;
    service.delete(extra.number)?;
    println!("parcel {} deleted while registered", extra.number);

    Ok(())
}

fn print_step(label: &str, parcel: &Parcel) {
    match serde_json::to_string(parcel) {
        Ok(json) => println!("{label}: {json}"),
        Err(err) => println!("{label}: <unprintable parcel {}: {err}>", parcel.number),
    }
}
